//! # shc-cli — SMART Health Card Encoder CLI
//!
//! A thin demo wrapper around the encoding pipeline: build a claims model
//! from a FHIR bundle, compact and sign it into a token, then split the
//! token into QR chunk strings.
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handlers delegate to `shc-core` / `shc-token` / `shc-qr` — no encoding
//!   logic lives here.

pub mod encode;
