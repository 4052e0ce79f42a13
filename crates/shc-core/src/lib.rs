//! # shc-core — Foundational Types for the SMART Health Card Encoder
//!
//! This crate is the leaf of the workspace DAG. It defines the claims model
//! that the token layer signs, the credential-type vocabulary, and the error
//! hierarchy shared by every stage of the encoding pipeline.
//!
//! ## Key Design Principles
//!
//! 1. **Validated construction.** `HealthCardClaims`, `VerifiableCredential`,
//!    and `CredentialSubject` can only be built through constructors that
//!    check field shapes. Malformed input is rejected here, before any
//!    cryptographic work begins.
//!
//! 2. **Closed vocabulary with an escape hatch.** `CredentialType` is an
//!    enum over the SMART Health Cards vocabulary plus an `Other` variant
//!    for forward-compatible unknown tags — typos in known tags become
//!    compile errors instead of silently unverifiable credentials.
//!
//! 3. **Second-precision instants.** `IssuanceInstant` is UTC-only,
//!    truncated to whole seconds, and serializes as integer epoch seconds —
//!    the `nbf` claim is never a float.
//!
//! 4. **Opaque clinical payload.** The FHIR bundle is checked for JSON
//!    well-formedness only and embedded verbatim as a parsed value. No
//!    clinical schema validation happens anywhere in this workspace.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `shc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod claims;
pub mod credential;
pub mod error;

pub use claims::{HealthCardClaims, IssuanceInstant, IssuerUri};
pub use credential::{CredentialSubject, CredentialType, VerifiableCredential};
pub use error::{QrError, ShcError, TokenError, ValidationError};
