//! # shc-qr — QR Chunk Encoder
//!
//! Re-encodes a signed token into one or more numeric-mode QR payloads:
//!
//! ```text
//! shc:/<numeric>                    single symbol
//! shc:/<index>/<total>/<numeric>    multi-symbol
//! ```
//!
//! - **Numeric remap** (`numeric.rs`): each token character becomes the
//!   zero-padded two-digit decimal of `ord(c) - 45`, packing the token into
//!   QR numeric mode at higher density than byte mode.
//!
//! - **Chunking** (`chunk.rs`): capacity math, minimal chunk count, and a
//!   pair-aligned balanced split — no chunk boundary ever cuts a two-digit
//!   group, so reassembly in index order reproduces the token exactly.
//!
//! - **Config** (`config.rs`): per-symbol capacity ceiling, error-correction
//!   level for the external renderer, optional chunk-count override.
//!
//! Rendering the chunk strings into symbol matrices is the external
//! renderer's job; this crate only guarantees each chunk fits the supplied
//! capacity ceiling.

pub mod chunk;
pub mod config;
pub mod numeric;

pub use chunk::{encode_chunks, QrChunk, SCHEME_TAG};
pub use config::{ErrorCorrectionLevel, QrConfig, DEFAULT_CAPACITY_PER_SYMBOL};
pub use numeric::{decode_numeric, encode_numeric};
