//! # shc-token — Compact Signed Token Layer
//!
//! Turns a validated [`HealthCardClaims`] model into the three-segment,
//! dot-delimited signed token that the QR layer chunks:
//!
//! ```text
//! <base64url-header>.<base64url-payload>.<base64url-signature>
//! ```
//!
//! - **Compactor** (`compact.rs`): canonical claims JSON → raw deflate
//!   (no zlib/gzip framing) → base64url payload segment, plus the fixed
//!   `{alg, zip, kid?}` header segment.
//!
//! - **Signer** (`sign.rs`): ES256 (ECDSA over P-256 with SHA-256) over the
//!   `header.payload` bytes, encoded as fixed-length 64-byte `r‖s`.
//!
//! Every stage is a pure function over its input plus an immutable key;
//! concurrent encodes need no coordination.

pub mod compact;
pub mod header;
pub mod sign;

pub use compact::{compact, SigningInput};
pub use header::{TokenHeader, TokenOptions, ALGORITHM, COMPRESSION};
pub use sign::{Es256Signer, SignedToken};

use shc_core::{HealthCardClaims, ShcError};

/// Encode and sign a claims model in one step.
///
/// Equivalent to [`compact`] followed by [`Es256Signer::sign`].
///
/// # Errors
///
/// Propagates `TokenError::Serialization` / `TokenError::Compression` from
/// compaction and `TokenError::Signing` from the signature primitive.
pub fn issue_token(
    claims: &HealthCardClaims,
    options: &TokenOptions,
    signer: &Es256Signer,
) -> Result<SignedToken, ShcError> {
    let input = compact(claims, options)?;
    signer.sign(&input)
}
