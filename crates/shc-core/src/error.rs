//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the encoder workspace. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Validation failures surface before any cryptographic work begins.
//! - Capacity failures report required vs available characters so callers
//!   can adjust configuration.
//! - No stage swallows an error or substitutes a default; encoding is
//!   all-or-nothing per call.

use thiserror::Error;

/// Top-level error type for the SMART Health Card encoder.
#[derive(Error, Debug)]
pub enum ShcError {
    /// Claims model or input validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Token compaction or signing failed.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// QR chunk encoding failed.
    #[error("qr encoding error: {0}")]
    Qr(#[from] QrError),
}

/// Malformed claims model or pipeline input.
///
/// Always raised before compression or signing — a validation failure
/// never leaves partially executed cryptographic state behind.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Issuer is empty or not an absolute URI.
    #[error("issuer must be a non-empty absolute URI, got {0:?}")]
    InvalidIssuer(String),

    /// Epoch seconds outside the representable instant range.
    #[error("issuance instant {0} is not representable as a UTC datetime")]
    InvalidInstant(i64),

    /// Issuance instant lies in the future beyond clock-skew tolerance.
    #[error("issuance instant {instant} is {ahead_secs}s in the future (tolerance {tolerance_secs}s)")]
    IssuanceInFuture {
        /// The rejected instant, as epoch seconds.
        instant: i64,
        /// How far ahead of the local clock the instant is.
        ahead_secs: i64,
        /// The permitted clock-skew tolerance.
        tolerance_secs: i64,
    },

    /// The credential type list contains the same tag twice.
    #[error("duplicate credential type tag: {0}")]
    DuplicateCredentialType(String),

    /// A mandatory base credential type is missing.
    #[error("credential types must include the mandatory tag {0:?}")]
    MissingCredentialType(String),

    /// `fhirVersion` is not a `major.minor.patch` semantic version.
    #[error("fhirVersion must be a major.minor.patch semantic version, got {0:?}")]
    InvalidFhirVersion(String),

    /// The FHIR bundle text is not well-formed JSON.
    #[error("FHIR bundle is not well-formed JSON: {0}")]
    MalformedFhirBundle(String),

    /// A signed token must never be empty.
    #[error("signed token is empty")]
    EmptyToken,
}

/// Failure while compacting or signing the token.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Claims could not be serialized to JSON. Internal, non-retryable.
    #[error("claims serialization failed: {0}")]
    Serialization(String),

    /// The deflate step failed. Internal, non-retryable.
    #[error("payload compression failed: {0}")]
    Compression(String),

    /// The supplied key material is not a valid P-256 private key.
    #[error("signing key is not a valid P-256 key: {0}")]
    KeyMismatch(String),

    /// The underlying ECDSA primitive failed. Non-retryable as-is; the
    /// caller may retry with fresh key material or entropy.
    #[error("ECDSA signing failed: {0}")]
    Signing(String),
}

/// Failure while remapping or chunking the token for QR symbols.
#[derive(Error, Debug)]
pub enum QrError {
    /// The token contains a character outside the encodable alphabet.
    #[error("token character {ch:?} at position {position} cannot be numerically encoded")]
    UnencodableCharacter {
        /// The offending character.
        ch: char,
        /// Zero-based character position within the token.
        position: usize,
    },

    /// The configured symbol capacity cannot hold even a minimal chunk.
    #[error("symbol capacity too small: need at least {required} characters, capacity is {available}")]
    Capacity {
        /// Minimum characters a chunk would require.
        required: usize,
        /// The configured per-symbol capacity.
        available: usize,
    },

    /// An explicit chunk count override that cannot be honored.
    #[error("explicit chunk count {0} cannot be honored for this payload")]
    InvalidChunkCount(usize),

    /// A numeric body that is not a well-formed digit-pair sequence.
    #[error("malformed numeric body: {0}")]
    MalformedNumeric(String),
}
