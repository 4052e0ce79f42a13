//! # Token Compactor — Claims to Signing Input
//!
//! Serializes the claims model to its canonical JSON byte sequence,
//! compresses it with raw deflate (no zlib/gzip wrapper, no checksum), and
//! produces the base64url header and payload segments.
//!
//! ## Determinism Invariant
//!
//! The signature is computed over exactly `header "." payload`, so the
//! claims serialization must be byte-stable across runs. Struct field order
//! under `serde_json` provides this; no re-serialization happens after
//! compaction.

use std::io::Write;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use shc_core::{HealthCardClaims, ShcError, TokenError};

use crate::header::{TokenHeader, TokenOptions};

/// The two unsigned segments of a token plus the exact bytes to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningInput {
    header_segment: String,
    payload_segment: String,
}

impl SigningInput {
    /// The base64url-encoded protected header.
    pub fn header_segment(&self) -> &str {
        &self.header_segment
    }

    /// The base64url-encoded compressed claims payload.
    pub fn payload_segment(&self) -> &str {
        &self.payload_segment
    }

    /// The exact ASCII sequence the signature is computed over:
    /// `header "." payload`.
    pub fn message(&self) -> String {
        format!("{}.{}", self.header_segment, self.payload_segment)
    }
}

/// Compact a claims model into its signing input.
///
/// # Errors
///
/// Returns `TokenError::Serialization` if the claims cannot be serialized
/// and `TokenError::Compression` if the deflate step fails. Both indicate
/// a programming or environment fault and are non-retryable.
pub fn compact(claims: &HealthCardClaims, options: &TokenOptions) -> Result<SigningInput, ShcError> {
    let claims_bytes =
        serde_json::to_vec(claims).map_err(|e| TokenError::Serialization(e.to_string()))?;
    let compressed = deflate_raw(&claims_bytes)?;

    let header = TokenHeader::new(options.key_identifier.clone());
    let header_bytes =
        serde_json::to_vec(&header).map_err(|e| TokenError::Serialization(e.to_string()))?;

    Ok(SigningInput {
        header_segment: URL_SAFE_NO_PAD.encode(header_bytes),
        payload_segment: URL_SAFE_NO_PAD.encode(compressed),
    })
}

/// Raw deflate at best compression — no container framing, no checksum.
fn deflate_raw(bytes: &[u8]) -> Result<Vec<u8>, TokenError> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(bytes)
        .map_err(|e| TokenError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| TokenError::Compression(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use flate2::read::DeflateDecoder;
    use shc_core::{
        CredentialSubject, CredentialType, HealthCardClaims, IssuanceInstant, IssuerUri,
        VerifiableCredential,
    };
    use std::io::Read;

    fn sample_claims() -> HealthCardClaims {
        HealthCardClaims::new(
            IssuerUri::new("https://example.org/issuer").unwrap(),
            IssuanceInstant::from_epoch_secs(1_632_918_645).unwrap(),
            VerifiableCredential::new(
                vec![
                    CredentialType::VerifiableCredential,
                    CredentialType::HealthCard,
                ],
                CredentialSubject::new(
                    "4.0.1",
                    r#"{"resourceType":"Bundle","type":"collection","entry":[]}"#,
                )
                .unwrap(),
            )
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn payload_inflates_back_to_canonical_claims() {
        let claims = sample_claims();
        let input = compact(&claims, &TokenOptions::default()).unwrap();

        let compressed = URL_SAFE_NO_PAD.decode(input.payload_segment()).unwrap();
        let mut inflated = Vec::new();
        DeflateDecoder::new(&compressed[..])
            .read_to_end(&mut inflated)
            .unwrap();

        let round_tripped: serde_json::Value = serde_json::from_slice(&inflated).unwrap();
        let canonical = serde_json::to_value(&claims).unwrap();
        assert_eq!(round_tripped, canonical);
    }

    #[test]
    fn compaction_is_byte_stable() {
        let claims = sample_claims();
        let a = compact(&claims, &TokenOptions::default()).unwrap();
        let b = compact(&claims, &TokenOptions::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn segments_are_unpadded_base64url() {
        let input = compact(&sample_claims(), &TokenOptions::default()).unwrap();
        let message = input.message();
        assert!(!message.contains('='));
        assert_eq!(message.matches('.').count(), 1);
        assert!(message
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.'));
    }

    #[test]
    fn header_decodes_with_expected_fields() {
        let options = TokenOptions {
            key_identifier: Some("test-kid".to_string()),
        };
        let input = compact(&sample_claims(), &options).unwrap();
        let header_bytes = URL_SAFE_NO_PAD.decode(input.header_segment()).unwrap();
        let header: serde_json::Value = serde_json::from_slice(&header_bytes).unwrap();
        assert_eq!(header["alg"], "ES256");
        assert_eq!(header["zip"], "DEF");
        assert_eq!(header["kid"], "test-kid");
    }

    #[test]
    fn compressed_payload_has_no_zlib_framing() {
        let input = compact(&sample_claims(), &TokenOptions::default()).unwrap();
        let compressed = URL_SAFE_NO_PAD.decode(input.payload_segment()).unwrap();
        // A zlib stream would begin with 0x78; raw deflate of JSON text
        // starts with a block header whose low bits encode the block type.
        assert_ne!(compressed[0], 0x78);
    }
}
