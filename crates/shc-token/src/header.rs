//! # Token Header and Encoder Options
//!
//! The protected header is a fixed small JSON object:
//!
//! ```json
//! {"alg": "ES256", "zip": "DEF", "kid": "<optional>"}
//! ```
//!
//! `zip: "DEF"` signals that the payload segment is raw-deflate-compressed.
//! This encoder always emits it; a decoder must tolerate its absence
//! (uncompressed payload) as a documented extensibility point.

use serde::{Deserialize, Serialize};

/// The only signature algorithm this encoder produces.
pub const ALGORITHM: &str = "ES256";

/// The compression tag for raw-deflate payloads.
pub const COMPRESSION: &str = "DEF";

/// The protected header of the signed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Signature algorithm identifier. Always `"ES256"`.
    pub alg: String,
    /// Compression tag. `Some("DEF")` for deflate-compressed payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Key identifier, matching the issuer's published JWK set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

impl TokenHeader {
    /// The header this encoder emits: ES256, deflate, optional kid.
    pub fn new(kid: Option<String>) -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            zip: Some(COMPRESSION.to_string()),
            kid,
        }
    }
}

/// Caller-facing options for token encoding.
///
/// An options struct with documented defaults rather than overloaded
/// constructors: the default carries no key identifier.
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    /// Key identifier to embed in the header, typically the RFC 7638
    /// thumbprint of the signing key (see
    /// [`Es256Signer::key_thumbprint`](crate::Es256Signer::key_thumbprint)).
    pub key_identifier: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_without_kid_omits_field() {
        let json = serde_json::to_string(&TokenHeader::new(None)).unwrap();
        assert_eq!(json, r#"{"alg":"ES256","zip":"DEF"}"#);
    }

    #[test]
    fn header_with_kid_includes_field() {
        let json =
            serde_json::to_string(&TokenHeader::new(Some("3Kfdg".to_string()))).unwrap();
        assert_eq!(json, r#"{"alg":"ES256","zip":"DEF","kid":"3Kfdg"}"#);
    }
}
