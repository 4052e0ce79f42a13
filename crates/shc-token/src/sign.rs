//! # ES256 Token Signer
//!
//! Signs the compacted `header.payload` bytes with ECDSA over P-256 and
//! SHA-256, producing the final three-segment token.
//!
//! ## Security Invariant
//!
//! - Signing input MUST be a [`SigningInput`] — you cannot sign arbitrary
//!   bytes. The only way to produce one is through the compactor, so every
//!   signature covers a canonically serialized claims payload.
//! - Private key material is never serialized or logged. `Es256Signer` does
//!   not implement `Serialize` and its `Debug` output is opaque.
//! - The curve is fixed at the type level by `p256`; key material imported
//!   from JWK fields is checked against the declared curve name.
//!
//! The signature is encoded as fixed-length `r‖s` (32 bytes each,
//! zero-padded), never DER.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use sha2::{Digest, Sha256};
use shc_core::{ShcError, TokenError, ValidationError};

use crate::compact::SigningInput;

/// The curve name this signer accepts in JWK key material.
pub const CURVE: &str = "P-256";

/// A complete signed token: `header.payload.signature`, each segment
/// base64url without padding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignedToken(String);

impl SignedToken {
    /// Wrap a token string, rejecting the empty string.
    pub fn new(token: String) -> Result<Self, ValidationError> {
        if token.is_empty() {
            return Err(ValidationError::EmptyToken);
        }
        Ok(Self(token))
    }

    /// The token as an ASCII string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper, yielding the owned token string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SignedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ES256 signer holding a P-256 private key.
///
/// Stateless beyond the key; safe to share across concurrent encode calls.
pub struct Es256Signer {
    signing_key: SigningKey,
}

impl Es256Signer {
    /// Wrap an existing P-256 signing key.
    pub fn from_signing_key(signing_key: SigningKey) -> Self {
        Self { signing_key }
    }

    /// Generate an ephemeral signer from the system entropy source.
    pub fn random() -> Self {
        Self {
            signing_key: SigningKey::random(&mut rand::rngs::OsRng),
        }
    }

    /// Import a private key from JWK fields: the declared curve name and
    /// the base64url-encoded private scalar `d`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::KeyMismatch` if `crv` is not `"P-256"`, if `d`
    /// is not valid base64url, or if the scalar is not a valid P-256 key.
    pub fn from_jwk_params(crv: &str, d_b64url: &str) -> Result<Self, TokenError> {
        if crv != CURVE {
            return Err(TokenError::KeyMismatch(format!(
                "expected curve {CURVE}, got {crv:?}"
            )));
        }
        let d = URL_SAFE_NO_PAD
            .decode(d_b64url)
            .map_err(|e| TokenError::KeyMismatch(format!("private scalar is not base64url: {e}")))?;
        let signing_key = SigningKey::from_slice(&d)
            .map_err(|e| TokenError::KeyMismatch(format!("invalid P-256 private scalar: {e}")))?;
        Ok(Self { signing_key })
    }

    /// The public counterpart of the signing key.
    pub fn verifying_key(&self) -> VerifyingKey {
        *self.signing_key.verifying_key()
    }

    /// The RFC 7638 JWK thumbprint of the public key, base64url without
    /// padding — the conventional `kid` value for SMART Health Card issuers.
    pub fn key_thumbprint(&self) -> String {
        let point = self.verifying_key().to_encoded_point(false);
        // Uncompressed SEC1 points always carry both coordinates.
        let x = URL_SAFE_NO_PAD.encode(point.x().expect("uncompressed point has x"));
        let y = URL_SAFE_NO_PAD.encode(point.y().expect("uncompressed point has y"));
        // RFC 7638: required members only, lexicographic order, no whitespace.
        let jwk = format!(r#"{{"crv":"P-256","kty":"EC","x":"{x}","y":"{y}"}}"#);
        URL_SAFE_NO_PAD.encode(Sha256::digest(jwk.as_bytes()))
    }

    /// Sign the compacted input, producing the full three-segment token.
    ///
    /// Uses RFC 6979 deterministic nonce generation via `p256`; verifiers
    /// only check correctness, so deterministic and randomized nonces are
    /// both acceptable here.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if the ECDSA primitive fails.
    pub fn sign(&self, input: &SigningInput) -> Result<SignedToken, ShcError> {
        let message = input.message();
        let signature: Signature = self
            .signing_key
            .try_sign(message.as_bytes())
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        let signature_segment = URL_SAFE_NO_PAD.encode(signature.to_bytes());
        Ok(SignedToken::new(format!("{message}.{signature_segment}"))?)
    }
}

impl std::fmt::Debug for Es256Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Es256Signer(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Demo key from the SMART Health Cards developer portal.
    const DEMO_D: &str = "FvOOk6hMixJ2o9zt4PCfan_UW7i4aOEnzj76ZaCI9Og";
    const DEMO_KID: &str = "3Kfdg-XwP-7gXyywtUfUADwBumDOPKMQx-iELL11W9s";

    #[test]
    fn empty_token_rejected() {
        assert!(matches!(
            SignedToken::new(String::new()),
            Err(ValidationError::EmptyToken)
        ));
    }

    #[test]
    fn jwk_import_rejects_wrong_curve() {
        let err = Es256Signer::from_jwk_params("P-384", DEMO_D).unwrap_err();
        assert!(matches!(err, TokenError::KeyMismatch(_)));
    }

    #[test]
    fn jwk_import_rejects_garbage_scalar() {
        assert!(matches!(
            Es256Signer::from_jwk_params(CURVE, "!!!not-base64url!!!"),
            Err(TokenError::KeyMismatch(_))
        ));
        assert!(matches!(
            Es256Signer::from_jwk_params(CURVE, "AAAA"),
            Err(TokenError::KeyMismatch(_))
        ));
    }

    #[test]
    fn thumbprint_matches_demo_portal_kid() {
        let signer = Es256Signer::from_jwk_params(CURVE, DEMO_D).unwrap();
        assert_eq!(signer.key_thumbprint(), DEMO_KID);
    }

    #[test]
    fn debug_does_not_leak_key_material() {
        let signer = Es256Signer::from_jwk_params(CURVE, DEMO_D).unwrap();
        assert_eq!(format!("{signer:?}"), "Es256Signer(..)");
    }
}
