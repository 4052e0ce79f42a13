//! # Claims Model — The Signed Payload Shape
//!
//! Defines `HealthCardClaims`, the canonical claims structure that the token
//! layer serializes, compresses, and signs:
//!
//! ```json
//! {"iss": "<issuer URI>", "nbf": <epoch seconds>, "vc": { ... }}
//! ```
//!
//! ## Determinism Invariant
//!
//! The signature is computed over the exact serialized byte sequence of this
//! structure, so serialization must be byte-stable across runs. Struct field
//! order is fixed and `serde_json` preserves it; `IssuanceInstant` truncates
//! to whole seconds so `nbf` is always the same integer for the same instant.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::credential::VerifiableCredential;
use crate::error::ValidationError;

/// Permitted clock skew when validating that an issuance instant is not in
/// the future.
pub const CLOCK_SKEW_TOLERANCE_SECS: i64 = 60;

/// A validated, non-empty absolute URI identifying the credential issuer's
/// public-key discovery endpoint (verifiers fetch
/// `<issuer>/.well-known/jwks.json`).
///
/// The original text is preserved verbatim — validation parses it but never
/// rewrites it, since the string participates in the signed byte sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssuerUri(String);

impl IssuerUri {
    /// Validate and wrap an issuer URI.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidIssuer` if the string is empty,
    /// relative, or not parseable as a URI.
    pub fn new(uri: impl Into<String>) -> Result<Self, ValidationError> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(ValidationError::InvalidIssuer(uri));
        }
        // `Url::parse` only accepts absolute URIs; a relative reference
        // fails with RelativeUrlWithoutBase.
        if Url::parse(&uri).is_err() {
            return Err(ValidationError::InvalidIssuer(uri));
        }
        Ok(Self(uri))
    }

    /// The issuer URI as originally supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for IssuerUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for IssuerUri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        Self::new(uri).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for IssuerUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A UTC instant truncated to whole seconds, serialized as integer epoch
/// seconds — the value of the `nbf` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IssuanceInstant(DateTime<Utc>);

impl IssuanceInstant {
    /// The current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// From a Unix epoch timestamp in seconds.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, ValidationError> {
        let dt = DateTime::from_timestamp(secs, 0).ok_or(ValidationError::InvalidInstant(secs))?;
        Ok(Self(dt))
    }

    /// The instant as epoch seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Serialize for IssuanceInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.epoch_secs())
    }
}

impl<'de> Deserialize<'de> for IssuanceInstant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let secs = i64::deserialize(deserializer)?;
        Self::from_epoch_secs(secs).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for IssuanceInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

/// The canonical claims structure signed into a SMART Health Card token.
///
/// Field order is the wire order: `iss`, `nbf`, `vc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCardClaims {
    /// The credential issuer's public-key discovery endpoint.
    #[serde(rename = "iss")]
    pub issuer: IssuerUri,
    /// When the card becomes valid.
    #[serde(rename = "nbf")]
    pub issued_at: IssuanceInstant,
    /// The wrapped verifiable credential.
    #[serde(rename = "vc")]
    pub verifiable_credential: VerifiableCredential,
}

impl HealthCardClaims {
    /// Assemble a claims model from validated parts.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::IssuanceInFuture` if `issued_at` lies more
    /// than [`CLOCK_SKEW_TOLERANCE_SECS`] ahead of the local clock.
    pub fn new(
        issuer: IssuerUri,
        issued_at: IssuanceInstant,
        verifiable_credential: VerifiableCredential,
    ) -> Result<Self, ValidationError> {
        let ahead = issued_at.epoch_secs() - Utc::now().timestamp();
        if ahead > CLOCK_SKEW_TOLERANCE_SECS {
            return Err(ValidationError::IssuanceInFuture {
                instant: issued_at.epoch_secs(),
                ahead_secs: ahead,
                tolerance_secs: CLOCK_SKEW_TOLERANCE_SECS,
            });
        }
        Ok(Self {
            issuer,
            issued_at,
            verifiable_credential,
        })
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
