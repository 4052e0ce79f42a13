//! # Credential Structure and Vocabulary
//!
//! Defines the `vc` claim: the credential-type tag list and the clinical
//! credential subject.
//!
//! ## Vocabulary
//!
//! Credential types follow the SMART Health Cards vocabulary
//! (<https://smarthealth.cards/vocabulary/>). Known tags are enum variants
//! so a typo is a compile error; unknown tags round-trip through the
//! `Other` escape variant.
//!
//! ## Opaque Clinical Payload
//!
//! The FHIR bundle is accepted as already-serialized JSON text. It is parsed
//! once to confirm syntactic well-formedness and embedded as a JSON value —
//! never re-escaped into a nested string, never validated against any
//! clinical data model.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// A credential-type tag from the SMART Health Cards vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CredentialType {
    /// The W3C base credential tag. Mandatory.
    VerifiableCredential,
    /// `https://smarthealth.cards#health-card`. Mandatory.
    HealthCard,
    /// `https://smarthealth.cards#covid19`.
    Covid19,
    /// `https://smarthealth.cards#immunization`.
    Immunization,
    /// `https://smarthealth.cards#laboratory`.
    Laboratory,
    /// Forward-compatible escape variant for tags outside the known
    /// vocabulary. Carried verbatim.
    Other(String),
}

impl CredentialType {
    /// The wire representation of the tag.
    pub fn tag(&self) -> &str {
        match self {
            Self::VerifiableCredential => "VerifiableCredential",
            Self::HealthCard => "https://smarthealth.cards#health-card",
            Self::Covid19 => "https://smarthealth.cards#covid19",
            Self::Immunization => "https://smarthealth.cards#immunization",
            Self::Laboratory => "https://smarthealth.cards#laboratory",
            Self::Other(tag) => tag,
        }
    }

    /// Parse a wire tag, mapping known vocabulary to closed variants.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "VerifiableCredential" => Self::VerifiableCredential,
            "https://smarthealth.cards#health-card" => Self::HealthCard,
            "https://smarthealth.cards#covid19" => Self::Covid19,
            "https://smarthealth.cards#immunization" => Self::Immunization,
            "https://smarthealth.cards#laboratory" => Self::Laboratory,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Serialize for CredentialType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for CredentialType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

impl std::fmt::Display for CredentialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// The verifiable credential wrapped inside the claims model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiableCredential {
    /// Ordered credential-type tags. No duplicates; must include
    /// `VerifiableCredential` and `HealthCard`.
    #[serde(rename = "type")]
    pub types: Vec<CredentialType>,
    /// The clinical subject of the credential.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: CredentialSubject,
}

impl VerifiableCredential {
    /// Build a credential from an ordered tag list and a subject.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::DuplicateCredentialType` if any tag appears
    /// twice, or `ValidationError::MissingCredentialType` if either mandatory
    /// base tag is absent.
    pub fn new(
        types: Vec<CredentialType>,
        credential_subject: CredentialSubject,
    ) -> Result<Self, ValidationError> {
        let mut seen = std::collections::HashSet::new();
        for ty in &types {
            if !seen.insert(ty.tag()) {
                return Err(ValidationError::DuplicateCredentialType(
                    ty.tag().to_string(),
                ));
            }
        }
        for mandatory in [CredentialType::VerifiableCredential, CredentialType::HealthCard] {
            if !types.contains(&mandatory) {
                return Err(ValidationError::MissingCredentialType(
                    mandatory.tag().to_string(),
                ));
            }
        }
        Ok(Self {
            types,
            credential_subject,
        })
    }
}

/// The clinical subject: a FHIR version and an opaque FHIR bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialSubject {
    /// The FHIR release the bundle conforms to, as `major.minor.patch`.
    #[serde(rename = "fhirVersion")]
    pub fhir_version: String,
    /// The clinical bundle, embedded as a parsed JSON value.
    #[serde(rename = "fhirBundle")]
    pub fhir_bundle: serde_json::Value,
}

impl CredentialSubject {
    /// Build a subject from a FHIR version string and bundle JSON text.
    ///
    /// The bundle text is parsed for well-formedness and embedded as a JSON
    /// value so it serializes inline rather than as an escaped string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFhirVersion` if the version is not
    /// `major.minor.patch`, or `ValidationError::MalformedFhirBundle` if the
    /// bundle text is not valid JSON.
    pub fn new(fhir_version: &str, fhir_bundle_json: &str) -> Result<Self, ValidationError> {
        validate_semver(fhir_version)?;
        let fhir_bundle = serde_json::from_str(fhir_bundle_json)
            .map_err(|e| ValidationError::MalformedFhirBundle(e.to_string()))?;
        Ok(Self {
            fhir_version: fhir_version.to_string(),
            fhir_bundle,
        })
    }
}

/// Require exactly `major.minor.patch` with numeric components.
fn validate_semver(version: &str) -> Result<(), ValidationError> {
    let mut parts = 0usize;
    for part in version.split('.') {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFhirVersion(version.to_string()));
        }
        parts += 1;
    }
    if parts != 3 {
        return Err(ValidationError::InvalidFhirVersion(version.to_string()));
    }
    Ok(())
}
