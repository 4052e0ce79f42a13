//! # Encode Subcommand
//!
//! Builds and signs a health card from a FHIR bundle file and prints the
//! signed token plus each QR chunk string.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use shc_core::{
    CredentialSubject, CredentialType, HealthCardClaims, IssuanceInstant, IssuerUri,
    VerifiableCredential,
};
use shc_qr::{encode_chunks, QrConfig, DEFAULT_CAPACITY_PER_SYMBOL};
use shc_token::{issue_token, Es256Signer, TokenOptions};

/// A small immunization bundle used when no `--bundle` file is supplied.
const SAMPLE_BUNDLE: &str = r#"{
  "resourceType": "Bundle",
  "type": "collection",
  "entry": [
    {
      "fullUrl": "resource:0",
      "resource": {
        "resourceType": "Patient",
        "name": [{"family": "DEVELOPMENTFIVE", "given": ["WEB"]}],
        "birthDate": "1991-01-01"
      }
    },
    {
      "fullUrl": "resource:1",
      "resource": {
        "resourceType": "Immunization",
        "status": "completed",
        "vaccineCode": {"coding": [{"system": "http://hl7.org/fhir/sid/cvx", "code": "212"}]},
        "patient": {"reference": "resource:0"},
        "occurrenceDateTime": "2021-09-29"
      }
    }
  ]
}"#;

/// Arguments for the encode subcommand.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to a FHIR bundle JSON file. Uses an embedded sample bundle
    /// when omitted.
    #[arg(long)]
    pub bundle: Option<PathBuf>,

    /// Issuer URI whose `/.well-known/jwks.json` publishes the public key.
    #[arg(long, default_value = "https://spec.smarthealth.cards/examples/issuer")]
    pub issuer: String,

    /// FHIR release the bundle conforms to.
    #[arg(long, default_value = "4.0.1")]
    pub fhir_version: String,

    /// Additional credential-type tags beyond the mandatory pair
    /// (e.g. `https://smarthealth.cards#covid19`).
    #[arg(long = "type")]
    pub extra_types: Vec<String>,

    /// Base64url-encoded P-256 private scalar (JWK `d`). Generates an
    /// ephemeral key when omitted.
    #[arg(long)]
    pub key: Option<String>,

    /// Per-symbol capacity ceiling in characters.
    #[arg(long, default_value_t = DEFAULT_CAPACITY_PER_SYMBOL)]
    pub capacity: usize,
}

/// Run the encode pipeline end to end and print the results.
pub fn run(args: EncodeArgs) -> anyhow::Result<()> {
    let bundle_json = match &args.bundle {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading FHIR bundle from {}", path.display()))?,
        None => {
            tracing::info!("no --bundle supplied, using the embedded sample");
            SAMPLE_BUNDLE.to_string()
        }
    };

    let mut types = vec![
        CredentialType::VerifiableCredential,
        CredentialType::HealthCard,
    ];
    types.extend(args.extra_types.iter().map(|t| CredentialType::from_tag(t)));

    let claims = HealthCardClaims::new(
        IssuerUri::new(args.issuer.clone())?,
        IssuanceInstant::now(),
        VerifiableCredential::new(
            types,
            CredentialSubject::new(&args.fhir_version, &bundle_json)?,
        )?,
    )?;

    let signer = match &args.key {
        Some(d) => Es256Signer::from_jwk_params("P-256", d)?,
        None => {
            tracing::info!("no --key supplied, generating an ephemeral P-256 key");
            Es256Signer::random()
        }
    };
    let options = TokenOptions {
        key_identifier: Some(signer.key_thumbprint()),
    };

    let token = issue_token(&claims, &options, &signer)?;
    tracing::info!(token_chars = token.as_str().len(), "token signed");
    println!("{token}");

    let config = QrConfig {
        capacity_per_symbol: args.capacity,
        ..QrConfig::default()
    };
    let chunks = encode_chunks(&token, &config)?;
    tracing::info!(chunks = chunks.len(), "token chunked for QR");
    for chunk in &chunks {
        println!("{}", chunk.payload());
    }
    Ok(())
}
