//! # shc CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// SMART Health Card encoder — signs FHIR-derived claims into compact
/// tokens and renders them as QR chunk strings.
#[derive(Parser, Debug)]
#[command(name = "shc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Encode and sign a health card, printing the token and QR chunks.
    Encode(shc_cli::encode::EncodeArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(args) => shc_cli::encode::run(args),
    }
}
