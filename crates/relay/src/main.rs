//! Relay - Entry Point
//!
//! Lives in the `relay` facade crate so every layer, including the adapter
//! registrations in `relay-providers`, is linked into one binary.

// Force-link relay-providers so the linkme adapter registrations are included
extern crate relay_providers;

use std::process::ExitCode;

use clap::Parser;
use relay::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match relay::run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("relay: {e:#}");
            ExitCode::FAILURE
        }
    }
}
