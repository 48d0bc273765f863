//! Command line front end
//!
//! | Command | Description |
//! |---------|-------------|
//! | `relay` / `relay serve` | Run the HTTP API |
//! | `relay providers [capability]` | Print providers with derived status |
//! | `relay capabilities` | Print linked capability adapters |
//! | `relay orchestrate <capability> --payload '{..}'` | Serve one request and print the result |
//! | `relay config --output relay.toml` | Write the effective configuration |
//!
//! State lives in memory, so `providers` and `orchestrate` see the
//! configured providers fresh on every invocation.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use relay_application::ports::registry::list_capability_adapters;
use relay_domain::value_objects::Payload;
use relay_infrastructure::config::{AppConfig, ConfigLoader};
use relay_infrastructure::{AppContext, init_app, init_logging};
use tracing::info;

/// Command line interface for Relay
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Relay - Adaptive multi-provider request orchestration")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// What to do; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print providers with their derived status
    Providers {
        /// Only this capability
        capability: Option<String>,
    },
    /// Print the capability adapters linked into this binary
    Capabilities,
    /// Serve one request and print the orchestration result
    Orchestrate {
        /// Requested capability
        capability: String,
        /// JSON object handed to the adapter
        #[arg(long, default_value = "{}")]
        payload: String,
        /// Per-attempt timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Maximum number of providers attempted
        #[arg(long)]
        max_retries: Option<usize>,
        /// Put providers without a daily cap first
        #[arg(long)]
        prefer_free: bool,
    },
    /// Write the effective configuration as TOML
    Config {
        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Load configuration from an optional explicit path
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}

/// Parse a payload argument; it must be a JSON object
pub fn parse_payload(raw: &str) -> anyhow::Result<Payload> {
    let value: serde_json::Value =
        serde_json::from_str(raw).context("payload is not valid JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => bail!("payload must be a JSON object, got {other}"),
    }
}

/// Entry point used by the binary: config, logging, then the command
///
/// Returns whether the command succeeded.
pub async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = load_config(cli.config.as_deref())?;
    let command = cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    });
    if let Command::Serve { host, port } = &command {
        if let Some(host) = host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }
    init_logging(&config.logging)?;

    execute(command, config, &mut std::io::stdout()).await
}

/// Run one command against `config`, writing human output to `out`
pub async fn execute(
    command: Command,
    config: AppConfig,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    match command {
        Command::Serve { .. } => {
            let app = init_app(config).await?;
            info!(
                version = env!("CARGO_PKG_VERSION"),
                capabilities = ?app.capabilities(),
                "Starting Relay"
            );
            relay_server::serve(app).await?;
            Ok(true)
        }
        Command::Providers { capability } => {
            let app = init_app(config).await?;
            print_providers(&app, capability.as_deref(), out).await?;
            Ok(true)
        }
        Command::Capabilities => {
            for (capability, description) in list_capability_adapters() {
                writeln!(out, "{capability:<20} {description}")?;
            }
            Ok(true)
        }
        Command::Orchestrate {
            capability,
            payload,
            timeout_ms,
            max_retries,
            prefer_free,
        } => {
            let payload = parse_payload(&payload)?;
            let app = init_app(config).await?;
            let mut request = app.request(capability, payload);
            if let Some(timeout_ms) = timeout_ms {
                request.timeout_ms = timeout_ms;
            }
            if let Some(max_retries) = max_retries {
                request.max_retries = max_retries;
            }
            request.prefer_free |= prefer_free;
            request.validate()?;

            let result = app.engine.orchestrate(request).await;
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
            Ok(result.is_success())
        }
        Command::Config { output } => {
            ConfigLoader::new().save_to_file(&config, &output)?;
            writeln!(out, "configuration written to {}", output.display())?;
            Ok(true)
        }
    }
}

async fn print_providers(
    app: &AppContext,
    capability: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let views = app.admin.list_providers(capability).await?;
    writeln!(
        out,
        "{:<16} {:<18} {:<18} {:>8} {:<20} {:>6}",
        "ID", "CAPABILITY", "NAME", "PRIORITY", "STATUS", "LOAD"
    )?;
    for view in views {
        let marker = if view.is_default { "*" } else { "" };
        writeln!(
            out,
            "{:<16} {:<18} {:<18} {:>8} {:<20} {:>5.0}%",
            format!("{}{marker}", view.provider.id),
            view.provider.capability,
            view.provider.name,
            view.provider.priority,
            view.status.to_string(),
            view.load_factor * 100.0,
        )?;
    }
    Ok(())
}
