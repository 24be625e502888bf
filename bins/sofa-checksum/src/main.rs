//! sofa-checksum: compute SOFA API request and callback checksums.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use sofa_checksum::{
    build_callback_checksum, callback_checksum_from_reader, callback_payload,
    RequestChecksumBuilder,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "sofa-checksum")]
#[command(about = "Compute SOFA API request and callback checksums")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API secret (overrides the config file)
    #[arg(short, long, global = true, env = "SOFA_API_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Checksum for an outbound API request
    Request {
        /// Query parameters as key=value
        params: Vec<String>,

        /// Serialized request body
        #[arg(short, long)]
        body: Option<String>,

        /// Unix timestamp sent as `t` (defaults to now)
        #[arg(short, long, allow_negative_numbers = true)]
        time: Option<i64>,

        /// Nonce sent as `r` (defaults to a random string)
        #[arg(short, long)]
        nonce: Option<String>,
    },

    /// Checksum for an inbound callback notification
    Callback {
        /// Callback body; read from stdin when neither this nor --body-file is given
        #[arg(short, long, conflicts_with = "body_file")]
        body: Option<String>,

        /// File holding the callback body
        #[arg(short = 'f', long)]
        body_file: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct RequestOutput {
    checksum: String,
    t: i64,
    r: String,
    query: String,
}

#[derive(Serialize)]
struct CallbackOutput {
    checksum: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{} {:#}",
                "error:".if_supports_color(Stream::Stderr, |t| t.red()),
                e
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "sofa_checksum=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let config = Config::load(cli.config.as_deref(), &cwd)?;
    let secret = resolve_secret(cli.secret, &config)?;

    match cli.command {
        Commands::Request {
            params,
            body,
            time,
            nonce,
        } => run_request(&secret, params, body, time, nonce, cli.json),
        Commands::Callback { body, body_file } => {
            run_callback(&secret, body.as_deref(), body_file.as_deref(), cli.json)
        }
    }
}

fn resolve_secret(flag: Option<String>, config: &Config) -> Result<String> {
    if let Some(secret) = flag {
        return Ok(secret);
    }
    match config.secret() {
        Some(secret) => Ok(secret.to_string()),
        None => bail!("No API secret: pass --secret, set SOFA_API_SECRET, or add [api] secret to the config file"),
    }
}

/// Random uppercase alphanumeric nonce
fn generate_nonce() -> String {
    uuid::Uuid::new_v4().simple().to_string().to_uppercase()
}

fn run_request(
    secret: &str,
    params: Vec<String>,
    body: Option<String>,
    time: Option<i64>,
    nonce: Option<String>,
    json: bool,
) -> Result<()> {
    for param in params.iter().filter(|p| !p.contains('=')) {
        tracing::warn!(param = %param, "parameter is not in key=value form");
    }

    let t = time.unwrap_or_else(|| chrono::Utc::now().timestamp());
    let r = nonce.unwrap_or_else(generate_nonce);

    let mut request = RequestChecksumBuilder::new(secret)
        .queries(params)
        .timestamp(t)
        .nonce(r.clone());
    if let Some(body) = body {
        request = request.body(body);
    }

    let output = RequestOutput {
        checksum: request.build(),
        t,
        r,
        query: request.query_string(),
    };
    tracing::debug!(query = %output.query, "request signed");

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output.checksum);
    }
    Ok(())
}

fn run_callback(secret: &str, body: Option<&str>, body_file: Option<&Path>, json: bool) -> Result<()> {
    let checksum = match (body, body_file) {
        (Some(body), _) => build_callback_checksum(&callback_payload(body, secret))?,
        (None, Some(path)) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            callback_checksum_from_reader(file.chain(secret.as_bytes()))
                .with_context(|| format!("Failed to hash {}", path.display()))?
        }
        (None, None) => callback_checksum_from_reader(io::stdin().lock().chain(secret.as_bytes()))
            .context("Failed to hash stdin")?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&CallbackOutput { checksum })?);
    } else {
        println!("{checksum}");
    }
    Ok(())
}
