//! CLI entry point for the authentication probe.

use std::time::Duration;

use anyhow::{Context, Result};
use authprobe_core::{AuthProbe, ProbeConfig, persist_session_cookie};
use authprobe_core::config::normalize_callback_path;
use clap::Parser;
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries only the resulting cookie pair.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Password deliberately left out of the log line.
    debug!(
        base_url = ?args.base_url,
        email = %args.email,
        save = args.save,
        "CLI arguments parsed"
    );

    let base_url = ProbeConfig::resolve_base_url(args.base_url.as_deref())?;
    let config = ProbeConfig {
        base_url,
        email: args.email,
        password: args.password,
        callback_path: normalize_callback_path(&args.callback_path),
        timeout: Duration::from_secs(args.timeout_secs),
        probe_procedure: (!args.no_probe).then(|| args.probe.clone()),
        output: args.output,
    };

    info!(base_url = %config.base_url, email = %config.email, "starting authentication probe");

    let probe = AuthProbe::new(config).context("failed to build HTTP client")?;
    let cookie = probe.authenticate().await?;

    info!(cookie = %cookie.name, "authentication succeeded");

    if let Some(procedure) = probe.config().probe_procedure.clone() {
        match probe.probe_protected(&procedure).await {
            Ok(()) => info!(procedure = %procedure, "protected endpoint accepted the session cookie"),
            Err(error) => warn!(
                %error,
                "protected endpoint probe failed; the session cookie itself is still valid"
            ),
        }
    }

    if args.save {
        persist_session_cookie(&cookie, &probe.config().output)
            .context("authentication succeeded but the cookie file could not be written")?;
    }

    println!("{}", cookie.to_cookie_pair());

    Ok(())
}
