//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use authprobe_core::config::{
    DEFAULT_CALLBACK_PATH, DEFAULT_EMAIL, DEFAULT_OUTPUT_FILE, DEFAULT_PASSWORD,
    DEFAULT_PROBE_PROCEDURE, DEFAULT_TIMEOUT_SECS,
};

/// Probe a NextAuth credentials login and capture the session cookie.
///
/// authprobe fetches a CSRF token, submits the credentials form without
/// following redirects, and reports whether a session cookie was issued.
/// On success the `name=value` pair is printed to stdout; logs go to
/// stderr. Exits 0 on success, non-zero on any authentication failure.
#[derive(Parser, Debug)]
#[command(name = "authprobe")]
#[command(author, version, about)]
pub struct Args {
    /// Base URL of the deployment (overrides NEXTAUTH_URL; default http://localhost:3000)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Account email submitted to the credentials provider
    #[arg(long, default_value = DEFAULT_EMAIL)]
    pub email: String,

    /// Account password submitted to the credentials provider
    #[arg(long, default_value = DEFAULT_PASSWORD)]
    pub password: String,

    /// Write the session cookie to the output file on success
    #[arg(short, long)]
    pub save: bool,

    /// Output file for --save
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Protected tRPC procedure probed after a successful login
    #[arg(long, default_value = DEFAULT_PROBE_PROCEDURE)]
    pub probe: String,

    /// Skip the protected-endpoint probe
    #[arg(long)]
    pub no_probe: bool,

    /// Callback path submitted with the credentials form
    #[arg(long, default_value = DEFAULT_CALLBACK_PATH)]
    pub callback_path: String,

    /// Per-request timeout in seconds (1-300)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout_secs: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
