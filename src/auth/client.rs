//! HTTP client construction for the login flow.
//!
//! Centralizes client policy so every request in a run shares the same
//! timeouts, cookie jar, and redirect handling.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Builds the client used for the whole login sequence.
///
/// Redirects are never followed: the login response's raw status code is
/// part of the protocol (302 can signal an accepted login), so the client
/// must surface it instead of chasing the redirect target. The shared jar
/// accumulates every `Set-Cookie` the server issues across the run.
///
/// # Errors
///
/// Returns the underlying builder error when client construction fails.
pub fn build_login_client(
    cookie_jar: Arc<Jar>,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(timeout)
        .gzip(true)
        .user_agent(default_user_agent())
        .cookie_provider(cookie_jar)
        .redirect(Policy::none())
        .build()
}

/// Default User-Agent identifying the tool.
fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("authprobe/{version}")
}
