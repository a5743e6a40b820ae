//! Per-run configuration for the authentication probe.
//!
//! All knobs are resolved once at startup into an explicit [`ProbeConfig`]
//! that is handed to the probe at construction - nothing reads ambient
//! globals after that point.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable that overrides the default base URL.
pub const BASE_URL_ENV: &str = "NEXTAUTH_URL";

/// Base URL used when neither `--base-url` nor `NEXTAUTH_URL` is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Seeded development account, so a bare run works against a dev server.
pub const DEFAULT_EMAIL: &str = "client1@test.com";

/// Password shared by the seeded development accounts.
pub const DEFAULT_PASSWORD: &str = "Test123!";

/// Post-login redirect target submitted with the credentials form.
pub const DEFAULT_CALLBACK_PATH: &str = "/fr/client";

/// Protected tRPC procedure used for the diagnostic probe.
pub const DEFAULT_PROBE_PROCEDURE: &str = "client.announcements.getMyAnnouncements";

/// Cookie output file written by `--save`.
pub const DEFAULT_OUTPUT_FILE: &str = "auth-cookie.txt";

/// Per-request timeout in seconds.
/// 30s tolerates a slow dev server while still failing fast enough to script against.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors resolving configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL (flag or `NEXTAUTH_URL`) could not be used.
    #[error("invalid base URL '{value}': {reason}")]
    InvalidBaseUrl {
        /// The offending URL string.
        value: String,
        /// Description of what was wrong.
        reason: String,
    },
}

/// Configuration for one authentication run.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Base URL of the deployment under test.
    pub base_url: Url,
    /// Account email submitted to the credentials provider.
    pub email: String,
    /// Account password submitted to the credentials provider.
    pub password: String,
    /// Path appended to the base URL as the `callbackUrl` form field.
    pub callback_path: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Protected tRPC procedure to hit after login; `None` skips the probe.
    pub probe_procedure: Option<String>,
    /// File written by `--save`.
    pub output: PathBuf,
}

impl ProbeConfig {
    /// Resolves the base URL: explicit flag value, then `NEXTAUTH_URL`,
    /// then the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the winning value does
    /// not parse as an http(s) URL.
    pub fn resolve_base_url(flag: Option<&str>) -> Result<Url, ConfigError> {
        let value = flag
            .map(std::string::ToString::to_string)
            .or_else(env_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        parse_base_url(&value)
    }

    /// URL of the CSRF token endpoint.
    #[must_use]
    pub fn csrf_url(&self) -> String {
        self.endpoint("/api/auth/csrf")
    }

    /// URL of the credentials callback endpoint.
    #[must_use]
    pub fn login_url(&self) -> String {
        self.endpoint("/api/auth/callback/credentials")
    }

    /// Full callback URL submitted with the login form.
    #[must_use]
    pub fn callback_url(&self) -> String {
        self.endpoint(&self.callback_path)
    }

    /// URL of a protected tRPC procedure.
    #[must_use]
    pub fn probe_url(&self, procedure: &str) -> String {
        self.endpoint(&format!("/api/trpc/{procedure}"))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

/// Reads `NEXTAUTH_URL`, treating an unset or blank variable as absent.
fn env_base_url() -> Option<String> {
    std::env::var(BASE_URL_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            value: value.to_string(),
            reason: format!("scheme must be http or https, got '{}'", url.scheme()),
        });
    }

    Ok(url)
}

/// Ensures a callback path starts with `/` so endpoint joining stays sane.
#[must_use]
pub fn normalize_callback_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
