//! The authentication sequence: CSRF fetch, credentials login, and
//! session-cookie extraction, plus the optional protected-endpoint probe.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::config::ProbeConfig;

use super::client::build_login_client;
use super::error::{AuthError, ProbeError};
use super::session::{CookieScan, JarScan, SESSION_COOKIE_MARKER, SessionCookie};

/// Response body of `GET /api/auth/csrf`.
#[derive(Debug, Deserialize)]
struct CsrfResponse {
    #[serde(rename = "csrfToken", default)]
    csrf_token: String,
}

/// Orchestrates one login run against a single base URL.
///
/// Owns the cookie jar for the duration of the run; the jar is mutated
/// only by the HTTP client as responses arrive.
pub struct AuthProbe {
    config: ProbeConfig,
    client: Client,
    jar: Arc<Jar>,
}

impl AuthProbe {
    /// Creates a probe with a fresh cookie jar for one run.
    ///
    /// # Errors
    ///
    /// Returns the builder error when HTTP client construction fails.
    pub fn new(config: ProbeConfig) -> Result<Self, reqwest::Error> {
        let jar = Arc::new(Jar::default());
        let client = build_login_client(Arc::clone(&jar), config.timeout)?;
        Ok(Self {
            config,
            client,
            jar,
        })
    }

    /// Returns the configuration this probe was built with.
    #[must_use]
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Runs the login sequence and extracts the session cookie.
    ///
    /// Three strictly sequential steps, no retries:
    /// 1. fetch the CSRF token,
    /// 2. POST the credentials form (redirects not followed; 200 and 302
    ///    are the accepted statuses),
    /// 3. scan the jar for a cookie whose name contains
    ///    [`SESSION_COOKIE_MARKER`].
    ///
    /// A 200/302 login with no session cookie in the jar afterwards is a
    /// failure: cookie presence is the success signal, not the status.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when any step fails; see the variants for the
    /// step-by-step taxonomy.
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    pub async fn authenticate(&self) -> Result<SessionCookie, AuthError> {
        let csrf_token = self.fetch_csrf_token().await?;
        debug!("CSRF token obtained");

        self.submit_credentials(&csrf_token).await?;

        let scan = JarScan::new(Arc::clone(&self.jar), self.config.base_url.clone());
        let cookie = scan
            .find(&|name: &str| name.contains(SESSION_COOKIE_MARKER))
            .ok_or(AuthError::SessionCookieMissing {
                marker: SESSION_COOKIE_MARKER,
            })?;

        info!(cookie = %cookie.name, "session cookie obtained");
        Ok(cookie)
    }

    /// Step 1: fetch the anti-forgery token echoed back in the login form.
    async fn fetch_csrf_token(&self) -> Result<String, AuthError> {
        let url = self.config.csrf_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AuthError::from_request_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::csrf_fetch(&url, format!("HTTP {status}")));
        }

        let payload: CsrfResponse = response
            .json()
            .await
            .map_err(|e| AuthError::csrf_fetch(&url, format!("invalid JSON payload: {e}")))?;

        if payload.csrf_token.is_empty() {
            return Err(AuthError::csrf_fetch(&url, "missing or empty csrfToken field"));
        }

        Ok(payload.csrf_token)
    }

    /// Step 2: POST the URL-form-encoded credentials to the callback.
    async fn submit_credentials(&self, csrf_token: &str) -> Result<(), AuthError> {
        let url = self.config.login_url();
        let callback_url = self.config.callback_url();
        let form = [
            ("email", self.config.email.as_str()),
            ("password", self.config.password.as_str()),
            ("csrfToken", csrf_token),
            ("callbackUrl", callback_url.as_str()),
            ("json", "true"),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::from_request_error(&url, e))?;

        let status = response.status();
        if !login_status_accepted(status) {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::LoginRejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = %status, "login response accepted");
        Ok(())
    }

    /// Issues one diagnostic request to a protected tRPC procedure.
    ///
    /// Runs only after a successful login and rides the accumulated jar,
    /// demonstrating that the captured cookie grants access. Failures here
    /// are the caller's to report as warnings, never as a reason to
    /// discard the session cookie.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn probe_protected(&self, procedure: &str) -> Result<(), ProbeError> {
        let url = self.config.probe_url(procedure);
        let body = serde_json::json!({ "input": { "limit": 10, "offset": 0 } });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProbeError::transport(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::status(&url, status.as_u16()));
        }

        debug!(status = %status, procedure, "protected probe succeeded");
        Ok(())
    }
}

/// 200 and 302 are the statuses the credentials callback answers with on
/// an accepted login; everything else is a rejection.
fn login_status_accepted(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 302)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_status_accepted_200_and_302_only() {
        assert!(login_status_accepted(StatusCode::OK));
        assert!(login_status_accepted(StatusCode::FOUND));
        assert!(!login_status_accepted(StatusCode::UNAUTHORIZED));
        assert!(!login_status_accepted(StatusCode::SEE_OTHER));
        assert!(!login_status_accepted(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_csrf_response_parses_token_field() {
        let payload: CsrfResponse =
            serde_json::from_str(r#"{"csrfToken": "abc123"}"#).unwrap();
        assert_eq!(payload.csrf_token, "abc123");
    }

    #[test]
    fn test_csrf_response_missing_field_is_empty() {
        // `default` keeps the parse from failing; the caller rejects the
        // empty token with a CsrfFetch error.
        let payload: CsrfResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.csrf_token.is_empty());
    }
}
