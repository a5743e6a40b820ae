//! Error types for the authentication sequence.
//!
//! The taxonomy separates fatal login failures ([`AuthError`]) from the
//! non-fatal diagnostic probe ([`ProbeError`]) and from persistence
//! ([`StorageError`]), so callers cannot accidentally treat a warning
//! as a reason to discard an already-obtained session cookie.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors in the login sequence. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Network-level failure at any step (DNS, connection refused, TLS).
    #[error("network error requesting {url}: {source}")]
    Transport {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The CSRF endpoint returned a non-success status or a payload
    /// without a usable `csrfToken` field.
    #[error("CSRF fetch from {url} failed: {reason}")]
    CsrfFetch {
        /// The CSRF endpoint URL.
        url: String,
        /// Description of what was wrong.
        reason: String,
    },

    /// The credentials callback answered with a status other than 200/302.
    /// The response body is kept verbatim for diagnostics.
    #[error("login rejected with HTTP {status}: {body}")]
    LoginRejected {
        /// The HTTP status code.
        status: u16,
        /// Server-provided response body.
        body: String,
    },

    /// The login status looked like a success but no session cookie
    /// materialized in the jar. Status codes alone never count as success.
    #[error("login response set no session cookie (no cookie name contains '{marker}')")]
    SessionCookieMissing {
        /// The substring the jar scan was looking for.
        marker: &'static str,
    },
}

impl AuthError {
    /// Classifies a failed request as timeout or transport error.
    pub fn from_request_error(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Transport { url, source }
        }
    }

    /// Creates a CSRF fetch error.
    pub fn csrf_fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CsrfFetch {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Failure of the optional protected-endpoint probe.
///
/// Reported as a warning by callers; never invalidates the session cookie.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Network-level failure reaching the protected endpoint.
    #[error("probe request to {url} failed: {source}")]
    Transport {
        /// The probe URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The protected endpoint rejected the session.
    #[error("probe endpoint {url} returned HTTP {status}")]
    Status {
        /// The probe URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
}

impl ProbeError {
    /// Creates a transport error for the probe request.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Creates a status error for the probe request.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }
}

/// Failure persisting the session cookie to disk.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File system error writing the cookie file.
    #[error("failed to write cookie file {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Creates an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// Note on From trait implementations:
// There is intentionally no `From<reqwest::Error>` or `From<std::io::Error>`:
// every variant carries context (url, path, marker) that the source errors
// do not provide, so conversion goes through the helper constructors.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_timeout_display() {
        let error = AuthError::Timeout {
            url: "http://localhost:3000/api/auth/csrf".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("timeout"), "got: {msg}");
        assert!(msg.contains("/api/auth/csrf"), "got: {msg}");
    }

    #[test]
    fn test_auth_error_csrf_fetch_display() {
        let error = AuthError::csrf_fetch("http://localhost:3000/api/auth/csrf", "HTTP 500");
        let msg = error.to_string();
        assert!(msg.contains("CSRF fetch"), "got: {msg}");
        assert!(msg.contains("HTTP 500"), "got: {msg}");
    }

    #[test]
    fn test_auth_error_login_rejected_keeps_body() {
        let error = AuthError::LoginRejected {
            status: 401,
            body: r#"{"error":"CredentialsSignin"}"#.to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("401"), "got: {msg}");
        assert!(msg.contains("CredentialsSignin"), "got: {msg}");
    }

    #[test]
    fn test_auth_error_session_cookie_missing_names_marker() {
        let error = AuthError::SessionCookieMissing {
            marker: "session-token",
        };
        let msg = error.to_string();
        assert!(msg.contains("session-token"), "got: {msg}");
        assert!(msg.contains("no session cookie"), "got: {msg}");
    }

    #[test]
    fn test_probe_error_status_display() {
        let error = ProbeError::status("http://localhost:3000/api/trpc/x", 403);
        let msg = error.to_string();
        assert!(msg.contains("403"), "got: {msg}");
        assert!(msg.contains("/api/trpc/x"), "got: {msg}");
    }

    #[test]
    fn test_storage_error_io_display_contains_path() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = StorageError::io(PathBuf::from("/tmp/auth-cookie.txt"), io_error);
        let msg = error.to_string();
        assert!(msg.contains("/tmp/auth-cookie.txt"), "got: {msg}");
    }
}
