//! Session-cookie artifact and cookie-jar scanning.
//!
//! The jar scan goes through the [`CookieScan`] capability trait so the
//! extraction logic expresses *what* it is looking for (a predicate over
//! cookie names) without touching the HTTP client's internal jar
//! representation.

use std::fmt;
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use url::Url;

/// Substring identifying a NextAuth session-token cookie.
///
/// Matches both `next-auth.session-token` and the `__Secure-` prefixed
/// variant issued over HTTPS.
pub const SESSION_COOKIE_MARKER: &str = "session-token";

/// The session cookie produced by a successful login.
///
/// The value is redacted in Debug output to prevent accidental logging
/// of the session token.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Cookie name as issued by the server.
    pub name: String,
    /// Cookie value (sensitive - never log).
    value: String,
}

impl SessionCookie {
    /// Creates a session cookie from a `(name, value)` pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the cookie value.
    ///
    /// The value is the session token - avoid logging the return value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Renders the `name=value` line used for persistence and for
    /// replaying the cookie in a `Cookie` header.
    #[must_use]
    pub fn to_cookie_pair(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

// Custom Debug impl that redacts the cookie value.
impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookie")
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Read access to the cookies accumulated during a login run.
pub trait CookieScan {
    /// Returns the first cookie whose name satisfies `predicate`.
    fn find(&self, predicate: &dyn Fn(&str) -> bool) -> Option<SessionCookie>;
}

/// [`CookieScan`] over the reqwest jar shared with the login client.
pub struct JarScan {
    jar: Arc<Jar>,
    origin: Url,
}

impl JarScan {
    /// Creates a scan over `jar` for cookies visible to `origin`.
    #[must_use]
    pub fn new(jar: Arc<Jar>, origin: Url) -> Self {
        Self { jar, origin }
    }
}

impl CookieScan for JarScan {
    fn find(&self, predicate: &dyn Fn(&str) -> bool) -> Option<SessionCookie> {
        let header = self.jar.cookies(&self.origin)?;
        let rendered = header.to_str().ok()?;
        parse_cookie_header(rendered)
            .into_iter()
            .find(|(name, _)| predicate(name))
            .map(|(name, value)| SessionCookie::new(name, value))
    }
}

/// Splits a `Cookie` header rendering (`a=1; b=2`) into `(name, value)`
/// pairs. Values may themselves contain `=`; only the first one splits.
fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split("; ")
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}
