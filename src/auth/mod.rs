//! Authentication sequence and session-cookie handling.
//!
//! This module owns the three-step login flow (CSRF fetch, credentials
//! POST, jar scan), the session-cookie artifact it produces, and the
//! optional persistence of that artifact to disk.

mod client;
mod error;
mod probe;
mod session;
mod storage;

pub use client::build_login_client;
pub use error::{AuthError, ProbeError, StorageError};
pub use probe::AuthProbe;
pub use session::{CookieScan, JarScan, SESSION_COOKIE_MARKER, SessionCookie};
pub use storage::persist_session_cookie;
