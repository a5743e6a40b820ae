//! Session-cookie persistence.
//!
//! One artifact: a single `name=value` line, overwriting any previous
//! content at the path. The file is only written on explicit request
//! (`--save`); a write failure never invalidates the in-memory cookie.

use std::path::Path;

use tracing::info;

use super::error::StorageError;
use super::session::SessionCookie;

/// Writes the cookie to `path` as `name=value`, replacing existing content.
///
/// # Errors
///
/// Returns [`StorageError::Io`] when the path is not writable.
pub fn persist_session_cookie(
    cookie: &SessionCookie,
    path: &Path,
) -> Result<(), StorageError> {
    std::fs::write(path, cookie.to_cookie_pair())
        .map_err(|source| StorageError::io(path, source))?;
    info!(path = %path.display(), cookie = %cookie.name, "session cookie written");
    Ok(())
}
