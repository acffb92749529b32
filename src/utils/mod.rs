//! Utility functions and helpers.

pub mod http;
pub mod retry;

use url::Url;

use crate::error::Result;

/// Join a relative endpoint path onto the service root.
///
/// The root is treated as a directory whether or not it ends with `/`.
pub fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let mut base = base_url.trim_end_matches('/').to_string();
    base.push('/');
    Ok(Url::parse(&base)?.join(path.trim_start_matches('/'))?)
}
