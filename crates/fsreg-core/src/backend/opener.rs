//! Opening backends from url strings.

use std::path::PathBuf;
use std::sync::Arc;

use super::{FsHandle, FsResult, LocalFs, MemoryFs};
use crate::error::FsError;
use crate::url_model::{is_url, SCHEME_SEPARATOR};

/// The single entry point the registry uses to create handles.
pub trait Opener: Send + Sync {
    /// Opens a new, independent handle for `url`.
    fn open_fs(&self, url: &str) -> FsResult<FsHandle>;
}

impl<F> Opener for F
where
    F: Fn(&str) -> FsResult<FsHandle> + Send + Sync,
{
    fn open_fs(&self, url: &str) -> FsResult<FsHandle> {
        self(url)
    }
}

/// Opener for the built-in backends.
///
/// - `mem://` → a fresh [`MemoryFs`]
/// - `osfs://<dir>` → [`LocalFs`] rooted at `<dir>` (a leading `~` expands to `$HOME`)
/// - `file:///<dir>` → [`LocalFs`], percent-decoded
/// - anything without `://` → [`LocalFs`] rooted at that directory
///
/// `create=1` (or `true`) in the query creates a missing local directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultOpener;

fn wants_create(query: &str) -> bool {
    url::form_urlencoded::parse(query.as_bytes())
        .any(|(k, v)| k == "create" && matches!(v.as_ref(), "1" | "true" | "yes"))
}

fn expand_home(location: &str) -> PathBuf {
    if let Some(rest) = location.strip_prefix('~') {
        if let Some(home) = std::env::var_os("HOME") {
            let mut path = PathBuf::from(home);
            let rest = rest.trim_start_matches('/');
            if !rest.is_empty() {
                path.push(rest);
            }
            return path;
        }
    }
    PathBuf::from(location)
}

fn open_local(root: PathBuf, create: bool) -> FsResult<FsHandle> {
    let fs = if create {
        LocalFs::create(root)?
    } else {
        LocalFs::open(root)?
    };
    Ok(Arc::new(fs))
}

impl Opener for DefaultOpener {
    fn open_fs(&self, raw: &str) -> FsResult<FsHandle> {
        if !is_url(raw) {
            tracing::debug!(path = raw, "opening local directory");
            return open_local(PathBuf::from(raw), false);
        }

        let (scheme, rest) = raw
            .split_once(SCHEME_SEPARATOR)
            .ok_or_else(|| FsError::UnsupportedProtocol(raw.to_string()))?;
        let (location, query) = rest.split_once('?').unwrap_or((rest, ""));
        let create = wants_create(query);

        match scheme.to_ascii_lowercase().as_str() {
            "mem" => {
                tracing::debug!(url = raw, "opening memory filesystem");
                Ok(Arc::new(MemoryFs::new()))
            }
            "osfs" => {
                tracing::debug!(url = raw, create, "opening osfs directory");
                open_local(expand_home(location), create)
            }
            "file" => {
                let root = url::Url::parse(raw)
                    .ok()
                    .and_then(|u| u.to_file_path().ok())
                    .ok_or_else(|| FsError::InvalidPath(raw.to_string()))?;
                tracing::debug!(url = raw, create, "opening file url");
                open_local(root, create)
            }
            _ => Err(FsError::UnsupportedProtocol(raw.to_string())),
        }
    }
}
