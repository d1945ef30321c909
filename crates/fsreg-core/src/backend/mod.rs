//! Filesystem backend seam.
//!
//! The registry only ever talks to backends through two traits:
//! [`Opener`] turns a url into a handle, and [`Filesystem`] is what a handle
//! can do. [`DefaultOpener`] understands `mem://`, `osfs://`, `file://` and
//! plain local directory paths.

mod local;
mod memory;
mod opener;

use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;

pub use local::LocalFs;
pub use memory::MemoryFs;
pub use opener::{DefaultOpener, Opener};

use crate::error::FsError;

/// Shared handle to an opened filesystem. Identity is `Arc::ptr_eq`.
pub type FsHandle = Arc<dyn Filesystem>;

pub type FsResult<T> = Result<T, FsError>;

/// Operations every backend supports.
///
/// Paths are `/`-separated and relative to the backend's root; a leading `/`
/// is accepted and ignored.
pub trait Filesystem: Send + Sync + fmt::Debug {
    /// Opens an existing file for reading.
    fn open_read(&self, path: &str) -> FsResult<Box<dyn Read + Send>>;

    /// Creates or truncates a file for writing. The parent directory must exist.
    fn open_write(&self, path: &str) -> FsResult<Box<dyn Write + Send>>;

    fn exists(&self, path: &str) -> FsResult<bool>;

    fn is_file(&self, path: &str) -> FsResult<bool>;

    fn is_dir(&self, path: &str) -> FsResult<bool>;

    /// Creates a single directory; the parent must exist.
    fn create_dir(&self, path: &str) -> FsResult<()>;

    /// Names of the entries directly inside `path`, sorted.
    fn read_dir(&self, path: &str) -> FsResult<Vec<String>>;

    fn remove_file(&self, path: &str) -> FsResult<()>;

    fn read_to_string(&self, path: &str) -> FsResult<String> {
        let mut reader = self.open_read(path)?;
        let mut out = String::new();
        reader.read_to_string(&mut out)?;
        Ok(out)
    }

    fn write_string(&self, path: &str, contents: &str) -> FsResult<()> {
        let mut writer = self.open_write(path)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// Splits a backend path into its components, rejecting `..`.
pub(crate) fn components(path: &str) -> FsResult<Vec<&str>> {
    let mut parts = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => return Err(FsError::InvalidPath(path.to_string())),
            p => parts.push(p),
        }
    }
    Ok(parts)
}
