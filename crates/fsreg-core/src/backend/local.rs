//! Local directory backend.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use super::{components, Filesystem, FsResult};
use crate::error::FsError;

/// Filesystem rooted at a local directory. Paths cannot escape the root.
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

fn map_io(err: io::Error, path: &str) -> FsError {
    if err.kind() == io::ErrorKind::NotFound {
        FsError::ResourceNotFound(path.to_string())
    } else {
        FsError::Io(err)
    }
}

impl LocalFs {
    /// Opens an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> FsResult<Self> {
        let root = root.into();
        let meta = fs::metadata(&root).map_err(|e| map_io(e, &root.display().to_string()))?;
        if !meta.is_dir() {
            return Err(FsError::DirectoryExpected(root.display().to_string()));
        }
        Ok(Self { root })
    }

    /// Opens a directory, creating it (and its parents) first if needed.
    pub fn create(root: impl Into<PathBuf>) -> FsResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Self::open(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> FsResult<PathBuf> {
        let mut full = self.root.clone();
        for part in components(path)? {
            full.push(part);
        }
        Ok(full)
    }
}

impl Filesystem for LocalFs {
    fn open_read(&self, path: &str) -> FsResult<Box<dyn Read + Send>> {
        let full = self.resolve(path)?;
        if full.is_dir() {
            return Err(FsError::FileExpected(path.to_string()));
        }
        let file = fs::File::open(&full).map_err(|e| map_io(e, path))?;
        Ok(Box::new(file))
    }

    fn open_write(&self, path: &str) -> FsResult<Box<dyn Write + Send>> {
        let full = self.resolve(path)?;
        if full.is_dir() {
            return Err(FsError::FileExpected(path.to_string()));
        }
        let file = fs::File::create(&full).map_err(|e| map_io(e, path))?;
        Ok(Box::new(file))
    }

    fn exists(&self, path: &str) -> FsResult<bool> {
        Ok(self.resolve(path)?.exists())
    }

    fn is_file(&self, path: &str) -> FsResult<bool> {
        Ok(self.resolve(path)?.is_file())
    }

    fn is_dir(&self, path: &str) -> FsResult<bool> {
        Ok(self.resolve(path)?.is_dir())
    }

    fn create_dir(&self, path: &str) -> FsResult<()> {
        let full = self.resolve(path)?;
        match fs::create_dir(&full) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && full.is_dir() => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(FsError::DirectoryExpected(path.to_string()))
            }
            Err(e) => Err(map_io(e, path)),
        }
    }

    fn read_dir(&self, path: &str) -> FsResult<Vec<String>> {
        let full = self.resolve(path)?;
        if full.is_file() {
            return Err(FsError::DirectoryExpected(path.to_string()));
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&full).map_err(|e| map_io(e, path))? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn remove_file(&self, path: &str) -> FsResult<()> {
        let full = self.resolve(path)?;
        if full.is_dir() {
            return Err(FsError::FileExpected(path.to_string()));
        }
        fs::remove_file(&full).map_err(|e| map_io(e, path))
    }
}
