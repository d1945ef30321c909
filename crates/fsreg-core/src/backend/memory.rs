//! In-memory filesystem. Contents live as long as the handle does.

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{components, Filesystem, FsResult};
use crate::error::FsError;

type FileData = Arc<Mutex<Vec<u8>>>;

#[derive(Debug)]
enum Node {
    Dir,
    File(FileData),
}

/// Thread-safe in-memory tree, keyed by normalised path (`a/b/c`).
/// The root directory is implicit.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: Mutex<BTreeMap<String, Node>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn nodes(&self) -> MutexGuard<'_, BTreeMap<String, Node>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns `(key, parent_key)` for a path; the root has key `""`.
fn split_key(path: &str) -> FsResult<(String, String)> {
    let parts = components(path)?;
    let key = parts.join("/");
    let parent = match parts.split_last() {
        Some((_, rest)) => rest.join("/"),
        None => String::new(),
    };
    Ok((key, parent))
}

fn parent_is_dir(nodes: &BTreeMap<String, Node>, parent: &str) -> FsResult<()> {
    if parent.is_empty() {
        return Ok(());
    }
    match nodes.get(parent) {
        Some(Node::Dir) => Ok(()),
        Some(Node::File(_)) => Err(FsError::DirectoryExpected(parent.to_string())),
        None => Err(FsError::ResourceNotFound(parent.to_string())),
    }
}

struct MemoryWriter {
    data: FileData,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Filesystem for MemoryFs {
    fn open_read(&self, path: &str) -> FsResult<Box<dyn Read + Send>> {
        let (key, _) = split_key(path)?;
        if key.is_empty() {
            return Err(FsError::FileExpected(path.to_string()));
        }
        match self.nodes().get(&key) {
            Some(Node::File(data)) => {
                let bytes = data.lock().unwrap_or_else(PoisonError::into_inner).clone();
                Ok(Box::new(Cursor::new(bytes)))
            }
            Some(Node::Dir) => Err(FsError::FileExpected(path.to_string())),
            None => Err(FsError::ResourceNotFound(path.to_string())),
        }
    }

    fn open_write(&self, path: &str) -> FsResult<Box<dyn Write + Send>> {
        let (key, parent) = split_key(path)?;
        if key.is_empty() {
            return Err(FsError::FileExpected(path.to_string()));
        }
        let mut nodes = self.nodes();
        parent_is_dir(&nodes, &parent)?;
        if let Some(Node::Dir) = nodes.get(&key) {
            return Err(FsError::FileExpected(path.to_string()));
        }
        let data: FileData = Arc::default();
        nodes.insert(key, Node::File(Arc::clone(&data)));
        Ok(Box::new(MemoryWriter { data }))
    }

    fn exists(&self, path: &str) -> FsResult<bool> {
        let (key, _) = split_key(path)?;
        Ok(key.is_empty() || self.nodes().contains_key(&key))
    }

    fn is_file(&self, path: &str) -> FsResult<bool> {
        let (key, _) = split_key(path)?;
        Ok(matches!(self.nodes().get(&key), Some(Node::File(_))))
    }

    fn is_dir(&self, path: &str) -> FsResult<bool> {
        let (key, _) = split_key(path)?;
        Ok(key.is_empty() || matches!(self.nodes().get(&key), Some(Node::Dir)))
    }

    fn create_dir(&self, path: &str) -> FsResult<()> {
        let (key, parent) = split_key(path)?;
        if key.is_empty() {
            return Ok(());
        }
        let mut nodes = self.nodes();
        parent_is_dir(&nodes, &parent)?;
        match nodes.get(&key) {
            Some(Node::Dir) => Ok(()),
            Some(Node::File(_)) => Err(FsError::DirectoryExpected(path.to_string())),
            None => {
                nodes.insert(key, Node::Dir);
                Ok(())
            }
        }
    }

    fn read_dir(&self, path: &str) -> FsResult<Vec<String>> {
        let (key, _) = split_key(path)?;
        let nodes = self.nodes();
        if !key.is_empty() {
            match nodes.get(&key) {
                Some(Node::Dir) => {}
                Some(Node::File(_)) => return Err(FsError::DirectoryExpected(path.to_string())),
                None => return Err(FsError::ResourceNotFound(path.to_string())),
            }
        }
        let prefix = if key.is_empty() {
            String::new()
        } else {
            format!("{key}/")
        };
        Ok(nodes
            .keys()
            .filter_map(|k| k.strip_prefix(prefix.as_str()))
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
            .map(str::to_string)
            .collect())
    }

    fn remove_file(&self, path: &str) -> FsResult<()> {
        let (key, _) = split_key(path)?;
        let mut nodes = self.nodes();
        match nodes.get(&key) {
            Some(Node::File(_)) => {
                nodes.remove(&key);
                Ok(())
            }
            Some(Node::Dir) => Err(FsError::FileExpected(path.to_string())),
            None => Err(FsError::ResourceNotFound(path.to_string())),
        }
    }
}
