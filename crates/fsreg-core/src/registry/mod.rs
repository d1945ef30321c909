//! Global-scope path registry.
//!
//! The registry owns every [`PathDescriptor`] and a read-through cache of
//! handles for global paths. It is built once during initialization, frozen
//! with [`Registry::finalize`], and then shared as `Arc<Registry>` by every
//! context for the lifetime of the process.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;

use crate::backend::{DefaultOpener, FsHandle, Opener};
use crate::context::ContextProxy;
use crate::error::RegistryError;
use crate::path::{IntoScope, PathDescriptor, Scope};

pub struct Registry {
    paths: IndexMap<String, PathDescriptor>,
    /// Handles of already-opened global paths.
    resolved: Mutex<HashMap<String, FsHandle>>,
    opener: Arc<dyn Opener>,
    finalized: bool,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("paths", &self.paths)
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Empty registry using the built-in [`DefaultOpener`].
    pub fn new() -> Self {
        Self::with_opener(Arc::new(DefaultOpener))
    }

    pub fn with_opener(opener: Arc<dyn Opener>) -> Self {
        Self {
            paths: IndexMap::new(),
            resolved: Mutex::new(HashMap::new()),
            opener,
            finalized: false,
        }
    }

    /// Registers a path. Only allowed before [`finalize`](Self::finalize).
    ///
    /// `scope` is a [`Scope`] or one of its string forms (`global`, `ctx`).
    pub fn register(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
        scope: impl IntoScope,
    ) -> Result<(), RegistryError> {
        if self.finalized {
            return Err(RegistryError::Finalized);
        }
        let scope = scope.into_scope()?;
        let descriptor = PathDescriptor::new(name, url, scope)?;
        if self.paths.contains_key(descriptor.name()) {
            return Err(RegistryError::Duplicate(descriptor.name().to_string()));
        }
        tracing::debug!(
            name = descriptor.name(),
            url = descriptor.url(),
            scope = %scope,
            "registered path"
        );
        self.paths.insert(descriptor.name().to_string(), descriptor);
        Ok(())
    }

    /// Rejects all further registrations.
    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Returns the shared handle of a global path, opening it on first use.
    ///
    /// Context-scoped paths are invisible here and report
    /// [`RegistryError::NotFound`], as do unknown names. The backend is opened
    /// at most once per name; every call returns the same `Arc`.
    pub fn get(&self, name: &str) -> Result<FsHandle, RegistryError> {
        let descriptor = self
            .paths
            .get(name)
            .filter(|d| d.scope() == Scope::Global)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        // Held across the open so concurrent first accesses open once.
        let mut resolved = self.resolved.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = resolved.get(name) {
            return Ok(Arc::clone(handle));
        }
        let handle = self.open(descriptor)?;
        resolved.insert(name.to_string(), Arc::clone(&handle));
        Ok(handle)
    }

    /// Opens a fresh, uncached handle for `descriptor`.
    pub(crate) fn open(&self, descriptor: &PathDescriptor) -> Result<FsHandle, RegistryError> {
        tracing::debug!(
            name = descriptor.name(),
            scope = %descriptor.scope(),
            "opening backend"
        );
        self.opener
            .open_fs(descriptor.url())
            .map_err(|source| RegistryError::Backend {
                name: descriptor.name().to_string(),
                source,
            })
    }

    /// Registered paths are read-only; this always fails.
    pub fn remove(&self, name: &str) -> Result<(), RegistryError> {
        if self.contains(name) {
            Err(RegistryError::ReadOnly(name.to_string()))
        } else {
            Err(RegistryError::NotFound(name.to_string()))
        }
    }

    /// True for every registered name, whatever its scope.
    pub fn contains(&self, name: &str) -> bool {
        self.paths.contains_key(name)
    }

    pub fn descriptor(&self, name: &str) -> Option<&PathDescriptor> {
        self.paths.get(name)
    }

    /// True once the global handle for `name` has been opened.
    pub fn is_resolved(&self, name: &str) -> bool {
        self.resolved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Values<'_, String, PathDescriptor> {
        self.paths.values()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Builds the per-context view of this registry.
    pub fn context_proxy(self: &Arc<Self>) -> ContextProxy {
        ContextProxy::new(Arc::clone(self))
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a PathDescriptor;
    type IntoIter = indexmap::map::Values<'a, String, PathDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
