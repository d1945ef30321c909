//! Per-context view of a [`Registry`].
//!
//! A `ContextProxy` is created for every request/session context. Global
//! paths are forwarded to the registry, so all contexts share one handle.
//! Context paths are opened on first access and cached on the proxy itself;
//! they are dropped together with the proxy, and no two proxies ever share
//! one.

use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::FsHandle;
use crate::error::RegistryError;
use crate::path::Scope;
use crate::registry::Registry;

#[derive(Debug)]
pub struct ContextProxy {
    registry: Arc<Registry>,
    resolved: HashMap<String, FsHandle>,
}

impl ContextProxy {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            resolved: HashMap::new(),
        }
    }

    /// Returns the handle for `name` as seen from this context.
    pub fn get(&mut self, name: &str) -> Result<FsHandle, RegistryError> {
        let descriptor = self
            .registry
            .descriptor(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        match descriptor.scope() {
            Scope::Global => self.registry.get(name),
            Scope::Context => {
                if let Some(handle) = self.resolved.get(name) {
                    return Ok(Arc::clone(handle));
                }
                let handle = self.registry.open(descriptor)?;
                self.resolved.insert(name.to_string(), Arc::clone(&handle));
                Ok(handle)
            }
        }
    }

    /// True for every name known to the registry.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}
