//! Shared setup for integration tests.

use std::sync::Arc;

use fsreg_core::config::RegistryConfig;
use fsreg_core::init::init;
use fsreg_core::{ContextManager, Registry};

/// Initializes a registry from TOML with a context manager attached.
pub fn with_ctx(toml: &str) -> (Arc<Registry>, ContextManager) {
    let cfg = RegistryConfig::from_toml_str(toml).expect("valid toml");
    let mut mgr = ContextManager::new();
    let reg = init(&cfg, Some(&mut mgr)).expect("init");
    (reg, mgr)
}
