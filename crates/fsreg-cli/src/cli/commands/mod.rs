//! CLI command handlers. Each command is in its own file.

mod cat;
mod check;
mod ls;
mod paths;
mod put;

pub use cat::run_cat;
pub use check::run_check;
pub use ls::run_ls;
pub use paths::run_paths;
pub use put::run_put;

use anyhow::{Context as _, Result};
use fsreg_core::config::RegistryConfig;
use fsreg_core::init::init;
use fsreg_core::{Context, ContextManager, ContextProxy, FsHandle};

/// One invocation's view of the registry: a single context, so context
/// paths behave like they would within one request.
pub(crate) struct Session {
    context: Context,
    member: Option<String>,
    /// Used when `ctx.member = none` leaves the context without a proxy.
    fallback: ContextProxy,
}

impl Session {
    pub(crate) fn open(cfg: &RegistryConfig) -> Result<Self> {
        let mut manager = ContextManager::new();
        let registry = init(cfg, Some(&mut manager)).context("initializing path registry")?;
        Ok(Self {
            context: manager.new_context(),
            member: cfg.ctx.member_name().map(str::to_string),
            fallback: registry.context_proxy(),
        })
    }

    fn proxy(&mut self) -> &mut ContextProxy {
        match self.member.as_deref() {
            Some(member) => self
                .context
                .member_mut::<ContextProxy>(member)
                .unwrap_or(&mut self.fallback),
            None => &mut self.fallback,
        }
    }

    pub(crate) fn handle(&mut self, name: &str) -> Result<FsHandle> {
        self.proxy()
            .get(name)
            .with_context(|| format!("resolving path {name:?}"))
    }
}

/// Joins a directory and an entry name inside a backend.
pub(crate) fn join(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}
