//! `fsreg check` – open every path once and report.

use anyhow::{bail, Result};
use fsreg_core::config::RegistryConfig;
use fsreg_core::init::init;
use fsreg_core::{ContextManager, ContextProxy, Scope};
use std::io::Write;

/// Global paths are opened through the registry; context paths through a
/// single fresh context, the way a request would see them.
pub fn run_check(cfg: &RegistryConfig, out: &mut dyn Write) -> Result<()> {
    let mut manager = ContextManager::new();
    let registry = init(cfg, Some(&mut manager))?;
    let mut context = manager.new_context();
    let mut fallback = registry.context_proxy();

    let mut failed = 0usize;
    for path in registry.iter() {
        let result = match path.scope() {
            Scope::Global => registry.get(path.name()),
            Scope::Context => {
                let proxy = match cfg.ctx.member_name() {
                    Some(member) => context
                        .member_mut::<ContextProxy>(member)
                        .unwrap_or(&mut fallback),
                    None => &mut fallback,
                };
                proxy.get(path.name())
            }
        };
        match result {
            Ok(_) => writeln!(out, "ok      {} ({})", path.name(), path.scope())?,
            Err(e) => {
                failed += 1;
                tracing::warn!(name = path.name(), "path check failed: {e}");
                writeln!(out, "FAILED  {} ({}): {e}", path.name(), path.scope())?;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} path(s) failed to open");
    }
    Ok(())
}
