//! `fsreg paths` – list configured paths.

use anyhow::Result;
use fsreg_core::config::RegistryConfig;
use fsreg_core::init::init;
use fsreg_core::{ContextManager, PathDescriptor};
use std::io::Write;

pub fn run_paths(cfg: &RegistryConfig, json: bool, out: &mut dyn Write) -> Result<()> {
    let mut manager = ContextManager::new();
    let registry = init(cfg, Some(&mut manager))?;
    let paths: Vec<&PathDescriptor> = registry.iter().collect();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&paths)?)?;
    } else if paths.is_empty() {
        writeln!(out, "No paths configured.")?;
    } else {
        writeln!(out, "{:<16} {:<7} {}", "NAME", "SCOPE", "URL")?;
        for p in paths {
            writeln!(out, "{:<16} {:<7} {}", p.name(), p.scope(), p.url())?;
        }
    }
    Ok(())
}
