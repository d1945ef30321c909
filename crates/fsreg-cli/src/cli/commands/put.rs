//! `fsreg put <name> <file> <text>` – write a file.

use anyhow::{Context, Result};
use fsreg_core::config::RegistryConfig;
use std::io::Write;

use super::Session;

pub fn run_put(
    cfg: &RegistryConfig,
    name: &str,
    file: &str,
    text: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let mut session = Session::open(cfg)?;
    let fs = session.handle(name)?;
    fs.write_string(file, text)
        .with_context(|| format!("writing {name}:{file}"))?;
    tracing::info!(name, file, bytes = text.len(), "wrote file");
    writeln!(out, "Wrote {} bytes to {name}:{file}", text.len())?;
    Ok(())
}
