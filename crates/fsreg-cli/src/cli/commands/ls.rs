//! `fsreg ls <name> [dir]` – list a directory; subdirectories end in `/`.

use anyhow::{Context, Result};
use fsreg_core::config::RegistryConfig;
use std::io::Write;

use super::{join, Session};

pub fn run_ls(
    cfg: &RegistryConfig,
    name: &str,
    dir: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let dir = dir.unwrap_or("");
    let mut session = Session::open(cfg)?;
    let fs = session.handle(name)?;
    let entries = fs
        .read_dir(dir)
        .with_context(|| format!("listing {name}:{dir}"))?;
    for entry in entries {
        if fs.is_dir(&join(dir, &entry))? {
            writeln!(out, "{entry}/")?;
        } else {
            writeln!(out, "{entry}")?;
        }
    }
    Ok(())
}
