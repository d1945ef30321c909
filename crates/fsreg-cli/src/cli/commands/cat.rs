//! `fsreg cat <name> <file>` – print a file.

use anyhow::{Context, Result};
use fsreg_core::config::RegistryConfig;
use std::io::{self, Write};

use super::Session;

pub fn run_cat(cfg: &RegistryConfig, name: &str, file: &str, out: &mut dyn Write) -> Result<()> {
    let mut session = Session::open(cfg)?;
    let fs = session.handle(name)?;
    let mut reader = fs
        .open_read(file)
        .with_context(|| format!("opening {name}:{file}"))?;
    io::copy(&mut reader, out)?;
    Ok(())
}
