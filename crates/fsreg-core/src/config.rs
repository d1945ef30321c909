use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the context member that exposes the registry.
pub const DEFAULT_CTX_MEMBER: &str = "fs";

/// Prefix of flat configuration keys that declare paths.
pub const PATH_KEY_PREFIX: &str = "path.";

/// Flat configuration key naming the context member.
pub const CTX_MEMBER_KEY: &str = "ctx.member";

fn default_member() -> String {
    DEFAULT_CTX_MEMBER.to_string()
}

/// `[ctx]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtxConfig {
    /// Context member name; `none` (any case) disables registration.
    #[serde(default = "default_member")]
    pub member: String,
}

impl Default for CtxConfig {
    fn default() -> Self {
        Self {
            member: default_member(),
        }
    }
}

impl CtxConfig {
    /// The member name to register, or `None` when disabled.
    pub fn member_name(&self) -> Option<&str> {
        if self.member.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(&self.member)
        }
    }
}

/// Registry configuration loaded from `~/.config/fsreg/config.toml`.
///
/// ```toml
/// [ctx]
/// member = "fs"
///
/// [path]
/// foo = "mem://"
/// scratch = "mem://?scope=ctx"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub ctx: CtxConfig,
    /// Path name to backend url, in declaration order.
    #[serde(default)]
    pub path: IndexMap<String, String>,
}

impl RegistryConfig {
    /// Builds a config from flat `ctx.member` / `path.<name>` pairs.
    /// Other keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut cfg = Self::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            if key == CTX_MEMBER_KEY {
                cfg.ctx.member = value.into();
            } else if let Some(name) = key.strip_prefix(PATH_KEY_PREFIX) {
                cfg.path.insert(name.to_string(), value.into());
            } else {
                tracing::trace!(key, "ignoring unknown configuration key");
            }
        }
        cfg
    }

    pub fn from_toml_str(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fsreg")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<RegistryConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    RegistryConfig::from_toml_str(&data)
        .with_context(|| format!("parsing config {}", path.display()))
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RegistryConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RegistryConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}
