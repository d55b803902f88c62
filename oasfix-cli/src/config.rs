//! Configuration file loading for oasfix.
//!
//! Discovers and loads `oasfix.toml` from the working directory, or from an
//! explicit `--config` path. Merges config file settings with CLI arguments
//! (CLI takes precedence, config beats built-in defaults).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use oasfix_core::FixSettings;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "oasfix.toml";

/// Top-level configuration from oasfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OasfixConfig {
    pub fix: FixConfig,
}

/// `[fix]` section. Unset keys fall through to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FixConfig {
    /// Directory holding the documents.
    pub dir: Option<Utf8PathBuf>,

    /// File-name suffix selecting documents.
    pub ext: Option<String>,

    pub license_url: Option<String>,
    pub vendor_url: Option<String>,
}

/// Look for `oasfix.toml` directly inside `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<OasfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<OasfixConfig> {
    let config: OasfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the explicit config if given (it must exist), otherwise the one
/// discovered in `cwd`, otherwise defaults.
pub fn load_or_default(explicit: Option<&Utf8Path>, cwd: &Utf8Path) -> anyhow::Result<OasfixConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match discover_config(cwd) {
        Some(path) => load_config(&path),
        None => Ok(OasfixConfig::default()),
    }
}

/// Fix-related CLI values; `None` means the flag was not given.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dir: Option<Utf8PathBuf>,
    pub ext: Option<String>,
    pub license_url: Option<String>,
    pub vendor_url: Option<String>,
    pub dry_run: bool,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: OasfixConfig,
}

impl ConfigMerger {
    pub fn new(config: OasfixConfig) -> Self {
        Self { config }
    }

    pub fn merge_fix_args(self, cli: CliOverrides) -> FixSettings {
        let defaults = FixSettings::default();
        let fix = self.config.fix;

        FixSettings {
            dir: cli.dir.or(fix.dir).unwrap_or(defaults.dir),
            extension: cli.ext.or(fix.ext).unwrap_or(defaults.extension),
            license_url: cli
                .license_url
                .or(fix.license_url)
                .unwrap_or(defaults.license_url),
            vendor_url: cli
                .vendor_url
                .or(fix.vendor_url)
                .unwrap_or(defaults.vendor_url),
            dry_run: cli.dry_run,
        }
    }
}
