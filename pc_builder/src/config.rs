//! Application configuration: parsing and loading.
//!
//! A small TOML file describes where state is stored and how imports and
//! exports behave. Every field is optional:
//!
//! ```toml
//! database = "pc_builder.db"   # SQLite file holding catalog + build
//! currency = "USD"             # label printed after prices
//! strict_import = false        # fail imports on unknown categories
//! ```
//!
//! Entrypoints:
//! - Parse from a TOML string: [`load_config_str`]
//! - Parse from a file path: [`load_config_path`]

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::import::UnknownCategoryPolicy;

/// Default SQLite file name, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "pc_builder.db";
/// Default currency label.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    /// SQLite file holding the persisted catalog and build.
    pub database: PathBuf,
    /// Label printed after every price.
    pub currency: String,
    /// Reject imports containing an unknown category instead of defaulting it.
    pub strict_import: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            currency: DEFAULT_CURRENCY.to_string(),
            strict_import: false,
        }
    }
}

impl AppConfig {
    /// Import policy implied by `strict_import`.
    pub fn import_policy(&self) -> UnknownCategoryPolicy {
        if self.strict_import {
            UnknownCategoryPolicy::Error
        } else {
            UnknownCategoryPolicy::Default
        }
    }

    fn validate(&mut self) -> anyhow::Result<()> {
        self.currency = self.currency.trim().to_string();
        if self.currency.is_empty() {
            bail!("currency cannot be empty after trimming");
        }
        if self.database.as_os_str().is_empty() {
            bail!("database path cannot be empty");
        }
        Ok(())
    }
}

/// Parse and validate configuration from a TOML string.
///
/// Errors:
/// - TOML parse failures, including unknown keys
/// - Empty `currency` or `database`
pub fn load_config_str(toml_str: &str) -> anyhow::Result<AppConfig> {
    let mut cfg: AppConfig = toml::from_str(toml_str).context("failed to parse config TOML")?;
    cfg.validate().context("invalid config")?;
    Ok(cfg)
}

/// Read a TOML config file from disk and parse it.
///
/// See [`load_config_str`] for details.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}
