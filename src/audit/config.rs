//! Report composition tunables.

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Tunables for report composition.
///
/// Every field has a default, so reports compose fine with no config file
/// at all; [`load`](AuditConfig::load) layers a file and environment
/// overrides on top.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Icon attached to "not ready" annotations.
    pub warning_icon: String,
    /// Run the default-highlight pass on every composed group.
    pub auto_feature: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            warning_icon: "warning".to_string(),
            auto_feature: true,
        }
    }
}

impl AuditConfig {
    /// Load from a config file, with `TOPOWATCH_`-prefixed environment
    /// variables taking precedence over file values.
    pub fn load(path: &Path) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("TOPOWATCH"))
            .build()?;
        Ok(cfg.try_deserialize()?)
    }
}
