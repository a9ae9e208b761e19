//! Domain types and validators for dlab configuration.
//!
//! Pure functions only. No I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["terraform.workdir", "terraform.timeout_secs"];

/// Default per-command timeout. `apply` on a real stack can take a while.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.dlab/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DlabConfig {
    /// Terraform adapter settings.
    #[serde(default)]
    pub terraform: TerraformConfig,
}

/// Terraform adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TerraformConfig {
    /// Directory holding the Terraform configuration (`tf_path`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workdir: Option<String>,

    /// Per-command timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Option overrides, kept untyped until the command builder checks them.
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub options: Mapping,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            timeout_secs: default_timeout_secs(),
            options: Mapping::new(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let reason = match key {
        "terraform.timeout_secs" => match value.parse::<u64>() {
            Ok(0) | Err(_) => Some("Expected a positive number of seconds"),
            Ok(_) => None,
        },
        "terraform.workdir" if value.trim().is_empty() => Some("Expected a directory path"),
        _ => None,
    };
    if let Some(reason) = reason {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Apply a validated key/value pair to `config`.
///
/// # Errors
///
/// Returns an error if the key or value fails validation.
pub fn set_config_value(config: &mut DlabConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    match key {
        "terraform.workdir" => config.terraform.workdir = Some(value.to_string()),
        "terraform.timeout_secs" => config.terraform.timeout_secs = value.parse()?,
        _ => {}
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
