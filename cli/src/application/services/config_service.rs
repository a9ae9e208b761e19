//! Application service: configuration use-cases.

use anyhow::Result;
use serde_yaml::Mapping;

use crate::application::ports::ConfigStore;
use crate::domain::config::{DlabConfig, set_config_value};
use crate::domain::params::TerraformOptions;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<DlabConfig> {
    store.load()
}

/// Validate and persist a single setting, returning the updated config.
pub fn update_config(store: &impl ConfigStore, key: &str, value: &str) -> Result<DlabConfig> {
    let mut config = store.load()?;
    set_config_value(&mut config, key, value)?;
    store.save(&config)?;
    Ok(config)
}

/// Terraform overrides for one invocation: the config file's `options`,
/// then its `workdir`, then typed command-line overrides on top.
#[must_use]
pub fn terraform_overrides(config: &DlabConfig, cli: &TerraformOptions) -> Mapping {
    let mut overrides = config.terraform.options.clone();
    if let Some(workdir) = &config.terraform.workdir {
        overrides.insert(
            crate::domain::params::TF_PATH.into(),
            workdir.as_str().into(),
        );
    }
    cli.merge_into(&mut overrides);
    overrides
}
