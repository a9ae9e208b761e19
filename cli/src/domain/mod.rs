//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod params;

pub use config::{DlabConfig, TerraformConfig, set_config_value, validate_config_key};
pub use error::{ConfigError, ParameterError, TerraformError};
pub use params::{
    ActionMask, ParamDescriptor, ParamKind, ParamValue, TERRAFORM_PARAMS, TF_PATH,
    TerraformAction, TerraformParams,
};
