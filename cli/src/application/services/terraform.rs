//! Application service: drive the `terraform` binary.
//!
//! `Terraform<E>` owns a validated option set and renders it into command
//! lines for each action. Process execution and working-directory scoping
//! are delegated to the injected `CommandExecutor`.

use std::path::Path;

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};

use crate::application::ports::CommandExecutor;
use crate::domain::error::{ParameterError, TerraformError};
use crate::domain::params::{
    TF_PATH, TerraformAction, TerraformParams, is_known_key, resolve_str,
};

/// Printed by `terraform init` on success.
pub const TF_INIT_SUCCESS_MSG: &str = "Terraform has been successfully initialized!";

/// Printed by `terraform validate` on success.
pub const TF_VALIDATE_SUCCESS_MSG: &str = "Success!";

/// Pass `output` through if it contains `check_phrase`.
///
/// # Errors
///
/// Returns [`TerraformError::Provisioning`] naming `command` otherwise.
pub fn validate_result(
    output: String,
    check_phrase: &str,
    command: &str,
) -> Result<String, TerraformError> {
    if output.contains(check_phrase) {
        Ok(output)
    } else {
        Err(TerraformError::Provisioning {
            command: command.to_string(),
        })
    }
}

/// Terraform command builder bound to one executor and one option set.
pub struct Terraform<E: CommandExecutor> {
    executor: E,
    params: TerraformParams,
    tf_path: String,
}

impl<E: CommandExecutor> Terraform<E> {
    /// Validate `overrides` and build the adapter.
    ///
    /// Absent or `null` keys take their defaults; unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidParameterType`] if an override's type
    /// does not match its declared type, or [`ParameterError::UnsafeValue`]
    /// if a path or variable cannot be rendered for the shell.
    pub fn new(executor: E, overrides: &Mapping) -> Result<Self, ParameterError> {
        for key in overrides.keys().filter_map(Value::as_str) {
            if !is_known_key(key) {
                tracing::debug!(key, "ignoring unknown terraform option");
            }
        }
        let params = TerraformParams::from_overrides(overrides)?;
        let tf_path = resolve_str(overrides, TF_PATH)?;
        Ok(Self {
            executor,
            params,
            tf_path,
        })
    }

    #[must_use]
    pub fn executor(&self) -> &E {
        &self.executor
    }

    #[must_use]
    pub fn params(&self) -> &TerraformParams {
        &self.params
    }

    /// Working directory passed to Terraform; empty when unset.
    #[must_use]
    pub fn tf_path(&self) -> &str {
        &self.tf_path
    }

    /// Flags for `action` followed by the working directory, space-joined.
    #[must_use]
    pub fn options(&self, action: TerraformAction) -> String {
        let mut args = self.params.flags(action.mask());
        if !self.tf_path.is_empty() {
            args.push(self.tf_path.clone());
        }
        args.join(" ")
    }

    /// Full command line for `action`.
    ///
    /// `init` and `validate` never take flags.
    #[must_use]
    pub fn command(&self, action: TerraformAction) -> String {
        match action {
            TerraformAction::Init | TerraformAction::Validate => action.command(),
            TerraformAction::Apply | TerraformAction::Destroy | TerraformAction::Output => {
                let options = self.options(action);
                if options.is_empty() {
                    action.command()
                } else {
                    format!("{} {options}", action.command())
                }
            }
        }
    }

    /// Run `terraform init`.
    ///
    /// # Errors
    ///
    /// Returns [`TerraformError::Provisioning`] if the output lacks the
    /// initialization success message, or the executor's error.
    pub async fn initialize(&self) -> Result<String> {
        let command = self.command(TerraformAction::Init);
        let output = self.execute(&command).await?;
        Ok(validate_result(output, TF_INIT_SUCCESS_MSG, &command)?)
    }

    /// Run `terraform validate`.
    ///
    /// # Errors
    ///
    /// Returns [`TerraformError::Provisioning`] if the output lacks
    /// `Success!`, or the executor's error.
    pub async fn validate(&self) -> Result<String> {
        let command = self.command(TerraformAction::Validate);
        let output = self.execute(&command).await?;
        Ok(validate_result(output, TF_VALIDATE_SUCCESS_MSG, &command)?)
    }

    /// Run `terraform apply` and return its raw output.
    ///
    /// The output is not checked for success; callers must inspect it.
    ///
    /// # Errors
    ///
    /// Returns the executor's error.
    pub async fn apply(&self) -> Result<String> {
        self.execute(&self.command(TerraformAction::Apply)).await
    }

    /// Run `terraform destroy` and return its raw output.
    ///
    /// The output is not checked for success; callers must inspect it.
    ///
    /// # Errors
    ///
    /// Returns the executor's error.
    pub async fn destroy(&self) -> Result<String> {
        self.execute(&self.command(TerraformAction::Destroy)).await
    }

    /// Run `terraform output` inside the working directory and parse it.
    ///
    /// # Errors
    ///
    /// Returns the executor's error, or [`TerraformError::OutputParse`] if
    /// the output is not valid JSON.
    pub async fn output(&self) -> Result<serde_json::Value> {
        let command = self.command(TerraformAction::Output);
        let raw = {
            let _cwd = self.executor.cd(Path::new(&self.tf_path))?;
            self.execute(&command).await?
        };
        let value = serde_json::from_str(&raw).map_err(TerraformError::from)?;
        Ok(value)
    }

    async fn execute(&self, command: &str) -> Result<String> {
        tracing::debug!(command, "running terraform");
        let output = self
            .executor
            .run(command)
            .await
            .with_context(|| format!("{command} failed"))?;
        tracing::info!(command, bytes = output.len(), "terraform finished");
        Ok(output)
    }
}
