//! Create-project payload schema.

use jsonschema::{Draft, Validator};
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid create-project schema: {0}")]
pub struct SchemaError(String);

/// JSON Schema (draft 2020-12) every `POST /project` body must satisfy.
#[must_use]
pub fn create_project_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "additionalProperties": false,
        "required": ["name", "endpoints", "key"],
        "properties": {
            "name": {
                "type": "string",
                "pattern": "^[a-zA-Z0-9_-]{1,64}$"
            },
            "endpoints": {
                "type": "array",
                "minItems": 1,
                "uniqueItems": true,
                "items": { "type": "string", "minLength": 1 }
            },
            "key": { "type": "string", "minLength": 1 },
            "tag": { "type": "string" },
            "groups": {
                "type": "array",
                "items": { "type": "string" }
            }
        }
    })
}

/// Compiled validator for a payload schema.
pub struct SchemaValidator {
    validator: Validator,
}

impl SchemaValidator {
    /// Compile `schema` against draft 2020-12.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema itself is malformed.
    pub fn compile(schema: &Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(schema)
            .map_err(|err| SchemaError(err.to_string()))?;
        Ok(Self { validator })
    }

    /// Validator for [`create_project_schema`].
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in schema fails to compile.
    pub fn create_project() -> Result<Self, SchemaError> {
        Self::compile(&create_project_schema())
    }

    /// `true` when `data` satisfies the schema. Violations are logged at debug.
    #[must_use]
    pub fn validate_schema(&self, data: &Value) -> bool {
        let violations: Vec<String> = self
            .validator
            .iter_errors(data)
            .map(|err| err.to_string())
            .collect();
        if !violations.is_empty() {
            tracing::debug!(?violations, "payload rejected by schema");
        }
        violations.is_empty()
    }
}
