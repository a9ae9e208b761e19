//! Terraform option descriptors and the validated parameter set.
//!
//! Pure functions only. No I/O, no async, no process execution.
//!
//! Every recognised option is described once in [`TERRAFORM_PARAMS`]: its
//! expected kind, default, the actions it applies to, and how it renders as
//! a command-line flag. Caller overrides arrive as an untyped YAML mapping
//! and are checked against the declared kind when the set is built.

use std::fmt;
use std::ops::BitOr;

use serde_yaml::{Mapping, Value};

use crate::domain::error::ParameterError;

/// Override key for the Terraform working directory.
pub const TF_PATH: &str = "tf_path";

/// Name of the `-var` mapping option.
pub const VARIABLES: &str = "variables";

// ── Action mask ──────────────────────────────────────────────────────────────

/// Bitmask of the Terraform actions an option participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionMask(u8);

impl ActionMask {
    pub const NONE: Self = Self(0);
    pub const APPLY: Self = Self(1);
    pub const DESTROY: Self = Self(2);
    pub const OUTPUT: Self = Self(4);

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if any bit of `action` is set in `self`.
    #[must_use]
    pub const fn includes(self, action: Self) -> bool {
        self.0 & action.0 != 0
    }
}

impl BitOr for ActionMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

// ── Actions ──────────────────────────────────────────────────────────────────

/// Terraform subcommands driven by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerraformAction {
    Init,
    Validate,
    Apply,
    Destroy,
    Output,
}

impl TerraformAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Validate => "validate",
            Self::Apply => "apply",
            Self::Destroy => "destroy",
            Self::Output => "output",
        }
    }

    /// Mask used to select flags. `init` and `validate` take no flags.
    #[must_use]
    pub const fn mask(self) -> ActionMask {
        match self {
            Self::Init | Self::Validate => ActionMask::NONE,
            Self::Apply => ActionMask::APPLY,
            Self::Destroy => ActionMask::DESTROY,
            Self::Output => ActionMask::OUTPUT,
        }
    }

    /// The bare command, e.g. `terraform apply`.
    #[must_use]
    pub fn command(self) -> String {
        format!("terraform {}", self.as_str())
    }
}

impl fmt::Display for TerraformAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Values ───────────────────────────────────────────────────────────────────

/// Declared type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Str,
    Map,
}

impl ParamKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Str => "string",
            Self::Map => "mapping",
        }
    }
}

/// A validated option value.
///
/// `Map` keeps insertion order so `-var` flags render deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Bool(bool),
    Str(String),
    Map(Vec<(String, String)>),
}

impl ParamValue {
    /// `true`, a non-empty string, or a non-empty map.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Str(s) => !s.is_empty(),
            Self::Map(m) => !m.is_empty(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&[(String, String)]> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

// ── Descriptors ──────────────────────────────────────────────────────────────

/// Declarative description of one recognised Terraform option.
pub struct ParamDescriptor {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: ParamValue,
    pub actions: ActionMask,
    /// Renders a truthy value as its flag string.
    pub render: fn(&ParamValue) -> String,
}

impl fmt::Debug for ParamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

fn render_no_color(_: &ParamValue) -> String {
    "-no-color".to_string()
}

fn render_auto_approve(_: &ParamValue) -> String {
    "-auto-approve".to_string()
}

fn render_json(_: &ParamValue) -> String {
    "-json".to_string()
}

fn render_state(value: &ParamValue) -> String {
    format!("-state={}", value.as_str().unwrap_or_default())
}

fn render_variables(value: &ParamValue) -> String {
    value
        .as_map()
        .unwrap_or_default()
        .iter()
        .map(|(k, v)| format!("-var '{k}={v}'"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// All recognised options, in flag-rendering order.
pub static TERRAFORM_PARAMS: [ParamDescriptor; 5] = [
    ParamDescriptor {
        name: "no_color",
        kind: ParamKind::Bool,
        default: ParamValue::Bool(true),
        actions: ActionMask::APPLY.union(ActionMask::DESTROY),
        render: render_no_color,
    },
    ParamDescriptor {
        name: "auto_approve",
        kind: ParamKind::Bool,
        default: ParamValue::Bool(true),
        actions: ActionMask::APPLY.union(ActionMask::DESTROY),
        render: render_auto_approve,
    },
    ParamDescriptor {
        name: "json_view",
        kind: ParamKind::Bool,
        default: ParamValue::Bool(true),
        actions: ActionMask::OUTPUT,
        render: render_json,
    },
    ParamDescriptor {
        name: "state",
        kind: ParamKind::Str,
        default: ParamValue::Str(String::new()),
        actions: ActionMask::APPLY
            .union(ActionMask::DESTROY)
            .union(ActionMask::OUTPUT),
        render: render_state,
    },
    ParamDescriptor {
        name: VARIABLES,
        kind: ParamKind::Map,
        default: ParamValue::Map(Vec::new()),
        actions: ActionMask::APPLY.union(ActionMask::DESTROY),
        render: render_variables,
    },
];

/// Returns `true` if `key` names a descriptor or the working-directory option.
#[must_use]
pub fn is_known_key(key: &str) -> bool {
    key == TF_PATH || TERRAFORM_PARAMS.iter().any(|d| d.name == key)
}

// ── Validation ───────────────────────────────────────────────────────────────

/// YAML type name of an untyped value, used in error messages.
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

fn describe(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}

fn mismatch(value: &Value, expected: &'static str) -> ParameterError {
    ParameterError::InvalidParameterType {
        value: describe(value),
        actual: type_name(value),
        expected,
    }
}

fn scalar_to_string(value: &Value) -> Result<String, ParameterError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(mismatch(other, ParamKind::Str.name())),
    }
}

/// Check an untyped value against `kind`.
///
/// # Errors
///
/// Returns [`ParameterError::InvalidParameterType`] when the runtime type
/// does not match the declared kind.
pub fn coerce(kind: ParamKind, value: &Value) -> Result<ParamValue, ParameterError> {
    match (kind, value) {
        (ParamKind::Bool, Value::Bool(b)) => Ok(ParamValue::Bool(*b)),
        (ParamKind::Str, Value::String(s)) => Ok(ParamValue::Str(s.clone())),
        (ParamKind::Map, Value::Mapping(m)) => {
            let pairs = m
                .iter()
                .map(|(k, v)| Ok((scalar_to_string(k)?, scalar_to_string(v)?)))
                .collect::<Result<Vec<_>, ParameterError>>()?;
            Ok(ParamValue::Map(pairs))
        }
        (kind, other) => Err(mismatch(other, kind.name())),
    }
}

/// Resolve one option: the default when absent or `null`, otherwise the
/// type-checked override.
///
/// # Errors
///
/// Returns [`ParameterError::InvalidParameterType`] on a type mismatch, or
/// [`ParameterError::UnsafeValue`] if the value cannot be rendered safely.
pub fn resolve(
    overrides: &Mapping,
    name: &str,
    kind: ParamKind,
    default: &ParamValue,
) -> Result<ParamValue, ParameterError> {
    let value = match overrides.get(name) {
        None | Some(Value::Null) => return Ok(default.clone()),
        Some(value) => coerce(kind, value)?,
    };
    match &value {
        ParamValue::Bool(_) => {}
        ParamValue::Str(s) => check_bare_word(name, s)?,
        ParamValue::Map(pairs) => {
            for (key, val) in pairs {
                check_variable(key, val)?;
            }
        }
    }
    Ok(value)
}

/// Resolve a plain string option; empty when absent or `null`.
///
/// # Errors
///
/// Returns [`ParameterError::InvalidParameterType`] if the override is not a
/// string, or [`ParameterError::UnsafeValue`] if it is not a bare word.
pub fn resolve_str(overrides: &Mapping, name: &str) -> Result<String, ParameterError> {
    match overrides.get(name) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => {
            check_bare_word(name, s)?;
            Ok(s.clone())
        }
        Some(other) => Err(mismatch(other, ParamKind::Str.name())),
    }
}

// ── Shell safety ─────────────────────────────────────────────────────────────

/// Characters `sh` interprets outside quotes.
const SHELL_SPECIAL: &[char] = &[
    ';', '&', '|', '<', '>', '(', ')', '$', '`', '\\', '"', '\'', '*', '?', '[', ']', '{',
    '}', '~', '#', '!',
];

/// Paths are rendered unquoted, so they must be a single shell word.
///
/// # Errors
///
/// Returns [`ParameterError::UnsafeValue`] on whitespace or a shell
/// metacharacter.
pub fn check_bare_word(name: &str, value: &str) -> Result<(), ParameterError> {
    match value
        .chars()
        .find(|c| c.is_whitespace() || SHELL_SPECIAL.contains(c))
    {
        Some(c) => Err(ParameterError::UnsafeValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: format!("contains {c:?}, which the shell would interpret"),
        }),
        None => Ok(()),
    }
}

/// Variables render inside single quotes, which cannot carry a `'`.
///
/// # Errors
///
/// Returns [`ParameterError::UnsafeValue`] if the key or value contains `'`.
pub fn check_variable(key: &str, value: &str) -> Result<(), ParameterError> {
    if key.contains('\'') || value.contains('\'') {
        return Err(ParameterError::UnsafeValue {
            name: VARIABLES.to_string(),
            value: format!("{key}={value}"),
            reason: "contains a single quote".to_string(),
        });
    }
    Ok(())
}

// ── Parameter set ────────────────────────────────────────────────────────────

/// Validated option values, one per entry of [`TERRAFORM_PARAMS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerraformParams {
    values: Vec<ParamValue>,
}

impl TerraformParams {
    /// Build the set from untyped overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidParameterType`] for the first
    /// override whose type does not match its descriptor.
    pub fn from_overrides(overrides: &Mapping) -> Result<Self, ParameterError> {
        let values = TERRAFORM_PARAMS
            .iter()
            .map(|d| resolve(overrides, d.name, d.kind, &d.default))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { values })
    }

    /// Value stored for the option `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        TERRAFORM_PARAMS
            .iter()
            .position(|d| d.name == name)
            .and_then(|i| self.values.get(i))
    }

    /// Rendered flags for `action`, in table order.
    ///
    /// A flag is rendered only when its value is truthy and the option's
    /// mask includes `action`.
    #[must_use]
    pub fn flags(&self, action: ActionMask) -> Vec<String> {
        TERRAFORM_PARAMS
            .iter()
            .zip(&self.values)
            .filter(|(d, v)| v.is_truthy() && d.actions.includes(action))
            .map(|(d, v)| (d.render)(v))
            .collect()
    }
}

impl Default for TerraformParams {
    fn default() -> Self {
        Self {
            values: TERRAFORM_PARAMS.iter().map(|d| d.default.clone()).collect(),
        }
    }
}

// ── Typed overrides ──────────────────────────────────────────────────────────

/// Typed option overrides, layered over an untyped mapping.
///
/// `None` leaves the underlying value alone. Variables are merged key by
/// key, so a key already present keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerraformOptions {
    pub no_color: Option<bool>,
    pub auto_approve: Option<bool>,
    pub json_view: Option<bool>,
    pub state: Option<String>,
    pub variables: Vec<(String, String)>,
    pub tf_path: Option<String>,
}

impl TerraformOptions {
    /// Write these overrides into `overrides`.
    pub fn merge_into(&self, overrides: &mut Mapping) {
        let flags = [
            ("no_color", self.no_color),
            ("auto_approve", self.auto_approve),
            ("json_view", self.json_view),
        ];
        for (key, value) in flags {
            if let Some(b) = value {
                overrides.insert(key.into(), Value::Bool(b));
            }
        }
        if let Some(state) = &self.state {
            overrides.insert("state".into(), Value::String(state.clone()));
        }
        if let Some(path) = &self.tf_path {
            overrides.insert(TF_PATH.into(), Value::String(path.clone()));
        }
        if self.variables.is_empty() {
            return;
        }
        let entry = overrides
            .entry(VARIABLES.into())
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if entry.is_null() {
            *entry = Value::Mapping(Mapping::new());
        }
        // A non-mapping value is left for construction to reject.
        if let Value::Mapping(vars) = entry {
            for (k, v) in &self.variables {
                vars.insert(Value::String(k.clone()), Value::String(v.clone()));
            }
        }
    }

    /// These overrides as a fresh mapping.
    #[must_use]
    pub fn to_overrides(&self) -> Mapping {
        let mut overrides = Mapping::new();
        self.merge_into(&mut overrides);
        overrides
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
