// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structural validation errors.

use thiserror::Error;

/// Errors raised when a catalog, runner registry or generated entry does not
/// match its schema.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A catalog entry failed to decode; `key` is its top-level catalog name.
    #[error("Master config entry '{key}' failed validation:\n{message}")]
    MasterConfig { key: String, message: String },

    /// A generated matrix entry failed the output schema. `entry` holds the
    /// pretty-printed record.
    #[error("The following parsed matrix entry failed validation:\n{entry}\n{message}")]
    MatrixEntry { entry: String, message: String },

    #[error("Runner config entry '{key}' {issue}")]
    RunnerConfig { key: String, issue: RunnerIssue },

    #[error("{what} must be a mapping, got {kind}")]
    NotAMapping { what: &'static str, kind: &'static str },

    #[error("{what} keys must be strings, got {key}")]
    NonStringKey { what: &'static str, key: String },
}

/// Reasons a runner registry entry is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerIssue {
    #[error("must be a list, got {0}")]
    NotAList(&'static str),
    #[error("must contain only strings")]
    NonStringNode,
    #[error("cannot be an empty list")]
    Empty,
    #[error("lists node '{0}' more than once")]
    DuplicateNode(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;

/// Human-readable kind of a YAML value, used in error messages.
pub fn value_kind(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Renders a mapping key for error messages.
pub fn describe_key(key: &serde_yaml::Value) -> String {
    match key.as_str() {
        Some(s) => s.to_string(),
        None => serde_yaml::to_string(key)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| value_kind(key).to_string()),
    }
}
