//! Sweep expansion errors.

use benchmatrix_schema::SchemaError;
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SweepError {
    #[error(
        "Invalid runner type(s): {}. Valid runner types are: {}",
        .invalid.join(", "),
        .valid.join(", ")
    )]
    UnknownRunnerTypes { invalid: Vec<String>, valid: Vec<String> },

    #[error(
        "Runner '{runner}' does not exist in runner config. \
         Must choose from existing runner types: '{}'.", .valid.join(", ")
    )]
    UnknownRunner { runner: String, valid: Vec<String> },

    #[error("No runner nodes found matching filter '{filter}' for runner type '{runner}'.")]
    NoMatchingNodes { filter: String, runner: String },

    #[error("No configs found matching input filters.")]
    NoMatchingConfigs,

    #[error("Step size must be an integer of at least 2, got '{0}'.")]
    InvalidStepSize(String),

    #[error(
        "Unknown sequence length '{value}'. Use one of {} or '<isl>_<osl>'.", .valid.join(", ")
    )]
    UnknownSeqLen { value: String, valid: Vec<String> },

    #[error("Config '{key}' has no search-space point for the smoke-test sequence length {seq_len}.")]
    MissingSmokeTestPoint { key: String, seq_len: String },

    #[error("failed to encode matrix entry: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

pub type Result<T> = std::result::Result<T, SweepError>;
