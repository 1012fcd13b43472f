// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output schema for generated matrix entries.
//!
//! These records are the benchmark execution plan handed to downstream
//! tooling, so the wire names (`spec-decoding`, `max-model-len`, ...) are
//! part of the contract.

use crate::catalog::{SpecDecoding, WorkerConfig};
use crate::error::{Result, SchemaError};
use crate::fields::{positive, positive_list, positive_u64};
use serde::{Deserialize, Serialize};

/// One single-node benchmark run at one concurrency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct SingleNodeMatrixEntry {
    pub image: String,
    pub model: String,
    pub precision: String,
    pub framework: String,
    pub spec_decoding: SpecDecoding,
    pub runner: String,
    #[serde(deserialize_with = "positive")]
    pub isl: u32,
    #[serde(deserialize_with = "positive")]
    pub osl: u32,
    #[serde(deserialize_with = "positive")]
    pub tp: u32,
    #[serde(deserialize_with = "positive")]
    pub ep: u32,
    pub dp_attn: bool,
    #[serde(deserialize_with = "positive")]
    pub conc: u32,
    #[serde(deserialize_with = "positive_u64")]
    pub max_model_len: u64,
    pub exp_name: String,
    pub disagg: bool,
}

/// One multi-node benchmark run covering a list of concurrencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct MultiNodeMatrixEntry {
    pub image: String,
    pub model: String,
    pub precision: String,
    pub framework: String,
    pub spec_decoding: SpecDecoding,
    pub runner: String,
    #[serde(deserialize_with = "positive")]
    pub isl: u32,
    #[serde(deserialize_with = "positive")]
    pub osl: u32,
    pub prefill: WorkerConfig,
    pub decode: WorkerConfig,
    #[serde(deserialize_with = "positive_list")]
    pub conc: Vec<u32>,
    #[serde(deserialize_with = "positive_u64")]
    pub max_model_len: u64,
    pub exp_name: String,
    pub disagg: bool,
}

/// A generated entry of either shape. Serializes without a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MatrixEntry {
    SingleNode(SingleNodeMatrixEntry),
    MultiNode(MultiNodeMatrixEntry),
}

impl MatrixEntry {
    pub fn is_multinode(&self) -> bool {
        matches!(self, Self::MultiNode(_))
    }

    pub fn runner(&self) -> &str {
        match self {
            Self::SingleNode(e) => &e.runner,
            Self::MultiNode(e) => &e.runner,
        }
    }

    pub fn seq_len(&self) -> (u32, u32) {
        match self {
            Self::SingleNode(e) => (e.isl, e.osl),
            Self::MultiNode(e) => (e.isl, e.osl),
        }
    }

    pub fn max_model_len(&self) -> u64 {
        match self {
            Self::SingleNode(e) => e.max_model_len,
            Self::MultiNode(e) => e.max_model_len,
        }
    }

    pub fn exp_name(&self) -> &str {
        match self {
            Self::SingleNode(e) => &e.exp_name,
            Self::MultiNode(e) => &e.exp_name,
        }
    }

    /// Concurrency values this entry runs, one for single-node entries.
    pub fn concurrencies(&self) -> &[u32] {
        match self {
            Self::SingleNode(e) => std::slice::from_ref(&e.conc),
            Self::MultiNode(e) => &e.conc,
        }
    }

    pub fn as_single_node(&self) -> Option<&SingleNodeMatrixEntry> {
        match self {
            Self::SingleNode(e) => Some(e),
            Self::MultiNode(_) => None,
        }
    }

    pub fn as_multi_node(&self) -> Option<&MultiNodeMatrixEntry> {
        match self {
            Self::MultiNode(e) => Some(e),
            Self::SingleNode(_) => None,
        }
    }
}

/// Checks a generated record against the output schema selected by
/// `is_multinode`.
///
/// The flag is supplied by the caller rather than read from the record. On
/// failure the error carries the full record.
pub fn validate_matrix_entry(entry: &serde_json::Value, is_multinode: bool) -> Result<MatrixEntry> {
    let decoded = if is_multinode {
        MultiNodeMatrixEntry::deserialize(entry).map(MatrixEntry::MultiNode)
    } else {
        SingleNodeMatrixEntry::deserialize(entry).map(MatrixEntry::SingleNode)
    };

    decoded.map_err(|e| SchemaError::MatrixEntry {
        entry: serde_json::to_string_pretty(entry).unwrap_or_else(|_| entry.to_string()),
        message: e.to_string(),
    })
}
