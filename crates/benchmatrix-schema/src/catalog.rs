// SPDX-License-Identifier: MIT OR Apache-2.0
//! Input catalog schema: master config entries and their nested records.
//!
//! A master entry is either single-node or multi-node, selected by its
//! `multinode` flag. The flag is consumed while decoding and survives only as
//! the [`MasterConfigEntry`] variant.

use crate::concurrency::{ConcurrencyError, ConcurrencySpec};
use crate::error::{Result, SchemaError, describe_key, value_kind};
use crate::fields::{positive, positive_opt};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;

const MULTINODE_KEY: &str = "multinode";

/// Speculative decoding mode of a benchmark point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecDecoding {
    Mtp,
    DraftModel,
    #[default]
    None,
}

impl SpecDecoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mtp => "mtp",
            Self::DraftModel => "draft_model",
            Self::None => "none",
        }
    }
}

impl fmt::Display for SpecDecoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role (prefill or decode) of a disaggregated multi-node deployment.
///
/// Shared verbatim between the input catalog and generated entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct WorkerConfig {
    #[serde(deserialize_with = "positive")]
    pub num_worker: u32,
    #[serde(deserialize_with = "positive")]
    pub tp: u32,
    #[serde(deserialize_with = "positive")]
    pub ep: u32,
    pub dp_attn: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_settings: Option<Vec<String>>,
}

/// A single-node benchmark point.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSingleNodeSearchSpace")]
pub struct SingleNodeSearchSpace {
    pub tp: u32,
    /// Expert parallelism, when declared. Generated entries default to 1.
    pub ep: Option<u32>,
    /// Data-parallel attention, when declared. Generated entries default to false.
    pub dp_attn: Option<bool>,
    pub spec_decoding: SpecDecoding,
    pub concurrency: ConcurrencySpec,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawSingleNodeSearchSpace {
    #[serde(deserialize_with = "positive")]
    tp: u32,
    #[serde(default, deserialize_with = "positive_opt")]
    ep: Option<u32>,
    #[serde(default)]
    spec_decoding: SpecDecoding,
    dp_attn: Option<bool>,
    conc_start: Option<i64>,
    conc_end: Option<i64>,
    conc_list: Option<Vec<i64>>,
}

impl TryFrom<RawSingleNodeSearchSpace> for SingleNodeSearchSpace {
    type Error = ConcurrencyError;

    fn try_from(raw: RawSingleNodeSearchSpace) -> std::result::Result<Self, Self::Error> {
        let concurrency =
            ConcurrencySpec::resolve(raw.conc_start, raw.conc_end, raw.conc_list.as_deref())?;
        Ok(Self {
            tp: raw.tp,
            ep: raw.ep,
            dp_attn: raw.dp_attn,
            spec_decoding: raw.spec_decoding,
            concurrency,
        })
    }
}

/// A multi-node benchmark point. Parallelism lives in the worker configs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawMultiNodeSearchSpace")]
pub struct MultiNodeSearchSpace {
    pub spec_decoding: SpecDecoding,
    pub prefill: WorkerConfig,
    pub decode: WorkerConfig,
    pub concurrency: ConcurrencySpec,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawMultiNodeSearchSpace {
    #[serde(default)]
    spec_decoding: SpecDecoding,
    prefill: WorkerConfig,
    decode: WorkerConfig,
    conc_start: Option<i64>,
    conc_end: Option<i64>,
    conc_list: Option<Vec<i64>>,
}

impl TryFrom<RawMultiNodeSearchSpace> for MultiNodeSearchSpace {
    type Error = ConcurrencyError;

    fn try_from(raw: RawMultiNodeSearchSpace) -> std::result::Result<Self, Self::Error> {
        let concurrency =
            ConcurrencySpec::resolve(raw.conc_start, raw.conc_end, raw.conc_list.as_deref())?;
        Ok(Self {
            spec_decoding: raw.spec_decoding,
            prefill: raw.prefill,
            decode: raw.decode,
            concurrency,
        })
    }
}

/// Search space for one `(isl, osl)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct SeqLenConfig<S> {
    #[serde(deserialize_with = "positive")]
    pub isl: u32,
    #[serde(deserialize_with = "positive")]
    pub osl: u32,
    pub search_space: Vec<S>,
}

/// Fields shared by both master entry variants; `S` is the search-space shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct MasterEntry<S> {
    pub image: String,
    pub model: String,
    /// Short model code used in generated experiment names.
    pub model_prefix: String,
    pub precision: String,
    pub framework: String,
    /// Runner type name, a key of the runner registry.
    pub runner: String,
    #[serde(default)]
    pub disagg: bool,
    pub seq_len_configs: Vec<SeqLenConfig<S>>,
}

pub type SingleNodeMasterEntry = MasterEntry<SingleNodeSearchSpace>;
pub type MultiNodeMasterEntry = MasterEntry<MultiNodeSearchSpace>;

/// A validated catalog entry, discriminated by `multinode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MasterConfigEntry {
    SingleNode(SingleNodeMasterEntry),
    MultiNode(MultiNodeMasterEntry),
}

macro_rules! either {
    ($entry:expr, $e:ident => $body:expr) => {
        match $entry {
            MasterConfigEntry::SingleNode($e) => $body,
            MasterConfigEntry::MultiNode($e) => $body,
        }
    };
}

impl MasterConfigEntry {
    /// Decodes one catalog value, dispatching on its `multinode` flag.
    ///
    /// The returned message carries the underlying field errors; callers
    /// attach the catalog key.
    pub fn from_yaml(value: &Value) -> std::result::Result<Self, String> {
        let Value::Mapping(fields) = value else {
            return Err(format!("expected a mapping, got {}", value_kind(value)));
        };

        let mut fields = fields.clone();
        let multinode = match fields.remove(MULTINODE_KEY) {
            Some(Value::Bool(flag)) => flag,
            Some(other) => {
                return Err(format!(
                    "field `{MULTINODE_KEY}` must be true or false, got {}",
                    value_kind(&other)
                ));
            }
            None => return Err(format!("missing field `{MULTINODE_KEY}`")),
        };

        let fields = Value::Mapping(fields);
        let decoded = if multinode {
            serde_yaml::from_value(fields).map(Self::MultiNode)
        } else {
            serde_yaml::from_value(fields).map(Self::SingleNode)
        };
        decoded.map_err(|e| e.to_string())
    }

    pub fn is_multinode(&self) -> bool {
        matches!(self, Self::MultiNode(_))
    }

    pub fn image(&self) -> &str {
        either!(self, e => &e.image)
    }

    pub fn model(&self) -> &str {
        either!(self, e => &e.model)
    }

    pub fn model_prefix(&self) -> &str {
        either!(self, e => &e.model_prefix)
    }

    pub fn precision(&self) -> &str {
        either!(self, e => &e.precision)
    }

    pub fn framework(&self) -> &str {
        either!(self, e => &e.framework)
    }

    pub fn runner(&self) -> &str {
        either!(self, e => &e.runner)
    }

    pub fn disagg(&self) -> bool {
        either!(self, e => e.disagg)
    }

    /// `(isl, osl)` pairs in declaration order.
    pub fn seq_lens(&self) -> Vec<(u32, u32)> {
        either!(self, e => e.seq_len_configs.iter().map(|c| (c.isl, c.osl)).collect())
    }
}

/// A named catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: String,
    pub config: MasterConfigEntry,
}

/// The validated configuration catalog, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&MasterConfigEntry> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.config)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Validates a loaded catalog document.
///
/// Fails on the first entry that does not decode, naming its key.
pub fn validate_master_config(doc: &Value) -> Result<Catalog> {
    let Value::Mapping(map) = doc else {
        return Err(SchemaError::NotAMapping { what: "master config", kind: value_kind(doc) });
    };

    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        let key = key.as_str().ok_or_else(|| SchemaError::NonStringKey {
            what: "master config",
            key: describe_key(key),
        })?;
        let config = MasterConfigEntry::from_yaml(value)
            .map_err(|message| SchemaError::MasterConfig { key: key.to_string(), message })?;
        entries.push(CatalogEntry { key: key.to_string(), config });
    }

    tracing::debug!(entries = entries.len(), "validated master config");
    Ok(Catalog { entries })
}
