//! Filter set for the full sweep.
//!
//! Empty lists and `None` ceilings mean "no filter". Filters only ever
//! remove entries; applying none of them yields the full expansion.

use crate::seq_len::SeqLen;
use crate::stepping::StepSize;
use benchmatrix_schema::{MasterConfigEntry, SingleNodeSearchSpace};
use std::fmt;

/// Which half of the catalog a full sweep expands. The two modes partition
/// the catalog: no entry is expanded by both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeMode {
    SingleNode,
    MultiNode,
}

impl NodeMode {
    pub fn admits(self, entry: &MasterConfigEntry) -> bool {
        match self {
            Self::SingleNode => !entry.is_multinode(),
            Self::MultiNode => entry.is_multinode(),
        }
    }
}

impl fmt::Display for NodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SingleNode => "single-node",
            Self::MultiNode => "multi-node",
        })
    }
}

/// User filters and stepping policy for [`generate_full_sweep`].
///
/// [`generate_full_sweep`]: crate::generate_full_sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepFilters {
    /// Keep catalog entries whose key starts with any of these.
    pub model_prefixes: Vec<String>,
    pub precisions: Vec<String>,
    pub frameworks: Vec<String>,
    /// Keep entries targeting these runner types. Every value must exist in
    /// the runner registry.
    pub runner_types: Vec<String>,
    pub seq_lens: Vec<SeqLen>,
    pub mode: NodeMode,
    pub step_size: StepSize,
    /// Drop concurrency values above this ceiling.
    pub max_conc: Option<u32>,
    /// Single-node only: drop points with a higher `tp`.
    pub max_tp: Option<u32>,
    /// Single-node only: drop points that declare a higher `ep`.
    pub max_ep: Option<u32>,
}

impl SweepFilters {
    /// No filters, default step size.
    pub fn new(mode: NodeMode) -> Self {
        Self {
            model_prefixes: Vec::new(),
            precisions: Vec::new(),
            frameworks: Vec::new(),
            runner_types: Vec::new(),
            seq_lens: Vec::new(),
            mode,
            step_size: StepSize::default(),
            max_conc: None,
            max_tp: None,
            max_ep: None,
        }
    }

    /// Why a catalog entry is filtered out, if it is.
    pub(crate) fn rejects_entry(
        &self,
        key: &str,
        entry: &MasterConfigEntry,
    ) -> Option<&'static str> {
        if !self.model_prefixes.is_empty()
            && !self.model_prefixes.iter().any(|p| key.starts_with(p.as_str()))
        {
            return Some("model prefix");
        }
        if !accepts(&self.precisions, entry.precision()) {
            return Some("precision");
        }
        if !accepts(&self.frameworks, entry.framework()) {
            return Some("framework");
        }
        if !accepts(&self.runner_types, entry.runner()) {
            return Some("runner type");
        }
        if !self.mode.admits(entry) {
            return Some("node mode");
        }
        None
    }

    pub(crate) fn accepts_seq_len(&self, seq_len: SeqLen) -> bool {
        self.seq_lens.is_empty() || self.seq_lens.contains(&seq_len)
    }

    pub(crate) fn accepts_conc(&self, conc: u32) -> bool {
        self.max_conc.is_none_or(|max| conc <= max)
    }

    /// Why a single-node point is filtered out by `max-tp`/`max-ep`, if it is.
    pub(crate) fn rejects_point(&self, point: &SingleNodeSearchSpace) -> Option<&'static str> {
        if let Some(max_tp) = self.max_tp
            && point.tp > max_tp
        {
            return Some("max-tp");
        }
        if let (Some(max_ep), Some(ep)) = (self.max_ep, point.ep)
            && ep > max_ep
        {
            return Some("max-ep");
        }
        None
    }
}

fn accepts(allowed: &[String], value: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|a| a == value)
}
