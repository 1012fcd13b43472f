//! Runner-model smoke test: one representative run of every applicable
//! configuration on every physical node of a runner type.

use crate::emit::push_validated;
use crate::error::{Result, SweepError};
use crate::seq_len::SeqLen;
use benchmatrix_schema::{
    Catalog, MasterConfigEntry, MatrixEntry, RunnerRegistry, SingleNodeMasterEntry,
    SingleNodeMatrixEntry, SingleNodeSearchSpace,
};
use tracing::{debug, info};

// TODO: expose the smoke-test sequence length and context size as
// runner-model-sweep options instead of fixed constants.
/// The representative sequence-length point every smoke-test run uses.
pub const SMOKE_TEST_SEQ_LEN: SeqLen = SeqLen::new(1024, 1024);

/// Context size of smoke-test runs. Fixed, not derived from the sequence
/// length.
pub const SMOKE_TEST_MAX_MODEL_LEN: u64 = 2048;

/// Experiment-name suffix of smoke-test runs: `{model-prefix}_test`.
pub const SMOKE_TEST_EXP_SUFFIX: &str = "test";

/// Parameters of a runner-model smoke test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeTestRequest {
    /// Runner type whose nodes are exercised.
    pub runner_type: String,
    /// Keep only nodes whose identifier contains this substring.
    pub node_filter: Option<String>,
}

impl SmokeTestRequest {
    pub fn new(runner_type: impl Into<String>) -> Self {
        Self { runner_type: runner_type.into(), node_filter: None }
    }

    pub fn with_node_filter(mut self, filter: impl Into<String>) -> Self {
        self.node_filter = Some(filter.into());
        self
    }
}

/// Projects each single-node catalog entry targeting `request.runner_type`
/// onto every (filtered) node of that runner type.
///
/// Each entry is probed at [`SMOKE_TEST_SEQ_LEN`] with its highest-`tp`
/// point and that point's lowest concurrency.
pub fn generate_runner_model_sweep(
    catalog: &Catalog,
    registry: &RunnerRegistry,
    request: &SmokeTestRequest,
) -> Result<Vec<MatrixEntry>> {
    let runner_type = request.runner_type.as_str();
    let nodes = registry.nodes(runner_type).ok_or_else(|| SweepError::UnknownRunner {
        runner: runner_type.to_string(),
        valid: registry.runner_types().map(str::to_string).collect(),
    })?;

    let nodes: Vec<&str> = match &request.node_filter {
        Some(filter) => {
            let kept: Vec<&str> =
                nodes.iter().map(String::as_str).filter(|n| n.contains(filter.as_str())).collect();
            if kept.is_empty() {
                return Err(SweepError::NoMatchingNodes {
                    filter: filter.clone(),
                    runner: runner_type.to_string(),
                });
            }
            kept
        }
        None => nodes.iter().map(String::as_str).collect(),
    };

    let mut matrix = Vec::new();
    for item in catalog {
        if item.config.runner() != runner_type {
            continue;
        }
        let MasterConfigEntry::SingleNode(entry) = &item.config else {
            debug!(key = %item.key, "skipping multi-node config in smoke test");
            continue;
        };

        let point = probe_point(&item.key, entry)?;
        for node in &nodes {
            let row = SingleNodeMatrixEntry {
                image: entry.image.clone(),
                model: entry.model.clone(),
                precision: entry.precision.clone(),
                framework: entry.framework.clone(),
                spec_decoding: point.spec_decoding,
                runner: (*node).to_string(),
                isl: SMOKE_TEST_SEQ_LEN.isl,
                osl: SMOKE_TEST_SEQ_LEN.osl,
                tp: point.tp,
                ep: point.ep.unwrap_or(1),
                dp_attn: point.dp_attn.unwrap_or(false),
                conc: point.concurrency.lowest(),
                max_model_len: SMOKE_TEST_MAX_MODEL_LEN,
                exp_name: format!("{}_{SMOKE_TEST_EXP_SUFFIX}", entry.model_prefix),
                disagg: entry.disagg,
            };
            push_validated(&mut matrix, MatrixEntry::SingleNode(row))?;
        }
    }

    if matrix.is_empty() {
        return Err(SweepError::NoMatchingConfigs);
    }

    info!(entries = matrix.len(), runner_type, nodes = nodes.len(), "generated runner-model sweep");
    Ok(matrix)
}

/// Highest-`tp` point at the smoke-test sequence length; the first one wins
/// ties.
fn probe_point<'a>(
    key: &str,
    entry: &'a SingleNodeMasterEntry,
) -> Result<&'a SingleNodeSearchSpace> {
    entry
        .seq_len_configs
        .iter()
        .find(|c| SeqLen::new(c.isl, c.osl) == SMOKE_TEST_SEQ_LEN)
        .and_then(|c| c.search_space.iter().reduce(|best, p| if p.tp > best.tp { p } else { best }))
        .ok_or_else(|| SweepError::MissingSmokeTestPoint {
            key: key.to_string(),
            seq_len: SMOKE_TEST_SEQ_LEN.label(),
        })
}
