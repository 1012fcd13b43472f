//! Full sweep: every surviving catalog entry × sequence length × search-space
//! point.

use crate::emit::push_validated;
use crate::error::{Result, SweepError};
use crate::filters::SweepFilters;
use crate::seq_len::SeqLen;
use crate::stepping::concurrency_steps;
use benchmatrix_schema::{
    Catalog, ConcurrencySpec, MasterConfigEntry, MatrixEntry, MultiNodeMasterEntry,
    MultiNodeMatrixEntry, RunnerRegistry, SingleNodeMasterEntry, SingleNodeMatrixEntry,
};
use tracing::{debug, info};

/// Expands `catalog` into matrix entries that satisfy `filters`.
///
/// Fails before expanding anything if a requested runner type is not in
/// `registry`, and fails if no entry survives the filters.
pub fn generate_full_sweep(
    catalog: &Catalog,
    registry: &RunnerRegistry,
    filters: &SweepFilters,
) -> Result<Vec<MatrixEntry>> {
    check_runner_types(&filters.runner_types, registry)?;

    let mut matrix = Vec::new();
    for item in catalog {
        if let Some(reason) = filters.rejects_entry(&item.key, &item.config) {
            debug!(key = %item.key, reason, "skipping catalog entry");
            continue;
        }

        match &item.config {
            MasterConfigEntry::SingleNode(entry) => {
                expand_single_node(entry, filters, &mut matrix)?;
            }
            MasterConfigEntry::MultiNode(entry) => {
                expand_multi_node(entry, filters, &mut matrix)?;
            }
        }
    }

    if matrix.is_empty() {
        return Err(SweepError::NoMatchingConfigs);
    }

    info!(entries = matrix.len(), mode = %filters.mode, "generated full sweep");
    Ok(matrix)
}

fn check_runner_types(requested: &[String], registry: &RunnerRegistry) -> Result<()> {
    let mut invalid: Vec<String> =
        requested.iter().filter(|r| !registry.contains(r)).cloned().collect();
    if invalid.is_empty() {
        return Ok(());
    }

    invalid.sort_unstable();
    invalid.dedup();
    Err(SweepError::UnknownRunnerTypes {
        invalid,
        valid: registry.sorted_runner_types().into_iter().map(str::to_string).collect(),
    })
}

fn expand_single_node(
    entry: &SingleNodeMasterEntry,
    filters: &SweepFilters,
    matrix: &mut Vec<MatrixEntry>,
) -> Result<()> {
    for seq_config in &entry.seq_len_configs {
        let seq_len = SeqLen::new(seq_config.isl, seq_config.osl);
        if !filters.accepts_seq_len(seq_len) {
            continue;
        }
        let exp_name = format!("{}_{}", entry.model_prefix, seq_len.label());

        for point in &seq_config.search_space {
            if let Some(reason) = filters.rejects_point(point) {
                debug!(model = %entry.model, tp = point.tp, reason, "skipping search-space point");
                continue;
            }

            let concurrencies = match &point.concurrency {
                ConcurrencySpec::Range { start, end } => {
                    let end = filters.max_conc.map_or(*end, |max| (*end).min(max));
                    concurrency_steps(*start, end, filters.step_size)
                }
                ConcurrencySpec::List(values) => {
                    values.iter().copied().filter(|c| filters.accepts_conc(*c)).collect()
                }
            };
            if concurrencies.is_empty() {
                debug!(model = %entry.model, tp = point.tp, "no concurrency left under max-conc");
                continue;
            }

            for conc in concurrencies {
                let row = SingleNodeMatrixEntry {
                    image: entry.image.clone(),
                    model: entry.model.clone(),
                    precision: entry.precision.clone(),
                    framework: entry.framework.clone(),
                    spec_decoding: point.spec_decoding,
                    runner: entry.runner.clone(),
                    isl: seq_len.isl,
                    osl: seq_len.osl,
                    tp: point.tp,
                    ep: point.ep.unwrap_or(1),
                    dp_attn: point.dp_attn.unwrap_or(false),
                    conc,
                    max_model_len: seq_len.max_model_len(),
                    exp_name: exp_name.clone(),
                    disagg: entry.disagg,
                };
                push_validated(matrix, MatrixEntry::SingleNode(row))?;
            }
        }
    }
    Ok(())
}

fn expand_multi_node(
    entry: &MultiNodeMasterEntry,
    filters: &SweepFilters,
    matrix: &mut Vec<MatrixEntry>,
) -> Result<()> {
    for seq_config in &entry.seq_len_configs {
        let seq_len = SeqLen::new(seq_config.isl, seq_config.osl);
        if !filters.accepts_seq_len(seq_len) {
            continue;
        }
        let exp_name = format!("{}_{}", entry.model_prefix, seq_len.label());

        for point in &seq_config.search_space {
            let conc: Vec<u32> = match &point.concurrency {
                ConcurrencySpec::Range { start, end } => {
                    concurrency_steps(*start, *end, filters.step_size)
                }
                ConcurrencySpec::List(values) => values.clone(),
            }
            .into_iter()
            .filter(|c| filters.accepts_conc(*c))
            .collect();

            if conc.is_empty() {
                debug!(model = %entry.model, "no concurrency left under max-conc");
                continue;
            }

            // One entry per point; the runner fans the concurrency list out.
            let row = MultiNodeMatrixEntry {
                image: entry.image.clone(),
                model: entry.model.clone(),
                precision: entry.precision.clone(),
                framework: entry.framework.clone(),
                spec_decoding: point.spec_decoding,
                runner: entry.runner.clone(),
                isl: seq_len.isl,
                osl: seq_len.osl,
                prefill: point.prefill.clone(),
                decode: point.decode.clone(),
                conc,
                max_model_len: seq_len.max_model_len(),
                exp_name: exp_name.clone(),
                disagg: entry.disagg,
            };
            push_validated(matrix, MatrixEntry::MultiNode(row))?;
        }
    }
    Ok(())
}
