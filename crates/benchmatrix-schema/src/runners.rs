// SPDX-License-Identifier: MIT OR Apache-2.0
//! Runner registry: runner type name to its physical node identifiers.

use crate::error::{Result, RunnerIssue, SchemaError, describe_key, value_kind};
use serde_yaml::Value;
use std::collections::HashSet;

/// Validated runner registry, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerRegistry {
    runners: Vec<(String, Vec<String>)>,
}

impl RunnerRegistry {
    /// Nodes registered for `runner_type`, never empty.
    pub fn nodes(&self, runner_type: &str) -> Option<&[String]> {
        self.runners
            .iter()
            .find(|(name, _)| name == runner_type)
            .map(|(_, nodes)| nodes.as_slice())
    }

    pub fn contains(&self, runner_type: &str) -> bool {
        self.nodes(runner_type).is_some()
    }

    /// Runner type names in document order.
    pub fn runner_types(&self) -> impl Iterator<Item = &str> {
        self.runners.iter().map(|(name, _)| name.as_str())
    }

    /// Runner type names sorted, for error messages.
    pub fn sorted_runner_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.runner_types().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }
}

/// Validates a loaded runner registry document.
pub fn validate_runner_config(doc: &Value) -> Result<RunnerRegistry> {
    let Value::Mapping(map) = doc else {
        return Err(SchemaError::NotAMapping { what: "runner config", kind: value_kind(doc) });
    };

    let mut runners = Vec::with_capacity(map.len());
    for (key, value) in map {
        let key = key.as_str().ok_or_else(|| SchemaError::NonStringKey {
            what: "runner config",
            key: describe_key(key),
        })?;
        let nodes = node_list(value)
            .map_err(|issue| SchemaError::RunnerConfig { key: key.to_string(), issue })?;
        runners.push((key.to_string(), nodes));
    }

    tracing::debug!(runner_types = runners.len(), "validated runner config");
    Ok(RunnerRegistry { runners })
}

fn node_list(value: &Value) -> std::result::Result<Vec<String>, RunnerIssue> {
    let Value::Sequence(items) = value else {
        return Err(RunnerIssue::NotAList(value_kind(value)));
    };

    let nodes = items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or(RunnerIssue::NonStringNode))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if nodes.is_empty() {
        return Err(RunnerIssue::Empty);
    }

    let mut seen = HashSet::with_capacity(nodes.len());
    if let Some(dup) = nodes.iter().find(|node| !seen.insert(node.as_str())) {
        return Err(RunnerIssue::DuplicateNode(dup.clone()));
    }

    Ok(nodes)
}
