//! Reading catalog and runner-registry documents from disk.
//!
//! Loading only parses YAML and merges catalog files; structural validation
//! is left to `benchmatrix-schema`.

use anyhow::{Context, Result, bail};
use benchmatrix_schema::error::{describe_key, value_kind};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Reads every catalog file and merges their top-level mappings in order.
///
/// A key defined by more than one file is an error rather than an override.
pub fn load_config_files<P: AsRef<Path>>(paths: &[P]) -> Result<Value> {
    let mut merged = Mapping::new();

    for path in paths {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                bail!("Input file '{}' does not exist.", path.display())
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read config: {}", path.display()));
            }
        };

        let doc: Value = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        let Value::Mapping(entries) = doc else {
            bail!(
                "Config file '{}' must contain a mapping, got {}",
                path.display(),
                value_kind(&doc)
            );
        };

        let mut duplicates: Vec<String> =
            entries.keys().filter(|k| merged.contains_key(*k)).map(describe_key).collect();
        if !duplicates.is_empty() {
            duplicates.sort();
            bail!(
                "Duplicate configuration keys found in '{}': {}",
                path.display(),
                duplicates.join(", ")
            );
        }

        debug!(path = %path.display(), entries = entries.len(), "loaded config file");
        merged.extend(entries);
    }

    Ok(Value::Mapping(merged))
}

/// Reads the runner registry document.
pub fn load_runner_file(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            bail!("Runner config file '{}' does not exist.", path.display())
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read runner config: {}", path.display()));
        }
    };

    serde_yaml::from_str(&text)
        .with_context(|| format!("Failed to parse runner config: {}", path.display()))
}
