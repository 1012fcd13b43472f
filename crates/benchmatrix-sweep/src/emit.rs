//! Self-check of generated entries against the output schema.

use crate::error::Result;
use benchmatrix_schema::{MatrixEntry, validate_matrix_entry};

/// Re-validates `entry` in its serialized form and appends it to `matrix`.
pub(crate) fn push_validated(matrix: &mut Vec<MatrixEntry>, entry: MatrixEntry) -> Result<()> {
    let encoded = serde_json::to_value(&entry)?;
    let checked = validate_matrix_entry(&encoded, entry.is_multinode())?;
    matrix.push(checked);
    Ok(())
}
