// SPDX-License-Identifier: MIT OR Apache-2.0
//! Field-level decoders shared by the input and output schemas.

use serde::de::{Deserialize, Deserializer, Error};

pub(crate) fn to_positive(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v > 0)
}

/// Decodes an integer that must be greater than zero.
pub(crate) fn positive<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    to_positive(value).ok_or_else(|| {
        D::Error::custom(format!("expected a positive 32-bit integer, got {value}"))
    })
}

/// Like [`positive`], for 64-bit fields such as derived context lengths.
pub(crate) fn positive_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    u64::try_from(value).ok().filter(|v| *v > 0).ok_or_else(|| {
        D::Error::custom(format!("expected a positive integer, got {value}"))
    })
}

/// Like [`positive`], for optional fields. Pair with `#[serde(default)]`.
pub(crate) fn positive_opt<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer)?
        .map(|value| {
            to_positive(value).ok_or_else(|| {
                D::Error::custom(format!("expected a positive 32-bit integer, got {value}"))
            })
        })
        .transpose()
}

/// Decodes a non-empty list of positive integers.
pub(crate) fn positive_list<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<i64>::deserialize(deserializer)?;
    if values.is_empty() {
        return Err(D::Error::custom("expected a non-empty list of positive integers"));
    }
    values
        .into_iter()
        .map(|value| {
            to_positive(value).ok_or_else(|| {
                D::Error::custom(format!(
                    "list entries must be positive 32-bit integers, got {value}"
                ))
            })
        })
        .collect()
}
