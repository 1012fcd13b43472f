// SPDX-License-Identifier: MIT OR Apache-2.0
//! Concurrency settings shared by both search-space variants.
//!
//! A search-space point declares its concurrency either as a contiguous range
//! (`conc-start`/`conc-end`) or as an explicit `conc-list`, never both and
//! never neither. [`ConcurrencySpec::resolve`] is the single place that rule
//! is checked; both search-space decoders call it.

use crate::fields::to_positive;
use thiserror::Error;

/// Violations of the range/list concurrency rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConcurrencyError {
    #[error(
        "Cannot specify both 'conc-list' list and 'conc-start'/'conc-end'. \
         Use either a list or a range, not both."
    )]
    RangeAndList,

    #[error("Must specify either 'conc-list' list or both 'conc-start' and 'conc-end'.")]
    Missing,

    #[error("'conc-start' ({start}) must be <= 'conc-end' ({end}).")]
    InvertedRange { start: i64, end: i64 },

    #[error("'conc-start' ({start}) and 'conc-end' ({end}) must be greater than 0.")]
    NonPositiveRange { start: i64, end: i64 },

    #[error("Input 'conc-list' entries must be greater than 0.")]
    NonPositiveListEntry,
}

/// How a search-space point chooses its concurrency values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConcurrencySpec {
    /// Inclusive range, `start <= end`, stepped geometrically by the expander.
    Range { start: u32, end: u32 },
    /// Explicit values, used as given. Never empty.
    List(Vec<u32>),
}

impl ConcurrencySpec {
    /// Applies the range/list rule to the raw `conc-start`, `conc-end` and
    /// `conc-list` fields of a search-space point.
    ///
    /// A range only counts when both bounds are present and a list only
    /// counts when it is non-empty.
    pub fn resolve(
        start: Option<i64>,
        end: Option<i64>,
        list: Option<&[i64]>,
    ) -> Result<Self, ConcurrencyError> {
        let range = start.zip(end);
        let list = list.filter(|l| !l.is_empty());

        match (range, list) {
            (Some(_), Some(_)) => Err(ConcurrencyError::RangeAndList),
            (None, None) => Err(ConcurrencyError::Missing),
            (Some((start, end)), None) => Self::range(start, end),
            (None, Some(list)) => Self::list(list),
        }
    }

    /// Builds a validated range.
    pub fn range(start: i64, end: i64) -> Result<Self, ConcurrencyError> {
        if start > end {
            return Err(ConcurrencyError::InvertedRange { start, end });
        }
        match (to_positive(start), to_positive(end)) {
            (Some(start), Some(end)) => Ok(Self::Range { start, end }),
            _ => Err(ConcurrencyError::NonPositiveRange { start, end }),
        }
    }

    /// Builds a validated list. An empty list counts as no list at all.
    pub fn list(values: &[i64]) -> Result<Self, ConcurrencyError> {
        if values.is_empty() {
            return Err(ConcurrencyError::Missing);
        }
        let values = values
            .iter()
            .map(|v| to_positive(*v).ok_or(ConcurrencyError::NonPositiveListEntry))
            .collect::<Result<Vec<_>, _>>()?;

        let mut sorted = values.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            tracing::warn!(?values, "'conc-list' repeats a concurrency value");
        }
        Ok(Self::List(values))
    }

    /// Lowest concurrency this point can probe: the range start, or the
    /// smallest list value.
    pub fn lowest(&self) -> u32 {
        match self {
            Self::Range { start, .. } => *start,
            Self::List(values) => values.iter().copied().min().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_only_resolves_to_range() {
        let spec = ConcurrencySpec::resolve(Some(4), Some(64), None).unwrap();
        assert_eq!(spec, ConcurrencySpec::Range { start: 4, end: 64 });
    }

    #[test]
    fn empty_list_with_range_is_a_range() {
        let spec = ConcurrencySpec::resolve(Some(1), Some(1), Some(&[])).unwrap();
        assert_eq!(spec, ConcurrencySpec::Range { start: 1, end: 1 });
    }

    #[test]
    fn half_range_with_list_is_a_list() {
        let spec = ConcurrencySpec::resolve(Some(4), None, Some(&[8, 2])).unwrap();
        assert_eq!(spec, ConcurrencySpec::List(vec![8, 2]));
        assert_eq!(spec.lowest(), 2);
    }

    #[test]
    fn both_forms_rejected() {
        let err = ConcurrencySpec::resolve(Some(1), Some(8), Some(&[1, 2])).unwrap_err();
        assert_eq!(err, ConcurrencyError::RangeAndList);
    }

    #[test]
    fn neither_form_rejected() {
        assert_eq!(
            ConcurrencySpec::resolve(Some(1), None, None).unwrap_err(),
            ConcurrencyError::Missing
        );
        assert_eq!(
            ConcurrencySpec::resolve(None, None, Some(&[])).unwrap_err(),
            ConcurrencyError::Missing
        );
    }

    #[test]
    fn inverted_range_rejected() {
        let err = ConcurrencySpec::resolve(Some(64), Some(4), None).unwrap_err();
        assert_eq!(err, ConcurrencyError::InvertedRange { start: 64, end: 4 });
    }

    #[test]
    fn zero_start_rejected() {
        let err = ConcurrencySpec::resolve(Some(0), Some(4), None).unwrap_err();
        assert_eq!(err, ConcurrencyError::NonPositiveRange { start: 0, end: 4 });
    }

    #[test]
    fn non_positive_list_entry_rejected() {
        let err = ConcurrencySpec::resolve(None, None, Some(&[1, 0, 4])).unwrap_err();
        assert_eq!(err, ConcurrencyError::NonPositiveListEntry);
        let err = ConcurrencySpec::resolve(None, None, Some(&[-2])).unwrap_err();
        assert_eq!(err, ConcurrencyError::NonPositiveListEntry);
    }
}
