//! Property-based tests for the concurrency range/list rule.
//!
//! Key invariants tested:
//! - exactly one of range/list resolves; both or neither never does
//! - a resolved range always satisfies `0 < start <= end`
//! - a resolved list never contains a non-positive value

use benchmatrix_schema::{ConcurrencyError, ConcurrencySpec};
use proptest::prelude::*;

fn arb_bound() -> impl Strategy<Value = i64> {
    prop_oneof![-4i64..=0, 1i64..=4096]
}

proptest! {
    #[test]
    fn range_and_list_never_both(
        start in arb_bound(),
        end in arb_bound(),
        list in prop::collection::vec(1i64..512, 1..8),
    ) {
        let err = ConcurrencySpec::resolve(Some(start), Some(end), Some(&list)).unwrap_err();
        prop_assert_eq!(err, ConcurrencyError::RangeAndList);
    }

    #[test]
    fn resolved_range_is_ordered_and_positive(start in arb_bound(), end in arb_bound()) {
        match ConcurrencySpec::resolve(Some(start), Some(end), None) {
            Ok(ConcurrencySpec::Range { start: s, end: e }) => {
                prop_assert!(s > 0 && s <= e);
                prop_assert_eq!((i64::from(s), i64::from(e)), (start, end));
            }
            Ok(other) => prop_assert!(false, "range resolved to {:?}", other),
            Err(ConcurrencyError::InvertedRange { .. }) => prop_assert!(start > end),
            Err(ConcurrencyError::NonPositiveRange { .. }) => prop_assert!(start <= 0 || end <= 0),
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn resolved_list_is_positive(list in prop::collection::vec(-8i64..256, 1..12)) {
        let result = ConcurrencySpec::resolve(None, None, Some(&list));
        let all_positive = list.iter().all(|v| *v > 0);
        match result {
            Ok(ConcurrencySpec::List(values)) => {
                prop_assert!(all_positive);
                prop_assert_eq!(values.len(), list.len());
            }
            Ok(other) => prop_assert!(false, "list resolved to {:?}", other),
            Err(err) => {
                prop_assert!(!all_positive);
                prop_assert_eq!(err, ConcurrencyError::NonPositiveListEntry);
            }
        }
    }

    #[test]
    fn half_range_without_list_is_missing(bound in arb_bound(), which in any::<bool>()) {
        let (start, end) = if which { (Some(bound), None) } else { (None, Some(bound)) };
        let err = ConcurrencySpec::resolve(start, end, None).unwrap_err();
        prop_assert_eq!(err, ConcurrencyError::Missing);
    }
}
