// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::positions::{ExactPosition, InBetweenPosition};
use crate::record::{InfoValue, VariantRecord};

/// INFO field with the confidence interval around the start position.
pub const START_INTERVAL_TAG: &str = "CIPOS";
/// INFO field with the confidence interval around the end position.
pub const END_INTERVAL_TAG: &str = "CIEND";

/// Widen `base` by the offsets stored in the INFO field `tag`.
///
/// Returns `None` if the record has no such field. A field that does not
/// consist of exactly two integers is treated the same way.
pub fn resolve(record: &VariantRecord, tag: &str, base: &ExactPosition) -> Option<InBetweenPosition> {
    match record.info(tag) {
        None => None,
        Some(InfoValue::Integer(offsets)) => match offsets.as_slice() {
            [Some(d0), Some(d1)] => Some(widen(base, *d0, *d1)),
            _ => {
                debug!(
                    "Ignoring malformed {} at {}:{}: expected two offsets.",
                    tag,
                    record.chrom,
                    record.pos
                );
                None
            }
        },
        Some(_) => {
            debug!(
                "Ignoring {} at {}:{}: not an integer field.",
                tag, record.chrom, record.pos
            );
            None
        }
    }
}

/// Offsets are applied outwards regardless of their sign, so both `-50,75`
/// and `50,75` describe the window 50 bases before to 75 bases after `base`.
pub fn widen(base: &ExactPosition, d0: i32, d1: i32) -> InBetweenPosition {
    let before = base.position().saturating_sub(d0.unsigned_abs() as u64);
    let after = base.position() + d1.unsigned_abs() as u64;
    InBetweenPosition::new(
        ExactPosition::new(base.chromosome(), before),
        ExactPosition::new(base.chromosome(), after),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(tag: &str, value: InfoValue) -> VariantRecord {
        let mut record = VariantRecord::default();
        record.chrom = "chr1".to_owned();
        record.pos = 1000;
        record.info.insert(tag.to_owned(), value);
        record
    }

    #[test]
    fn test_widen() {
        let base = ExactPosition::new("chr1", 1000);
        let interval = widen(&base, -50, 75);
        assert_eq!(interval.before(), &ExactPosition::new("chr1", 950));
        assert_eq!(interval.after(), &ExactPosition::new("chr1", 1075));
    }

    #[test]
    fn test_widen_clamps_at_zero() {
        let base = ExactPosition::new("chr1", 10);
        assert_eq!(widen(&base, -50, 0).before().position(), 0);
    }

    #[test]
    fn test_resolve_present() {
        let record = record_with(
            START_INTERVAL_TAG,
            InfoValue::Integer(vec![Some(-50), Some(75)]),
        );
        let base = ExactPosition::new("chr1", 1000);
        let interval = resolve(&record, START_INTERVAL_TAG, &base).unwrap();
        assert_eq!(interval.before().position(), 950);
        assert_eq!(interval.after().position(), 1075);
        assert_eq!(interval.after().chromosome(), "chr1");
    }

    #[test]
    fn test_resolve_absent() {
        let record = record_with(
            START_INTERVAL_TAG,
            InfoValue::Integer(vec![Some(-50), Some(75)]),
        );
        let base = ExactPosition::new("chr1", 1000);
        assert!(resolve(&record, END_INTERVAL_TAG, &base).is_none());
    }

    #[test]
    fn test_resolve_malformed() {
        let base = ExactPosition::new("chr1", 1000);
        for value in vec![
            InfoValue::Integer(vec![Some(-50)]),
            InfoValue::Integer(vec![Some(-50), None]),
            InfoValue::Integer(vec![Some(-50), Some(10), Some(20)]),
            InfoValue::Float(vec![Some(-50.0), Some(75.0)]),
        ] {
            let record = record_with(END_INTERVAL_TAG, value);
            assert!(resolve(&record, END_INTERVAL_TAG, &base).is_none());
        }
    }
}
