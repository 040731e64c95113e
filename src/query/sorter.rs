//! Result sorting for query execution
//!
//! Multi-key, stable and deterministic.

use std::cmp::Ordering;

use super::descriptor::{SortDirection, SortKey};
use crate::filter::Coerced;
use crate::record::{resolve_field, Record};

/// Sorts matched records
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts records according to the sort keys.
    ///
    /// Keys are coerced once per record, then compared. The sort is stable,
    /// so records tied on every key keep their input order.
    pub fn sort(records: &mut Vec<&Record>, keys: &[SortKey]) {
        if keys.is_empty() || records.len() < 2 {
            return;
        }

        let mut decorated: Vec<(Vec<Option<Coerced>>, &Record)> = records
            .iter()
            .map(|record| {
                let values = keys
                    .iter()
                    .map(|key| resolve_field(record, &key.path).and_then(Coerced::from_value))
                    .collect();
                (values, *record)
            })
            .collect();

        decorated.sort_by(|(a, _), (b, _)| {
            keys.iter()
                .zip(a.iter().zip(b.iter()))
                .map(|(key, (a, b))| Self::compare_values(a.as_ref(), b.as_ref(), key.direction))
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        *records = decorated.into_iter().map(|(_, record)| record).collect();
    }

    /// Compares two coerced values for one key.
    ///
    /// Ordering rules:
    /// - same kind: natural ordering, inverted for `desc`
    /// - different kinds: Number < DateTime < Text, for either direction
    /// - absent after everything, for either direction
    pub fn compare_values(
        a: Option<&Coerced>,
        b: Option<&Coerced>,
        direction: SortDirection,
    ) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => match a.compare(b) {
                Some(ordering) => match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                },
                None => a.kind().cmp(&b.kind()),
            },
        }
    }
}
