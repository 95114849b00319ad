//! Symmetric compatibility lookups.
//!
//! Records are keyed by the unordered module pair, so a judgment stored as
//! `(A, B)` answers a lookup for `(B, A)` as well. There is no inference:
//! knowing `(A, B)` says nothing about `(B, C)` or `(A, C)`.

use std::collections::BTreeMap;

use modgraph_core::model::{CompatibilityRecord, pair_key};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompatibilityMatrix {
    records: BTreeMap<(String, String), CompatibilityRecord>,
}

impl CompatibilityMatrix {
    /// Build a matrix from a record list. A later record for the same pair
    /// replaces an earlier one.
    #[must_use]
    pub fn from_records(records: &[CompatibilityRecord]) -> Self {
        let mut matrix = Self::default();
        for record in records {
            matrix.upsert(record.clone());
        }
        matrix
    }

    /// Insert or replace the record for its unordered pair.
    ///
    /// Returns the record it replaced, if any.
    pub fn upsert(&mut self, record: CompatibilityRecord) -> Option<CompatibilityRecord> {
        self.records.insert(record.pair_key(), record)
    }

    /// Look up the judgment for `a` and `b` in either order.
    #[must_use]
    pub fn check(&self, a: &str, b: &str) -> Option<&CompatibilityRecord> {
        self.records.get(&pair_key(a, b))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, ordered by canonical pair.
    pub fn records(&self) -> impl Iterator<Item = &CompatibilityRecord> {
        self.records.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgraph_core::model::CompatibilityStatus;

    #[test]
    fn lookup_is_symmetric() {
        let matrix = CompatibilityMatrix::from_records(&[CompatibilityRecord::new(
            "crm",
            "billing",
            CompatibilityStatus::Compatible,
        )]);

        let forward = matrix.check("crm", "billing").expect("forward");
        let backward = matrix.check("billing", "crm").expect("backward");
        assert_eq!(forward, backward);
    }

    #[test]
    fn missing_pair_is_none() {
        let matrix = CompatibilityMatrix::from_records(&[CompatibilityRecord::new(
            "a",
            "b",
            CompatibilityStatus::Compatible,
        )]);
        assert!(matrix.check("b", "c").is_none());
        assert!(matrix.check("a", "c").is_none());
    }

    #[test]
    fn upsert_replaces_reversed_pair() {
        let mut matrix = CompatibilityMatrix::from_records(&[CompatibilityRecord::new(
            "a",
            "b",
            CompatibilityStatus::Testing,
        )]);

        let previous = matrix.upsert(
            CompatibilityRecord::new("b", "a", CompatibilityStatus::Incompatible)
                .with_notes("shared table name"),
        );

        assert_eq!(previous.map(|r| r.status), Some(CompatibilityStatus::Testing));
        assert_eq!(matrix.len(), 1);
        let current = matrix.check("a", "b").expect("record");
        assert_eq!(current.status, CompatibilityStatus::Incompatible);
        assert_eq!(current.notes.as_deref(), Some("shared table name"));
    }

    #[test]
    fn later_duplicate_in_input_wins() {
        let matrix = CompatibilityMatrix::from_records(&[
            CompatibilityRecord::new("a", "b", CompatibilityStatus::Unknown),
            CompatibilityRecord::new("b", "a", CompatibilityStatus::Partial),
        ]);
        assert_eq!(matrix.len(), 1);
        assert_eq!(
            matrix.check("a", "b").map(|r| r.status),
            Some(CompatibilityStatus::Partial)
        );
    }
}
