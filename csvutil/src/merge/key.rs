//! Group-boundary key: a row projected onto its non-aggregated fields.

use std::collections::HashSet;

use crate::source::Row;

/// The projection of a row onto every field not selected for aggregation,
/// in original left-to-right order.
///
/// Two rows belong to the same group iff their comparable keys are equal.
/// The key is only ever compared against the immediately preceding row's
/// key; it is never hashed or kept in a lookup table of all groups seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparableKey {
    fields: Vec<String>,
}

impl ComparableKey {
    /// Projects `row` onto all indices not in `aggregated`.
    pub fn project(row: &Row, aggregated: &HashSet<usize>) -> Self {
        let fields = row
            .iter()
            .enumerate()
            .filter(|(index, _)| !aggregated.contains(index))
            .map(|(_, field)| field.clone())
            .collect();

        Self { fields }
    }

    /// Consumes the key, returning its fields as the base of an output row.
    pub fn into_row(self) -> Row {
        self.fields
    }
}
