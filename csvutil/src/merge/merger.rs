//! Adjacent-row merge engine: accumulates groups and flushes reductions.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{CsvUtilError, CsvUtilResult};
use crate::merge::{ComparableKey, FieldFunction};
use crate::source::Row;

/// State machine that merges maximal runs of adjacent rows sharing a
/// comparable key.
///
/// Rows are fed in one at a time with [`Merger::push`]; a row whose key
/// differs from the open group's key closes that group out and starts a new
/// one. End of input is signalled with [`Merger::finish`]. Memory is bounded
/// by the longest contiguous run of key-equal rows, not by the input size.
pub struct Merger {
    /// Bindings applied at flush, in the order they were specified.
    field_functions: Vec<FieldFunction>,
    /// Field indices removed from comparison and accumulated instead.
    aggregated: HashSet<usize>,
    /// The open group, if any.
    group: Option<OpenGroup>,
}

/// The open group: its comparable key plus the ordered raw values seen so
/// far for every aggregated field.
#[derive(Debug)]
struct OpenGroup {
    key: ComparableKey,
    values: HashMap<usize, Vec<String>>,
    rows: usize,
}

impl Merger {
    /// Creates a merge engine over the given bindings.
    ///
    /// A later binding for an already-bound field replaces the earlier one
    /// while keeping its position in the output order. With no bindings at
    /// all the engine degenerates to adjacent-equality deduplication.
    pub fn new(field_functions: Vec<FieldFunction>) -> Self {
        let field_functions = dedup_bindings(field_functions);
        let aggregated = field_functions
            .iter()
            .map(|binding| binding.field)
            .collect();

        Self {
            field_functions,
            aggregated,
            group: None,
        }
    }

    /// Feeds one row into the engine.
    ///
    /// Returns the previous group's output row when `row` closes it out,
    /// `None` while the current group keeps accumulating.
    pub fn push(&mut self, row: Row) -> CsvUtilResult<Option<Row>> {
        let key = ComparableKey::project(&row, &self.aggregated);

        if let Some(group) = &mut self.group {
            if group.key == key {
                for &field in &self.aggregated {
                    let value = field_value(&row, field)?;
                    group.values.entry(field).or_default().push(value.clone());
                }
                group.rows += 1;
                return Ok(None);
            }
        } else {
            self.group = Some(self.open_group(key, &row)?);
            return Ok(None);
        }

        // Key changed: close the previous group, then start a new one.
        let flushed = self.finish()?;
        self.group = Some(self.open_group(key, &row)?);
        Ok(flushed)
    }

    /// Flushes the open group at end of input, if one exists.
    ///
    /// An input with no rows at all produces no output.
    pub fn finish(&mut self) -> CsvUtilResult<Option<Row>> {
        match self.group.take() {
            Some(group) => Ok(Some(self.flush_group(group)?)),
            None => Ok(None),
        }
    }

    fn open_group(&self, key: ComparableKey, row: &Row) -> CsvUtilResult<OpenGroup> {
        let mut values = HashMap::with_capacity(self.aggregated.len());
        for &field in &self.aggregated {
            values.insert(field, vec![field_value(row, field)?.clone()]);
        }

        Ok(OpenGroup {
            key,
            values,
            rows: 1,
        })
    }

    /// Closes out a group: the comparable key becomes the base output row
    /// and each binding's rendered reduction is appended in binding order.
    fn flush_group(&self, group: OpenGroup) -> CsvUtilResult<Row> {
        let OpenGroup { key, values, rows } = group;

        let mut output = key.into_row();
        for binding in &self.field_functions {
            let accumulated = &values[&binding.field];
            if let Some(rendered) = binding.reduction.apply(binding.field, accumulated)? {
                output.push(rendered);
            }
        }

        debug!(rows, width = output.len(), "flushed group");
        Ok(output)
    }
}

fn field_value(row: &Row, field: usize) -> CsvUtilResult<&String> {
    row.get(field).ok_or(CsvUtilError::FieldIndexOutOfRange {
        index: field,
        width: row.len(),
    })
}

/// Later bindings for the same field win, keeping the original position.
fn dedup_bindings(field_functions: Vec<FieldFunction>) -> Vec<FieldFunction> {
    let mut deduped: Vec<FieldFunction> = Vec::with_capacity(field_functions.len());
    for binding in field_functions {
        match deduped
            .iter_mut()
            .find(|existing| existing.field == binding.field)
        {
            Some(existing) => existing.reduction = binding.reduction,
            None => deduped.push(binding),
        }
    }
    deduped
}
