//! Field-selection operation: project each row onto a list of fields.

use crate::error::{CsvUtilError, CsvUtilResult};
use crate::source::Row;

/// Parses a comma-separated list of zero-indexed fields, e.g. `0,2,1`.
pub fn parse_field_list(spec: &str) -> CsvUtilResult<Vec<usize>> {
    spec.split(',')
        .map(|field| {
            let field = field.trim();
            if field.is_empty() || !field.bytes().all(|byte| byte.is_ascii_digit()) {
                return Err(CsvUtilError::MalformedSpec(spec.to_string()));
            }
            field
                .parse::<usize>()
                .map_err(|_| CsvUtilError::MalformedSpec(spec.to_string()))
        })
        .collect()
}

/// Projects `row` onto `fields` in the order listed. Repeats are allowed.
pub fn pick_fields(row: &Row, fields: &[usize]) -> CsvUtilResult<Row> {
    fields
        .iter()
        .map(|&field| {
            row.get(field)
                .cloned()
                .ok_or(CsvUtilError::FieldIndexOutOfRange {
                    index: field,
                    width: row.len(),
                })
        })
        .collect()
}
