//! Multi-key stable sort over fully collected rows.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::{CsvUtilError, CsvUtilResult};
use crate::source::Row;

/// Scalar interpretation of a sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortType {
    /// Compare the field text directly.
    #[default]
    String,
    /// Parse the field as a signed integer.
    Int,
    /// Parse the field as a float.
    Float,
}

/// A single sort key: a zero-indexed field plus its scalar interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Zero-indexed field position to sort on.
    pub field: usize,
    /// How field text is interpreted for comparison.
    pub sort_type: SortType,
}

impl FromStr for SortKey {
    type Err = CsvUtilError;

    /// Parses `<field>[:<type>]` where type is `string` (default), `int`,
    /// or `float`.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let malformed = || CsvUtilError::MalformedSpec(spec.to_string());

        let (field, sort_type) = match spec.split_once(':') {
            None => (spec, SortType::String),
            Some((field, "string")) => (field, SortType::String),
            Some((field, "int")) => (field, SortType::Int),
            Some((field, "float")) => (field, SortType::Float),
            Some(_) => return Err(malformed()),
        };

        if field.is_empty() || !field.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(malformed());
        }
        let field = field.parse::<usize>().map_err(|_| malformed())?;

        Ok(Self { field, sort_type })
    }
}

/// Stable-sorts `rows` by each key in turn.
///
/// Keys are applied in the order given, each as its own stable pass, so a
/// later key re-sorts the output of the earlier ones and rows equal under
/// the last key keep their previously established order.
pub fn sort_rows(rows: &mut Vec<Row>, keys: &[SortKey]) -> CsvUtilResult<()> {
    for key in keys {
        match key.sort_type {
            SortType::String => sort_by_parsed(
                rows,
                key.field,
                |_, text| Ok(text.to_string()),
                |a: &String, b| a.cmp(b),
            )?,
            SortType::Int => sort_by_parsed(rows, key.field, parse_int, |a: &i64, b| a.cmp(b))?,
            SortType::Float => sort_by_parsed(rows, key.field, parse_float, |a: &f64, b| {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            })?,
        }
    }
    Ok(())
}

/// Decorate-sort-undecorate: every field is parsed up front so a bad value
/// aborts before any reordering is visible.
fn sort_by_parsed<K>(
    rows: &mut Vec<Row>,
    field: usize,
    parse: impl Fn(usize, &str) -> CsvUtilResult<K>,
    compare: impl Fn(&K, &K) -> Ordering,
) -> CsvUtilResult<()> {
    let mut decorated = Vec::with_capacity(rows.len());
    for row in std::mem::take(rows) {
        let text = row
            .get(field)
            .map(String::as_str)
            .ok_or(CsvUtilError::FieldIndexOutOfRange {
                index: field,
                width: row.len(),
            })?;
        let key = parse(field, text)?;
        decorated.push((key, row));
    }

    decorated.sort_by(|(a, _), (b, _)| compare(a, b));
    rows.extend(decorated.into_iter().map(|(_, row)| row));
    Ok(())
}

fn parse_int(field: usize, text: &str) -> CsvUtilResult<i64> {
    text.parse().map_err(|_| CsvUtilError::NonNumericValue {
        field,
        value: text.to_string(),
    })
}

fn parse_float(field: usize, text: &str) -> CsvUtilResult<f64> {
    text.parse().map_err(|_| CsvUtilError::NonNumericValue {
        field,
        value: text.to_string(),
    })
}
