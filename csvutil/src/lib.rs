//! csvutil - operations on delimiter-separated text.
//!
//! Rows are read one line at a time from a file or standard input, split on
//! a configurable delimiter, and fed through one of three operations:
//!
//! - `pick` projects each row onto a list of zero-indexed fields.
//! - `merge` folds maximal runs of adjacent rows that agree on every
//!   non-aggregated field into a single output row, applying per-field
//!   reduction functions to the values that differ.
//! - `sort` stable-sorts the whole input key-by-key.
//!
//! The merge engine is streaming and single-pass: it holds one open group
//! at a time, so memory is bounded by the longest run of mergeable rows,
//! not by the input size.
//!
//! # Usage
//!
//! ```
//! use csvutil::{FieldFunction, Merger, Row};
//!
//! # fn main() -> csvutil::CsvUtilResult<()> {
//! let bindings = vec!["2:sum".parse::<FieldFunction>()?];
//! let mut merger = Merger::new(bindings);
//!
//! let mut merged = Vec::new();
//! for fields in [["a", "1", "10"], ["a", "1", "20"], ["b", "2", "30"]] {
//!     let row: Row = fields.iter().map(|field| field.to_string()).collect();
//!     merged.extend(merger.push(row)?);
//! }
//! merged.extend(merger.finish()?);
//!
//! assert_eq!(merged, vec![vec!["a", "1", "30"], vec!["b", "2", "30"]]);
//! # Ok(())
//! # }
//! ```

mod error;
mod merge;
mod pick;
mod sort;
mod source;

pub use error::{CsvUtilError, CsvUtilResult};
pub use merge::{ComparableKey, FieldFunction, Merger, Reduction};
pub use pick::{parse_field_list, pick_fields};
pub use sort::{SortKey, SortType, sort_rows};
pub use source::{Row, RowSource};
