//! Adjacent-row merge: group-boundary detection plus per-field reductions.
//!
//! The engine groups consecutive rows that are equal on every field not
//! bound to a reduction, folds each bound reduction over the grouped values,
//! and emits one output row per group. Grouping is strictly adjacent: rows
//! with an identical key separated by a different row form separate groups.

mod key;
mod merger;
mod reduction;
mod spec;

pub use key::ComparableKey;
pub use merger::Merger;
pub use reduction::Reduction;
pub use spec::FieldFunction;
