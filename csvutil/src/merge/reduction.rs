//! The reduction functions applied to a group's accumulated values.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::{CsvUtilError, CsvUtilResult};

/// A named reduction folding one field's grouped values into a single
/// output value.
///
/// The numeric reductions parse every accumulated value as a float and fail
/// on the first value that does not parse. [`Reduction::First`] and
/// [`Reduction::Last`] pass raw text through untouched, and
/// [`Reduction::Ignore`] contributes no output field at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Sum of the values.
    Sum,
    /// Smallest value; ties keep the first-seen one.
    Min,
    /// Largest value; ties keep the first-seen one.
    Max,
    /// Arithmetic mean.
    Mean,
    /// Middle value after sorting; even counts average the two middle values.
    Median,
    /// Sample standard deviation.
    Stdev,
    /// First raw value of the group.
    First,
    /// Last raw value of the group.
    Last,
    /// Drop the field entirely.
    Ignore,
}

impl FromStr for Reduction {
    type Err = CsvUtilError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "sum" => Ok(Self::Sum),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            "stdev" => Ok(Self::Stdev),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "ignore" => Ok(Self::Ignore),
            _ => Err(CsvUtilError::UnknownFunction(name.to_string())),
        }
    }
}

impl Reduction {
    /// Applies the reduction to the ordered values of one group.
    ///
    /// Returns `None` for [`Reduction::Ignore`]. `field` is only used to
    /// report which column held an unparseable value.
    pub fn apply(&self, field: usize, values: &[String]) -> CsvUtilResult<Option<String>> {
        let rendered = match self {
            Self::First => values[0].clone(),
            Self::Last => values[values.len() - 1].clone(),
            Self::Ignore => return Ok(None),
            Self::Sum => render(parse_numbers(field, values)?.iter().sum()),
            Self::Min => render(first_extremal(&parse_numbers(field, values)?, |candidate, best| {
                candidate < best
            })),
            Self::Max => render(first_extremal(&parse_numbers(field, values)?, |candidate, best| {
                candidate > best
            })),
            Self::Mean => render(mean(&parse_numbers(field, values)?)),
            Self::Median => render(median(parse_numbers(field, values)?)),
            Self::Stdev => render(sample_stdev(&parse_numbers(field, values)?)),
        };

        Ok(Some(rendered))
    }
}

/// Parses every accumulated value as a float, failing on the first value
/// that does not parse.
fn parse_numbers(field: usize, values: &[String]) -> CsvUtilResult<Vec<f64>> {
    values
        .iter()
        .map(|value| {
            value
                .parse::<f64>()
                .map_err(|_| CsvUtilError::NonNumericValue {
                    field,
                    value: value.clone(),
                })
        })
        .collect()
}

/// Renders a numeric result with the shortest round-trippable representation.
fn render(value: f64) -> String {
    value.to_string()
}

fn first_extremal(numbers: &[f64], better: impl Fn(f64, f64) -> bool) -> f64 {
    let mut best = numbers[0];
    for &candidate in &numbers[1..] {
        if better(candidate, best) {
            best = candidate;
        }
    }
    best
}

fn mean(numbers: &[f64]) -> f64 {
    numbers.iter().sum::<f64>() / numbers.len() as f64
}

fn median(mut numbers: Vec<f64>) -> f64 {
    numbers.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let len = numbers.len();
    if len % 2 == 0 {
        (numbers[len / 2 - 1] + numbers[len / 2]) / 2.0
    } else {
        numbers[len / 2]
    }
}

/// Sample standard deviation (n−1 divisor). A singleton group is treated as
/// a duplicated pair, so it yields 0 instead of failing on insufficient data.
fn sample_stdev(numbers: &[f64]) -> f64 {
    if numbers.len() == 1 {
        return 0.0;
    }

    let mean = mean(numbers);
    let variance = numbers
        .iter()
        .map(|number| (number - mean).powi(2))
        .sum::<f64>()
        / (numbers.len() - 1) as f64;
    variance.sqrt()
}
