//! Parsing of user-supplied `field:function` bindings.

use std::str::FromStr;

use crate::error::CsvUtilError;
use crate::merge::Reduction;

/// A validated binding of one field index to a reduction function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldFunction {
    /// Zero-indexed field position the reduction is applied to.
    pub field: usize,
    /// Reduction folded over the field's grouped values.
    pub reduction: Reduction,
}

impl FromStr for FieldFunction {
    type Err = CsvUtilError;

    /// Parses a spec of the form `<non-negative integer>:<lowercase identifier>`.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let malformed = || CsvUtilError::MalformedSpec(spec.to_string());

        let (field, name) = spec.split_once(':').ok_or_else(malformed)?;
        if field.is_empty() || !field.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(malformed());
        }
        if name.is_empty() || !name.bytes().all(|byte| byte.is_ascii_lowercase()) {
            return Err(malformed());
        }

        let field = field.parse::<usize>().map_err(|_| malformed())?;
        let reduction = name.parse::<Reduction>()?;

        Ok(Self { field, reduction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_field_and_function() {
        let binding: FieldFunction = "2:sum".parse().unwrap();
        assert_eq!(binding.field, 2);
        assert_eq!(binding.reduction, Reduction::Sum);
    }

    #[test]
    fn test_missing_colon_is_malformed() {
        let err = "2sum".parse::<FieldFunction>().unwrap_err();
        assert!(matches!(err, CsvUtilError::MalformedSpec(spec) if spec == "2sum"));
    }

    #[test]
    fn test_non_numeric_field_is_malformed() {
        assert!(matches!(
            "x:sum".parse::<FieldFunction>().unwrap_err(),
            CsvUtilError::MalformedSpec(_)
        ));
        assert!(matches!(
            "-1:sum".parse::<FieldFunction>().unwrap_err(),
            CsvUtilError::MalformedSpec(_)
        ));
    }

    #[test]
    fn test_empty_parts_are_malformed() {
        for spec in [":sum", "2:", ":"] {
            assert!(matches!(
                spec.parse::<FieldFunction>().unwrap_err(),
                CsvUtilError::MalformedSpec(_)
            ));
        }
    }

    #[test]
    fn test_uppercase_function_is_malformed() {
        // The grammar only admits lowercase identifiers.
        assert!(matches!(
            "2:SUM".parse::<FieldFunction>().unwrap_err(),
            CsvUtilError::MalformedSpec(_)
        ));
    }

    #[test]
    fn test_unknown_function_is_reported_by_name() {
        let err = "2:product".parse::<FieldFunction>().unwrap_err();
        assert!(matches!(err, CsvUtilError::UnknownFunction(name) if name == "product"));
    }
}
