//! Row source that yields delimiter-separated rows from a file or stdin.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{CsvUtilError, CsvUtilResult};

/// An ordered sequence of field values for one input line.
pub type Row = Vec<String>;

/// Streaming reader that yields one [`Row`] per input line.
///
/// Each line is split on the configured delimiter and every field is trimmed
/// of surrounding whitespace. The source holds only the current line in
/// memory, never the whole input.
pub struct RowSource<R> {
    reader: R,
    delimiter: String,
}

impl<R> std::fmt::Debug for RowSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowSource")
            .field("delimiter", &self.delimiter)
            .finish_non_exhaustive()
    }
}

impl RowSource<Box<dyn BufRead>> {
    /// Opens the given file, or standard input when no path is given.
    pub fn open(path: Option<&Path>, delimiter: &str) -> CsvUtilResult<Self> {
        let reader: Box<dyn BufRead> = match path {
            Some(path) => {
                let file =
                    File::open(path).map_err(|source| CsvUtilError::SourceUnavailable {
                        path: path.display().to_string(),
                        source,
                    })?;
                Box::new(BufReader::new(file))
            }
            None => Box::new(BufReader::new(io::stdin())),
        };

        Ok(Self::from_reader(reader, delimiter))
    }
}

impl<R: BufRead> RowSource<R> {
    /// Wraps an already-open buffered reader.
    pub fn from_reader(reader: R, delimiter: &str) -> Self {
        Self {
            reader,
            delimiter: delimiter.to_string(),
        }
    }

    fn parse_line(&self, line: &str) -> Row {
        line.split(self.delimiter.as_str())
            .map(|field| field.trim().to_string())
            .collect()
    }
}

impl<R: BufRead> Iterator for RowSource<R> {
    type Item = CsvUtilResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(Ok(self.parse_line(&line)))
            }
            Err(err) => Some(Err(err.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(input: &str, delimiter: &str) -> Vec<Row> {
        RowSource::from_reader(Cursor::new(input.to_string()), delimiter)
            .collect::<CsvUtilResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_splits_on_delimiter() {
        let rows = read_all("a,b,c\nd,e,f\n", ",");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let rows = read_all("  a , b\t, c \n", ",");
        assert_eq!(rows, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_multi_character_delimiter() {
        let rows = read_all("a::b::c\n", "::");
        assert_eq!(rows, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_handles_crlf_line_endings() {
        let rows = read_all("a,b\r\nc,d\r\n", ",");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_missing_trailing_newline() {
        let rows = read_all("a,b\nc,d", ",");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_blank_line_yields_single_empty_field() {
        let rows = read_all("a,b\n\nc,d\n", ",");
        assert_eq!(rows, vec![vec!["a", "b"], vec![""], vec!["c", "d"]]);
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        let rows = read_all("", ",");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_open_missing_file_is_source_unavailable() {
        let err = RowSource::open(Some(Path::new("/no/such/file.csv")), ",").unwrap_err();
        assert!(matches!(err, CsvUtilError::SourceUnavailable { .. }));
    }
}
