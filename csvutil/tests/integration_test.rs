//! Integration tests for the csvutil crate.
//!
//! These tests drive the full pipeline the way the binary does: rows are
//! parsed from an in-memory reader by `RowSource` and fed through an
//! operation, and the output rows are joined back into lines.

use std::io::Cursor;

use csvutil::{
    CsvUtilError, CsvUtilResult, FieldFunction, Merger, Row, RowSource, SortKey, parse_field_list,
    pick_fields, sort_rows,
};

fn merge_lines(input: &str, delimiter: &str, specs: &[&str]) -> CsvUtilResult<Vec<String>> {
    let bindings = specs
        .iter()
        .map(|spec| spec.parse::<FieldFunction>())
        .collect::<CsvUtilResult<Vec<_>>>()?;

    let source = RowSource::from_reader(Cursor::new(input.to_string()), delimiter);
    let mut merger = Merger::new(bindings);
    let mut lines = Vec::new();
    for row in source {
        if let Some(merged) = merger.push(row?)? {
            lines.push(merged.join(delimiter));
        }
    }
    if let Some(merged) = merger.finish()? {
        lines.push(merged.join(delimiter));
    }

    Ok(lines)
}

fn read_rows(input: &str, delimiter: &str) -> Vec<Row> {
    RowSource::from_reader(Cursor::new(input.to_string()), delimiter)
        .collect::<CsvUtilResult<Vec<_>>>()
        .unwrap()
}

#[test]
fn test_merge_sums_adjacent_groups() {
    let lines = merge_lines("a,1,10\na,1,20\nb,2,30\n", ",", &["2:sum"]).unwrap();
    assert_eq!(lines, vec!["a,1,30", "b,2,30"]);
}

#[test]
fn test_merge_output_row_count_equals_maximal_run_count() {
    // Five maximal runs of key-equal rows, two of them for the same key.
    let input = "x,1\nx,2\ny,3\nx,4\nx,5\nz,6\ny,7\n";
    let lines = merge_lines(input, ",", &["1:sum"]).unwrap();
    assert_eq!(lines, vec!["x,3", "y,3", "x,9", "z,6", "y,7"]);
}

#[test]
fn test_merge_with_multiple_bindings_appends_in_spec_order() {
    let input = "host,10,200\nhost,20,100\n";
    let lines = merge_lines(input, ",", &["2:min", "1:max"]).unwrap();
    assert_eq!(lines, vec!["host,100,20"]);
}

#[test]
fn test_merge_without_bindings_deduplicates() {
    let input = "a,b\na,b\nc,d\na,b\n";
    let lines = merge_lines(input, ",", &[]).unwrap();
    assert_eq!(lines, vec!["a,b", "c,d", "a,b"]);
}

#[test]
fn test_merge_is_idempotent() {
    let first = merge_lines("a,1,10\na,1,20\nb,2,30\n", ",", &["2:sum"]).unwrap();
    let rerun_input = first.join("\n") + "\n";
    let second = merge_lines(&rerun_input, ",", &["2:sum"]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_merge_respects_alternate_delimiter() {
    let lines = merge_lines("a|1|10\na|1|20\n", "|", &["2:mean"]).unwrap();
    assert_eq!(lines, vec!["a|1|15"]);
}

#[test]
fn test_merge_first_last_keep_non_numeric_text() {
    let input = "job,start,ok\njob,middle,retry\njob,end,failed\n";
    let lines = merge_lines(input, ",", &["1:first", "2:last"]).unwrap();
    assert_eq!(lines, vec!["job,start,failed"]);
}

#[test]
fn test_merge_stdev_on_singleton_group_is_zero() {
    let lines = merge_lines("a,5\n", ",", &["1:stdev"]).unwrap();
    assert_eq!(lines, vec!["a,0"]);
}

#[test]
fn test_merge_empty_input_emits_nothing() {
    let lines = merge_lines("", ",", &["2:sum"]).unwrap();
    assert!(lines.is_empty());
}

#[test]
fn test_merge_out_of_range_binding_fails_before_any_output() {
    let err = merge_lines("a,1\nb,2\n", ",", &["9:max"]).unwrap_err();
    assert!(matches!(
        err,
        CsvUtilError::FieldIndexOutOfRange { index: 9, .. }
    ));
}

#[test]
fn test_merge_bad_spec_fails_before_reading_rows() {
    let err = merge_lines("a,1\n", ",", &["nonsense"]).unwrap_err();
    assert!(matches!(err, CsvUtilError::MalformedSpec(_)));

    let err = merge_lines("a,1\n", ",", &["0:frobnicate"]).unwrap_err();
    assert!(matches!(err, CsvUtilError::UnknownFunction(_)));
}

#[test]
fn test_pick_then_merge_pipeline() {
    // Project away the noisy middle field, then merge on what remains.
    let rows = read_rows("a,junk1,1\na,junk2,2\nb,junk3,3\n", ",");
    let fields = parse_field_list("0,2").unwrap();
    let picked: Vec<String> = rows
        .iter()
        .map(|row| pick_fields(row, &fields).unwrap().join(","))
        .collect();
    assert_eq!(picked, vec!["a,1", "a,2", "b,3"]);

    let lines = merge_lines(&(picked.join("\n") + "\n"), ",", &["1:sum"]).unwrap();
    assert_eq!(lines, vec!["a,3", "b,3"]);
}

#[test]
fn test_sort_then_merge_groups_globally() {
    // Sorting first makes equal keys adjacent, so merge behaves like a
    // global group-by for this input.
    let mut rows = read_rows("b,1\na,2\nb,3\na,4\n", ",");
    let keys = vec!["0".parse::<SortKey>().unwrap()];
    sort_rows(&mut rows, &keys).unwrap();

    let input: String = rows
        .iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
        + "\n";
    let lines = merge_lines(&input, ",", &["1:sum"]).unwrap();
    assert_eq!(lines, vec!["a,6", "b,4"]);
}

#[test]
fn test_source_trims_fields_before_merging() {
    let lines = merge_lines("a , 1 , 10\na,1,  20\n", ",", &["2:sum"]).unwrap();
    assert_eq!(lines, vec!["a,1,30"]);
}
