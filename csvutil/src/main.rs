//! CLI binary for csvutil.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use csvutil::{
    CsvUtilResult, FieldFunction, Merger, Row, RowSource, SortKey, parse_field_list, pick_fields,
    sort_rows,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Perform operations on a CSV file or input.
#[derive(Parser, Debug)]
#[command(name = "csvutil", version)]
#[command(about = "Perform operations on a CSV file or input")]
struct Args {
    #[command(subcommand)]
    operation: Operation,
}

#[derive(Subcommand, Debug)]
enum Operation {
    /// Pick a field or set of fields from each row.
    Pick {
        /// CSV input file. Default: stdin.
        filename: Option<PathBuf>,

        /// Comma-separated list of (zero-indexed) fields.
        #[arg(short, long)]
        fields: String,

        /// CSV field delimiter.
        #[arg(short, long, default_value = ",")]
        delimiter: String,
    },

    /// Merge similar sequential lines.
    Merge {
        /// CSV input file. Default: stdin.
        filename: Option<PathBuf>,

        /// Field:function merge operation for a field that is not expected
        /// to be identical across rows. Functions are: sum, min, max, mean,
        /// median, stdev, first, last, ignore. E.g., "-f 0:max". The result
        /// is appended to the output as a new field. Multiple pairs can be
        /// specified.
        #[arg(short = 'f', long = "field_function", num_args = 1..)]
        field_function: Vec<String>,

        /// CSV field delimiter.
        #[arg(short, long, default_value = ",")]
        delimiter: String,
    },

    /// Sort rows based on the specified fields.
    Sort {
        /// CSV input file. Default: stdin.
        filename: Option<PathBuf>,

        /// Zero-indexed fields on which to sort. An optional type qualifier
        /// (int, float, string) may be specified. E.g., "-f 3:float" sorts
        /// on the fourth field, interpreting elements as floating point
        /// values. "-f 3" would merely sort on the fourth field as strings
        /// by default.
        #[arg(short, long, required = true, num_args = 1..)]
        fields: Vec<String>,

        /// CSV field delimiter.
        #[arg(short, long, default_value = ",")]
        delimiter: String,
    },
}

fn main() {
    // Logs go to stderr so data output on stdout stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.operation {
        Operation::Pick {
            filename,
            fields,
            delimiter,
        } => run_pick(filename.as_deref(), &fields, &delimiter),
        Operation::Merge {
            filename,
            field_function,
            delimiter,
        } => run_merge(filename.as_deref(), &field_function, &delimiter),
        Operation::Sort {
            filename,
            fields,
            delimiter,
        } => run_sort(filename.as_deref(), &fields, &delimiter),
    }
}

fn run_pick(filename: Option<&Path>, fields: &str, delimiter: &str) -> anyhow::Result<()> {
    let fields = parse_field_list(fields)?;
    info!(source = %source_name(filename), ?fields, "picking fields");

    let source = RowSource::open(filename, delimiter)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in source {
        let picked = pick_fields(&row?, &fields)?;
        write_row(&mut out, &picked, delimiter)?;
    }

    Ok(())
}

fn run_merge(filename: Option<&Path>, specs: &[String], delimiter: &str) -> anyhow::Result<()> {
    // All specs are validated before the first row is read; numeric values
    // are only checked once the rows holding them stream through.
    let bindings = specs
        .iter()
        .map(|spec| spec.parse::<FieldFunction>())
        .collect::<CsvUtilResult<Vec<_>>>()?;
    info!(
        source = %source_name(filename),
        bindings = bindings.len(),
        "merging sequential rows"
    );

    let source = RowSource::open(filename, delimiter)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut merger = Merger::new(bindings);
    for row in source {
        if let Some(merged) = merger.push(row?)? {
            write_row(&mut out, &merged, delimiter)?;
        }
    }
    if let Some(merged) = merger.finish()? {
        write_row(&mut out, &merged, delimiter)?;
    }

    Ok(())
}

fn run_sort(filename: Option<&Path>, specs: &[String], delimiter: &str) -> anyhow::Result<()> {
    let keys = specs
        .iter()
        .map(|spec| spec.parse::<SortKey>())
        .collect::<CsvUtilResult<Vec<_>>>()?;
    info!(source = %source_name(filename), keys = keys.len(), "sorting rows");

    let mut rows = RowSource::open(filename, delimiter)?.collect::<CsvUtilResult<Vec<_>>>()?;
    sort_rows(&mut rows, &keys)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in &rows {
        write_row(&mut out, row, delimiter)?;
    }

    Ok(())
}

fn write_row(out: &mut impl Write, row: &Row, delimiter: &str) -> io::Result<()> {
    writeln!(out, "{}", row.join(delimiter))
}

fn source_name(filename: Option<&Path>) -> String {
    match filename {
        Some(path) => path.display().to_string(),
        None => "stdin".to_string(),
    }
}
