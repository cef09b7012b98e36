use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use morsel_client::series::types::Metric;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

/// Same spellings the HTTP API accepts, normalized to the canonical name.
pub fn parse_metric(value: &str) -> Result<String, String> {
    Metric::parse(value)
        .map(|metric| metric.as_str().to_string())
        .ok_or_else(|| "metric must be one of: quantity, price, sales".to_string())
}

/// Extended help shown after `morsel ingest --help`.
pub const INGEST_AFTER_HELP: &str = "\
How ingest works:
  Every `*.csv` file in the data directory is read in file-name order.
  Each file needs a header row with at least these columns (any order):
    product,date,region,quantity,price

  Rows are merged, sorted by date, filtered to one product, and written
  to the output directory:
    merged_output.csv            every row of every file
    sorted.csv                   same rows, sorted by date
    filtered_<product>.csv       only the target product
    sales.csv                    sales,date,region,quantity,price

  Prices may carry a currency symbol and thousands separators
  (`$1,234.50`). Sales are price x quantity, rounded to cents.
  Ingest is all-or-nothing: any bad value aborts the run and nothing
  is written.

Configuration (flag > environment > default):
  --data-dir       MORSEL_DATA_DIR     <home>/data
  --output-dir     MORSEL_OUTPUT_DIR   <home>
  --product        MORSEL_PRODUCT      pink morsel
                   MORSEL_HOME         current directory

What to do next:
  1. Run `morsel query` to chart the derived dataset.
  2. Run `morsel serve` to answer chart requests over HTTP.
";

#[derive(Debug, Parser)]
#[command(
    name = "morsel",
    version,
    about = "morsel sales ingestion and chart queries",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge the daily sales files into the derived sales dataset
    #[command(after_long_help = INGEST_AFTER_HELP)]
    Ingest {
        /// Directory holding the daily `*.csv` files
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Directory the artifacts are written to
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Exact product name to keep (case-sensitive)
        #[arg(long)]
        product: Option<String>,
        /// Write only sales.csv, not the merged/sorted/filtered files
        #[arg(long)]
        skip_intermediates: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Chart one metric per day from the derived dataset
    Query {
        /// quantity (default), price, or sales
        #[arg(long, value_parser = parse_metric)]
        metric: Option<String>,
        /// Region name, or `all` (default); case-insensitive
        #[arg(long)]
        region: Option<String>,
        /// Start date, inclusive (YYYY-MM-DD); defaults to the first date in the data
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// End date, inclusive (YYYY-MM-DD); defaults to the last date in the data
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// Path to the derived sales.csv
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Date of the price-hike marker (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        hike_date: Option<IsoDate>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List the metrics, regions, and date range a chart can be filtered by
    Options {
        /// Path to the derived sales.csv
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Date of the price-hike marker (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        hike_date: Option<IsoDate>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Answer chart requests over HTTP until interrupted
    Serve {
        /// Path to the derived sales.csv
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind
        #[arg(long)]
        port: Option<u16>,
        /// Date of the price-hike marker (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        hike_date: Option<IsoDate>,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
