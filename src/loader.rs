//! Dataset loading and filtering.
//!
//! Resolves a region to its CSV file, parses the start-time column, derives
//! the month and weekday name columns, and applies the requested filters.
//! Nothing here mutates shared state; each load produces a fresh DataFrame
//! owned by one analysis run.

use crate::config::DataSources;
use crate::error::{ExplorerError, Result, ResultExt};
use crate::selector::FilterRequest;
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Source column names shared across the regional CSVs.
pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns derived from `Start Time` during load.
pub const MONTH_COL: &str = "Month";
pub const DAY_COL: &str = "Day";

/// Timestamp formats accepted in the start-time column. Values matching
/// none of these become null rather than failing the load.
const START_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
];

/// Loads a region's trip records and applies the requested filters.
pub struct DatasetLoader<'a> {
    sources: &'a DataSources,
}

impl<'a> DatasetLoader<'a> {
    pub fn new(sources: &'a DataSources) -> Self {
        Self { sources }
    }

    /// Load the region named by `request`, derive the month and day
    /// columns, and keep only rows matching the month/day filters.
    ///
    /// The two filters are independent and compose with AND semantics.
    pub fn load(&self, request: &FilterRequest) -> Result<DataFrame> {
        let path = self
            .sources
            .resolve(&request.region)
            .ok_or_else(|| ExplorerError::RegionNotConfigured(request.region.clone()))?;
        info!(region = %request.region, path = %path.display(), "loading dataset");

        let df = read_csv(path)?;
        let mut df = derive_time_columns(df)?;
        if let Some(month) = &request.month {
            df = filter_equals(&df, MONTH_COL, month)?;
        }
        if let Some(day) = &request.day {
            df = filter_equals(&df, DAY_COL, day)?;
        }
        debug!(rows = df.height(), cols = df.width(), "dataset ready");
        Ok(df)
    }
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .context(format!("Reading {}", path.display()))
}

/// Parse `Start Time`, re-type it as a millisecond datetime column, and
/// append the derived `Month` and `Day` name columns.
pub fn derive_time_columns(mut df: DataFrame) -> Result<DataFrame> {
    let raw = df.column(START_TIME)?.as_materialized_series().clone();
    let parsed = parse_start_times(&raw)?;

    let millis: Vec<Option<i64>> = parsed
        .iter()
        .map(|opt| opt.map(|dt| dt.and_utc().timestamp_millis()))
        .collect();
    let months: Vec<Option<String>> = parsed
        .iter()
        .map(|opt| opt.map(|dt| dt.format("%B").to_string()))
        .collect();
    let days: Vec<Option<String>> = parsed
        .iter()
        .map(|opt| opt.map(|dt| dt.format("%A").to_string()))
        .collect();

    let start = Series::new(START_TIME.into(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    df.replace(START_TIME, start)?;
    df.with_column(Series::new(MONTH_COL.into(), months))?;
    df.with_column(Series::new(DAY_COL.into(), days))?;
    Ok(df)
}

fn parse_start_times(series: &Series) -> Result<Vec<Option<NaiveDateTime>>> {
    let values = series.str()?;
    let mut parsed = Vec::with_capacity(values.len());
    for opt in values.into_iter() {
        parsed.push(opt.and_then(parse_timestamp));
    }
    Ok(parsed)
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

/// Keep rows whose string `column` equals `value`. Nulls never match.
pub fn filter_equals(df: &DataFrame, column: &str, value: &str) -> Result<DataFrame> {
    let strings = df.column(column)?.as_materialized_series().str()?;
    let mask_values: Vec<bool> = strings.into_iter().map(|v| v == Some(value)).collect();
    let mask = BooleanChunked::from_slice("mask".into(), &mask_values);
    Ok(df.filter(&mask)?)
}
