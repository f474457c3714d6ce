//! Descriptive-statistics reports over a filtered dataset.
//!
//! Four report generators run in a fixed order: travel times, stations,
//! trip duration, user demographics. Computation is pure (`&DataFrame` in,
//! report struct out) so every report is testable without a console; the
//! engine wraps each one with wall-clock timing and a trailing separator.
//! Empty datasets and absent optional columns degrade to missing fields,
//! never to errors.

mod duration;
mod stations;
mod temporal;
mod users;

pub use duration::{DurationReport, trip_duration_report};
pub use stations::{StationReport, station_report};
pub use temporal::{TemporalReport, temporal_report};
pub use users::{BirthYearStats, CountEntry, UserStatsReport, user_stats_report};

use crate::console::{Console, separator_line};
use crate::error::Result;
use crate::selector::{FilterRequest, TemporalMode};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// A printable statistics report.
pub trait Report {
    /// Header line announcing the calculation.
    const TITLE: &'static str;

    /// The user-facing lines of this report. Lines for missing data are
    /// simply absent.
    fn lines(&self) -> Vec<String>;
}

/// Runs the four statistic reports in their fixed order.
pub struct StatisticsEngine;

impl StatisticsEngine {
    /// Compute and print all four reports, returning the structured bundle.
    pub fn run(console: &mut dyn Console, df: &DataFrame) -> Result<ReportBundle> {
        let temporal = run_report(console, df, temporal_report)?;
        let stations = run_report(console, df, station_report)?;
        let duration = run_report(console, df, trip_duration_report)?;
        let users = run_report(console, df, user_stats_report)?;
        Ok(ReportBundle {
            temporal,
            stations,
            duration,
            users,
        })
    }
}

fn run_report<R, F>(console: &mut dyn Console, df: &DataFrame, compute: F) -> Result<R>
where
    R: Report,
    F: FnOnce(&DataFrame) -> Result<R>,
{
    console.write_line(R::TITLE);
    let started = Instant::now();
    let report = compute(df)?;
    for line in report.lines() {
        console.write_line(&line);
    }
    console.write_line(&format!(
        "\nThis took {:.4} seconds.",
        started.elapsed().as_secs_f64()
    ));
    console.write_line(&separator_line());
    Ok(report)
}

/// The four reports of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBundle {
    pub temporal: TemporalReport,
    pub stations: StationReport,
    pub duration: DurationReport,
    pub users: UserStatsReport,
}

/// A serializable record of one analysis run: the applied filters plus the
/// four reports. Written to disk with `--emit-report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Timestamp when the report was generated.
    pub generated_at: String,
    pub region: String,
    pub mode: TemporalMode,
    pub month: Option<String>,
    pub day: Option<String>,
    /// Rows remaining after filtering.
    pub rows: usize,
    pub reports: ReportBundle,
}

impl RunReport {
    pub fn new(request: &FilterRequest, rows: usize, reports: ReportBundle) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            region: request.region.clone(),
            mode: request.mode,
            month: request.month.clone(),
            day: request.day.clone(),
            rows,
            reports,
        }
    }

    /// Write the report as pretty JSON to `<output_dir>/<region>_report.json`.
    pub fn write_to(&self, output_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)?;
        let stem = self.region.to_lowercase().replace(' ', "_");
        let path = output_dir.join(format!("{stem}_report.json"));
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        info!(path = %path.display(), "run report written");
        Ok(path)
    }
}

/// Most frequent value of a string column, if any non-null values exist.
///
/// Ties break toward whichever value the count aggregation orders first.
pub(crate) fn most_frequent_str(series: &Series) -> Result<Option<String>> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return Ok(None);
    }
    let counts = non_null.value_counts(true, false, "count".into(), false)?;
    let values = counts.column(non_null.name().as_str())?.as_materialized_series();
    Ok(values.str()?.get(0).map(str::to_string))
}

/// Most frequent value of a numeric column, extracted as i64.
pub(crate) fn most_frequent_int(series: &Series) -> Result<Option<i64>> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return Ok(None);
    }
    let counts = non_null.value_counts(true, false, "count".into(), false)?;
    let value = counts.column(non_null.name().as_str())?.get(0)?;
    Ok(value.try_extract::<i64>().ok())
}
