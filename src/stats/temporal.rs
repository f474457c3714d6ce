//! Most frequent times of travel.

use super::{Report, most_frequent_int, most_frequent_str};
use crate::error::Result;
use crate::loader::{DAY_COL, MONTH_COL, START_TIME};
use chrono::{DateTime, Timelike};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Most common month, weekday and start hour of the filtered trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalReport {
    /// Present only when the dataset spans more than one month.
    pub most_common_month: Option<String>,
    /// Present only when the dataset spans more than one weekday.
    pub most_common_day: Option<String>,
    pub most_common_start_hour: Option<u32>,
}

impl Report for TemporalReport {
    const TITLE: &'static str = "\nCalculating The Most Frequent Times of Travel...\n";

    fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(month) = &self.most_common_month {
            lines.push(format!("The most common month is {month}"));
        }
        if let Some(day) = &self.most_common_day {
            lines.push(format!("The most common day of week is {day}"));
        }
        if let Some(hour) = self.most_common_start_hour {
            lines.push(format!("The most common start hour is {hour}"));
        }
        lines
    }
}

/// Compute the temporal report.
///
/// The month and day lines are suppressed when the dataset has already been
/// narrowed to a single value, since they would only echo the filter back.
pub fn temporal_report(df: &DataFrame) -> Result<TemporalReport> {
    let months = df.column(MONTH_COL)?.as_materialized_series();
    let days = df.column(DAY_COL)?.as_materialized_series();

    let most_common_month = if distinct_non_null(months)? > 1 {
        most_frequent_str(months)?
    } else {
        None
    };
    let most_common_day = if distinct_non_null(days)? > 1 {
        most_frequent_str(days)?
    } else {
        None
    };

    Ok(TemporalReport {
        most_common_month,
        most_common_day,
        most_common_start_hour: most_common_hour(df)?,
    })
}

fn distinct_non_null(series: &Series) -> Result<usize> {
    Ok(series.drop_nulls().n_unique()?)
}

/// Mode of the hour component of the parsed start times.
fn most_common_hour(df: &DataFrame) -> Result<Option<u32>> {
    let times = df.column(START_TIME)?.as_materialized_series().datetime()?;
    let hours: Vec<Option<i64>> = times
        .physical()
        .into_iter()
        .map(|opt| {
            opt.and_then(DateTime::from_timestamp_millis)
                .map(|dt| i64::from(dt.hour()))
        })
        .collect();
    let series = Series::new("hour".into(), hours);
    Ok(most_frequent_int(&series)?.map(|hour| hour as u32))
}
