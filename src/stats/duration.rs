//! Total and mean trip duration.

use super::Report;
use crate::error::Result;
use crate::loader::TRIP_DURATION;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Aggregate travel time of the filtered trips, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationReport {
    /// Trips with a non-null duration.
    pub trip_count: usize,
    pub total_travel_time: Option<f64>,
    pub mean_travel_time: Option<f64>,
}

impl Report for DurationReport {
    const TITLE: &'static str = "\nCalculating Trip Duration...\n";

    fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(total) = self.total_travel_time {
            lines.push(format!("The total travel time is {total}"));
        }
        if let Some(mean) = self.mean_travel_time {
            lines.push(format!("The mean travel time is {mean}"));
        }
        lines
    }
}

pub fn trip_duration_report(df: &DataFrame) -> Result<DurationReport> {
    let durations = df
        .column(TRIP_DURATION)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let durations = durations.f64()?;
    let trip_count = durations.len() - durations.null_count();

    if trip_count == 0 {
        return Ok(DurationReport {
            trip_count: 0,
            total_travel_time: None,
            mean_travel_time: None,
        });
    }

    Ok(DurationReport {
        trip_count,
        total_travel_time: durations.sum(),
        mean_travel_time: durations.mean(),
    })
}
