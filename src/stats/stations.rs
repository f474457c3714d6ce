//! Most popular stations and trip.

use super::{Report, most_frequent_str};
use crate::error::Result;
use crate::loader::{END_STATION, START_STATION};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Most commonly used stations and station pair of the filtered trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationReport {
    pub most_common_start: Option<String>,
    pub most_common_end: Option<String>,
    /// Most frequent (start, end) pair, rendered as `"start to end"`.
    pub most_common_trip: Option<String>,
}

impl Report for StationReport {
    const TITLE: &'static str = "\nCalculating The Most Popular Stations and Trip...\n";

    fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(station) = &self.most_common_start {
            lines.push(format!("The most commonly used start station is {station}"));
        }
        if let Some(station) = &self.most_common_end {
            lines.push(format!("The most commonly used end station is {station}"));
        }
        if let Some(trip) = &self.most_common_trip {
            lines.push(format!(
                "The most frequent combination of start station and end station trip is from {trip}"
            ));
        }
        lines
    }
}

pub fn station_report(df: &DataFrame) -> Result<StationReport> {
    let start = df.column(START_STATION)?.as_materialized_series();
    let end = df.column(END_STATION)?.as_materialized_series();
    Ok(StationReport {
        most_common_start: most_frequent_str(start)?,
        most_common_end: most_frequent_str(end)?,
        most_common_trip: most_frequent_pair(start, end)?,
    })
}

/// Mode of the (start, end) pair.
///
/// Grouping is by the pair itself rather than a concatenated label, so a
/// station name containing " to " cannot collide with another pair. Ties
/// break toward the pair seen first.
fn most_frequent_pair(start: &Series, end: &Series) -> Result<Option<String>> {
    let start = start.str()?;
    let end = end.str()?;

    let mut counts: HashMap<(&str, &str), (usize, usize)> = HashMap::new();
    for (idx, (s, e)) in start.into_iter().zip(end.into_iter()).enumerate() {
        if let (Some(s), Some(e)) = (s, e) {
            let entry = counts.entry((s, e)).or_insert((0, idx));
            entry.0 += 1;
        }
    }

    let best = counts
        .into_iter()
        .max_by_key(|&(_, (count, first_idx))| (count, Reverse(first_idx)));
    Ok(best.map(|((s, e), _)| format!("{s} to {e}")))
}
