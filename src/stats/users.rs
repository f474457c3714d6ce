//! User demographics.
//!
//! Gender and birth-year columns exist only in some regional datasets, so
//! those sections are optional and skipped cleanly when absent.

use super::{Report, most_frequent_int};
use crate::error::Result;
use crate::loader::{BIRTH_YEAR, GENDER, USER_TYPE};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of a frequency table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountEntry {
    pub value: String,
    pub count: u32,
}

/// Earliest, most recent and most common year of birth.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatsReport {
    pub user_types: Vec<CountEntry>,
    /// Absent when the dataset has no gender column.
    pub genders: Option<Vec<CountEntry>>,
    /// Absent when the dataset has no birth-year column or it is all null.
    pub birth_years: Option<BirthYearStats>,
}

impl Report for UserStatsReport {
    const TITLE: &'static str = "\nCalculating User Stats...\n";

    fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.user_types.is_empty() {
            lines.push("Counts of user types:".to_string());
            lines.extend(self.user_types.iter().map(table_line));
        }
        if let Some(genders) = &self.genders {
            lines.push("\nCounts of gender:".to_string());
            lines.extend(genders.iter().map(table_line));
        }
        if let Some(years) = &self.birth_years {
            lines.push(format!("\nThe earliest year of birth is {}", years.earliest));
            lines.push(format!(
                "The most recent year of birth is {}",
                years.most_recent
            ));
            lines.push(format!(
                "The most common year of birth is {}",
                years.most_common
            ));
        }
        lines
    }
}

fn table_line(entry: &CountEntry) -> String {
    format!("{:<25} {}", entry.value, entry.count)
}

pub fn user_stats_report(df: &DataFrame) -> Result<UserStatsReport> {
    let user_types = frequency_table(df, USER_TYPE)?;
    let genders = if df.column(GENDER).is_ok() {
        Some(frequency_table(df, GENDER)?)
    } else {
        None
    };
    let birth_years = if df.column(BIRTH_YEAR).is_ok() {
        birth_year_stats(df)?
    } else {
        None
    };
    Ok(UserStatsReport {
        user_types,
        genders,
        birth_years,
    })
}

/// Frequency table of a string column, most common first.
fn frequency_table(df: &DataFrame, column: &str) -> Result<Vec<CountEntry>> {
    let series = df.column(column)?.as_materialized_series().drop_nulls();
    if series.is_empty() {
        return Ok(Vec::new());
    }
    let counts = series.value_counts(true, false, "count".into(), false)?;
    let values = counts.column(series.name().as_str())?.as_materialized_series().clone();
    let values = values.str()?;
    let tallies = counts
        .column("count")?
        .as_materialized_series()
        .cast(&DataType::UInt32)?;
    let tallies = tallies.u32()?;

    let mut table = Vec::with_capacity(counts.height());
    for (value, count) in values.into_iter().zip(tallies.into_iter()) {
        if let (Some(value), Some(count)) = (value, count) {
            table.push(CountEntry {
                value: value.to_string(),
                count,
            });
        }
    }
    Ok(table)
}

fn birth_year_stats(df: &DataFrame) -> Result<Option<BirthYearStats>> {
    let years = df
        .column(BIRTH_YEAR)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let years = years.f64()?;
    let (Some(earliest), Some(most_recent)) = (years.min(), years.max()) else {
        return Ok(None);
    };
    let year_series = years.clone().into_series();
    let Some(most_common) = most_frequent_int(&year_series)? else {
        return Ok(None);
    };
    Ok(Some(BirthYearStats {
        earliest: earliest as i32,
        most_recent: most_recent as i32,
        most_common: most_common as i32,
    }))
}
