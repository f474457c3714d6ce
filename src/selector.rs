//! The filter-selection dialogue.
//!
//! A small explicit stage machine (region, mode, then month and/or day)
//! rather than nested conditionals, so which questions get asked is
//! testable without any I/O.

use crate::config::DataSources;
use crate::console::{Console, separator_line};
use crate::error::Result;
use crate::prompt::choose;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Calendar months covered by the bundled datasets.
pub const MONTHS: [&str; 6] = ["January", "February", "March", "April", "May", "June"];

/// Weekday names for the day filter.
pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Which temporal filters apply to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalMode {
    Month,
    Day,
    Both,
    None,
}

impl TemporalMode {
    /// Labels presented in the mode question, in order.
    pub const LABELS: [&'static str; 4] = ["month", "day", "both", "none"];

    fn from_label(label: &str) -> Self {
        match label {
            "month" => Self::Month,
            "day" => Self::Day,
            "both" => Self::Both,
            _ => Self::None,
        }
    }

    pub fn wants_month(self) -> bool {
        matches!(self, Self::Month | Self::Both)
    }

    pub fn wants_day(self) -> bool {
        matches!(self, Self::Day | Self::Both)
    }
}

/// A validated filter selection.
///
/// Invariant: `month` is set iff the mode wants a month filter, and `day`
/// is set iff the mode wants a day filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRequest {
    pub region: String,
    pub mode: TemporalMode,
    pub month: Option<String>,
    pub day: Option<String>,
}

/// Stages of the selection dialogue, asked strictly in order with no
/// backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStage {
    Region,
    Mode,
    Month,
    Day,
    Done,
}

impl SelectionStage {
    /// The stage that follows `self` once the temporal mode is known.
    pub fn next(self, mode: TemporalMode) -> SelectionStage {
        match self {
            Self::Region => Self::Mode,
            Self::Mode if mode.wants_month() => Self::Month,
            Self::Mode if mode.wants_day() => Self::Day,
            Self::Mode => Self::Done,
            Self::Month if mode.wants_day() => Self::Day,
            Self::Month => Self::Done,
            Self::Day | Self::Done => Self::Done,
        }
    }
}

/// Runs the region/mode/month/day dialogue over a console.
pub struct FilterSelector<'a> {
    sources: &'a DataSources,
}

impl<'a> FilterSelector<'a> {
    pub fn new(sources: &'a DataSources) -> Self {
        Self { sources }
    }

    /// Walk the stage machine, asking only the questions the chosen mode
    /// needs, and print a separator line on completion.
    pub fn select(&self, console: &mut dyn Console) -> Result<FilterRequest> {
        let mut region = String::new();
        let mut mode = TemporalMode::None;
        let mut month = None;
        let mut day = None;

        let mut stage = SelectionStage::Region;
        loop {
            match stage {
                SelectionStage::Region => {
                    region = choose(console, &self.sources.display_names(), true)?;
                }
                SelectionStage::Mode => {
                    mode = TemporalMode::from_label(&choose(console, &TemporalMode::LABELS, false)?);
                }
                SelectionStage::Month => {
                    month = Some(choose(console, &MONTHS, false)?);
                }
                SelectionStage::Day => {
                    day = Some(choose(console, &DAYS, false)?);
                }
                SelectionStage::Done => break,
            }
            stage = stage.next(mode);
        }
        console.write_line(&separator_line());

        let request = FilterRequest {
            region,
            mode,
            month,
            day,
        };
        debug!(?request, "filters selected");
        Ok(request)
    }
}
