//! Interactive raw-data paging.

use crate::console::Console;
use crate::error::Result;
use crate::loader::{DAY_COL, MONTH_COL};
use polars::prelude::*;
use tracing::debug;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

/// Pages through the raw trip records five rows at a time.
pub struct RawDataPager;

impl RawDataPager {
    /// Offer pages of raw rows until the user declines or the data runs
    /// out. Returns the number of rows shown.
    ///
    /// The derived month and day columns are dropped first; the user sees
    /// the records as they appear in the source file.
    pub fn run(console: &mut dyn Console, df: &DataFrame) -> Result<usize> {
        let raw = df.drop_many([MONTH_COL, DAY_COL]);
        let total = raw.height();
        let mut shown = 0;

        let mut question = "Would you like to see some raw data? Enter yes or no.";
        while shown < total {
            console.write_line(question);
            let answer = console.read_line()?;
            if !is_affirmative(&answer) {
                break;
            }
            let batch = raw.slice(shown as i64, PAGE_SIZE);
            console.write_line(&format!("{batch}"));
            shown += batch.height();
            question = "Would you like to see some more raw data? Enter yes or no.";
        }

        debug!(shown, total, "raw data paging finished");
        Ok(shown)
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::loader::{START_TIME, TRIP_DURATION, derive_time_columns};
    use pretty_assertions::assert_eq;

    fn frame_with_rows(n: usize) -> DataFrame {
        let times: Vec<String> = (0..n)
            .map(|i| format!("2017-06-{:02} 08:00:00", (i % 28) + 1))
            .collect();
        let durations: Vec<i64> = (0..n as i64).map(|i| 100 + i).collect();
        let df = df![
            START_TIME => times,
            TRIP_DURATION => durations,
        ]
        .unwrap();
        derive_time_columns(df).unwrap()
    }

    #[test]
    fn test_two_pages_then_decline() {
        let df = frame_with_rows(12);
        let mut console = ScriptedConsole::new(["yes", "yes", "no"]);
        let shown = RawDataPager::run(&mut console, &df).unwrap();
        assert_eq!(shown, 10);
    }

    #[test]
    fn test_declining_immediately_shows_nothing() {
        let df = frame_with_rows(12);
        let mut console = ScriptedConsole::new(["no"]);
        let shown = RawDataPager::run(&mut console, &df).unwrap();
        assert_eq!(shown, 0);
    }

    #[test]
    fn test_short_dataset_is_not_reprompted_after_exhaustion() {
        let df = frame_with_rows(5);
        // A second prompt would drain the script and error.
        let mut console = ScriptedConsole::new(["yes"]);
        let shown = RawDataPager::run(&mut console, &df).unwrap();
        assert_eq!(shown, 5);
    }

    #[test]
    fn test_final_partial_page() {
        let df = frame_with_rows(7);
        let mut console = ScriptedConsole::new(["yes", "y"]);
        let shown = RawDataPager::run(&mut console, &df).unwrap();
        assert_eq!(shown, 7);
    }

    #[test]
    fn test_empty_dataset_never_prompts() {
        let df = frame_with_rows(3).slice(0, 0);
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let shown = RawDataPager::run(&mut console, &df).unwrap();
        assert_eq!(shown, 0);
        assert!(console.output.is_empty());
    }

    #[test]
    fn test_derived_columns_hidden_from_output() {
        let df = frame_with_rows(5);
        let mut console = ScriptedConsole::new(["yes"]);
        RawDataPager::run(&mut console, &df).unwrap();
        let printed = console.printed();
        assert!(printed.contains(TRIP_DURATION));
        assert!(!printed.contains(MONTH_COL));
    }
}
