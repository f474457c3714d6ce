//! Interactive exploration of US bikeshare trip records.
//!
//! The crate walks a user through choosing a city dataset and optional
//! month/day filters, loads the matching CSV into a polars DataFrame,
//! prints four descriptive-statistics reports, and offers the raw rows
//! five at a time. All dialogue runs through the [`console::Console`]
//! trait so the whole flow is scriptable in tests.

pub mod config;
pub mod console;
pub mod error;
pub mod loader;
pub mod pager;
pub mod prompt;
pub mod selector;
pub mod stats;

pub use config::DataSources;
pub use console::{Console, ScriptedConsole, StdConsole};
pub use error::{ExplorerError, Result, ResultExt};
pub use loader::DatasetLoader;
pub use pager::RawDataPager;
pub use selector::{FilterRequest, FilterSelector, SelectionStage, TemporalMode};
pub use stats::{
    BirthYearStats, CountEntry, DurationReport, ReportBundle, RunReport, StationReport,
    StatisticsEngine, TemporalReport, UserStatsReport,
};
