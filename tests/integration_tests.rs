//! End-to-end tests against the CSV fixtures.

use bikeshare_explorer::{
    DataSources, DatasetLoader, FilterRequest, FilterSelector, RawDataPager, ScriptedConsole,
    StatisticsEngine, TemporalMode,
};
use bikeshare_explorer::loader::{DAY_COL, MONTH_COL, filter_equals};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_sources() -> DataSources {
    DataSources::from_dir(&fixtures_dir())
}

fn load(region: &str, mode: TemporalMode, month: Option<&str>, day: Option<&str>) -> DataFrame {
    let sources = fixture_sources();
    let request = FilterRequest {
        region: region.to_string(),
        mode,
        month: month.map(str::to_string),
        day: day.map(str::to_string),
    };
    DatasetLoader::new(&sources).load(&request).unwrap()
}

#[test]
fn test_load_derives_month_and_day_columns() {
    let df = load("chicago", TemporalMode::None, None, None);
    assert_eq!(df.height(), 12);
    assert!(df.column(MONTH_COL).is_ok());
    assert!(df.column(DAY_COL).is_ok());
}

#[test]
fn test_both_filter_keeps_only_matching_rows() {
    let df = load("chicago", TemporalMode::Both, Some("June"), Some("Monday"));
    assert_eq!(df.height(), 4);

    let months = df.column(MONTH_COL).unwrap().as_materialized_series().clone();
    let months = months.str().unwrap();
    assert!(months.into_iter().all(|m| m == Some("June")));

    let days = df.column(DAY_COL).unwrap().as_materialized_series().clone();
    let days = days.str().unwrap();
    assert!(days.into_iter().all(|d| d == Some("Monday")));
}

#[test]
fn test_filtering_is_idempotent_and_order_independent() {
    let unfiltered = load("chicago", TemporalMode::None, None, None);

    let month_first = filter_equals(
        &filter_equals(&unfiltered, MONTH_COL, "June").unwrap(),
        DAY_COL,
        "Monday",
    )
    .unwrap();
    let day_first = filter_equals(
        &filter_equals(&unfiltered, DAY_COL, "Monday").unwrap(),
        MONTH_COL,
        "June",
    )
    .unwrap();
    assert_eq!(month_first, day_first);

    let again = filter_equals(&month_first, MONTH_COL, "June").unwrap();
    assert_eq!(month_first, again);
}

#[test]
fn test_chicago_statistics_unfiltered() {
    let df = load("chicago", TemporalMode::None, None, None);
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let bundle = StatisticsEngine::run(&mut console, &df).unwrap();

    assert_eq!(bundle.temporal.most_common_month.as_deref(), Some("June"));
    assert_eq!(bundle.temporal.most_common_day.as_deref(), Some("Monday"));
    assert_eq!(bundle.temporal.most_common_start_hour, Some(8));

    assert_eq!(bundle.stations.most_common_start.as_deref(), Some("Canal St"));
    assert_eq!(bundle.stations.most_common_end.as_deref(), Some("Clinton St"));
    assert_eq!(
        bundle.stations.most_common_trip.as_deref(),
        Some("Canal St to Clinton St")
    );

    assert_eq!(bundle.duration.trip_count, 12);
    assert_eq!(bundle.duration.total_travel_time, Some(13800.0));
    assert_eq!(bundle.duration.mean_travel_time, Some(1150.0));

    let years = bundle.users.birth_years.unwrap();
    assert_eq!(years.earliest, 1969);
    assert_eq!(years.most_recent, 1995);
    assert_eq!(years.most_common, 1985);
}

#[test]
fn test_month_line_suppressed_under_month_filter() {
    let df = load("chicago", TemporalMode::Month, Some("June"), None);
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let bundle = StatisticsEngine::run(&mut console, &df).unwrap();

    assert!(bundle.temporal.most_common_month.is_none());
    // June rows still span several weekdays.
    assert_eq!(bundle.temporal.most_common_day.as_deref(), Some("Monday"));
    assert!(!console.printed().contains("The most common month is"));
}

#[test]
fn test_duration_mean_consistent_with_total() {
    let df = load("chicago", TemporalMode::Both, Some("June"), Some("Monday"));
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let bundle = StatisticsEngine::run(&mut console, &df).unwrap();

    let total = bundle.duration.total_travel_time.unwrap();
    let mean = bundle.duration.mean_travel_time.unwrap();
    assert_eq!(total, 3300.0);
    assert!((mean * bundle.duration.trip_count as f64 - total).abs() < 1e-9);
}

#[test]
fn test_washington_has_no_demographics() {
    let df = load("washington", TemporalMode::None, None, None);
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let bundle = StatisticsEngine::run(&mut console, &df).unwrap();

    assert!(!bundle.users.user_types.is_empty());
    assert!(bundle.users.genders.is_none());
    assert!(bundle.users.birth_years.is_none());
    assert!(!console.printed().contains("year of birth"));
}

#[test]
fn test_pagination_through_twelve_rows() {
    let df = load("chicago", TemporalMode::None, None, None);
    let mut console = ScriptedConsole::new(["yes", "yes", "no"]);
    let shown = RawDataPager::run(&mut console, &df).unwrap();
    assert_eq!(shown, 10);
}

#[test]
fn test_pagination_stops_when_data_exhausted() {
    let df = load("washington", TemporalMode::None, None, None);
    // One page covers all five rows; a second prompt would drain the script.
    let mut console = ScriptedConsole::new(["yes"]);
    let shown = RawDataPager::run(&mut console, &df).unwrap();
    assert_eq!(shown, 5);
}

#[test]
fn test_full_dialogue_through_statistics() {
    let sources = fixture_sources();
    let mut console = ScriptedConsole::new(["chicago", "both", "june", "monday", "no"]);

    let request = FilterSelector::new(&sources).select(&mut console).unwrap();
    assert_eq!(request.region, "Chicago");
    assert_eq!(request.mode, TemporalMode::Both);

    let df = DatasetLoader::new(&sources).load(&request).unwrap();
    assert_eq!(df.height(), 4);

    let bundle = StatisticsEngine::run(&mut console, &df).unwrap();
    assert!(bundle.temporal.most_common_month.is_none());
    assert!(bundle.temporal.most_common_day.is_none());
    assert_eq!(bundle.temporal.most_common_start_hour, Some(8));

    let shown = RawDataPager::run(&mut console, &df).unwrap();
    assert_eq!(shown, 0);

    let printed = console.printed();
    assert!(printed.contains("Calculating The Most Frequent Times of Travel"));
    assert!(printed.contains("Calculating User Stats"));
}
