//! Tests for the command line front-end

use chessdash::{build_report, render_report, Args};
use chessdash_common::test_utils::{create_temp_dir, init_test_logging};
use chessdash_config::Config;
use clap::Parser;
use serde_json::Value;
use std::path::Path;

const ARCHIVE: &str = r#"{"games": [
    {"time_control": "180+2", "time_class": "blitz", "rated": true, "end_time": 1704103200,
     "white": {"username": "lickumoo", "result": "win"},
     "black": {"username": "x", "result": "checkmated"}},
    {"time_control": "600", "time_class": "rapid", "rated": false, "end_time": 1706781600,
     "white": {"username": "y", "result": "timeout"},
     "black": {"username": "lickumoo", "result": "win"}}
]}"#;

// One win each in January 2022, June 2023 and January 2024, noon UTC
const LONG_ARCHIVE: &str = r#"[
    {"time_control": "300", "end_time": 1642248000,
     "white": {"username": "lickumoo", "result": "win"},
     "black": {"username": "a", "result": "resigned"}},
    {"time_control": "300", "end_time": 1686830400,
     "white": {"username": "lickumoo", "result": "win"},
     "black": {"username": "b", "result": "resigned"}},
    {"time_control": "300", "end_time": 1705320000,
     "white": {"username": "lickumoo", "result": "win"},
     "black": {"username": "c", "result": "resigned"}}
]"#;

fn write_file(dir: &Path, contents: &str) -> String {
    let path = dir.join("games.json");
    std::fs::write(&path, contents).expect("Failed to write archive");
    path.to_string_lossy().into_owned()
}

fn write_archive(dir: &Path) -> String {
    write_file(dir, ARCHIVE)
}

fn report(args: &Args, config: &Config) -> Value {
    serde_json::to_value(build_report(args, config).unwrap()).unwrap()
}

fn year_labels(report: &Value) -> Vec<String> {
    report["year"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["label"].as_str().unwrap().to_string())
        .collect()
}

fn config() -> Config {
    let mut config = Config::default();
    config.player.username = "lickumoo".to_string();
    config
}

#[test]
fn parses_arguments() {
    let args = Args::parse_from(["chessdash", "--dimension", "weekday", "--pretty", "games.json"]);
    assert_eq!(args.dimension.as_deref(), Some("weekday"));
    assert!(args.pretty);
    assert!(args.config.is_none());
    assert_eq!(args.archive, Path::new("games.json"));
}

#[test]
fn report_has_every_dimension() {
    init_test_logging();
    let dir = create_temp_dir();
    let archive = write_archive(dir.path());

    let args = Args::parse_from(["chessdash", archive.as_str()]);
    let report = report(&args, &config());

    for key in ["hour", "weekday", "month", "year"] {
        assert!(report[key].is_array(), "{key}");
    }
    let years = report["year"].as_array().unwrap();
    assert_eq!(years.len(), 1);
    assert_eq!(years[0]["label"], "2024 (2)");
    assert_eq!(years[0]["share_pct"], 100.0);
}

#[test]
fn single_dimension_and_filters() {
    let dir = create_temp_dir();
    let archive = write_archive(dir.path());

    let mut config = config();
    config.filter.rated_only = Some(true);

    let args = Args::parse_from(["chessdash", "-d", "month", archive.as_str()]);
    let report = report(&args, &config);

    let object = report.as_object().unwrap();
    assert_eq!(object.len(), 1);
    let months = report["month"].as_array().unwrap();
    assert_eq!(months.len(), 1);
    assert_eq!(months[0]["bucket_key"], 1);
    assert_eq!(months[0]["outcome"], "win");
}

#[test]
fn unknown_dimension_fails() {
    let dir = create_temp_dir();
    let archive = write_archive(dir.path());

    let args = Args::parse_from(["chessdash", "--dimension", "minute", archive.as_str()]);
    let err = build_report(&args, &config()).unwrap_err();
    assert!(err.to_string().contains("minute"));
}

#[test]
fn pretty_output_is_indented() {
    let dir = create_temp_dir();
    let archive = write_archive(dir.path());

    let args = Args::parse_from(["chessdash", "--pretty", "-d", "year", archive.as_str()]);
    let rendered = render_report(&args, &config()).unwrap();
    assert!(rendered.starts_with("{\n"));

    let compact = Args::parse_from(["chessdash", "-d", "year", archive.as_str()]);
    assert!(!render_report(&compact, &config()).unwrap().contains('\n'));
}

#[test]
fn dimensions_render_in_breakdown_order() {
    let dir = create_temp_dir();
    let archive = write_archive(dir.path());

    let args = Args::parse_from(["chessdash", archive.as_str()]);
    let rendered = render_report(&args, &config()).unwrap();

    let positions: Vec<usize> = ["\"hour\":", "\"weekday\":", "\"month\":", "\"year\":"]
        .iter()
        .map(|key| rendered.find(key).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{rendered}");
}

#[test]
fn default_window_narrows_an_unbounded_range() {
    init_test_logging();
    let dir = create_temp_dir();
    let archive = write_file(dir.path(), LONG_ARCHIVE);

    let mut config = config();
    config.window.min_games = 1;

    let everything = Args::parse_from(["chessdash", "-d", "year", archive.as_str()]);
    assert_eq!(
        year_labels(&report(&everything, &config)),
        vec!["2022 (1)", "2023 (1)", "2024 (1)"]
    );

    // Latest 12 months run from 2023-02 through 2024-01
    let windowed =
        Args::parse_from(["chessdash", "--default-window", "-d", "year", archive.as_str()]);
    assert!(windowed.default_window);
    assert_eq!(year_labels(&report(&windowed, &config)), vec!["2023 (1)", "2024 (1)"]);
}

#[test]
fn default_window_widens_until_enough_games() {
    let dir = create_temp_dir();
    let archive = write_file(dir.path(), LONG_ARCHIVE);

    let mut config = config();
    config.window.min_games = 3;

    let args = Args::parse_from(["chessdash", "--default-window", "-d", "year", archive.as_str()]);
    assert_eq!(
        year_labels(&report(&args, &config)),
        vec!["2022 (1)", "2023 (1)", "2024 (1)"]
    );
}

#[test]
fn default_window_leaves_configured_months_alone() {
    let dir = create_temp_dir();
    let archive = write_file(dir.path(), LONG_ARCHIVE);
    let args = Args::parse_from(["chessdash", "--default-window", "-d", "year", archive.as_str()]);

    let mut from_start = config();
    from_start.window.min_games = 1;
    from_start.filter.month_start = Some("2022-01".to_string());
    assert_eq!(
        year_labels(&report(&args, &from_start)),
        vec!["2022 (1)", "2023 (1)", "2024 (1)"]
    );

    let mut until_end = config();
    until_end.window.min_games = 1;
    until_end.filter.month_end = Some("2023-12".to_string());
    assert_eq!(year_labels(&report(&args, &until_end)), vec!["2022 (1)", "2023 (1)"]);
}
