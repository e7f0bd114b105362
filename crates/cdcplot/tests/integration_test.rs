//! Integration tests for the cdcplot binary.
//!
//! Each test runs the real executable in a scratch directory with a local
//! CSV and an unreachable source URL, so no network or display is needed.

use cdcplot::{AppError, CdcPlotApp};
use cdcplot_common::test_utils::{create_temp_dir, CsvFixture, FixtureRow};
use cdcplot_common::CdcPlotError;
use cdcplot_config::Config;
use std::path::Path;
use std::process::{Command, Output};

const UNREACHABLE_URL: &str = "http://127.0.0.1:9/rows.csv";

fn run_in(dir: &Path, envs: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_cdcplot"));
    command
        .current_dir(dir)
        .env_remove("CDCPLOT_CONFIG")
        .env_remove("CDCPLOT_CSV_PATH")
        .env_remove("CDCPLOT_OUTPUT")
        .env_remove("CDCPLOT_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .env("CDCPLOT_URL", UNREACHABLE_URL)
        .env("CDCPLOT_SHOW", "0");
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().expect("failed to launch cdcplot")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_no_matching_rows_exits_one_without_image() {
    let dir = create_temp_dir();
    CsvFixture::new()
        .row(FixtureRow::matching("Under 1 year", "5").dates("01/01/2020", "12/31/2020"))
        .write_to(dir.path(), "rows.csv");

    let output = run_in(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No data available"), "{}", stderr(&output));
    assert!(!dir.path().join("result.png").exists());
}

#[test]
fn test_malformed_csv_exits_one() {
    let dir = create_temp_dir();
    let mut csv = CsvFixture::new().matching("Under 1 year", "5").to_csv();
    csv.push_str("09/27/2023,01/01/2020\n");
    std::fs::write(dir.path().join("rows.csv"), csv).unwrap();

    let output = run_in(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("malformed"), "{}", stderr(&output));
    assert!(!dir.path().join("result.png").exists());
}

#[test]
fn test_empty_csv_exits_one() {
    let dir = create_temp_dir();
    std::fs::write(dir.path().join("rows.csv"), "").unwrap();

    let output = run_in(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("is empty"), "{}", stderr(&output));
}

#[test]
fn test_unreachable_source_exits_one_and_leaves_no_csv() {
    let dir = create_temp_dir();

    let output = run_in(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("An error occurred while downloading"),
        "{}",
        stderr(&output)
    );
    assert!(!dir.path().join("rows.csv").exists());
    assert!(!dir.path().join("rows.csv.part").exists());
}

#[test]
fn test_invalid_override_exits_one() {
    let dir = create_temp_dir();

    let output = run_in(dir.path(), &[("CDCPLOT_URL", "ftp://example.com/rows.csv")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"), "{}", stderr(&output));
}

#[test]
fn test_missing_config_file_exits_one() {
    let dir = create_temp_dir();
    let missing = dir.path().join("absent.yaml");

    let output = run_in(dir.path(), &[("CDCPLOT_CONFIG", missing.to_str().unwrap())]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"), "{}", stderr(&output));
}

#[test]
fn test_config_file_redirects_paths() {
    let dir = create_temp_dir();
    CsvFixture::new()
        .row(FixtureRow::matching("Under 1 year", "5").state("Texas"))
        .write_to(dir.path(), "texas.csv");
    let config_path = dir.path().join("cdcplot.yaml");
    std::fs::write(
        &config_path,
        "source:\n  csv_path: texas.csv\nrender:\n  output_path: chart.png\n",
    )
    .unwrap();

    // Texas rows are filtered out by the default state, so the run stops
    // after reading the redirected file.
    let output = run_in(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("texas.csv"), "{stderr}");
    assert!(stderr.contains("Configuration loaded from 'cdcplot.yaml'"), "{stderr}");
    assert!(
        stderr.contains("Settings differ from the built-in defaults in: source, render"),
        "{stderr}"
    );
    assert!(!dir.path().join("chart.png").exists());
}

#[tokio::test]
async fn test_app_run_surfaces_pipeline_error() {
    let dir = create_temp_dir();
    CsvFixture::new()
        .row(FixtureRow::matching("Under 1 year", "5").sex("Female"))
        .write_to(dir.path(), "rows.csv");

    let mut config = Config::default();
    config.source.url = UNREACHABLE_URL.to_string();
    config.source.csv_path = dir.path().join("rows.csv");
    config.render.output_path = dir.path().join("result.png");
    config.render.show = false;

    let app = CdcPlotApp::new(config);
    let err = app.run().await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Pipeline(CdcPlotError::NoMatchingRows { .. })
    ));
    assert_eq!(err.exit_code(), 1);
    assert!(!app.config().render.output_path.exists());
}
