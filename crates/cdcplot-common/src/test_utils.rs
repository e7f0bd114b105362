//! Test utilities and shared test helpers for cdcplot.
//!
//! Fixtures here build CSV files shaped like the CDC "Provisional COVID-19
//! Deaths by Sex and Age" export so that transformer and pipeline tests can
//! run without the network.

use crate::FilterCriteria;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Header of the CDC export, in column order.
pub const CDC_HEADER: [&str; 16] = [
    "Data As Of",
    "Start Date",
    "End Date",
    "Group",
    "Year",
    "Month",
    "State",
    "Sex",
    "Age Group",
    "COVID-19 Deaths",
    "Total Deaths",
    "Pneumonia Deaths",
    "Pneumonia and COVID-19 Deaths",
    "Influenza Deaths",
    "Pneumonia, Influenza, or COVID-19 Deaths",
    "Footnote",
];

/// One dataset row; fields not used by the filter are filled with plausible values.
#[derive(Debug, Clone)]
pub struct FixtureRow {
    pub start_date: String,
    pub end_date: String,
    pub state: String,
    pub sex: String,
    pub age_group: String,
    pub deaths: String,
}

impl FixtureRow {
    /// A row that passes every equality predicate of the default [`FilterCriteria`].
    pub fn matching(age_group: &str, deaths: &str) -> Self {
        let criteria = FilterCriteria::default();
        Self {
            start_date: criteria.start_date,
            end_date: criteria.end_date,
            state: criteria.state,
            sex: criteria.sex,
            age_group: age_group.to_string(),
            deaths: deaths.to_string(),
        }
    }

    /// Replace the `State` value.
    pub fn state(mut self, state: &str) -> Self {
        self.state = state.to_string();
        self
    }

    /// Replace the `Sex` value.
    pub fn sex(mut self, sex: &str) -> Self {
        self.sex = sex.to_string();
        self
    }

    /// Replace both date columns.
    pub fn dates(mut self, start: &str, end: &str) -> Self {
        self.start_date = start.to_string();
        self.end_date = end.to_string();
        self
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            "09/27/2023".to_string(),
            self.start_date.clone(),
            self.end_date.clone(),
            "By Total".to_string(),
            String::new(),
            String::new(),
            self.state.clone(),
            self.sex.clone(),
            self.age_group.clone(),
            self.deaths.clone(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            String::new(),
        ]
    }
}

/// Builder for CDC-shaped CSV files.
#[derive(Debug, Clone, Default)]
pub struct CsvFixture {
    rows: Vec<FixtureRow>,
}

impl CsvFixture {
    /// Creates an empty fixture (header only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row.
    pub fn row(mut self, row: FixtureRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Appends a matching row for `age_group`.
    pub fn matching(self, age_group: &str, deaths: &str) -> Self {
        self.row(FixtureRow::matching(age_group, deaths))
    }

    /// Renders the CSV text, quoting fields the way the CDC export does.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&join_record(CDC_HEADER.iter().map(|h| (*h).to_string())));
        for row in &self.rows {
            out.push_str(&join_record(row.to_record().into_iter()));
        }
        out
    }

    /// Writes the CSV to `dir/name` and returns the path.
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).expect("Failed to create fixture file");
        file.write_all(self.to_csv().as_bytes())
            .expect("Failed to write fixture file");
        path
    }
}

fn join_record(fields: impl Iterator<Item = String>) -> String {
    let mut line = fields
        .map(|field| {
            if field.contains(',') || field.contains('"') {
                format!("\"{}\"", field.replace('"', "\"\""))
            } else {
                field
            }
        })
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}
