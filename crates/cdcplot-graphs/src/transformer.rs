//! CSV loading, row filtering, numeric coercion, and age-group aggregation.

use cdcplot_common::{AgeGroup, AgeGroupSeries, CdcPlotError, FilterCriteria, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// The columns of the CDC export this pipeline reads. Other columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeathRecord {
    /// First day of the reporting period, `MM/DD/YYYY`.
    #[serde(rename = "Start Date")]
    pub start_date: String,
    /// Last day of the reporting period, `MM/DD/YYYY`.
    #[serde(rename = "End Date")]
    pub end_date: String,
    /// Geographic scope, e.g. "United States" or a state name.
    #[serde(rename = "State")]
    pub state: String,
    /// Sex category, e.g. "All Sexes".
    #[serde(rename = "Sex")]
    pub sex: String,
    /// Age-group label.
    #[serde(rename = "Age Group")]
    pub age_group: String,
    /// Raw death count; suppressed cells are empty.
    #[serde(rename = "COVID-19 Deaths")]
    pub covid_deaths: String,
}

/// Row accounting for one [`Transformer::transform`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Data rows in the file.
    pub rows_read: usize,
    /// Rows passing every filter predicate.
    pub rows_matched: usize,
    /// Matching rows dropped because their count was not numeric.
    pub rows_dropped: usize,
}

/// Filters dataset rows and sums `COVID-19 Deaths` per [`AgeGroup`].
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    criteria: FilterCriteria,
}

impl Transformer {
    /// Creates a transformer applying `criteria`.
    pub const fn new(criteria: FilterCriteria) -> Self {
        Self { criteria }
    }

    /// The active filter.
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Reads `path` and aggregates the matching rows.
    ///
    /// Fails with `FileNotFound`, `EmptyInput`, or `Malformed` when the file
    /// cannot be read as the expected table, and with `NoMatchingRows` when
    /// no row passes the filter.
    pub fn transform(&self, path: &Path) -> Result<(AgeGroupSeries, TransformReport)> {
        info!("Reading data from '{}'...", path.display());
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CdcPlotError::file_not_found(path),
            _ => CdcPlotError::Io(e),
        })?;
        self.transform_reader(file, path)
    }

    /// Aggregates CSV text from `reader`; `path` is only used in diagnostics.
    pub fn transform_reader<R: Read>(
        &self,
        reader: R,
        path: &Path,
    ) -> Result<(AgeGroupSeries, TransformReport)> {
        let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = csv_reader.headers().map_err(|e| csv_error(path, e))?;
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(CdcPlotError::empty_input(path));
        }
        debug!(columns = headers.len(), "CSV header parsed");

        let mut report = TransformReport::default();
        let mut matched = Vec::new();
        for result in csv_reader.deserialize::<DeathRecord>() {
            let record = result.map_err(|e| csv_error(path, e))?;
            report.rows_read += 1;
            if let Some(group) = self.matches(&record) {
                matched.push((group, record.covid_deaths));
            }
        }
        info!("CSV file loaded successfully.");
        info!("Total rows in the dataset: {}", report.rows_read);

        if matched.is_empty() {
            return Err(CdcPlotError::no_matching_rows(path));
        }
        report.rows_matched = matched.len();

        let mut series = AgeGroupSeries::new();
        for (group, raw) in matched {
            match coerce_count(&raw) {
                Some(count) => {
                    if series.checked_add(group, count).is_none() {
                        return Err(CdcPlotError::malformed(
                            path,
                            format!("COVID-19 Deaths total for '{group}' overflows a 64-bit integer"),
                        ));
                    }
                }
                None => {
                    debug!(age_group = %group, value = %raw, "Dropping row with non-numeric death count");
                    report.rows_dropped += 1;
                }
            }
        }

        Ok((series, report))
    }

    /// Returns the bucket of `record` if it passes every predicate.
    pub fn matches(&self, record: &DeathRecord) -> Option<AgeGroup> {
        let criteria = &self.criteria;
        if record.start_date == criteria.start_date
            && record.end_date == criteria.end_date
            && record.state == criteria.state
            && record.sex == criteria.sex
        {
            AgeGroup::from_label(&record.age_group)
        } else {
            None
        }
    }
}

/// Converts a raw count cell to a number.
///
/// Surrounding whitespace is ignored; integers and decimals are accepted,
/// decimals truncated toward zero. Empty cells, text, non-finite values, and
/// decimals outside the `i64` range are missing (`None`), never zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn coerce_count(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .map(f64::trunc)
        .filter(|value| (i64::MIN as f64..i64::MAX as f64).contains(value))
        .map(|value| value as i64)
}

fn csv_error(path: &Path, err: csv::Error) -> CdcPlotError {
    if err.is_io_error() {
        if let csv::ErrorKind::Io(io) = err.into_kind() {
            return CdcPlotError::Io(io);
        }
        return CdcPlotError::malformed(path, "I/O error while reading CSV");
    }
    let message = err.to_string();
    CdcPlotError::malformed_with_source(path, message, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(age_group: &str) -> DeathRecord {
        let criteria = FilterCriteria::default();
        DeathRecord {
            start_date: criteria.start_date,
            end_date: criteria.end_date,
            state: criteria.state,
            sex: criteria.sex,
            age_group: age_group.to_string(),
            covid_deaths: "1".to_string(),
        }
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count("5"), Some(5));
        assert_eq!(coerce_count(" 12 "), Some(12));
        assert_eq!(coerce_count("7.9"), Some(7));
        assert_eq!(coerce_count("1e3"), Some(1000));
        assert_eq!(coerce_count("-3"), Some(-3));
        assert_eq!(coerce_count(""), None);
        assert_eq!(coerce_count("   "), None);
        assert_eq!(coerce_count("abc"), None);
        assert_eq!(coerce_count("1,234"), None);
        assert_eq!(coerce_count("NaN"), None);
        assert_eq!(coerce_count("inf"), None);
        assert_eq!(coerce_count("1e300"), None);
        assert_eq!(coerce_count("-1e19"), None);
    }

    #[test]
    fn test_matches_requires_every_predicate() {
        let transformer = Transformer::default();
        assert_eq!(transformer.matches(&record("Under 1 year")), Some(AgeGroup::UnderOne));

        let mut wrong_state = record("Under 1 year");
        wrong_state.state = "Texas".to_string();
        assert_eq!(transformer.matches(&wrong_state), None);

        let mut wrong_sex = record("Under 1 year");
        wrong_sex.sex = "Male".to_string();
        assert_eq!(transformer.matches(&wrong_sex), None);

        let mut wrong_start = record("Under 1 year");
        wrong_start.start_date = "01/01/2021".to_string();
        assert_eq!(transformer.matches(&wrong_start), None);

        let mut wrong_end = record("Under 1 year");
        wrong_end.end_date = "09/30/2023".to_string();
        assert_eq!(transformer.matches(&wrong_end), None);

        assert_eq!(transformer.matches(&record("All Ages")), None);
    }

    #[test]
    fn test_io_csv_error_maps_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = csv_error(Path::new("rows.csv"), csv::Error::from(io));
        assert_eq!(err.category(), "io");
    }
}
