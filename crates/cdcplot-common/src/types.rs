//! Common type definitions for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eleven age-group buckets reported by the CDC dataset.
///
/// The declaration order is the output order of every aggregated series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeGroup {
    /// "Under 1 year"
    UnderOne,
    /// "1-4 years"
    OneToFour,
    /// "5-14 years"
    FiveToFourteen,
    /// "15-24 years"
    FifteenToTwentyFour,
    /// "25-34 years"
    TwentyFiveToThirtyFour,
    /// "35-44 years"
    ThirtyFiveToFortyFour,
    /// "45-54 years"
    FortyFiveToFiftyFour,
    /// "55-64 years"
    FiftyFiveToSixtyFour,
    /// "65-74 years"
    SixtyFiveToSeventyFour,
    /// "75-84 years"
    SeventyFiveToEightyFour,
    /// "85 years and over"
    EightyFiveAndOver,
}

impl AgeGroup {
    /// Number of buckets.
    pub const COUNT: usize = 11;

    /// All buckets in output order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::UnderOne,
        Self::OneToFour,
        Self::FiveToFourteen,
        Self::FifteenToTwentyFour,
        Self::TwentyFiveToThirtyFour,
        Self::ThirtyFiveToFortyFour,
        Self::FortyFiveToFiftyFour,
        Self::FiftyFiveToSixtyFour,
        Self::SixtyFiveToSeventyFour,
        Self::SeventyFiveToEightyFour,
        Self::EightyFiveAndOver,
    ];

    /// Label exactly as it appears in the `Age Group` column.
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderOne => "Under 1 year",
            Self::OneToFour => "1-4 years",
            Self::FiveToFourteen => "5-14 years",
            Self::FifteenToTwentyFour => "15-24 years",
            Self::TwentyFiveToThirtyFour => "25-34 years",
            Self::ThirtyFiveToFortyFour => "35-44 years",
            Self::FortyFiveToFiftyFour => "45-54 years",
            Self::FiftyFiveToSixtyFour => "55-64 years",
            Self::SixtyFiveToSeventyFour => "65-74 years",
            Self::SeventyFiveToEightyFour => "75-84 years",
            Self::EightyFiveAndOver => "85 years and over",
        }
    }

    /// Exact, case-sensitive lookup of a column value.
    ///
    /// Returns `None` for labels outside the bucket set, such as "All Ages"
    /// or the overlapping "0-17 years" groups the dataset also carries.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.label() == label)
    }

    /// Position of the bucket in output order.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summed death counts for every [`AgeGroup`], in bucket order.
///
/// Backed by a fixed array, so the series always holds exactly one value per
/// bucket; buckets never touched by [`AgeGroupSeries::add`] stay at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgeGroupSeries {
    totals: [i64; AgeGroup::COUNT],
}

impl AgeGroupSeries {
    /// Creates a series with every bucket at zero.
    pub const fn new() -> Self {
        Self {
            totals: [0; AgeGroup::COUNT],
        }
    }

    /// Adds `count` to the bucket of `group`, saturating at the `i64` bounds.
    pub fn add(&mut self, group: AgeGroup, count: i64) {
        let total = &mut self.totals[group.index()];
        *total = total.saturating_add(count);
    }

    /// Adds `count` to the bucket of `group`, or returns `None` and leaves the
    /// bucket unchanged if the total would overflow.
    pub fn checked_add(&mut self, group: AgeGroup, count: i64) -> Option<i64> {
        let total = &mut self.totals[group.index()];
        *total = total.checked_add(count)?;
        Some(*total)
    }

    /// Total for one bucket.
    pub const fn get(&self, group: AgeGroup) -> i64 {
        self.totals[group.index()]
    }

    /// `(bucket, total)` pairs in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (AgeGroup, i64)> + '_ {
        AgeGroup::ALL
            .into_iter()
            .map(move |group| (group, self.get(group)))
    }

    /// Bucket labels in order.
    pub fn labels(&self) -> Vec<&'static str> {
        AgeGroup::ALL.iter().map(|group| group.label()).collect()
    }

    /// Totals in bucket order.
    pub const fn values(&self) -> &[i64; AgeGroup::COUNT] {
        &self.totals
    }

    /// Largest total, or zero for an all-zero series.
    pub fn max_value(&self) -> i64 {
        self.totals.iter().copied().max().unwrap_or(0).max(0)
    }

    /// Sum over every bucket, saturating at the `i64` bounds.
    pub fn total(&self) -> i64 {
        self.totals.iter().fold(0i64, |sum, total| sum.saturating_add(*total))
    }
}

impl fmt::Display for AgeGroupSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = AgeGroup::ALL
            .iter()
            .map(|group| group.label().len())
            .max()
            .unwrap_or(0);
        for (group, total) in self.iter() {
            writeln!(f, "{:<width$}  {total}", group.label())?;
        }
        Ok(())
    }
}

/// Fixed equality predicates applied to every dataset row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Required `Start Date` value, `MM/DD/YYYY`.
    pub start_date: String,
    /// Required `End Date` value, `MM/DD/YYYY`.
    pub end_date: String,
    /// Required `State` value.
    pub state: String,
    /// Required `Sex` value.
    pub sex: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            start_date: "01/01/2020".to_string(),
            end_date: "09/23/2023".to_string(),
            state: "United States".to_string(),
            sex: "All Sexes".to_string(),
        }
    }
}

impl FilterCriteria {
    /// Human-readable date range, e.g. `01/01/2020 - 09/23/2023`.
    pub fn date_range(&self) -> String {
        format!("{} - {}", self.start_date, self.end_date)
    }
}
