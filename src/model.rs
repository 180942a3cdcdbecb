use chrono::{DateTime, Local, NaiveDate, Utc};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

/// A single saved browser tab. Its URL is its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub title: String,
    pub url: String,
    pub icon: String,
}

/// Distinct access instants seen anywhere in the tree.
pub type AccessDates = BTreeSet<DateTime<Utc>>;

/// Registrable domain -> tabs in the order they were grouped.
pub type DomainGroups = HashMap<String, Vec<Tab>>;

/// Registrable domain -> first non-empty icon seen for it.
pub type IconIndex = HashMap<String, String>;

/// Time zone used to turn access instants into calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateZone {
    #[default]
    Local,
    Utc,
}

impl DateZone {
    pub fn date_of(self, instant: &DateTime<Utc>) -> NaiveDate {
        match self {
            DateZone::Local => instant.with_timezone(&Local).date_naive(),
            DateZone::Utc => instant.date_naive(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when no access dates were recorded.
    pub fn from_dates(dates: &AccessDates, zone: DateZone) -> Option<Self> {
        let first = dates.first()?;
        let last = dates.last()?;
        Some(DateRange {
            start: zone.date_of(first),
            end: zone.date_of(last),
        })
    }

    /// `2023-11-14 to 2023-11-20`
    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }

    /// `20231114-20231120`
    pub fn file_stamp(&self) -> String {
        format!("{}-{}", self.start.format("%Y%m%d"), self.end.format("%Y%m%d"))
    }
}

#[derive(Debug)]
pub struct ConversionSummary {
    pub output_path: PathBuf,
    pub date_range: Option<DateRange>,
    pub tabs_extracted: usize,
    pub tabs_unique: usize,
    pub domain_count: usize,
}

impl ConversionSummary {
    pub fn duplicates_removed(&self) -> usize {
        self.tabs_extracted - self.tabs_unique
    }
}
