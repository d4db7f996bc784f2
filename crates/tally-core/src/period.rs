//! Budget periods
//!
//! A period identifies one calendar month for aggregation. Construction
//! validates the month and year ranges so every `Period` held by an engine
//! is known to be in range.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};

/// Earliest supported budget year
pub const MIN_YEAR: i32 = 2020;

/// A validated (month, year) pair identifying one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    month: u32,
    year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(
                "Month must be between 1 and 12".to_string(),
            ));
        }
        if year < MIN_YEAR {
            return Err(Error::InvalidData(format!(
                "Year must be {} or later",
                MIN_YEAR
            )));
        }
        Ok(Self { month, year })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Month and year were validated at construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| panic!("invalid period {}/{}", self.month, self.year))
    }

    /// Last day of the month (handles varying month lengths and leap years)
    pub fn last_day(&self) -> NaiveDate {
        self.first_day() + Months::new(1) - Duration::days(1)
    }

    /// Inclusive date range covering the whole month
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.first_day(), self.last_day())
    }

    /// The calendar month immediately preceding this one.
    ///
    /// January rolls back to December of the previous year. The result may
    /// fall before [`MIN_YEAR`]; that is fine for read-only aggregation.
    pub fn prev(&self) -> Self {
        let prev = self.first_day() - Months::new(1);
        Self {
            month: prev.month(),
            year: prev.year(),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
