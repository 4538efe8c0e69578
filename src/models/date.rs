//! Calendar date of an expense
//!
//! Dates are shown and stored as `dd/mm/yyyy`. Input is also accepted as
//! `dd-mm-yyyy` and ISO `yyyy-mm-dd`; every accepted form is normalized.

use chrono::{Local, NaiveDate};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical display and storage pattern
pub const CANONICAL_FORMAT: &str = "%d/%m/%Y";

const ACCEPTED_FORMATS: [&str; 3] = [CANONICAL_FORMAT, "%d-%m-%Y", "%Y-%m-%d"];

/// Date of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseDate(NaiveDate);

impl ExpenseDate {
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date in local time
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Build from year, month and day; `None` for impossible dates
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse any accepted pattern
    pub fn parse(s: &str) -> Result<Self, DateParseError> {
        let s = s.trim();
        ACCEPTED_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .map(Self)
            .ok_or_else(|| DateParseError(s.to_string()))
    }

    pub const fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Shift by a number of days, saturating at the calendar limits
    pub fn add_days(&self, days: i64) -> Self {
        let shifted = self
            .0
            .checked_add_signed(chrono::Duration::days(days))
            .unwrap_or(self.0);
        Self(shifted)
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl FromStr for ExpenseDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for ExpenseDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for ExpenseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExpenseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

/// Error type for date parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError(pub String);

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid date: '{}' (use dd/mm/yyyy, dd-mm-yyyy or yyyy-mm-dd)",
            self.0
        )
    }
}

impl std::error::Error for DateParseError {}
