//! Build Date - Injected, Never Read Implicitly
//!
//! The core never looks at the clock. Callers capture a date once and pass it
//! down, so fixed dates give reproducible artifacts.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
#[error("Invalid build date '{input}': expected YYYY-MM-DD")]
pub struct DateError {
    pub input: String,
}

/// Calendar date stamped into the artifact banner, rendered `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BuildDate(NaiveDate);

impl BuildDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Capture today's date in the local timezone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for BuildDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for BuildDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| DateError { input: s.to_string() })
    }
}

impl TryFrom<String> for BuildDate {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BuildDate> for String {
    fn from(date: BuildDate) -> Self {
        date.to_string()
    }
}
