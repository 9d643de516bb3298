use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::payroll::error::PayrollError;

/// Calendar month a slip covers, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PayrollMonth {
    first_day: NaiveDate,
}

impl PayrollMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, PayrollError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .filter(|_| (1000..=9999).contains(&year))
            .map(|first_day| Self { first_day })
            .ok_or_else(|| {
                PayrollError::invalid_argument(format!("invalid payroll month {year}-{month:02}"))
            })
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// `YYYYMM`, used in slip numbers.
    pub fn compact(&self) -> String {
        format!("{:04}{:02}", self.year(), self.month())
    }
}

impl FromStr for PayrollMonth {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            PayrollError::invalid_argument(format!("month must be formatted YYYY-MM, got {s:?}"))
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for PayrollMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl Serialize for PayrollMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PayrollMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
