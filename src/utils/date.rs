use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

use crate::consts::DATE_FORMAT;
use crate::error::AppError;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    // Try YYYYMMDD
    if s.len() == 8 {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Ok(d);
        }
    }
    // Try YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(d);
    }
    Err(AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// A calendar month, the unit of monthly summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct YearMonth {
    pub(crate) year: i32,
    pub(crate) month: u32,
}

impl YearMonth {
    pub(crate) fn current() -> Self {
        let today = Local::now().date_naive();
        YearMonth {
            year: today.year(),
            month: today.month(),
        }
    }

    pub(crate) fn parse(s: &str) -> Result<Self, AppError> {
        let invalid = || AppError::InvalidMonth {
            input: s.to_string(),
        };

        let (year_str, month_str) = match s.split_once('-') {
            Some((y, m)) => (y, m),
            // YYYYMM without separator
            None if s.len() == 6 => s.split_at(4),
            None => return Err(invalid()),
        };

        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        if year_str.len() != 4 || !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(YearMonth { year, month })
    }

    /// First day of this month as "YYYY-MM-01"
    pub(crate) fn first_day(self) -> String {
        format!("{:04}-{:02}-01", self.year, self.month)
    }

    pub(crate) fn next(self) -> Self {
        if self.month == 12 {
            YearMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Summary window: first day of this month through the first day of
    /// the following month
    pub(crate) fn window(self) -> (String, String) {
        (self.first_day(), self.next().first_day())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
