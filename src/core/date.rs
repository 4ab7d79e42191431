use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// Document date (F) as carried on the wire: `YYYYMMDD`.
///
/// Components are kept as read. A value such as `20241301` is accepted
/// here; [`calendar_date`](Self::calendar_date) reports whether it is a
/// real day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvoiceDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl InvoiceDate {
    /// Split an 8-digit string into year/month/day. `None` unless the
    /// input is exactly eight ASCII digits.
    pub fn from_digits(value: &str) -> Option<Self> {
        if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            year: value[0..4].parse().ok()?,
            month: value[4..6].parse().ok()?,
            day: value[6..8].parse().ok()?,
        })
    }

    /// The calendar date, if the components name one.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
    }
}

impl From<NaiveDate> for InvoiceDate {
    /// Years outside 0..=9999 cannot be written in four digits and are
    /// clamped.
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(0, 9999) as u16,
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

impl fmt::Display for InvoiceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

impl Serialize for InvoiceDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.calendar_date() {
            Some(date) => date.serialize(serializer),
            None => serializer.collect_str(self),
        }
    }
}
