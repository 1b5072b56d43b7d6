use derive_more::From;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{
    fmt::{self, Display},
    str::FromStr,
};
use thiserror::Error as ThisError;
use time::{
    Date as TimeDate, Duration as TimeDuration, Month, format_description::BorrowedFormatItem,
    macros::format_description,
};

const ISO_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

///
/// DateParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("invalid date '{input}': expected YYYY-MM-DD")]
pub struct DateParseError {
    pub input: String,
}

///
/// Date
///
/// Calendar date without time or offset. Due dates, payment dates and
/// delivery dates are all day-granular.
///

#[derive(Clone, Copy, Debug, Eq, From, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Date(TimeDate);

impl Date {
    /// Build a date from calendar parts, returning `None` for impossible
    /// dates such as February 30th.
    #[must_use]
    pub fn new_checked(y: i32, m: u8, d: u8) -> Option<Self> {
        let month = Month::try_from(m).ok()?;

        TimeDate::from_calendar_date(y, month, d).ok().map(Self)
    }

    #[must_use]
    pub const fn from_time_date(date: TimeDate) -> Self {
        Self(date)
    }

    #[must_use]
    pub const fn get(self) -> TimeDate {
        self.0
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub const fn month(self) -> u8 {
        self.0.month() as u8
    }

    #[must_use]
    pub const fn day(self) -> u8 {
        self.0.day()
    }

    /// Signed number of days from `self` to `other`.
    #[must_use]
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).whole_days()
    }

    /// Add whole days, saturating at the calendar limits.
    #[must_use]
    pub fn saturating_add_days(self, days: i64) -> Self {
        Self(self.0.saturating_add(TimeDuration::days(days)))
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(ISO_FORMAT).map_err(|_| fmt::Error)?;

        f.write_str(&formatted)
    }
}

impl FromStr for Date {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeDate::parse(s.trim(), ISO_FORMAT)
            .map(Self)
            .map_err(|_| DateParseError {
                input: s.to_string(),
            })
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        raw.parse().map_err(de::Error::custom)
    }
}
