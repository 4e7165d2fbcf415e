//! Date and time components of a normalized timestamp.
//!
//! A value that could not be derived is [`DatePart::Unavailable`] /
//! [`TimePart::Unavailable`] rather than a null, and serializes as the
//! literal [`UNAVAILABLE`].

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire form of an unavailable date or time.
pub const UNAVAILABLE: &str = "N/A";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Date(NaiveDate),
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePart {
    Time(NaiveTime),
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampParts {
    pub date: DatePart,
    pub time: TimePart,
}

impl TimestampParts {
    pub const UNAVAILABLE: TimestampParts = TimestampParts {
        date: DatePart::Unavailable,
        time: TimePart::Unavailable,
    };

    pub fn is_available(&self) -> bool {
        !matches!(self.date, DatePart::Unavailable)
    }
}

impl From<NaiveDateTime> for TimestampParts {
    fn from(value: NaiveDateTime) -> Self {
        Self {
            date: DatePart::Date(value.date()),
            time: TimePart::Time(value.time()),
        }
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatePart::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            DatePart::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

impl fmt::Display for TimePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimePart::Time(time) => write!(f, "{}", time.format(TIME_FORMAT)),
            TimePart::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

impl Serialize for DatePart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for TimePart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DatePart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == UNAVAILABLE {
            return Ok(DatePart::Unavailable);
        }
        NaiveDate::parse_from_str(&raw, DATE_FORMAT)
            .map(DatePart::Date)
            .map_err(D::Error::custom)
    }
}

impl<'de> Deserialize<'de> for TimePart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == UNAVAILABLE {
            return Ok(TimePart::Unavailable);
        }
        NaiveTime::parse_from_str(&raw, TIME_FORMAT)
            .map(TimePart::Time)
            .map_err(D::Error::custom)
    }
}
