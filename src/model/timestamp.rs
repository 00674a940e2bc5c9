use crate::error::ValidationError;
use chrono::{DateTime, Datelike, NaiveDateTime, SecondsFormat, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A point in time as carried in request and response payloads.
///
/// Always held in UTC at whole-second precision, and rendered as
/// `YYYY-MM-DDThh:mm:ssZ`. Years are limited to 0000-9999, the range the
/// four-digit wire format can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time
    pub fn now() -> Self {
        Timestamp(Utc::now().trunc_subsecs(0))
    }

    /// Wrap an instant in any timezone, converting it to UTC
    pub fn from_datetime<Tz: TimeZone>(datetime: DateTime<Tz>) -> Result<Self, ValidationError> {
        let utc = datetime.with_timezone(&Utc).trunc_subsecs(0);
        if !(0..=9999).contains(&utc.year()) {
            return Err(ValidationError::OutOfRange {
                field: "timestamp",
                detail: format!("year {} is outside 0000-9999", utc.year()),
            });
        }
        Ok(Timestamp(utc))
    }

    /// Wrap a datetime without offset, taking it as UTC
    pub fn from_naive_utc(datetime: NaiveDateTime) -> Result<Self, ValidationError> {
        Self::from_datetime(Utc.from_utc_datetime(&datetime))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn to_wire(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Parse an RFC 3339 string. A value without offset is read as UTC.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match DateTime::parse_from_rfc3339(s) {
            Ok(datetime) => Self::from_datetime(datetime),
            Err(_) => match NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                Ok(datetime) => Self::from_naive_utc(datetime),
                Err(_) => Err(ValidationError::InvalidFormat {
                    field: "timestamp",
                    value: s.to_string(),
                }),
            },
        }
    }
}

impl<Tz: TimeZone> TryFrom<DateTime<Tz>> for Timestamp {
    type Error = ValidationError;

    fn try_from(datetime: DateTime<Tz>) -> Result<Self, Self::Error> {
        Self::from_datetime(datetime)
    }
}

impl FromStr for Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Source of "now" for request timestamps
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
