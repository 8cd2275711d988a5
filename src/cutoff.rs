// src/cutoff.rs

use crate::error::{LineageError, Result};
use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};

const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Exclusive upper time bound: only commits strictly before it are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoff(DateTime<FixedOffset>);

impl Cutoff {
    /// Parses `YYYY-MM-DD` as local midnight, `YYYY-MM-DD HH:MM[:SS]` as
    /// local time, or an RFC 3339 timestamp with its own offset.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let invalid = || LineageError::InvalidDate {
            input: input.to_string(),
        };

        if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self(instant));
        }

        let naive = LOCAL_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(input, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .ok_or_else(invalid)?;

        // Local midnight can be skipped by a DST change; move past the gap.
        Local
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| Local.from_local_datetime(&(naive + Duration::hours(1))).earliest())
            .map(|instant| Self(instant.fixed_offset()))
            .ok_or_else(invalid)
    }

    pub fn from_timestamp(seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(seconds, 0).map(|utc| Self(utc.fixed_offset()))
    }

    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// True when a commit made at `seconds` falls on or after the cutoff.
    pub fn excludes(&self, seconds: i64) -> bool {
        seconds >= self.timestamp()
    }

    /// Value for `git log --before`, which is inclusive, so we step back a second.
    pub fn git_before(&self) -> String {
        (self.0 - Duration::seconds(1))
            .format("%Y-%m-%d %H:%M:%S %z")
            .to_string()
    }
}
