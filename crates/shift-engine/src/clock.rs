//! Wall-clock arithmetic on a circular 24-hour dial.
//!
//! All times are naive minutes-of-day. Every value that leaves this module is
//! normalized with a floor modulo, so an offset that runs past midnight in
//! either direction lands on the equivalent time of the neighbouring day
//! (`-10` becomes `23:50`, `1450` becomes `00:10`).

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, ShiftError};

/// Minutes in one day; the modulus of the clock.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Rounding step used when the caller does not choose one.
pub const DEFAULT_GRANULARITY: u32 = 5;

/// A time of day, stored as minutes since midnight in `[0, 1440)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build a clock time from any minute offset, wrapping with floor modulo.
    pub fn from_minutes(minutes: i64) -> Self {
        ClockTime(minutes.rem_euclid(MINUTES_PER_DAY as i64) as u16)
    }

    /// Build a clock time from hours and minutes. Out-of-range parts wrap.
    pub fn from_hm(hours: u32, minutes: u32) -> Self {
        Self::from_minutes(hours as i64 * 60 + minutes as i64)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        self.0 as u32
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// Move this time by `delta` minutes (negative moves earlier), wrapping
    /// around midnight.
    pub fn offset(self, delta: i64) -> Self {
        Self::from_minutes(self.0 as i64 + delta)
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(self.minutes() * 60, 0).unwrap_or_default()
    }
}

impl From<NaiveTime> for ClockTime {
    /// Seconds are truncated.
    fn from(time: NaiveTime) -> Self {
        ClockTime::from_hm(time.hour(), time.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self> {
        parse_clock_time(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_clock_time(&text).map_err(serde::de::Error::custom)
    }
}

/// A positive rounding step in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Granularity(NonZeroU32);

impl Granularity {
    /// # Errors
    /// Returns `ShiftError::InvalidGranularity` when `minutes` is zero.
    pub fn new(minutes: u32) -> Result<Self> {
        NonZeroU32::new(minutes)
            .map(Granularity)
            .ok_or(ShiftError::InvalidGranularity(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0.get()
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity(NonZeroU32::MIN.saturating_add(DEFAULT_GRANULARITY - 1))
    }
}

impl TryFrom<u32> for Granularity {
    type Error = ShiftError;

    fn try_from(minutes: u32) -> Result<Self> {
        Granularity::new(minutes)
    }
}

impl From<Granularity> for u32 {
    fn from(granularity: Granularity) -> u32 {
        granularity.minutes()
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An interval on the clock. `end <= start` means the interval runs past
/// midnight, so `start == end` spans a full day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl Interval {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Interval { start, end }
    }

    /// Parse both ends from "HH:MM" strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Interval::new(start.parse()?, end.parse()?))
    }

    pub fn duration_minutes(&self) -> u32 {
        interval_duration(self.start, self.end)
    }

    /// True when the interval ends on the following day (including the
    /// full-day case `start == end`).
    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }
}

/// Parse an "HH:MM" string into a [`ClockTime`].
///
/// Hours and minutes are not range checked; `HH * 60 + MM` is wrapped onto
/// the dial, so "24:30" reads as 00:30.
///
/// # Errors
/// Returns `ShiftError::InvalidFormat` unless the input is exactly two
/// colon-separated integers.
pub fn parse_clock_time(text: &str) -> Result<ClockTime> {
    let invalid = || ShiftError::InvalidFormat(text.to_string());

    let (hours, minutes) = text.trim().split_once(':').ok_or_else(invalid)?;
    let hours: i64 = hours.trim().parse().map_err(|_| invalid())?;
    let minutes: i64 = minutes.trim().parse().map_err(|_| invalid())?;

    let total = hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(invalid)?;
    Ok(ClockTime::from_minutes(total))
}

/// Render any minute offset as zero-padded "HH:MM" after floor-modulo
/// normalization.
pub fn format_clock_time(minutes: i64) -> String {
    ClockTime::from_minutes(minutes).to_string()
}

/// Round `minutes` to the nearest multiple of `granularity`, ties away from
/// zero.
pub fn round_to_granularity(minutes: u32, granularity: Granularity) -> u32 {
    let step = granularity.minutes() as u64;
    (round_half_up(minutes as u64, step) * step) as u32
}

/// Snap a time of day to the nearest granularity mark, wrapping 23:58 to
/// 00:00 at a 5-minute step.
pub fn round_clock_time(time: ClockTime, granularity: Granularity) -> ClockTime {
    ClockTime::from_minutes(round_to_granularity(time.minutes(), granularity) as i64)
}

/// Length of the interval from `start` to `end` in minutes.
///
/// `end <= start` adds a day to `end`, so equal endpoints yield 1440.
pub fn interval_duration(start: ClockTime, end: ClockTime) -> u32 {
    if end <= start {
        end.minutes() + MINUTES_PER_DAY - start.minutes()
    } else {
        end.minutes() - start.minutes()
    }
}

/// `round(numerator / denominator)` with ties rounded up, in exact integer
/// arithmetic. `denominator` must be non-zero.
pub(crate) fn round_half_up(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}
