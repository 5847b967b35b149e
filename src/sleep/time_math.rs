use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, TimeZone, Timelike};
use serde::{Serialize, Serializer};
use thiserror::Error;

pub const MIN_LATENCY_MINUTES: u32 = 1;
pub const MAX_LATENCY_MINUTES: u32 = 60;
pub const DEFAULT_LATENCY_MINUTES: u32 = 15;

const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TimeMathError {
    #[error("Please select a number between 1 and 60.")]
    InvalidLatency { input: String },
    #[error("invalid clock time '{input}', expected HH:MM")]
    InvalidClockTime { input: String },
}

/// Minutes a user takes to fall asleep, always within 1..=60.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LatencyMinutes(u32);

impl LatencyMinutes {
    pub fn new(minutes: u32) -> Result<Self, TimeMathError> {
        if (MIN_LATENCY_MINUTES..=MAX_LATENCY_MINUTES).contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(TimeMathError::InvalidLatency {
                input: minutes.to_string(),
            })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for LatencyMinutes {
    fn default() -> Self {
        Self(DEFAULT_LATENCY_MINUTES)
    }
}

impl fmt::Display for LatencyMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LatencyMinutes {
    type Err = TimeMathError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_latency(input)
    }
}

pub fn parse_latency(input: &str) -> Result<LatencyMinutes, TimeMathError> {
    let invalid = || TimeMathError::InvalidLatency {
        input: input.to_string(),
    };
    let value = input.trim().parse::<i64>().map_err(|_| invalid())?;
    let value = u32::try_from(value).map_err(|_| invalid())?;
    LatencyMinutes::new(value).map_err(|_| invalid())
}

pub fn is_valid_latency(input: &str) -> bool {
    parse_latency(input).is_ok()
}

/// Wall-clock time of day at minute resolution. Arithmetic wraps at midnight.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    #[cfg(test)]
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeMathError> {
        if hour > 23 || minute > 59 {
            return Err(TimeMathError::InvalidClockTime {
                input: format!("{hour:02}:{minute:02}"),
            });
        }
        Ok(Self { hour, minute })
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }

    pub fn from_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self {
            hour: instant.hour(),
            minute: instant.minute(),
        }
    }

    pub fn minutes_since_midnight(self) -> u32 {
        self.hour * 60 + self.minute
    }

    pub fn add_minutes(self, delta: i64) -> Self {
        let total = (i64::from(self.minutes_since_midnight()) + delta).rem_euclid(MINUTES_PER_DAY);
        // rem_euclid keeps total in 0..1440
        let total = total as u32;
        Self {
            hour: total / 60,
            minute: total % 60,
        }
    }

    pub fn sub_minutes(self, delta: i64) -> Self {
        self.add_minutes(-delta)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = TimeMathError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(Self::from_naive)
            .map_err(|_| TimeMathError::InvalidClockTime {
                input: input.to_string(),
            })
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn format_clock_time(time: ClockTime) -> String {
    time.to_string()
}

/// Renders a minute count as `"Xh Ym"`, e.g. 540 -> `"9h 0m"`.
pub fn format_total_sleep(total_minutes: u32) -> String {
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

/// Renders a countdown as `M:SS`.
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    use super::*;

    #[test]
    fn latency_validator_matches_accepted_range() {
        for rejected in ["0", "61", "", "abc", "-5", "1.5", "  "] {
            assert!(!is_valid_latency(rejected), "{rejected:?} should be rejected");
        }
        for accepted in ["1", "60", "15", " 30 "] {
            assert!(is_valid_latency(accepted), "{accepted:?} should be accepted");
        }
    }

    #[test]
    fn invalid_latency_message_is_user_facing() {
        let err = parse_latency("61").expect_err("out of range");
        assert_eq!(err.to_string(), "Please select a number between 1 and 60.");
    }

    #[test]
    fn huge_latency_input_does_not_overflow() {
        assert!(!is_valid_latency("99999999999999999999"));
        assert!(!is_valid_latency("4294967297"));
    }

    #[test]
    fn clock_time_parses_picker_formats() {
        let time: ClockTime = "07:05".parse().expect("hh:mm");
        assert_eq!(time.minutes_since_midnight(), 7 * 60 + 5);
        let with_seconds: ClockTime = "23:59:30".parse().expect("hh:mm:ss");
        assert_eq!(with_seconds.to_string(), "23:59");
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("7".parse::<ClockTime>().is_err());
        assert!("".parse::<ClockTime>().is_err());
    }

    #[test]
    fn out_of_range_components_report_padded_time() {
        let err = ClockTime::new(24, 5).expect_err("hour out of range");
        assert_eq!(err.to_string(), "invalid clock time '24:05', expected HH:MM");
        assert!(ClockTime::new(7, 60).is_err());
    }

    #[test]
    fn clock_arithmetic_wraps_both_directions() {
        let seven = ClockTime::new(7, 0).expect("valid");
        assert_eq!(seven.sub_minutes(555).to_string(), "21:45");
        let late = ClockTime::new(23, 30).expect("valid");
        assert_eq!(late.add_minutes(45).to_string(), "00:15");
        assert_eq!(late.add_minutes(3 * 1440 + 1).to_string(), "23:31");
        assert_eq!(seven.sub_minutes(10 * 1440).to_string(), "07:00");
    }

    #[test]
    fn formats_durations_and_countdowns() {
        assert_eq!(format_total_sleep(540), "9h 0m");
        assert_eq!(format_total_sleep(90), "1h 30m");
        assert_eq!(format_countdown(120), "2:00");
        assert_eq!(format_countdown(59), "0:59");
        assert_eq!(format_clock_time(ClockTime::new(0, 5).expect("valid")), "00:05");
    }

    #[test]
    fn from_datetime_uses_wall_clock_fields() {
        let instant = New_York
            .with_ymd_and_hms(2026, 3, 8, 3, 15, 42)
            .single()
            .expect("valid");
        assert_eq!(ClockTime::from_datetime(&instant).to_string(), "03:15");
    }

    #[test]
    fn serializes_as_hhmm_string() {
        let json = serde_json::to_string(&ClockTime::new(6, 30).expect("valid")).expect("json");
        assert_eq!(json, "\"06:30\"");
    }
}
