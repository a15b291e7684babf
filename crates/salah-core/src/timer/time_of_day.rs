use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Wall-clock time of day with minute precision (seconds are always zero).
///
/// The default is midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ScheduleError> {
        if hour > 23 {
            return Err(malformed(
                &format!("{hour:02}:{minute:02}"),
                "hour out of range 0-23",
            ));
        }
        if minute > 59 {
            return Err(malformed(
                &format!("{hour:02}:{minute:02}"),
                "minute out of range 0-59",
            ));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        // Range is checked in `new`.
        NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, 0).unwrap_or(NaiveTime::MIN)
    }

    /// This time of day on `date`.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.as_naive_time())
    }

    /// 12-hour rendering: `5:07 AM`, `12:30 PM`, `12:05 AM`.
    pub fn format_12h(&self) -> String {
        let meridiem = if self.hour >= 12 { "PM" } else { "AM" };
        let hour12 = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{hour12}:{:02} {meridiem}", self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    /// Parses 24-hour `HH:MM`. Surrounding whitespace is tolerated, anything
    /// else (seconds, suffixes, signs) is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (h, m) = trimmed
            .split_once(':')
            .ok_or_else(|| malformed(s, "expected HH:MM"))?;

        let hour = parse_field(s, h, "hour")?;
        let minute = parse_field(s, m, "minute")?;

        if hour > 23 {
            return Err(malformed(s, "hour out of range 0-23"));
        }
        if minute > 59 {
            return Err(malformed(s, "minute out of range 0-59"));
        }
        Ok(Self { hour, minute })
    }
}

fn parse_field(input: &str, field: &str, what: &str) -> Result<u8, ScheduleError> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(input, &format!("{what} must be one or two digits")));
    }
    field
        .parse::<u8>()
        .map_err(|e| malformed(input, &format!("{what}: {e}")))
}

fn malformed(input: &str, reason: &str) -> ScheduleError {
    ScheduleError::MalformedTimeOfDay {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_24_hour_time() {
        let t: TimeOfDay = "05:07".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (5, 7));
        let t: TimeOfDay = "23:59".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (23, 59));
    }

    #[test]
    fn accepts_single_digit_hour_and_whitespace() {
        let t: TimeOfDay = " 5:30 ".parse().unwrap();
        assert_eq!(t.to_string(), "05:30");
    }

    #[test]
    fn rejects_out_of_range() {
        for input in ["25:99", "24:00", "12:60"] {
            let err = input.parse::<TimeOfDay>().unwrap_err();
            assert!(
                matches!(err, ScheduleError::MalformedTimeOfDay { .. }),
                "{input} should be malformed"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_and_shapes() {
        for input in ["", "ab:cd", "12", "12:", ":30", "12:30:00", "-1:30", "05:12 (EST)", "123:00"] {
            assert!(input.parse::<TimeOfDay>().is_err(), "{input} should fail");
        }
    }

    #[test]
    fn formats_12_hour_clock() {
        let fmt = |s: &str| s.parse::<TimeOfDay>().unwrap().format_12h();
        assert_eq!(fmt("05:07"), "5:07 AM");
        assert_eq!(fmt("12:30"), "12:30 PM");
        assert_eq!(fmt("00:05"), "12:05 AM");
        assert_eq!(fmt("19:45"), "7:45 PM");
    }

    #[test]
    fn new_validates_range() {
        assert!(TimeOfDay::new(23, 59).is_ok());
        assert!(TimeOfDay::new(24, 0).is_err());
        assert!(TimeOfDay::new(0, 60).is_err());
    }

    #[test]
    fn serde_uses_hh_mm_string() {
        let t = TimeOfDay::new(6, 0).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"06:00\"");
        let back: TimeOfDay = serde_json::from_str("\"18:15\"").unwrap();
        assert_eq!(back, TimeOfDay::new(18, 15).unwrap());
        assert!(serde_json::from_str::<TimeOfDay>("\"25:99\"").is_err());
    }
}
