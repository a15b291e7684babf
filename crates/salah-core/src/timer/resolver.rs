//! Next-prayer resolution.
//!
//! Pure functions over an [`EventSchedule`] and a wall-clock instant. Nothing
//! here keeps state between ticks; the caller re-resolves every second.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::schedule::EventSchedule;
use crate::prayer::Prayer;

/// The nearest upcoming prayer and the time left until it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextEvent {
    pub prayer: Prayer,
    /// Set when every prayer of today has passed and this is tomorrow's
    /// day-opening prayer.
    pub tomorrow: bool,
    pub target: NaiveDateTime,
    pub remaining_ms: u64,
}

impl NextEvent {
    /// `Isha`, or `Fajr (tomorrow)` after rollover.
    pub fn label(&self) -> String {
        if self.tomorrow {
            format!("{} (tomorrow)", self.prayer)
        } else {
            self.prayer.to_string()
        }
    }

    pub fn countdown(&self) -> Countdown {
        Countdown::from_millis(self.remaining_ms)
    }
}

/// Remaining time split into whole units, floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    pub fn from_millis(ms: u64) -> Self {
        let total_secs = ms / 1000;
        Self {
            hours: total_secs / 3600,
            minutes: (total_secs % 3600) / 60,
            seconds: total_secs % 60,
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.total_secs() == 0
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}

/// Resolve the next prayer strictly after `now`.
///
/// Only today's prayers with a positive delta are candidates; the smallest
/// delta wins. When none is left, the day-opening prayer on the next calendar
/// day is returned with `tomorrow` set.
pub fn next_event(schedule: &EventSchedule, now: NaiveDateTime) -> NextEvent {
    let today = now.date();

    let upcoming = schedule
        .iter()
        .map(|(prayer, time)| (prayer, time.on(today)))
        .filter(|(_, target)| *target > now)
        .min_by_key(|(_, target)| *target);

    match upcoming {
        Some((prayer, target)) => NextEvent {
            prayer,
            tomorrow: false,
            target,
            remaining_ms: millis_between(now, target),
        },
        None => {
            let prayer = Prayer::DAY_OPENING;
            let tomorrow = today.succ_opt().unwrap_or(NaiveDate::MAX);
            let target = schedule.time_of(prayer).on(tomorrow);
            NextEvent {
                prayer,
                tomorrow: true,
                target,
                remaining_ms: millis_between(now, target),
            }
        }
    }
}

/// The prayer whose start falls in the one-second window ending at `now`,
/// i.e. `target <= now < target + 1s`.
pub fn due_at(schedule: &EventSchedule, now: NaiveDateTime) -> Option<(Prayer, NaiveDateTime)> {
    let today = now.date();
    schedule
        .iter()
        .map(|(prayer, time)| (prayer, time.on(today)))
        .find(|(_, target)| *target <= now && now - *target < TimeDelta::seconds(1))
}

fn millis_between(from: NaiveDateTime, to: NaiveDateTime) -> u64 {
    (to - from).num_milliseconds().max(0) as u64
}
