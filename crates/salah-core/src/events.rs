use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::prayer::Prayer;
use crate::progress::TierStatus;

/// Every state change in a session produces an Event.
/// The presentation layer polls for them; the chime collaborator listens
/// for `AdhanDue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Per-tick countdown to the next prayer.
    Countdown {
        /// `Isha` or `Fajr (tomorrow)`.
        next: String,
        prayer: Prayer,
        tomorrow: bool,
        target: NaiveDateTime,
        remaining_ms: u64,
        /// `{h}h {m}m {s}s`, floored.
        remaining: String,
        at: NaiveDateTime,
    },
    /// The countdown reached zero. Fired once per prayer start.
    AdhanDue {
        prayer: Prayer,
        target: NaiveDateTime,
        at: NaiveDateTime,
    },
    PrayerCompleted {
        prayer: Prayer,
        points_awarded: u32,
        total_points: u32,
        at: NaiveDateTime,
    },
    /// A repeated "mark done" for the same prayer; no points.
    AlreadyCompleted {
        prayer: Prayer,
        total_points: u32,
        at: NaiveDateTime,
    },
    RewardUnlocked {
        threshold: u32,
        label: String,
        at: NaiveDateTime,
    },
    /// Full state for a fresh presentation layer.
    StateSnapshot {
        next: String,
        remaining: String,
        remaining_ms: u64,
        points: u32,
        prayers: Vec<PrayerCard>,
        tiers: Vec<TierStatus>,
        at: NaiveDateTime,
    },
}

/// Everything a prayer card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerCard {
    pub prayer: Prayer,
    /// 24-hour `HH:MM`.
    pub time: String,
    /// 12-hour clock, e.g. `5:07 AM`.
    pub time_12h: String,
    pub units: Vec<String>,
    pub color: crate::prayer::ColorTag,
    pub completed: bool,
}
