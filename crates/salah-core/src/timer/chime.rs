use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::resolver::{due_at, NextEvent};
use super::schedule::EventSchedule;
use crate::prayer::Prayer;

/// A countdown reached zero for `prayer` starting at `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeroCrossing {
    pub prayer: Prayer,
    pub target: NaiveDateTime,
}

/// Fire-once filter for zero-crossings on a coarse tick.
///
/// A crossing is seen either just before the start (the resolved countdown
/// floors to `0s`) or in the first second after it (the prayer is due). The
/// two windows together span two seconds, so a one-second tick always lands
/// in at least one of them, and often in both. Each target instant fires at
/// most once.
#[derive(Debug, Clone, Default)]
pub struct ChimeGate {
    last_fired: Option<NaiveDateTime>,
}

impl ChimeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one tick. `next` must be the resolution of `schedule` at `now`.
    pub fn observe(
        &mut self,
        schedule: &EventSchedule,
        next: &NextEvent,
        now: NaiveDateTime,
    ) -> Option<ZeroCrossing> {
        let crossing = if next.countdown().is_zero() {
            Some(ZeroCrossing {
                prayer: next.prayer,
                target: next.target,
            })
        } else {
            due_at(schedule, now).map(|(prayer, target)| ZeroCrossing { prayer, target })
        }?;

        if self.last_fired == Some(crossing.target) {
            return None;
        }
        self.last_fired = Some(crossing.target);
        Some(crossing)
    }

    pub fn last_fired(&self) -> Option<NaiveDateTime> {
        self.last_fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::resolver::next_event;
    use chrono::TimeDelta;
    use std::collections::HashMap;

    fn schedule() -> EventSchedule {
        EventSchedule::from_timings(&HashMap::from([
            ("Fajr", "05:00"),
            ("Dhuhr", "12:00"),
            ("Asr", "15:00"),
            ("Maghrib", "18:00"),
            ("Isha", "20:00"),
        ]))
        .unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap()
    }

    fn tick(gate: &mut ChimeGate, s: &EventSchedule, now: NaiveDateTime) -> Option<ZeroCrossing> {
        let next = next_event(s, now);
        gate.observe(s, &next, now)
    }

    #[test]
    fn fires_once_at_exact_start() {
        let s = schedule();
        let mut gate = ChimeGate::new();
        let now = at("2026-03-10 12:00:00");

        let fired = tick(&mut gate, &s, now).unwrap();
        assert_eq!(fired.prayer, Prayer::Dhuhr);
        assert_eq!(fired.target, now);

        assert!(tick(&mut gate, &s, at("2026-03-10 12:00:00.300")).is_none());
        assert!(tick(&mut gate, &s, at("2026-03-10 12:00:00.900")).is_none());
    }

    #[test]
    fn fires_once_across_both_windows() {
        let s = schedule();
        let mut gate = ChimeGate::new();

        assert!(tick(&mut gate, &s, at("2026-03-10 14:59:58.500")).is_none());
        let fired = tick(&mut gate, &s, at("2026-03-10 14:59:59.500")).unwrap();
        assert_eq!(fired.prayer, Prayer::Asr);
        assert!(tick(&mut gate, &s, at("2026-03-10 15:00:00.500")).is_none());
        assert!(tick(&mut gate, &s, at("2026-03-10 15:00:01.500")).is_none());
    }

    #[test]
    fn one_second_ticks_fire_exactly_once_per_prayer() {
        let s = schedule();
        let mut gate = ChimeGate::new();
        let mut now = at("2026-03-10 00:00:00.250");
        let end = at("2026-03-11 00:00:00");
        let mut fired = Vec::new();

        while now < end {
            if let Some(c) = tick(&mut gate, &s, now) {
                fired.push(c.prayer);
            }
            now += TimeDelta::seconds(1);
        }

        assert_eq!(fired, Prayer::ALL.to_vec());
    }

    #[test]
    fn quiet_between_prayers() {
        let s = schedule();
        let mut gate = ChimeGate::new();
        assert!(tick(&mut gate, &s, at("2026-03-10 13:00:00")).is_none());
        assert!(gate.last_fired().is_none());
    }
}
