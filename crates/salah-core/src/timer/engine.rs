//! Session engine.
//!
//! Like the rest of the timer module the engine owns no threads; the caller
//! supplies "now" on every `tick()` and on every user action.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PrayerEngine::new(schedule, ProgressTracker::new());
//! // Once a second:
//! let (countdown, adhan) = engine.tick(now);
//! // On "mark as done":
//! let events = engine.complete(Prayer::Asr, now);
//! ```

use chrono::NaiveDateTime;

use super::chime::ChimeGate;
use super::resolver::{next_event, NextEvent};
use super::schedule::EventSchedule;
use crate::events::{Event, PrayerCard};
use crate::prayer::Prayer;
use crate::progress::{Completion, ProgressTracker};

/// One day's session: fixed schedule, completion ledger, chime filter.
///
/// All state is discarded when the engine is dropped.
#[derive(Debug, Clone)]
pub struct PrayerEngine {
    schedule: EventSchedule,
    progress: ProgressTracker,
    chime: ChimeGate,
}

impl PrayerEngine {
    pub fn new(schedule: EventSchedule, progress: ProgressTracker) -> Self {
        Self {
            schedule,
            progress,
            chime: ChimeGate::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn schedule(&self) -> &EventSchedule {
        &self.schedule
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn next_event(&self, now: NaiveDateTime) -> NextEvent {
        next_event(&self.schedule, now)
    }

    pub fn cards(&self) -> Vec<PrayerCard> {
        self.schedule
            .iter()
            .map(|(prayer, time)| {
                let detail = prayer.detail();
                PrayerCard {
                    prayer,
                    time: time.to_string(),
                    time_12h: time.format_12h(),
                    units: detail.units(),
                    color: detail.color,
                    completed: self.progress.is_completed(prayer),
                }
            })
            .collect()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: NaiveDateTime) -> Event {
        let next = self.next_event(now);
        Event::StateSnapshot {
            next: next.label(),
            remaining: next.countdown().to_string(),
            remaining_ms: next.remaining_ms,
            points: self.progress.points(),
            prayers: self.cards(),
            tiers: self.progress.unlocked_tiers(),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Call once per second. Returns the countdown and, on the tick where the
    /// countdown reaches zero, an `AdhanDue` event.
    pub fn tick(&mut self, now: NaiveDateTime) -> (Event, Option<Event>) {
        let next = self.next_event(now);
        let adhan = self
            .chime
            .observe(&self.schedule, &next, now)
            .map(|crossing| {
                tracing::info!(prayer = %crossing.prayer, starts_at = %crossing.target, "adhan due");
                Event::AdhanDue {
                    prayer: crossing.prayer,
                    target: crossing.target,
                    at: now,
                }
            });

        let countdown = Event::Countdown {
            next: next.label(),
            prayer: next.prayer,
            tomorrow: next.tomorrow,
            target: next.target,
            remaining_ms: next.remaining_ms,
            remaining: next.countdown().to_string(),
            at: now,
        };
        (countdown, adhan)
    }

    /// Mark a prayer done. Returns the completion (or already-completed)
    /// event followed by any rewards this award unlocked.
    pub fn complete(&mut self, prayer: Prayer, now: NaiveDateTime) -> Vec<Event> {
        match self.progress.complete(prayer) {
            Completion::Awarded {
                points_awarded,
                total_points,
                newly_unlocked,
            } => {
                let mut events = Vec::with_capacity(1 + newly_unlocked.len());
                events.push(Event::PrayerCompleted {
                    prayer,
                    points_awarded,
                    total_points,
                    at: now,
                });
                events.extend(newly_unlocked.into_iter().map(|tier| Event::RewardUnlocked {
                    threshold: tier.threshold,
                    label: tier.label,
                    at: now,
                }));
                events
            }
            Completion::AlreadyCompleted { total_points } => vec![Event::AlreadyCompleted {
                prayer,
                total_points,
                at: now,
            }],
        }
    }
}
