//! # Salah Core Library
//!
//! This library provides the core logic for Salah, a daily prayer tracker.
//! The CLI is a thin surface over the same library; anything that fetches
//! timings, renders cards or plays audio lives outside this crate.
//!
//! ## Architecture
//!
//! - **Timer**: pure next-prayer resolution over today's times plus a
//!   fire-once zero-crossing filter, driven by a caller-supplied clock
//! - **Progress**: session-scoped completion ledger, points and reward tiers
//! - **Storage**: TOML-based configuration (rewards, chime, fallback timings)
//!
//! ## Key Components
//!
//! - [`PrayerEngine`]: one session; `tick()` once a second, `complete()` on
//!   user action
//! - [`next_event`]: the resolver itself
//! - [`ProgressTracker`]: idempotent point awards
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod prayer;
pub mod progress;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, ProgressError, ScheduleError};
pub use events::{Event, PrayerCard};
pub use prayer::{ColorTag, Prayer, PrayerDetail};
pub use progress::{Completion, ProgressTracker, RewardTier, TierStatus};
pub use storage::Config;
pub use timer::{
    next_event, ChimeGate, Countdown, EventSchedule, NextEvent, PrayerEngine, TimeOfDay,
    ZeroCrossing,
};
