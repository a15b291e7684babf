mod chime;
mod engine;
mod resolver;
mod schedule;
mod time_of_day;

pub use chime::{ChimeGate, ZeroCrossing};
pub use engine::PrayerEngine;
pub use resolver::{due_at, next_event, Countdown, NextEvent};
pub use schedule::EventSchedule;
pub use time_of_day::TimeOfDay;
