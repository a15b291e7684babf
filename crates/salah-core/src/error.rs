//! Core error types for salah-core.
//!
//! Schedule validation, progress input and configuration each get their own
//! enum; [`CoreError`] wraps them for callers that do not care which layer
//! failed.

use std::path::PathBuf;
use thiserror::Error;

use crate::prayer::Prayer;

/// Core error type for salah-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Schedule input errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Progress tracker input errors
    #[error("Progress error: {0}")]
    Progress(#[from] ProgressError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while turning raw timings into an [`EventSchedule`](crate::EventSchedule).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A configured prayer has no time of day.
    #[error("Missing schedule data: no time for {prayer}")]
    MissingScheduleData { prayer: Prayer },

    /// Two keys name the same prayer, e.g. `Fajr` and `fajr`.
    #[error("Duplicate schedule data: more than one time for {prayer}")]
    DuplicateScheduleData { prayer: Prayer },

    /// A time string is not a valid 24-hour `HH:MM`.
    #[error("Malformed time of day '{input}': {reason}")]
    MalformedTimeOfDay { input: String, reason: String },

    /// The timings payload is not a JSON object of strings.
    #[error("Invalid timings payload: {0}")]
    InvalidPayload(String),
}

/// Errors raised by the progress tracker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    /// The name does not match any of the five prayers.
    #[error("Unknown prayer: '{0}'")]
    UnknownPrayer(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Could not resolve the configuration directory
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
