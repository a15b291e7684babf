use salah_core::PrayerEngine;
use std::path::Path;

use super::{load_config, ScheduleArgs};

/// Print the countdown to the next prayer as JSON.
pub fn run_next(args: ScheduleArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let schedule = args.schedule(&config)?;
    let now = args.now()?;

    let mut engine = PrayerEngine::new(schedule, config.progress_tracker());
    let (countdown, _) = engine.tick(now);
    println!("{}", serde_json::to_string_pretty(&countdown)?);
    Ok(())
}

/// Print a fresh session snapshot as JSON.
pub fn run_status(args: ScheduleArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let schedule = args.schedule(&config)?;
    let now = args.now()?;

    let engine = PrayerEngine::new(schedule, config.progress_tracker());
    println!("{}", serde_json::to_string_pretty(&engine.snapshot(now))?);
    Ok(())
}
