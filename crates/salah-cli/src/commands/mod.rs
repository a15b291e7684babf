pub mod config;
pub mod next;
pub mod prayers;
pub mod watch;

use chrono::{Local, NaiveDateTime};
use clap::Args;
use salah_core::{Config, EventSchedule, Prayer, ScheduleError};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Where today's timings and "now" come from.
///
/// Timings are layered: config `[timings]`, then `--timings-json`, then
/// each `--time`.
#[derive(Args, Debug, Default)]
pub struct ScheduleArgs {
    /// Prayer time override, repeatable (e.g. --time Fajr=05:12)
    #[arg(long = "time", value_name = "NAME=HH:MM")]
    pub times: Vec<String>,
    /// JSON object of timings, e.g. saved from a prayer-times API
    #[arg(long, value_name = "FILE")]
    pub timings_json: Option<PathBuf>,
    /// Pretend the local time is this ("YYYY-MM-DD HH:MM:SS")
    #[arg(long)]
    pub now: Option<String>,
}

impl ScheduleArgs {
    pub fn schedule(&self, config: &Config) -> Result<EventSchedule, Box<dyn std::error::Error>> {
        let mut timings: HashMap<String, String> = config
            .timings
            .iter()
            .map(|(k, v)| (canonical(k), v.clone()))
            .collect();

        if let Some(path) = &self.timings_json {
            let content = std::fs::read_to_string(path)?;
            let value: serde_json::Value = serde_json::from_str(&content)?;
            let obj = value
                .as_object()
                .ok_or_else(|| format!("{}: expected a JSON object", path.display()))?;
            let mut in_file = HashSet::new();
            for (k, v) in obj {
                let Some(s) = v.as_str() else {
                    continue;
                };
                if let Ok(prayer) = k.parse::<Prayer>() {
                    if !in_file.insert(prayer) {
                        return Err(ScheduleError::DuplicateScheduleData { prayer }.into());
                    }
                }
                timings.insert(canonical(k), s.to_string());
            }
        }

        for entry in &self.times {
            let (name, time) = entry
                .split_once('=')
                .ok_or_else(|| format!("expected NAME=HH:MM, got '{entry}'"))?;
            timings.insert(canonical(name), time.to_string());
        }

        Ok(EventSchedule::from_timings(&timings)?)
    }

    pub fn now(&self) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
        match &self.now {
            Some(s) => parse_now(s),
            None => Ok(Local::now().naive_local()),
        }
    }
}

/// Same key for `fajr`, `Fajr` and ` FAJR`.
fn canonical(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

pub fn parse_now(s: &str) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s.trim(), fmt) {
            return Ok(dt);
        }
    }
    Err(format!("cannot parse '{s}' as YYYY-MM-DD HH:MM:SS").into())
}

pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(p) => Config::load_from(p)?,
        None => Config::load()?,
    };
    Ok(config)
}

pub fn save_config(config: &Config, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => config.save_to(p)?,
        None => config.save()?,
    }
    Ok(())
}
