//! Live session: one-second countdown plus "mark as done" from stdin.
//!
//! Points and completions exist only for the lifetime of this command.

use chrono::NaiveDateTime;
use clap::Args;
use salah_core::{Event, Prayer, PrayerEngine};
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use super::{load_config, ScheduleArgs};
use crate::chime::Chime;

#[derive(Args)]
pub struct WatchArgs {
    #[command(flatten)]
    schedule: ScheduleArgs,
    /// Emit every event as a JSON line instead of text
    #[arg(long)]
    json: bool,
}

/// A line typed into the session.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Done(Prayer),
    Status,
    Quit,
    Empty,
}

fn parse_input(line: &str) -> Result<Input, Box<dyn std::error::Error>> {
    let mut words = line.split_whitespace();
    match words.next() {
        None => Ok(Input::Empty),
        Some("done") | Some("d") => {
            let name = words.next().ok_or("usage: done <prayer>")?;
            Ok(Input::Done(name.parse()?))
        }
        Some("status") | Some("s") => Ok(Input::Status),
        Some("quit") | Some("q") | Some("exit") => Ok(Input::Quit),
        Some(other) => Err(format!("unknown command '{other}' (done <prayer>, status, quit)").into()),
    }
}

pub fn run(args: WatchArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let schedule = args.schedule.schedule(&config)?;
    let offset = match &args.schedule.now {
        Some(_) => Some(args.schedule.now()? - chrono::Local::now().naive_local()),
        None => None,
    };

    let engine = PrayerEngine::new(schedule, config.progress_tracker());
    let chime = Chime::from_config(&config.chime);
    let mut session = Session {
        engine,
        chime,
        json: args.json,
        clock_12h: config.display.clock_12h,
        offset,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session.run())
}

struct Session {
    engine: PrayerEngine,
    chime: Chime,
    json: bool,
    clock_12h: bool,
    /// Shift applied to the wall clock when `--now` was given.
    offset: Option<chrono::TimeDelta>,
}

impl Session {
    fn now(&self) -> NaiveDateTime {
        let wall = chrono::Local::now().naive_local();
        match self.offset {
            Some(delta) => wall + delta,
            None => wall,
        }
    }

    async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        tracing::info!("session started");
        self.print_status(self.now())?;

        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let now = self.now();
                    let (countdown, adhan) = self.engine.tick(now);
                    self.emit(&countdown)?;
                    if let Some(event) = adhan {
                        self.emit(&event)?;
                        if let Event::AdhanDue { prayer, .. } = event {
                            self.chime.ring(prayer);
                        }
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    match parse_input(&line) {
                        Ok(Input::Done(prayer)) => {
                            for event in self.engine.complete(prayer, self.now()) {
                                self.emit(&event)?;
                            }
                        }
                        Ok(Input::Status) => self.print_status(self.now())?,
                        Ok(Input::Quit) => break,
                        Ok(Input::Empty) => {}
                        Err(e) => eprintln!("error: {e}"),
                    }
                }
                _ = &mut ctrl_c => break,
            }
        }

        tracing::info!(points = self.engine.progress().points(), "session ended");
        Ok(())
    }

    fn emit(&self, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }
        match event {
            Event::Countdown { next, remaining, .. } => {
                println!("Next: {next}  {remaining}  ({} pts)", self.engine.progress().points());
            }
            Event::AdhanDue { prayer, .. } => println!("It's time for {prayer}"),
            Event::PrayerCompleted {
                prayer,
                points_awarded,
                total_points,
                ..
            } => println!("{prayer} completed! +{points_awarded} pts (total {total_points})"),
            Event::AlreadyCompleted { prayer, .. } => println!("{prayer} is already completed"),
            Event::RewardUnlocked { threshold, label, .. } => {
                println!("Reward unlocked at {threshold} pts: {label}")
            }
            Event::StateSnapshot { .. } => println!("{}", serde_json::to_string_pretty(event)?),
        }
        Ok(())
    }

    fn print_status(&self, now: NaiveDateTime) -> Result<(), Box<dyn std::error::Error>> {
        if self.json {
            return self.emit(&self.engine.snapshot(now));
        }
        for card in self.engine.cards() {
            let time = if self.clock_12h { &card.time_12h } else { &card.time };
            let mark = if card.completed { "[x]" } else { "[ ]" };
            println!("{mark} {:<8} {:>8}  {}", card.prayer, time, card.units.join(" · "));
        }
        for status in self.engine.progress().unlocked_tiers() {
            let mark = if status.unlocked { "*" } else { " " };
            println!("{mark} {:>4} pts  {}", status.tier.threshold, status.tier.label);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_commands() {
        assert_eq!(parse_input("done fajr").unwrap(), Input::Done(Prayer::Fajr));
        assert_eq!(parse_input("  d Isha ").unwrap(), Input::Done(Prayer::Isha));
        assert_eq!(parse_input("status").unwrap(), Input::Status);
        assert_eq!(parse_input("q").unwrap(), Input::Quit);
        assert_eq!(parse_input("   ").unwrap(), Input::Empty);
    }

    #[test]
    fn rejects_unknown_prayer_and_command() {
        assert!(parse_input("done sunrise").is_err());
        assert!(parse_input("done").is_err());
        assert!(parse_input("dance").is_err());
    }
}
