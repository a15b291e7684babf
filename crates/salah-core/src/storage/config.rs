//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Points per prayer and the reward chest
//! - Chime (adhan) behavior
//! - Clock display format
//! - Fallback prayer timings when no external source is wired in
//!
//! Configuration is stored at `~/.config/salah/config.toml`. Completions and
//! points are never written here; they live only for one session.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, ScheduleError};
use crate::prayer::Prayer;
use crate::progress::{ProgressTracker, RewardTier, DEFAULT_POINTS_PER_PRAYER};
use crate::timer::{EventSchedule, TimeOfDay};

/// Points and reward tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewardsConfig {
    #[serde(default = "default_points_per_prayer")]
    pub points_per_prayer: u32,
    #[serde(default = "RewardTier::defaults")]
    pub tiers: Vec<RewardTier>,
}

/// Chime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChimeConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// External player command line, e.g. `mpv --no-video /path/azan.mp3`.
    /// When unset the terminal bell is used.
    #[serde(default)]
    pub command: Option<String>,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub clock_12h: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/salah/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub chime: ChimeConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    /// Prayer name -> `HH:MM`, used when timings are not given on the
    /// command line.
    #[serde(default)]
    pub timings: BTreeMap<String, String>,
}

fn default_points_per_prayer() -> u32 {
    DEFAULT_POINTS_PER_PRAYER
}
fn default_true() -> bool {
    true
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            points_per_prayer: default_points_per_prayer(),
            tiers: RewardTier::defaults(),
        }
    }
}

impl Default for ChimeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { clock_12h: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rewards: RewardsConfig::default(),
            chime: ChimeConfig::default(),
            display: DisplayConfig::default(),
            timings: BTreeMap::new(),
        }
    }
}

/// Top-level maps that accept new keys through [`Config::set`].
const OPEN_MAPS: &[&str] = &["timings"];

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        let mut parent: Option<&str> = None;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let open = parent.is_some_and(|p| OPEN_MAPS.contains(&p));
                let obj = current.as_object_mut().ok_or_else(unknown)?;

                let new_value = match obj.get(part) {
                    Some(serde_json::Value::Bool(_)) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    Some(serde_json::Value::Number(_)) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    Some(serde_json::Value::Object(_)) | Some(serde_json::Value::Array(_)) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    Some(_) => serde_json::Value::String(value.into()),
                    None if open => serde_json::Value::String(value.into()),
                    None => return Err(unknown()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
            parent = Some(part);
        }

        Err(unknown())
    }

    /// `~/.config/salah[-dev]/config.toml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default path, writing the default config if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing the default config there if absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// key's type. On error the config is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject timings that would fail later at session start.
    ///
    /// Names are compared the way the schedule compares them, so `Fajr` and
    /// `fajr` count as the same prayer and cannot both be present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for (name, time) in &self.timings {
            let key = format!("timings.{name}");
            let prayer = name.parse::<Prayer>().map_err(|e| ConfigError::InvalidValue {
                key: key.clone(),
                message: e.to_string(),
            })?;
            if !seen.insert(prayer) {
                return Err(ConfigError::InvalidValue {
                    key,
                    message: format!("duplicate time for {prayer}"),
                });
            }
            time.parse::<TimeOfDay>()
                .map_err(|e| ConfigError::InvalidValue {
                    key,
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Schedule from the configured timings.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::MissingScheduleData`] unless all five prayers
    /// have a time, or [`ScheduleError::DuplicateScheduleData`] if a prayer is
    /// listed under two spellings.
    pub fn schedule(&self) -> Result<EventSchedule, ScheduleError> {
        let timings: HashMap<&str, &str> = self
            .timings
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        EventSchedule::from_timings(&timings)
    }

    /// Fresh session tracker with the configured rewards.
    pub fn progress_tracker(&self) -> ProgressTracker {
        ProgressTracker::with_rewards(self.rewards.points_per_prayer, self.rewards.tiers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.rewards.points_per_prayer, 15);
        assert_eq!(parsed.rewards.tiers, RewardTier::defaults());
        assert!(parsed.chime.enabled);
    }

    #[test]
    fn empty_file_gets_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.rewards.points_per_prayer, 15);
        assert!(cfg.display.clock_12h);
        assert!(cfg.timings.is_empty());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("chime.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("rewards.points_per_prayer").as_deref(), Some("15"));
        assert!(cfg.get("chime.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("chime.enabled", "false").unwrap();
        cfg.set("rewards.points_per_prayer", "20").unwrap();
        cfg.set("chime.command", "mpv azan.mp3").unwrap();
        assert!(!cfg.chime.enabled);
        assert_eq!(cfg.rewards.points_per_prayer, 20);
        assert_eq!(cfg.chime.command.as_deref(), Some("mpv azan.mp3"));
    }

    #[test]
    fn set_replaces_tiers_from_json() {
        let mut cfg = Config::default();
        cfg.set("rewards.tiers", r#"[{"threshold": 30, "label": "Ice cream"}]"#)
            .unwrap();
        assert_eq!(cfg.rewards.tiers, vec![RewardTier::new(30, "Ice cream")]);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("display.nonexistent", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("", "x"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        let result = cfg.set("display.clock_12h", "not_a_bool");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        assert!(cfg.display.clock_12h);
    }

    #[test]
    fn set_inserts_timings_and_validates() {
        let mut cfg = Config::default();
        cfg.set("timings.Fajr", "05:12").unwrap();
        assert_eq!(cfg.timings.get("Fajr").map(String::as_str), Some("05:12"));

        assert!(cfg.set("timings.Asr", "25:99").is_err());
        assert!(cfg.set("timings.Sunrise", "06:00").is_err());
        assert!(!cfg.timings.contains_key("Asr"));
    }

    #[test]
    fn schedule_requires_all_prayers() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.schedule(),
            Err(ScheduleError::MissingScheduleData { prayer: Prayer::Fajr })
        ));
        for (p, t) in [
            ("Fajr", "05:00"),
            ("Dhuhr", "12:00"),
            ("Asr", "15:00"),
            ("Maghrib", "18:00"),
            ("Isha", "20:00"),
        ] {
            cfg.set(&format!("timings.{p}"), t).unwrap();
        }
        assert!(cfg.schedule().is_ok());
    }

    #[test]
    fn load_from_writes_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.rewards.points_per_prayer, 15);
        assert!(path.exists());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("rewards.points_per_prayer", "25").unwrap();
        cfg.set("timings.Isha", "19:41").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.rewards.points_per_prayer, 25);
        assert_eq!(loaded.timings.get("Isha").map(String::as_str), Some("19:41"));
        assert_eq!(loaded.progress_tracker().points_per_prayer(), 25);
    }

    #[test]
    fn load_rejects_bad_timings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timings]\nFajr = \"5 o'clock\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn set_rejects_case_variant_of_existing_timing() {
        let mut cfg = Config::default();
        cfg.set("timings.Fajr", "05:00").unwrap();
        let err = cfg.set("timings.fajr", "06:30").unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidValue { key, .. } if key == "timings.fajr"),
            "{err}"
        );
        assert_eq!(cfg.timings.len(), 1);
        assert_eq!(cfg.timings.get("Fajr").map(String::as_str), Some("05:00"));

        // Same spelling replaces in place.
        cfg.set("timings.Fajr", "05:10").unwrap();
        assert_eq!(cfg.timings.get("Fajr").map(String::as_str), Some("05:10"));
    }

    #[test]
    fn load_rejects_case_variant_timings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timings]\nFajr = \"05:00\"\nfajr = \"06:30\"\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate time for Fajr"), "{err}");
    }

    #[test]
    fn schedule_rejects_case_variant_timings() {
        let mut cfg = Config::default();
        cfg.timings.insert("Isha".into(), "19:41".into());
        cfg.timings.insert("ISHA".into(), "20:10".into());
        assert!(cfg.validate().is_err());
        assert_eq!(
            cfg.schedule().unwrap_err(),
            ScheduleError::DuplicateScheduleData {
                prayer: Prayer::Isha
            }
        );
    }

    #[test]
    fn load_rejects_unknown_field_in_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\ntheme = \"dark\"\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed { .. }), "{err}");
        assert!(err.to_string().contains("theme"), "{err}");
    }

    #[test]
    fn load_rejects_misspelled_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timing]\nFajr = \"05:12\"\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));

        std::fs::write(&path, "[rewards]\npoints_per_prayr = 20\n").unwrap();
        assert!(Config::load_from(&path).is_err());
        std::fs::write(&path, "[chime]\nenable = false\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
