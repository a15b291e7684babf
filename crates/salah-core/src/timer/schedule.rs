use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::time_of_day::TimeOfDay;
use crate::error::ScheduleError;
use crate::prayer::Prayer;

/// Today's prayer times, one per prayer.
///
/// Built once per session from the external timings source and never
/// mutated afterwards. An incomplete set of timings cannot be represented,
/// so everything downstream of construction is infallible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct EventSchedule {
    times: [TimeOfDay; 5],
}

impl EventSchedule {
    /// Build from already-parsed times, indexed by [`Prayer::index`].
    pub fn new(times: [TimeOfDay; 5]) -> Self {
        Self { times }
    }

    /// Parse a name → `HH:MM` mapping.
    ///
    /// Names match case-insensitively. Keys that are not one of the five
    /// prayers (a timings payload usually carries `Sunrise`, `Midnight` and
    /// friends) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::MissingScheduleData`] for the first prayer in
    /// day order without a time, [`ScheduleError::DuplicateScheduleData`] when
    /// two keys name the same prayer, or [`ScheduleError::MalformedTimeOfDay`]
    /// for an unparseable value.
    pub fn from_timings<K, V>(timings: &HashMap<K, V>) -> Result<Self, ScheduleError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut slots: [Option<TimeOfDay>; 5] = [None; 5];
        for (name, value) in timings {
            let Ok(prayer) = name.as_ref().parse::<Prayer>() else {
                continue;
            };
            let slot = &mut slots[prayer.index()];
            if slot.is_some() {
                return Err(ScheduleError::DuplicateScheduleData { prayer });
            }
            *slot = Some(value.as_ref().parse()?);
        }

        let mut times = [TimeOfDay::default(); 5];
        for prayer in Prayer::ALL {
            times[prayer.index()] =
                slots[prayer.index()].ok_or(ScheduleError::MissingScheduleData { prayer })?;
        }
        Ok(Self { times })
    }

    /// Parse a JSON object of timings, e.g. the `timings` object of a
    /// prayer-times API response.
    pub fn from_json(json: &str) -> Result<Self, ScheduleError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ScheduleError::InvalidPayload(e.to_string()))?;
        let obj = value
            .as_object()
            .ok_or_else(|| ScheduleError::InvalidPayload("expected a JSON object".into()))?;

        let mut timings = HashMap::new();
        for (key, val) in obj {
            if let Some(s) = val.as_str() {
                timings.insert(key.as_str(), s);
            }
        }
        Self::from_timings(&timings)
    }

    pub fn time_of(&self, prayer: Prayer) -> TimeOfDay {
        self.times[prayer.index()]
    }

    /// Prayers with their times, in day order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, TimeOfDay)> + '_ {
        Prayer::ALL.into_iter().map(|p| (p, self.time_of(p)))
    }
}

impl TryFrom<BTreeMap<String, String>> for EventSchedule {
    type Error = ScheduleError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let timings: HashMap<String, String> = map.into_iter().collect();
        Self::from_timings(&timings)
    }
}

impl From<EventSchedule> for BTreeMap<String, String> {
    fn from(schedule: EventSchedule) -> Self {
        schedule
            .iter()
            .map(|(p, t)| (p.name().to_string(), t.to_string()))
            .collect()
    }
}
