//! The five daily prayers and their static unit breakdown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProgressError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All prayers in their order through the day.
    pub const ALL: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Rollover target once every prayer of the day has passed.
    pub const DAY_OPENING: Prayer = Prayer::Fajr;

    pub fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn detail(&self) -> &'static PrayerDetail {
        &PRAYER_DETAILS[self.index()]
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Prayer {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Prayer::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ProgressError::UnknownPrayer(s.to_string()))
    }
}

/// Display color tag for a prayer card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Orange,
    Yellow,
    Amber,
    Purple,
    Indigo,
}

/// Unit (rak'ah) counts that make up a prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunnah_before: Option<u8>,
    pub fardh: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunnah_after: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witr: Option<u8>,
    pub color: ColorTag,
}

impl PrayerDetail {
    /// Unit breakdown in prayer order, e.g. `["4 Sunnah", "4 Fardh", "2 Sunnah"]`.
    pub fn units(&self) -> Vec<String> {
        let mut parts = Vec::with_capacity(4);
        if let Some(n) = self.sunnah_before {
            parts.push(format!("{n} Sunnah"));
        }
        parts.push(format!("{} Fardh", self.fardh));
        if let Some(n) = self.sunnah_after {
            parts.push(format!("{n} Sunnah"));
        }
        if let Some(n) = self.witr {
            parts.push(format!("{n} Witr"));
        }
        parts
    }

    pub fn total_units(&self) -> u8 {
        self.sunnah_before.unwrap_or(0)
            + self.fardh
            + self.sunnah_after.unwrap_or(0)
            + self.witr.unwrap_or(0)
    }
}

/// Indexed by [`Prayer::index`].
static PRAYER_DETAILS: [PrayerDetail; 5] = [
    PrayerDetail {
        sunnah_before: Some(2),
        fardh: 2,
        sunnah_after: None,
        witr: None,
        color: ColorTag::Orange,
    },
    PrayerDetail {
        sunnah_before: Some(4),
        fardh: 4,
        sunnah_after: Some(2),
        witr: None,
        color: ColorTag::Yellow,
    },
    PrayerDetail {
        sunnah_before: None,
        fardh: 4,
        sunnah_after: None,
        witr: None,
        color: ColorTag::Amber,
    },
    PrayerDetail {
        sunnah_before: None,
        fardh: 3,
        sunnah_after: Some(2),
        witr: None,
        color: ColorTag::Purple,
    },
    PrayerDetail {
        sunnah_before: None,
        fardh: 4,
        sunnah_after: Some(2),
        witr: Some(3),
        color: ColorTag::Indigo,
    },
];
