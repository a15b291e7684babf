use serde::{Deserialize, Serialize};

/// A points milestone that unlocks a reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTier {
    pub threshold: u32,
    pub label: String,
}

impl RewardTier {
    pub fn new(threshold: u32, label: impl Into<String>) -> Self {
        Self {
            threshold,
            label: label.into(),
        }
    }

    pub fn is_unlocked(&self, points: u32) -> bool {
        points >= self.threshold
    }

    /// The stock reward chest.
    pub fn defaults() -> Vec<RewardTier> {
        vec![
            RewardTier::new(50, "Popcorn Time!"),
            RewardTier::new(150, "Park Trip!"),
            RewardTier::new(500, "Pick a New Toy!"),
        ]
    }
}

/// A tier together with whether the current total reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierStatus {
    #[serde(flatten)]
    pub tier: RewardTier,
    pub unlocked: bool,
}
