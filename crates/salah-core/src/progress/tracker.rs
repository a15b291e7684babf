//! Completion state machine.
//!
//! ```text
//! pending -> completed
//! ```
//!
//! Each prayer transitions once per session and never back. The transition
//! is the only thing that adds points, so the total never decreases.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::rewards::{RewardTier, TierStatus};
use crate::error::ProgressError;
use crate::prayer::Prayer;

pub const DEFAULT_POINTS_PER_PRAYER: u32 = 15;

/// Outcome of [`ProgressTracker::complete`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Completion {
    Awarded {
        points_awarded: u32,
        total_points: u32,
        /// Tiers whose threshold this award crossed.
        newly_unlocked: Vec<RewardTier>,
    },
    /// Already completed today; nothing changed.
    AlreadyCompleted { total_points: u32 },
}

/// Session-scoped ledger of completed prayers and accumulated points.
///
/// Starts empty at session start and is dropped at session end. Nothing is
/// persisted. Serializable for display only; points can only be gained
/// through [`complete`](Self::complete).
#[derive(Debug, Clone, Serialize)]
pub struct ProgressTracker {
    completed: BTreeSet<Prayer>,
    points: u32,
    points_per_prayer: u32,
    tiers: Vec<RewardTier>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::with_rewards(DEFAULT_POINTS_PER_PRAYER, RewardTier::defaults())
    }

    pub fn with_rewards(points_per_prayer: u32, tiers: Vec<RewardTier>) -> Self {
        Self {
            completed: BTreeSet::new(),
            points: 0,
            points_per_prayer,
            tiers,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn points_per_prayer(&self) -> u32 {
        self.points_per_prayer
    }

    pub fn is_completed(&self, prayer: Prayer) -> bool {
        self.completed.contains(&prayer)
    }

    /// Completed prayers in day order.
    pub fn completed(&self) -> impl Iterator<Item = Prayer> + '_ {
        self.completed.iter().copied()
    }

    pub fn tiers(&self) -> &[RewardTier] {
        &self.tiers
    }

    /// Every configured tier with its unlock state. Tiers are independent;
    /// any number can be unlocked at once.
    pub fn unlocked_tiers(&self) -> Vec<TierStatus> {
        self.tiers
            .iter()
            .map(|tier| TierStatus {
                tier: tier.clone(),
                unlocked: tier.is_unlocked(self.points),
            })
            .collect()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Mark `prayer` done. Repeated calls for the same prayer are no-ops.
    pub fn complete(&mut self, prayer: Prayer) -> Completion {
        if !self.completed.insert(prayer) {
            tracing::debug!(%prayer, "prayer already completed, no points awarded");
            return Completion::AlreadyCompleted {
                total_points: self.points,
            };
        }

        let before = self.points;
        self.points = self.points.saturating_add(self.points_per_prayer);

        let newly_unlocked: Vec<RewardTier> = self
            .tiers
            .iter()
            .filter(|t| !t.is_unlocked(before) && t.is_unlocked(self.points))
            .cloned()
            .collect();

        tracing::debug!(
            %prayer,
            awarded = self.points_per_prayer,
            total = self.points,
            "prayer completed"
        );
        for tier in &newly_unlocked {
            tracing::info!(threshold = tier.threshold, label = %tier.label, "reward unlocked");
        }

        Completion::Awarded {
            points_awarded: self.points_per_prayer,
            total_points: self.points,
            newly_unlocked,
        }
    }

    /// [`complete`](Self::complete) by name.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::UnknownPrayer`] if `name` is not one of the
    /// five prayers.
    pub fn complete_by_name(&mut self, name: &str) -> Result<Completion, ProgressError> {
        let prayer: Prayer = name.parse()?;
        Ok(self.complete(prayer))
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
