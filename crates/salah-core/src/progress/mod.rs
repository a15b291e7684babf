//! Same-day completion ledger, points and reward tiers.

mod rewards;
mod tracker;

pub use rewards::{RewardTier, TierStatus};
pub use tracker::{Completion, ProgressTracker, DEFAULT_POINTS_PER_PRAYER};
