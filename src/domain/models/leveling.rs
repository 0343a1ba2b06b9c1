//! Leveling curve.
//!
//! Maps total XP to a level and back using a tiered, non-linear table of
//! per-level requirements. Both directions are computed in closed form per
//! tier, so large XP totals never require a level-by-level scan.

use serde::{Deserialize, Serialize};

/// Per-level XP requirement tiers as `(first level NOT in tier, requirement)`.
const TIERS: &[(u32, u64)] = &[
    (1, 50),
    (5, 100),
    (10, 200),
    (15, 350),
    (20, 600),
    (30, 900),
    (40, 1300),
    (50, 2000),
    (60, 2500),
];

/// Requirement of every level past the last tier.
const TAIL_REQUIREMENT: u64 = 3000;

/// Safety cap on derived levels.
pub const MAX_LEVEL: u32 = 1000;

/// XP needed to advance out of `level`.
pub fn xp_requirement_for(level: u32) -> u64 {
    TIERS
        .iter()
        .find(|(upper, _)| level < *upper)
        .map_or(TAIL_REQUIREMENT, |(_, requirement)| *requirement)
}

/// Total XP needed to reach `target_level` from zero.
pub fn cumulative_xp_for(target_level: u32) -> u64 {
    let mut total = 0u64;
    let mut lower = 0u32;

    for &(upper, requirement) in TIERS {
        if target_level <= lower {
            return total;
        }
        total += u64::from(target_level.min(upper) - lower) * requirement;
        lower = upper;
    }

    total + u64::from(target_level.saturating_sub(lower)) * TAIL_REQUIREMENT
}

/// Largest level whose cumulative requirement `total_xp` meets, capped at
/// [`MAX_LEVEL`].
pub fn level_for(total_xp: u64) -> u32 {
    let mut floor = 0u64;
    let mut lower = 0u32;

    for &(upper, requirement) in TIERS {
        let tier_xp = u64::from(upper - lower) * requirement;
        if total_xp < floor + tier_xp {
            return cap(u64::from(lower) + (total_xp - floor) / requirement);
        }
        floor += tier_xp;
        lower = upper;
    }

    cap(u64::from(lower) + (total_xp - floor) / TAIL_REQUIREMENT)
}

fn cap(level: u64) -> u32 {
    u32::try_from(level.min(u64::from(MAX_LEVEL))).unwrap_or(MAX_LEVEL)
}

/// Progress through a single level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// XP earned past the start of the level (negative if `level` is ahead of the XP)
    pub current: i64,
    /// XP required to finish the level
    pub max: u64,
    /// `current / max` as a percentage, clamped to 0..=100
    pub percentage: f64,
}

/// Progress of `total_xp` within `level`.
#[allow(clippy::cast_precision_loss)]
pub fn progress_within_level(total_xp: u64, level: u32) -> LevelProgress {
    let start = cumulative_xp_for(level);
    let current = i64::try_from(total_xp)
        .unwrap_or(i64::MAX)
        .saturating_sub(i64::try_from(start).unwrap_or(i64::MAX));
    let max = xp_requirement_for(level);
    let percentage = (current as f64 / max as f64 * 100.0).clamp(0.0, 100.0);

    LevelProgress {
        current,
        max,
        percentage,
    }
}
