use serde::{Deserialize, Serialize};

use crate::domain::models::Difficulty;

/// Base XP before the difficulty multiplier.
pub const BASE_XP: i64 = 10;

/// Itemized XP for a single task.
///
/// `streak_multiplier` and `flat_bonus` are reserved extension points and
/// are neutral (1.0 and 0) in the current rule set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpBreakdown {
    pub base: i64,
    pub difficulty_multiplier: f64,
    pub streak_multiplier: f64,
    pub flat_bonus: i64,
    pub total: i64,
}

/// Service for pricing work items in XP
///
/// XP formula: floor(base * difficulty_multiplier * streak_multiplier) + flat_bonus
#[derive(Debug, Clone, Default)]
pub struct XpCalculator;

impl XpCalculator {
    pub const fn new() -> Self {
        Self
    }

    /// Multiplier applied to the base XP for a difficulty
    pub const fn difficulty_multiplier(difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
            Difficulty::Epic => 3.0,
        }
    }

    /// XP awarded for completing a task of the given difficulty
    pub fn xp_for(&self, difficulty: Difficulty) -> i64 {
        self.breakdown(difficulty).total
    }

    /// Itemized XP for a task of the given difficulty
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn breakdown(&self, difficulty: Difficulty) -> XpBreakdown {
        let difficulty_multiplier = Self::difficulty_multiplier(difficulty);
        let streak_multiplier = 1.0;
        let flat_bonus = 0;
        let scaled = (BASE_XP as f64 * difficulty_multiplier * streak_multiplier).floor() as i64;

        XpBreakdown {
            base: BASE_XP,
            difficulty_multiplier,
            streak_multiplier,
            flat_bonus,
            total: scaled + flat_bonus,
        }
    }
}
