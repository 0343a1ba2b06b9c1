//! Leveling curve and XP pricing commands.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::leveling::{self, LevelProgress};
use crate::domain::models::Difficulty;
use crate::services::{XpBreakdown, XpCalculator};

#[derive(Args, Debug)]
pub struct LevelArgs {
    /// Total XP to evaluate
    pub xp: u64,
}

#[derive(Args, Debug)]
pub struct XpArgs {
    /// Difficulty (easy, medium, hard, epic)
    pub difficulty: String,
}

#[derive(Debug, Serialize)]
pub struct LevelOutput {
    pub xp: u64,
    pub level: u32,
    pub progress: LevelProgress,
    pub next_level_at: u64,
}

impl CommandOutput for LevelOutput {
    fn to_human(&self) -> String {
        format!(
            "Level {} ({} XP)\nProgress: {}/{} ({:.1}%)\nNext level at {} XP",
            self.level,
            self.xp,
            self.progress.current,
            self.progress.max,
            self.progress.percentage,
            self.next_level_at
        )
    }
}

#[derive(Debug, Serialize)]
pub struct XpOutput {
    pub difficulty: String,
    #[serde(flatten)]
    pub breakdown: XpBreakdown,
}

impl CommandOutput for XpOutput {
    fn to_human(&self) -> String {
        format!(
            "{}: {} XP (base {} x{} difficulty x{} streak + {} bonus)",
            self.difficulty,
            self.breakdown.total,
            self.breakdown.base,
            self.breakdown.difficulty_multiplier,
            self.breakdown.streak_multiplier,
            self.breakdown.flat_bonus
        )
    }
}

pub fn level(args: &LevelArgs, json_mode: bool) -> Result<()> {
    let level = leveling::level_for(args.xp);
    let result = LevelOutput {
        xp: args.xp,
        level,
        progress: leveling::progress_within_level(args.xp, level),
        next_level_at: leveling::cumulative_xp_for(level.saturating_add(1)),
    };
    output(&result, json_mode);
    Ok(())
}

pub fn xp(args: &XpArgs, json_mode: bool) -> Result<()> {
    let difficulty: Difficulty = args.difficulty.parse()?;
    let result = XpOutput {
        difficulty: difficulty.as_str().to_string(),
        breakdown: XpCalculator::new().breakdown(difficulty),
    };
    output(&result, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_output_human() {
        let out = LevelOutput {
            xp: 200,
            level: 2,
            progress: leveling::progress_within_level(200, 2),
            next_level_at: 250,
        };
        let text = out.to_human();
        assert!(text.contains("Level 2"));
        assert!(text.contains("50/100"));
    }

    #[test]
    fn test_xp_rejects_unknown_difficulty() {
        let args = XpArgs { difficulty: "legendary".to_string() };
        assert!(xp(&args, true).is_err());
    }
}
