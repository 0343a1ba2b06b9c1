//! Skill and difficulty classifications shared by every work item.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Skill a piece of work trains. Each skill levels independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Physical,
    Mental,
    Professional,
    Social,
    Creative,
    Misc,
}

impl Default for SkillCategory {
    fn default() -> Self {
        Self::Misc
    }
}

impl SkillCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 6] = [
        Self::Physical,
        Self::Mental,
        Self::Professional,
        Self::Social,
        Self::Creative,
        Self::Misc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Mental => "mental",
            Self::Professional => "professional",
            Self::Social => "social",
            Self::Creative => "creative",
            Self::Misc => "misc",
        }
    }
}

impl FromStr for SkillCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "physical" => Ok(Self::Physical),
            "mental" => Ok(Self::Mental),
            "professional" => Ok(Self::Professional),
            "social" => Ok(Self::Social),
            "creative" => Ok(Self::Creative),
            "misc" | "other" => Ok(Self::Misc),
            _ => Err(anyhow::anyhow!("Invalid skill category: {s}")),
        }
    }
}

/// How demanding a unit of work is. Drives its base XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Epic,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Epic => "epic",
        }
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "epic" => Ok(Self::Epic),
            _ => Err(anyhow::anyhow!("Invalid difficulty: {s}. Must be one of: easy, medium, hard, epic")),
        }
    }
}
