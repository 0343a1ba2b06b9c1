//! Progression ledger state.
//!
//! Holds total and per-skill XP. Levels are never stored: they are always
//! derived from the current XP through the leveling curve.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::leveling::{self, LevelProgress};
use super::skill::SkillCategory;
use super::xp_event::XpEvent;

/// XP accumulated in a single skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProgress {
    pub xp: u64,
}

impl SkillProgress {
    pub fn level(&self) -> u32 {
        leveling::level_for(self.xp)
    }
}

/// Level before and after applying a batch of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelChange {
    pub previous: u32,
    pub current: u32,
}

impl LevelChange {
    pub const fn leveled_up(&self) -> bool {
        self.current > self.previous
    }

    pub const fn leveled_down(&self) -> bool {
        self.current < self.previous
    }

    pub const fn levels_gained(&self) -> i64 {
        self.current as i64 - self.previous as i64
    }
}

/// Result of applying events to a [`ProgressionState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub level: LevelChange,
    /// Skills whose level changed
    pub skills: BTreeMap<SkillCategory, LevelChange>,
}

/// Total and per-skill XP of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub total_xp: u64,
    #[serde(default)]
    pub skills: BTreeMap<SkillCategory, SkillProgress>,
}

impl ProgressionState {
    pub fn level(&self) -> u32 {
        leveling::level_for(self.total_xp)
    }

    pub fn progress(&self) -> LevelProgress {
        leveling::progress_within_level(self.total_xp, self.level())
    }

    pub fn skill(&self, skill: SkillCategory) -> SkillProgress {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    /// Apply events in order, clamping total and skill XP at zero after each.
    pub fn apply_events(&mut self, events: &[XpEvent]) -> ApplyOutcome {
        let previous_level = self.level();
        let previous_skills: BTreeMap<SkillCategory, u32> = self
            .skills
            .iter()
            .map(|(skill, progress)| (*skill, progress.level()))
            .collect();

        for event in events {
            self.total_xp = apply_delta(self.total_xp, event.amount);
            if let Some(skill) = event.skill {
                let progress = self.skills.entry(skill).or_default();
                progress.xp = apply_delta(progress.xp, event.amount);
            }
        }

        let skills = self
            .skills
            .iter()
            .filter_map(|(skill, progress)| {
                let change = LevelChange {
                    previous: previous_skills.get(skill).copied().unwrap_or(0),
                    current: progress.level(),
                };
                (change.previous != change.current).then_some((*skill, change))
            })
            .collect();

        ApplyOutcome {
            level: LevelChange {
                previous: previous_level,
                current: self.level(),
            },
            skills,
        }
    }
}

const fn apply_delta(xp: u64, delta: i64) -> u64 {
    if delta >= 0 {
        xp.saturating_add(delta.unsigned_abs())
    } else {
        xp.saturating_sub(delta.unsigned_abs())
    }
}
