//! Signed XP events emitted by the engine and consumed by the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::skill::SkillCategory;

/// Why an XP event was emitted. Renders as a stable reason key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum XpReason {
    /// Base XP for completing (or un-completing) a task
    Task(Uuid),
    /// Section bonus for a category completion edge
    SectionBonus(Uuid),
    /// Quest bonus for a quest completion edge
    QuestBonus(Uuid),
}

impl XpReason {
    /// Stable key used to correlate ledger and history entries.
    pub fn key(&self) -> String {
        self.to_string()
    }

    pub const fn is_bonus(&self) -> bool {
        matches!(self, Self::SectionBonus(_) | Self::QuestBonus(_))
    }
}

impl fmt::Display for XpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task(id) => write!(f, "task-{id}"),
            Self::SectionBonus(id) => write!(f, "section-bonus-{id}"),
            Self::QuestBonus(id) => write!(f, "quest-bonus-{id}"),
        }
    }
}

/// A signed XP change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpEvent {
    pub amount: i64,
    pub reason: XpReason,
    /// Skill credited alongside the total; bonuses only move the total
    #[serde(default)]
    pub skill: Option<SkillCategory>,
}

impl XpEvent {
    pub const fn task(task_id: Uuid, amount: i64, skill: SkillCategory) -> Self {
        Self {
            amount,
            reason: XpReason::Task(task_id),
            skill: Some(skill),
        }
    }

    pub const fn section_bonus(category_id: Uuid, amount: i64) -> Self {
        Self {
            amount,
            reason: XpReason::SectionBonus(category_id),
            skill: None,
        }
    }

    pub const fn quest_bonus(quest_id: Uuid, amount: i64) -> Self {
        Self {
            amount,
            reason: XpReason::QuestBonus(quest_id),
            skill: None,
        }
    }

    pub fn reason_key(&self) -> String {
        self.reason.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_keys() {
        let id = Uuid::nil();
        assert_eq!(
            XpReason::Task(id).key(),
            "task-00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            XpReason::SectionBonus(id).key(),
            "section-bonus-00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            XpReason::QuestBonus(id).key(),
            "quest-bonus-00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_bonus_events_carry_no_skill() {
        let id = Uuid::new_v4();
        assert!(XpEvent::section_bonus(id, 20).skill.is_none());
        assert!(XpEvent::quest_bonus(id, -80).reason.is_bonus());
        assert!(!XpEvent::task(id, 10, SkillCategory::Mental).reason.is_bonus());
    }
}
