//! Quest domain model.
//!
//! A quest is a two-level hierarchy: quest → categories → tasks.
//! Completion of a category or quest is always derived from its children
//! and never stored, so it cannot drift from the task flags.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::skill::{Difficulty, SkillCategory};

/// Derived completion state of a hierarchy node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    Incomplete,
    Complete,
}

impl Completion {
    const fn from_flag(complete: bool) -> Self {
        if complete {
            Self::Complete
        } else {
            Self::Incomplete
        }
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// A task nested inside a quest category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestTask {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub skill_category: SkillCategory,
    #[serde(default)]
    pub completed: bool,
}

impl QuestTask {
    pub fn new(name: impl Into<String>, difficulty: Difficulty, skill_category: SkillCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            difficulty,
            skill_category,
            completed: false,
        }
    }

    #[must_use]
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }
}

/// A grouping of tasks within a quest. Unit of the section bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestCategory {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<QuestTask>,
}

impl QuestCategory {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<QuestTask>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Complete iff the category has tasks and all of them are completed.
    pub fn completion(&self) -> Completion {
        Completion::from_flag(!self.tasks.is_empty() && self.tasks.iter().all(|t| t.completed))
    }

    pub fn task(&self, task_id: Uuid) -> Option<&QuestTask> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: Uuid) -> Option<&mut QuestTask> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }
}

/// Top-level goal composed of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub categories: Vec<QuestCategory>,
}

impl Quest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            categories: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_categories(mut self, categories: Vec<QuestCategory>) -> Self {
        self.categories = categories;
        self
    }

    /// Complete iff the quest has categories and all of them are complete.
    pub fn completion(&self) -> Completion {
        Completion::from_flag(
            !self.categories.is_empty()
                && self.categories.iter().all(|c| c.completion().is_complete()),
        )
    }

    pub fn is_complete(&self) -> bool {
        self.completion().is_complete()
    }

    /// Number of categories, as the signed count the quest bonus brackets use.
    pub fn category_count(&self) -> i64 {
        i64::try_from(self.categories.len()).unwrap_or(i64::MAX)
    }

    pub fn category(&self, category_id: Uuid) -> Option<&QuestCategory> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    pub fn category_mut(&mut self, category_id: Uuid) -> Option<&mut QuestCategory> {
        self.categories.iter_mut().find(|c| c.id == category_id)
    }

    pub fn task(&self, category_id: Uuid, task_id: Uuid) -> Option<&QuestTask> {
        self.category(category_id).and_then(|c| c.task(task_id))
    }

    pub fn task_mut(&mut self, category_id: Uuid, task_id: Uuid) -> Option<&mut QuestTask> {
        self.category_mut(category_id).and_then(|c| c.task_mut(task_id))
    }
}

/// A quest-completion bonus that is owed but awaits explicit confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBonusConfirmation {
    pub quest_id: Uuid,
    pub bonus_amount: i64,
    pub triggering_task_id: Uuid,
    pub quest_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(done: bool) -> QuestTask {
        let t = QuestTask::new("t", Difficulty::Easy, SkillCategory::Misc);
        if done {
            t.completed()
        } else {
            t
        }
    }

    #[test]
    fn test_empty_category_is_incomplete() {
        assert_eq!(QuestCategory::new("empty").completion(), Completion::Incomplete);
    }

    #[test]
    fn test_category_completion_requires_every_task() {
        let partial = QuestCategory::new("c").with_tasks(vec![task(true), task(false)]);
        assert_eq!(partial.completion(), Completion::Incomplete);

        let full = QuestCategory::new("c").with_tasks(vec![task(true), task(true)]);
        assert_eq!(full.completion(), Completion::Complete);
    }

    #[test]
    fn test_empty_quest_is_incomplete() {
        assert!(!Quest::new("q").is_complete());
    }

    #[test]
    fn test_quest_with_empty_category_is_incomplete() {
        let quest = Quest::new("q").with_categories(vec![
            QuestCategory::new("done").with_tasks(vec![task(true)]),
            QuestCategory::new("empty"),
        ]);
        assert_eq!(quest.completion(), Completion::Incomplete);
    }

    #[test]
    fn test_quest_completion_follows_task_flags() {
        let mut quest = Quest::new("q").with_categories(vec![
            QuestCategory::new("a").with_tasks(vec![task(true)]),
            QuestCategory::new("b").with_tasks(vec![task(false)]),
        ]);
        assert!(!quest.is_complete());

        let category_id = quest.categories[1].id;
        let task_id = quest.categories[1].tasks[0].id;
        quest.task_mut(category_id, task_id).unwrap().completed = true;
        assert!(quest.is_complete());
        assert_eq!(quest.category_count(), 2);
    }

    #[test]
    fn test_lookup_misses_return_none() {
        let quest = Quest::new("q").with_categories(vec![QuestCategory::new("a")]);
        assert!(quest.category(Uuid::new_v4()).is_none());
        assert!(quest.task(quest.categories[0].id, Uuid::new_v4()).is_none());
    }
}
