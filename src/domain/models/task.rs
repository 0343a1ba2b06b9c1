//! Standalone task domain model.
//!
//! A standalone task lives outside any quest. Habits are tasks that are
//! repeated daily and carry a completion streak.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::skill::{Difficulty, SkillCategory};

/// A standalone unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub skill_category: SkillCategory,
    #[serde(default)]
    pub is_habit: bool,
    #[serde(default)]
    pub completed: bool,
    /// Consecutive days a habit has been completed
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_completed_date: Option<NaiveDate>,
    /// Streak state before the current completion, restored when it is undone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_before_completion: Option<StreakSnapshot>,
}

/// A habit's streak at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSnapshot {
    pub streak: u32,
    pub last_completed_date: Option<NaiveDate>,
}

impl Task {
    /// Create a new, incomplete, non-habit task.
    pub fn new(title: impl Into<String>, difficulty: Difficulty, skill_category: SkillCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            difficulty,
            skill_category,
            is_habit: false,
            completed: false,
            streak: 0,
            last_completed_date: None,
            streak_before_completion: None,
        }
    }

    /// Mark this task as a daily habit.
    #[must_use]
    pub fn habit(mut self) -> Self {
        self.is_habit = true;
        self
    }

    /// Streak a habit would have after being completed on `today`.
    ///
    /// Completing again on the same day keeps the streak, completing the
    /// day after the last completion extends it, and any gap restarts it.
    pub fn streak_after_completion(&self, today: NaiveDate) -> u32 {
        match self.last_completed_date {
            Some(last) if last == today => self.streak.max(1),
            Some(last) if last.succ_opt() == Some(today) => self.streak.saturating_add(1),
            _ => 1,
        }
    }

    /// Advance the habit streak for a completion on `today`.
    pub fn record_completion(&mut self, today: NaiveDate) {
        self.streak_before_completion = Some(StreakSnapshot {
            streak: self.streak,
            last_completed_date: self.last_completed_date,
        });
        self.streak = self.streak_after_completion(today);
        self.last_completed_date = Some(today);
    }

    /// Undo the latest completion's effect on the streak.
    ///
    /// Restores the state saved by [`Task::record_completion`]. Tasks stored
    /// without that state step the streak and date back by one day instead.
    pub fn undo_completion(&mut self) {
        if let Some(previous) = self.streak_before_completion.take() {
            self.streak = previous.streak;
            self.last_completed_date = previous.last_completed_date;
            return;
        }

        self.streak = self.streak.saturating_sub(1);
        self.last_completed_date = if self.streak == 0 {
            None
        } else {
            self.last_completed_date.and_then(|d| d.pred_opt())
        };
    }
}
