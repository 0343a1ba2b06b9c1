//! Questlog - Progression & Completion-Bonus Engine
//!
//! Questlog turns user actions (completing and un-completing work, adding
//! and removing work items) into XP events, level transitions and
//! hierarchical completion bonuses, and rolls XP into a bounded history of
//! daily activity.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Data model, leveling curve and port traits
//! - **Service Layer** (`services`): XP pricing, the completion bonus engine,
//!   history aggregation and the orchestrating progression service
//! - **Infrastructure Layer** (`infrastructure`): In-memory adapters,
//!   configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use questlog::domain::models::{Difficulty, Quest, QuestCategory, QuestTask, SkillCategory};
//! use questlog::services::CompletionBonusEngine;
//!
//! let quest = Quest::new("Learn Rust").with_categories(vec![
//!     QuestCategory::new("Basics")
//!         .with_tasks(vec![QuestTask::new("Read the book", Difficulty::Medium, SkillCategory::Mental)]),
//! ]);
//! let (category_id, task_id) = (quest.categories[0].id, quest.categories[0].tasks[0].id);
//!
//! let mut engine = CompletionBonusEngine::new();
//! let transition = engine.toggle_task(quest, category_id, task_id);
//! assert_eq!(transition.net_xp(), 15 + 20);
//! assert_eq!(engine.pending()[0].bonus_amount, 80);
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, Difficulty, PendingBonusConfirmation, ProgressionState, Quest, QuestCategory,
    QuestTask, SkillCategory, Task, XpEvent, XpReason,
};
pub use domain::ports::{QuestRepository, TaskRepository, XpLedger};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CompletionBonusEngine, HistoryAggregator, ProgressionService, XpCalculator};
