pub mod config;
pub mod history;
pub mod leveling;
pub mod progression;
pub mod quest;
pub mod skill;
pub mod task;
pub mod xp_event;

pub use config::{BonusConfig, Config, HistoryConfig, LoggingConfig};
pub use history::{ArchivedHistory, DailyActivityBucket, HistoryPayload, LegacyHistoryEntry};
pub use leveling::LevelProgress;
pub use progression::{ApplyOutcome, LevelChange, ProgressionState, SkillProgress};
pub use quest::{Completion, PendingBonusConfirmation, Quest, QuestCategory, QuestTask};
pub use skill::{Difficulty, SkillCategory};
pub use task::{StreakSnapshot, Task};
pub use xp_event::{XpEvent, XpReason};
