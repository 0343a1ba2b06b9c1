//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - QuestRepository: Storage of quest trees
//! - TaskRepository: Storage of standalone tasks
//! - XpLedger: Application of XP events and activity history
//!
//! The engine itself never persists anything; these traits are the seams
//! to the storage and ledger collaborators.

pub mod quest_repository;
pub mod task_repository;
pub mod xp_ledger;

pub use quest_repository::QuestRepository;
pub use task_repository::TaskRepository;
pub use xp_ledger::XpLedger;
