use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors for progression operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Quest not found: {0}")]
    QuestNotFound(Uuid),

    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),

    #[error("Stale reference: {id} no longer exists in quest {quest_id}")]
    StaleReference { quest_id: Uuid, id: Uuid },

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Ledger error: {0}")]
    Ledger(String),
}

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
