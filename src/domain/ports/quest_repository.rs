//! Quest repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::models::Quest;

/// Repository interface for quest trees.
///
/// Saves replace the whole tree; the engine always works on the latest
/// snapshot returned by `get`.
#[async_trait]
pub trait QuestRepository: Send + Sync {
    /// Get a quest by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<Quest>>;

    /// List every quest.
    async fn list(&self) -> DomainResult<Vec<Quest>>;

    /// Insert or replace a quest.
    async fn save(&self, quest: &Quest) -> DomainResult<()>;

    /// Delete a quest by ID.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
