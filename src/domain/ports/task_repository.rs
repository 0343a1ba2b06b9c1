use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::models::Task;

/// Repository port for standalone task persistence operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Get a task by ID
    async fn get(&self, id: Uuid) -> DomainResult<Option<Task>>;

    /// List all standalone tasks
    async fn list(&self) -> DomainResult<Vec<Task>>;

    /// Insert or replace a task
    async fn save(&self, task: &Task) -> DomainResult<()>;

    /// Delete a task by ID
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
