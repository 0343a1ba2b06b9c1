//! In-memory adapters for the domain ports.
//!
//! Used by the CLI replay command and by tests. State lives behind tokio
//! locks so the adapters can be shared across tasks.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::models::{
    ApplyOutcome, ArchivedHistory, DailyActivityBucket, ProgressionState, Quest, Task, XpEvent,
};
use crate::domain::ports::{QuestRepository, TaskRepository, XpLedger};
use crate::services::history_aggregator::HistoryAggregator;

/// Quest storage backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryQuestRepository {
    quests: RwLock<HashMap<Uuid, Quest>>,
}

impl InMemoryQuestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quests(quests: impl IntoIterator<Item = Quest>) -> Self {
        Self {
            quests: RwLock::new(quests.into_iter().map(|q| (q.id, q)).collect()),
        }
    }
}

#[async_trait]
impl QuestRepository for InMemoryQuestRepository {
    async fn get(&self, id: Uuid) -> DomainResult<Option<Quest>> {
        Ok(self.quests.read().await.get(&id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Quest>> {
        let mut quests: Vec<Quest> = self.quests.read().await.values().cloned().collect();
        quests.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(quests)
    }

    async fn save(&self, quest: &Quest) -> DomainResult<()> {
        self.quests.write().await.insert(quest.id, quest.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.quests.write().await.remove(&id);
        Ok(())
    }
}

/// Standalone task storage backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn get(&self, id: Uuid) -> DomainResult<Option<Task>> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        tasks.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(tasks)
    }

    async fn save(&self, task: &Task) -> DomainResult<()> {
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.tasks.write().await.remove(&id);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    progression: ProgressionState,
    history: Vec<DailyActivityBucket>,
    archives: Vec<ArchivedHistory>,
}

/// Ledger that keeps progression and history in memory.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    aggregator: HistoryAggregator,
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new(aggregator: HistoryAggregator) -> Self {
        Self {
            aggregator,
            state: RwLock::default(),
        }
    }

    pub async fn progression(&self) -> ProgressionState {
        self.state.read().await.progression.clone()
    }

    pub async fn history(&self) -> Vec<DailyActivityBucket> {
        self.state.read().await.history.clone()
    }

    pub async fn archives(&self) -> Vec<ArchivedHistory> {
        self.state.read().await.archives.clone()
    }
}

#[async_trait]
impl XpLedger for InMemoryLedger {
    async fn apply_xp_events(&self, events: &[XpEvent]) -> DomainResult<ApplyOutcome> {
        Ok(self.state.write().await.progression.apply_events(events))
    }

    async fn record_history(
        &self,
        at: DateTime<FixedOffset>,
        xp_delta: i64,
        reason: &str,
    ) -> DomainResult<()> {
        let mut state = self.state.write().await;
        let buckets = std::mem::take(&mut state.history);
        let update = self.aggregator.add_entry(buckets, xp_delta, &at, reason);
        state.history = update.buckets;
        state.archives.extend(update.archived);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SkillCategory;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_quest_repository_round_trip() {
        let repo = InMemoryQuestRepository::new();
        let quest = Quest::new("Ship it");
        repo.save(&quest).await.unwrap();

        assert_eq!(repo.get(quest.id).await.unwrap(), Some(quest.clone()));
        assert_eq!(repo.list().await.unwrap().len(), 1);

        repo.delete(quest.id).await.unwrap();
        assert!(repo.get(quest.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ledger_applies_and_records() {
        let ledger = InMemoryLedger::new(HistoryAggregator::new(2));
        let id = Uuid::new_v4();
        let outcome = ledger
            .apply_xp_events(&[XpEvent::task(id, 60, SkillCategory::Social)])
            .await
            .unwrap();
        assert!(outcome.level.leveled_up());
        assert_eq!(ledger.progression().await.total_xp, 60);

        let offset = FixedOffset::east_opt(0).unwrap();
        for day in 1..=3 {
            let at = offset.with_ymd_and_hms(2024, 7, day, 12, 0, 0).unwrap();
            ledger.record_history(at, 10, "task-x").await.unwrap();
        }

        assert_eq!(ledger.history().await.len(), 2);
        assert_eq!(ledger.archives().await.len(), 1);
    }
}
