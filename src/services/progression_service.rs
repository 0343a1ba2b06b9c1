//! Progression service.
//!
//! Runs one user action end to end: load the latest snapshot, run the
//! completion bonus engine, save the new snapshot, then hand the emitted
//! events to the ledger and the activity history. The engine sits behind a
//! mutex so operations are applied one at a time against fresh snapshots.

use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{
    ApplyOutcome, Config, PendingBonusConfirmation, Quest, QuestCategory, QuestTask, Task, XpEvent,
};
use crate::domain::ports::{QuestRepository, TaskRepository, XpLedger};
use crate::services::completion_bonus::{CompletionBonusEngine, Transition};

/// What one operation did.
#[derive(Debug, Clone, Serialize)]
pub struct OperationOutcome {
    pub events: Vec<XpEvent>,
    /// Ledger result, `None` when no events were emitted
    pub applied: Option<ApplyOutcome>,
    /// Pending quest awards after the operation
    pub pending: Vec<PendingBonusConfirmation>,
}

pub struct ProgressionService<Q, T, L>
where
    Q: QuestRepository,
    T: TaskRepository,
    L: XpLedger,
{
    quests: Arc<Q>,
    tasks: Arc<T>,
    ledger: Arc<L>,
    engine: Mutex<CompletionBonusEngine>,
    clock: fn() -> DateTime<FixedOffset>,
}

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

impl<Q, T, L> ProgressionService<Q, T, L>
where
    Q: QuestRepository,
    T: TaskRepository,
    L: XpLedger,
{
    pub fn new(quests: Arc<Q>, tasks: Arc<T>, ledger: Arc<L>) -> Self {
        Self {
            quests,
            tasks,
            ledger,
            engine: Mutex::new(CompletionBonusEngine::new()),
            clock: local_now,
        }
    }

    pub fn from_config(quests: Arc<Q>, tasks: Arc<T>, ledger: Arc<L>, config: &Config) -> Self {
        Self {
            engine: Mutex::new(CompletionBonusEngine::from_config(&config.bonuses)),
            ..Self::new(quests, tasks, ledger)
        }
    }

    /// Replace the clock used to date history entries.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<FixedOffset>) -> Self {
        self.clock = clock;
        self
    }

    #[instrument(skip(self))]
    pub async fn toggle_quest_task(
        &self,
        quest_id: Uuid,
        category_id: Uuid,
        task_id: Uuid,
    ) -> DomainResult<OperationOutcome> {
        self.run_quest_operation(quest_id, |engine, quest| {
            engine.toggle_task(quest, category_id, task_id)
        })
        .await
    }

    #[instrument(skip(self, task), fields(task_id = %task.id))]
    pub async fn create_quest_task(
        &self,
        quest_id: Uuid,
        category_id: Uuid,
        task: QuestTask,
    ) -> DomainResult<OperationOutcome> {
        self.run_quest_operation(quest_id, |engine, quest| {
            engine.create_task(quest, category_id, task)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_quest_task(
        &self,
        quest_id: Uuid,
        category_id: Uuid,
        task_id: Uuid,
    ) -> DomainResult<OperationOutcome> {
        self.run_quest_operation(quest_id, |engine, quest| {
            engine.delete_task(quest, category_id, task_id)
        })
        .await
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    pub async fn create_category(
        &self,
        quest_id: Uuid,
        category: QuestCategory,
    ) -> DomainResult<OperationOutcome> {
        self.run_quest_operation(quest_id, |engine, quest| engine.create_category(quest, category))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_category(
        &self,
        quest_id: Uuid,
        category_id: Uuid,
    ) -> DomainResult<OperationOutcome> {
        self.run_quest_operation(quest_id, |engine, quest| {
            engine.delete_category(quest, category_id)
        })
        .await
    }

    /// Toggle a standalone task, dating streaks by the service clock.
    #[instrument(skip(self))]
    pub async fn toggle_task(&self, task_id: Uuid) -> DomainResult<OperationOutcome> {
        let engine = self.engine.lock().await;
        let task: Task = self
            .tasks
            .get(task_id)
            .await?
            .ok_or(DomainError::TaskNotFound(task_id))?;

        let now = (self.clock)();
        let (task, events) = engine.toggle_standalone_task(task, now.date_naive());
        self.tasks.save(&task).await?;

        let applied = self.commit(&events, now).await?;
        Ok(OperationOutcome {
            events,
            applied,
            pending: engine.pending().to_vec(),
        })
    }

    /// Pay the oldest pending quest award. `None` when nothing is pending.
    pub async fn confirm_pending_bonus(&self) -> DomainResult<Option<OperationOutcome>> {
        let mut engine = self.engine.lock().await;
        let mut next = engine.clone();
        let Some(event) = next.confirm_pending_bonus() else {
            return Ok(None);
        };
        self.finish_confirmation(&mut *engine, next, event).await.map(Some)
    }

    /// Pay one quest's pending award. `None` when it has none.
    pub async fn confirm_pending_bonus_for(
        &self,
        quest_id: Uuid,
    ) -> DomainResult<Option<OperationOutcome>> {
        let mut engine = self.engine.lock().await;
        let mut next = engine.clone();
        let Some(event) = next.confirm_pending_bonus_for(quest_id) else {
            return Ok(None);
        };
        self.finish_confirmation(&mut *engine, next, event).await.map(Some)
    }

    /// Pending quest awards, oldest first.
    pub async fn pending(&self) -> Vec<PendingBonusConfirmation> {
        self.engine.lock().await.pending().to_vec()
    }

    /// The award leaves the queue only once the ledger has taken it.
    async fn finish_confirmation(
        &self,
        engine: &mut CompletionBonusEngine,
        next: CompletionBonusEngine,
        event: XpEvent,
    ) -> DomainResult<OperationOutcome> {
        let events = vec![event];
        let at = (self.clock)();
        let outcome = self.ledger.apply_xp_events(&events).await?;
        *engine = next;

        self.record(&events, at, &outcome).await?;
        Ok(OperationOutcome {
            events,
            applied: Some(outcome),
            pending: engine.pending().to_vec(),
        })
    }

    async fn run_quest_operation<F>(&self, quest_id: Uuid, operation: F) -> DomainResult<OperationOutcome>
    where
        F: FnOnce(&mut CompletionBonusEngine, Quest) -> Transition + Send,
    {
        let mut engine = self.engine.lock().await;
        let quest = self
            .quests
            .get(quest_id)
            .await?
            .ok_or(DomainError::QuestNotFound(quest_id))?;

        // Pending changes are kept only once the new snapshot is stored.
        let mut next = engine.clone();
        let transition = operation(&mut next, quest);
        if let Some(id) = transition.stale {
            return Err(DomainError::StaleReference { quest_id, id });
        }

        self.quests.save(&transition.quest).await?;
        *engine = next;
        let applied = self.commit(&transition.events, (self.clock)()).await?;
        Ok(OperationOutcome {
            events: transition.events,
            applied,
            pending: engine.pending().to_vec(),
        })
    }

    /// Hand events to the ledger and record each in the history.
    async fn commit(
        &self,
        events: &[XpEvent],
        at: DateTime<FixedOffset>,
    ) -> DomainResult<Option<ApplyOutcome>> {
        if events.is_empty() {
            return Ok(None);
        }

        let outcome = self.ledger.apply_xp_events(events).await?;
        self.record(events, at, &outcome).await?;
        Ok(Some(outcome))
    }

    async fn record(
        &self,
        events: &[XpEvent],
        at: DateTime<FixedOffset>,
        outcome: &ApplyOutcome,
    ) -> DomainResult<()> {
        for event in events {
            self.ledger
                .record_history(at, event.amount, &event.reason_key())
                .await?;
        }

        if outcome.level.leveled_up() {
            info!(
                from = outcome.level.previous,
                to = outcome.level.current,
                "level up"
            );
        }
        Ok(())
    }
}
