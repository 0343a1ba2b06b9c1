//! Common test utilities for integration tests
//!
//! Provides shared fixtures for building quests and wiring a progression
//! service to the in-memory adapters.

use chrono::{DateTime, FixedOffset, TimeZone};
use std::sync::Arc;
use uuid::Uuid;

use questlog::domain::models::{Difficulty, Quest, QuestCategory, QuestTask, SkillCategory};
use questlog::infrastructure::memory::{
    InMemoryLedger, InMemoryQuestRepository, InMemoryTaskRepository,
};
use questlog::services::{HistoryAggregator, ProgressionService};

pub type TestService =
    ProgressionService<InMemoryQuestRepository, InMemoryTaskRepository, InMemoryLedger>;

/// Service and adapters sharing one in-memory store.
pub struct Harness {
    pub service: TestService,
    pub quests: Arc<InMemoryQuestRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub ledger: Arc<InMemoryLedger>,
}

/// Fixed clock so history buckets land on a known day.
#[allow(dead_code)]
pub fn fixed_now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .and_then(|tz| tz.with_ymd_and_hms(2024, 3, 9, 23, 30, 0).single())
        .expect("valid fixed timestamp")
}

/// Build a harness holding the given quests.
pub fn harness(quests: impl IntoIterator<Item = Quest>) -> Harness {
    let quests = Arc::new(InMemoryQuestRepository::with_quests(quests));
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let ledger = Arc::new(InMemoryLedger::new(HistoryAggregator::default()));
    let service = ProgressionService::new(quests.clone(), tasks.clone(), ledger.clone())
        .with_clock(fixed_now);

    Harness {
        service,
        quests,
        tasks,
        ledger,
    }
}

/// Quest with `categories` categories of `tasks_per_category` easy tasks.
pub fn quest(categories: usize, tasks_per_category: usize) -> Quest {
    Quest::new("Learn Rust").with_categories(
        (0..categories)
            .map(|c| {
                QuestCategory::new(format!("Section {c}")).with_tasks(
                    (0..tasks_per_category)
                        .map(|t| QuestTask::new(format!("Task {c}.{t}"), Difficulty::Easy, SkillCategory::Mental))
                        .collect(),
                )
            })
            .collect(),
    )
}

/// Every (category id, task id) pair of a quest, in tree order.
pub fn task_refs(quest: &Quest) -> Vec<(Uuid, Uuid)> {
    quest
        .categories
        .iter()
        .flat_map(|c| c.tasks.iter().map(move |t| (c.id, t.id)))
        .collect()
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
