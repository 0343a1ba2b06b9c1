//! Replay a scripted sequence of quest operations.
//!
//! The script is a JSON document holding a quest snapshot, optional
//! standalone tasks and a list of operations. Each operation is run through
//! the progression service against in-memory storage and the emitted XP
//! events are reported step by step.

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::cli::output::{output, signed, CommandOutput};
use crate::domain::models::{
    Config, DailyActivityBucket, PendingBonusConfirmation, ProgressionState, Quest, QuestCategory,
    QuestTask, Task, XpEvent,
};
use crate::domain::ports::{QuestRepository, TaskRepository};
use crate::domain::DomainResult;
use crate::infrastructure::memory::{InMemoryLedger, InMemoryQuestRepository, InMemoryTaskRepository};
use crate::services::{HistoryAggregator, OperationOutcome, ProgressionService};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Path to the JSON replay script
    pub file: PathBuf,
}

/// A replay script.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub quest: Quest,
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub operations: Vec<Operation>,
}

/// One scripted user action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    ToggleTask { category_id: Uuid, task_id: Uuid },
    CreateTask { category_id: Uuid, task: QuestTask },
    DeleteTask { category_id: Uuid, task_id: Uuid },
    CreateCategory { category: QuestCategory },
    DeleteCategory { category_id: Uuid },
    ToggleStandalone { task_id: Uuid },
    Confirm,
}

impl Operation {
    const fn name(&self) -> &'static str {
        match self {
            Self::ToggleTask { .. } => "toggle_task",
            Self::CreateTask { .. } => "create_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::CreateCategory { .. } => "create_category",
            Self::DeleteCategory { .. } => "delete_category",
            Self::ToggleStandalone { .. } => "toggle_standalone",
            Self::Confirm => "confirm",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepOutput {
    pub step: usize,
    pub op: &'static str,
    pub events: Vec<XpEvent>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReplayOutput {
    pub steps: Vec<StepOutput>,
    pub quest: Quest,
    pub quest_complete: bool,
    pub progression: ProgressionState,
    pub level: u32,
    pub pending: Vec<PendingBonusConfirmation>,
    pub history: Vec<DailyActivityBucket>,
}

impl CommandOutput for ReplayOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["#", "Operation", "Reason", "XP"]);

        for step in &self.steps {
            if let Some(ref error) = step.error {
                table.add_row(vec![step.step.to_string(), step.op.to_string(), error.clone(), String::new()]);
                continue;
            }
            if step.events.is_empty() {
                table.add_row(vec![step.step.to_string(), step.op.to_string(), "-".to_string(), String::new()]);
            }
            for event in &step.events {
                table.add_row(vec![
                    step.step.to_string(),
                    step.op.to_string(),
                    event.reason_key(),
                    signed(event.amount),
                ]);
            }
        }

        let mut lines = vec![
            table.to_string(),
            format!(
                "\nQuest \"{}\": {}",
                self.quest.title,
                if self.quest_complete { "complete" } else { "incomplete" }
            ),
            format!("Total XP: {} (level {})", self.progression.total_xp, self.level),
        ];

        for (skill, progress) in &self.progression.skills {
            lines.push(format!("  {:<13} {} XP (level {})", skill.as_str(), progress.xp, progress.level()));
        }

        if !self.pending.is_empty() {
            lines.push("\nAwaiting confirmation:".to_string());
            for pending in &self.pending {
                lines.push(format!("  {} +{} XP", pending.quest_title, pending.bonus_amount));
            }
        }

        lines.join("\n")
    }
}

type MemoryService = ProgressionService<InMemoryQuestRepository, InMemoryTaskRepository, InMemoryLedger>;

async fn run_operation(
    service: &MemoryService,
    quest_id: Uuid,
    operation: Operation,
) -> DomainResult<Option<OperationOutcome>> {
    match operation {
        Operation::ToggleTask { category_id, task_id } => {
            service.toggle_quest_task(quest_id, category_id, task_id).await.map(Some)
        }
        Operation::CreateTask { category_id, task } => {
            service.create_quest_task(quest_id, category_id, task).await.map(Some)
        }
        Operation::DeleteTask { category_id, task_id } => {
            service.delete_quest_task(quest_id, category_id, task_id).await.map(Some)
        }
        Operation::CreateCategory { category } => service.create_category(quest_id, category).await.map(Some),
        Operation::DeleteCategory { category_id } => {
            service.delete_category(quest_id, category_id).await.map(Some)
        }
        Operation::ToggleStandalone { task_id } => service.toggle_task(task_id).await.map(Some),
        Operation::Confirm => service.confirm_pending_bonus().await,
    }
}

/// Run a parsed script and collect the report.
pub async fn replay(script: ReplayScript, config: &Config) -> Result<ReplayOutput> {
    let quest_id = script.quest.id;
    let quests = Arc::new(InMemoryQuestRepository::with_quests([script.quest]));
    let tasks = Arc::new(InMemoryTaskRepository::new());
    for task in &script.tasks {
        tasks.save(task).await?;
    }
    let ledger = Arc::new(InMemoryLedger::new(HistoryAggregator::from_config(&config.history)));
    let service = ProgressionService::from_config(quests.clone(), tasks, ledger.clone(), config);

    let mut steps = Vec::with_capacity(script.operations.len());
    for (index, operation) in script.operations.into_iter().enumerate() {
        let op = operation.name();
        let step = match run_operation(&service, quest_id, operation).await {
            Ok(outcome) => StepOutput {
                step: index + 1,
                op,
                events: outcome.map(|o| o.events).unwrap_or_default(),
                error: None,
            },
            Err(err) => {
                warn!(step = index + 1, op, error = %err, "replay step failed");
                StepOutput {
                    step: index + 1,
                    op,
                    events: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        };
        steps.push(step);
    }

    let quest = quests
        .get(quest_id)
        .await?
        .context("Quest disappeared during replay")?;
    let progression = ledger.progression().await;

    Ok(ReplayOutput {
        steps,
        quest_complete: quest.is_complete(),
        quest,
        level: progression.level(),
        progression,
        pending: service.pending().await,
        history: ledger.history().await,
    })
}

pub async fn execute(args: ReplayArgs, config: &Config, json_mode: bool) -> Result<()> {
    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read replay script {}", args.file.display()))?;
    let script: ReplayScript = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse replay script {}", args.file.display()))?;

    let result = replay(script, config).await?;
    output(&result, json_mode);
    Ok(())
}
