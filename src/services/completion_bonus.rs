//! Completion bonus engine.
//!
//! Turns toggles, creations and deletions inside a quest tree into signed
//! XP events. Every mutation goes through one transition detector that
//! compares the completion of each surviving ancestor before and after the
//! change, so the bonus XP paid for a quest always matches its current
//! completion state no matter the order of edits.
//!
//! Quest awards reached by toggling a task are held as pending
//! confirmations until the caller confirms them. Awards reached any other
//! way, and every revocation, are emitted immediately.

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::models::{
    BonusConfig, Completion, PendingBonusConfirmation, Quest, QuestCategory, QuestTask, Task,
    XpEvent,
};
use crate::services::xp_calculator::XpCalculator;

/// XP awarded when a category becomes complete (revoked when it stops being).
pub const SECTION_BONUS: i64 = 20;

/// XP awarded when a quest with `category_count` categories becomes complete.
///
/// Counts below one, including negative counts, earn nothing.
pub const fn quest_bonus(category_count: i64) -> i64 {
    if category_count < 1 {
        0
    } else if category_count < 3 {
        80
    } else if category_count <= 5 {
        120
    } else {
        180
    }
}

/// Quest bonus a quest is owed in its current shape.
fn owed_quest_bonus(quest: &Quest) -> i64 {
    if quest.is_complete() {
        quest_bonus(quest.category_count())
    } else {
        0
    }
}

/// Outcome of one engine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The updated tree, or the untouched input when `stale` is set
    pub quest: Quest,
    pub events: Vec<XpEvent>,
    /// Id that could not be found in the snapshot
    pub stale: Option<Uuid>,
}

impl Transition {
    const fn applied(quest: Quest, events: Vec<XpEvent>) -> Self {
        Self {
            quest,
            events,
            stale: None,
        }
    }

    fn stale(quest: Quest, id: Uuid) -> Self {
        warn!(quest_id = %quest.id, %id, "reference not found in quest snapshot; ignoring");
        Self {
            quest,
            events: Vec::new(),
            stale: Some(id),
        }
    }

    pub const fn is_applied(&self) -> bool {
        self.stale.is_none()
    }

    /// Net XP of the emitted events.
    pub fn net_xp(&self) -> i64 {
        self.events.iter().map(|e| e.amount).sum()
    }
}

/// How a quest award reached by an operation is paid out.
#[derive(Debug, Clone, Copy)]
enum AwardPolicy {
    /// Held for confirmation, triggered by toggling this task
    Deferred { triggering_task_id: Uuid },
    Immediate,
}

/// Maintains completion bonuses across quest → category → task.
#[derive(Debug, Clone)]
pub struct CompletionBonusEngine {
    calculator: XpCalculator,
    require_confirmation: bool,
    /// Unconfirmed quest awards, at most one per quest, oldest first
    pending: Vec<PendingBonusConfirmation>,
}

impl Default for CompletionBonusEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionBonusEngine {
    pub const fn new() -> Self {
        Self {
            calculator: XpCalculator::new(),
            require_confirmation: true,
            pending: Vec::new(),
        }
    }

    pub const fn from_config(config: &BonusConfig) -> Self {
        Self::new().with_confirmation(config.require_quest_confirmation)
    }

    /// When disabled, quest awards reached by toggling are emitted immediately.
    #[must_use]
    pub const fn with_confirmation(mut self, require_confirmation: bool) -> Self {
        self.require_confirmation = require_confirmation;
        self
    }

    /// Flip a task's completed flag.
    ///
    /// Emits the task's base XP (negative when un-completing), at most one
    /// section bonus event and at most one quest revocation. A quest that
    /// becomes complete opens a pending confirmation instead of emitting.
    pub fn toggle_task(&mut self, quest: Quest, category_id: Uuid, task_id: Uuid) -> Transition {
        let Some(task) = quest.task(category_id, task_id) else {
            let missing = if quest.category(category_id).is_some() { task_id } else { category_id };
            return Transition::stale(quest, missing);
        };

        let completing = !task.completed;
        let xp = self.calculator.xp_for(task.difficulty);
        let skill = task.skill_category;

        let mut after = quest.clone();
        if let Some(task) = after.task_mut(category_id, task_id) {
            task.completed = completing;
        }

        let amount = if completing { xp } else { -xp };
        let mut events = vec![XpEvent::task(task_id, amount, skill)];
        events.extend(self.settle(
            &quest,
            &after,
            AwardPolicy::Deferred {
                triggering_task_id: task_id,
            },
        ));

        debug!(
            quest_id = %after.id,
            %category_id,
            %task_id,
            completing,
            events = events.len(),
            "task toggled"
        );
        Transition::applied(after, events)
    }

    /// Remove a task. Completion reached by the removal is paid immediately.
    ///
    /// The removed task's own base XP is kept.
    pub fn delete_task(&mut self, quest: Quest, category_id: Uuid, task_id: Uuid) -> Transition {
        let Some(category) = quest.category(category_id) else {
            return Transition::stale(quest, category_id);
        };
        let Some(index) = category.tasks.iter().position(|t| t.id == task_id) else {
            return Transition::stale(quest, task_id);
        };

        let mut after = quest.clone();
        if let Some(category) = after.category_mut(category_id) {
            category.tasks.remove(index);
        }

        let events = self.settle(&quest, &after, AwardPolicy::Immediate);
        debug!(quest_id = %after.id, %category_id, %task_id, events = events.len(), "task deleted");
        Transition::applied(after, events)
    }

    /// Remove a category. The quest bonus follows the remaining categories.
    ///
    /// A section bonus already paid for the removed category is kept.
    pub fn delete_category(&mut self, quest: Quest, category_id: Uuid) -> Transition {
        let Some(index) = quest.categories.iter().position(|c| c.id == category_id) else {
            return Transition::stale(quest, category_id);
        };

        let mut after = quest.clone();
        after.categories.remove(index);

        let events = self.settle(&quest, &after, AwardPolicy::Immediate);
        debug!(quest_id = %after.id, %category_id, events = events.len(), "category deleted");
        Transition::applied(after, events)
    }

    /// Append a task to a category. New tasks always start incomplete.
    pub fn create_task(&mut self, quest: Quest, category_id: Uuid, mut task: QuestTask) -> Transition {
        let Some(category) = quest.category(category_id) else {
            return Transition::stale(quest, category_id);
        };
        if category.task(task.id).is_some() {
            warn!(quest_id = %quest.id, task_id = %task.id, "task already exists; ignoring create");
            return Transition::applied(quest, Vec::new());
        }

        task.completed = false;
        let task_id = task.id;
        let mut after = quest.clone();
        if let Some(category) = after.category_mut(category_id) {
            category.tasks.push(task);
        }

        let events = self.settle(&quest, &after, AwardPolicy::Immediate);
        debug!(quest_id = %after.id, %category_id, %task_id, events = events.len(), "task created");
        Transition::applied(after, events)
    }

    /// Append a category. Any tasks it carries start incomplete.
    ///
    /// On a complete quest the revocation returns the bonus that was paid
    /// for the old category count, not the bracket of the new count.
    pub fn create_category(&mut self, quest: Quest, mut category: QuestCategory) -> Transition {
        if quest.category(category.id).is_some() {
            warn!(quest_id = %quest.id, category_id = %category.id, "category already exists; ignoring create");
            return Transition::applied(quest, Vec::new());
        }

        for task in &mut category.tasks {
            task.completed = false;
        }
        let category_id = category.id;
        let mut after = quest.clone();
        after.categories.push(category);

        let events = self.settle(&quest, &after, AwardPolicy::Immediate);
        debug!(quest_id = %after.id, %category_id, events = events.len(), "category created");
        Transition::applied(after, events)
    }

    /// Confirm the oldest pending quest award. No-op when nothing is pending.
    pub fn confirm_pending_bonus(&mut self) -> Option<XpEvent> {
        if self.pending.is_empty() {
            return None;
        }
        Some(Self::pay(self.pending.remove(0)))
    }

    /// Confirm the pending award of one quest. No-op when it has none.
    pub fn confirm_pending_bonus_for(&mut self, quest_id: Uuid) -> Option<XpEvent> {
        let index = self.pending.iter().position(|p| p.quest_id == quest_id)?;
        Some(Self::pay(self.pending.remove(index)))
    }

    /// Drop a pending award without paying it, e.g. when its quest is removed.
    pub fn discard_pending(&mut self, quest_id: Uuid) -> Option<PendingBonusConfirmation> {
        let index = self.pending.iter().position(|p| p.quest_id == quest_id)?;
        let discarded = self.pending.remove(index);
        info!(%quest_id, bonus = discarded.bonus_amount, "pending quest bonus discarded");
        Some(discarded)
    }

    /// Pending quest awards, oldest first.
    pub fn pending(&self) -> &[PendingBonusConfirmation] {
        &self.pending
    }

    pub fn pending_for(&self, quest_id: Uuid) -> Option<&PendingBonusConfirmation> {
        self.pending.iter().find(|p| p.quest_id == quest_id)
    }

    /// Flip a standalone task's completed flag and keep its habit streak.
    ///
    /// Un-completing restores the streak the habit had before the
    /// completion being undone.
    pub fn toggle_standalone_task(&self, mut task: Task, today: NaiveDate) -> (Task, Vec<XpEvent>) {
        let completing = !task.completed;
        let xp = self.calculator.xp_for(task.difficulty);

        if task.is_habit {
            if completing {
                task.record_completion(today);
            } else {
                task.undo_completion();
            }
        }
        task.completed = completing;

        let amount = if completing { xp } else { -xp };
        debug!(task_id = %task.id, completing, streak = task.streak, "standalone task toggled");
        let event = XpEvent::task(task.id, amount, task.skill_category);
        (task, vec![event])
    }

    fn pay(pending: PendingBonusConfirmation) -> XpEvent {
        info!(
            quest_id = %pending.quest_id,
            bonus = pending.bonus_amount,
            "quest bonus confirmed"
        );
        XpEvent::quest_bonus(pending.quest_id, pending.bonus_amount)
    }

    /// Emit the bonus events that move `before` to `after`.
    fn settle(&mut self, before: &Quest, after: &Quest, policy: AwardPolicy) -> Vec<XpEvent> {
        let mut events = settle_sections(before, after);
        events.extend(self.settle_quest(before, after, policy));
        events
    }

    fn settle_quest(&mut self, before: &Quest, after: &Quest, policy: AwardPolicy) -> Option<XpEvent> {
        let owed_before = owed_quest_bonus(before);
        let owed_after = owed_quest_bonus(after);

        // An unconfirmed award has not been paid: track the quest without emitting.
        if let Some(index) = self.pending.iter().position(|p| p.quest_id == after.id) {
            if owed_after == 0 {
                let withdrawn = self.pending.remove(index);
                info!(
                    quest_id = %after.id,
                    bonus = withdrawn.bonus_amount,
                    "quest regressed before confirmation; pending bonus withdrawn"
                );
            } else {
                self.pending[index].bonus_amount = owed_after;
            }
            return None;
        }

        let delta = owed_after - owed_before;
        if delta == 0 {
            return None;
        }

        if let AwardPolicy::Deferred { triggering_task_id } = policy {
            if self.require_confirmation && owed_before == 0 {
                info!(quest_id = %after.id, bonus = owed_after, "quest complete; bonus awaiting confirmation");
                self.pending.push(PendingBonusConfirmation {
                    quest_id: after.id,
                    bonus_amount: owed_after,
                    triggering_task_id,
                    quest_title: after.title.clone(),
                });
                return None;
            }
        }

        info!(quest_id = %after.id, amount = delta, "quest bonus adjusted");
        Some(XpEvent::quest_bonus(after.id, delta))
    }
}

/// Section bonus events for every category whose completion changed.
///
/// Categories absent before the change count as incomplete; categories
/// absent after it keep whatever they were paid.
fn settle_sections(before: &Quest, after: &Quest) -> Vec<XpEvent> {
    after
        .categories
        .iter()
        .filter_map(|category| {
            let was = before
                .category(category.id)
                .map_or(Completion::Incomplete, QuestCategory::completion);
            match (was, category.completion()) {
                (Completion::Incomplete, Completion::Complete) => {
                    Some(XpEvent::section_bonus(category.id, SECTION_BONUS))
                }
                (Completion::Complete, Completion::Incomplete) => {
                    Some(XpEvent::section_bonus(category.id, -SECTION_BONUS))
                }
                _ => None,
            }
        })
        .collect()
}
