use proptest::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;

use questlog::domain::models::leveling::{
    cumulative_xp_for, level_for, progress_within_level, MAX_LEVEL,
};
use questlog::domain::models::{
    Difficulty, ProgressionState, Quest, QuestCategory, QuestTask, SkillCategory, XpEvent, XpReason,
};
use questlog::services::{quest_bonus, CompletionBonusEngine, XpCalculator, SECTION_BONUS};

/// One randomly chosen edit; indices are taken modulo the current tree size.
#[derive(Debug, Clone)]
enum Edit {
    Toggle(usize),
    CreateTask(usize, Difficulty),
    DeleteTask(usize),
    CreateCategory(usize),
    DeleteCategory(usize),
    Confirm,
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
        Just(Difficulty::Epic),
    ]
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        6 => any::<usize>().prop_map(Edit::Toggle),
        1 => (any::<usize>(), difficulty()).prop_map(|(i, d)| Edit::CreateTask(i, d)),
        1 => any::<usize>().prop_map(Edit::DeleteTask),
        1 => (0usize..3).prop_map(Edit::CreateCategory),
        1 => any::<usize>().prop_map(Edit::DeleteCategory),
        1 => Just(Edit::Confirm),
    ]
}

fn task_refs(quest: &Quest) -> Vec<(Uuid, Uuid)> {
    quest
        .categories
        .iter()
        .flat_map(|c| c.tasks.iter().map(move |t| (c.id, t.id)))
        .collect()
}

fn apply_edit(engine: &mut CompletionBonusEngine, quest: Quest, edit: &Edit) -> (Quest, Vec<XpEvent>) {
    let refs = task_refs(&quest);
    let transition = match *edit {
        Edit::Toggle(i) if !refs.is_empty() => {
            let (c, t) = refs[i % refs.len()];
            engine.toggle_task(quest, c, t)
        }
        Edit::DeleteTask(i) if !refs.is_empty() => {
            let (c, t) = refs[i % refs.len()];
            engine.delete_task(quest, c, t)
        }
        Edit::CreateTask(i, difficulty) if !quest.categories.is_empty() => {
            let c = quest.categories[i % quest.categories.len()].id;
            engine.create_task(quest, c, QuestTask::new("new", difficulty, SkillCategory::Creative))
        }
        Edit::DeleteCategory(i) if !quest.categories.is_empty() => {
            let c = quest.categories[i % quest.categories.len()].id;
            engine.delete_category(quest, c)
        }
        Edit::CreateCategory(tasks) => {
            let category = QuestCategory::new("new").with_tasks(
                (0..tasks)
                    .map(|_| QuestTask::new("new", Difficulty::Easy, SkillCategory::Misc))
                    .collect(),
            );
            engine.create_category(quest, category)
        }
        Edit::Confirm => return (quest, engine.confirm_pending_bonus().into_iter().collect()),
        _ => return (quest, Vec::new()),
    };
    assert!(transition.is_applied());
    (transition.quest, transition.events)
}

fn seed_quest(shape: &[usize]) -> Quest {
    Quest::new("Property quest").with_categories(
        shape
            .iter()
            .map(|&n| {
                QuestCategory::new("section").with_tasks(
                    (0..n)
                        .map(|_| QuestTask::new("task", Difficulty::Medium, SkillCategory::Mental))
                        .collect(),
                )
            })
            .collect(),
    )
}

proptest! {
    /// Property: the curve inverts its own cumulative table
    #[test]
    fn prop_level_for_inverts_cumulative(level in 0u32..=200) {
        let xp = cumulative_xp_for(level);
        prop_assert_eq!(level_for(xp), level);
        if xp > 0 {
            prop_assert_eq!(level_for(xp - 1), level - 1);
        }
    }

    /// Property: levels never decrease as XP grows and stay capped
    #[test]
    fn prop_level_is_monotonic(a in 0u64..50_000_000, b in 0u64..50_000_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(level_for(low) <= level_for(high));
        prop_assert!(level_for(high) <= MAX_LEVEL);
    }

    /// Property: progress percentage stays within 0..=100
    #[test]
    fn prop_progress_percentage_in_range(xp in 0u64..2_000_000, level in 0u32..=MAX_LEVEL) {
        let progress = progress_within_level(xp, level);
        prop_assert!((0.0..=100.0).contains(&progress.percentage));

        let own = progress_within_level(xp, level_for(xp));
        prop_assert!(own.current >= 0);
        prop_assert!(own.current.unsigned_abs() < own.max);
    }

    /// Property: once pending awards are confirmed, the net XP paid per
    /// reason matches the current tree
    ///
    /// Every surviving task has earned its XP iff it is completed, every
    /// surviving category its section bonus iff it is complete, and the
    /// quest the bonus for its current shape iff it is complete.
    #[test]
    fn prop_bonuses_track_completion(
        shape in prop::collection::vec(0usize..4, 0..4),
        edits in prop::collection::vec(edit(), 0..40),
    ) {
        let mut engine = CompletionBonusEngine::new();
        let mut quest = seed_quest(&shape);
        let mut paid: HashMap<XpReason, i64> = HashMap::new();
        let mut ledger = ProgressionState::default();

        for edit in &edits {
            let (next, events) = apply_edit(&mut engine, quest, edit);
            for event in &events {
                *paid.entry(event.reason).or_default() += event.amount;
            }
            ledger.apply_events(&events);
            quest = next;
        }
        while let Some(event) = engine.confirm_pending_bonus() {
            *paid.entry(event.reason).or_default() += event.amount;
            ledger.apply_events(std::slice::from_ref(&event));
        }

        let calc = XpCalculator::new();
        for category in &quest.categories {
            let owed = if category.completion().is_complete() { SECTION_BONUS } else { 0 };
            let got = paid.get(&XpReason::SectionBonus(category.id)).copied().unwrap_or(0);
            prop_assert_eq!(got, owed);

            for task in &category.tasks {
                let owed = if task.completed { calc.xp_for(task.difficulty) } else { 0 };
                let got = paid.get(&XpReason::Task(task.id)).copied().unwrap_or(0);
                prop_assert_eq!(got, owed);
            }
        }

        let owed = if quest.is_complete() { quest_bonus(quest.category_count()) } else { 0 };
        let got = paid.get(&XpReason::QuestBonus(quest.id)).copied().unwrap_or(0);
        prop_assert_eq!(got, owed);

        // Every reason nets to zero or more, so clamping never engaged
        prop_assert!(paid.values().all(|&v| v >= 0));
        let net: i64 = paid.values().sum();
        prop_assert_eq!(i64::try_from(ledger.total_xp).unwrap(), net);
    }
}
