pub mod completion_bonus;
pub mod history_aggregator;
pub mod progression_service;
pub mod xp_calculator;

pub use completion_bonus::{quest_bonus, CompletionBonusEngine, Transition, SECTION_BONUS};
pub use history_aggregator::{HistoryAggregator, HistoryUpdate};
pub use progression_service::{OperationOutcome, ProgressionService};
pub use xp_calculator::{XpBreakdown, XpCalculator};
