//! XP ledger port.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crate::domain::error::DomainResult;
use crate::domain::models::{ApplyOutcome, XpEvent};

/// Receiver of the engine's XP events.
///
/// Each call is expected to be applied atomically. The engine does not
/// retry or roll back when a call fails.
#[async_trait]
pub trait XpLedger: Send + Sync {
    /// Apply signed XP events to total and skill XP.
    async fn apply_xp_events(&self, events: &[XpEvent]) -> DomainResult<ApplyOutcome>;

    /// Record one XP delta in the daily activity history.
    ///
    /// `at` is bucketed by its calendar day in its own offset.
    async fn record_history(
        &self,
        at: DateTime<FixedOffset>,
        xp_delta: i64,
        reason: &str,
    ) -> DomainResult<()>;
}
