//! Daily activity history.
//!
//! XP deltas are rolled into one bucket per calendar day. Buckets that fall
//! out of the active window are moved into immutable archives.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Aggregated XP and contributing items for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DailyActivityBucket {
    pub date: NaiveDate,
    /// Signed sum of the day's deltas
    pub total_xp: i64,
    pub task_ids: BTreeSet<String>,
}

impl DailyActivityBucket {
    pub fn new(date: NaiveDate, xp_delta: i64, contributing_id: impl Into<String>) -> Self {
        Self {
            date,
            total_xp: xp_delta,
            task_ids: BTreeSet::from([contributing_id.into()]),
        }
    }

    /// Fold another delta into this day.
    pub fn record(&mut self, xp_delta: i64, contributing_id: impl Into<String>) {
        self.total_xp = self.total_xp.saturating_add(xp_delta);
        self.task_ids.insert(contributing_id.into());
    }

    /// Number of distinct items that contributed to this day.
    pub fn task_count(&self) -> usize {
        self.task_ids.len()
    }
}

/// Buckets evicted from the active window. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedHistory {
    entries: Vec<DailyActivityBucket>,
    archived_at: DateTime<Utc>,
    total_entries: usize,
}

impl ArchivedHistory {
    pub fn new(entries: Vec<DailyActivityBucket>, archived_at: DateTime<Utc>) -> Self {
        let total_entries = entries.len();
        Self {
            entries,
            archived_at,
            total_entries,
        }
    }

    pub fn entries(&self) -> &[DailyActivityBucket] {
        &self.entries
    }

    pub const fn archived_at(&self) -> DateTime<Utc> {
        self.archived_at
    }

    pub const fn total_entries(&self) -> usize {
        self.total_entries
    }
}

/// One flat history entry in the legacy (pre-bucket) format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyHistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub xp_gained: i64,
    pub contributing_id: String,
}

/// Stored history in either shape. The shape is detected on deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryPayload {
    Buckets(Vec<DailyActivityBucket>),
    Legacy(Vec<LegacyHistoryEntry>),
}
