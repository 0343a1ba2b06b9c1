//! Daily activity history aggregation.
//!
//! Rolls XP deltas into one bucket per calendar day, most recent first,
//! and moves buckets beyond the active window into an archive payload.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::domain::models::{
    ArchivedHistory, DailyActivityBucket, HistoryConfig, HistoryPayload, LegacyHistoryEntry,
};

/// Default number of daily buckets kept active.
pub const DEFAULT_ACTIVE_WINDOW: usize = 365;

/// Active buckets plus whatever was pushed out of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryUpdate {
    pub buckets: Vec<DailyActivityBucket>,
    pub archived: Option<ArchivedHistory>,
}

#[derive(Debug, Clone)]
pub struct HistoryAggregator {
    active_window: usize,
}

impl Default for HistoryAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVE_WINDOW)
    }
}

impl HistoryAggregator {
    /// Create an aggregator keeping at most `active_window` buckets (at least one).
    pub fn new(active_window: usize) -> Self {
        Self {
            active_window: active_window.max(1),
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.active_window)
    }

    pub const fn active_window(&self) -> usize {
        self.active_window
    }

    /// Merge one XP delta into the bucket for `at`'s calendar day.
    ///
    /// The day is taken in `at`'s own time zone. Buckets must be sorted
    /// most recent first and stay that way.
    pub fn add_entry<Tz: TimeZone>(
        &self,
        mut buckets: Vec<DailyActivityBucket>,
        xp_delta: i64,
        at: &DateTime<Tz>,
        contributing_id: &str,
    ) -> HistoryUpdate {
        let date = at.date_naive();

        if let Some(bucket) = buckets.iter_mut().find(|b| b.date == date) {
            bucket.record(xp_delta, contributing_id);
        } else {
            let position = buckets.partition_point(|b| b.date > date);
            buckets.insert(position, DailyActivityBucket::new(date, xp_delta, contributing_id));
        }
        debug!(%date, xp_delta, contributing_id, "history entry recorded");

        let archived = self.enforce_retention(&mut buckets);
        HistoryUpdate { buckets, archived }
    }

    /// Cut buckets beyond the active window off the tail into an archive.
    pub fn enforce_retention(&self, buckets: &mut Vec<DailyActivityBucket>) -> Option<ArchivedHistory> {
        if buckets.len() <= self.active_window {
            return None;
        }

        let overflow = buckets.split_off(self.active_window);
        info!(
            archived = overflow.len(),
            oldest = %overflow.last().map_or_else(String::new, |b| b.date.to_string()),
            "history buckets archived"
        );
        Some(ArchivedHistory::new(overflow, Utc::now()))
    }

    /// Fold flat legacy entries into daily buckets, days taken in `tz`.
    ///
    /// Deterministic: the same entries always produce the same buckets.
    pub fn migrate_legacy<Tz: TimeZone>(&self, entries: &[LegacyHistoryEntry], tz: &Tz) -> HistoryUpdate {
        let mut by_day: BTreeMap<NaiveDate, DailyActivityBucket> = BTreeMap::new();

        for entry in entries {
            let date = entry.timestamp.with_timezone(tz).date_naive();
            by_day
                .entry(date)
                .and_modify(|b| b.record(entry.xp_gained, entry.contributing_id.as_str()))
                .or_insert_with(|| {
                    DailyActivityBucket::new(date, entry.xp_gained, entry.contributing_id.as_str())
                });
        }

        let mut buckets: Vec<DailyActivityBucket> = by_day.into_values().rev().collect();
        info!(entries = entries.len(), buckets = buckets.len(), "legacy history migrated");

        let archived = self.enforce_retention(&mut buckets);
        HistoryUpdate { buckets, archived }
    }

    /// Bring stored history of either shape into bucket form.
    ///
    /// Already-bucketed payloads are returned untouched.
    pub fn normalize<Tz: TimeZone>(&self, payload: HistoryPayload, tz: &Tz) -> HistoryUpdate {
        match payload {
            HistoryPayload::Buckets(buckets) => HistoryUpdate {
                buckets,
                archived: None,
            },
            HistoryPayload::Legacy(entries) => self.migrate_legacy(&entries, tz),
        }
    }
}
