//! Per-user, per-region symptom history.
//!
//! The tracker is the one stateful component of the engine. Histories are
//! append-only: entries are never rewritten, reordered, or truncated here;
//! retention is an external policy concern. Reads hand out cloned snapshots
//! so callers can never mutate the log through a read.
//!
//! Concurrency model: an outer read-mostly map of users, each guarding its
//! own histories with a dedicated mutex. Concurrent submissions from the
//! same user serialise on that user's lock; different users never contend.
//! A poisoned lock is absorbed rather than propagated: every entry is
//! written whole under the lock, so the log is structurally valid even if a
//! panicking thread held it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use soma_types::{ComplaintId, RegionId};

/// A self-reported symptom, as submitted by the user session.
///
/// The tracker stamps the timestamp itself; callers only supply what the
/// user said.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymptomReport {
    pub symptom: String,
    /// Self-assessed severity on the presentation layer's scale.
    pub severity: Option<u8>,
    pub note: Option<String>,
    /// The chief complaint the user matched this symptom to, if any.
    pub matched_complaint: Option<ComplaintId>,
}

impl SymptomReport {
    pub fn new(symptom: impl Into<String>) -> Self {
        Self {
            symptom: symptom.into(),
            ..Self::default()
        }
    }
}

/// One logged symptom occurrence.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    pub symptom: String,
    pub reported_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_complaint: Option<ComplaintId>,
}

/// A user's append-only symptom log for one region.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegionHistory {
    pub region_id: RegionId,
    /// Entries in submission order, oldest first.
    pub entries: Vec<SymptomEntry>,
    pub last_updated: DateTime<Utc>,
}

type RegionHistories = HashMap<RegionId, UserRegionHistory>;

/// Create-or-append store of user symptom histories.
#[derive(Debug, Default)]
pub struct HistoryTracker {
    users: RwLock<HashMap<String, Arc<Mutex<RegionHistories>>>>,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a symptom for `(user_id, region_id)`, creating the history on
    /// first use and appending otherwise. The history's `last_updated`
    /// becomes the new entry's timestamp.
    ///
    /// Returns the stamped entry as stored.
    pub fn record(
        &self,
        user_id: &str,
        region_id: &RegionId,
        report: SymptomReport,
    ) -> SymptomEntry {
        let histories = self.histories_handle(user_id);
        let mut histories = histories
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let now = Utc::now();
        let entry = SymptomEntry {
            symptom: report.symptom,
            reported_at: now,
            severity: report.severity,
            note: report.note,
            matched_complaint: report.matched_complaint,
        };

        let history = histories
            .entry(region_id.clone())
            .or_insert_with(|| UserRegionHistory {
                region_id: region_id.clone(),
                entries: Vec::new(),
                last_updated: now,
            });
        history.entries.push(entry.clone());
        history.last_updated = now;

        tracing::debug!(region = %region_id, entries = history.entries.len(), "symptom recorded");
        entry
    }

    /// Snapshot of a user's history for one region, if any exists.
    pub fn history(&self, user_id: &str, region_id: &str) -> Option<UserRegionHistory> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        let histories = users.get(user_id)?;
        let histories = histories.lock().unwrap_or_else(PoisonError::into_inner);
        histories.get(region_id).cloned()
    }

    /// Snapshots of all region histories of a user, ordered by region id.
    pub fn histories_for(&self, user_id: &str) -> Vec<UserRegionHistory> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        let Some(histories) = users.get(user_id) else {
            return Vec::new();
        };
        let histories = histories.lock().unwrap_or_else(PoisonError::into_inner);

        let mut snapshots: Vec<UserRegionHistory> = histories.values().cloned().collect();
        snapshots.sort_by(|a, b| a.region_id.as_str().cmp(b.region_id.as_str()));
        snapshots
    }

    /// Returns the per-user history map, creating it on first use.
    fn histories_handle(&self, user_id: &str) -> Arc<Mutex<RegionHistories>> {
        {
            let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(histories) = users.get(user_id) {
                return Arc::clone(histories);
            }
        }

        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(users.entry(user_id.to_owned()).or_default())
    }
}
