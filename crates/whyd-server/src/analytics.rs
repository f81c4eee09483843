//! Page visit tracking.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

use crate::auth::User;

/// Maximum visits kept in memory; oldest are dropped first.
const MAX_VISITS: usize = 10_000;

/// Records that a user visited a page.
///
/// Called after the response is built; implementations must not fail the
/// request, so there is nothing to return.
pub trait VisitRecorder: Send + Sync {
    fn add_visit(&self, user: &User, url: &str);

    /// Visits per URL, when the recorder keeps them.
    fn visit_counts(&self) -> BTreeMap<String, usize> {
        BTreeMap::new()
    }

    /// Up to `limit` most recent visits, newest first.
    fn recent_visits(&self, _limit: usize) -> Vec<Visit> {
        Vec::new()
    }

    /// Up to `limit` most recent visits of one user, newest first.
    fn user_visits(&self, _user_id: &str, _limit: usize) -> Vec<Visit> {
        Vec::new()
    }
}

/// A single recorded visit.
#[derive(Debug, Clone, Serialize)]
pub struct Visit {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub url: String,
    #[serde(rename = "visitedAt")]
    pub visited_at: DateTime<Utc>,
}

/// In-memory visit log.
pub struct VisitLog {
    visits: RwLock<VecDeque<Visit>>,
}

impl VisitLog {
    pub fn new() -> Self {
        Self {
            visits: RwLock::new(VecDeque::new()),
        }
    }
}

impl Default for VisitLog {
    fn default() -> Self {
        Self::new()
    }
}

impl VisitRecorder for VisitLog {
    fn add_visit(&self, user: &User, url: &str) {
        let visit = Visit {
            user_id: user.id.clone(),
            url: url.to_string(),
            visited_at: Utc::now(),
        };
        debug!("Visit: user={} url={}", visit.user_id, visit.url);

        let mut visits = self.visits.write();
        if visits.len() >= MAX_VISITS {
            visits.pop_front();
        }
        visits.push_back(visit);
    }

    fn recent_visits(&self, limit: usize) -> Vec<Visit> {
        self.visits.read().iter().rev().take(limit).cloned().collect()
    }

    fn user_visits(&self, user_id: &str, limit: usize) -> Vec<Visit> {
        self.visits
            .read()
            .iter()
            .rev()
            .filter(|visit| visit.user_id == user_id)
            .take(limit)
            .cloned()
            .collect()
    }

    fn visit_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for visit in self.visits.read().iter() {
            *counts.entry(visit.url.clone()).or_insert(0) += 1;
        }
        counts
    }
}
