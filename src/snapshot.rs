//! Snapshot store
//!
//! Keeps computed results retrievable by an opaque id. Entries are never
//! updated in place; capacity and optional TTL bound memory.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::scorer::FootprintResult;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_SUFFIX_LEN: usize = 6;
const MAX_ID_ATTEMPTS: usize = 8;

/// A stored result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintSnapshot {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub result: FootprintResult,
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(13);
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

/// `<base36 millis>-<6 random base36 chars>`
pub fn generate_snapshot_id(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().max(0) as u64;
    let mut rng = rand::thread_rng();
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}", to_base36(millis), suffix)
}

/// In-memory snapshot cache
#[derive(Clone)]
pub struct SnapshotStore {
    cache: Cache<String, Arc<FootprintSnapshot>>,
}

impl SnapshotStore {
    pub fn new(capacity: u64, ttl: Option<Duration>) -> Self {
        let builder = Cache::builder().max_capacity(capacity);
        let cache = match ttl {
            Some(ttl) => builder.time_to_live(ttl).build(),
            None => builder.build(),
        };
        Self { cache }
    }

    /// Store a result under a fresh id
    ///
    /// Returns `None` only if every generated id collided.
    pub async fn insert(&self, result: FootprintResult) -> Option<Arc<FootprintSnapshot>> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let created_at = Utc::now();
            let id = generate_snapshot_id(created_at);
            let snapshot = Arc::new(FootprintSnapshot {
                id: id.clone(),
                created_at,
                result: result.clone(),
            });

            let entry = self
                .cache
                .entry(id)
                .or_insert_with(async { snapshot.clone() })
                .await;
            if entry.is_fresh() {
                return Some(snapshot);
            }
            tracing::warn!(id = %snapshot.id, "Snapshot id collision, retrying");
        }
        None
    }

    pub async fn get(&self, id: &str) -> Option<Arc<FootprintSnapshot>> {
        self.cache.get(id).await
    }

    /// Approximate number of stored snapshots
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::FootprintScorer;
    use crate::session::QuizSession;
    use crate::tables::GradeTier;
    use chrono::TimeZone;

    #[test]
    fn test_id_shape() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let id = generate_snapshot_id(now);
        let (stamp, suffix) = id.split_once('-').unwrap();
        assert_eq!(stamp, to_base36(1_700_000_000_000));
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = SnapshotStore::new(100, None);
        let result = FootprintScorer::builtin().score(&QuizSession::new(GradeTier::College, "AU"));

        let stored = store.insert(result.clone()).await.unwrap();
        let fetched = store.get(&stored.id).await.unwrap();
        assert_eq!(fetched.result, result);
        assert!(store.get("missing").await.is_none());
    }
}
