use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn};

use crate::model::{ActorProfile, ActorRole};
use crate::source::ActorDirectory;

/// Counters reported at the end of an export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub cached: usize,
    pub placeholders: usize,
}

/// Memoizing actor lookup scoped to a single export run.
///
/// Every id is looked up at most once, even when two tickets' worth of
/// lookups race on it. A failed lookup caches a placeholder profile which
/// stays in place for the rest of the run.
pub struct ActorResolver<D> {
    directory: D,
    cache: Mutex<HashMap<u64, Arc<OnceCell<ActorProfile>>>>,
}

impl<D: ActorDirectory> ActorResolver<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub async fn resolve(&self, id: u64) -> ActorProfile {
        let slot = {
            let mut cache = self.cache.lock().await;
            cache
                .entry(id)
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        slot.get_or_init(|| self.fetch(id)).await.clone()
    }

    pub async fn stats(&self) -> ResolverStats {
        let cache = self.cache.lock().await;
        let mut stats = ResolverStats::default();
        for profile in cache.values().filter_map(|slot| slot.get()) {
            stats.cached += 1;
            if profile.is_placeholder {
                stats.placeholders += 1;
            }
        }
        stats
    }

    async fn fetch(&self, id: u64) -> ActorProfile {
        match self.directory.lookup_actor(id).await {
            Ok(record) => {
                debug!(actor_id = id, name = %record.name, "resolved actor");
                ActorProfile {
                    id,
                    display_name: record.name,
                    role: ActorRole::parse(&record.role),
                    is_placeholder: false,
                }
            }
            Err(err) => {
                warn!(actor_id = id, error = %err, "actor lookup failed, using placeholder");
                ActorProfile::placeholder(id)
            }
        }
    }
}
