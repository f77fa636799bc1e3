use dreamdiary_core::model::DreamEntry;
use dreamdiary_core::storage::snapshot::content_hash;
use dreamdiary_core::storage::{DreamStore, KeyValueStore};

use crate::error::QueryError;
use crate::stats::DreamStats;

/// Which store handle and version a cached result was computed for.
type Origin = (u64, u64);

struct Cached {
    origin: Option<Origin>,
    hash: String,
    stats: DreamStats,
}

/// Memoized [`DreamStats`].
///
/// Results fetched through [`StatsCache::for_store`] are reused without
/// rehashing while the same store handle reports the same version. Anything
/// else is checked against a content hash, and the statistics are only
/// recomputed when the collection actually changed. One cache can serve
/// several stores.
#[derive(Default)]
pub struct StatsCache {
    cached: Option<Cached>,
    recomputations: usize,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for an arbitrary collection, reused when its content hash
    /// matches the cached one.
    pub fn get(&mut self, entries: &[DreamEntry]) -> Result<&DreamStats, QueryError> {
        self.lookup(None, entries)
    }

    /// Statistics for the store's current collection.
    pub fn for_store<S: KeyValueStore>(
        &mut self,
        store: &DreamStore<S>,
    ) -> Result<&DreamStats, QueryError> {
        let origin = (store.instance_id(), store.version());
        self.lookup(Some(origin), store.list())
    }

    /// How many times statistics were computed from scratch.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    fn lookup(
        &mut self,
        origin: Option<Origin>,
        entries: &[DreamEntry],
    ) -> Result<&DreamStats, QueryError> {
        let cached = match self.cached.take() {
            Some(cached) if origin.is_some() && cached.origin == origin => cached,
            Some(mut cached) => {
                let hash = content_hash(entries)?;
                if hash == cached.hash {
                    cached.origin = origin;
                    cached
                } else {
                    self.compute(origin, hash, entries)
                }
            }
            None => {
                let hash = content_hash(entries)?;
                self.compute(origin, hash, entries)
            }
        };
        Ok(&self.cached.insert(cached).stats)
    }

    fn compute(&mut self, origin: Option<Origin>, hash: String, entries: &[DreamEntry]) -> Cached {
        tracing::debug!("Recomputing statistics for {} dreams", entries.len());
        self.recomputations += 1;
        Cached {
            origin,
            hash,
            stats: DreamStats::compute(entries),
        }
    }
}
