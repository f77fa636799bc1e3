use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::error::CoreError;
use crate::model::{DreamDraft, DreamEntry, DreamId, DreamPatch};

use super::kv::KeyValueStore;
use super::snapshot::{self, DREAMS_KEY};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// The authoritative, newest-first collection of dream entries.
///
/// Every mutation re-reads the stored collection inside
/// [`KeyValueStore::update`], applies the change to that fresh copy and
/// rewrites it under [`DREAMS_KEY`], so handles sharing one backend never
/// drop each other's entries. The in-memory view only changes once the write
/// has succeeded.
pub struct DreamStore<S: KeyValueStore> {
    backend: S,
    entries: Vec<DreamEntry>,
    instance: u64,
    version: u64,
}

impl<S: KeyValueStore> DreamStore<S> {
    /// Restore the collection from `backend`. A missing key is an empty diary.
    pub fn open(backend: S) -> Result<Self, CoreError> {
        let entries = load(backend.get(DREAMS_KEY)?)?;
        tracing::debug!("Loaded {} dreams", entries.len());
        Ok(Self {
            backend,
            entries,
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            version: 0,
        })
    }

    /// Validate and record a new dream at the front of the collection.
    pub fn create(&mut self, draft: DreamDraft) -> Result<DreamEntry, CoreError> {
        draft.validate()?;
        let created_at = Utc::now();

        let entry = self.mutate(|entries| {
            let mut id = DreamId::new();
            while entries.iter().any(|e| e.id == id) {
                id = DreamId::new();
            }
            let entry = draft.into_entry(id, created_at);
            entries.insert(0, entry.clone());
            Ok((entry, true))
        })?;

        tracing::info!("Recorded dream {}", entry.id);
        Ok(entry)
    }

    /// Remove the dream with this exact id. Returns `None` without writing
    /// when no such dream exists.
    pub fn delete(&mut self, id: &str) -> Result<Option<DreamEntry>, CoreError> {
        let removed = self.mutate(|entries| {
            let pos = entries.iter().position(|e| e.id.as_str() == id);
            let removed = pos.map(|pos| entries.remove(pos));
            let changed = removed.is_some();
            Ok((removed, changed))
        })?;

        match &removed {
            Some(entry) => tracing::info!("Deleted dream {}", entry.id),
            None => tracing::debug!("Delete of unknown dream {id} ignored"),
        }
        Ok(removed)
    }

    /// Merge `patch` into the dream with this exact id and return the updated
    /// entry. Returns `None` when no such dream exists.
    pub fn update(
        &mut self,
        id: &str,
        patch: &DreamPatch,
    ) -> Result<Option<DreamEntry>, CoreError> {
        if patch.is_empty() {
            return Ok(self.get(id).cloned());
        }

        let updated = self.mutate(|entries| {
            let updated = entries
                .iter_mut()
                .find(|e| e.id.as_str() == id)
                .map(|entry| {
                    patch.apply(entry);
                    entry.clone()
                });
            let changed = updated.is_some();
            Ok((updated, changed))
        })?;

        match &updated {
            Some(entry) => tracing::info!("Updated dream {}", entry.id),
            None => tracing::debug!("Update of unknown dream {id} ignored"),
        }
        Ok(updated)
    }

    /// All dreams, newest first.
    pub fn list(&self) -> &[DreamEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&DreamEntry> {
        self.entries.iter().find(|e| e.id.as_str() == id)
    }

    /// Resolve a full id or unique id prefix.
    pub fn resolve(&self, id_or_prefix: &str) -> Result<&DreamEntry, CoreError> {
        if let Some(entry) = self.get(id_or_prefix) {
            return Ok(entry);
        }

        let matches: Vec<&DreamEntry> = self
            .entries
            .iter()
            .filter(|e| !id_or_prefix.is_empty() && e.id.as_str().starts_with(id_or_prefix))
            .collect();

        match matches.as_slice() {
            [] => Err(CoreError::NotFound {
                id: id_or_prefix.to_string(),
            }),
            [entry] => Ok(*entry),
            _ => Err(CoreError::AmbiguousId {
                prefix: id_or_prefix.to_string(),
                matches: matches.len(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mutation counter; bumps whenever this handle's view of the collection
    /// changes. Starts at 0 for every opened store.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Process-unique id of this handle, so a version number can be tied to
    /// the store it came from.
    pub fn instance_id(&self) -> u64 {
        self.instance
    }

    /// Rewrite the stored snapshot. Entries written by other handles since
    /// the last mutation are kept and picked up.
    pub fn flush(&mut self) -> Result<(), CoreError> {
        self.mutate(|_| Ok(((), true)))
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Apply `op` to the freshly stored collection. `op` reports whether it
    /// changed anything; only then is the collection written back.
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut Vec<DreamEntry>) -> Result<(T, bool), CoreError>,
    ) -> Result<T, CoreError> {
        let (value, latest) = self.backend.update(DREAMS_KEY, |raw| {
            let mut entries = load(raw)?;
            let (value, changed) = op(&mut entries)?;
            let write = if changed {
                Some(snapshot::encode(&entries)?)
            } else {
                None
            };
            Ok(((value, entries), write))
        })?;

        if latest != self.entries {
            self.entries = latest;
            self.version += 1;
        }
        Ok(value)
    }
}

fn load(raw: Option<String>) -> Result<Vec<DreamEntry>, CoreError> {
    match raw {
        Some(raw) => snapshot::decode(&raw),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mood;
    use crate::storage::{FileStore, MemoryStore};
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use tempfile::TempDir;

    /// Backend whose writes always fail, to check rollback behavior.
    struct FullDisk {
        inner: MemoryStore,
    }

    impl KeyValueStore for FullDisk {
        fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), CoreError> {
            Err(CoreError::Io(std::io::Error::other("quota exceeded")))
        }

        fn remove(&mut self, key: &str) -> Result<(), CoreError> {
            self.inner.remove(key)
        }
    }

    fn new_store() -> DreamStore<MemoryStore> {
        DreamStore::open(MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_create_prepends_and_persists() {
        let mut store = new_store();
        let first = store.create(DreamDraft::new("First dream")).unwrap();
        let second = store
            .create(DreamDraft::new("Second dream").mood(Mood::Sad))
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].id, second.id);
        assert_eq!(store.list()[1].id, first.id);
        assert!(second.created_at >= first.created_at);
        assert_eq!(store.version(), 2);

        let raw = store.backend().get(DREAMS_KEY).unwrap().unwrap();
        assert_eq!(snapshot::decode(&raw).unwrap(), store.list());
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let mut store = new_store();
        for i in 0..20 {
            store.create(DreamDraft::new(format!("dream {i}"))).unwrap();
        }
        let ids: HashSet<_> = store.list().iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_create_rejects_blank_content() {
        let mut store = new_store();
        store.create(DreamDraft::new("kept")).unwrap();
        let before = store.backend().get(DREAMS_KEY).unwrap();

        for content in ["", "   ", "\n\t"] {
            let err = store.create(DreamDraft::new(content)).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }

        assert_eq!(store.len(), 1);
        assert_eq!(store.version(), 1);
        assert_eq!(store.backend().get(DREAMS_KEY).unwrap(), before);
    }

    #[test]
    fn test_delete() {
        let mut store = new_store();
        let a = store.create(DreamDraft::new("a")).unwrap();
        let b = store.create(DreamDraft::new("b")).unwrap();

        let removed = store.delete(a.id.as_str()).unwrap();
        assert_eq!(removed.map(|e| e.id), Some(a.id.clone()));
        assert!(store.list().iter().all(|e| e.id != a.id));
        assert_eq!(store.list()[0].id, b.id);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut store = new_store();
        store.create(DreamDraft::new("a")).unwrap();
        let before = store.backend().get(DREAMS_KEY).unwrap();
        let version = store.version();

        assert!(store.delete("does-not-exist").unwrap().is_none());
        assert_eq!(store.backend().get(DREAMS_KEY).unwrap(), before);
        assert_eq!(store.version(), version);
    }

    #[test]
    fn test_update_changes_only_patched_field() {
        let mut store = new_store();
        let other = store
            .create(DreamDraft::new("other").tags(["x"]).mood(Mood::Sad))
            .unwrap();
        let target = store
            .create(
                DreamDraft::new("target")
                    .title("t")
                    .lucid(true)
                    .mood(Mood::Scared)
                    .tags(["a", "b"])
                    .date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
            )
            .unwrap();

        let patch = DreamPatch {
            mood: Some(Mood::Happy),
            ..Default::default()
        };
        let updated = store.update(target.id.as_str(), &patch).unwrap().unwrap();

        let expected = DreamEntry {
            mood: Mood::Happy,
            ..target.clone()
        };
        assert_eq!(updated, expected);
        assert_eq!(store.get(target.id.as_str()), Some(&expected));
        assert_eq!(store.get(other.id.as_str()), Some(&other));
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut store = new_store();
        store.create(DreamDraft::new("a")).unwrap();
        let patch = DreamPatch {
            content: Some("changed".into()),
            ..Default::default()
        };
        assert!(store.update("missing", &patch).unwrap().is_none());
        assert_eq!(store.list()[0].content, "a");
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_failed_write_leaves_collection_unchanged() {
        let mut seeded = MemoryStore::new();
        let entry = DreamDraft::new("seed").into_entry(DreamId::from("seed-1"), Utc::now());
        seeded
            .set(DREAMS_KEY, &snapshot::encode(&[entry]).unwrap())
            .unwrap();

        let mut store = DreamStore::open(FullDisk { inner: seeded }).unwrap();
        assert!(matches!(
            store.create(DreamDraft::new("new")),
            Err(CoreError::Io(_))
        ));
        assert!(store.delete("seed-1").is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].id.as_str(), "seed-1");
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_resolve_prefix() {
        let mut backend = MemoryStore::new();
        let entries: Vec<DreamEntry> = ["abc123", "abd456", "xyz789"]
            .into_iter()
            .map(|id| DreamDraft::new("c").into_entry(DreamId::from(id), Utc::now()))
            .collect();
        backend
            .set(DREAMS_KEY, &snapshot::encode(&entries).unwrap())
            .unwrap();
        let store = DreamStore::open(backend).unwrap();
        assert_eq!(store.len(), 3);

        assert_eq!(store.resolve("abc123").unwrap().id.as_str(), "abc123");
        assert_eq!(store.resolve("x").unwrap().id.as_str(), "xyz789");
        assert!(matches!(
            store.resolve("ab"),
            Err(CoreError::AmbiguousId { matches: 2, .. })
        ));
        assert!(matches!(store.resolve("q"), Err(CoreError::NotFound { .. })));
        assert!(matches!(store.resolve(""), Err(CoreError::NotFound { .. })));
    }

    #[test]
    fn test_file_backed_reopen() {
        let tmp = TempDir::new().unwrap();
        let created = {
            let mut store = DreamStore::open(FileStore::open(tmp.path()).unwrap()).unwrap();
            store.create(DreamDraft::new("one").tags(["a"])).unwrap();
            let created = store.create(DreamDraft::new("two").lucid(true)).unwrap();
            store.flush().unwrap();
            created
        };

        let reopened = DreamStore::open(FileStore::open(tmp.path()).unwrap()).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.list()[0], created);
        assert_eq!(reopened.list()[1].tags, vec!["a"]);
    }

    #[test]
    fn test_two_handles_keep_both_writes() {
        let tmp = TempDir::new().unwrap();
        let mut a = DreamStore::open(FileStore::open(tmp.path()).unwrap()).unwrap();
        let mut b = DreamStore::open(FileStore::open(tmp.path()).unwrap()).unwrap();
        assert_ne!(a.instance_id(), b.instance_id());

        let from_a = a.create(DreamDraft::new("from handle A")).unwrap();
        let from_b = b.create(DreamDraft::new("from handle B")).unwrap();
        // B's write was applied on top of A's
        assert_eq!(b.len(), 2);
        assert_eq!(b.list()[1], from_a);

        // A deleting its own entry keeps B's
        a.delete(from_a.id.as_str()).unwrap();
        assert_eq!(a.list(), std::slice::from_ref(&from_b));

        let reopened = DreamStore::open(FileStore::open(tmp.path()).unwrap()).unwrap();
        assert_eq!(reopened.list(), std::slice::from_ref(&from_b));
    }

    #[test]
    fn test_concurrent_creates_are_all_kept() {
        let tmp = TempDir::new().unwrap();
        let workers: Vec<_> = (0..4)
            .map(|w| {
                let root = tmp.path().to_path_buf();
                std::thread::spawn(move || {
                    let mut store = DreamStore::open(FileStore::open(root).unwrap()).unwrap();
                    for i in 0..5 {
                        store
                            .create(DreamDraft::new(format!("worker {w} dream {i}")))
                            .unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let store = DreamStore::open(FileStore::open(tmp.path()).unwrap()).unwrap();
        assert_eq!(store.len(), 20);
    }

    #[test]
    fn test_open_rejects_corrupt_snapshot() {
        let mut backend = MemoryStore::new();
        backend.set(DREAMS_KEY, "not json").unwrap();
        assert!(matches!(
            DreamStore::open(backend),
            Err(CoreError::Serde(_))
        ));
    }
}
