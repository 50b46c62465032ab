use crate::Result;
use crate::snapshot::{ErrorSnapshot, SnapshotBuilder};
use chrono::{DateTime, Utc};
use errview_types::SessionId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// NOTE: Cache Design
//
// One slot per key, each behind its own mutex:
// - build, staleness teardown, rebuild and every read of a key happen under
//   that key's lock, so no reader can see a store that is being replaced
// - different keys never wait on each other; the key map lock is only held
//   long enough to find or create a slot
//
// Staleness is pulled, not pushed: only a Refreshing access compares the
// entry age against the threshold. There is no background timer.

/// Which snapshot a caller is asking for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Shared snapshot for callers without a session.
    Process,
    Session(SessionId),
}

impl CacheKey {
    pub fn session(id: impl Into<String>) -> Self {
        CacheKey::Session(SessionId::new(id))
    }

    pub fn from_session(session: Option<SessionId>) -> Self {
        session.map_or(CacheKey::Process, CacheKey::Session)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Process => write!(f, "process"),
            CacheKey::Session(id) => write!(f, "session:{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// May tear down and rebuild a stale entry.
    Refreshing,
    /// Serves whatever entry exists, regardless of age.
    Direct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Absent,
    Fresh,
    Stale,
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CacheEntry {
    snapshot: ErrorSnapshot,
    created_at: DateTime<Utc>,
}

type Slot = Arc<Mutex<Option<CacheEntry>>>;

pub struct CacheManager {
    builder: Arc<dyn SnapshotBuilder>,
    staleness: chrono::Duration,
    clock: Arc<dyn Clock>,
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl CacheManager {
    pub fn new(builder: Arc<dyn SnapshotBuilder>, staleness: chrono::Duration) -> Self {
        Self {
            builder,
            staleness,
            clock: Arc::new(SystemClock),
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn staleness(&self) -> chrono::Duration {
        self.staleness
    }

    /// Run `read` against the snapshot of `key`, building it first if absent.
    ///
    /// A `Refreshing` access also replaces an entry older than the staleness
    /// threshold. When a build fails the key is left absent and the error is
    /// returned; the next access tries again.
    pub fn with_snapshot<T, F>(&self, key: &CacheKey, access: Access, read: F) -> Result<T>
    where
        F: FnOnce(&ErrorSnapshot) -> T,
    {
        let slot = self.slot(key);
        let mut entry = slot.lock();

        if access == Access::Refreshing
            && let Some(current) = entry.as_ref()
            && self.is_stale(current)
        {
            tracing::info!(%key, created_at = %current.created_at, "snapshot stale, tearing down");
            *entry = None;
        }

        if let Some(current) = entry.as_ref() {
            return Ok(read(&current.snapshot));
        }

        let built = self.build(key)?;
        let value = read(&built.snapshot);
        *entry = Some(built);
        Ok(value)
    }

    /// Drop the entry of `key`; the next access rebuilds it. A session key
    /// loses its slot as well.
    pub fn reset(&self, key: &CacheKey) {
        if let CacheKey::Session(_) = key {
            self.expire(key);
            return;
        }
        let slot = self.slot(key);
        let mut entry = slot.lock();
        if entry.take().is_some() {
            tracing::info!(%key, "snapshot reset");
        }
    }

    /// Remove `key` and its slot from the cache, destroying its store once
    /// no reader holds it. Called when a session ends.
    pub fn expire(&self, key: &CacheKey) {
        let Some(slot) = self.slots.lock().remove(key) else {
            return;
        };
        if slot.lock().take().is_some() {
            tracing::info!(%key, "snapshot expired");
        }
    }

    /// Drop every entry, and every session slot.
    pub fn reset_all(&self) {
        let slots: Vec<(CacheKey, Slot)> = self
            .slots
            .lock()
            .iter()
            .map(|(key, slot)| (key.clone(), Arc::clone(slot)))
            .collect();
        for (key, slot) in slots {
            if let CacheKey::Session(_) = key {
                self.expire(&key);
            } else if slot.lock().take().is_some() {
                tracing::info!(%key, "snapshot reset");
            }
        }
    }

    /// Number of keys holding a slot.
    pub fn key_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Tear down and rebuild `key` now. On failure the key stays absent.
    pub fn refresh(&self, key: &CacheKey) -> Result<()> {
        let slot = self.slot(key);
        let mut entry = slot.lock();
        *entry = None;
        *entry = Some(self.build(key)?);
        Ok(())
    }

    pub fn state(&self, key: &CacheKey) -> CacheState {
        let Some(slot) = self.slots.lock().get(key).cloned() else {
            return CacheState::Absent;
        };
        let entry = slot.lock();
        match entry.as_ref() {
            None => CacheState::Absent,
            Some(current) if self.is_stale(current) => CacheState::Stale,
            Some(_) => CacheState::Fresh,
        }
    }

    pub fn created_at(&self, key: &CacheKey) -> Option<DateTime<Utc>> {
        let slot = self.slots.lock().get(key).cloned()?;
        let entry = slot.lock();
        entry.as_ref().map(|current| current.created_at)
    }

    fn slot(&self, key: &CacheKey) -> Slot {
        Arc::clone(self.slots.lock().entry(key.clone()).or_default())
    }

    fn is_stale(&self, entry: &CacheEntry) -> bool {
        self.clock.now() - entry.created_at >= self.staleness
    }

    fn build(&self, key: &CacheKey) -> Result<CacheEntry> {
        let created_at = self.clock.now();
        match self.builder.build(key) {
            Ok(snapshot) => {
                tracing::info!(
                    %key,
                    records = snapshot.store.record_count().unwrap_or(0),
                    "snapshot built"
                );
                Ok(CacheEntry {
                    snapshot,
                    created_at,
                })
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "snapshot build failed");
                Err(err)
            }
        }
    }
}

impl fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheManager")
            .field("staleness", &self.staleness)
            .field("keys", &self.key_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use errview_index::ErrorStore;
    use errview_types::ErrorRecord;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct FakeBuilder {
        builds: AtomicUsize,
        reachable: AtomicBool,
    }

    impl FakeBuilder {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                builds: AtomicUsize::new(0),
                reachable: AtomicBool::new(true),
            })
        }
    }

    impl SnapshotBuilder for FakeBuilder {
        fn build(&self, _key: &CacheKey) -> Result<ErrorSnapshot> {
            if !self.reachable.load(Ordering::SeqCst) {
                return Err(errview_sources::Error::unavailable("all_errors.json", "unreachable").into());
            }
            let build = self.builds.fetch_add(1, Ordering::SeqCst) as u64 + 1;
            let mut store = ErrorStore::open_in_memory()?;
            store.insert_all(&[ErrorRecord::new("/A/Step1", "T2_US_X", "8020", build)])?;
            store.rebuild_indexes()?;
            Ok(ErrorSnapshot::new(store))
        }
    }

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn advance(&self, minutes: i64) {
            *self.0.lock() += chrono::Duration::minutes(minutes);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock()
        }
    }

    fn manager() -> (CacheManager, Arc<FakeBuilder>, Arc<ManualClock>) {
        let builder = FakeBuilder::new();
        let clock = Arc::new(ManualClock(Mutex::new(Utc::now())));
        let manager = CacheManager::new(builder.clone(), chrono::Duration::minutes(30))
            .with_clock(clock.clone());
        (manager, builder, clock)
    }

    fn count(manager: &CacheManager, key: &CacheKey, access: Access) -> Result<u64> {
        manager
            .with_snapshot(key, access, |s| s.store.count("/A/Step1", "T2_US_X", "8020"))?
            .map_err(Error::from)
    }

    #[test]
    fn test_first_access_builds_once() {
        let (manager, builder, _) = manager();
        let key = CacheKey::Process;

        assert_eq!(manager.state(&key), CacheState::Absent);
        assert_eq!(count(&manager, &key, Access::Refreshing).unwrap(), 1);
        assert_eq!(count(&manager, &key, Access::Direct).unwrap(), 1);
        assert_eq!(builder.builds.load(Ordering::SeqCst), 1);
        assert_eq!(manager.state(&key), CacheState::Fresh);
    }

    #[test]
    fn test_stale_entry_rebuilt_only_by_refreshing_access() {
        let (manager, builder, clock) = manager();
        let key = CacheKey::Process;
        count(&manager, &key, Access::Refreshing).unwrap();

        clock.advance(29);
        assert_eq!(manager.state(&key), CacheState::Fresh);

        clock.advance(1);
        assert_eq!(manager.state(&key), CacheState::Stale);
        assert_eq!(count(&manager, &key, Access::Direct).unwrap(), 1);
        assert_eq!(builder.builds.load(Ordering::SeqCst), 1);

        assert_eq!(count(&manager, &key, Access::Refreshing).unwrap(), 2);
        assert_eq!(manager.state(&key), CacheState::Fresh);
    }

    #[test]
    fn test_unreachable_source_on_refresh_leaves_key_absent() {
        let (manager, builder, clock) = manager();
        let key = CacheKey::Process;
        count(&manager, &key, Access::Refreshing).unwrap();

        clock.advance(45);
        builder.reachable.store(false, Ordering::SeqCst);

        let err = count(&manager, &key, Access::Refreshing).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(manager.state(&key), CacheState::Absent);

        // A direct access must not fall back to the torn-down snapshot.
        assert!(count(&manager, &key, Access::Direct).is_err());

        builder.reachable.store(true, Ordering::SeqCst);
        assert_eq!(count(&manager, &key, Access::Direct).unwrap(), 2);
    }

    #[test]
    fn test_sessions_are_independent() {
        let (manager, builder, _) = manager();
        let alice = CacheKey::session("alice");
        let bob = CacheKey::session("bob");

        assert_eq!(count(&manager, &alice, Access::Refreshing).unwrap(), 1);
        assert_eq!(count(&manager, &bob, Access::Refreshing).unwrap(), 2);

        manager.reset(&alice);
        assert_eq!(manager.state(&alice), CacheState::Absent);
        assert_eq!(manager.state(&bob), CacheState::Fresh);
        assert_eq!(builder.builds.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_expired_sessions_leave_the_map() {
        let (manager, builder, _) = manager();
        let alice = CacheKey::session("alice");
        let bob = CacheKey::session("bob");
        count(&manager, &CacheKey::Process, Access::Direct).unwrap();
        count(&manager, &alice, Access::Direct).unwrap();
        count(&manager, &bob, Access::Direct).unwrap();
        assert_eq!(manager.key_count(), 3);

        manager.expire(&alice);
        assert_eq!(manager.key_count(), 2);
        assert_eq!(manager.state(&alice), CacheState::Absent);

        manager.reset(&bob);
        assert_eq!(manager.key_count(), 1);

        manager.reset(&CacheKey::Process);
        assert_eq!(manager.key_count(), 1);
        assert_eq!(manager.state(&CacheKey::Process), CacheState::Absent);

        // An expired session rebuilds on its next access.
        assert_eq!(count(&manager, &alice, Access::Direct).unwrap(), 4);
        assert_eq!(builder.builds.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_refresh_rebuilds_immediately() {
        let (manager, _, _) = manager();
        let key = CacheKey::session("s");
        count(&manager, &key, Access::Refreshing).unwrap();

        manager.refresh(&key).unwrap();
        assert_eq!(count(&manager, &key, Access::Direct).unwrap(), 2);
    }

    #[test]
    fn test_failed_refresh_leaves_key_absent() {
        let (manager, builder, _) = manager();
        let key = CacheKey::Process;
        count(&manager, &key, Access::Refreshing).unwrap();

        builder.reachable.store(false, Ordering::SeqCst);
        assert!(manager.refresh(&key).is_err());
        assert_eq!(manager.state(&key), CacheState::Absent);
        assert!(manager.created_at(&key).is_none());
    }

    #[test]
    fn test_reset_all() {
        let (manager, _, _) = manager();
        count(&manager, &CacheKey::Process, Access::Direct).unwrap();
        count(&manager, &CacheKey::session("a"), Access::Direct).unwrap();

        manager.reset_all();
        assert_eq!(manager.state(&CacheKey::Process), CacheState::Absent);
        assert_eq!(manager.state(&CacheKey::session("a")), CacheState::Absent);
        assert_eq!(manager.key_count(), 1);
    }

    #[test]
    fn test_concurrent_readers_share_one_build() {
        let (manager, builder, _) = manager();
        let manager = Arc::new(manager);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                std::thread::spawn(move || count(&manager, &CacheKey::Process, Access::Refreshing).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert_eq!(builder.builds.load(Ordering::SeqCst), 1);
    }
}
