use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc, Condvar, Mutex, MutexGuard, PoisonError,
    },
    time::{Duration, Instant},
};

use log::{debug, error, warn};

use glrelay_shared::{CorrelationId, Value};

struct Pending {
    value: Mutex<Option<Value>>,
    ready: Condvar,
}

impl Pending {
    fn new() -> Self {
        Self {
            value: Mutex::new(None),
            ready: Condvar::new(),
        }
    }
}

/// Outstanding blocking calls, keyed by correlation id.
///
/// Every issued id leaves the ledger exactly once: when its waiter takes the
/// resolved value, or when the waiter gives up because the connection is gone.
pub struct Ledger {
    next_id: AtomicU32,
    pending: Mutex<HashMap<CorrelationId, Arc<Pending>>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU32::new(1),
            pending: Mutex::new(HashMap::new()),
        }
    }

    fn lock_pending(&self) -> MutexGuard<'_, HashMap<CorrelationId, Arc<Pending>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn entry(&self, id: CorrelationId) -> Option<Arc<Pending>> {
        self.lock_pending().get(&id).cloned()
    }

    /// Allocate an id and register it as awaiting a response. Must happen
    /// before the call is handed to the bridge, since the response may
    /// arrive before the caller starts waiting.
    pub fn issue(&self) -> CorrelationId {
        // wraps after u32::MAX calls; a collision with a still pending id is
        // reported, not avoided
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        if self
            .lock_pending()
            .insert(id, Arc::new(Pending::new()))
            .is_some()
        {
            error!("Correlation id {} reissued while still pending", id);
        }
        id
    }

    /// Total number of ids handed out so far
    pub fn issued(&self) -> u32 {
        self.next_id.load(Ordering::SeqCst).wrapping_sub(1)
    }

    /// Store the response for `id` and wake its waiter. Returns false when no
    /// call with that id is outstanding.
    pub fn resolve(&self, id: CorrelationId, value: Value) -> bool {
        let Some(entry) = self.entry(id) else {
            return false;
        };
        *entry.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
        entry.ready.notify_all();
        true
    }

    /// Block until `id` is resolved, re-checking `is_alive` every `poll`.
    /// Returns `None` once `is_alive` reports the connection gone.
    pub fn wait(
        &self,
        id: CorrelationId,
        poll: Duration,
        is_alive: impl Fn() -> bool,
    ) -> Option<Value> {
        self.wait_inner(id, None, poll, is_alive)
    }

    /// Like `wait`, but also gives up at `deadline`
    pub fn wait_until(
        &self,
        id: CorrelationId,
        deadline: Instant,
        poll: Duration,
        is_alive: impl Fn() -> bool,
    ) -> Option<Value> {
        self.wait_inner(id, Some(deadline), poll, is_alive)
    }

    fn wait_inner(
        &self,
        id: CorrelationId,
        deadline: Option<Instant>,
        poll: Duration,
        is_alive: impl Fn() -> bool,
    ) -> Option<Value> {
        let Some(entry) = self.entry(id) else {
            warn!("Unexpected id ({})", id);
            return None;
        };

        loop {
            let timeout = match deadline {
                Some(deadline) => poll.min(deadline.saturating_duration_since(Instant::now())),
                None => poll,
            };

            {
                let guard = entry.value.lock().unwrap_or_else(PoisonError::into_inner);
                let (mut guard, _) = entry
                    .ready
                    .wait_timeout_while(guard, timeout, |value| value.is_none())
                    .unwrap_or_else(PoisonError::into_inner);
                if let Some(value) = guard.take() {
                    drop(guard);
                    self.lock_pending().remove(&id);
                    return Some(value);
                }
            }

            if !is_alive() {
                debug!("Abandoning call {}: connection lost", id);
                self.abandon(id);
                return None;
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                debug!("Abandoning call {}: deadline passed", id);
                self.abandon(id);
                return None;
            }
        }
    }

    /// Drop `id` without a response
    pub fn abandon(&self, id: CorrelationId) {
        self.lock_pending().remove(&id);
    }

    /// Wake every waiter so it re-checks its connection
    pub fn wake_all(&self) {
        for entry in self.lock_pending().values() {
            entry.ready.notify_all();
        }
    }

    /// Number of outstanding ids
    pub fn len(&self) -> usize {
        self.lock_pending().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_pending(&self, id: CorrelationId) -> bool {
        self.lock_pending().contains_key(&id)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
