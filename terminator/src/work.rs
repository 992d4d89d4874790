//! Completion barrier for counting in-flight work.
//!
//! [`WorkGroup`] tracks a non-negative count of in-flight work units and lets
//! any number of waiters block until the count drains to zero. Producers call
//! [`add`](WorkGroup::add) before starting a unit of work and
//! [`done`](WorkGroup::done) when it finishes, or hold a [`WorkGuard`] that
//! does both. The group is reusable: if work is registered again after a
//! drain, later waits block again.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

/// Counts in-flight work units and wakes waiters when the count reaches zero.
///
/// Cloning is cheap; all clones share the same counter and may be used from
/// any number of tasks without external locking.
#[derive(Clone, Debug, Default)]
pub struct WorkGroup {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    count: AtomicUsize,
    drained: Notify,
}

impl WorkGroup {
    /// Creates an empty work group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `n` new units of in-flight work.
    pub fn add(&self, n: usize) {
        self.inner.count.fetch_add(n, Ordering::SeqCst);
    }

    /// Marks one unit of work as finished.
    ///
    /// # Panics
    ///
    /// Panics if called more times than [`add`](Self::add) registered. Every
    /// registration must be matched by exactly one completion; going below
    /// zero is a programming error, not a runtime condition.
    #[allow(clippy::panic)]
    pub fn done(&self) {
        let prev = self
            .inner
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                count.checked_sub(1)
            });
        match prev {
            Ok(1) => self.inner.drained.notify_waiters(),
            Ok(_) => {}
            Err(_) => panic!("WorkGroup::done called with no registered work"),
        }
    }

    /// Registers one unit of work, deregistered when the returned guard drops.
    #[must_use]
    pub fn track(&self) -> WorkGuard {
        self.add(1);
        WorkGuard {
            group: self.clone(),
        }
    }

    /// Current number of in-flight work units.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inner.count.load(Ordering::SeqCst)
    }

    /// Waits until the in-flight count reaches zero.
    ///
    /// Returns immediately if no work is registered. Any number of waiters
    /// may wait concurrently; all unblock together when the count drains.
    pub async fn wait(&self) {
        loop {
            // Register interest before reading the count so a concurrent
            // final `done` cannot slip between the check and the await.
            let drained = self.inner.drained.notified();
            if self.inner.count.load(Ordering::SeqCst) == 0 {
                return;
            }
            drained.await;
        }
    }
}

/// Deregisters one unit of work when dropped.
///
/// Obtained from [`WorkGroup::track`]; ties the completion to scope exit so
/// a unit cannot be left registered across an early return or panic.
#[derive(Debug)]
pub struct WorkGuard {
    group: WorkGroup,
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        self.group.done();
    }
}
