//! `ExpiryQueue`: cancellable deferred actions keyed by due time.
//!
//! An alert schedules its own clear when it is raised.  The queue hands back
//! an [`ExpiryHandle`]; the session keeps it so that a superseding alert, or
//! session teardown, can cancel the pending clear before it fires.
//!
//! Cancelling is always safe: a handle that already fired (or was already
//! cancelled) is simply no longer pending, and `cancel` returns `false`.
//!
//! The queue does not own a timer.  Hosts arm their own timer for
//! [`next_deadline`][ExpiryQueue::next_deadline] and call
//! `drain_due(now)` when it goes off; replays do the same with sample
//! timestamps.

use std::collections::{BTreeMap, HashMap};

use wf_core::Timestamp;

/// Identifies one scheduled action.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ExpiryHandle(u64);

/// A priority queue mapping due times → actions scheduled for that time.
pub struct ExpiryQueue<T> {
    inner:   BTreeMap<Timestamp, Vec<(ExpiryHandle, T)>>,
    /// Due time of every pending handle, for O(log W) cancellation.
    pending: HashMap<ExpiryHandle, Timestamp>,
    next_id: u64,
}

impl<T> Default for ExpiryQueue<T> {
    fn default() -> Self {
        Self {
            inner:   BTreeMap::new(),
            pending: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<T> ExpiryQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire at `due`.
    pub fn schedule(&mut self, due: Timestamp, action: T) -> ExpiryHandle {
        let handle = ExpiryHandle(self.next_id);
        self.next_id += 1;
        self.inner.entry(due).or_default().push((handle, action));
        self.pending.insert(handle, due);
        handle
    }

    /// Cancel a pending action.  Returns `false` if it already fired or was
    /// already cancelled.
    pub fn cancel(&mut self, handle: ExpiryHandle) -> bool {
        let Some(due) = self.pending.remove(&handle) else {
            return false;
        };
        if let Some(slot) = self.inner.get_mut(&due) {
            slot.retain(|(h, _)| *h != handle);
            if slot.is_empty() {
                self.inner.remove(&due);
            }
        }
        true
    }

    #[inline]
    pub fn is_pending(&self, handle: ExpiryHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    /// Remove and return every action due at or before `now`, earliest first
    /// (ties in scheduling order).
    pub fn drain_due(&mut self, now: Timestamp) -> Vec<(ExpiryHandle, T)> {
        let later = match now.0.checked_add(1) {
            Some(next) => self.inner.split_off(&Timestamp(next)),
            None       => BTreeMap::new(),
        };
        let due = std::mem::replace(&mut self.inner, later);

        let fired: Vec<(ExpiryHandle, T)> = due.into_values().flatten().collect();
        for (handle, _) in &fired {
            self.pending.remove(handle);
        }
        fired
    }

    /// The earliest due time with at least one pending action.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.inner.keys().next().copied()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.pending.clear();
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
