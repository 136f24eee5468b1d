//! Revision-stamped cache for fetch results.
//!
//! A view may start a new fetch before the previous one has finished, and
//! the two can complete in either order. [`Revisioned`] hands out a ticket at
//! the start of every fetch and only accepts a result whose ticket is still
//! the newest one issued, so a slow, older response can never overwrite a
//! newer one.
//!
//! ```rust
//! use maintrack_core::cache::Revisioned;
//!
//! let cache = Revisioned::new(Vec::<u32>::new());
//! let slow = cache.begin();
//! let fast = cache.begin();
//!
//! assert!(cache.commit(fast, vec![2]));
//! assert!(!cache.commit(slow, vec![1]));
//! assert_eq!(cache.snapshot(), vec![2]);
//! ```

use std::sync::{Mutex, PoisonError};

/// Ticket issued by [`Revisioned::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Revision(u64);

#[derive(Debug)]
struct Slot<T> {
    issued: u64,
    committed: u64,
    value: T,
}

/// A value that is replaced only by the result of the latest fetch.
#[derive(Debug)]
pub struct Revisioned<T> {
    slot: Mutex<Slot<T>>,
}

impl<T: Clone> Revisioned<T> {
    pub fn new(initial: T) -> Self {
        Self {
            slot: Mutex::new(Slot {
                issued: 0,
                committed: 0,
                value: initial,
            }),
        }
    }

    /// Start a fetch and get its ticket. Any earlier ticket becomes stale.
    pub fn begin(&self) -> Revision {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.issued += 1;
        Revision(slot.issued)
    }

    /// Store `value` if `ticket` is still the newest one issued.
    ///
    /// Returns false, leaving the cache untouched, for a stale ticket.
    pub fn commit(&self, ticket: Revision, value: T) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if ticket.0 != slot.issued {
            log::debug!(
                "Discarding stale result for revision {} (latest is {})",
                ticket.0,
                slot.issued
            );
            return false;
        }
        slot.value = value;
        slot.committed = ticket.0;
        true
    }

    /// A copy of the current value.
    pub fn snapshot(&self) -> T {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .value
            .clone()
    }

    /// Revision of the last committed value, zero before the first commit.
    pub fn committed(&self) -> u64 {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .committed
    }
}

impl<T: Clone + Default> Default for Revisioned<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
