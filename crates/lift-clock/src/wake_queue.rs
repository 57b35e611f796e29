//! `WakeQueue`: the ordered set of pending process wake-ups.
//!
//! Every suspended process that is waiting for time to pass (or that has
//! just been handed a channel item) owns exactly one entry.  Entries are
//! keyed by `(deadline, seq)` where `seq` is a clock-wide registration
//! counter, so a `BTreeMap` walk yields wake-ups in deadline order and, at
//! equal deadlines, in the order they were registered.
//!
//! `BTreeMap` gives O(log W) insert and O(log W) pop where W = number of
//! pending wake-ups, which is bounded by the number of processes.

use std::collections::BTreeMap;

use lift_core::{ProcessId, Tick};

/// Ordering key for one wake-up.
///
/// Derived `Ord` compares `at` first, then `seq`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct WakeKey {
    /// Simulated instant at which the process resumes.
    pub at: Tick,
    /// Registration order, for FIFO tie-breaks.
    pub seq: u64,
}

/// A priority queue mapping `(deadline, seq)` → process.
#[derive(Default, Debug)]
pub struct WakeQueue {
    inner:    BTreeMap<WakeKey, ProcessId>,
    next_seq: u64,
}

impl WakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `process` to wake at `at`, after everything already
    /// registered for the same instant.
    pub fn push(&mut self, at: Tick, process: ProcessId) -> WakeKey {
        let key = WakeKey { at, seq: self.next_seq };
        self.next_seq += 1;
        self.inner.insert(key, process);
        key
    }

    /// Remove and return the earliest wake-up if its deadline is strictly
    /// before `until`.
    pub fn pop_before(&mut self, until: Tick) -> Option<(WakeKey, ProcessId)> {
        let (&key, _) = self.inner.first_key_value()?;
        if key.at >= until {
            return None;
        }
        self.inner.pop_first()
    }

    /// The earliest deadline with at least one wake-up, or `None` if empty.
    pub fn next_deadline(&self) -> Option<Tick> {
        self.inner.keys().next().map(|k| k.at)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
