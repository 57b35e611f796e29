//! FIFO channels between processes.
//!
//! A channel never wakes anyone by itself: it only reports who should be
//! woken, and [`SimClock`][crate::SimClock] turns that into wake-ups.

use std::collections::VecDeque;

use lift_core::ProcessId;

/// A FIFO buffer plus the processes blocked on it.
///
/// Invariant: `receivers` is non-empty only while `items` is empty, and
/// `senders` is non-empty only while `items` is full.
#[derive(Debug)]
pub struct Channel<M> {
    capacity:  Option<usize>,
    items:     VecDeque<M>,
    receivers: VecDeque<ProcessId>,
    senders:   VecDeque<(ProcessId, M)>,
}

/// What happened to an offered item.
pub(crate) enum Offer<M> {
    /// Handed straight to a blocked receiver, which must now be woken.
    Delivered(ProcessId, M),
    /// Buffered.
    Queued,
    /// No room; the item is returned.
    Full(M),
}

impl<M> Channel<M> {
    /// `None` means unbounded.  A bound of 0 is treated as 1.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity:  capacity.map(|c| c.max(1)),
            items:     VecDeque::new(),
            receivers: VecDeque::new(),
            senders:   VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|c| self.items.len() >= c)
    }

    /// Processes currently blocked receiving.
    pub fn waiting_receivers(&self) -> usize {
        self.receivers.len()
    }

    /// Processes currently blocked sending.
    pub fn waiting_senders(&self) -> usize {
        self.senders.len()
    }

    // ── Operations used by the clock ──────────────────────────────────────

    pub(crate) fn offer(&mut self, item: M) -> Offer<M> {
        if let Some(receiver) = self.receivers.pop_front() {
            return Offer::Delivered(receiver, item);
        }
        if self.is_full() {
            return Offer::Full(item);
        }
        self.items.push_back(item);
        Offer::Queued
    }

    /// Take the head item.  If that freed room for a blocked sender, its item
    /// is buffered and the sender is returned so it can be woken.
    pub(crate) fn take(&mut self) -> Option<(M, Option<ProcessId>)> {
        let item = self.items.pop_front()?;
        let unblocked = match self.senders.pop_front() {
            Some((sender, pending)) => {
                self.items.push_back(pending);
                Some(sender)
            }
            None => None,
        };
        Some((item, unblocked))
    }

    pub(crate) fn wait_receive(&mut self, process: ProcessId) {
        self.receivers.push_back(process);
    }

    pub(crate) fn wait_send(&mut self, process: ProcessId, item: M) {
        self.senders.push_back((process, item));
    }
}
