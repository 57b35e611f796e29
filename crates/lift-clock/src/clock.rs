//! The `SimClock` struct and its run loop.

use lift_core::{ChannelId, ProcessId, Tick};
use tracing::trace;

use crate::channel::Offer;
use crate::{Channel, ClockError, ClockHandle, ClockResult, Process, Suspend, Wake, WakeQueue};

/// What a process is waiting for on a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interest<M> {
    /// Resume when an item can be taken.
    Recv,
    /// Resume when this item has been accepted.
    Send(M),
}

/// Counters gathered by [`SimClock::run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Number of `resume` calls made.
    pub resumptions: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    /// Has exactly one entry in the wake queue.
    Scheduled,
    /// No pending wake-up: running right now, or parked on a channel.
    Waiting,
    Finished,
}

#[derive(Debug)]
struct Slot<M> {
    state:   SlotState,
    pending: Option<Wake<M>>,
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Simulated-time cooperative scheduler.
///
/// Owns the current time, one wake-up per runnable process, and every
/// channel.  Processes themselves are owned by the caller and passed to
/// [`run`][Self::run] as a slice indexed by [`ProcessId`].
#[derive(Debug)]
pub struct SimClock<M> {
    now:      Tick,
    queue:    WakeQueue,
    slots:    Vec<Slot<M>>,
    channels: Vec<Channel<M>>,
}

impl<M> Default for SimClock<M> {
    fn default() -> Self {
        Self {
            now:      Tick::ZERO,
            queue:    WakeQueue::new(),
            slots:    Vec::new(),
            channels: Vec::new(),
        }
    }
}

impl<M> SimClock<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Number of registered processes (finished ones included).
    pub fn process_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of pending wake-ups.
    pub fn pending_wakeups(&self) -> usize {
        self.queue.len()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Tick> {
        self.queue.next_deadline()
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Register a new process that starts at the current instant.
    ///
    /// Ids are handed out sequentially from 0, so the `n`-th registered
    /// process must sit at index `n` of the slice given to `run`.
    pub fn spawn(&mut self) -> ProcessId {
        self.spawn_after(0)
    }

    /// Register a new process that starts `delay` ticks from now.
    pub fn spawn_after(&mut self, delay: u64) -> ProcessId {
        let id = ProcessId(self.slots.len() as u32);
        self.slots.push(Slot { state: SlotState::Scheduled, pending: Some(Wake::Start) });
        self.queue.push(self.now + delay, id);
        id
    }

    /// Create a channel.  `None` means unbounded.
    pub fn channel_with(&mut self, capacity: Option<usize>) -> ChannelId {
        let id = ChannelId(self.channels.len() as u32);
        self.channels.push(Channel::new(capacity));
        id
    }

    pub fn unbounded(&mut self) -> ChannelId {
        self.channel_with(None)
    }

    pub fn bounded(&mut self, capacity: usize) -> ChannelId {
        self.channel_with(Some(capacity))
    }

    pub fn channel(&self, id: ChannelId) -> ClockResult<&Channel<M>> {
        self.channels.get(id.index()).ok_or(ClockError::UnknownChannel(id))
    }

    // ── Suspension points ─────────────────────────────────────────────────

    /// Resume `process` with [`Wake::Elapsed`] once `delta` ticks have passed.
    pub fn after(&mut self, delta: u64, process: ProcessId) -> ClockResult<()> {
        self.schedule(process, self.now + delta, Wake::Elapsed)
    }

    /// Resume `process` when `channel` can satisfy `interest`: immediately
    /// (at the current instant, behind earlier registrations) if it already
    /// can, otherwise as soon as another process makes it possible.
    pub fn on_available(
        &mut self,
        channel:  ChannelId,
        process:  ProcessId,
        interest: Interest<M>,
    ) -> ClockResult<()> {
        self.ensure_waiting(process)?;
        match interest {
            Interest::Recv => {
                let taken = self.channel_mut(channel)?.take();
                match taken {
                    Some((item, unblocked)) => {
                        self.schedule(process, self.now, Wake::Received(item))?;
                        if let Some(sender) = unblocked {
                            self.schedule(sender, self.now, Wake::Sent)?;
                        }
                    }
                    None => {
                        self.channel_mut(channel)?.wait_receive(process);
                    }
                }
            }
            Interest::Send(item) => match self.offer(channel, item)? {
                None => self.schedule(process, self.now, Wake::Sent)?,
                Some(item) => {
                    self.channel_mut(channel)?.wait_send(process, item);
                }
            },
        }
        Ok(())
    }

    /// Non-blocking send on behalf of whichever process is running.
    /// Returns the item back (`Some`) if the channel is full.
    pub fn try_send(&mut self, channel: ChannelId, item: M) -> ClockResult<Option<M>> {
        self.offer(channel, item)
    }

    /// Apply the suspension point a process returned.
    pub fn suspend(&mut self, process: ProcessId, next: Suspend<M>) -> ClockResult<()> {
        match next {
            Suspend::Timeout(delta)     => self.after(delta, process),
            Suspend::Recv(channel)      => self.on_available(channel, process, Interest::Recv),
            Suspend::Send(channel, msg) => self.on_available(channel, process, Interest::Send(msg)),
            Suspend::Finish => {
                self.slot_mut(process)?.state = SlotState::Finished;
                Ok(())
            }
        }
    }

    // ── Run loop ──────────────────────────────────────────────────────────

    /// Resume processes in `(deadline, registration)` order until no wake-up
    /// remains strictly before `until`, then set the clock to `until`.
    ///
    /// `processes[i]` must be the process registered as `ProcessId(i)`.  The
    /// first error returned by a process aborts the run and is propagated;
    /// the clock is left at the instant of the failing step.
    pub fn run<W, P>(
        &mut self,
        until:     Tick,
        world:     &mut W,
        processes: &mut [P],
    ) -> Result<RunStats, P::Error>
    where
        P: Process<W, M>,
    {
        let mut stats = RunStats::default();
        while let Some((process, wake)) = self.pop_due(until)? {
            trace!(pid = process.0, tick = %self.now, "resume");
            let target = processes
                .get_mut(process.index())
                .ok_or(ClockError::UnknownProcess(process))?;
            let next = target.resume(wake, world, &mut ClockHandle::new(self))?;
            stats.resumptions += 1;
            self.suspend(process, next)?;
        }
        if self.now < until {
            self.now = until;
        }
        Ok(stats)
    }

    /// Pop the earliest wake-up before `until` and advance time to it.
    pub fn pop_due(&mut self, until: Tick) -> ClockResult<Option<(ProcessId, Wake<M>)>> {
        let Some((key, process)) = self.queue.pop_before(until) else {
            return Ok(None);
        };
        self.now = key.at;
        let slot = self.slot_mut(process)?;
        let wake = slot.pending.take().ok_or(ClockError::MissingWake(process))?;
        slot.state = SlotState::Waiting;
        Ok(Some((process, wake)))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Offer `item` to `channel`, waking a blocked receiver if there is one.
    fn offer(&mut self, channel: ChannelId, item: M) -> ClockResult<Option<M>> {
        match self.channel_mut(channel)?.offer(item) {
            Offer::Delivered(receiver, item) => {
                self.schedule(receiver, self.now, Wake::Received(item))?;
                Ok(None)
            }
            Offer::Queued     => Ok(None),
            Offer::Full(item) => Ok(Some(item)),
        }
    }

    fn schedule(&mut self, process: ProcessId, at: Tick, wake: Wake<M>) -> ClockResult<()> {
        self.ensure_waiting(process)?;
        let slot = self.slot_mut(process)?;
        slot.state = SlotState::Scheduled;
        slot.pending = Some(wake);
        self.queue.push(at, process);
        Ok(())
    }

    /// A process may register a new suspension point only while it has none.
    fn ensure_waiting(&self, process: ProcessId) -> ClockResult<()> {
        let slot = self.slots.get(process.index()).ok_or(ClockError::UnknownProcess(process))?;
        match slot.state {
            SlotState::Waiting   => Ok(()),
            SlotState::Scheduled => Err(ClockError::AlreadyScheduled(process)),
            SlotState::Finished  => Err(ClockError::ProcessFinished(process)),
        }
    }

    fn slot_mut(&mut self, process: ProcessId) -> ClockResult<&mut Slot<M>> {
        self.slots.get_mut(process.index()).ok_or(ClockError::UnknownProcess(process))
    }

    fn channel_mut(&mut self, id: ChannelId) -> ClockResult<&mut Channel<M>> {
        self.channels.get_mut(id.index()).ok_or(ClockError::UnknownChannel(id))
    }
}
