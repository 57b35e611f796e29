//! The `Process` trait: one cooperatively scheduled activity.

use lift_core::{ChannelId, Tick};

use crate::{ClockError, SimClock};

/// Why a process is being resumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wake<M> {
    /// First resumption after registration.
    Start,
    /// A `Suspend::Timeout` elapsed.
    Elapsed,
    /// A `Suspend::Recv` completed with this item.
    Received(M),
    /// A `Suspend::Send` was accepted by the channel.
    Sent,
}

/// Where a process stops until the clock resumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suspend<M> {
    /// Resume after this many ticks (0 yields to everything already due now).
    Timeout(u64),
    /// Resume with the next item of the channel.
    Recv(ChannelId),
    /// Resume once the item has been placed into the channel.
    Send(ChannelId, M),
    /// Never resume again.
    Finish,
}

/// Pluggable activity driven by [`SimClock::run`].
///
/// `resume` runs the process from its previous suspension point to the next
/// one.  Implementations are explicit state machines: whatever they need to
/// remember across suspensions lives in `self`.
///
/// `W` is the shared world the processes operate on; it is borrowed mutably
/// for the duration of one `resume` only.
pub trait Process<W, M> {
    type Error: From<ClockError>;

    fn resume(
        &mut self,
        wake:  Wake<M>,
        world: &mut W,
        clock: &mut ClockHandle<'_, M>,
    ) -> Result<Suspend<M>, Self::Error>;
}

impl<W, M, P: Process<W, M> + ?Sized> Process<W, M> for Box<P> {
    type Error = P::Error;

    fn resume(
        &mut self,
        wake:  Wake<M>,
        world: &mut W,
        clock: &mut ClockHandle<'_, M>,
    ) -> Result<Suspend<M>, Self::Error> {
        (**self).resume(wake, world, clock)
    }
}

// ── ClockHandle ───────────────────────────────────────────────────────────────

/// The slice of [`SimClock`] a running process may touch.
///
/// It deliberately cannot schedule the calling process; that only happens
/// through the returned [`Suspend`].
pub struct ClockHandle<'a, M> {
    clock: &'a mut SimClock<M>,
}

impl<'a, M> ClockHandle<'a, M> {
    pub(crate) fn new(clock: &'a mut SimClock<M>) -> Self {
        Self { clock }
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Non-blocking send.  Returns the item back (`Some`) if the channel is full.
    pub fn try_send(&mut self, channel: ChannelId, item: M) -> Result<Option<M>, ClockError> {
        self.clock.try_send(channel, item)
    }

    /// Items currently buffered in `channel`.
    pub fn queued(&self, channel: ChannelId) -> Result<usize, ClockError> {
        self.clock.channel(channel).map(|c| c.len())
    }
}
