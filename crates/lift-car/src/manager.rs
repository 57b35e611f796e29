//! `CallManager`: one car's pending work, organised for SCAN.
//!
//! # Layout
//!
//! ```text
//!                 ┌ Up   ┬ reachable   : [VecDeque<CallTicket>; floors]
//!      pickups ───┤      └ unreachable : [VecDeque<CallTicket>; floors]
//!                 └ Down ┬ reachable   : [VecDeque<CallTicket>; floors]
//!                        └ unreachable : [VecDeque<CallTicket>; floors]
//!      dropoffs ──────── by destination : [VecDeque<CallTicket>; floors]
//! ```
//!
//! Every collection is a fixed array of per-floor FIFO queues sized to the
//! car's service range at construction.  A ticket lives in exactly one
//! queue: a pickup queue until `pop_pickup`, then the drop-off queue of its
//! destination until `pop_dropoff`.

use std::collections::VecDeque;
use std::mem;

use lift_core::{CallId, CallTicket, Direction, Floor, Heading};

use crate::{CarError, CarResult};

/// Which queue a ticket sits in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Bucket {
    Reachable(Direction),
    Unreachable(Direction),
    Dropoff,
}

// ── FloorQueues ───────────────────────────────────────────────────────────────

/// One FIFO per floor of the service range, plus a running total.
#[derive(Clone, Debug)]
struct FloorQueues {
    queues: Vec<VecDeque<CallTicket>>,
    total:  usize,
}

impl FloorQueues {
    fn new(floors: usize) -> Self {
        Self { queues: vec![VecDeque::new(); floors], total: 0 }
    }

    fn push(&mut self, slot: usize, ticket: CallTicket) {
        self.queues[slot].push_back(ticket);
        self.total += 1;
    }

    fn pop(&mut self, slot: usize) -> Option<CallTicket> {
        let ticket = self.queues[slot].pop_front()?;
        self.total -= 1;
        Some(ticket)
    }

    fn len_at(&self, slot: usize) -> usize {
        self.queues[slot].len()
    }

    /// Lowest (`Up`) or highest (`Down`) occupied slot.
    fn nearest(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Up   => self.queues.iter().position(|q| !q.is_empty()),
            Direction::Down => self.queues.iter().rposition(|q| !q.is_empty()),
        }
    }

    fn count(&self, call: CallId) -> usize {
        self.queues.iter().flatten().filter(|t| t.id == call).count()
    }
}

// ── CallManager ───────────────────────────────────────────────────────────────

/// SCAN storage and retrieval of a single car's pending calls.
#[derive(Clone, Debug)]
pub struct CallManager {
    lower:       Floor,
    upper:       Floor,
    /// Indexed by [`Direction::slot`].
    reachable:   [FloorQueues; 2],
    unreachable: [FloorQueues; 2],
    dropoffs:    FloorQueues,
}

impl CallManager {
    /// An empty manager for the service range `[lower, upper]`.
    pub fn new(lower: Floor, upper: Floor) -> CarResult<Self> {
        if lower == 0 || lower > upper {
            return Err(CarError::Config(format!(
                "service range {lower}..={upper} is empty or starts below floor 1"
            )));
        }
        let floors = (upper - lower + 1) as usize;
        let empty = || FloorQueues::new(floors);
        Ok(Self {
            lower,
            upper,
            reachable:   [empty(), empty()],
            unreachable: [empty(), empty()],
            dropoffs:    empty(),
        })
    }

    /// `(lower, upper)` service range.
    pub fn bounds(&self) -> (Floor, Floor) {
        (self.lower, self.upper)
    }

    // ── Admission ─────────────────────────────────────────────────────────

    /// Classify and enqueue a new pickup.
    ///
    /// * car idle, or call direction ≠ car direction → reachable for the
    ///   call's own direction;
    /// * same direction → reachable iff the origin is strictly ahead of
    ///   `car_floor`, otherwise unreachable until the next sweep.
    pub fn add(&mut self, ticket: CallTicket, heading: Heading, car_floor: Floor) -> CarResult<Bucket> {
        let direction = ticket.direction().ok_or_else(|| {
            CarError::InvalidCall(format!("{} has no direction ({} -> {})", ticket.id, ticket.origin, ticket.destination))
        })?;
        for floor in [ticket.origin, ticket.destination] {
            if !self.serves(floor) {
                return Err(CarError::InvalidCall(format!(
                    "{}: floor {floor} is outside service range {}..={}",
                    ticket.id, self.lower, self.upper
                )));
            }
        }
        let slot = self.slot(ticket.origin)?;

        let bucket = match heading.direction() {
            Some(sweep) if sweep == direction && !direction.is_ahead(car_floor, ticket.origin) => {
                self.unreachable[direction.slot()].push(slot, ticket);
                Bucket::Unreachable(direction)
            }
            _ => {
                self.reachable[direction.slot()].push(slot, ticket);
                Bucket::Reachable(direction)
            }
        };
        Ok(bucket)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Nearest floor needing service for `direction`: the lowest (`Up`) or
    /// highest (`Down`) floor among reachable pickups for `direction` and
    /// all drop-offs.
    pub fn next_stop(&self, direction: Direction) -> Option<Floor> {
        let pickup = self.reachable[direction.slot()].nearest(direction);
        let dropoff = self.dropoffs.nearest(direction);
        let slot = match (pickup, dropoff) {
            (Some(p), Some(d)) => Some(match direction {
                Direction::Up   => p.min(d),
                Direction::Down => p.max(d),
            }),
            (p, d) => p.or(d),
        }?;
        Some(self.floor_of(slot))
    }

    /// Like [`next_stop`][Self::next_stop] but ignoring pickups.
    pub fn next_dropoff(&self, direction: Direction) -> Option<Floor> {
        self.dropoffs.nearest(direction).map(|s| self.floor_of(s))
    }

    pub fn has_reachable(&self, direction: Direction) -> bool {
        self.reachable[direction.slot()].total > 0
    }

    pub fn has_unreachable(&self, direction: Direction) -> bool {
        self.unreachable[direction.slot()].total > 0
    }

    /// Any pickup for `direction`, reachable or not.
    pub fn has_pickups(&self, direction: Direction) -> bool {
        self.has_reachable(direction) || self.has_unreachable(direction)
    }

    /// Pickups waiting across all four pickup buckets.
    pub fn pending_pickups(&self) -> usize {
        self.reachable.iter().chain(&self.unreachable).map(|q| q.total).sum()
    }

    /// Passengers aboard, as seen by the drop-off bucket.
    pub fn pending_dropoffs(&self) -> usize {
        self.dropoffs.total
    }

    pub fn is_empty(&self) -> bool {
        self.pending_pickups() == 0 && self.pending_dropoffs() == 0
    }

    /// Reachable pickups queued at `floor` for `direction`.
    pub fn reachable_at(&self, direction: Direction, floor: Floor) -> CarResult<usize> {
        let slot = self.slot(floor)?;
        Ok(self.reachable[direction.slot()].len_at(slot))
    }

    /// Which bucket holds `call`, if any.
    pub fn locate(&self, call: CallId) -> Option<Bucket> {
        for d in Direction::ALL {
            if self.reachable[d.slot()].count(call) > 0 {
                return Some(Bucket::Reachable(d));
            }
            if self.unreachable[d.slot()].count(call) > 0 {
                return Some(Bucket::Unreachable(d));
            }
        }
        (self.dropoffs.count(call) > 0).then_some(Bucket::Dropoff)
    }

    pub fn contains(&self, call: CallId) -> bool {
        self.locate(call).is_some()
    }

    /// Total number of queue entries for `call` across every bucket.
    pub fn occurrences(&self, call: CallId) -> usize {
        self.reachable.iter()
            .chain(&self.unreachable)
            .chain(std::iter::once(&self.dropoffs))
            .map(|q| q.count(call))
            .sum()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Exchange the reachable and unreachable pickups for `direction`.
    ///
    /// Called when a new sweep in `direction` is about to begin, so calls
    /// deferred during the previous one become eligible.  Applying it twice
    /// is a no-op.
    pub fn swap_reachable(&mut self, direction: Direction) {
        let i = direction.slot();
        mem::swap(&mut self.reachable[i], &mut self.unreachable[i]);
    }

    /// Dequeue one reachable pickup for `direction` at `floor` and move it to
    /// the drop-off queue of its destination.
    pub fn pop_pickup(&mut self, direction: Direction, floor: Floor) -> CarResult<Option<CallTicket>> {
        let slot = self.slot(floor)?;
        let Some(ticket) = self.reachable[direction.slot()].pop(slot) else {
            return Ok(None);
        };
        let dest = self.slot(ticket.destination)?;
        self.dropoffs.push(dest, ticket);
        Ok(Some(ticket))
    }

    /// Dequeue one drop-off at `floor`.
    pub fn pop_dropoff(&mut self, floor: Floor) -> CarResult<Option<CallTicket>> {
        let slot = self.slot(floor)?;
        Ok(self.dropoffs.pop(slot))
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    #[inline]
    fn serves(&self, floor: Floor) -> bool {
        (self.lower..=self.upper).contains(&floor)
    }

    fn slot(&self, floor: Floor) -> CarResult<usize> {
        if !self.serves(floor) {
            return Err(CarError::InvalidFloor { floor, lower: self.lower, upper: self.upper });
        }
        Ok((floor - self.lower) as usize)
    }

    #[inline]
    fn floor_of(&self, slot: usize) -> Floor {
        self.lower + slot as Floor
    }
}
