//! The per-car state machine.
//!
//! A `Car` owns its position, direction, occupancy, and [`CallManager`].
//! Every mutator checks the car's invariants:
//!
//! * `0 ≤ occupancy ≤ capacity`
//! * `lower ≤ floor ≤ upper`
//!
//! and reports a breach as a fatal [`CarError`] instead of clamping.

use lift_core::{CallTicket, CarId, Direction, Floor, Heading};

use crate::{Bucket, CallManager, CarError, CarResult};

// ── CarSpec ───────────────────────────────────────────────────────────────────

/// Static parameters of one car.  Durations are in ticks (0.1 s).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarSpec {
    /// Maximum passengers aboard.  `None` means unbounded.
    pub capacity: Option<u32>,

    /// Time to travel between adjacent floors.  Default: 100 (10 s).
    pub travel_ticks: u64,

    /// Time to board one passenger.  Default: 30 (3 s).
    pub pickup_ticks: u64,

    /// Time to let one passenger off.  Default: 30 (3 s).
    pub dropoff_ticks: u64,

    /// Direction taken when leaving idle with work both ways.  Default: up.
    pub idle_preference: Direction,

    /// Floors served, inclusive.  `None` means the whole building.
    pub service_range: Option<(Floor, Floor)>,

    /// Where the car starts.  `None` means the bottom of its service range.
    pub start_floor: Option<Floor>,
}

impl Default for CarSpec {
    fn default() -> Self {
        Self {
            capacity:        None,
            travel_ticks:    100,
            pickup_ticks:    30,
            dropoff_ticks:   30,
            idle_preference: Direction::Up,
            service_range:   None,
            start_floor:     None,
        }
    }
}

// ── Action ────────────────────────────────────────────────────────────────────

/// What the car does next, as decided by [`Car::next_action`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Action {
    /// Move one floor toward `target`.
    Travel { target: Floor },
    /// The current floor needs service: drop-offs, then pickups.
    Stop { floor: Floor },
    /// The sweep ended and the car now serves `direction`.
    Turn { direction: Direction },
    /// No work left; the car is idle.
    Idle,
}

// ── Car ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Car {
    id:        CarId,
    spec:      CarSpec,
    lower:     Floor,
    upper:     Floor,
    floor:     Floor,
    heading:   Heading,
    occupancy: u32,
    calls:     CallManager,
}

impl Car {
    /// Build car `id` for a building of `floor_count` floors.
    pub fn new(id: CarId, spec: CarSpec, floor_count: Floor) -> CarResult<Car> {
        let (lower, upper) = spec.service_range.unwrap_or((1, floor_count));
        if lower < 1 || lower > upper || upper > floor_count {
            return Err(CarError::Config(format!(
                "{id}: service range {lower}..={upper} does not fit floors 1..={floor_count}"
            )));
        }
        if spec.capacity == Some(0) {
            return Err(CarError::Config(format!("{id}: capacity must be at least 1")));
        }
        if spec.travel_ticks == 0 {
            return Err(CarError::Config(format!("{id}: travel time must be positive")));
        }
        let floor = spec.start_floor.unwrap_or(lower);
        if !(lower..=upper).contains(&floor) {
            return Err(CarError::Config(format!(
                "{id}: start floor {floor} outside service range {lower}..={upper}"
            )));
        }
        Ok(Car {
            id,
            calls: CallManager::new(lower, upper)?,
            spec,
            lower,
            upper,
            floor,
            heading: Heading::Idle,
            occupancy: 0,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn id(&self) -> CarId { self.id }
    #[inline] pub fn spec(&self) -> &CarSpec { &self.spec }
    #[inline] pub fn floor(&self) -> Floor { self.floor }
    #[inline] pub fn heading(&self) -> Heading { self.heading }
    #[inline] pub fn occupancy(&self) -> u32 { self.occupancy }
    #[inline] pub fn capacity(&self) -> Option<u32> { self.spec.capacity }
    #[inline] pub fn calls(&self) -> &CallManager { &self.calls }

    /// `(lower, upper)` service range.
    #[inline]
    pub fn service_range(&self) -> (Floor, Floor) {
        (self.lower, self.upper)
    }

    /// `true` if the car can serve a trip between these floors.
    pub fn serves(&self, origin: Floor, destination: Floor) -> bool {
        let range = self.lower..=self.upper;
        range.contains(&origin) && range.contains(&destination)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.spec.capacity.is_some_and(|c| self.occupancy >= c)
    }

    /// Calls assigned to this car and not yet completed.
    pub fn load(&self) -> usize {
        self.calls.pending_pickups() + self.calls.pending_dropoffs()
    }

    // ── Admission ─────────────────────────────────────────────────────────

    /// Hand a newly assigned call to the call manager.
    pub fn admit(&mut self, ticket: CallTicket) -> CarResult<Bucket> {
        self.calls.add(ticket, self.heading, self.floor)
    }

    // ── Movement decisions ────────────────────────────────────────────────

    /// Leave idle if there is work.
    ///
    /// Picks the idle preference if it has reachable pickups, else the other
    /// direction if it has any.  Returns the new direction, or `None` if the
    /// car stays idle (or was not idle).
    pub fn wake(&mut self) -> Option<Direction> {
        if !self.heading.is_idle() {
            return None;
        }
        let preferred = self.spec.idle_preference;
        let direction = [preferred, preferred.opposite()]
            .into_iter()
            .find(|&d| self.calls.has_reachable(d))?;
        self.heading = direction.into();
        Some(direction)
    }

    /// Decide the next step of the movement loop.
    ///
    /// While full the car heads for the nearest drop-off only, so pickups it
    /// had to leave behind stay queued (reachable) until room frees up.
    pub fn next_action(&mut self) -> CarResult<Action> {
        let Some(direction) = self.heading.direction() else {
            return Ok(Action::Idle);
        };
        let target = if self.is_full() {
            self.calls.next_dropoff(direction)
        } else {
            self.calls.next_stop(direction)
        };
        match target {
            Some(floor) if floor == self.floor => Ok(Action::Stop { floor }),
            Some(target) => Ok(Action::Travel { target }),
            None => self.end_sweep(direction),
        }
    }

    /// Close the sweep in `direction`: promote the calls it deferred, then
    /// turn around, start a fresh sweep, or go idle.
    fn end_sweep(&mut self, direction: Direction) -> CarResult<Action> {
        if self.calls.has_reachable(direction) {
            return Err(self.state_error(format!("sweep {direction} ended with reachable pickups left")));
        }
        self.calls.swap_reachable(direction);

        let opposite = direction.opposite();
        if self.calls.has_reachable(opposite) {
            self.heading = opposite.into();
            return Ok(Action::Turn { direction: opposite });
        }
        if self.calls.has_reachable(direction) {
            return Ok(Action::Turn { direction });
        }
        if !self.calls.is_empty() {
            return Err(self.state_error(format!(
                "going idle with {} pickups and {} drop-offs pending",
                self.calls.pending_pickups(),
                self.calls.pending_dropoffs()
            )));
        }
        self.heading = Heading::Idle;
        Ok(Action::Idle)
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Move one floor toward `target` and return the new floor.
    pub fn step_toward(&mut self, target: Floor) -> CarResult<Floor> {
        let next = match target.cmp(&self.floor) {
            std::cmp::Ordering::Greater => self.floor + 1,
            std::cmp::Ordering::Less    => self.floor - 1,
            std::cmp::Ordering::Equal   => {
                return Err(self.state_error(format!("asked to travel to current floor {target}")));
            }
        };
        if !(self.lower..=self.upper).contains(&next) {
            return Err(self.state_error(format!(
                "move to floor {next} leaves service range {}..={}",
                self.lower, self.upper
            )));
        }
        self.floor = next;
        Ok(next)
    }

    /// Let off the next passenger bound for the current floor, if any.
    pub fn drop_off(&mut self) -> CarResult<Option<CallTicket>> {
        let Some(ticket) = self.calls.pop_dropoff(self.floor)? else {
            return Ok(None);
        };
        if self.occupancy == 0 {
            return Err(self.state_error(format!("drop-off of {} with nobody aboard", ticket.id)));
        }
        self.occupancy -= 1;
        Ok(Some(ticket))
    }

    /// Board the next reachable passenger waiting at the current floor for
    /// the current direction, if any and if there is room.
    pub fn pick_up(&mut self) -> CarResult<Option<CallTicket>> {
        let Some(direction) = self.heading.direction() else {
            return Ok(None);
        };
        if self.is_full() {
            return Ok(None);
        }
        let Some(ticket) = self.calls.pop_pickup(direction, self.floor)? else {
            return Ok(None);
        };
        self.board()?;
        Ok(Some(ticket))
    }

    fn board(&mut self) -> CarResult<()> {
        if let Some(capacity) = self.spec.capacity {
            if self.occupancy >= capacity {
                return Err(CarError::Capacity { car: self.id, capacity });
            }
        }
        self.occupancy += 1;
        Ok(())
    }

    fn state_error(&self, reason: String) -> CarError {
        CarError::State { car: self.id, reason }
    }
}
