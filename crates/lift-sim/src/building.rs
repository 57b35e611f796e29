//! The `Building`: cars, call history, and per-floor waiting counters.

use lift_car::Car;
use lift_core::{Call, CallId, CallIdAllocator, CallTicket, CarId, Floor, Tick};

use crate::{SimError, SimResult};

/// Shared state of one session.
///
/// The call history is append-only and indexed by [`CallId`]; ids come from
/// the building's own [`CallIdAllocator`], so the `n`-th recorded call is
/// always `CallId(n)`.
#[derive(Debug)]
pub struct Building {
    floor_count: Floor,
    cars:        Vec<Car>,
    history:     Vec<Call>,
    /// Passengers waiting at each floor, indexed by `floor - 1`.
    waiting:     Vec<u32>,
    ids:         CallIdAllocator,
}

impl Building {
    pub fn new(floor_count: Floor, cars: Vec<Car>) -> SimResult<Self> {
        if floor_count < 1 {
            return Err(SimError::Config("building needs at least one floor".into()));
        }
        if cars.is_empty() {
            return Err(SimError::Config("building needs at least one car".into()));
        }
        for (i, car) in cars.iter().enumerate() {
            if car.id().index() != i {
                return Err(SimError::Config(format!("{} stored at position {i}", car.id())));
            }
        }
        Ok(Self {
            floor_count,
            cars,
            history: Vec::new(),
            waiting: vec![0; floor_count as usize],
            ids:     CallIdAllocator::new(),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn floor_count(&self) -> Floor { self.floor_count }
    #[inline] pub fn cars(&self) -> &[Car] { &self.cars }
    #[inline] pub fn history(&self) -> &[Call] { &self.history }

    pub fn car(&self, id: CarId) -> SimResult<&Car> {
        self.cars.get(id.index()).ok_or_else(|| SimError::State(format!("unknown car {id}")))
    }

    pub fn call(&self, id: CallId) -> SimResult<&Call> {
        self.history.get(id.index()).ok_or_else(|| SimError::State(format!("unknown call {id}")))
    }

    /// Passengers waiting at `floor` (created, not yet picked up).
    pub fn waiting_at(&self, floor: Floor) -> u32 {
        floor
            .checked_sub(1)
            .and_then(|i| self.waiting.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Allocator for the next call id.  Only the call source uses it.
    pub fn call_ids(&mut self) -> &mut CallIdAllocator {
        &mut self.ids
    }

    // ── Call lifecycle ────────────────────────────────────────────────────

    /// Append a freshly created call to the history.
    pub fn record(&mut self, call: Call) -> SimResult<CallTicket> {
        if call.id().index() != self.history.len() {
            return Err(SimError::State(format!(
                "{} recorded out of order (history holds {} calls)",
                call.id(),
                self.history.len()
            )));
        }
        call.check_bounds(1, self.floor_count)?;
        *self.waiting_mut(call.origin())? += 1;
        let ticket = call.ticket();
        self.history.push(call);
        Ok(ticket)
    }

    pub fn assign(&mut self, call: CallId, car: CarId) -> SimResult<()> {
        self.car(car)?;
        self.call_mut(call)?.assigned(car)?;
        Ok(())
    }

    /// Let `car` admit a call its dispatcher forwarded.
    pub fn admit(&mut self, car: CarId, ticket: CallTicket) -> SimResult<lift_car::Bucket> {
        Ok(self.car_mut(car)?.admit(ticket)?)
    }

    /// Board the next passenger at `car`'s floor and stamp the pickup time.
    pub fn pick_up(&mut self, car: CarId, now: Tick) -> SimResult<Option<CallId>> {
        let Some(ticket) = self.car_mut(car)?.pick_up()? else {
            return Ok(None);
        };
        self.call_mut(ticket.id)?.picked_up(now)?;
        let waiting = self.waiting_mut(ticket.origin)?;
        *waiting = waiting.checked_sub(1).ok_or_else(|| {
            SimError::State(format!("no one was waiting at floor {} for {}", ticket.origin, ticket.id))
        })?;
        Ok(Some(ticket.id))
    }

    /// Let off the next passenger at `car`'s floor and stamp the completion time.
    pub fn drop_off(&mut self, car: CarId, now: Tick) -> SimResult<Option<CallId>> {
        let Some(ticket) = self.car_mut(car)?.drop_off()? else {
            return Ok(None);
        };
        self.call_mut(ticket.id)?.completed(now)?;
        Ok(Some(ticket.id))
    }

    pub fn car_mut(&mut self, id: CarId) -> SimResult<&mut Car> {
        self.cars.get_mut(id.index()).ok_or_else(|| SimError::State(format!("unknown car {id}")))
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn call_mut(&mut self, id: CallId) -> SimResult<&mut Call> {
        self.history.get_mut(id.index()).ok_or_else(|| SimError::State(format!("unknown call {id}")))
    }

    fn waiting_mut(&mut self, floor: Floor) -> SimResult<&mut u32> {
        floor
            .checked_sub(1)
            .and_then(|i| self.waiting.get_mut(i as usize))
            .ok_or_else(|| SimError::State(format!("floor {floor} is not in the building")))
    }
}
