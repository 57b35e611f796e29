//! Transport requests and their lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//! Pending ──assigned()──▶ Assigned ──picked_up(t)──▶ OnBoard ──completed(t)──▶ Completed
//! ```
//!
//! A `Call` lives in the building's history for the whole run.  Everything
//! else refers to it through its [`CallId`] (carried inside a [`CallTicket`]
//! by the per-car call manager).

use crate::{CallId, CarId, CoreError, CoreResult, Direction, Floor, Tick};

/// Where a call is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CallState {
    #[default]
    Pending,
    Assigned,
    OnBoard,
    Completed,
}

/// A single request to travel from `origin` to `destination`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    id:          CallId,
    origin:      Floor,
    destination: Floor,
    direction:   Direction,
    created:     Tick,
    picked:      Option<Tick>,
    finished:    Option<Tick>,
    car:         Option<CarId>,
    state:       CallState,
}

impl Call {
    /// Create a pending call.
    ///
    /// Fails with [`CoreError::InvalidCall`] when `origin == destination` or
    /// either floor is 0 (floors are numbered from 1).
    pub fn new(id: CallId, origin: Floor, destination: Floor, created: Tick) -> CoreResult<Call> {
        if origin == 0 || destination == 0 {
            return Err(CoreError::InvalidCall(format!(
                "{id}: floors are numbered from 1 (got {origin} -> {destination})"
            )));
        }
        let direction = Direction::between(origin, destination).ok_or_else(|| {
            CoreError::InvalidCall(format!("{id}: origin and destination are both {origin}"))
        })?;
        Ok(Call {
            id,
            origin,
            destination,
            direction,
            created,
            picked: None,
            finished: None,
            car: None,
            state: CallState::Pending,
        })
    }

    /// Check that both floors lie in `[lower, upper]`.
    pub fn check_bounds(&self, lower: Floor, upper: Floor) -> CoreResult<()> {
        let inside = |f: Floor| (lower..=upper).contains(&f);
        if inside(self.origin) && inside(self.destination) {
            Ok(())
        } else {
            Err(CoreError::InvalidCall(format!(
                "{}: {} -> {} outside floors {lower}..={upper}",
                self.id, self.origin, self.destination
            )))
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn id(&self) -> CallId { self.id }
    #[inline] pub fn origin(&self) -> Floor { self.origin }
    #[inline] pub fn destination(&self) -> Floor { self.destination }
    #[inline] pub fn direction(&self) -> Direction { self.direction }
    #[inline] pub fn created(&self) -> Tick { self.created }
    #[inline] pub fn picked_up_at(&self) -> Option<Tick> { self.picked }
    #[inline] pub fn completed_at(&self) -> Option<Tick> { self.finished }
    #[inline] pub fn car(&self) -> Option<CarId> { self.car }
    #[inline] pub fn state(&self) -> CallState { self.state }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.state == CallState::Completed
    }

    /// Ticks between creation and pickup, once picked up.
    pub fn wait_time(&self) -> Option<u64> {
        self.picked.map(|t| t.since(self.created))
    }

    /// Ticks between creation and completion, once completed.
    pub fn process_time(&self) -> Option<u64> {
        self.finished.map(|t| t.since(self.created))
    }

    /// The lightweight reference handed to a car's call manager.
    #[inline]
    pub fn ticket(&self) -> CallTicket {
        CallTicket {
            id:          self.id,
            origin:      self.origin,
            destination: self.destination,
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Record that the dispatcher handed this call to `car`.
    pub fn assigned(&mut self, car: CarId) -> CoreResult<()> {
        self.advance(CallState::Pending, CallState::Assigned)?;
        self.car = Some(car);
        Ok(())
    }

    /// Record the pickup instant.
    pub fn picked_up(&mut self, at: Tick) -> CoreResult<()> {
        self.advance(CallState::Assigned, CallState::OnBoard)?;
        self.picked = Some(at);
        Ok(())
    }

    /// Record the drop-off instant.
    pub fn completed(&mut self, at: Tick) -> CoreResult<()> {
        self.advance(CallState::OnBoard, CallState::Completed)?;
        self.finished = Some(at);
        Ok(())
    }

    fn advance(&mut self, expected: CallState, next: CallState) -> CoreResult<()> {
        if self.state != expected {
            return Err(CoreError::Lifecycle { call: self.id, from: self.state, to: next });
        }
        self.state = next;
        Ok(())
    }
}

// ── CallTicket ────────────────────────────────────────────────────────────────

/// What a car's call manager keeps per queued call: the id plus the two
/// floors it routes on.  The authoritative [`Call`] stays in the history.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallTicket {
    pub id:          CallId,
    pub origin:      Floor,
    pub destination: Floor,
}

impl CallTicket {
    /// `None` only for a malformed ticket whose floors coincide.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        Direction::between(self.origin, self.destination)
    }
}
