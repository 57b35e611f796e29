//! The `CarSelector` trait: which car takes a call.

use lift_car::Car;
use lift_core::{CallTicket, CarId, SimRng};

use crate::{DispatchError, DispatchResult};

/// Pluggable car-selection policy.
///
/// The dispatcher calls [`select`][Self::select] once per incoming call with
/// every car in the building.  Implementations must only consider cars whose
/// service range covers both floors of the call; [`eligible`] does that
/// filtering.  Returning `None` means no car can take the call, which the
/// dispatcher reports as [`DispatchError::NoEligibleCar`].
///
/// Cars are read-only here.  The chosen car learns about the call through its
/// own admission channel, never by direct mutation.
///
/// Randomness must come from `rng` so that runs replay under a fixed seed.
///
/// # Example
///
/// ```rust,ignore
/// struct LowestFirst;
///
/// impl CarSelector for LowestFirst {
///     fn select(&self, call: &CallTicket, cars: &[Car], _rng: &mut SimRng) -> Option<CarId> {
///         eligible(call, cars).min_by_key(|c| c.floor()).map(|c| c.id())
///     }
/// }
/// ```
pub trait CarSelector: Send + Sync + 'static {
    fn select(&self, call: &CallTicket, cars: &[Car], rng: &mut SimRng) -> Option<CarId>;

    /// Short name for logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<S: CarSelector + ?Sized> CarSelector for Box<S> {
    fn select(&self, call: &CallTicket, cars: &[Car], rng: &mut SimRng) -> Option<CarId> {
        (**self).select(call, cars, rng)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Cars whose service range covers the call's origin and destination.
pub fn eligible<'a>(call: &'a CallTicket, cars: &'a [Car]) -> impl Iterator<Item = &'a Car> + 'a {
    cars.iter().filter(|c| c.serves(call.origin, call.destination))
}

/// Run `selector` and turn "nobody" into an error.
pub fn dispatch<S: CarSelector + ?Sized>(
    selector: &S,
    call:     &CallTicket,
    cars:     &[Car],
    rng:      &mut SimRng,
) -> DispatchResult<CarId> {
    selector.select(call, cars, rng).ok_or(DispatchError::NoEligibleCar {
        call:        call.id,
        origin:      call.origin,
        destination: call.destination,
    })
}

// ── RandomSelector ────────────────────────────────────────────────────────────

/// Uniform choice among eligible cars.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomSelector;

impl CarSelector for RandomSelector {
    fn select(&self, call: &CallTicket, cars: &[Car], rng: &mut SimRng) -> Option<CarId> {
        let candidates: Vec<CarId> = eligible(call, cars).map(Car::id).collect();
        rng.choose(&candidates).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

// ── LeastLoaded ───────────────────────────────────────────────────────────────

/// The eligible car with the fewest pending calls; lowest id on ties.
#[derive(Copy, Clone, Debug, Default)]
pub struct LeastLoaded;

impl CarSelector for LeastLoaded {
    fn select(&self, call: &CallTicket, cars: &[Car], _rng: &mut SimRng) -> Option<CarId> {
        eligible(call, cars)
            .min_by_key(|c| (c.load(), c.id()))
            .map(Car::id)
    }

    fn name(&self) -> &'static str {
        "least-loaded"
    }
}

// ── Policy ────────────────────────────────────────────────────────────────────

/// Built-in policies, for configuration.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Policy {
    #[default]
    Random,
    LeastLoaded,
}

impl Policy {
    pub fn selector(self) -> Box<dyn CarSelector> {
        match self {
            Policy::Random      => Box::new(RandomSelector),
            Policy::LeastLoaded => Box::new(LeastLoaded),
        }
    }
}
