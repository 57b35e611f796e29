//! Session observer trait for progress reporting and data collection.

use lift_car::Car;
use lift_core::{Call, CallId, CarId, Tick};

use crate::SessionReport;

/// Callbacks invoked by [`Session::run`][crate::Session::run] as calls and
/// cars change state.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Cars are passed read-only, in the state
/// they are in right after the event.
///
/// # Example: trip printer
///
/// ```rust,ignore
/// struct TripPrinter;
///
/// impl SessionObserver for TripPrinter {
///     fn on_dropoff(&mut self, car: &Car, call: CallId, now: Tick) {
///         println!("{now}: {} delivered {call} at floor {}", car.id(), car.floor());
///     }
/// }
/// ```
pub trait SessionObserver {
    /// A call was created and appended to the history.
    fn on_call_created(&mut self, _call: &Call) {}

    /// The dispatcher chose `car` for `call`.
    fn on_call_assigned(&mut self, _call: CallId, _car: CarId, _now: Tick) {}

    /// A car reached a floor it has to serve.
    fn on_stop(&mut self, _car: &Car, _now: Tick) {}

    fn on_pickup(&mut self, _car: &Car, _call: CallId, _now: Tick) {}

    fn on_dropoff(&mut self, _car: &Car, _call: CallId, _now: Tick) {}

    /// The car's heading changed, including to and from idle.
    fn on_direction_change(&mut self, _car: &Car, _now: Tick) {}

    /// Called once after the clock reaches the end of the session.
    fn on_session_end(&mut self, _report: &SessionReport) {}
}

/// A [`SessionObserver`] that does nothing.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
