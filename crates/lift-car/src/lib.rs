//! `lift-car`: SCAN bookkeeping and the per-car state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`manager`] | `CallManager`: pickup/drop-off buckets, `Bucket`           |
//! | [`car`]     | `Car`, `CarSpec`, `Action`: invariant-checked car state    |
//! | [`error`]   | `CarError`, `CarResult<T>`                                  |
//!
//! # SCAN in one paragraph
//!
//! A car sweeps in one direction, stopping at every floor that has a
//! drop-off or a *reachable* pickup for that direction, until none is left;
//! then it turns around.  A pickup for the direction being swept whose
//! origin the car has already passed is *unreachable* and waits for the next
//! sweep in that direction.  Pickups for the other direction are always
//! reachable: they are served once the car sweeps their way.
//!
//! This crate is time-free.  `lift-sim` drives a `Car` from scheduler
//! processes and turns each [`Action`] into timeouts.

pub mod car;
pub mod error;
pub mod manager;

#[cfg(test)]
mod tests;

pub use car::{Action, Car, CarSpec};
pub use error::{CarError, CarResult};
pub use manager::{Bucket, CallManager};
