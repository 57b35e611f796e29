//! `lift-core`: foundational types for the `lift_sim` elevator simulation.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CarId`, `CallId`, `ProcessId`, `ChannelId`, `CallIdAllocator` |
//! | [`time`]        | `Tick`, `TICKS_PER_SECOND`                            |
//! | [`direction`]   | `Direction`, `Heading`, `Floor`                       |
//! | [`call`]        | `Call`, `CallState`, `CallTicket`                     |
//! | [`rng`]         | `SimRng`                                              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod call;
pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use call::{Call, CallState, CallTicket};
pub use direction::{Direction, Floor, Heading};
pub use error::{CoreError, CoreResult};
pub use ids::{CallId, CallIdAllocator, CarId, ChannelId, ProcessId};
pub use rng::SimRng;
pub use time::{TICKS_PER_SECOND, Tick};
