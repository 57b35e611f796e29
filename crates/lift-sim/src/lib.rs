//! `lift-sim`: runs an elevator dispatch session on the cooperative clock.
//!
//! # Processes
//!
//! ```text
//!   CallSource ──inbound──▶ Dispatcher ──calls[car]──▶ Admission(car)
//!   (or script)            (CarSelector)                   │ "work available"
//!                                                          ▼ wake[car], capacity 1
//!                                                      Movement(car)
//! ```
//!
//! Every arrow is a [`lift_clock`] channel and every box is a [`Task`]
//! resumed by one [`SimClock`][lift_clock::SimClock].  Only one task runs at
//! a time, so the [`Building`] is shared through a plain `&mut` for the
//! length of each step.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_sim::{NoopObserver, SessionBuilder, SessionConfig};
//!
//! let mut session = SessionBuilder::new(SessionConfig::default()).build()?;
//! let report = session.run(&mut NoopObserver)?;
//! println!("{report}");
//! ```

pub mod builder;
pub mod building;
pub mod config;
pub mod error;
pub mod observer;
pub mod report;
pub mod session;
pub mod task;


pub use builder::SessionBuilder;
pub use building::Building;
pub use config::SessionConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SessionObserver};
pub use report::SessionReport;
pub use session::Session;
pub use task::{Message, Task, World};
