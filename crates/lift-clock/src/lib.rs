//! `lift-clock`: the discrete-event scheduler that drives every process.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`wake_queue`] | `WakeKey`, `WakeQueue` (`BTreeMap<WakeKey, ProcessId>`)    |
//! | [`channel`]    | `Channel`: bounded/unbounded FIFO with wait lists        |
//! | [`process`]    | `Process` trait, `Wake`, `Suspend`, `ClockHandle`         |
//! | [`clock`]      | `SimClock`: time, wake-ups, channels, `run(until)`       |
//! | [`error`]      | `ClockError`, `ClockResult<T>`                            |
//!
//! # Scheduling model
//!
//! ```text
//! loop:
//!   ① pop the earliest wake-up (deadline, registration seq) with deadline < until
//!   ② now = deadline
//!   ③ resume that process with the reason it woke (Start / Elapsed / Received / Sent)
//!   ④ the process returns its next suspension point:
//!        Timeout(d)     → wake-up at now + d
//!        Recv(ch)       → wake-up now if ch has an item, else wait on ch
//!        Send(ch, msg)  → wake-up now if ch has room, else wait on ch
//!        Finish         → never resumed again
//! now = until
//! ```
//!
//! Exactly one process runs at a time and runs uninterrupted until it
//! returns, so state touched between two suspension points needs no locking.
//! Ties at one deadline resume in registration order, which makes a run a
//! pure function of its inputs and seed.

pub mod channel;
pub mod clock;
pub mod error;
pub mod process;
pub mod wake_queue;


pub use channel::Channel;
pub use clock::{Interest, RunStats, SimClock};
pub use error::{ClockError, ClockResult};
pub use process::{ClockHandle, Process, Suspend, Wake};
pub use wake_queue::{WakeKey, WakeQueue};
