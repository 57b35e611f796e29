//! `lift-dispatch`: where calls come from and which car gets them.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`source`]   | `CallSource`, `Interarrival`: random call generation      |
//! | [`script`]   | `CallScript`, `ScriptedCall`: fixed, timed call lists     |
//! | [`loader`]   | `load_script_csv`, `load_script_reader`                    |
//! | [`selector`] | `CarSelector` trait, `RandomSelector`, `LeastLoaded`, `Policy` |
//! | [`error`]    | `DispatchError`, `DispatchResult<T>`                       |
//!
//! Nothing here knows about simulated time beyond `Tick` values: `lift-sim`
//! wraps the source and the selector in scheduler processes.

pub mod error;
pub mod loader;
pub mod script;
pub mod selector;
pub mod source;


pub use error::{DispatchError, DispatchResult};
pub use loader::{load_script_csv, load_script_reader};
pub use script::{CallScript, ScriptedCall};
pub use selector::{dispatch, eligible, CarSelector, LeastLoaded, Policy, RandomSelector};
pub use source::{CallSource, Interarrival};
