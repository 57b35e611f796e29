//! Session-wide configuration.

use lift_car::CarSpec;
use lift_core::{Floor, Tick};
use lift_dispatch::{Interarrival, Policy};

use crate::{SimError, SimResult};

/// Global parameters for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Floors are numbered `1..=floor_count`.
    pub floor_count: Floor,

    /// Total simulated time in ticks (0.1 s).  Default: 36 000 (one hour).
    pub runtime: u64,

    /// Master RNG seed.  The same seed and config replay the same session.
    pub seed: u64,

    /// Gap between randomly generated calls.  Ignored when a script is set.
    pub interarrival: Interarrival,

    /// Car-selection policy, unless the builder is given a custom selector.
    pub policy: Policy,

    /// One entry per car; car `i` gets `CarId(i)`.
    pub cars: Vec<CarSpec>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            floor_count:  10,
            runtime:      36_000,
            seed:         1,
            interarrival: Interarrival::default(),
            policy:       Policy::default(),
            cars:         vec![CarSpec::default()],
        }
    }
}

impl SessionConfig {
    /// The instant the session stops.
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.runtime)
    }

    /// Checks that do not depend on how calls are produced.
    pub fn validate(&self) -> SimResult<()> {
        if self.floor_count < 1 {
            return Err(SimError::Config("floor count must be at least 1".into()));
        }
        if self.runtime == 0 {
            return Err(SimError::Config("runtime must be positive".into()));
        }
        if self.cars.is_empty() {
            return Err(SimError::Config("at least one car is required".into()));
        }
        if u16::try_from(self.cars.len()).is_err() {
            return Err(SimError::Config(format!("{} cars is more than CarId can hold", self.cars.len())));
        }
        Ok(())
    }
}
