//! Random call generation.

use lift_core::{Call, CallIdAllocator, Floor, SimRng, Tick};

use crate::{DispatchError, DispatchResult};

// ── Interarrival ──────────────────────────────────────────────────────────────

/// Gap between consecutive generated calls, in ticks.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interarrival {
    /// Exactly this many ticks between calls.
    Fixed(u64),
    /// Uniform over `min..=max` ticks.
    Uniform { min: u64, max: u64 },
}

impl Default for Interarrival {
    /// One call every 3 s.
    fn default() -> Self {
        Interarrival::Fixed(30)
    }
}

impl Interarrival {
    /// Reject zero gaps and inverted ranges.
    pub fn validate(&self) -> DispatchResult<()> {
        match *self {
            Interarrival::Fixed(0) => {
                Err(DispatchError::Config("interarrival must be at least 1 tick".into()))
            }
            Interarrival::Uniform { min, max } if min == 0 || min > max => Err(DispatchError::Config(
                format!("interarrival range {min}..={max} must be non-empty and start at 1 or more"),
            )),
            _ => Ok(()),
        }
    }

    /// Draw the next gap.  `Fixed` never touches the RNG.
    pub fn next_gap(&self, rng: &mut SimRng) -> u64 {
        match *self {
            Interarrival::Fixed(ticks) => ticks,
            Interarrival::Uniform { min, max } => rng.gen_range(min..=max),
        }
    }
}

// ── CallSource ────────────────────────────────────────────────────────────────

/// Generates calls with a uniformly sampled, distinct origin and destination
/// in `[1, floor_count]`.
#[derive(Clone, Debug)]
pub struct CallSource {
    floor_count:  Floor,
    interarrival: Interarrival,
}

impl CallSource {
    pub fn new(floor_count: Floor, interarrival: Interarrival) -> DispatchResult<Self> {
        if floor_count < 2 {
            return Err(DispatchError::Config(format!(
                "random calls need at least 2 floors, got {floor_count}"
            )));
        }
        interarrival.validate()?;
        Ok(Self { floor_count, interarrival })
    }

    #[inline] pub fn floor_count(&self) -> Floor { self.floor_count }
    #[inline] pub fn interarrival(&self) -> Interarrival { self.interarrival }

    /// Ticks to wait before the next call.
    pub fn next_gap(&self, rng: &mut SimRng) -> u64 {
        self.interarrival.next_gap(rng)
    }

    /// Create one call at `now`, taking its id from `ids`.
    pub fn generate(&self, ids: &mut CallIdAllocator, now: Tick, rng: &mut SimRng) -> DispatchResult<Call> {
        let pair = rng.sample_distinct(self.floor_count as usize, 2);
        let (origin, destination) = (pair[0] as Floor + 1, pair[1] as Floor + 1);
        let call = Call::new(ids.allocate(), origin, destination, now)?;
        call.check_bounds(1, self.floor_count)?;
        Ok(call)
    }
}
