//! Fixed lists of timed calls.
//!
//! A script replaces the random [`CallSource`][crate::CallSource] when a run
//! must replay exact arrivals, as in scenario tests or recorded traffic.

use lift_core::{CoreError, Floor, Tick};

use crate::DispatchResult;

/// One call to inject at `at`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptedCall {
    pub at:          Tick,
    pub origin:      Floor,
    pub destination: Floor,
}

impl ScriptedCall {
    pub fn new(at: Tick, origin: Floor, destination: Floor) -> Self {
        Self { at, origin, destination }
    }
}

/// Timed calls, kept sorted by arrival time.  Calls sharing a tick keep
/// their insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallScript {
    calls: Vec<ScriptedCall>,
}

impl CallScript {
    pub fn new(mut calls: Vec<ScriptedCall>) -> Self {
        calls.sort_by_key(|c| c.at);
        Self { calls }
    }

    pub fn calls(&self) -> &[ScriptedCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Check every call against a building of `floor_count` floors.
    pub fn validate(&self, floor_count: Floor) -> DispatchResult<()> {
        for (row, c) in self.calls.iter().enumerate() {
            if c.origin == c.destination {
                return Err(CoreError::InvalidCall(format!(
                    "script row {row}: origin and destination are both floor {}",
                    c.origin
                ))
                .into());
            }
            for floor in [c.origin, c.destination] {
                if floor < 1 || floor > floor_count {
                    return Err(CoreError::InvalidCall(format!(
                        "script row {row}: floor {floor} is outside 1..={floor_count}"
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<ScriptedCall> for CallScript {
    fn from_iter<I: IntoIterator<Item = ScriptedCall>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
