use lift_core::{CarId, CoreError, Floor};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarError {
    #[error("car configuration error: {0}")]
    Config(String),

    #[error("invalid call: {0}")]
    InvalidCall(String),

    #[error("floor {floor} is outside service range {lower}..={upper}")]
    InvalidFloor {
        floor: Floor,
        lower: Floor,
        upper: Floor,
    },

    #[error("{car} is at capacity {capacity}")]
    Capacity {
        car:      CarId,
        capacity: u32,
    },

    #[error("{car} state violation: {reason}")]
    State {
        car:    CarId,
        reason: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CarError {
    /// `true` for invariant breaches discovered while the simulation runs,
    /// as opposed to rejected input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CarError::Capacity { .. } | CarError::State { .. } | CarError::InvalidFloor { .. })
    }
}

pub type CarResult<T> = Result<T, CarError>;
