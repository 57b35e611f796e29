use lift_core::{CallId, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("dispatch configuration error: {0}")]
    Config(String),

    #[error("no car can serve {call} ({origin} -> {destination})")]
    NoEligibleCar {
        call:        CallId,
        origin:      u32,
        destination: u32,
    },

    #[error("call script parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
