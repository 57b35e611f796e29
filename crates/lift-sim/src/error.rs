use lift_car::CarError;
use lift_clock::ClockError;
use lift_core::CoreError;
use lift_dispatch::DispatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("session configuration error: {0}")]
    Config(String),

    #[error("session state error: {0}")]
    State(String),

    #[error("scheduler error: {0}")]
    Clock(#[from] ClockError),

    #[error("car error: {0}")]
    Car(#[from] CarError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SimError {
    /// `true` when the run broke an invariant, `false` when it rejected
    /// input (configuration, malformed or unservable calls).
    pub fn is_fatal(&self) -> bool {
        match self {
            SimError::Config(_)   => false,
            SimError::State(_)    => true,
            SimError::Clock(_)    => true,
            SimError::Car(e)      => e.is_fatal(),
            SimError::Dispatch(_) => false,
            SimError::Core(e)     => matches!(e, CoreError::Lifecycle { .. }),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
