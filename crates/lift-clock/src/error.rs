use lift_core::{ChannelId, ProcessId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("{0} is not registered with the clock")]
    UnknownProcess(ProcessId),

    #[error("{0} does not exist")]
    UnknownChannel(ChannelId),

    #[error("{0} has finished and cannot be scheduled again")]
    ProcessFinished(ProcessId),

    #[error("{0} already has a pending wake-up")]
    AlreadyScheduled(ProcessId),

    #[error("{0} was popped without a pending wake reason")]
    MissingWake(ProcessId),
}

pub type ClockResult<T> = Result<T, ClockError>;
