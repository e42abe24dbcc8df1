use super::ProcessId;
use thiserror::Error;

/// Errors returned by the timer registry.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The handle was never issued by this registry, was issued before the
    /// last reset, or the clock reported an instant before the start.
    #[error("invalid performance operation: process {0} is not tracked")]
    InvalidHandle(ProcessId),
}

pub type Result<T> = std::result::Result<T, Error>;
