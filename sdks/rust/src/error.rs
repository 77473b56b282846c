use tonic::{transport::Error as TransportError, Code, Status};

/// The error type for the SDK.
///
/// This error type is used throughout the SDK to represent all possible errors that can occur.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A Tonic transport error occurred.
    #[error("Tonic transport error: {0}")]
    Transport(#[from] TransportError),
    /// The agent answered with an error status.
    #[error("Tonic error: {0}")]
    Status(#[from] Status),
    /// An error from the core library.
    #[error(transparent)]
    Core(#[from] fboss_core::Error),
}

impl Error {
    /// The status the agent itself answered with, if the call reached the agent and was
    /// rejected there.
    ///
    /// Statuses tonic synthesizes for an unreachable or timed-out agent are not agent errors.
    #[must_use]
    pub fn agent_status(&self) -> Option<&Status> {
        match self {
            Self::Status(status)
                if !matches!(
                    status.code(),
                    Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled
                ) =>
            {
                Some(status)
            }
            _ => None,
        }
    }
}

/// Alias for a `Result` that defaults to [`Error`] as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
