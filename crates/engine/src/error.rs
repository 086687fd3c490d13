//! Error types for the engine crate.

use catalog::{DataLoadError, UserId, VideoId};
use thiserror::Error;

/// The two failure categories callers need to tell apart.
///
/// Anything else the engine reports ("already present", "not found",
/// "nothing to suggest") is an ordinary return value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required argument was absent
    NullReference,
    /// An argument was present but unusable
    InvalidArgument,
}

/// Errors raised by engine operations. None of them leave partial effects.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A required video, episode or user was not supplied
    #[error("Missing required argument: {name}")]
    MissingArgument { name: &'static str },

    /// A star value outside the accepted range for the operation
    #[error("Rating {value} is out of range ({min}..={max})")]
    RatingOutOfRange { value: i32, min: i32, max: i32 },

    /// Clearing a rating that is not on record
    #[error("User {user} has no active rating for video {video}")]
    NoActiveRating { user: UserId, video: VideoId },

    /// Seed data listed the same video id twice
    #[error("Duplicate video id {id} in seed data")]
    DuplicateVideo { id: VideoId },

    /// Seed data failed to load or validate
    #[error("Failed to load seed data: {0}")]
    Load(#[from] DataLoadError),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::MissingArgument { .. } => ErrorKind::NullReference,
            EngineError::RatingOutOfRange { .. }
            | EngineError::NoActiveRating { .. }
            | EngineError::DuplicateVideo { .. }
            | EngineError::Load(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;

/// Unwrap a nullable argument or fail with `MissingArgument`
pub(crate) fn required<T>(value: Option<T>, name: &'static str) -> Result<T> {
    value.ok_or(EngineError::MissingArgument { name })
}
