//! Service-level error classification.

use crate::api::ResponseStatus;
use crate::db::RepositoryError;
use crate::models::VillaId;

/// Message returned when a create collides with an existing villa name.
pub const DUPLICATE_VILLA_MESSAGE: &str = "Villa already exists!";

pub type VillaResult<T> = Result<T, VillaError>;

/// Why a villa operation failed.
///
/// Expected conditions get their own variant; anything the store reports
/// unexpectedly travels as [`VillaError::Store`].
#[derive(Debug, thiserror::Error)]
pub enum VillaError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Villa {0} not found")]
    NotFound(VillaId),

    #[error("{}", DUPLICATE_VILLA_MESSAGE)]
    DuplicateResource,

    #[error(transparent)]
    Store(RepositoryError),
}

impl VillaError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Status code carried by the failure envelope.
    pub fn status(&self) -> ResponseStatus {
        match self {
            Self::InvalidInput(_) | Self::DuplicateResource => ResponseStatus::BadRequest,
            Self::NotFound(_) => ResponseStatus::NotFound,
            Self::Store(err) if err.is_not_found() => ResponseStatus::NotFound,
            Self::Store(_) => ResponseStatus::InternalServerError,
        }
    }

    /// True for faults the caller could not have prevented.
    pub fn is_unexpected(&self) -> bool {
        self.status() == ResponseStatus::InternalServerError
    }
}

impl From<RepositoryError> for VillaError {
    fn from(err: RepositoryError) -> Self {
        if err.is_duplicate_key() {
            Self::DuplicateResource
        } else {
            Self::Store(err)
        }
    }
}
