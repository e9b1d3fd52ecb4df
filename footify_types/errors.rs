use thiserror::Error;

pub mod db_error;
pub mod store_error;
pub mod validation_error;

pub use db_error::DbError;
pub use store_error::StoreError;
pub use validation_error::ValidationError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    /// True when the target of an update or delete doesn't exist,
    /// whether the in-memory roster or the storage adapter noticed it.
    /// Callers treat this as a no-op.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApplicationError::Store(StoreError::PlayerNotFound(_))
                | ApplicationError::Db(DbError::PlayerNotFound(_))
        )
    }

    /// Storage failures are surfaced as dismissible notices.
    pub fn is_storage(&self) -> bool {
        matches!(self, ApplicationError::Db(e) if !matches!(e, DbError::PlayerNotFound(_)))
    }
}
