use thiserror::Error;

use crate::player::PlayerId;

/// Errors for storage stuff.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Player with ID {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("Invalid player ID {0}")]
    InvalidPlayerId(i64),

    #[error("Unknown position '{0}'")]
    UnknownPosition(String),

    #[error("Invalid timestamp {0}")]
    InvalidTimestamp(i64),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}
