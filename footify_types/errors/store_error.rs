use thiserror::Error;

use crate::player::PlayerId;

/// Errors raised by the in-memory roster.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Player with ID {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("Player with ID {0} already exists")]
    DuplicatePlayer(PlayerId),

    #[error("No player IDs left to assign")]
    IdsExhausted,
}
