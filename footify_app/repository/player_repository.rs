use footify_types::{
    errors::ApplicationError,
    player::{Player, PlayerId},
};

/// Durable storage for the roster.
///
/// Implementations assign ids on insert and must never hand out an id that
/// was used before, even after a deletion.
#[async_trait::async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Returns every stored player, most recently created first.
    async fn load_all(&self) -> Result<Vec<Player>, ApplicationError>;

    /// Stores a new player and returns the id assigned to it.
    /// The `id` field of the given player is ignored.
    async fn insert(&self, player: &Player) -> Result<PlayerId, ApplicationError>;

    /// Overwrites the stored player with the same id.
    async fn update(&self, player: &Player) -> Result<(), ApplicationError>;

    /// Removes a player by id.
    async fn delete_by_id(&self, player_id: PlayerId) -> Result<(), ApplicationError>;
}
