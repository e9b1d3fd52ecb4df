#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    };

    use footify_types::{
        errors::{ApplicationError, DbError},
        player::{DEFAULT_RATING, Player, PlayerId},
        position::Position,
    };

    use crate::repository::PlayerRepository;

    #[derive(Default, Clone)]
    pub struct PlayerFactoryOptions<'a> {
        pub id: Option<u64>,
        pub name: Option<&'a str>,
        pub age: Option<i32>,
        pub shirt_number: Option<i32>,
        pub position: Option<Position>,
        pub rating: Option<f64>,
        pub goals: Option<u32>,
        pub created_at: Option<DateTime<Utc>>,
    }

    pub fn player_factory(options: PlayerFactoryOptions) -> Player {
        let created_at = options.created_at.unwrap_or_else(Utc::now);

        Player {
            id: PlayerId::new(options.id.unwrap_or(1)),
            name: options.name.unwrap_or("Test Player").to_string(),
            age: options.age.unwrap_or(25),
            position: options.position.unwrap_or_default(),
            rating: options.rating.unwrap_or(DEFAULT_RATING),
            shirt_number: options.shirt_number.unwrap_or(9),
            goals: options.goals.unwrap_or(0),
            images: Default::default(),
            created_at,
            updated_at: created_at,
        }
    }

    /// In-memory repository. Clones share storage, so a test can keep one
    /// handle to inspect what the store wrote or to make it fail.
    #[derive(Default, Clone)]
    pub struct MockPlayerRepository {
        players: Arc<Mutex<Vec<Player>>>,
        last_id: Arc<AtomicU64>,
        failing: Arc<AtomicBool>,
    }

    impl MockPlayerRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// While set, every call fails with a storage error.
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn stored(&self) -> Vec<Player> {
            self.players.lock().unwrap().clone()
        }

        /// Drops a row behind the store's back.
        pub fn forget(&self, player_id: PlayerId) {
            self.players.lock().unwrap().retain(|p| p.id != player_id);
        }

        fn check(&self) -> Result<(), ApplicationError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ApplicationError::Db(DbError::Unavailable(
                    "mock storage is down".to_string(),
                )));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PlayerRepository for MockPlayerRepository {
        async fn load_all(&self) -> Result<Vec<Player>, ApplicationError> {
            self.check()?;
            let mut players = self.stored();
            players.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| b.id.cmp(&a.id))
            });
            Ok(players)
        }

        async fn insert(&self, player: &Player) -> Result<PlayerId, ApplicationError> {
            self.check()?;
            let id = PlayerId::new(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
            self.players.lock().unwrap().push(Player {
                id,
                ..player.clone()
            });
            Ok(id)
        }

        async fn update(&self, player: &Player) -> Result<(), ApplicationError> {
            self.check()?;
            let mut players = self.players.lock().unwrap();
            let stored = players
                .iter_mut()
                .find(|p| p.id == player.id)
                .ok_or_else(|| ApplicationError::Db(DbError::PlayerNotFound(player.id)))?;
            *stored = player.clone();
            Ok(())
        }

        async fn delete_by_id(&self, player_id: PlayerId) -> Result<(), ApplicationError> {
            self.check()?;
            let mut players = self.players.lock().unwrap();
            let before = players.len();
            players.retain(|p| p.id != player_id);
            if players.len() == before {
                return Err(ApplicationError::Db(DbError::PlayerNotFound(player_id)));
            }
            Ok(())
        }
    }
}
