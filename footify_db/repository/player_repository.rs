use tracing::debug;

use footify_app::repository::PlayerRepository;
use footify_types::{
    Result,
    errors::{ApplicationError, DbError},
    player::{Player, PlayerId},
};

use crate::{
    connection::DbPool,
    mapping::{db_id, image_to_column, to_millis},
    models::{self as db_models},
};

const SELECT_PLAYERS: &str = r#"
    SELECT id, name, age, position, rating, shirt_number, goals,
           image, image1, image2, created_at, updated_at
    FROM players
    ORDER BY created_at DESC, id DESC
"#;

fn db_error(e: sqlx::Error) -> ApplicationError {
    ApplicationError::Db(DbError::Database(e))
}

/// Implements PlayerRepository on top of a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqlitePlayerRepository {
    pool: DbPool,
}

impl SqlitePlayerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    async fn load_all(&self) -> Result<Vec<Player>, ApplicationError> {
        let rows = sqlx::query_as::<_, db_models::Player>(SELECT_PLAYERS)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        let players = rows
            .into_iter()
            .map(Player::try_from)
            .collect::<Result<Vec<_>, DbError>>()?;

        debug!("Loaded {} players from storage", players.len());
        Ok(players)
    }

    async fn insert(&self, player: &Player) -> Result<PlayerId, ApplicationError> {
        let result = sqlx::query(
            r#"
              INSERT INTO players (
                  name, age, position, rating, shirt_number, goals,
                  image, image1, image2, created_at, updated_at
              )
              VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(&player.name)
        .bind(player.age)
        .bind(player.position.as_key())
        .bind(player.rating)
        .bind(player.shirt_number)
        .bind(i64::from(player.goals))
        .bind(image_to_column(&player.images[0]))
        .bind(image_to_column(&player.images[1]))
        .bind(image_to_column(&player.images[2]))
        .bind(to_millis(player.created_at))
        .bind(to_millis(player.updated_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        let rowid = result.last_insert_rowid();
        let id = u64::try_from(rowid).map_err(|_| DbError::InvalidPlayerId(rowid))?;
        Ok(PlayerId::new(id))
    }

    async fn update(&self, player: &Player) -> Result<(), ApplicationError> {
        let not_found = || ApplicationError::Db(DbError::PlayerNotFound(player.id));
        let id = db_id(player.id).ok_or_else(not_found)?;

        let result = sqlx::query(
            r#"
              UPDATE players
              SET
                  name = ?, age = ?, position = ?, rating = ?, shirt_number = ?,
                  goals = ?, image = ?, image1 = ?, image2 = ?,
                  created_at = ?, updated_at = ?
              WHERE id = ?
              "#,
        )
        .bind(&player.name)
        .bind(player.age)
        .bind(player.position.as_key())
        .bind(player.rating)
        .bind(player.shirt_number)
        .bind(i64::from(player.goals))
        .bind(image_to_column(&player.images[0]))
        .bind(image_to_column(&player.images[1]))
        .bind(image_to_column(&player.images[2]))
        .bind(to_millis(player.created_at))
        .bind(to_millis(player.updated_at))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    async fn delete_by_id(&self, player_id: PlayerId) -> Result<(), ApplicationError> {
        let not_found = || ApplicationError::Db(DbError::PlayerNotFound(player_id));
        let id = db_id(player_id).ok_or_else(not_found)?;

        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
