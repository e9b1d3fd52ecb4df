use chrono::{DateTime, Utc};

use footify_types::{
    errors::DbError,
    player::{Player, PlayerId},
    position::Position,
};

use crate::models::{self as db_models};

/// Storage form of a player id, or `None` when it can't exist in the table.
pub fn db_id(player_id: PlayerId) -> Option<i64> {
    i64::try_from(player_id.value()).ok()
}

pub fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>, DbError> {
    DateTime::from_timestamp_millis(millis).ok_or(DbError::InvalidTimestamp(millis))
}

fn image_from_column(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

pub fn image_to_column(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

impl TryFrom<db_models::Player> for Player {
    type Error = DbError;

    fn try_from(row: db_models::Player) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id).map_err(|_| DbError::InvalidPlayerId(row.id))?;
        let position = row
            .position
            .parse::<Position>()
            .map_err(DbError::UnknownPosition)?;

        Ok(Player {
            id: PlayerId::new(id),
            name: row.name,
            age: row.age,
            position,
            rating: row.rating,
            shirt_number: row.shirt_number,
            goals: row.goals.clamp(0, u32::MAX as i64) as u32,
            images: [
                image_from_column(row.image),
                image_from_column(row.image1),
                image_from_column(row.image2),
            ],
            created_at: from_millis(row.created_at)?,
            updated_at: from_millis(row.updated_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> db_models::Player {
        db_models::Player {
            id: 4,
            name: "Lamine Yamal".to_string(),
            age: 17,
            position: "RIGHT_WINGER".to_string(),
            rating: 9.4,
            shirt_number: 19,
            goals: 5,
            image: "file:///yamal.png".to_string(),
            image1: String::new(),
            image2: String::new(),
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_500_000,
        }
    }

    #[test]
    fn test_row_to_player() {
        let player = Player::try_from(row()).unwrap();

        assert_eq!(player.id, PlayerId::new(4));
        assert_eq!(player.position, Position::RightWinger);
        assert_eq!(player.primary_image(), Some("file:///yamal.png"));
        assert_eq!(player.images[1], None);
        assert_eq!(to_millis(player.created_at), 1_700_000_000_000);
        assert_eq!(to_millis(player.updated_at), 1_700_000_500_000);
    }

    #[test]
    fn test_bad_rows_are_rejected() {
        let bad_position = db_models::Player {
            position: "LIBERO".to_string(),
            ..row()
        };
        assert!(matches!(
            Player::try_from(bad_position),
            Err(DbError::UnknownPosition(p)) if p == "LIBERO"
        ));

        let bad_id = db_models::Player { id: -1, ..row() };
        assert!(matches!(
            Player::try_from(bad_id),
            Err(DbError::InvalidPlayerId(-1))
        ));
    }

    #[test]
    fn test_db_id_out_of_range() {
        assert_eq!(db_id(PlayerId::new(12)), Some(12));
        assert_eq!(db_id(PlayerId::new(u64::MAX)), None);
    }
}
