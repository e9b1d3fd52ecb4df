use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};

use crate::position::Position;

/// Rating given to every newly added player.
pub const DEFAULT_RATING: f64 = 5.0;

/// How many image references a player can carry.
pub const IMAGE_SLOTS: usize = 3;

/// Store-assigned player identity. Never reused after a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u64);

impl PlayerId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id after this one, or `None` once the id space is used up.
    pub fn checked_next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(PlayerId)
    }
}

/// Caller-provided fields of a player about to be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub age: i32,
    pub shirt_number: i32,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub age: i32,
    pub position: Position,
    pub rating: f64,
    pub shirt_number: i32,
    pub goals: u32,
    pub images: [Option<String>; IMAGE_SLOTS],
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Builds a fresh player with default rating, no goals and no images.
    pub fn new(id: PlayerId, new_player: NewPlayer, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_player.name,
            age: new_player.age,
            position: new_player.position,
            rating: DEFAULT_RATING,
            shirt_number: new_player.shirt_number,
            goals: 0,
            images: Default::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Splits the trimmed name on its first space.
    ///
    /// "Paulo Dybala" gives `("Paulo", "Dybala")`, a single-word name gives
    /// an empty last name.
    pub fn name_parts(&self) -> (&str, &str) {
        let name = self.name.trim();
        name.split_once(' ').unwrap_or((name, ""))
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images[0].as_deref()
    }

    pub fn rating_tier(&self) -> RatingTier {
        RatingTier::from_rating(self.rating)
    }

    pub fn stats(&self) -> PlayerStats {
        PlayerStats {
            goals: self.goals,
            age: self.age,
            position: self.position,
            rating: self.rating,
        }
    }
}

/// Bucketed rating, used to color badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingTier {
    Excellent,
    VeryGood,
    Good,
    Average,
    Poor,
}

impl RatingTier {
    pub fn from_rating(rating: f64) -> Self {
        match rating {
            r if r >= 9.0 => RatingTier::Excellent,
            r if r >= 8.0 => RatingTier::VeryGood,
            r if r >= 7.0 => RatingTier::Good,
            r if r >= 6.0 => RatingTier::Average,
            _ => RatingTier::Poor,
        }
    }
}

/// Figures shown on a player's stats page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerStats {
    pub goals: u32,
    pub age: i32,
    pub position: Position,
    pub rating: f64,
}

impl PlayerStats {
    pub fn position_abbreviation(&self) -> &'static str {
        self.position.abbreviation()
    }

    /// Rating with a single decimal, e.g. "8.7".
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }
}
