use chrono::{DateTime, Duration, Utc};

use footify_types::{
    player::{Player, PlayerId},
    position::Position,
};

// name, age, position, rating, shirt number, goals
const SAMPLE_PLAYERS: [(&str, i32, Position, f64, i32, u32); 7] = [
    ("Lionel Messi", 37, Position::CenterForward, 8.7, 10, 851),
    ("Paulo Dybala", 30, Position::CentralAttackingMidfielder, 8.1, 21, 120),
    ("Cristiano Ronaldo", 39, Position::Striker, 7.9, 7, 900),
    ("Lamine Yamal", 17, Position::RightWinger, 9.4, 19, 5),
    ("Pedri", 21, Position::CentralMidfielder, 9.0, 8, 15),
    ("Radu Dragusin", 22, Position::CenterBack, 7.3, 4, 2),
    ("Florinel Coman", 26, Position::LeftMidfielder, 8.4, 11, 45),
];

/// The starter roster, ids 1 to 7.
///
/// Creation times are one second apart counting down from `base + 7s`,
/// so the list is already in newest-first order.
pub fn sample_roster(base: DateTime<Utc>) -> Vec<Player> {
    let count = SAMPLE_PLAYERS.len() as i64;

    SAMPLE_PLAYERS
        .iter()
        .enumerate()
        .map(|(i, &(name, age, position, rating, shirt_number, goals))| {
            let created_at = base + Duration::seconds(count - i as i64);
            Player {
                id: PlayerId::new(i as u64 + 1),
                name: name.to_string(),
                age,
                position,
                rating,
                shirt_number,
                goals,
                images: Default::default(),
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;

    #[test]
    fn test_sample_roster_is_newest_first() {
        let players = sample_roster(Utc::now());
        assert_eq!(players.len(), 7);

        let roster = Roster::from_players(players.clone());
        assert_eq!(roster.players(), players.as_slice());
        assert_eq!(roster.players()[0].name, "Lionel Messi");
    }

    #[test]
    fn test_sample_players_pass_range_rules() {
        for player in sample_roster(Utc::now()) {
            assert!((14..=50).contains(&player.age), "{}", player.name);
            assert!((0..=99).contains(&player.shirt_number), "{}", player.name);
            assert!((0.0..=10.0).contains(&player.rating), "{}", player.name);
        }
    }
}
