//! Name-prefix search over the roster.

use footify_types::player::Player;

/// Returns the players matching `query`, keeping their relative order.
/// A blank query matches everyone.
pub fn filter_players(players: &[Player], query: &str) -> Vec<Player> {
    if query.trim().is_empty() {
        return players.to_vec();
    }

    players
        .iter()
        .filter(|p| matches_query(p, query))
        .cloned()
        .collect()
}

/// A player matches when their first name, last name or full name starts
/// with the query, ignoring case. Substrings never match.
pub fn matches_query(player: &Player, query: &str) -> bool {
    let (first_name, last_name) = player.name_parts();

    starts_with_ignore_case(first_name, query)
        || starts_with_ignore_case(last_name, query)
        || starts_with_ignore_case(&player.name, query)
}

fn starts_with_ignore_case(candidate: &str, prefix: &str) -> bool {
    candidate.to_lowercase().starts_with(&prefix.to_lowercase())
}
