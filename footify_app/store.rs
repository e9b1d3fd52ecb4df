use chrono::Utc;
use tracing::debug;

use footify_types::{
    Result,
    player::{NewPlayer, Player, PlayerId},
};

use crate::{
    roster::{Roster, Snapshot},
    sample::sample_roster,
    subscribers::{SubscriptionId, Subscribers},
};

/// In-memory player store.
///
/// Owns the canonical list and the active search query. Every change is
/// applied immediately and published to subscribers before the call
/// returns. Range checks on age and shirt number are the caller's job
/// (see [`crate::validation`]); the store takes any integer.
pub struct PlayerStore {
    roster: Roster,
    subscribers: Subscribers,
}

impl PlayerStore {
    pub fn new() -> Self {
        Self::with_players(Vec::new())
    }

    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            roster: Roster::from_players(players),
            subscribers: Subscribers::new(),
        }
    }

    pub fn with_sample_roster() -> Self {
        Self::with_players(sample_roster(Utc::now()))
    }

    /// Canonical list, most recently created first.
    pub fn all_players(&self) -> &[Player] {
        self.roster.players()
    }

    pub fn player_by_id(&self, player_id: PlayerId) -> Option<&Player> {
        self.roster.get(player_id)
    }

    /// Players matching the active query.
    pub fn filtered_players(&self) -> Vec<Player> {
        self.roster.filtered()
    }

    pub fn query(&self) -> &str {
        self.roster.query()
    }

    /// Adds a player under a fresh id. Any integer is accepted for age and
    /// shirt number; the only failure is running out of ids.
    pub fn add_player(&mut self, new_player: NewPlayer) -> Result<Player> {
        let id = self.roster.allocate_id()?;
        let player = Player::new(id, new_player, Utc::now());

        self.roster.insert(player.clone())?;
        debug!(player_id = %player.id, "Player added: {}", player.name);

        self.publish();
        Ok(player)
    }

    /// Replaces the player with the same id. The stored creation time is
    /// kept and the update time refreshed.
    pub fn update_player(&mut self, updated: Player) -> Result<Player> {
        let revised = self.roster.revise(&updated, Utc::now())?;
        self.roster.replace(revised.clone())?;
        debug!(player_id = %revised.id, "Player updated: {}", revised.name);

        self.publish();
        Ok(revised)
    }

    pub fn delete_player_by_id(&mut self, player_id: PlayerId) -> Result<Player> {
        let removed = self.roster.remove(player_id)?;
        debug!(player_id = %player_id, "Player deleted: {}", removed.name);

        self.publish();
        Ok(removed)
    }

    /// Sets the active query and returns the recomputed filtered view.
    pub fn search_players(&mut self, query: &str) -> Vec<Player> {
        self.roster.set_query(query);
        self.publish();
        self.roster.filtered()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.roster.snapshot()
    }

    fn publish(&self) {
        self.subscribers.publish(&self.roster.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use footify_types::{errors::StoreError, position::Position};

    use super::*;
    use crate::test_utils::tests::{PlayerFactoryOptions, player_factory};

    fn pedri() -> NewPlayer {
        NewPlayer {
            name: "Pedri".to_string(),
            age: 21,
            shirt_number: 8,
            position: Position::CentralMidfielder,
        }
    }

    fn names(players: &[Player]) -> Vec<&str> {
        players.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_add_then_get_roundtrip() {
        let mut store = PlayerStore::new();
        let added = store.add_player(pedri()).unwrap();

        let found = store.player_by_id(added.id).unwrap();
        assert_eq!(found, &added);
        assert_eq!(found.name, "Pedri");
        assert_eq!(found.age, 21);
        assert_eq!(found.shirt_number, 8);
        assert_eq!(found.position, Position::CentralMidfielder);
        assert_eq!(found.rating, 5.0);
        assert_eq!(found.goals, 0);
        assert_eq!(found.created_at, found.updated_at);
    }

    #[test]
    fn test_newest_player_comes_first() {
        let mut store = PlayerStore::with_sample_roster();
        let added = store.add_player(pedri()).unwrap();

        assert_eq!(store.all_players().len(), 8);
        assert_eq!(store.all_players()[0].id, added.id);
        assert_eq!(added.id, PlayerId::new(8));
    }

    #[test]
    fn test_out_of_range_input_is_stored_as_is() {
        let mut store = PlayerStore::new();
        let added = store
            .add_player(NewPlayer {
                name: "Nobody".to_string(),
                age: i32::MIN,
                shirt_number: i32::MAX,
                position: Position::Goalkeeper,
            })
            .unwrap();

        assert_eq!(store.player_by_id(added.id).unwrap().age, i32::MIN);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = PlayerStore::new();
        let first = store.add_player(pedri()).unwrap();
        let second = store.add_player(pedri()).unwrap();
        store.delete_player_by_id(second.id).unwrap();

        let third = store.add_player(pedri()).unwrap();
        assert_ne!(third.id, first.id);
        assert_ne!(third.id, second.id);
    }

    #[test]
    fn test_update_preserves_creation_and_refreshes_update_time() {
        let mut store = PlayerStore::new();
        let added = store.add_player(pedri()).unwrap();

        let updated = store
            .update_player(Player {
                goals: 15,
                rating: 9.0,
                created_at: added.created_at + chrono::Duration::days(30),
                ..added.clone()
            })
            .unwrap();

        assert_eq!(updated.created_at, added.created_at);
        assert!(updated.updated_at >= added.updated_at);
        assert_eq!(store.player_by_id(added.id).unwrap().goals, 15);
    }

    #[test]
    fn test_update_unknown_player_leaves_list_untouched() {
        let mut store = PlayerStore::with_sample_roster();
        let before = store.all_players().to_vec();

        let mut ghost = before[0].clone();
        ghost.id = PlayerId::new(999);
        let err = store.update_player(ghost).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.all_players(), before.as_slice());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = PlayerStore::with_sample_roster();
        let id = store.all_players()[0].id;

        store.delete_player_by_id(id).unwrap();
        let err = store.delete_player_by_id(id).unwrap_err();

        assert!(matches!(
            err,
            footify_types::errors::ApplicationError::Store(StoreError::PlayerNotFound(_))
        ));
        assert_eq!(store.all_players().len(), 6);
        assert!(store.player_by_id(id).is_none());
    }

    #[test]
    fn test_search_scenario() {
        let mut store = PlayerStore::new();
        store
            .add_player(NewPlayer {
                name: "Paulo Dybala".to_string(),
                ..pedri()
            })
            .unwrap();
        store
            .add_player(NewPlayer {
                name: "Lionel Messi".to_string(),
                ..pedri()
            })
            .unwrap();

        assert_eq!(names(&store.search_players("Me")), vec!["Lionel Messi"]);
        assert_eq!(names(&store.search_players("P")), vec!["Paulo Dybala"]);
        assert!(store.search_players("xyz").is_empty());
        assert_eq!(store.search_players("").len(), 2);
    }

    #[test]
    fn test_filtered_view_follows_mutations() {
        let mut store = PlayerStore::with_sample_roster();
        store.search_players("l");
        let before = store.filtered_players().len();

        store
            .add_player(NewPlayer {
                name: "Robert Lewandowski".to_string(),
                ..pedri()
            })
            .unwrap();
        assert_eq!(store.filtered_players().len(), before + 1);
        assert_eq!(store.query(), "l");
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let mut store = PlayerStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let id = {
            let seen = seen.clone();
            store.subscribe(move |s| seen.lock().unwrap().push(s.players.len()))
        };

        let added = store.add_player(pedri()).unwrap();
        store.search_players("pe");
        store.delete_player_by_id(added.id).unwrap();
        assert!(store.delete_player_by_id(added.id).is_err());

        assert_eq!(*seen.lock().unwrap(), vec![1, 1, 0]);

        assert!(store.unsubscribe(id));
        store.add_player(pedri()).unwrap();
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_add_after_last_id_reports_exhaustion() {
        let mut store = PlayerStore::with_players(vec![player_factory(PlayerFactoryOptions {
            id: Some(u64::MAX),
            ..Default::default()
        })]);
        let seen = Arc::new(Mutex::new(0));
        {
            let seen = seen.clone();
            store.subscribe(move |_| *seen.lock().unwrap() += 1);
        }

        let err = store.add_player(pedri()).unwrap_err();

        assert!(matches!(
            err,
            footify_types::errors::ApplicationError::Store(StoreError::IdsExhausted)
        ));
        assert_eq!(store.all_players().len(), 1);
        assert_eq!(*seen.lock().unwrap(), 0);
    }

    #[test]
    fn test_independent_instances() {
        let mut a = PlayerStore::new();
        let b = PlayerStore::new();
        a.add_player(pedri()).unwrap();

        assert_eq!(a.all_players().len(), 1);
        assert!(b.all_players().is_empty());
    }
}
