use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

use footify_types::{
    errors::StoreError,
    player::{Player, PlayerId},
};

use crate::search::filter_players;

/// Everything an observer needs to redraw: the canonical list, the filtered
/// view for the active query and any pending storage notice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub filtered: Vec<Player>,
    pub query: String,
    pub notice: Option<String>,
}

/// The canonical list of players plus the active search query.
///
/// Players are kept most recently created first. Ids are handed out by a
/// counter that only moves forward, so a deleted player's id is never
/// given to someone else. The counter is `None` once `u64::MAX` is taken.
#[derive(Debug)]
pub struct Roster {
    players: Vec<Player>,
    query: String,
    next_id: Option<PlayerId>,
    notice: Option<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            query: String::new(),
            next_id: Some(PlayerId::new(1)),
            notice: None,
        }
    }

    pub fn from_players(players: Vec<Player>) -> Self {
        let mut roster = Self::new();
        let dropped = roster.load(players);
        if !dropped.is_empty() {
            warn!(?dropped, "Skipped players with duplicate ids");
        }
        roster
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.get(player_id).is_some()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn filtered(&self) -> Vec<Player> {
        filter_players(&self.players, &self.query)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn allocate_id(&mut self) -> Result<PlayerId, StoreError> {
        let id = self.next_id.ok_or(StoreError::IdsExhausted)?;
        self.next_id = id.checked_next();
        Ok(id)
    }

    fn reserve(&mut self, player_id: PlayerId) {
        if self.next_id.is_some_and(|next| player_id >= next) {
            self.next_id = player_id.checked_next();
        }
    }

    /// Puts a new player at the head of the list.
    pub fn insert(&mut self, player: Player) -> Result<(), StoreError> {
        if self.contains(player.id) {
            return Err(StoreError::DuplicatePlayer(player.id));
        }
        self.reserve(player.id);
        self.players.insert(0, player);
        Ok(())
    }

    /// Merges an edited player with the stored one: the stored creation
    /// time wins and the update time moves to `now`.
    pub fn revise(&self, updated: &Player, now: DateTime<Utc>) -> Result<Player, StoreError> {
        let current = self
            .get(updated.id)
            .ok_or(StoreError::PlayerNotFound(updated.id))?;

        Ok(Player {
            created_at: current.created_at,
            updated_at: now.max(current.created_at),
            ..updated.clone()
        })
    }

    /// Swaps in a player with the same id, keeping its place in the list.
    pub fn replace(&mut self, player: Player) -> Result<(), StoreError> {
        let slot = self
            .players
            .iter_mut()
            .find(|p| p.id == player.id)
            .ok_or(StoreError::PlayerNotFound(player.id))?;
        *slot = player;
        Ok(())
    }

    pub fn remove(&mut self, player_id: PlayerId) -> Result<Player, StoreError> {
        let index = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(StoreError::PlayerNotFound(player_id))?;
        Ok(self.players.remove(index))
    }

    /// Replaces the whole list, ordered by creation time then id, newest first.
    ///
    /// Only the newest player carrying a given id is kept. The ids of the
    /// dropped duplicates are returned.
    pub fn load(&mut self, mut players: Vec<Player>) -> Vec<PlayerId> {
        players.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let mut seen = HashSet::with_capacity(players.len());
        let mut dropped = Vec::new();
        players.retain(|player| {
            let fresh = seen.insert(player.id);
            if !fresh {
                dropped.push(player.id);
            }
            fresh
        });

        for player in &players {
            self.reserve(player.id);
        }
        self.players = players;
        dropped
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            players: self.players.clone(),
            filtered: self.filtered(),
            query: self.query.clone(),
            notice: self.notice.clone(),
        }
    }
}
