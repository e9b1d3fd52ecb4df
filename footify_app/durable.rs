//! Store backed by a [`PlayerRepository`].
//!
//! Reads are served from the in-memory roster. Writes go through a queue to
//! a single worker task, which talks to storage, merges the outcome into the
//! roster and publishes a snapshot. Callers get a [`Pending`] handle back
//! right away: await it for the outcome or drop it.

use chrono::{DateTime, Duration, DurationRound, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

use footify_types::{
    Result,
    errors::{ApplicationError, StoreError},
    player::{NewPlayer, Player, PlayerId},
};

use crate::{
    repository::PlayerRepository,
    roster::{Roster, Snapshot},
    subscribers::{SubscriptionId, Subscribers},
};

type Responder<T> = oneshot::Sender<Result<T>>;

enum StoreCommand {
    Load {
        respond: Responder<usize>,
    },
    SeedIfEmpty {
        players: Vec<Player>,
        respond: Responder<usize>,
    },
    Add {
        player: NewPlayer,
        respond: Responder<Player>,
    },
    Update {
        player: Player,
        respond: Responder<Player>,
    },
    Delete {
        player_id: PlayerId,
        respond: Responder<Player>,
    },
}

/// Outcome of a queued store operation.
#[must_use = "await `outcome()` or drop the handle explicitly to fire and forget"]
pub struct Pending<T> {
    rx: oneshot::Receiver<Result<T>>,
}

impl<T> Pending<T> {
    pub async fn outcome(self) -> Result<T> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(ApplicationError::Infrastructure(
                "store worker stopped".to_string(),
            )),
        }
    }
}

/// Drops sub-millisecond precision, which storage does not keep.
fn to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    at.duration_trunc(Duration::milliseconds(1)).unwrap_or(at)
}

fn now_millis() -> DateTime<Utc> {
    to_millis(Utc::now())
}

fn lock(roster: &Mutex<Roster>) -> MutexGuard<'_, Roster> {
    roster.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a repository-backed store. Cheap to clone; all clones share
/// the same roster, subscribers and worker.
#[derive(Clone)]
pub struct DurablePlayerStore {
    roster: Arc<Mutex<Roster>>,
    subscribers: Arc<Subscribers>,
    commands: mpsc::UnboundedSender<StoreCommand>,
}

impl DurablePlayerStore {
    /// Spawns the worker on the current tokio runtime. The roster starts
    /// empty until [`load`](Self::load) completes.
    pub fn start(repository: Arc<dyn PlayerRepository>) -> Self {
        let roster = Arc::new(Mutex::new(Roster::new()));
        let subscribers = Arc::new(Subscribers::new());
        let (commands, queue) = mpsc::unbounded_channel();

        let worker = StoreWorker {
            repository,
            roster: roster.clone(),
            subscribers: subscribers.clone(),
        };
        tokio::spawn(worker.run(queue));

        Self {
            roster,
            subscribers,
            commands,
        }
    }

    pub fn all_players(&self) -> Vec<Player> {
        lock(&self.roster).players().to_vec()
    }

    pub fn player_by_id(&self, player_id: PlayerId) -> Option<Player> {
        lock(&self.roster).get(player_id).cloned()
    }

    pub fn filtered_players(&self) -> Vec<Player> {
        lock(&self.roster).filtered()
    }

    pub fn query(&self) -> String {
        lock(&self.roster).query().to_string()
    }

    pub fn snapshot(&self) -> Snapshot {
        lock(&self.roster).snapshot()
    }

    /// Last storage failure, worded for the user.
    pub fn notice(&self) -> Option<String> {
        lock(&self.roster).notice().map(str::to_string)
    }

    pub fn clear_notice(&self) {
        let snapshot = {
            let mut roster = lock(&self.roster);
            roster.clear_notice();
            roster.snapshot()
        };
        self.subscribers.publish(&snapshot);
    }

    /// Sets the active query. Doesn't touch storage, so the filtered view
    /// is returned immediately.
    pub fn search_players(&self, query: &str) -> Vec<Player> {
        let snapshot = {
            let mut roster = lock(&self.roster);
            roster.set_query(query);
            roster.snapshot()
        };
        self.subscribers.publish(&snapshot);
        snapshot.filtered
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

    /// Reloads the roster from storage. Resolves to the number of players.
    pub fn load(&self) -> Pending<usize> {
        self.dispatch(|respond| StoreCommand::Load { respond })
    }

    /// Inserts `players` when the loaded roster is empty. Resolves to the
    /// number of players actually stored.
    pub fn seed_if_empty(&self, players: Vec<Player>) -> Pending<usize> {
        self.dispatch(|respond| StoreCommand::SeedIfEmpty { players, respond })
    }

    pub fn add_player(&self, player: NewPlayer) -> Pending<Player> {
        self.dispatch(|respond| StoreCommand::Add { player, respond })
    }

    pub fn update_player(&self, player: Player) -> Pending<Player> {
        self.dispatch(|respond| StoreCommand::Update { player, respond })
    }

    pub fn delete_player_by_id(&self, player_id: PlayerId) -> Pending<Player> {
        self.dispatch(|respond| StoreCommand::Delete { player_id, respond })
    }

    fn dispatch<T>(&self, command: impl FnOnce(Responder<T>) -> StoreCommand) -> Pending<T> {
        let (respond, rx) = oneshot::channel();
        if self.commands.send(command(respond)).is_err() {
            // The responder was dropped along with the command, so the
            // pending handle reports the failure.
            error!("Store worker is gone, command dropped");
        }
        Pending { rx }
    }
}

struct StoreWorker {
    repository: Arc<dyn PlayerRepository>,
    roster: Arc<Mutex<Roster>>,
    subscribers: Arc<Subscribers>,
}

impl StoreWorker {
    async fn run(self, mut queue: mpsc::UnboundedReceiver<StoreCommand>) {
        info!("Store worker started.");

        while let Some(command) = queue.recv().await {
            match command {
                StoreCommand::Load { respond } => {
                    let _ = respond.send(self.load().await);
                }
                StoreCommand::SeedIfEmpty { players, respond } => {
                    let _ = respond.send(self.seed_if_empty(players).await);
                }
                StoreCommand::Add { player, respond } => {
                    let _ = respond.send(self.add(player).await);
                }
                StoreCommand::Update { player, respond } => {
                    let _ = respond.send(self.update(player).await);
                }
                StoreCommand::Delete { player_id, respond } => {
                    let _ = respond.send(self.delete(player_id).await);
                }
            }
        }

        debug!("Store worker stopped.");
    }

    /// Applies `change` under the lock, then publishes outside of it.
    fn commit<T>(&self, change: impl FnOnce(&mut Roster) -> T) -> T {
        let (output, snapshot) = {
            let mut roster = lock(&self.roster);
            let output = change(&mut roster);
            (output, roster.snapshot())
        };
        self.subscribers.publish(&snapshot);
        output
    }

    fn report(&self, notice: String) {
        self.commit(|roster| roster.set_notice(notice));
    }

    async fn load(&self) -> Result<usize> {
        match self.repository.load_all().await {
            Ok(players) => {
                let (count, dropped) = self.commit(|roster| {
                    let dropped = roster.load(players);
                    roster.clear_notice();
                    (roster.len(), dropped)
                });
                if !dropped.is_empty() {
                    warn!(?dropped, "Skipped stored players with duplicate ids");
                }
                debug!("Loaded {count} players");
                Ok(count)
            }
            Err(e) => {
                // Keep whatever we had.
                error!("Error loading players: {e}");
                self.report(format!("Failed to load players: {e}"));
                Err(e)
            }
        }
    }

    async fn seed_if_empty(&self, players: Vec<Player>) -> Result<usize> {
        if !lock(&self.roster).is_empty() {
            return Ok(0);
        }

        let mut seeded = Vec::with_capacity(players.len());
        for player in players {
            let player = Player {
                created_at: to_millis(player.created_at),
                updated_at: to_millis(player.updated_at),
                ..player
            };
            match self.repository.insert(&player).await {
                Ok(id) => seeded.push(Player { id, ..player }),
                Err(e) => error!("Error inserting sample player {}: {e}", player.name),
            }
        }

        let count = seeded.len();
        self.commit(|roster| {
            let mut merged = roster.players().to_vec();
            merged.extend(seeded);
            roster.load(merged);
        });
        info!("Seeded {count} sample players");
        Ok(count)
    }

    #[instrument(skip_all, fields(name = %new_player.name))]
    async fn add(&self, new_player: NewPlayer) -> Result<Player> {
        // The repository assigns the real id.
        let draft = Player::new(PlayerId::new(0), new_player, now_millis());

        match self.repository.insert(&draft).await {
            Ok(id) => {
                let player = Player { id, ..draft };
                self.commit(|roster| roster.insert(player.clone()))?;
                debug!(player_id = %id, "Player added");
                Ok(player)
            }
            Err(e) => {
                error!("Error adding player: {e}");
                self.report(format!("Failed to add player: {e}"));
                Err(e)
            }
        }
    }

    #[instrument(skip_all, fields(player_id = %player.id))]
    async fn update(&self, player: Player) -> Result<Player> {
        let revised = lock(&self.roster).revise(&player, now_millis())?;

        if let Err(e) = self.repository.update(&revised).await {
            if !e.is_not_found() {
                error!("Error updating player: {e}");
                self.report(format!("Failed to update player: {e}"));
            }
            return Err(e);
        }

        self.commit(|roster| roster.replace(revised.clone()))?;
        debug!("Player updated");
        Ok(revised)
    }

    #[instrument(skip_all, fields(player_id = %player_id))]
    async fn delete(&self, player_id: PlayerId) -> Result<Player> {
        if !lock(&self.roster).contains(player_id) {
            return Err(StoreError::PlayerNotFound(player_id).into());
        }

        if let Err(e) = self.repository.delete_by_id(player_id).await {
            if !e.is_not_found() {
                error!("Error deleting player: {e}");
                self.report(format!("Failed to delete player: {e}"));
            }
            return Err(e);
        }

        let removed = self.commit(|roster| roster.remove(player_id))?;
        debug!("Player deleted");
        Ok(removed)
    }
}
