use std::{
    io::{self, Write},
    sync::Arc,
};

use chrono::Utc;

use footify_app::{config::Config, durable::DurablePlayerStore, sample::sample_roster};
use footify_db::{SqlitePlayerRepository, establish_connection_pool};
use footify_types::{Result, errors::ApplicationError, player::Player};

mod logs;
use logs::setup_logging;

/// Boots a durable store against the configured database and prints the
/// roster, filtered by the optional query argument, as JSON lines.
#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    setup_logging();
    let config = Config::from_env();
    let store = setup_store(&config).await?;

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let players = store.search_players(&query);
    tracing::info!("{} of {} players match {query:?}", players.len(), store.all_players().len());

    print_players(&players)
}

async fn setup_store(config: &Config) -> Result<DurablePlayerStore, ApplicationError> {
    let pool = establish_connection_pool(&config.database_url).await?;
    let repository = Arc::new(SqlitePlayerRepository::new(pool));
    let store = DurablePlayerStore::start(repository);

    let loaded = store.load().outcome().await?;
    tracing::info!("Loaded {loaded} players from {}", config.database_url);

    if config.seed_sample_roster {
        match store.seed_if_empty(sample_roster(Utc::now())).outcome().await? {
            0 => tracing::info!("Roster already populated. Skipping sample seed."),
            n => tracing::info!("Sample roster seeded with {n} players."),
        }
    }

    if let Some(notice) = store.notice() {
        tracing::error!("{notice}");
    }

    Ok(store)
}

fn print_players(players: &[Player]) -> Result<(), ApplicationError> {
    let mut stdout = io::stdout().lock();
    for player in players {
        let line = serde_json::to_string(player)
            .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;
        writeln!(stdout, "{line}").map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;
    }
    Ok(())
}
