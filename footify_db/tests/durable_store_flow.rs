use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use footify_app::{durable::DurablePlayerStore, sample::sample_roster};
use footify_db::{SqlitePlayerRepository, establish_test_connection_pool};
use footify_types::{
    Result,
    player::{NewPlayer, Player, PlayerId},
    position::Position,
};

fn names(players: &[Player]) -> Vec<&str> {
    players.iter().map(|p| p.name.as_str()).collect()
}

fn ids(players: &[Player]) -> Vec<PlayerId> {
    players.iter().map(|p| p.id).collect()
}

async fn seeded_store() -> Result<(DurablePlayerStore, Arc<SqlitePlayerRepository>)> {
    let pool = establish_test_connection_pool().await?;
    let repository = Arc::new(SqlitePlayerRepository::new(pool));
    let store = DurablePlayerStore::start(repository.clone());

    store.load().outcome().await?;
    store
        .seed_if_empty(sample_roster(Utc::now() - Duration::minutes(5)))
        .outcome()
        .await?;
    Ok((store, repository))
}

#[tokio::test]
async fn test_seed_then_search_sample_roster() -> Result<()> {
    let (store, _) = seeded_store().await?;

    let players = store.all_players();
    assert_eq!(players.len(), 7);
    assert_eq!(players[0].name, "Lionel Messi");

    assert_eq!(names(&store.search_players("dyb")), vec!["Paulo Dybala"]);
    assert_eq!(names(&store.search_players("ya")), vec!["Lamine Yamal"]);
    assert!(store.search_players("xyz").is_empty());
    assert_eq!(store.search_players("  ").len(), 7);
    Ok(())
}

#[tokio::test]
async fn test_mutations_reach_storage() -> Result<()> {
    let (store, repository) = seeded_store().await?;

    let added = store
        .add_player(NewPlayer {
            name: "Jude Bellingham".to_string(),
            age: 21,
            shirt_number: 5,
            position: Position::CentralAttackingMidfielder,
        })
        .outcome()
        .await?;
    assert_eq!(added.id, PlayerId::new(8));
    assert_eq!(store.all_players()[0].id, added.id);

    let updated = store
        .update_player(Player {
            shirt_number: 10,
            ..added.clone()
        })
        .outcome()
        .await?;
    assert_eq!(updated.created_at, added.created_at);
    assert!(updated.updated_at >= updated.created_at);

    store.delete_player_by_id(PlayerId::new(3)).outcome().await?;
    let err = store
        .delete_player_by_id(PlayerId::new(3))
        .outcome()
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.notice(), None);

    let reloaded = DurablePlayerStore::start(repository);
    reloaded.load().outcome().await?;
    let players = reloaded.all_players();

    assert_eq!(ids(&players), ids(&store.all_players()));
    assert_eq!(players, store.all_players());
    assert_eq!(players[0].shirt_number, 10);
    assert!(reloaded.player_by_id(PlayerId::new(3)).is_none());
    Ok(())
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() -> Result<()> {
    let (store, _) = seeded_store().await?;
    let new_player = || NewPlayer {
        name: "Pedri".to_string(),
        age: 21,
        shirt_number: 8,
        position: Position::CentralMidfielder,
    };

    let first = store.add_player(new_player()).outcome().await?;
    store.delete_player_by_id(first.id).outcome().await?;
    let second = store.add_player(new_player()).outcome().await?;

    assert!(second.id > first.id);
    Ok(())
}

#[tokio::test]
async fn test_subscribers_see_committed_writes() -> Result<()> {
    let (store, _) = seeded_store().await?;
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    store.subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.players.len()));

    store.delete_player_by_id(PlayerId::new(1)).outcome().await?;
    store.search_players("P");

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen, vec![6, 6]);
    Ok(())
}
