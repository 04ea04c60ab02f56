//! Concurrent updates through the reference store.

use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;

use secret_hitler_engine::engine::models::{Action, GameEvent};
use secret_hitler_engine::game::state::{EphemeralState, Lobby};
use secret_hitler_engine::game::types::Ballot;
use secret_hitler_engine::game::{legal_actions, GameState, Rejection};
use secret_hitler_engine::store::{try_apply, GameId, GameStore, InMemoryGameStore};

fn lobby(store: &InMemoryGameStore, id: GameId) -> Lobby {
    match store.get(id) {
        Some(GameState::Joining(lobby)) => lobby,
        other => panic!("expected a lobby, got {other:?}"),
    }
}

fn started_game(store: &InMemoryGameStore, players: usize, seed: u64) -> GameId {
    let id = store.create(GameState::Joining(Lobby::default()));
    let mut rng = StdRng::seed_from_u64(seed);
    for i in 0..players {
        try_apply(store, id, &Action::Join { name: format!("p{i}") }, &mut rng).unwrap();
    }
    try_apply(store, id, &Action::Start { actor: "p0".to_string() }, &mut rng).unwrap();
    id
}

#[test]
fn concurrent_joins_lose_no_updates() {
    let store = InMemoryGameStore::new();
    let id = store.create(GameState::Joining(Lobby::default()));
    let capacity = lobby(&store, id).rules.max_players;

    let results: Vec<Result<_, Rejection>> = thread::scope(|s| {
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = &store;
                s.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(i);
                    try_apply(store, id, &Action::Join { name: format!("p{i}") }, &mut rng)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let joined = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(joined, capacity);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|r| *r == Rejection::LobbyFull));

    let lobby = lobby(&store, id);
    assert_eq!(lobby.players.len(), capacity);
    assert_eq!(store.version(id), Some(capacity as u64));
}

#[test]
fn concurrent_votes_resolve_once() {
    let store = InMemoryGameStore::new();
    let id = started_game(&store, 7, 11);
    let state = store.get(id).unwrap();
    let nomination = legal_actions(&state)
        .into_iter()
        .find(|a| matches!(a, Action::NominateChancellor { .. }))
        .unwrap();
    try_apply(&store, id, &nomination, &mut StdRng::seed_from_u64(0)).unwrap();

    let voters: Vec<String> = state
        .running()
        .unwrap()
        .global
        .players
        .iter()
        .map(|(_, name)| name.to_string())
        .collect();
    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = voters
            .iter()
            .enumerate()
            .map(|(i, voter)| {
                let store = &store;
                s.spawn(move || {
                    let action = Action::CastVote { voter: voter.clone(), ballot: Ballot::For };
                    try_apply(store, id, &action, &mut StdRng::seed_from_u64(i as u64)).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let elections = results
        .iter()
        .flat_map(|r| &r.events)
        .filter(|e| matches!(e, GameEvent::GovernmentElected { .. }))
        .count();
    assert_eq!(elections, 1);

    let after = store.get(id).unwrap();
    assert!(matches!(
        after.running().unwrap().ephemeral,
        EphemeralState::PresidentPolicyChoicePending(_)
    ));
}

#[test]
fn independent_games_do_not_interfere() {
    let store = InMemoryGameStore::new();
    let ids: Vec<GameId> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|seed| {
                let store = &store;
                s.spawn(move || started_game(store, 5 + (seed as usize % 6), seed))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(store.len(), 8);
    for (seed, id) in ids.iter().enumerate() {
        let game = store.get(*id).unwrap();
        let running = game.running().unwrap();
        assert_eq!(running.global.players.len(), 5 + seed % 6);
        assert_eq!(store.version(*id), Some(running.global.players.len() as u64 + 1));
    }
}

#[test]
fn snapshot_restores_running_games() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.json");
    let store = InMemoryGameStore::new();
    let ids: Vec<GameId> = (0..3).map(|seed| started_game(&store, 6, seed)).collect();
    store.save(&path).unwrap();

    let restored = InMemoryGameStore::load(&path).unwrap();
    for id in &ids {
        assert_eq!(restored.get(*id), store.get(*id));
    }

    // Play on from the restored copy.
    let state = restored.get(ids[0]).unwrap();
    let action = legal_actions(&state).into_iter().next().unwrap();
    try_apply(&restored, ids[0], &action, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_ne!(restored.get(ids[0]), store.get(ids[0]));
}
