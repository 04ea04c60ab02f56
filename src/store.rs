//! Reference game store and channel bindings.
//!
//! Transitions are pure, so the store serialises updates to one game with an
//! optimistic loop: snapshot the current version, run the transition without
//! holding any lock, and write back only if nobody else got there first.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::models::{Action, TransitionResult};
use crate::game::machine::apply;
use crate::game::rejection::Rejection;
use crate::game::state::GameState;

/// Assigned by the store, never by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "game-{}", self.0)
    }
}

pub type ChannelId = String;

pub trait GameStore: Send + Sync {
    fn get(&self, id: GameId) -> Option<GameState>;

    /// Applies `transition` to the current state of `id`, linearised with
    /// every other update to the same id. `transition` may run more than
    /// once. Returns whether the game existed.
    fn update(&self, id: GameId, transition: &mut dyn FnMut(&GameState) -> GameState) -> bool;

    fn create(&self, initial: GameState) -> GameId;

    fn remove(&self, id: GameId) -> Option<GameState>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot i/o on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot encoding: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
struct Versioned {
    version: u64,
    state: Arc<GameState>,
}

#[derive(Debug, Default)]
struct Games {
    next_id: u64,
    games: HashMap<GameId, Versioned>,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    next_id: u64,
    games: BTreeMap<GameId, GameState>,
}

#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    inner: RwLock<Games>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of committed writes to `id`.
    pub fn version(&self, id: GameId) -> Option<u64> {
        self.read().games.get(&id).map(|v| v.version)
    }

    /// Writes every game as JSON to a temp file next to `path`, then renames
    /// it over `path`.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let snapshot = {
            let guard = self.read();
            Snapshot {
                next_id: guard.next_id,
                games: guard
                    .games
                    .iter()
                    .map(|(id, v)| (*id, v.state.as_ref().clone()))
                    .collect(),
            }
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes).map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        std::fs::rename(&tmp, path).map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
        tracing::info!(path = %path.display(), games = snapshot.games.len(), "saved game snapshot");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let bytes = std::fs::read(path).map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        let next_id = snapshot
            .games
            .keys()
            .map(|id| id.0 + 1)
            .max()
            .unwrap_or(0)
            .max(snapshot.next_id);
        let games = snapshot
            .games
            .into_iter()
            .map(|(id, state)| (id, Versioned { version: 0, state: Arc::new(state) }))
            .collect::<HashMap<_, _>>();
        tracing::info!(path = %path.display(), games = games.len(), "loaded game snapshot");
        Ok(Self { inner: RwLock::new(Games { next_id, games }) })
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Games> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Games> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GameStore for InMemoryGameStore {
    fn get(&self, id: GameId) -> Option<GameState> {
        self.read().games.get(&id).map(|v| v.state.as_ref().clone())
    }

    fn update(&self, id: GameId, transition: &mut dyn FnMut(&GameState) -> GameState) -> bool {
        let mut attempt = 0u32;
        loop {
            let Some(seen) = self.read().games.get(&id).cloned() else {
                return false;
            };
            let next = transition(&seen.state);
            if next == *seen.state {
                return true;
            }

            let mut guard = self.write();
            match guard.games.get_mut(&id) {
                None => return false,
                Some(current) if current.version == seen.version => {
                    current.version += 1;
                    current.state = Arc::new(next);
                    return true;
                }
                Some(current) => {
                    attempt += 1;
                    tracing::debug!(game = %id, attempt, seen = seen.version, current = current.version, "update conflict, retrying");
                }
            }
        }
    }

    fn create(&self, initial: GameState) -> GameId {
        let mut guard = self.write();
        let id = GameId(guard.next_id);
        guard.next_id += 1;
        guard.games.insert(id, Versioned { version: 0, state: Arc::new(initial) });
        tracing::debug!(game = %id, "created game");
        id
    }

    fn remove(&self, id: GameId) -> Option<GameState> {
        let removed = self.write().games.remove(&id)?;
        tracing::debug!(game = %id, "removed game");
        Some(Arc::try_unwrap(removed.state).unwrap_or_else(|shared| shared.as_ref().clone()))
    }
}

/// Runs one action against a stored game. A rejected action leaves the
/// stored state untouched.
pub fn try_apply<R: Rng + ?Sized>(
    store: &dyn GameStore,
    id: GameId,
    action: &Action,
    rng: &mut R,
) -> Result<TransitionResult, Rejection> {
    let mut outcome = None;
    let existed = store.update(id, &mut |state| match apply(state, action, rng) {
        Ok(result) => {
            let next = result.state.clone();
            outcome = Some(Ok(result));
            next
        }
        Err(rejection) => {
            outcome = Some(Err(rejection));
            state.clone()
        }
    });
    if !existed {
        return Err(Rejection::NoSuchGame);
    }
    outcome.unwrap_or(Err(Rejection::NoSuchGame))
}

#[derive(Debug, Default)]
struct Bindings {
    by_channel: HashMap<ChannelId, GameId>,
    by_game: HashMap<GameId, ChannelId>,
}

/// One active game per delivery channel, and one channel per game.
#[derive(Debug, Default)]
pub struct ChannelBindings {
    inner: RwLock<Bindings>,
}

impl ChannelBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails if either the channel or the game is already bound.
    pub fn try_bind(&self, channel: &str, game: GameId) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if guard.by_channel.contains_key(channel) || guard.by_game.contains_key(&game) {
            return false;
        }
        guard.by_channel.insert(channel.to_string(), game);
        guard.by_game.insert(game, channel.to_string());
        true
    }

    pub fn unbind(&self, channel: &str) -> Option<GameId> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let game = guard.by_channel.remove(channel)?;
        guard.by_game.remove(&game);
        Some(game)
    }

    pub fn lookup(&self, channel: &str) -> Option<GameId> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_channel
            .get(channel)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game::state::Lobby;

    fn join(name: &str) -> Action {
        Action::Join { name: name.to_string() }
    }

    #[test]
    fn create_get_remove() {
        let store = InMemoryGameStore::new();
        let a = store.create(GameState::Joining(Lobby::default()));
        let b = store.create(GameState::Joining(Lobby::default()));
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert!(store.remove(a).is_some());
        assert!(store.get(a).is_none());
        assert!(store.remove(a).is_none());
    }

    #[test]
    fn missing_game_is_reported() {
        let store = InMemoryGameStore::new();
        assert!(!store.update(GameId(7), &mut |s| s.clone()));
        assert_eq!(
            try_apply(&store, GameId(7), &join("ann"), &mut StdRng::seed_from_u64(1)).unwrap_err(),
            Rejection::NoSuchGame
        );
    }

    #[test]
    fn rejected_action_does_not_write() {
        let store = InMemoryGameStore::new();
        let id = store.create(GameState::Joining(Lobby::default()));
        let mut rng = StdRng::seed_from_u64(1);
        try_apply(&store, id, &join("ann"), &mut rng).unwrap();
        assert_eq!(store.version(id), Some(1));

        assert_eq!(try_apply(&store, id, &join("ann"), &mut rng).unwrap_err(), Rejection::AlreadyJoined);
        assert_eq!(store.version(id), Some(1));
    }

    #[test]
    fn snapshot_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.json");
        let store = InMemoryGameStore::new();
        let id = store.create(GameState::Joining(Lobby::default()));
        try_apply(&store, id, &join("ann"), &mut StdRng::seed_from_u64(1)).unwrap();
        store.save(&path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = InMemoryGameStore::load(&path).unwrap();
        assert_eq!(loaded.get(id), store.get(id));
        assert_ne!(loaded.create(GameState::Joining(Lobby::default())), id);
    }

    #[test]
    fn bindings_are_one_to_one() {
        let bindings = ChannelBindings::new();
        assert!(bindings.try_bind("general", GameId(1)));
        assert!(!bindings.try_bind("general", GameId(2)));
        assert!(!bindings.try_bind("random", GameId(1)));
        assert_eq!(bindings.lookup("general"), Some(GameId(1)));
        assert_eq!(bindings.unbind("general"), Some(GameId(1)));
        assert_eq!(bindings.lookup("general"), None);
        assert!(bindings.try_bind("random", GameId(1)));
    }
}
