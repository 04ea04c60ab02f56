//! Joining, leaving and starting a game.

use rand::Rng;

use crate::engine::models::{GameEvent, TransitionResult};

use super::deck::DeckState;
use super::election::{begin_election, ElectionState};
use super::players::{PlayerMap, RoleMap};
use super::rejection::Rejection;
use super::state::{GlobalGameState, Lobby};
use super::types::PlayerNumber;

pub fn try_join(lobby: &Lobby, name: &str) -> Result<TransitionResult, Rejection> {
    if lobby.contains(name) {
        return Err(Rejection::AlreadyJoined);
    }
    if lobby.is_full() {
        return Err(Rejection::LobbyFull);
    }
    let mut next = lobby.clone();
    next.players.push(name.to_string());
    Ok(TransitionResult::new(
        next,
        vec![GameEvent::PlayerJoined { name: name.to_string() }],
    ))
}

pub fn try_leave(lobby: &Lobby, name: &str) -> Result<TransitionResult, Rejection> {
    if !lobby.contains(name) {
        return Err(Rejection::NotInLobby);
    }
    let mut next = lobby.clone();
    next.players.retain(|p| p != name);
    Ok(TransitionResult::new(
        next,
        vec![GameEvent::PlayerLeft { name: name.to_string() }],
    ))
}

/// Seats the lobby in join order, deals roles, shuffles the deck and opens
/// the first election with a randomly chosen president.
pub fn start_game<R: Rng + ?Sized>(
    lobby: &Lobby,
    actor: &str,
    rng: &mut R,
) -> Result<TransitionResult, Rejection> {
    if !lobby.contains(actor) {
        return Err(Rejection::ActorNotPlayer);
    }
    let have = lobby.players.len();
    if have < lobby.rules.min_players {
        return Err(Rejection::NotEnoughPlayers { have, need: lobby.rules.min_players });
    }
    let config = lobby
        .rules
        .configuration_for(have)
        .ok_or(Rejection::UnsupportedPlayerCount(have))?;

    let players = PlayerMap::from_names(&lobby.players);
    let numbers: Vec<PlayerNumber> = players.numbers().collect();
    let roles = RoleMap::deal(&numbers, config.fascists, rng);
    let deck = DeckState::standard(rng);
    let first = numbers[rng.gen_range(0..numbers.len())];
    tracing::debug!(players = have, first_president = %first, "game started");

    let global = GlobalGameState::new(config, players, roles, deck, ElectionState::new(first));
    let mut events = vec![GameEvent::GameStarted { players: have }];
    let game = begin_election(global, first, false, &mut events);
    Ok(TransitionResult::new(game, events))
}
