//! Deterministic fixtures for unit tests.

use std::collections::BTreeMap;

use super::config::GameConfiguration;
use super::deck::{DeckState, FASCIST_CARDS, LIBERAL_CARDS};
use super::election::ElectionState;
use super::players::{PlayerMap, RoleMap};
use super::state::{EphemeralState, GlobalGameState, RunningGame};
use super::types::{PlayerName, PlayerNumber, PoliciesState, PolicyType, Role};

pub fn name(n: u32) -> PlayerName {
    format!("p{n}")
}

/// Player 1 is Hitler, the next `fascists` players are plain fascists.
pub fn fixed_roles(players: usize, fascists: usize) -> RoleMap {
    RoleMap::new(
        (1..=players as u32)
            .map(|n| {
                let role = match n as usize {
                    1 => Role::Hitler,
                    n if n <= fascists + 1 => Role::PlainFascist,
                    _ => Role::Liberal,
                };
                (PlayerNumber(n), role)
            })
            .collect::<BTreeMap<_, _>>(),
    )
}

/// The cards left after the given enactments, alternating fascist/liberal.
pub fn remaining_deck(liberal: u32, fascist: u32) -> DeckState {
    let mut liberals = LIBERAL_CARDS - liberal;
    let mut fascists = FASCIST_CARDS - fascist;
    let mut draw = Vec::new();
    while liberals + fascists > 0 {
        if fascists > 0 {
            draw.push(PolicyType::Fascist);
            fascists -= 1;
        }
        if liberals > 0 {
            draw.push(PolicyType::Liberal);
            liberals -= 1;
        }
    }
    DeckState::new(draw, Vec::new())
}

/// Standard board for `players`, ticker on player 1, no pending decision.
pub fn global_with_policies(players: usize, liberal: u32, fascist: u32) -> GlobalGameState {
    let config = GameConfiguration::standard(players).unwrap();
    let names: Vec<PlayerName> = (1..=players as u32).map(name).collect();
    let mut global = GlobalGameState::new(
        config.clone(),
        PlayerMap::from_names(&names),
        fixed_roles(players, config.fascists),
        remaining_deck(liberal, fascist),
        ElectionState::new(PlayerNumber(1)),
    );
    global.policies = PoliciesState { liberal, fascist };
    global
}

pub fn running(global: GlobalGameState, ephemeral: EphemeralState) -> RunningGame {
    RunningGame { global, ephemeral }
}

pub fn policies(global: &GlobalGameState) -> (u32, u32) {
    (global.policies.liberal, global.policies.fascist)
}
