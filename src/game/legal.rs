//! Enumerates the actions the current state would accept.

use crate::engine::models::Action;

use super::election::eligible_chancellors;
use super::state::{EphemeralState, GameState, Lobby, RunningGame, VetoState};
use super::types::{Ballot, PendingPower, PlayerNumber};

/// Every action some participant may take now, across all participants.
/// Joins are omitted from lobbies because outside names are unbounded.
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    match state {
        GameState::Joining(lobby) => lobby_actions(lobby),
        GameState::Running(game) => running_actions(game),
        GameState::Completed(_) => Vec::new(),
    }
}

fn lobby_actions(lobby: &Lobby) -> Vec<Action> {
    let mut actions: Vec<Action> = lobby
        .players
        .iter()
        .map(|name| Action::Leave { name: name.clone() })
        .collect();
    if lobby.rules.configuration_for(lobby.players.len()).is_some() {
        actions.extend(lobby.players.iter().map(|name| Action::Start { actor: name.clone() }));
    }
    actions
}

fn running_actions(game: &RunningGame) -> Vec<Action> {
    let global = &game.global;
    let name = |n: PlayerNumber| -> String {
        global
            .players
            .name_of(n)
            .unwrap_or_else(|| panic!("{n} is not seated"))
            .to_string()
    };

    match &game.ephemeral {
        EphemeralState::ChancellorSelectionPending(p) => {
            let actor = name(p.president_candidate);
            eligible_chancellors(global, p.president_candidate)
                .into_iter()
                .map(|n| Action::NominateChancellor { actor: actor.clone(), nominee: name(n) })
                .collect()
        }
        EphemeralState::VotingOngoing(v) => global
            .players
            .iter()
            .filter(|(n, _)| !v.votes.has_voted(*n))
            .flat_map(|(_, voter)| {
                [Ballot::For, Ballot::Against]
                    .map(|ballot| Action::CastVote { voter: voter.to_string(), ballot })
            })
            .collect(),
        EphemeralState::PresidentPolicyChoicePending(p) => {
            let actor = name(p.government.president);
            (0..p.policies.len())
                .map(|index| Action::PresidentDiscard { actor: actor.clone(), index })
                .collect()
        }
        EphemeralState::ChancellorPolicyChoicePending(p) => match p.veto {
            VetoState::Requested => {
                let actor = name(p.government.president);
                [true, false]
                    .map(|approved| Action::ResolveVeto { actor: actor.clone(), approved })
                    .to_vec()
            }
            VetoState::NotRequested | VetoState::Rejected => {
                let actor = name(p.government.chancellor);
                let mut actions: Vec<Action> = (0..p.policies.len())
                    .map(|index| Action::ChancellorEnact { actor: actor.clone(), index })
                    .collect();
                if p.veto == VetoState::NotRequested
                    && global.config.veto_unlocked(global.policies.fascist)
                {
                    actions.push(Action::RequestVeto { actor });
                }
                actions
            }
        },
        EphemeralState::PolicyPending(p) => {
            let actor = name(p.president);
            global
                .players
                .numbers()
                .filter(|n| *n != p.president)
                .filter(|n| {
                    p.power != PendingPower::InvestigateParty
                        || !global.powers.investigated.contains(n)
                })
                .map(|n| Action::ResolvePower { power: p.power, actor: actor.clone(), target: name(n) })
                .collect()
        }
    }
}
