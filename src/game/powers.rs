//! Resolution of the fascist powers that wait on a presidential choice.

use crate::engine::models::{GameEvent, TransitionResult};

use super::auth::{authorize, resolve_target};
use super::election::{begin_election, next_normal_election};
use super::enactment::game_over;
use super::rejection::Rejection;
use super::state::{GlobalGameState, PolicyPending};
use super::types::{LiberalVictory, PendingPower, PlayerNumber, Role, Victory};

/// Entry point for every pending power. `power` is what the caller believes
/// is pending; a mismatch is an out-of-turn action.
pub fn resolve_power(
    global: &GlobalGameState,
    pending: &PolicyPending,
    power: PendingPower,
    actor: &str,
    target: &str,
) -> Result<TransitionResult, Rejection> {
    if power != pending.power {
        return Err(Rejection::WrongEphemeralState);
    }
    let (president, target) = authorize_power(global, pending, actor, target)?;
    match power {
        PendingPower::InvestigateParty => investigate_party(global, president, target),
        PendingPower::SpecialElection => special_election(global, president, target),
        PendingPower::Execution => execute(global, target),
    }
}

/// Actor must be the president holding the power and the target must be
/// some other seated player.
fn authorize_power(
    global: &GlobalGameState,
    pending: &PolicyPending,
    actor: &str,
    target: &str,
) -> Result<(PlayerNumber, PlayerNumber), Rejection> {
    let president = authorize(&global.players, actor, pending.president)?;
    let target = resolve_target(&global.players, target)?;
    if target == president {
        return Err(Rejection::InvalidTarget);
    }
    Ok((president, target))
}

fn investigate_party(
    global: &GlobalGameState,
    president: PlayerNumber,
    target: PlayerNumber,
) -> Result<TransitionResult, Rejection> {
    if global.powers.investigated.contains(&target) {
        return Err(Rejection::AlreadyInvestigated);
    }
    let party = global.roles.party_of(target);
    let mut global = global.clone();
    global.powers = global.powers.with_investigated(target);

    let mut events = vec![
        GameEvent::PlayerInvestigated { president, target },
        GameEvent::PartyRevealed { president, target, party },
    ];
    let game = next_normal_election(global, &mut events);
    Ok(TransitionResult::new(game, events))
}

fn special_election(
    global: &GlobalGameState,
    president: PlayerNumber,
    candidate: PlayerNumber,
) -> Result<TransitionResult, Rejection> {
    let mut events = vec![GameEvent::SpecialElectionCalled { president, candidate }];
    let game = begin_election(global.clone(), candidate, true, &mut events);
    Ok(TransitionResult::new(game, events))
}

fn execute(global: &GlobalGameState, target: PlayerNumber) -> Result<TransitionResult, Rejection> {
    let mut events = vec![GameEvent::PlayerExecuted { target }];
    if global.roles.role_of(target) == Role::Hitler {
        let state = game_over(Victory::LiberalsWin(LiberalVictory::HitlerKilled), &mut events);
        return Ok(TransitionResult::new(state, events));
    }

    let mut global = global.clone();
    global.players = global.players.without(target);
    global.roles = global.roles.without(target);
    global.assert_roles_match();
    tracing::debug!(%target, living = global.living_players(), "player executed");
    let game = next_normal_election(global, &mut events);
    Ok(TransitionResult::new(game, events))
}
