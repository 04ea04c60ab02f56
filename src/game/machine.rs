//! Top-level dispatcher from an untyped [`Action`] onto the typed transitions.

use rand::Rng;

use crate::engine::models::{Action, TransitionResult};

use super::coherence::check_state;
use super::government::{cast_vote, nominate_chancellor};
use super::legislative::{chancellor_enact, president_discard};
use super::lobby::{start_game, try_join, try_leave};
use super::powers::resolve_power;
use super::rejection::Rejection;
use super::state::{EphemeralState as E, GameState, RunningGame};
use super::veto::{request_veto, resolve_veto};

/// Applies `action` to `state`. The input is never modified, so a caller
/// retrying after a lost compare-and-swap can simply call again.
pub fn apply<R: Rng + ?Sized>(
    state: &GameState,
    action: &Action,
    rng: &mut R,
) -> Result<TransitionResult, Rejection> {
    let result = match state {
        GameState::Completed(_) => return Err(Rejection::GameCompleted),
        GameState::Joining(lobby) => match action {
            Action::Join { name } => try_join(lobby, name),
            Action::Leave { name } => try_leave(lobby, name),
            Action::Start { actor } => start_game(lobby, actor, rng),
            _ => Err(Rejection::WrongEphemeralState),
        },
        GameState::Running(game) => apply_running(game, action, rng),
    }?;

    debug_assert!(
        check_state(&result.state).is_ok(),
        "{action:?} produced an incoherent state: {:?}",
        check_state(&result.state)
    );
    Ok(result)
}

fn apply_running<R: Rng + ?Sized>(
    game: &RunningGame,
    action: &Action,
    rng: &mut R,
) -> Result<TransitionResult, Rejection> {
    let global = &game.global;
    match (&game.ephemeral, action) {
        (E::ChancellorSelectionPending(p), Action::NominateChancellor { actor, nominee }) => {
            nominate_chancellor(global, p, actor, nominee)
        }
        (E::VotingOngoing(v), Action::CastVote { voter, ballot }) => {
            cast_vote(global, v, voter, *ballot, rng)
        }
        (E::PresidentPolicyChoicePending(p), Action::PresidentDiscard { actor, index }) => {
            president_discard(global, p, actor, *index)
        }
        (E::ChancellorPolicyChoicePending(p), Action::ChancellorEnact { actor, index }) => {
            chancellor_enact(global, p, actor, *index)
        }
        (E::ChancellorPolicyChoicePending(p), Action::RequestVeto { actor }) => {
            request_veto(global, p, actor)
        }
        (E::ChancellorPolicyChoicePending(p), Action::ResolveVeto { actor, approved }) => {
            resolve_veto(global, p, actor, *approved, rng)
        }
        (E::PolicyPending(p), Action::ResolvePower { power, actor, target }) => {
            resolve_power(global, p, *power, actor, target)
        }
        _ => Err(Rejection::WrongEphemeralState),
    }
}
