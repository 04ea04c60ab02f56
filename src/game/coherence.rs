//! Whole-state invariant checks. Not a transition: it only reports.

use thiserror::Error;

use super::deck::{FASCIST_CARDS, LIBERAL_CARDS, STANDARD_DRAW};
use super::state::{GameState, RunningGame};
use super::types::{PolicyType, Role};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoherenceViolation {
    #[error("{policy:?} cards: expected {expected}, found {found}")]
    CardCount { policy: PolicyType, expected: u32, found: u32 },
    #[error("draw pile holds {0} cards outside a policy choice")]
    DrawPileTooSmall(usize),
    #[error("role map does not cover exactly the seated players")]
    RoleMapMismatch,
    #[error("expected exactly one Hitler, found {0}")]
    HitlerCount(usize),
}

/// Every card is accounted for across enacted, draw, discard and in hand.
/// The draw pile holds a full draw unless a policy choice is outstanding.
pub fn check_coherence(game: &RunningGame) -> Result<(), CoherenceViolation> {
    let global = &game.global;
    let in_hand = game.ephemeral.cards_in_hand();

    for (policy, expected) in [(PolicyType::Liberal, LIBERAL_CARDS), (PolicyType::Fascist, FASCIST_CARDS)] {
        let held = in_hand.iter().filter(|p| **p == policy).count() as u32;
        let found = global.policies.count(policy) + global.deck.count(policy) + held;
        if found != expected {
            return Err(CoherenceViolation::CardCount { policy, expected, found });
        }
    }

    let draw = global.deck.draw_pile().len();
    if draw < STANDARD_DRAW && !game.ephemeral.is_policy_choice() {
        return Err(CoherenceViolation::DrawPileTooSmall(draw));
    }

    if !global.roles.players().eq(global.players.numbers()) {
        return Err(CoherenceViolation::RoleMapMismatch);
    }
    let hitlers = global.roles.iter().filter(|(_, r)| *r == Role::Hitler).count();
    if hitlers != 1 {
        return Err(CoherenceViolation::HitlerCount(hitlers));
    }
    Ok(())
}

/// Lobbies and finished games are trivially coherent.
pub fn check_state(state: &GameState) -> Result<(), CoherenceViolation> {
    match state {
        GameState::Running(game) => check_coherence(game),
        GameState::Joining(_) | GameState::Completed(_) => Ok(()),
    }
}
