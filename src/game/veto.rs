//! Veto negotiation between chancellor and president.
//!
//! `NotRequested → Requested → (approved | Rejected)`. An approved veto
//! discards both policies and counts as a failed government. A rejected veto
//! cannot be requested again for the same agenda.

use rand::Rng;

use crate::engine::models::{GameEvent, TransitionResult};

use super::auth::authorize;
use super::chaos::after_failed_government;
use super::rejection::Rejection;
use super::state::{
    ChancellorPolicyChoicePending, EphemeralState, GlobalGameState, RunningGame, VetoState,
};

/// Requests are refused until the fascist track reaches the veto threshold.
pub fn request_veto(
    global: &GlobalGameState,
    pending: &ChancellorPolicyChoicePending,
    actor: &str,
) -> Result<TransitionResult, Rejection> {
    let government = pending.government;
    authorize(&global.players, actor, government.chancellor)?;
    match pending.veto {
        VetoState::NotRequested => {}
        VetoState::Requested => return Err(Rejection::VetoPending),
        VetoState::Rejected => return Err(Rejection::VetoAlreadyUsed),
    }
    if !global.config.veto_unlocked(global.policies.fascist) {
        return Err(Rejection::VetoNotUnlocked);
    }

    let game = RunningGame {
        global: global.clone(),
        ephemeral: EphemeralState::ChancellorPolicyChoicePending(ChancellorPolicyChoicePending {
            veto: VetoState::Requested,
            ..pending.clone()
        }),
    };
    Ok(TransitionResult::new(game, vec![GameEvent::VetoRequested { government }]))
}

pub fn resolve_veto<R: Rng + ?Sized>(
    global: &GlobalGameState,
    pending: &ChancellorPolicyChoicePending,
    actor: &str,
    approved: bool,
    rng: &mut R,
) -> Result<TransitionResult, Rejection> {
    let government = pending.government;
    authorize(&global.players, actor, government.president)?;
    if pending.veto != VetoState::Requested {
        return Err(Rejection::WrongEphemeralState);
    }

    if !approved {
        let game = RunningGame {
            global: global.clone(),
            ephemeral: EphemeralState::ChancellorPolicyChoicePending(ChancellorPolicyChoicePending {
                veto: VetoState::Rejected,
                ..pending.clone()
            }),
        };
        return Ok(TransitionResult::new(game, vec![GameEvent::VetoRejected { government }]));
    }

    let mut global = global.clone();
    let (deck, reshuffled) = global.deck.after_discarding_all(pending.policies).replenished(rng);
    global.deck = deck;

    let mut events = vec![GameEvent::VetoApproved {
        government,
        election_tracker: global.election.election_tracker + 1,
    }];
    if reshuffled {
        events.push(GameEvent::DeckReshuffled { draw_pile: global.deck.draw_pile().len() });
    }
    let state = after_failed_government(global, rng, &mut events);
    Ok(TransitionResult::new(state, events))
}
