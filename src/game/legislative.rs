//! Legislative session: the president discards one of three policies, the
//! chancellor enacts one of the remaining two.

use crate::engine::models::{GameEvent, TransitionResult};

use super::auth::authorize;
use super::enactment::enact_by_government;
use super::rejection::Rejection;
use super::state::{
    ChancellorPolicyChoicePending, EphemeralState, GlobalGameState, PresidentPolicyChoicePending,
    RunningGame, VetoState,
};

pub fn president_discard(
    global: &GlobalGameState,
    pending: &PresidentPolicyChoicePending,
    actor: &str,
    index: usize,
) -> Result<TransitionResult, Rejection> {
    let government = pending.government;
    authorize(&global.players, actor, government.president)?;
    let discarded = *pending.policies.get(index).ok_or(Rejection::InvalidPolicyIndex(index))?;
    let kept: Vec<_> = pending
        .policies
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, p)| *p)
        .collect();
    let policies = [kept[0], kept[1]];

    let mut global = global.clone();
    global.deck = global.deck.after_discarding(discarded);
    let game = RunningGame {
        global,
        ephemeral: EphemeralState::ChancellorPolicyChoicePending(ChancellorPolicyChoicePending {
            government,
            policies,
            veto: VetoState::NotRequested,
        }),
    };
    Ok(TransitionResult::new(
        game,
        vec![GameEvent::PoliciesPassed { chancellor: government.chancellor, policies }],
    ))
}

pub fn chancellor_enact(
    global: &GlobalGameState,
    pending: &ChancellorPolicyChoicePending,
    actor: &str,
    index: usize,
) -> Result<TransitionResult, Rejection> {
    let government = pending.government;
    authorize(&global.players, actor, government.chancellor)?;
    if pending.veto == VetoState::Requested {
        return Err(Rejection::VetoPending);
    }
    let enacted = *pending.policies.get(index).ok_or(Rejection::InvalidPolicyIndex(index))?;
    let discarded = pending.policies[1 - index];

    let mut global = global.clone();
    global.deck = global.deck.after_discarding(discarded);
    let mut events = Vec::new();
    let state = enact_by_government(global, government.president, enacted, &mut events);
    Ok(TransitionResult::new(state, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::coherence::check_coherence;
    use crate::game::deck::DeckState;
    use crate::game::state::PolicyPending;
    use crate::game::testing::{global_with_policies, name, policies};
    use crate::game::types::{
        FascistPower, Government, LiberalVictory, PendingPower, PlayerNumber, PolicyType, Victory,
    };
    use crate::game::types::PolicyType::{Fascist as F, Liberal as L};

    fn gov() -> Government {
        Government { president: PlayerNumber(2), chancellor: PlayerNumber(3) }
    }

    /// Board with the given enactments and `hand` held by the president.
    fn president_holding(players: usize, liberal: u32, fascist: u32, hand: [PolicyType; 3]) -> GlobalGameState {
        let mut global = global_with_policies(players, liberal, fascist);
        let mut draw = global.deck.draw_pile().to_vec();
        for card in hand {
            let at = draw.iter().position(|p| *p == card).unwrap();
            draw.remove(at);
        }
        global.deck = DeckState::new(draw, vec![]);
        global
    }

    fn chancellor_pending(hand: [PolicyType; 2], veto: VetoState) -> ChancellorPolicyChoicePending {
        ChancellorPolicyChoicePending { government: gov(), policies: hand, veto }
    }

    #[test]
    fn president_discards_one_of_three() {
        let global = president_holding(5, 0, 0, [L, F, F]);
        let pending = PresidentPolicyChoicePending { government: gov(), policies: [L, F, F] };
        let result = president_discard(&global, &pending, &name(2), 0).unwrap();
        let game = result.state.running().unwrap();
        assert_eq!(game.global.deck.discard_pile(), &[L]);
        assert_eq!(
            game.ephemeral,
            EphemeralState::ChancellorPolicyChoicePending(chancellor_pending([F, F], VetoState::NotRequested))
        );
        assert!(check_coherence(game).is_ok());
        assert_eq!(
            result.events,
            vec![GameEvent::PoliciesPassed { chancellor: PlayerNumber(3), policies: [F, F] }]
        );
    }

    #[test]
    fn president_choice_is_guarded() {
        let global = president_holding(5, 0, 0, [L, F, F]);
        let pending = PresidentPolicyChoicePending { government: gov(), policies: [L, F, F] };
        assert_eq!(
            president_discard(&global, &pending, &name(3), 0).unwrap_err(),
            Rejection::Unauthorized
        );
        assert_eq!(
            president_discard(&global, &pending, &name(2), 3).unwrap_err(),
            Rejection::InvalidPolicyIndex(3)
        );
    }

    #[test]
    fn chancellor_enacts_and_new_election_begins() {
        let mut global = president_holding(5, 0, 0, [L, F, F]);
        global.deck = global.deck.after_discarding(F);
        global.election.election_tracker = 2;
        let pending = chancellor_pending([L, F], VetoState::NotRequested);

        let result = chancellor_enact(&global, &pending, &name(3), 0).unwrap();
        let game = result.state.running().unwrap();
        assert_eq!(policies(&game.global), (1, 0));
        assert_eq!(game.global.election.election_tracker, 0);
        assert_eq!(game.global.deck.discard_pile(), &[F, F]);
        assert!(matches!(game.ephemeral, EphemeralState::ChancellorSelectionPending(_)));
        assert!(check_coherence(game).is_ok());
    }

    #[test]
    fn fifth_liberal_policy_ends_the_game() {
        let mut global = president_holding(5, 4, 0, [L, L, F]);
        global.deck = global.deck.after_discarding(F);
        let pending = chancellor_pending([L, L], VetoState::NotRequested);
        let result = chancellor_enact(&global, &pending, &name(3), 1).unwrap();
        assert_eq!(
            result.state.victory(),
            Some(Victory::LiberalsWin(LiberalVictory::LiberalPolicyGoalReached))
        );
    }

    #[test]
    fn scheduled_power_waits_on_president() {
        let mut global = president_holding(5, 0, 3, [F, F, F]);
        global.deck = global.deck.after_discarding(F);
        let pending = chancellor_pending([F, F], VetoState::NotRequested);
        let result = chancellor_enact(&global, &pending, &name(3), 0).unwrap();
        let game = result.state.running().unwrap();
        assert_eq!(
            game.ephemeral,
            EphemeralState::PolicyPending(PolicyPending {
                power: PendingPower::Execution,
                president: PlayerNumber(2),
            })
        );
        assert!(result.events.contains(&GameEvent::PowerActivated {
            power: FascistPower::Execution,
            president: PlayerNumber(2),
        }));
    }

    #[test]
    fn chancellor_waits_for_veto_answer() {
        let global = president_holding(5, 0, 5, [F, F, L]);
        let pending = chancellor_pending([F, F], VetoState::Requested);
        assert_eq!(
            chancellor_enact(&global, &pending, &name(3), 0).unwrap_err(),
            Rejection::VetoPending
        );
        assert_eq!(
            chancellor_enact(&global, &pending, &name(2), 0).unwrap_err(),
            Rejection::Unauthorized
        );
        let pending = chancellor_pending([F, F], VetoState::Rejected);
        assert_eq!(
            chancellor_enact(&global, &pending, &name(3), 2).unwrap_err(),
            Rejection::InvalidPolicyIndex(2)
        );
    }
}
