//! Policy enactment, victory thresholds and power activation.

use crate::engine::models::{EnactmentSource, GameEvent};

use super::election::next_normal_election;
use super::state::{EphemeralState, GameState, GlobalGameState, PolicyPending, RunningGame};
use super::types::{
    FascistPower, FascistVictory, LiberalVictory, PlayerNumber, PolicyType, Victory,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnactmentOutcome {
    GameOver(Victory),
    Continue(GlobalGameState),
    PowerTriggered(GlobalGameState, FascistPower),
}

/// Counts the policy and checks the win thresholds. A fascist policy that
/// does not win consults the power schedule for the new fascist count.
pub fn after_enacting(global: GlobalGameState, policy: PolicyType) -> EnactmentOutcome {
    enact(global, policy, true)
}

/// Same thresholds, but never triggers a power.
pub fn after_speedy_enacting(global: GlobalGameState, policy: PolicyType) -> EnactmentOutcome {
    enact(global, policy, false)
}

fn enact(mut global: GlobalGameState, policy: PolicyType, with_power: bool) -> EnactmentOutcome {
    global.policies = global.policies.after_enacting(policy);
    let enacted = global.policies.count(policy);
    match policy {
        PolicyType::Liberal if enacted >= global.config.liberal_policy_goal => {
            EnactmentOutcome::GameOver(Victory::LiberalsWin(LiberalVictory::LiberalPolicyGoalReached))
        }
        PolicyType::Fascist if enacted >= global.config.fascist_policy_goal => {
            EnactmentOutcome::GameOver(Victory::FascistsWin(FascistVictory::FascistPolicyGoalReached))
        }
        PolicyType::Fascist if with_power => match global.config.power_for(enacted) {
            Some(power) => EnactmentOutcome::PowerTriggered(global, power),
            None => EnactmentOutcome::Continue(global),
        },
        PolicyType::Liberal | PolicyType::Fascist => EnactmentOutcome::Continue(global),
    }
}

pub(crate) fn enacted_event(
    global: &GlobalGameState,
    policy: PolicyType,
    source: EnactmentSource,
) -> GameEvent {
    let after = global.policies.after_enacting(policy);
    GameEvent::PolicyEnacted {
        policy,
        source,
        liberal: after.liberal,
        fascist: after.fascist,
    }
}

pub(crate) fn game_over(victory: Victory, events: &mut Vec<GameEvent>) -> GameState {
    tracing::debug!(%victory, "game completed");
    events.push(GameEvent::GameOver { victory });
    victory.into()
}

/// Enacts the policy a chancellor chose. A successful enactment clears the
/// election tracker before thresholds are checked.
pub fn enact_by_government(
    mut global: GlobalGameState,
    president: PlayerNumber,
    policy: PolicyType,
    events: &mut Vec<GameEvent>,
) -> GameState {
    global.election = global.election.with_tracker_reset();
    events.push(enacted_event(&global, policy, EnactmentSource::Government));
    match after_enacting(global, policy) {
        EnactmentOutcome::GameOver(victory) => game_over(victory, events),
        EnactmentOutcome::Continue(global) => next_normal_election(global, events).into(),
        EnactmentOutcome::PowerTriggered(global, power) => {
            activate_power(global, power, president, events).into()
        }
    }
}

/// Stateful powers wait on the president; a policy peek reveals the top of
/// the deck to the president and moves straight on to the next election.
pub fn activate_power(
    global: GlobalGameState,
    power: FascistPower,
    president: PlayerNumber,
    events: &mut Vec<GameEvent>,
) -> RunningGame {
    events.push(GameEvent::PowerActivated { power, president });
    match power.pending() {
        Some(pending) => RunningGame {
            global,
            ephemeral: EphemeralState::PolicyPending(PolicyPending { power: pending, president }),
        },
        None => {
            events.push(GameEvent::PolicyPeek {
                president,
                policies: global.deck.peek_standard(),
            });
            next_normal_election(global, events)
        }
    }
}
