//! Chancellor nomination and the vote on the proposed government.

use rand::Rng;

use crate::engine::models::{GameEvent, TransitionResult};

use super::auth::{authorize, resolve_target};
use super::chaos::after_failed_government;
use super::election::eligible_chancellors;
use super::enactment::game_over;
use super::rejection::Rejection;
use super::state::{
    ChancellorSelectionPending, EphemeralState, GameState, GlobalGameState,
    PresidentPolicyChoicePending, RunningGame, VotingOngoing,
};
use super::types::{Ballot, FascistVictory, Government, Role, Victory};
use super::votes::VoteMap;

pub fn nominate_chancellor(
    global: &GlobalGameState,
    pending: &ChancellorSelectionPending,
    actor: &str,
    nominee: &str,
) -> Result<TransitionResult, Rejection> {
    let president = authorize(&global.players, actor, pending.president_candidate)?;
    let chancellor = resolve_target(&global.players, nominee)?;
    if !eligible_chancellors(global, president).contains(&chancellor) {
        return Err(Rejection::IneligibleChancellor);
    }

    let government = Government { president, chancellor };
    let game = RunningGame {
        global: global.clone(),
        ephemeral: EphemeralState::VotingOngoing(VotingOngoing {
            government,
            votes: VoteMap::new(),
        }),
    };
    Ok(TransitionResult::new(game, vec![GameEvent::ChancellorNominated { government }]))
}

/// Records a ballot. The last ballot in resolves the vote by strict majority.
pub fn cast_vote<R: Rng + ?Sized>(
    global: &GlobalGameState,
    voting: &VotingOngoing,
    voter: &str,
    ballot: Ballot,
    rng: &mut R,
) -> Result<TransitionResult, Rejection> {
    let number = global.players.number_of(voter).ok_or(Rejection::ActorNotPlayer)?;
    let votes = voting.votes.with_vote(number, ballot)?;
    let government = voting.government;
    let mut events = vec![GameEvent::VoteCast { voter: number }];

    if !votes.is_complete(&global.players) {
        let game = RunningGame {
            global: global.clone(),
            ephemeral: EphemeralState::VotingOngoing(VotingOngoing { government, votes }),
        };
        return Ok(TransitionResult::new(game, events));
    }

    let state = if votes.elects() {
        events.push(GameEvent::GovernmentElected {
            government,
            ballots: votes.ballots().clone(),
        });
        elected(global.clone(), government, rng, &mut events)
    } else {
        events.push(GameEvent::GovernmentRejected {
            government,
            ballots: votes.ballots().clone(),
            election_tracker: global.election.election_tracker + 1,
        });
        after_failed_government(global.clone(), rng, &mut events)
    };
    Ok(TransitionResult::new(state, events))
}

fn elected<R: Rng + ?Sized>(
    mut global: GlobalGameState,
    government: Government,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> GameState {
    if global.config.hitler_chancellor_wins(global.policies.fascist)
        && global.roles.role_of(government.chancellor) == Role::Hitler
    {
        return game_over(Victory::FascistsWin(FascistVictory::HitlerElectedChancellor), events);
    }

    global.election = global.election.with_term_limits(government);
    let drawn = global.deck.draw_standard(rng);
    global.deck = drawn.deck;
    events.push(GameEvent::PoliciesDrawn {
        president: government.president,
        policies: drawn.cards,
    });
    if drawn.reshuffled {
        events.push(GameEvent::DeckReshuffled { draw_pile: global.deck.draw_pile().len() });
    }

    RunningGame {
        global,
        ephemeral: EphemeralState::PresidentPolicyChoicePending(PresidentPolicyChoicePending {
            government,
            policies: drawn.cards,
        }),
    }
    .into()
}
