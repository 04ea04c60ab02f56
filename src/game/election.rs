//! Presidential rotation, term limits and the failed-election tracker.

use serde::{Deserialize, Serialize};

use crate::engine::models::GameEvent;

use super::players::PlayerMap;
use super::state::{ChancellorSelectionPending, EphemeralState, GlobalGameState, RunningGame};
use super::types::{Government, PlayerNumber};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionState {
    /// Last player to hold the presidency through normal rotation.
    pub current_president_ticker: PlayerNumber,
    /// Most recently elected government; ineligible for the next nomination.
    pub term_limited_government: Option<Government>,
    /// Consecutive governments that failed to pass a policy.
    pub election_tracker: u32,
}

/// Where a rejected government leaves the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerOutcome {
    Advanced(ElectionState),
    /// Threshold reached; the tracker has already been reset to zero.
    Chaos(ElectionState),
}

impl ElectionState {
    pub fn new(first_president: PlayerNumber) -> Self {
        Self {
            current_president_ticker: first_president,
            term_limited_government: None,
            election_tracker: 0,
        }
    }

    pub fn advance_ticker(&self, players: &PlayerMap) -> Self {
        Self {
            current_president_ticker: players.next_after(self.current_president_ticker),
            ..self.clone()
        }
    }

    pub fn with_term_limits(&self, government: Government) -> Self {
        Self { term_limited_government: Some(government), ..self.clone() }
    }

    pub fn without_term_limits(&self) -> Self {
        Self { term_limited_government: None, ..self.clone() }
    }

    pub fn with_tracker_reset(&self) -> Self {
        Self { election_tracker: 0, ..self.clone() }
    }

    pub fn after_failed_government(&self, chaos_threshold: u32) -> TrackerOutcome {
        if self.election_tracker + 1 >= chaos_threshold {
            TrackerOutcome::Chaos(self.with_tracker_reset())
        } else {
            TrackerOutcome::Advanced(Self {
                election_tracker: self.election_tracker + 1,
                ..self.clone()
            })
        }
    }

    /// With five or fewer living players only the last chancellor is barred.
    pub fn is_term_limited(&self, number: PlayerNumber, living_players: usize) -> bool {
        match self.term_limited_government {
            None => false,
            Some(gov) if living_players <= 5 => gov.chancellor == number,
            Some(gov) => gov.contains(number),
        }
    }
}

/// Opens a nomination round with `candidate` as president. The ticker is left
/// where it is, so a special election does not disturb normal rotation.
pub fn begin_election(
    global: GlobalGameState,
    candidate: PlayerNumber,
    special: bool,
    events: &mut Vec<GameEvent>,
) -> RunningGame {
    events.push(GameEvent::ElectionStarted { president_candidate: candidate, special });
    RunningGame {
        global,
        ephemeral: EphemeralState::ChancellorSelectionPending(ChancellorSelectionPending {
            president_candidate: candidate,
        }),
    }
}

/// Advances the ticker and opens a nomination round for the next president.
pub fn next_normal_election(mut global: GlobalGameState, events: &mut Vec<GameEvent>) -> RunningGame {
    global.election = global.election.advance_ticker(&global.players);
    let candidate = global.election.current_president_ticker;
    begin_election(global, candidate, false, events)
}

/// Players the candidate may nominate as chancellor.
pub fn eligible_chancellors(global: &GlobalGameState, candidate: PlayerNumber) -> Vec<PlayerNumber> {
    let living = global.living_players();
    global
        .players
        .numbers()
        .filter(|n| *n != candidate && !global.election.is_term_limited(*n, living))
        .collect()
}
