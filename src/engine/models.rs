//! Actions callers submit and the events transitions report back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::state::GameState;
use crate::game::types::{
    Ballot, FascistPower, Government, Party, PendingPower, PlayerName, PlayerNumber, PolicyType,
    Victory,
};

/// Something a participant asks the engine to do. Actors and targets are
/// external names; the engine trusts the caller about who issued it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum Action {
    Join { name: PlayerName },
    Leave { name: PlayerName },
    Start { actor: PlayerName },
    NominateChancellor { actor: PlayerName, nominee: PlayerName },
    CastVote { voter: PlayerName, ballot: Ballot },
    PresidentDiscard { actor: PlayerName, index: usize },
    ChancellorEnact { actor: PlayerName, index: usize },
    RequestVeto { actor: PlayerName },
    ResolveVeto { actor: PlayerName, approved: bool },
    ResolvePower { power: PendingPower, actor: PlayerName, target: PlayerName },
}

impl Action {
    pub fn actor(&self) -> &str {
        match self {
            Action::Join { name } | Action::Leave { name } => name,
            Action::CastVote { voter, .. } => voter,
            Action::Start { actor }
            | Action::NominateChancellor { actor, .. }
            | Action::PresidentDiscard { actor, .. }
            | Action::ChancellorEnact { actor, .. }
            | Action::RequestVeto { actor }
            | Action::ResolveVeto { actor, .. }
            | Action::ResolvePower { actor, .. } => actor,
        }
    }
}

/// Who may be shown an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private(PlayerNumber),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnactmentSource {
    Government,
    Chaos,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    PlayerJoined { name: PlayerName },
    PlayerLeft { name: PlayerName },
    GameStarted { players: usize },
    ElectionStarted { president_candidate: PlayerNumber, special: bool },
    ChancellorNominated { government: Government },
    VoteCast { voter: PlayerNumber },
    GovernmentElected { government: Government, ballots: BTreeMap<PlayerNumber, Ballot> },
    GovernmentRejected {
        government: Government,
        ballots: BTreeMap<PlayerNumber, Ballot>,
        election_tracker: u32,
    },
    PoliciesDrawn { president: PlayerNumber, policies: [PolicyType; 3] },
    PoliciesPassed { chancellor: PlayerNumber, policies: [PolicyType; 2] },
    DeckReshuffled { draw_pile: usize },
    VetoRequested { government: Government },
    VetoApproved { government: Government, election_tracker: u32 },
    VetoRejected { government: Government },
    CountryInChaos { policy: PolicyType },
    PolicyEnacted { policy: PolicyType, source: EnactmentSource, liberal: u32, fascist: u32 },
    PowerActivated { power: FascistPower, president: PlayerNumber },
    PolicyPeek { president: PlayerNumber, policies: [PolicyType; 3] },
    PlayerInvestigated { president: PlayerNumber, target: PlayerNumber },
    PartyRevealed { president: PlayerNumber, target: PlayerNumber, party: Party },
    SpecialElectionCalled { president: PlayerNumber, candidate: PlayerNumber },
    PlayerExecuted { target: PlayerNumber },
    GameOver { victory: Victory },
}

impl GameEvent {
    /// Hidden information goes only to the player entitled to it.
    pub fn visibility(&self) -> Visibility {
        match self {
            GameEvent::PoliciesDrawn { president, .. }
            | GameEvent::PolicyPeek { president, .. }
            | GameEvent::PartyRevealed { president, .. } => Visibility::Private(*president),
            GameEvent::PoliciesPassed { chancellor, .. } => Visibility::Private(*chancellor),
            _ => Visibility::Public,
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility() == Visibility::Public
    }
}

/// New state plus what happened on the way there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResult {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl TransitionResult {
    pub fn new(state: impl Into<GameState>, events: Vec<GameEvent>) -> Self {
        Self { state: state.into(), events }
    }

    /// Events a given player may see: all public ones plus their own.
    pub fn events_for(&self, number: PlayerNumber) -> impl Iterator<Item = &GameEvent> + '_ {
        self.events.iter().filter(move |e| match e.visibility() {
            Visibility::Public => true,
            Visibility::Private(owner) => owner == number,
        })
    }
}
