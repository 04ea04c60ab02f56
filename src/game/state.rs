//! Whole-game state values. Transitions never mutate these in place; each
//! one builds and returns a fresh snapshot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::config::{GameConfiguration, Rules};
use super::deck::DeckState;
use super::election::ElectionState;
use super::players::{role_knowledge, PlayerMap, RoleKnowledge, RoleMap};
use super::types::{
    Government, PendingPower, PlayerName, PlayerNumber, PoliciesState, PolicyType, Victory,
};
use super::votes::VoteMap;

/// Players already targeted by an investigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowersState {
    pub investigated: BTreeSet<PlayerNumber>,
}

impl PowersState {
    pub fn with_investigated(&self, number: PlayerNumber) -> Self {
        let mut investigated = self.investigated.clone();
        investigated.insert(number);
        Self { investigated }
    }
}

/// Everything about a running game except the decision it is waiting on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalGameState {
    pub config: GameConfiguration,
    pub players: PlayerMap,
    pub roles: RoleMap,
    pub policies: PoliciesState,
    pub deck: DeckState,
    pub election: ElectionState,
    pub powers: PowersState,
}

impl GlobalGameState {
    /// Panics unless the role map covers exactly the seated players.
    pub fn new(
        config: GameConfiguration,
        players: PlayerMap,
        roles: RoleMap,
        deck: DeckState,
        election: ElectionState,
    ) -> Self {
        let state = Self {
            config,
            players,
            roles,
            policies: PoliciesState::default(),
            deck,
            election,
            powers: PowersState::default(),
        };
        state.assert_roles_match();
        state
    }

    pub fn assert_roles_match(&self) {
        assert!(
            self.roles.players().eq(self.players.numbers()),
            "role map players {:?} differ from seated players {:?}",
            self.roles.players().collect::<Vec<_>>(),
            self.players.numbers().collect::<Vec<_>>(),
        );
    }

    pub fn living_players(&self) -> usize {
        self.players.len()
    }

    /// What `number` was told about the other roles at the start.
    pub fn knowledge_of(&self, number: PlayerNumber) -> RoleKnowledge {
        role_knowledge(&self.roles, number, self.config.hitler_knows_fascists)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VetoState {
    NotRequested,
    Requested,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChancellorSelectionPending {
    pub president_candidate: PlayerNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingOngoing {
    pub government: Government,
    pub votes: VoteMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresidentPolicyChoicePending {
    pub government: Government,
    pub policies: [PolicyType; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChancellorPolicyChoicePending {
    pub government: Government,
    pub policies: [PolicyType; 2],
    pub veto: VetoState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyPending {
    pub power: PendingPower,
    pub president: PlayerNumber,
}

/// The decision a running game is waiting on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EphemeralState {
    ChancellorSelectionPending(ChancellorSelectionPending),
    VotingOngoing(VotingOngoing),
    PresidentPolicyChoicePending(PresidentPolicyChoicePending),
    ChancellorPolicyChoicePending(ChancellorPolicyChoicePending),
    PolicyPending(PolicyPending),
}

impl EphemeralState {
    /// Policy cards held outside the deck while this decision is pending.
    pub fn cards_in_hand(&self) -> &[PolicyType] {
        match self {
            EphemeralState::PresidentPolicyChoicePending(s) => s.policies.as_slice(),
            EphemeralState::ChancellorPolicyChoicePending(s) => s.policies.as_slice(),
            EphemeralState::ChancellorSelectionPending(_)
            | EphemeralState::VotingOngoing(_)
            | EphemeralState::PolicyPending(_) => &[],
        }
    }

    pub fn is_policy_choice(&self) -> bool {
        !self.cards_in_hand().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningGame {
    pub global: GlobalGameState,
    pub ephemeral: EphemeralState,
}

/// Players waiting for a game to start, in join order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lobby {
    pub players: Vec<PlayerName>,
    pub rules: Rules,
}

impl Lobby {
    pub fn new(rules: Rules) -> Self {
        Self { players: Vec::new(), rules }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.rules.max_players
    }
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedGame {
    pub victory: Victory,
}

/// Lifecycle: `Joining` → `Running` → `Completed`. `Completed` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    Joining(Lobby),
    Running(RunningGame),
    Completed(CompletedGame),
}

impl GameState {
    pub fn running(&self) -> Option<&RunningGame> {
        match self {
            GameState::Running(game) => Some(game),
            GameState::Joining(_) | GameState::Completed(_) => None,
        }
    }

    pub fn victory(&self) -> Option<Victory> {
        match self {
            GameState::Completed(c) => Some(c.victory),
            GameState::Joining(_) | GameState::Running(_) => None,
        }
    }
}

impl From<Lobby> for GameState {
    fn from(lobby: Lobby) -> Self {
        GameState::Joining(lobby)
    }
}

impl From<RunningGame> for GameState {
    fn from(game: RunningGame) -> Self {
        GameState::Running(game)
    }
}

impl From<Victory> for GameState {
    fn from(victory: Victory) -> Self {
        GameState::Completed(CompletedGame { victory })
    }
}
