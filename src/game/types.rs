//! Core value types shared by every subsystem of the rules engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// External identity of a participant (platform account id).
pub type PlayerName = String;

/// Seat number of a player, unique within a game and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerNumber(pub u32);

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    Liberal,
    Fascist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Liberal,
    Fascist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Liberal,
    PlainFascist,
    Hitler,
}

impl Role {
    /// Party membership as revealed by an investigation. Hitler reads as fascist.
    pub fn party(self) -> Party {
        match self {
            Role::Liberal => Party::Liberal,
            Role::PlainFascist | Role::Hitler => Party::Fascist,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ballot {
    For,
    Against,
}

/// Presidential power unlocked by the fascist policy track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FascistPower {
    InvestigateParty,
    SpecialElection,
    PolicyPeek,
    Execution,
}

/// The subset of powers that wait on a choice from the president.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingPower {
    InvestigateParty,
    SpecialElection,
    Execution,
}

impl FascistPower {
    /// `None` for stateless powers that resolve immediately.
    pub fn pending(self) -> Option<PendingPower> {
        match self {
            FascistPower::InvestigateParty => Some(PendingPower::InvestigateParty),
            FascistPower::SpecialElection => Some(PendingPower::SpecialElection),
            FascistPower::Execution => Some(PendingPower::Execution),
            FascistPower::PolicyPeek => None,
        }
    }
}

/// A (president, chancellor) pair, either proposed or elected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Government {
    pub president: PlayerNumber,
    pub chancellor: PlayerNumber,
}

impl Government {
    pub fn contains(&self, number: PlayerNumber) -> bool {
        self.president == number || self.chancellor == number
    }
}

/// Enacted policy counters. Both only ever increase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoliciesState {
    pub liberal: u32,
    pub fascist: u32,
}

impl PoliciesState {
    pub fn count(&self, policy: PolicyType) -> u32 {
        match policy {
            PolicyType::Liberal => self.liberal,
            PolicyType::Fascist => self.fascist,
        }
    }

    pub fn after_enacting(self, policy: PolicyType) -> Self {
        match policy {
            PolicyType::Liberal => Self { liberal: self.liberal + 1, ..self },
            PolicyType::Fascist => Self { fascist: self.fascist + 1, ..self },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiberalVictory {
    LiberalPolicyGoalReached,
    HitlerKilled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FascistVictory {
    FascistPolicyGoalReached,
    HitlerElectedChancellor,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "winners", content = "reason", rename_all = "snake_case")]
pub enum Victory {
    LiberalsWin(LiberalVictory),
    FascistsWin(FascistVictory),
}

impl Victory {
    pub fn winning_party(self) -> Party {
        match self {
            Victory::LiberalsWin(_) => Party::Liberal,
            Victory::FascistsWin(_) => Party::Fascist,
        }
    }
}

impl fmt::Display for Victory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Victory::LiberalsWin(LiberalVictory::LiberalPolicyGoalReached) => {
                write!(f, "liberals win: liberal policy goal reached")
            }
            Victory::LiberalsWin(LiberalVictory::HitlerKilled) => {
                write!(f, "liberals win: Hitler was executed")
            }
            Victory::FascistsWin(FascistVictory::FascistPolicyGoalReached) => {
                write!(f, "fascists win: fascist policy goal reached")
            }
            Victory::FascistsWin(FascistVictory::HitlerElectedChancellor) => {
                write!(f, "fascists win: Hitler elected chancellor")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hitler_investigates_as_fascist() {
        assert_eq!(Role::Hitler.party(), Party::Fascist);
        assert_eq!(Role::PlainFascist.party(), Party::Fascist);
        assert_eq!(Role::Liberal.party(), Party::Liberal);
    }

    #[test]
    fn enacting_increments_only_matching_counter() {
        let p = PoliciesState::default()
            .after_enacting(PolicyType::Fascist)
            .after_enacting(PolicyType::Fascist)
            .after_enacting(PolicyType::Liberal);
        assert_eq!(p.fascist, 2);
        assert_eq!(p.liberal, 1);
        assert_eq!(p.count(PolicyType::Fascist), 2);
    }

    #[test]
    fn policy_peek_is_the_only_stateless_power() {
        assert_eq!(FascistPower::PolicyPeek.pending(), None);
        assert_eq!(FascistPower::Execution.pending(), Some(PendingPower::Execution));
    }
}
