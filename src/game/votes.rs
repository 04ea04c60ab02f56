//! Ballot collection for a proposed government.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::players::PlayerMap;
use super::rejection::Rejection;
use super::types::{Ballot, PlayerNumber};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteMap {
    votes: BTreeMap<PlayerNumber, Ballot>,
}

impl VoteMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vote(&self, voter: PlayerNumber, ballot: Ballot) -> Result<Self, Rejection> {
        if self.votes.contains_key(&voter) {
            return Err(Rejection::AlreadyVoted);
        }
        let mut votes = self.votes.clone();
        votes.insert(voter, ballot);
        Ok(Self { votes })
    }

    pub fn has_voted(&self, voter: PlayerNumber) -> bool {
        self.votes.contains_key(&voter)
    }

    /// Every living player has a ballot in.
    pub fn is_complete(&self, players: &PlayerMap) -> bool {
        players.numbers().all(|n| self.votes.contains_key(&n))
    }

    pub fn count_for(&self) -> usize {
        self.count(Ballot::For)
    }

    pub fn count_against(&self) -> usize {
        self.count(Ballot::Against)
    }

    /// Strict majority: ties reject.
    pub fn elects(&self) -> bool {
        self.count_for() > self.count_against()
    }

    pub fn ballots(&self) -> &BTreeMap<PlayerNumber, Ballot> {
        &self.votes
    }

    fn count(&self, ballot: Ballot) -> usize {
        self.votes.values().filter(|b| **b == ballot).count()
    }
}
