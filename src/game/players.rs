//! Seating and hidden roles.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::{Party, PlayerName, PlayerNumber, Role};

/// Bijection between seat numbers and external names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap {
    players: BTreeMap<PlayerNumber, PlayerName>,
}

impl PlayerMap {
    /// Panics if two numbers share a name.
    pub fn new(players: BTreeMap<PlayerNumber, PlayerName>) -> Self {
        let mut names: Vec<&str> = players.values().map(String::as_str).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len(), "player names must be distinct");
        Self { players }
    }

    /// Seats `names` as players 1..=n in the given order.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self::new(
            names
                .iter()
                .zip(1..)
                .map(|(name, n)| (PlayerNumber(n), name.as_ref().to_string()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn numbers(&self) -> impl Iterator<Item = PlayerNumber> + '_ {
        self.players.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerNumber, &str)> + '_ {
        self.players.iter().map(|(n, name)| (*n, name.as_str()))
    }

    pub fn contains(&self, number: PlayerNumber) -> bool {
        self.players.contains_key(&number)
    }

    pub fn name_of(&self, number: PlayerNumber) -> Option<&str> {
        self.players.get(&number).map(String::as_str)
    }

    pub fn number_of(&self, name: &str) -> Option<PlayerNumber> {
        self.players
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(number, _)| *number)
    }

    /// Smallest valid number strictly greater than `number`, wrapping around.
    /// `number` itself need not be valid any more.
    pub fn next_after(&self, number: PlayerNumber) -> PlayerNumber {
        self.players
            .range((Excluded(number), Unbounded))
            .chain(self.players.iter())
            .map(|(n, _)| *n)
            .next()
            .unwrap_or_else(|| panic!("next_after({number}) on an empty player map"))
    }

    pub fn without(&self, number: PlayerNumber) -> Self {
        let mut players = self.players.clone();
        players.remove(&number);
        Self { players }
    }
}

/// Role of every seated player. Exactly one Hitler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMap {
    roles: BTreeMap<PlayerNumber, Role>,
}

impl RoleMap {
    pub fn new(roles: BTreeMap<PlayerNumber, Role>) -> Self {
        let hitlers = roles.values().filter(|r| **r == Role::Hitler).count();
        assert_eq!(hitlers, 1, "role map must hold exactly one Hitler");
        Self { roles }
    }

    /// Deals one Hitler, `fascists` plain fascists and liberals for the rest.
    pub fn deal<R: Rng + ?Sized>(numbers: &[PlayerNumber], fascists: usize, rng: &mut R) -> Self {
        assert!(
            numbers.len() > fascists,
            "cannot deal {fascists} fascists and Hitler to {} players",
            numbers.len()
        );
        let mut seats = numbers.to_vec();
        seats.shuffle(rng);
        let roles = seats
            .into_iter()
            .enumerate()
            .map(|(i, n)| {
                let role = match i {
                    0 => Role::Hitler,
                    i if i <= fascists => Role::PlainFascist,
                    _ => Role::Liberal,
                };
                (n, role)
            })
            .collect();
        Self::new(roles)
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerNumber> + '_ {
        self.roles.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerNumber, Role)> + '_ {
        self.roles.iter().map(|(n, r)| (*n, *r))
    }

    /// Panics when `number` has no role: the whole-state invariants are broken.
    pub fn role_of(&self, number: PlayerNumber) -> Role {
        match self.roles.get(&number) {
            Some(role) => *role,
            None => panic!("role map has no entry for player {number}"),
        }
    }

    pub fn party_of(&self, number: PlayerNumber) -> Party {
        self.role_of(number).party()
    }

    pub fn hitler(&self) -> PlayerNumber {
        self.iter()
            .find(|(_, r)| *r == Role::Hitler)
            .map(|(n, _)| n)
            .unwrap_or_else(|| panic!("role map lost its Hitler"))
    }

    pub fn plain_fascists(&self) -> Vec<PlayerNumber> {
        self.iter()
            .filter(|(_, r)| *r == Role::PlainFascist)
            .map(|(n, _)| n)
            .collect()
    }

    /// Removing Hitler is never valid: executing Hitler ends the game instead.
    pub fn without(&self, number: PlayerNumber) -> Self {
        let mut roles = self.roles.clone();
        roles.remove(&number);
        Self::new(roles)
    }
}

/// What a player is privately told when roles are dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleKnowledge {
    pub player: PlayerNumber,
    pub role: Role,
    /// Plain fascists this player knows about, excluding themselves.
    pub known_fascists: Vec<PlayerNumber>,
    pub known_hitler: Option<PlayerNumber>,
}

/// Liberals learn nothing. Plain fascists learn the whole team. Hitler
/// learns the team only when `hitler_knows_fascists` is set.
pub fn role_knowledge(
    roles: &RoleMap,
    number: PlayerNumber,
    hitler_knows_fascists: bool,
) -> RoleKnowledge {
    let role = roles.role_of(number);
    let team = |exclude: PlayerNumber| -> Vec<PlayerNumber> {
        roles.plain_fascists().into_iter().filter(|n| *n != exclude).collect()
    };
    match role {
        Role::Liberal => RoleKnowledge {
            player: number,
            role,
            known_fascists: Vec::new(),
            known_hitler: None,
        },
        Role::PlainFascist => RoleKnowledge {
            player: number,
            role,
            known_fascists: team(number),
            known_hitler: Some(roles.hitler()),
        },
        Role::Hitler => RoleKnowledge {
            player: number,
            role,
            known_fascists: if hitler_knows_fascists { team(number) } else { Vec::new() },
            known_hitler: None,
        },
    }
}
