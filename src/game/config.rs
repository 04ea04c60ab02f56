//! Board configuration: win thresholds, veto unlock, chaos limit and the
//! fascist power schedule, plus the player-count brackets they come from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::FascistPower;

pub const MIN_PLAYERS: usize = 5;
pub const MAX_PLAYERS: usize = 10;

/// Immutable thresholds a running game is played under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfiguration {
    pub liberal_policy_goal: u32,
    pub fascist_policy_goal: u32,
    /// Fascist policies enacted before electing Hitler chancellor wins the game.
    /// `None` disables the condition.
    pub hitler_chancellor_threshold: Option<u32>,
    pub veto_unlock_threshold: u32,
    /// Consecutive failed governments that throw the country into chaos.
    pub chaos_threshold: u32,
    /// Plain fascists dealt, not counting Hitler.
    pub fascists: usize,
    pub hitler_knows_fascists: bool,
    /// Keyed by the fascist policy count that unlocks the power.
    pub power_schedule: BTreeMap<u32, FascistPower>,
}

impl GameConfiguration {
    /// Standard board for `player_count` players, or `None` outside 5..=10.
    pub fn standard(player_count: usize) -> Option<Self> {
        Rules::default().configuration_for(player_count)
    }

    pub fn power_for(&self, fascist_enacted: u32) -> Option<FascistPower> {
        self.power_schedule.get(&fascist_enacted).copied()
    }

    pub fn hitler_chancellor_wins(&self, fascist_enacted: u32) -> bool {
        self.hitler_chancellor_threshold
            .is_some_and(|threshold| fascist_enacted >= threshold)
    }

    pub fn veto_unlocked(&self, fascist_enacted: u32) -> bool {
        fascist_enacted >= self.veto_unlock_threshold
    }
}

/// One entry of a power schedule, in the flat shape used by rules files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerSlot {
    pub fascist_policies: u32,
    pub power: FascistPower,
}

/// Setup that depends on how many players sit at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBracket {
    pub min_players: usize,
    pub max_players: usize,
    pub fascists: usize,
    #[serde(default)]
    pub hitler_knows_fascists: bool,
    #[serde(default)]
    pub powers: Vec<PowerSlot>,
}

impl PlayerBracket {
    pub fn covers(&self, player_count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&player_count)
    }
}

/// Full rule set a lobby is opened with. Every field falls back to the
/// standard game when absent from a rules file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub min_players: usize,
    pub max_players: usize,
    pub liberal_policy_goal: u32,
    pub fascist_policy_goal: u32,
    pub hitler_chancellor_threshold: Option<u32>,
    pub veto_unlock_threshold: u32,
    pub chaos_threshold: u32,
    pub brackets: Vec<PlayerBracket>,
}

impl Default for Rules {
    fn default() -> Self {
        use FascistPower::*;

        let slots = |powers: &[(u32, FascistPower)]| -> Vec<PowerSlot> {
            powers
                .iter()
                .map(|&(fascist_policies, power)| PowerSlot { fascist_policies, power })
                .collect()
        };

        Self {
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
            liberal_policy_goal: 5,
            fascist_policy_goal: 6,
            hitler_chancellor_threshold: Some(3),
            veto_unlock_threshold: 5,
            chaos_threshold: 3,
            brackets: vec![
                PlayerBracket {
                    min_players: 5,
                    max_players: 6,
                    fascists: 1,
                    hitler_knows_fascists: true,
                    powers: slots(&[(3, PolicyPeek), (4, Execution), (5, Execution)]),
                },
                PlayerBracket {
                    min_players: 7,
                    max_players: 8,
                    fascists: 2,
                    hitler_knows_fascists: false,
                    powers: slots(&[
                        (2, InvestigateParty),
                        (3, SpecialElection),
                        (4, Execution),
                        (5, Execution),
                    ]),
                },
                PlayerBracket {
                    min_players: 9,
                    max_players: 10,
                    fascists: 3,
                    hitler_knows_fascists: false,
                    powers: slots(&[
                        (1, InvestigateParty),
                        (2, InvestigateParty),
                        (3, SpecialElection),
                        (4, Execution),
                        (5, Execution),
                    ]),
                },
            ],
        }
    }
}

impl Rules {
    pub fn bracket_for(&self, player_count: usize) -> Option<&PlayerBracket> {
        self.brackets.iter().find(|b| b.covers(player_count))
    }

    /// Resolve the configuration for a table of `player_count` players.
    pub fn configuration_for(&self, player_count: usize) -> Option<GameConfiguration> {
        if player_count < self.min_players || player_count > self.max_players {
            return None;
        }
        let bracket = self.bracket_for(player_count)?;
        Some(GameConfiguration {
            liberal_policy_goal: self.liberal_policy_goal,
            fascist_policy_goal: self.fascist_policy_goal,
            hitler_chancellor_threshold: self.hitler_chancellor_threshold,
            veto_unlock_threshold: self.veto_unlock_threshold,
            chaos_threshold: self.chaos_threshold,
            fascists: bracket.fascists,
            hitler_knows_fascists: bracket.hitler_knows_fascists,
            power_schedule: bracket
                .powers
                .iter()
                .map(|slot| (slot.fascist_policies, slot.power))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_brackets_cover_five_to_ten() {
        for n in 5..=10 {
            assert!(GameConfiguration::standard(n).is_some(), "no config for {n}");
        }
        assert!(GameConfiguration::standard(4).is_none());
        assert!(GameConfiguration::standard(11).is_none());
    }

    #[test]
    fn small_table_peeks_then_executes() {
        let config = GameConfiguration::standard(5).unwrap();
        assert_eq!(config.fascists, 1);
        assert!(config.hitler_knows_fascists);
        assert_eq!(config.power_for(1), None);
        assert_eq!(config.power_for(3), Some(FascistPower::PolicyPeek));
        assert_eq!(config.power_for(4), Some(FascistPower::Execution));
    }

    #[test]
    fn large_table_investigates_early() {
        let config = GameConfiguration::standard(9).unwrap();
        assert_eq!(config.fascists, 3);
        assert!(!config.hitler_knows_fascists);
        assert_eq!(config.power_for(1), Some(FascistPower::InvestigateParty));
        assert_eq!(config.power_for(3), Some(FascistPower::SpecialElection));
    }

    #[test]
    fn thresholds() {
        let config = GameConfiguration::standard(7).unwrap();
        assert!(!config.hitler_chancellor_wins(2));
        assert!(config.hitler_chancellor_wins(3));
        assert!(!config.veto_unlocked(4));
        assert!(config.veto_unlocked(5));
    }
}
