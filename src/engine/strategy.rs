//! Bot strategies used by self-play and the arena.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::engine::models::Action;
use crate::game::state::{EphemeralState, GameState, RunningGame};
use crate::game::types::{Ballot, Party, PendingPower, PlayerNumber, PolicyType, Role};

/// Picks one of `options`, all of which belong to `actor` and are legal.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &str;

    fn choose_action(
        &self,
        state: &GameState,
        actor: &str,
        options: &[Action],
        rng: &mut dyn RngCore,
    ) -> Action;
}

/// Picks a uniformly random legal action.
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(
        &self,
        _state: &GameState,
        _actor: &str,
        options: &[Action],
        rng: &mut dyn RngCore,
    ) -> Action {
        options
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| panic!("no options to choose from"))
    }
}

/// Plays for its own party using only what its role lets it know: passes
/// its own policies, fascists back governments containing a known fascist
/// and push Hitler into the chancellery once that wins. Ties break randomly.
pub struct PartisanStrategy;

impl Strategy for PartisanStrategy {
    fn name(&self) -> &str {
        "partisan"
    }

    fn choose_action(
        &self,
        state: &GameState,
        actor: &str,
        options: &[Action],
        rng: &mut dyn RngCore,
    ) -> Action {
        let Some(game) = state.running() else {
            return RandomStrategy.choose_action(state, actor, options, rng);
        };
        let Some(me) = game.global.players.number_of(actor) else {
            return RandomStrategy.choose_action(state, actor, options, rng);
        };
        let view = View::new(game, me);

        let scored: Vec<(i32, &Action)> = options.iter().map(|a| (view.score(a), a)).collect();
        let best = scored.iter().map(|(s, _)| *s).max().unwrap_or(0);
        let top: Vec<&Action> = scored
            .into_iter()
            .filter(|(s, _)| *s == best)
            .map(|(_, a)| a)
            .collect();
        top.choose(rng)
            .map(|a| (*a).clone())
            .unwrap_or_else(|| panic!("no options to choose from"))
    }
}

/// One player's view of a running game.
struct View<'a> {
    game: &'a RunningGame,
    party: Party,
    /// Players this one knows to be fascist, including Hitler and itself.
    team: Vec<PlayerNumber>,
    hitler: Option<PlayerNumber>,
}

impl<'a> View<'a> {
    fn new(game: &'a RunningGame, me: PlayerNumber) -> Self {
        let knowledge = game.global.knowledge_of(me);
        let party = knowledge.role.party();
        let hitler = match knowledge.role {
            Role::Hitler => Some(me),
            Role::PlainFascist | Role::Liberal => knowledge.known_hitler,
        };
        let mut team = knowledge.known_fascists;
        if party == Party::Fascist {
            team.push(me);
            team.extend(knowledge.known_hitler);
        }
        Self { game, party, team, hitler }
    }

    fn own_policy(&self) -> PolicyType {
        match self.party {
            Party::Liberal => PolicyType::Liberal,
            Party::Fascist => PolicyType::Fascist,
        }
    }

    fn number(&self, name: &str) -> Option<PlayerNumber> {
        self.game.global.players.number_of(name)
    }

    fn is_team(&self, name: &str) -> bool {
        self.number(name).is_some_and(|n| self.team.contains(&n))
    }

    fn score(&self, action: &Action) -> i32 {
        let global = &self.game.global;
        match (&self.game.ephemeral, action) {
            (EphemeralState::PresidentPolicyChoicePending(p), Action::PresidentDiscard { index, .. }) => {
                i32::from(p.policies.get(*index).is_some_and(|c| *c != self.own_policy()))
            }
            (EphemeralState::ChancellorPolicyChoicePending(p), Action::ChancellorEnact { index, .. }) => {
                i32::from(p.policies.get(*index).is_some_and(|c| *c == self.own_policy()))
            }
            (EphemeralState::ChancellorPolicyChoicePending(p), Action::RequestVeto { .. }) => {
                let hopeless = p.policies.iter().all(|c| *c != self.own_policy());
                if hopeless { 2 } else { -1 }
            }
            (EphemeralState::ChancellorPolicyChoicePending(p), Action::ResolveVeto { approved, .. }) => {
                let hopeless = p.policies.iter().all(|c| *c != self.own_policy());
                i32::from(*approved == hopeless)
            }
            (EphemeralState::VotingOngoing(v), Action::CastVote { ballot, .. }) => {
                // Liberals know nobody and back every government.
                let friendly = match self.party {
                    Party::Liberal => true,
                    Party::Fascist => self.team.iter().any(|n| v.government.contains(*n)),
                };
                i32::from((*ballot == Ballot::For) == friendly)
            }
            (_, Action::NominateChancellor { nominee, .. }) if self.party == Party::Fascist => {
                let hitler_wins = global.config.hitler_chancellor_wins(global.policies.fascist);
                match self.number(nominee) {
                    Some(n) if hitler_wins && Some(n) == self.hitler => 3,
                    _ if self.is_team(nominee) => 1,
                    _ => 0,
                }
            }
            (_, Action::ResolvePower { power, target, .. }) => {
                let ally = self.is_team(target);
                match power {
                    PendingPower::SpecialElection => i32::from(ally),
                    PendingPower::InvestigateParty | PendingPower::Execution => i32::from(!ally),
                }
            }
            (_, Action::Leave { .. }) => -10,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game::legal::legal_actions;
    use crate::game::state::{ChancellorPolicyChoicePending, PresidentPolicyChoicePending, VetoState};
    use crate::game::testing::{global_with_policies, name, running};
    use crate::game::types::Government;

    fn choose(state: &GameState, actor: &str) -> Action {
        let options: Vec<Action> = legal_actions(state)
            .into_iter()
            .filter(|a| a.actor() == actor)
            .collect();
        PartisanStrategy.choose_action(state, actor, &options, &mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn liberal_president_discards_fascist() {
        // Five players: 1 Hitler, 2 fascist, the rest liberal.
        let state: GameState = running(
            global_with_policies(5, 0, 0),
            EphemeralState::PresidentPolicyChoicePending(PresidentPolicyChoicePending {
                government: Government { president: PlayerNumber(4), chancellor: PlayerNumber(5) },
                policies: [PolicyType::Liberal, PolicyType::Fascist, PolicyType::Liberal],
            }),
        )
        .into();
        assert_eq!(choose(&state, &name(4)), Action::PresidentDiscard { actor: name(4), index: 1 });
    }

    #[test]
    fn fascist_chancellor_enacts_fascist() {
        let state: GameState = running(
            global_with_policies(5, 0, 0),
            EphemeralState::ChancellorPolicyChoicePending(ChancellorPolicyChoicePending {
                government: Government { president: PlayerNumber(4), chancellor: PlayerNumber(2) },
                policies: [PolicyType::Liberal, PolicyType::Fascist],
                veto: VetoState::NotRequested,
            }),
        )
        .into();
        assert_eq!(choose(&state, &name(2)), Action::ChancellorEnact { actor: name(2), index: 1 });
    }

    #[test]
    fn out_of_range_index_scores_nothing() {
        let state: GameState = running(
            global_with_policies(5, 0, 0),
            EphemeralState::PresidentPolicyChoicePending(PresidentPolicyChoicePending {
                government: Government { president: PlayerNumber(4), chancellor: PlayerNumber(5) },
                policies: [PolicyType::Liberal, PolicyType::Fascist, PolicyType::Liberal],
            }),
        )
        .into();
        let options = vec![
            Action::PresidentDiscard { actor: name(4), index: 7 },
            Action::PresidentDiscard { actor: name(4), index: 1 },
        ];
        let picked = PartisanStrategy.choose_action(&state, &name(4), &options, &mut StdRng::seed_from_u64(3));
        assert_eq!(picked, options[1]);
    }

    #[test]
    fn random_strategy_only_picks_offered_actions() {
        let options = vec![Action::Start { actor: name(1) }];
        let picked = RandomStrategy.choose_action(
            &GameState::Joining(Default::default()),
            &name(1),
            &options,
            &mut StdRng::seed_from_u64(0),
        );
        assert_eq!(picked, options[0]);
    }
}
