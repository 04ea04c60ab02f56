//! Synchronous self-play: seats bots in a lobby, starts the game and feeds
//! strategy choices through [`apply`] until someone wins. Every intermediate
//! state is checked for coherence, in release builds too.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::engine::models::Action;
use crate::engine::strategy::Strategy;
use crate::game::coherence::{check_state, CoherenceViolation};
use crate::game::config::Rules;
use crate::game::legal::legal_actions;
use crate::game::machine::apply;
use crate::game::rejection::Rejection;
use crate::game::state::{GameState, Lobby};
use crate::game::types::{Party, PlayerName, PoliciesState, Victory};

/// Far above any finished game. At most ten policies are ever enacted and
/// chaos forces one after every few failed governments.
pub const MAX_STEPS: usize = 5_000;

/// Which strategy each party's players use.
#[derive(Clone, Copy)]
pub struct Lineup<'a> {
    pub liberal: &'a dyn Strategy,
    pub fascist: &'a dyn Strategy,
}

impl<'a> Lineup<'a> {
    pub fn uniform(strategy: &'a dyn Strategy) -> Self {
        Self { liberal: strategy, fascist: strategy }
    }

    fn for_party(&self, party: Party) -> &'a dyn Strategy {
        match party {
            Party::Liberal => self.liberal,
            Party::Fascist => self.fascist,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutcome {
    pub victory: Victory,
    /// Actions applied, including joins and the start.
    pub actions: usize,
    pub events: usize,
    /// Board as it stood before the final transition.
    pub policies: PoliciesState,
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("step {step}: legal action {action:?} was rejected")]
    Rejected {
        step: usize,
        action: Action,
        #[source]
        source: Rejection,
    },
    #[error("step {step}: incoherent state")]
    Incoherent {
        step: usize,
        #[source]
        source: CoherenceViolation,
    },
    #[error("step {step}: no legal action in an unfinished game")]
    Stuck { step: usize },
    #[error("no winner after {0} steps")]
    StepLimit(usize),
}

pub fn player_names(count: usize) -> Vec<PlayerName> {
    (1..=count).map(|i| format!("bot{i}")).collect()
}

/// Plays one seeded game to completion.
pub fn simulate_game(
    rules: &Rules,
    names: &[PlayerName],
    seed: u64,
    lineup: Lineup<'_>,
) -> Result<SimulationOutcome, SimulationError> {
    play_game(rules, names, seed, lineup, |_, _| {})
}

/// Like [`simulate_game`], handing every state reached to `observe` along
/// with the number of actions applied so far.
pub fn play_game(
    rules: &Rules,
    names: &[PlayerName],
    seed: u64,
    lineup: Lineup<'_>,
    mut observe: impl FnMut(usize, &GameState),
) -> Result<SimulationOutcome, SimulationError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = GameState::Joining(Lobby::new(rules.clone()));
    let mut policies = PoliciesState::default();
    let mut events = 0;

    let setup = names
        .iter()
        .map(|name| Action::Join { name: name.clone() })
        .chain(names.first().map(|actor| Action::Start { actor: actor.clone() }));

    let mut pending: Vec<Action> = setup.collect();
    pending.reverse();

    for step in 0..MAX_STEPS {
        if let GameState::Completed(done) = &state {
            tracing::debug!(seed, steps = step, victory = %done.victory, "simulation finished");
            return Ok(SimulationOutcome { victory: done.victory, actions: step, events, policies });
        }
        if let Some(game) = state.running() {
            policies = game.global.policies;
        }

        let action = match pending.pop() {
            Some(action) => action,
            None => choose(&state, lineup, &mut rng).ok_or(SimulationError::Stuck { step })?,
        };
        let result = apply(&state, &action, &mut rng)
            .map_err(|source| SimulationError::Rejected { step, action: action.clone(), source })?;
        check_state(&result.state).map_err(|source| SimulationError::Incoherent { step, source })?;

        tracing::trace!(step, ?action, events = result.events.len(), "applied");
        events += result.events.len();
        state = result.state;
        observe(step + 1, &state);
    }
    Err(SimulationError::StepLimit(MAX_STEPS))
}

/// Lets the first player with a pending decision pick among their options.
fn choose(state: &GameState, lineup: Lineup<'_>, rng: &mut StdRng) -> Option<Action> {
    let game = state.running()?;
    let legal = legal_actions(state);
    let actor = legal.first()?.actor().to_string();
    let options: Vec<Action> = legal.into_iter().filter(|a| a.actor() == actor).collect();

    let number = game.global.players.number_of(&actor)?;
    let strategy = lineup.for_party(game.global.roles.party_of(number));
    Some(strategy.choose_action(state, &actor, &options, rng))
}
