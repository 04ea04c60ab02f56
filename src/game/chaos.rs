//! Failed governments and the "country in chaos" forced enactment.

use rand::Rng;

use crate::engine::models::{EnactmentSource, GameEvent};

use super::election::{next_normal_election, TrackerOutcome};
use super::enactment::{after_speedy_enacting, enacted_event, game_over, EnactmentOutcome};
use super::state::{GameState, GlobalGameState};

/// Moves the tracker after a rejected or vetoed government. Reaching the
/// chaos threshold enacts the top card with no power, clears term limits
/// and resets the tracker.
pub fn after_failed_government<R: Rng + ?Sized>(
    mut global: GlobalGameState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> GameState {
    match global.election.after_failed_government(global.config.chaos_threshold) {
        TrackerOutcome::Advanced(election) => {
            global.election = election;
            next_normal_election(global, events).into()
        }
        TrackerOutcome::Chaos(election) => {
            global.election = election.without_term_limits();
            country_in_chaos(global, rng, events)
        }
    }
}

fn country_in_chaos<R: Rng + ?Sized>(
    mut global: GlobalGameState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> GameState {
    let drawn = global.deck.draw_single(rng);
    global.deck = drawn.deck;
    let policy = drawn.cards;
    tracing::debug!(?policy, "country in chaos, enacting top policy");

    events.push(GameEvent::CountryInChaos { policy });
    if drawn.reshuffled {
        events.push(GameEvent::DeckReshuffled { draw_pile: global.deck.draw_pile().len() });
    }
    events.push(enacted_event(&global, policy, EnactmentSource::Chaos));

    match after_speedy_enacting(global, policy) {
        EnactmentOutcome::GameOver(victory) => game_over(victory, events),
        EnactmentOutcome::Continue(global) | EnactmentOutcome::PowerTriggered(global, _) => {
            next_normal_election(global, events).into()
        }
    }
}
