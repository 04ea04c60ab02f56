//! Policy deck: an ordered draw pile and an unordered discard pile.
//!
//! Every operation consumes the deck and hands back a new one. Randomness is
//! always passed in so a transition is reproducible from its inputs.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::PolicyType;

pub const LIBERAL_CARDS: u32 = 6;
pub const FASCIST_CARDS: u32 = 11;
/// Cards a president draws, and the minimum the draw pile keeps between turns.
pub const STANDARD_DRAW: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    draw_pile: Vec<PolicyType>,
    discard_pile: Vec<PolicyType>,
}

/// Cards taken off the deck together with the deck left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawn<T> {
    pub deck: DeckState,
    pub cards: T,
    pub reshuffled: bool,
}

impl DeckState {
    pub fn new(draw_pile: Vec<PolicyType>, discard_pile: Vec<PolicyType>) -> Self {
        Self { draw_pile, discard_pile }
    }

    /// A freshly shuffled 17-card deck.
    pub fn standard<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut draw_pile: Vec<PolicyType> = std::iter::repeat(PolicyType::Liberal)
            .take(LIBERAL_CARDS as usize)
            .chain(std::iter::repeat(PolicyType::Fascist).take(FASCIST_CARDS as usize))
            .collect();
        draw_pile.shuffle(rng);
        Self { draw_pile, discard_pile: Vec::new() }
    }

    /// Front of the slice is drawn first.
    pub fn draw_pile(&self) -> &[PolicyType] {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &[PolicyType] {
        &self.discard_pile
    }

    /// Cards of `policy` across both piles.
    pub fn count(&self, policy: PolicyType) -> u32 {
        self.draw_pile
            .iter()
            .chain(&self.discard_pile)
            .filter(|p| **p == policy)
            .count() as u32
    }

    pub fn draw_standard<R: Rng + ?Sized>(self, rng: &mut R) -> Drawn<[PolicyType; STANDARD_DRAW]> {
        let Drawn { deck, cards, reshuffled } = self.draw(STANDARD_DRAW, rng);
        Drawn {
            deck,
            cards: [cards[0], cards[1], cards[2]],
            reshuffled,
        }
    }

    pub fn draw_single<R: Rng + ?Sized>(self, rng: &mut R) -> Drawn<PolicyType> {
        let Drawn { deck, cards, reshuffled } = self.draw(1, rng);
        Drawn { deck, cards: cards[0], reshuffled }
    }

    /// Top three cards, left in place.
    pub fn peek_standard(&self) -> [PolicyType; STANDARD_DRAW] {
        assert!(
            self.draw_pile.len() >= STANDARD_DRAW,
            "peek on a draw pile of {} cards",
            self.draw_pile.len()
        );
        [self.draw_pile[0], self.draw_pile[1], self.draw_pile[2]]
    }

    pub fn after_discarding(mut self, policy: PolicyType) -> Self {
        self.discard_pile.push(policy);
        self
    }

    pub fn after_discarding_all(mut self, policies: impl IntoIterator<Item = PolicyType>) -> Self {
        self.discard_pile.extend(policies);
        self
    }

    /// Reshuffles draw and discard together when fewer than a standard draw
    /// remain. Returns whether a reshuffle happened.
    pub fn replenished<R: Rng + ?Sized>(mut self, rng: &mut R) -> (Self, bool) {
        if self.draw_pile.len() >= STANDARD_DRAW {
            return (self, false);
        }
        let mut pile = std::mem::take(&mut self.draw_pile);
        pile.append(&mut self.discard_pile);
        pile.shuffle(rng);
        tracing::debug!(draw_pile = pile.len(), "reshuffled policy deck");
        self.draw_pile = pile;
        (self, true)
    }

    fn draw<R: Rng + ?Sized>(mut self, amount: usize, rng: &mut R) -> Drawn<Vec<PolicyType>> {
        assert!(
            self.draw_pile.len() >= amount,
            "drawing {amount} from a draw pile of {} cards",
            self.draw_pile.len()
        );
        let cards: Vec<PolicyType> = self.draw_pile.drain(..amount).collect();
        let (deck, reshuffled) = self.replenished(rng);
        Drawn { deck, cards, reshuffled }
    }
}
