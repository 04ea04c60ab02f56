//! Secret Hitler rules engine.
//!
//! Subsystems, leaves first: [`deck`], [`players`] and [`types`] model the
//! board; [`election`] and [`votes`] run governments; [`enactment`],
//! [`powers`], [`veto`] and [`chaos`] resolve their outcomes; [`machine`]
//! composes everything behind [`machine::apply`]. [`coherence`] validates a
//! whole state and is run after every transition in debug builds.

pub mod auth;
pub mod chaos;
pub mod coherence;
pub mod config;
pub mod deck;
pub mod election;
pub mod enactment;
pub mod government;
pub mod legal;
pub mod legislative;
pub mod lobby;
pub mod machine;
pub mod players;
pub mod powers;
pub mod rejection;
pub mod state;
pub mod types;
pub mod veto;
pub mod votes;

#[cfg(test)]
pub(crate) mod testing;

pub use coherence::{check_coherence, check_state, CoherenceViolation};
pub use config::{GameConfiguration, Rules};
pub use legal::legal_actions;
pub use machine::apply;
pub use rejection::Rejection;
pub use state::{GameState, Lobby, RunningGame};
