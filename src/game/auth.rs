//! Resolves external names to seats for actions that belong to one player.

use super::players::PlayerMap;
use super::rejection::Rejection;
use super::types::PlayerNumber;

/// The actor must be seated and must be the player the decision belongs to.
pub fn authorize(players: &PlayerMap, actor: &str, expected: PlayerNumber) -> Result<PlayerNumber, Rejection> {
    let number = players.number_of(actor).ok_or(Rejection::ActorNotPlayer)?;
    if number != expected {
        return Err(Rejection::Unauthorized);
    }
    Ok(number)
}

pub fn resolve_target(players: &PlayerMap, target: &str) -> Result<PlayerNumber, Rejection> {
    players.number_of(target).ok_or(Rejection::TargetNotPlayer)
}
