use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of reasons a transition refuses an action. A rejection never
/// changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    #[error("you are not the player this decision belongs to")]
    Unauthorized,
    #[error("you are not a player in this game")]
    ActorNotPlayer,
    #[error("the chosen target is not a player in this game")]
    TargetNotPlayer,
    #[error("that player has already been investigated")]
    AlreadyInvestigated,
    #[error("policy index {0} is out of range")]
    InvalidPolicyIndex(usize),
    #[error("no game with that id")]
    NoSuchGame,
    #[error("the game is not waiting for that action")]
    WrongEphemeralState,
    #[error("already joined this lobby")]
    AlreadyJoined,
    #[error("the lobby is full")]
    LobbyFull,
    #[error("not in this lobby")]
    NotInLobby,
    #[error("{have} players joined, at least {need} are required")]
    NotEnoughPlayers { have: usize, need: usize },
    #[error("no rules cover a game of {0} players")]
    UnsupportedPlayerCount(usize),
    #[error("that player cannot be nominated chancellor")]
    IneligibleChancellor,
    #[error("that player cannot be targeted by this power")]
    InvalidTarget,
    #[error("you have already voted")]
    AlreadyVoted,
    #[error("veto power is not unlocked yet")]
    VetoNotUnlocked,
    #[error("veto has already been refused for this agenda")]
    VetoAlreadyUsed,
    #[error("a veto request is awaiting the president")]
    VetoPending,
    #[error("the game is over")]
    GameCompleted,
}
