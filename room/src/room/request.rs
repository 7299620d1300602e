use crate::types::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    StartRound,
    /// `player: None` credits the first player who is not drawing.
    Guess {
        player: Option<PlayerId>,
        text: String,
    },
    NextRound,
    ClearSurface,
    Tick(Generation),
    Shutdown,
}
