use serde::{Serialize, Deserialize};
use crate::JsonMessage;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub name: String,
    pub idx: u8,
    pub score: u32,
    pub drawing: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Waiting,
    Drawing,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuessRecord {
    pub player: String,
    pub text: String,
    pub correct: bool,
}

/// Read-only view of the room, republished after every handled request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RoomSnapshot {
    pub stage: Stage,
    pub round: u32,
    /// `None` while waiting.
    pub topic: Option<String>,
    pub time_remaining: u32,
    pub drawer: u8,
    pub players: Vec<PlayerState>,
    pub guesses: Vec<GuessRecord>,
}

impl RoomSnapshot {
    pub fn drawer_name(&self) -> Option<&str> {
        self.players.iter()
            .find(|p| p.drawing)
            .map(|p| p.name.as_str())
    }
}

impl JsonMessage<'_> for RoomSnapshot {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnEnd {
    Guessed {
        by: String,
    },
    TimesUp,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoomEvent {
    /// The drawing surface should wipe itself.
    SurfaceCleared,
    TurnStart {
        round: u32,
        drawer: u8,
    },
    Topic {
        topic_word: String
    },
    CountDown(u32),
    Guess(GuessRecord),
    TurnEnd(TurnEnd),
    NextTurn {
        round: u32,
        drawer: u8,
    },
}

impl JsonMessage<'_> for RoomEvent {}
