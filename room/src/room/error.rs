use thiserror::Error;

/// Refuses to start the room.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("the word list is empty")]
    EmptyLexicon,
    #[error("the player roster is empty")]
    EmptyRoster,
    #[error("the roster holds {0} players, at most {} fit", crate::consts::ROOM_SIZE)]
    TooManyPlayers(usize),
    #[error("player names must not be blank")]
    BlankPlayerName,
    #[error("player name {0:?} appears twice")]
    DuplicatePlayer(String),
    #[error("round duration must be at least one second")]
    ZeroDuration,
    #[error("starting drawer {idx} is out of range for {count} players")]
    DrawerOutOfRange { idx: usize, count: usize },
    #[error("cannot read lexicon file {path}")]
    LexiconIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse lexicon file {path}")]
    LexiconParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The state machine reached a configuration it should never reach.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RoomError {
    #[error("no player is marked as drawing")]
    NoDrawer,
    #[error("{0:?} cannot be credited with a guess")]
    BadGuesser(String),
}

pub type RoomResult<T> = Result<T, RoomError>;
