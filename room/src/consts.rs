pub const ROOM_SIZE: usize = 8;

pub const TICK_PERIOD: tokio::time::Duration = tokio::time::Duration::from_secs(1);
pub const ROUND_SECS: u32 = 60;

pub const DRAWER_BONUS: u32 = 10;
pub const GUESSER_BONUS: u32 = 15;

pub const DEFAULT_ROSTER: &str = "Player 1,Player 2,Player 3";

pub const REQ_BUFFER: usize = 32;
pub const EVENT_BUFFER: usize = 128;

pub const BUILTIN_WORDS: [&str; 40] = [
    "cat", "dog", "house", "car", "tree", "sun", "moon", "star", "flower", "bird",
    "fish", "book", "phone", "computer", "chair", "table", "door", "window", "apple", "banana",
    "pizza", "cake", "guitar", "piano", "bicycle", "airplane", "boat", "train", "elephant", "lion",
    "butterfly", "rainbow", "mountain", "ocean", "fire", "ice", "heart", "smile", "crown", "diamond",
];
