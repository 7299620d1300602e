use protocol::{GuessRecord, Stage};

pub struct State {
    pub stage: Stage,
    pub round: u32,
    pub topic: String,
    pub drawer: usize,
    pub guesses: Vec<GuessRecord>,
}

impl State {
    pub fn new(drawer: usize) -> Self {
        Self {
            stage: Stage::Waiting,
            round: 1,
            topic: String::new(),
            drawer,
            guesses: Vec::new(),
        }
    }
}
