use std::collections::HashSet;
use std::path::Path;

use protocol::{JsonMessage, Lexicon};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::consts::*;
use super::error::ConfigError;
use super::score::Scoring;

pub struct Config {
    pub word_bank: WordBank,
    pub duration: u32,
    pub scoring: Scoring,
    pub roster: Vec<String>,
    pub first_drawer: usize,
}

impl Config {
    pub fn new(word_bank: WordBank) -> Self {
        Self {
            word_bank,
            duration: ROUND_SECS,
            scoring: Scoring::default(),
            roster: DEFAULT_ROSTER.split(',').map(str::to_string).collect(),
            first_drawer: 0,
        }
    }

    /// Everything the room needs to never enter an undefined round.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.roster.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if self.roster.len() > ROOM_SIZE {
            return Err(ConfigError::TooManyPlayers(self.roster.len()));
        }
        let mut seen = HashSet::new();
        for name in &self.roster {
            if name.trim().is_empty() {
                return Err(ConfigError::BlankPlayerName);
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicatePlayer(name.clone()));
            }
        }
        if self.first_drawer >= self.roster.len() {
            return Err(ConfigError::DrawerOutOfRange {
                idx: self.first_drawer,
                count: self.roster.len(),
            });
        }
        Ok(())
    }
}

/// Fixed candidate list with its own random source.
pub struct WordBank {
    words: Vec<String>,
    rng: StdRng,
}

impl WordBank {
    /// Blank entries are dropped; nothing left is a configuration error.
    pub fn new<I, S>(words: I, seed: Option<u64>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words.into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(ConfigError::EmptyLexicon);
        }
        Ok(Self { words, rng: rng(seed) })
    }

    pub fn builtin(seed: Option<u64>) -> Self {
        Self {
            words: BUILTIN_WORDS.iter().map(|w| w.to_string()).collect(),
            rng: rng(seed),
        }
    }

    pub fn from_file(path: impl AsRef<Path>, seed: Option<u64>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::LexiconIo {
            path: path.display().to_string(),
            source,
        })?;
        let lexicon = Lexicon::from_json(&text).map_err(|source| ConfigError::LexiconParse {
            path: path.display().to_string(),
            source,
        })?;
        info!(name = %lexicon.name, words = lexicon.lexicon.len(), "lexicon loaded");
        Self::new(lexicon.lexicon, seed)
    }

    /// Uniform pick; the same word may come up in consecutive rounds.
    pub fn pick(&mut self) -> String {
        let idx = self.rng.gen_range(0..self.words.len());
        self.words[idx].clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.words.len()
    }
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
