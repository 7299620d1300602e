use protocol::{GuessRecord, RoomEvent, RoomSnapshot, Stage, TurnEnd};
use tracing::{debug, info};

use crate::player::Player;
use crate::types::PlayerId;
use super::config::{Config, WordBank};
use super::error::{ConfigError, RoomResult};
use super::guess;
use super::score::{self, Scoring};
use super::state::State;
use super::timer::RoundTimer;

/// The round state machine. Every handler runs to completion and returns the
/// events it produced; an empty list means the request did not apply.
pub struct GameController {
    state: State,
    players: Vec<Player>,
    word_bank: WordBank,
    timer: RoundTimer,
    scoring: Scoring,
}

impl GameController {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            players = config.roster.len(),
            words = config.word_bank.len(),
            duration = config.duration,
            "room configured"
        );
        let mut players: Vec<Player> = config.roster.iter().map(Player::new).collect();
        players[config.first_drawer].set_drawing(true);
        Ok(Self {
            state: State::new(config.first_drawer),
            players,
            word_bank: config.word_bank,
            timer: RoundTimer::new(config.duration),
            scoring: config.scoring,
        })
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn drawer(&self) -> usize {
        self.state.drawer
    }

    pub fn time_remaining(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn start_round(&mut self) -> Vec<RoomEvent> {
        if self.state.stage != Stage::Waiting {
            debug!(stage = ?self.state.stage, "start ignored");
            return vec![];
        }
        self.state.topic = self.word_bank.pick();
        self.state.guesses.clear();
        self.timer.start();
        self.state.stage = Stage::Drawing;
        info!(round = self.state.round, drawer = %self.players[self.state.drawer].get_name(), "round started");

        vec![
            RoomEvent::SurfaceCleared,
            RoomEvent::TurnStart {
                round: self.state.round,
                drawer: self.state.drawer as PlayerId,
            },
            RoomEvent::Topic {
                topic_word: self.state.topic.clone(),
            },
        ]
    }

    pub fn tick(&mut self) -> Vec<RoomEvent> {
        if self.state.stage != Stage::Drawing || !self.timer.is_running() {
            debug!(stage = ?self.state.stage, "tick ignored");
            return vec![];
        }
        let expired = self.timer.tick();
        let mut events = vec![RoomEvent::CountDown(self.timer.remaining())];
        if expired {
            self.finish();
            info!(round = self.state.round, topic = %self.state.topic, "time is up");
            events.push(RoomEvent::TurnEnd(TurnEnd::TimesUp));
        }
        events
    }

    /// Guess typed on the shared device; credited to the first player who is
    /// not drawing.
    pub fn submit_guess(&mut self, text: &str) -> RoomResult<Vec<RoomEvent>> {
        match self.players.iter().position(|p| !p.drawing) {
            Some(idx) => self.submit_guess_as(idx as PlayerId, text),
            None => {
                debug!("nobody but the drawer to credit, guess ignored");
                Ok(vec![])
            }
        }
    }

    pub fn submit_guess_as(&mut self, player: PlayerId, text: &str) -> RoomResult<Vec<RoomEvent>> {
        let idx = player as usize;
        if self.state.stage != Stage::Drawing {
            debug!(stage = ?self.state.stage, "guess outside drawing ignored");
            return Ok(vec![]);
        }
        if guess::is_blank(text) {
            debug!("blank guess ignored");
            return Ok(vec![]);
        }
        if idx >= self.players.len() || idx == self.state.drawer {
            debug!(player = idx, "guess from drawer or unknown seat ignored");
            return Ok(vec![]);
        }

        let name = self.players[idx].get_name().to_string();
        let correct = guess::evaluate(text, &self.state.topic);
        // scores settle before the log grows, so a failed award leaves no trace
        let award = if correct {
            Some(score::award_correct_guess(&mut self.players, &name, &self.scoring)?)
        } else {
            None
        };
        let record = GuessRecord {
            player: name.clone(),
            text: text.trim().to_string(),
            correct,
        };
        self.state.guesses.push(record.clone());
        let mut events = vec![RoomEvent::Guess(record)];

        if let Some(award) = award {
            self.finish();
            info!(
                round = self.state.round,
                drawer = %self.players[award.drawer].get_name(),
                guesser = %self.players[award.guesser].get_name(),
                "word guessed"
            );
            events.push(RoomEvent::TurnEnd(TurnEnd::Guessed { by: name }));
        }
        Ok(events)
    }

    pub fn next_round(&mut self) -> Vec<RoomEvent> {
        if self.state.stage != Stage::Finished {
            debug!(stage = ?self.state.stage, "next round ignored");
            return vec![];
        }
        let count = self.players.len();
        let next = (self.state.drawer + 1) % count;
        for (idx, player) in self.players.iter_mut().enumerate() {
            player.set_drawing(idx == next);
        }
        self.state.drawer = next;
        self.state.round += 1;
        self.state.topic.clear();
        self.state.stage = Stage::Waiting;

        vec![RoomEvent::NextTurn {
            round: self.state.round,
            drawer: next as PlayerId,
        }]
    }

    /// Only the drawing surface cares; game state is untouched.
    pub fn clear_surface(&self) -> Vec<RoomEvent> {
        vec![RoomEvent::SurfaceCleared]
    }

    /// External teardown while a round is live: the timer stops, nothing else.
    pub fn teardown(&mut self) {
        self.timer.stop();
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            stage: self.state.stage,
            round: self.state.round,
            topic: match self.state.stage {
                Stage::Waiting => None,
                _ => Some(self.state.topic.clone()),
            },
            time_remaining: self.timer.remaining(),
            drawer: self.state.drawer as PlayerId,
            players: self.players.iter()
                .enumerate()
                .map(|(idx, p)| p.get_state(idx as PlayerId))
                .collect(),
            guesses: self.state.guesses.clone(),
        }
    }

    fn finish(&mut self) {
        self.timer.stop();
        self.state.stage = Stage::Finished;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::error::RoomError;

    fn controller(players: usize, words: &[&str]) -> GameController {
        let mut config = Config::new(WordBank::new(words.iter().copied(), Some(0)).unwrap());
        config.roster = (1..=players).map(|i| format!("Player {}", i)).collect();
        GameController::new(config).unwrap()
    }

    fn scores(ctl: &GameController) -> Vec<u32> {
        ctl.snapshot().players.iter().map(|p| p.score).collect()
    }

    fn drawing_flags(ctl: &GameController) -> Vec<bool> {
        ctl.snapshot().players.iter().map(|p| p.drawing).collect()
    }

    #[test]
    fn session_starts_waiting_with_a_drawer() {
        let ctl = controller(3, &["cat"]);
        let snap = ctl.snapshot();
        assert_eq!(snap.stage, Stage::Waiting);
        assert_eq!(snap.round, 1);
        assert_eq!(snap.topic, None);
        assert_eq!(drawing_flags(&ctl), vec![true, false, false]);
    }

    #[test]
    fn start_round_assigns_word_and_clears_surface() {
        let mut ctl = controller(3, &["cat"]);
        let events = ctl.start_round();
        assert_eq!(events, vec![
            RoomEvent::SurfaceCleared,
            RoomEvent::TurnStart { round: 1, drawer: 0 },
            RoomEvent::Topic { topic_word: "cat".into() },
        ]);
        let snap = ctl.snapshot();
        assert_eq!(snap.stage, Stage::Drawing);
        assert_eq!(snap.topic.as_deref(), Some("cat"));
        assert_eq!(snap.time_remaining, 60);

        // a second start while drawing changes nothing
        assert!(ctl.start_round().is_empty());
    }

    #[test]
    fn cat_scenario() {
        let mut ctl = controller(3, &["cat"]);
        ctl.start_round();
        ctl.tick();
        let before = ctl.time_remaining();

        let events = ctl.submit_guess("dog").unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(ctl.stage(), Stage::Drawing);
        assert_eq!(ctl.time_remaining(), before);
        assert_eq!(scores(&ctl), vec![0, 0, 0]);

        let events = ctl.submit_guess("Cat ").unwrap();
        assert_eq!(events.last(), Some(&RoomEvent::TurnEnd(TurnEnd::Guessed { by: "Player 2".into() })));
        assert_eq!(ctl.stage(), Stage::Finished);
        assert_eq!(scores(&ctl), vec![10, 15, 0]);

        let snap = ctl.snapshot();
        assert_eq!(snap.guesses, vec![
            GuessRecord { player: "Player 2".into(), text: "dog".into(), correct: false },
            GuessRecord { player: "Player 2".into(), text: "Cat".into(), correct: true },
        ]);
        // the word stays visible for review
        assert_eq!(snap.topic.as_deref(), Some("cat"));
    }

    #[test]
    fn submitting_player_is_credited() {
        let mut ctl = controller(4, &["cat"]);
        ctl.start_round();
        ctl.submit_guess_as(3, "CAT").unwrap();
        assert_eq!(scores(&ctl), vec![10, 0, 0, 15]);
    }

    #[test]
    fn only_one_correct_guess_per_round() {
        let mut ctl = controller(3, &["cat"]);
        ctl.start_round();
        ctl.submit_guess_as(1, "cat").unwrap();
        assert!(ctl.submit_guess_as(2, "cat").unwrap().is_empty());
        assert!(ctl.submit_guess("cat").unwrap().is_empty());
        assert_eq!(scores(&ctl), vec![10, 15, 0]);
        assert_eq!(ctl.snapshot().guesses.len(), 1);
    }

    #[test]
    fn ignored_guesses_are_not_recorded() {
        let mut ctl = controller(3, &["cat"]);
        assert!(ctl.submit_guess("cat").unwrap().is_empty());
        ctl.start_round();
        assert!(ctl.submit_guess("   ").unwrap().is_empty());
        assert!(ctl.submit_guess_as(0, "cat").unwrap().is_empty());
        assert!(ctl.submit_guess_as(7, "cat").unwrap().is_empty());
        assert!(ctl.snapshot().guesses.is_empty());
        assert_eq!(ctl.stage(), Stage::Drawing);
    }

    #[test]
    fn sixty_ticks_end_the_round() {
        let mut ctl = controller(3, &["cat"]);
        ctl.start_round();
        let mut last = ctl.time_remaining();
        for i in 0..59 {
            let events = ctl.tick();
            assert_eq!(events, vec![RoomEvent::CountDown(59 - i)]);
            assert_eq!(ctl.time_remaining(), last - 1);
            last = ctl.time_remaining();
            assert_eq!(ctl.stage(), Stage::Drawing);
        }
        let events = ctl.tick();
        assert_eq!(events, vec![RoomEvent::CountDown(0), RoomEvent::TurnEnd(TurnEnd::TimesUp)]);
        assert_eq!(ctl.time_remaining(), 0);
        assert_eq!(ctl.stage(), Stage::Finished);
        assert_eq!(scores(&ctl), vec![0, 0, 0]);
        assert!(ctl.snapshot().guesses.is_empty());

        // late ticks and guesses do nothing
        assert!(ctl.tick().is_empty());
        assert!(ctl.submit_guess("cat").unwrap().is_empty());
        assert_eq!(ctl.time_remaining(), 0);
    }

    #[test]
    fn guess_on_last_second_scores() {
        let mut ctl = controller(2, &["cat"]);
        ctl.start_round();
        for _ in 0..59 {
            ctl.tick();
        }
        assert_eq!(ctl.time_remaining(), 1);
        ctl.submit_guess("cat").unwrap();
        assert!(ctl.tick().is_empty());
        assert_eq!(ctl.stage(), Stage::Finished);
        assert_eq!(scores(&ctl), vec![10, 15]);
    }

    #[test]
    fn next_round_from_last_seat_wraps() {
        let mut config = Config::new(WordBank::new(["cat"], None).unwrap());
        config.first_drawer = 2;
        let mut ctl = GameController::new(config).unwrap();
        ctl.start_round();
        for _ in 0..60 {
            ctl.tick();
        }
        let events = ctl.next_round();
        assert_eq!(events, vec![RoomEvent::NextTurn { round: 2, drawer: 0 }]);
        assert_eq!(ctl.stage(), Stage::Waiting);
        assert_eq!(ctl.drawer(), 0);
        assert_eq!(drawing_flags(&ctl), vec![true, false, false]);
        assert_eq!(ctl.snapshot().topic, None);
    }

    #[test]
    fn rotation_is_cyclic() {
        let n = 4;
        let mut ctl = controller(n, &["cat"]);
        let first = ctl.drawer();
        for _ in 0..n {
            ctl.start_round();
            ctl.submit_guess("cat").unwrap();
            ctl.next_round();
            assert_eq!(drawing_flags(&ctl).iter().filter(|d| **d).count(), 1);
        }
        assert_eq!(ctl.drawer(), first);
        assert_eq!(ctl.round(), 1 + n as u32);
        // every seat drew once and was paid for it
        assert!(scores(&ctl).iter().all(|s| *s >= 10));
    }

    #[test]
    fn next_round_only_from_finished() {
        let mut ctl = controller(3, &["cat"]);
        assert!(ctl.next_round().is_empty());
        ctl.start_round();
        assert!(ctl.next_round().is_empty());
        assert_eq!(ctl.round(), 1);
        assert_eq!(ctl.stage(), Stage::Drawing);
    }

    #[test]
    fn scores_never_decrease() {
        let mut ctl = controller(3, &["cat", "dog"]);
        let mut last = scores(&ctl);
        for round in 0..9 {
            ctl.start_round();
            let word = ctl.snapshot().topic.unwrap();
            if round % 2 == 0 {
                ctl.submit_guess(&word).unwrap();
            } else {
                for _ in 0..60 {
                    ctl.tick();
                }
            }
            ctl.next_round();
            let now = scores(&ctl);
            assert!(now.iter().zip(&last).all(|(a, b)| a >= b));
            last = now;
        }
    }

    #[test]
    fn clear_surface_leaves_state_alone() {
        let mut ctl = controller(3, &["cat"]);
        ctl.start_round();
        let before = ctl.snapshot();
        assert_eq!(ctl.clear_surface(), vec![RoomEvent::SurfaceCleared]);
        assert_eq!(ctl.snapshot(), before);
    }

    #[test]
    fn lone_player_cannot_guess() {
        let mut ctl = controller(1, &["cat"]);
        ctl.start_round();
        assert!(ctl.submit_guess("cat").unwrap().is_empty());
        assert_eq!(ctl.stage(), Stage::Drawing);
    }

    #[test]
    fn lost_drawer_surfaces_as_error() {
        let mut ctl = controller(3, &["cat"]);
        ctl.start_round();
        ctl.players[0].set_drawing(false);
        assert_eq!(ctl.submit_guess_as(1, "cat"), Err(RoomError::NoDrawer));
        let snap = ctl.snapshot();
        assert!(snap.guesses.is_empty());
        assert_eq!(snap.stage, Stage::Drawing);
        assert_eq!(scores(&ctl), vec![0, 0, 0]);
    }
}
