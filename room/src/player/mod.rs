use protocol::PlayerState;

use crate::types::PlayerId;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) score: u32,
    pub(crate) drawing: bool,
}

impl Player {
    pub(crate) fn new(name: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            score: 0,
            drawing: false,
        }
    }

    pub(crate) fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub(crate) fn set_drawing(&mut self, drawing: bool) {self.drawing = drawing;}

    pub(crate) fn get_name(&self) -> &str {
        &self.name
    }

    pub(crate) fn get_state(&self, idx: PlayerId) -> PlayerState {
        PlayerState {
            name: self.name.clone(),
            idx,
            score: self.score,
            drawing: self.drawing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_saturate() {
        let mut p = Player::new("Player 1");
        p.add_points(u32::MAX - 1);
        p.add_points(15);
        assert_eq!(p.score, u32::MAX);
    }

    #[test]
    fn state_carries_seat() {
        let mut p = Player::new("Player 2");
        p.set_drawing(true);
        let state = p.get_state(1);
        assert_eq!(state.idx, 1);
        assert!(state.drawing);
        assert_eq!(state.name, "Player 2");
    }
}
