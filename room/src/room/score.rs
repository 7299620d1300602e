use crate::consts::*;
use crate::player::Player;
use super::error::{RoomError, RoomResult};

/// Points handed out for one correct guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoring {
    pub drawer_bonus: u32,
    pub guesser_bonus: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            drawer_bonus: DRAWER_BONUS,
            guesser_bonus: GUESSER_BONUS,
        }
    }
}

/// Seats credited by [`award_correct_guess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    pub drawer: usize,
    pub guesser: usize,
}

/// Credits the drawer and the named guesser; nobody else is touched.
pub fn award_correct_guess(players: &mut [Player], guesser: &str, scoring: &Scoring) -> RoomResult<Award> {
    let drawer = players.iter()
        .position(|p| p.drawing)
        .ok_or(RoomError::NoDrawer)?;
    let guesser = players.iter()
        .position(|p| p.get_name() == guesser && !p.drawing)
        .ok_or_else(|| RoomError::BadGuesser(guesser.to_string()))?;

    players[drawer].add_points(scoring.drawer_bonus);
    players[guesser].add_points(scoring.guesser_bonus);
    Ok(Award { drawer, guesser })
}
