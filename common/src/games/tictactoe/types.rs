use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::TicTacToeError;

pub const BOARD_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    Computer,
    Player,
}

impl Mark {
    /// Integer encoding used by browser front ends: -1 empty, 0 computer, 1 player.
    pub fn to_sentinel(self) -> i32 {
        match self {
            Mark::Empty => -1,
            Mark::Computer => 0,
            Mark::Player => 1,
        }
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Mark::Empty => None,
            Mark::Computer => Some(Side::Computer),
            Mark::Player => Some(Side::Player),
        }
    }

    /// The player mark is drawn as X, the computer mark as O.
    pub fn symbol(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::Computer => 'O',
            Mark::Player => 'X',
        }
    }
}

impl TryFrom<i32> for Mark {
    type Error = TicTacToeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Mark::Empty),
            0 => Ok(Mark::Computer),
            1 => Ok(Mark::Player),
            other => Err(TicTacToeError::InvalidInput(format!(
                "unknown cell value {}",
                other
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Computer,
    Player,
}

impl Side {
    pub fn mark(self) -> Mark {
        match self {
            Side::Computer => Mark::Computer,
            Side::Player => Mark::Player,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Computer => Side::Player,
            Side::Player => Side::Computer,
        }
    }
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        side.mark()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Ongoing,
    ComputerWins,
    PlayerWins,
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::ComputerWins => Some(Side::Computer),
            Outcome::PlayerWins => Some(Side::Player),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }

    pub fn won_by(side: Side) -> Self {
        match side {
            Side::Computer => Outcome::ComputerWins,
            Side::Player => Outcome::PlayerWins,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Ongoing => "ongoing",
            Outcome::ComputerWins => "computer wins",
            Outcome::PlayerWins => "player wins",
            Outcome::Draw => "draw",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameMode {
    PlayerVsPlayer,
    PlayerVsComputer(Difficulty),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstPlayerMode {
    #[default]
    Player,
    Computer,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_round_trip() {
        for mark in [Mark::Empty, Mark::Computer, Mark::Player] {
            assert_eq!(Mark::try_from(mark.to_sentinel()).unwrap(), mark);
        }
    }

    #[test]
    fn test_unknown_sentinel_is_invalid_input() {
        assert!(matches!(
            Mark::try_from(2),
            Err(TicTacToeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_opponent_flips_side() {
        assert_eq!(Side::Computer.opponent(), Side::Player);
        assert_eq!(Side::Player.opponent().opponent(), Side::Player);
    }

    #[test]
    fn test_outcome_winner() {
        assert_eq!(Outcome::ComputerWins.winner(), Some(Side::Computer));
        assert_eq!(Outcome::won_by(Side::Player), Outcome::PlayerWins);
        assert_eq!(Outcome::Draw.winner(), None);
        assert!(!Outcome::Ongoing.is_terminal());
        assert!(Outcome::Draw.is_terminal());
    }
}
