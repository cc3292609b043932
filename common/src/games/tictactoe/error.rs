use super::types::{Outcome, Position, Side};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicTacToeError {
    /// A move was requested for a board that is already decided.
    InvalidState(Outcome),
    /// The board handed in is malformed.
    InvalidInput(String),
    OutOfBounds(Position),
    CellOccupied(Position),
    NotYourTurn(Side),
    GameOver(Outcome),
}

impl std::fmt::Display for TicTacToeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicTacToeError::InvalidState(outcome) => {
                write!(f, "No move can be selected, board is already decided ({})", outcome)
            }
            TicTacToeError::InvalidInput(reason) => write!(f, "Invalid board: {}", reason),
            TicTacToeError::OutOfBounds(position) => {
                write!(f, "Position {} is out of bounds", position)
            }
            TicTacToeError::CellOccupied(position) => {
                write!(f, "Cell {} is already marked", position)
            }
            TicTacToeError::NotYourTurn(side) => write!(f, "It is not {:?}'s turn", side),
            TicTacToeError::GameOver(outcome) => write!(f, "Game is already over ({})", outcome),
        }
    }
}

impl std::error::Error for TicTacToeError {}
