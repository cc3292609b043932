use crate::games::SessionRng;
use super::board::Board;
use super::error::TicTacToeError;
use super::types::{Difficulty, FirstPlayerMode, GameMode, Outcome, Position, Side};
use super::win_detector::{evaluate, winning_line};

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub mode: GameMode,
    pub current_side: Side,
    pub status: Outcome,
    pub last_move: Option<Position>,
}

impl TicTacToeGameState {
    pub fn new(mode: GameMode, first_player_mode: FirstPlayerMode, rng: &mut SessionRng) -> Self {
        let first_side = match first_player_mode {
            FirstPlayerMode::Player => Side::Player,
            FirstPlayerMode::Computer => Side::Computer,
            FirstPlayerMode::Random => {
                if rng.random_bool() {
                    Side::Player
                } else {
                    Side::Computer
                }
            }
        };
        Self::with_first_side(mode, first_side)
    }

    pub fn with_first_side(mode: GameMode, first_side: Side) -> Self {
        Self {
            board: Board::new(),
            mode,
            current_side: first_side,
            status: Outcome::Ongoing,
            last_move: None,
        }
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        match self.mode {
            GameMode::PlayerVsComputer(difficulty) => Some(difficulty),
            GameMode::PlayerVsPlayer => None,
        }
    }

    /// True when the engine, not a human, owns the side to move.
    pub fn is_computer_turn(&self) -> bool {
        self.difficulty().is_some()
            && self.current_side == Side::Computer
            && self.status == Outcome::Ongoing
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn place_mark(&mut self, side: Side, position: Position) -> Result<Outcome, TicTacToeError> {
        if self.status.is_terminal() {
            return Err(TicTacToeError::GameOver(self.status));
        }

        if side != self.current_side {
            return Err(TicTacToeError::NotYourTurn(side));
        }

        if !position.is_on_board() {
            return Err(TicTacToeError::OutOfBounds(position));
        }

        if !self.board.is_empty_at(position) {
            return Err(TicTacToeError::CellOccupied(position));
        }

        self.board.set(position, side.mark())?;
        self.last_move = Some(position);
        self.status = evaluate(&self.board);

        if self.status == Outcome::Ongoing {
            self.current_side = side.opponent();
        }

        Ok(self.status)
    }

    pub fn winning_line(&self) -> Option<[Position; 3]> {
        winning_line(&self.board)
    }
}
