mod board;
mod bot_controller;
mod error;
mod game_state;
mod session;
mod types;
mod win_detector;

pub use board::{Board, ProvisionalMove};
pub use bot_controller::{minimax_value, play_computer_move, select_move, select_move_for};
pub use error::TicTacToeError;
pub use game_state::TicTacToeGameState;
pub use session::{
    GameReport, HumanInput, SessionError, TicTacToeSession, TicTacToeSessionSettings,
};
pub use types::{BOARD_SIZE, Difficulty, FirstPlayerMode, GameMode, Mark, Outcome, Position, Side};
pub use win_detector::{check_win, evaluate, winning_line};
