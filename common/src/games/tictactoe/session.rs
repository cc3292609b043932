use crate::games::SessionRng;
use crate::scores::{ScoreSet, ScoreStore, Scores, record_game};
use crate::{DeviceId, debug_log, log};
use super::bot_controller::select_move;
use super::error::TicTacToeError;
use super::game_state::TicTacToeGameState;
use super::types::{FirstPlayerMode, GameMode, Outcome, Position, Side};

/// Front end for the human side(s) of a game.
pub trait HumanInput {
    /// Next cell for the side to move, or `None` when the human leaves the game.
    fn request_move(&mut self, state: &TicTacToeGameState) -> Option<Position>;

    fn show_state(&mut self, _state: &TicTacToeGameState) {}

    fn show_rejected_move(&mut self, _error: &TicTacToeError) {}

    fn show_game_over(&mut self, _state: &TicTacToeGameState, _tally: &ScoreSet) {}
}

#[derive(Debug, Clone, Copy)]
pub struct TicTacToeSessionSettings {
    pub mode: GameMode,
    pub first_player_mode: FirstPlayerMode,
}

#[derive(Debug)]
pub enum SessionError {
    Engine(TicTacToeError),
    Store(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Engine(e) => write!(f, "Engine error: {}", e),
            SessionError::Store(e) => write!(f, "Score store error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<TicTacToeError> for SessionError {
    fn from(e: TicTacToeError) -> Self {
        SessionError::Engine(e)
    }
}

impl From<String> for SessionError {
    fn from(e: String) -> Self {
        SessionError::Store(e)
    }
}

#[derive(Debug, Clone)]
pub struct GameReport {
    /// `Ongoing` when the human abandoned the game.
    pub outcome: Outcome,
    pub scores: Scores,
    pub moves: Vec<(Side, Position)>,
}

impl GameReport {
    pub fn is_abandoned(&self) -> bool {
        !self.outcome.is_terminal()
    }
}

/// Turn loop for one device. The device identifier and the score store are
/// injected; the session owns nothing that outlives a game besides its RNG.
pub struct TicTacToeSession<'a, S: ScoreStore> {
    device_id: DeviceId,
    store: &'a S,
    rng: SessionRng,
}

impl<'a, S: ScoreStore> TicTacToeSession<'a, S> {
    pub fn new(device_id: DeviceId, store: &'a S, rng: SessionRng) -> Self {
        Self {
            device_id,
            store,
            rng,
        }
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn scores(&self) -> Result<Scores, SessionError> {
        Ok(self.store.fetch_or_create(&self.device_id)?)
    }

    pub fn run(
        &mut self,
        settings: TicTacToeSessionSettings,
        input: &mut impl HumanInput,
    ) -> Result<GameReport, SessionError> {
        let scores = self.scores()?;
        let mut state =
            TicTacToeGameState::new(settings.mode, settings.first_player_mode, &mut self.rng);
        let mut moves = Vec::new();

        log!(
            "[session:{}] Starting {:?}, {:?} moves first (seed {})",
            self.device_id,
            settings.mode,
            state.current_side,
            self.rng.seed()
        );

        while !state.is_over() {
            input.show_state(&state);

            if let Some(difficulty) = state.difficulty().filter(|_| state.is_computer_turn()) {
                let position = select_move(&state.board, difficulty, &mut self.rng)?;
                state.place_mark(Side::Computer, position)?;
                debug_log!("[session:{}] Computer ({}) played {}", self.device_id, difficulty, position);
                moves.push((Side::Computer, position));
                continue;
            }

            let side = state.current_side;
            let Some(position) = input.request_move(&state) else {
                log!("[session:{}] Game abandoned after {} moves", self.device_id, moves.len());
                return Ok(GameReport {
                    outcome: Outcome::Ongoing,
                    scores,
                    moves,
                });
            };

            match state.place_mark(side, position) {
                Ok(_) => moves.push((side, position)),
                Err(e) => {
                    debug_log!("[session:{}] Rejected {:?} move at {}: {}", self.device_id, side, position, e);
                    input.show_rejected_move(&e);
                }
            }
        }

        let scores = record_game(self.store, &self.device_id, settings.mode, state.status)?;
        log!(
            "[session:{}] Game over: {} after {} moves",
            self.device_id,
            state.status,
            moves.len()
        );
        input.show_game_over(&state, scores.tally(settings.mode));

        Ok(GameReport {
            outcome: state.status,
            scores,
            moves,
        })
    }
}
