use std::io::{BufRead, Write};

use common::games::tictactoe::{
    BOARD_SIZE, GameMode, HumanInput, Outcome, Position, Side, TicTacToeError, TicTacToeGameState,
};
use common::log;
use common::scores::{ScoreSet, Scores};

#[derive(Debug, PartialEq, Eq)]
pub enum ParsedInput {
    Move(Position),
    Quit,
    Invalid(String),
}

/// Parses a 1-based "row col" or "row,col" pair. `q` or `quit` leaves the game.
pub fn parse_position(line: &str) -> ParsedInput {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return ParsedInput::Quit;
    }

    let parts: Vec<&str> = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    let [row, col] = parts.as_slice() else {
        return ParsedInput::Invalid(format!("Expected \"row col\", got \"{}\"", trimmed));
    };

    let (Ok(row), Ok(col)) = (row.parse::<usize>(), col.parse::<usize>()) else {
        return ParsedInput::Invalid(format!("Row and column must be numbers, got \"{}\"", trimmed));
    };
    if !(1..=BOARD_SIZE).contains(&row) || !(1..=BOARD_SIZE).contains(&col) {
        return ParsedInput::Invalid(format!(
            "Row and column must be between 1 and {}",
            BOARD_SIZE
        ));
    }

    ParsedInput::Move(Position::new(row - 1, col - 1))
}

pub fn side_label(mode: GameMode, side: Side) -> &'static str {
    match (mode, side) {
        (GameMode::PlayerVsPlayer, Side::Player) => "X",
        (GameMode::PlayerVsPlayer, Side::Computer) => "O",
        (GameMode::PlayerVsComputer(_), Side::Player) => "You (X)",
        (GameMode::PlayerVsComputer(_), Side::Computer) => "Computer (O)",
    }
}

pub fn outcome_message(mode: GameMode, outcome: Outcome) -> String {
    match (mode, outcome.winner()) {
        (_, Some(side)) => format!("{} wins!", side_label(mode, side)),
        (_, None) if outcome == Outcome::Draw => "It's a draw.".to_string(),
        _ => "Game abandoned.".to_string(),
    }
}

pub fn format_tally(label: &str, tally: &ScoreSet) -> String {
    format!(
        "{:<10} wins {:>3}  losses {:>3}  draws {:>3}",
        label, tally.wins, tally.losses, tally.draws
    )
}

pub fn format_scores(scores: &Scores) -> String {
    [
        format_tally("PvP", &scores.player_vs_player),
        format_tally("PvAI-Easy", &scores.vs_computer_easy),
        format_tally("PvAI-Med", &scores.vs_computer_medium),
        format_tally("PvAI-Hard", &scores.vs_computer_hard),
    ]
    .join("\n")
}

/// Line-oriented front end over any reader/writer pair, stdin/stdout in the binary.
pub struct TerminalInput<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    output_broken: bool,
}

impl<R: BufRead, W: Write> TerminalInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            output_broken: false,
        }
    }

    /// Set once a write fails; nothing is written afterwards.
    pub fn output_broken(&self) -> bool {
        self.output_broken
    }

    fn emit(&mut self, text: &str) -> bool {
        if self.output_broken {
            return false;
        }
        let result = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.flush());
        if let Err(e) = result {
            log!("Terminal output failed, giving up on it: {}", e);
            self.output_broken = true;
        }
        !self.output_broken
    }

    /// Prints `question` and returns the trimmed answer. `None` on end of input
    /// or when the question could not be shown.
    pub fn prompt(&mut self, question: &str) -> Option<String> {
        if !self.emit(question) {
            return None;
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    pub fn confirm(&mut self, question: &str) -> bool {
        matches!(
            self.prompt(question).as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("y") | Some("yes")
        )
    }

    pub fn print(&mut self, text: &str) {
        self.emit(&format!("{}\n", text));
    }

    fn render_board(&mut self, state: &TicTacToeGameState) {
        let highlight = state.winning_line();
        let mut out = String::from("    1 2 3\n");
        for (row_index, row) in state.board.cells().iter().enumerate() {
            out.push_str(&format!("  {} ", row_index + 1));
            for (col_index, mark) in row.iter().enumerate() {
                let position = Position::new(row_index, col_index);
                let on_line = highlight.is_some_and(|line| line.contains(&position));
                let symbol = if on_line {
                    mark.symbol().to_ascii_lowercase()
                } else {
                    mark.symbol()
                };
                out.push(symbol);
                if col_index + 1 < BOARD_SIZE {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        self.emit(&out);
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> HumanInput for TerminalInput<R, W> {
    fn request_move(&mut self, state: &TicTacToeGameState) -> Option<Position> {
        let label = side_label(state.mode, state.current_side);
        loop {
            let line = self.prompt(&format!("{} to move (row col, q to quit): ", label))?;
            match parse_position(&line) {
                ParsedInput::Move(position) => return Some(position),
                ParsedInput::Quit => return None,
                ParsedInput::Invalid(reason) => self.print(&reason),
            }
        }
    }

    fn show_state(&mut self, state: &TicTacToeGameState) {
        self.print("");
        if let Some(position) = state.last_move {
            let row = position.row + 1;
            let col = position.col + 1;
            let mover = side_label(state.mode, state.current_side.opponent());
            self.print(&format!("{} played {} {}", mover, row, col));
        }
        self.render_board(state);
    }

    fn show_rejected_move(&mut self, error: &TicTacToeError) {
        self.print(&format!("Move rejected: {}", error));
    }

    fn show_game_over(&mut self, state: &TicTacToeGameState, tally: &ScoreSet) {
        self.print("");
        self.render_board(state);
        self.print(&outcome_message(state.mode, state.status));
        self.print(&format_tally("Record", tally));
    }
}
