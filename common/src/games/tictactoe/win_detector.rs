use super::board::Board;
use super::types::{Mark, Outcome, Position};

/// Rows, then columns, then the main and anti diagonal.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

fn line_winner(board: &Board, line: &[(usize, usize); 3]) -> Option<Mark> {
    let cells = board.cells();
    let [(r0, c0), (r1, c1), (r2, c2)] = *line;
    let mark = cells[r0][c0];
    if mark != Mark::Empty && cells[r1][c1] == mark && cells[r2][c2] == mark {
        Some(mark)
    } else {
        None
    }
}

pub fn check_win(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|line| line_winner(board, line))
}

/// First completed line in scan order, for highlighting.
pub fn winning_line(board: &Board) -> Option<[Position; 3]> {
    LINES
        .iter()
        .find(|line| line_winner(board, line).is_some())
        .map(|line| line.map(|(row, col)| Position::new(row, col)))
}

pub fn evaluate(board: &Board) -> Outcome {
    match check_win(board) {
        Some(Mark::Computer) => Outcome::ComputerWins,
        Some(Mark::Player) => Outcome::PlayerWins,
        Some(Mark::Empty) => unreachable!("empty cells never complete a line"),
        None if board.is_full() => Outcome::Draw,
        None => Outcome::Ongoing,
    }
}
