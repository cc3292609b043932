use crate::games::SessionRng;
use super::board::Board;
use super::error::TicTacToeError;
use super::types::{Difficulty, Mark, Outcome, Position, Side};
use super::win_detector::{check_win, evaluate};

const WIN_SCORE: i32 = 1;
const LOSS_SCORE: i32 = -1;
const DRAW_SCORE: i32 = 0;

/// Next move for the computer. Fails with `InvalidState` when the board is
/// already decided. The caller's board is never modified.
pub fn select_move(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut SessionRng,
) -> Result<Position, TicTacToeError> {
    select_move_for(board, difficulty, Side::Computer, rng)
}

/// Same strategies as [`select_move`], played on behalf of either side.
pub fn select_move_for(
    board: &Board,
    difficulty: Difficulty,
    side: Side,
    rng: &mut SessionRng,
) -> Result<Position, TicTacToeError> {
    let outcome = evaluate(board);
    if outcome.is_terminal() {
        return Err(TicTacToeError::InvalidState(outcome));
    }

    let mut scratch = *board;
    let position = match difficulty {
        Difficulty::Easy => calculate_random_move(&scratch, rng),
        Difficulty::Medium => calculate_heuristic_move(&mut scratch, side, rng),
        Difficulty::Hard => calculate_minimax_move(&mut scratch, side),
    };

    position.ok_or(TicTacToeError::InvalidState(outcome))
}

/// Selects the computer's move and writes it onto `board`.
pub fn play_computer_move(
    board: &mut Board,
    difficulty: Difficulty,
    rng: &mut SessionRng,
) -> Result<Position, TicTacToeError> {
    let position = select_move(board, difficulty, rng)?;
    board.set(position, Mark::Computer)?;
    Ok(position)
}

/// Game-theoretic value of `board` for the computer: 1 forced win, 0 draw,
/// -1 forced loss, with `side_to_move` about to play.
pub fn minimax_value(board: &Board, side_to_move: Side) -> i32 {
    let mut scratch = *board;
    minimax(&mut scratch, side_to_move, Side::Computer, i32::MIN, i32::MAX)
}

fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<Position> {
    rng.choose(&board.available_moves()).copied()
}

fn calculate_heuristic_move(
    board: &mut Board,
    side: Side,
    rng: &mut SessionRng,
) -> Option<Position> {
    let available_moves = board.available_moves();

    if let Some(position) = find_winning_move(board, side.mark(), &available_moves) {
        return Some(position);
    }

    if let Some(position) = find_winning_move(board, side.opponent().mark(), &available_moves) {
        return Some(position);
    }

    calculate_random_move(board, rng)
}

fn find_winning_move(board: &mut Board, mark: Mark, moves: &[Position]) -> Option<Position> {
    moves.iter().copied().find(|&position| {
        let probe = board.provisional(position, mark);
        check_win(&probe) == Some(mark)
    })
}

fn calculate_minimax_move(board: &mut Board, side: Side) -> Option<Position> {
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for position in board.available_moves() {
        let score = {
            let mut child = board.provisional(position, side.mark());
            minimax(&mut child, side.opponent(), side, i32::MIN, i32::MAX)
        };

        // strict comparison keeps the first row-major maximum
        if score > best_score {
            best_score = score;
            best_move = Some(position);
        }

        if best_score == WIN_SCORE {
            break;
        }
    }

    best_move
}

fn minimax(
    board: &mut Board,
    side_to_move: Side,
    maximizer: Side,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    match evaluate(board) {
        Outcome::Ongoing => {}
        Outcome::Draw => return DRAW_SCORE,
        decided => {
            return if decided.winner() == Some(maximizer) {
                WIN_SCORE
            } else {
                LOSS_SCORE
            };
        }
    }

    let is_maximizing = side_to_move == maximizer;
    let mut best = if is_maximizing { i32::MIN } else { i32::MAX };

    for position in board.available_moves() {
        let eval = {
            let mut child = board.provisional(position, side_to_move.mark());
            minimax(&mut child, side_to_move.opponent(), maximizer, alpha, beta)
        };

        if is_maximizing {
            best = best.max(eval);
            alpha = alpha.max(eval);
        } else {
            best = best.min(eval);
            beta = beta.min(eval);
        }

        if beta <= alpha {
            break;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const E: Mark = Mark::Empty;
    const C: Mark = Mark::Computer;
    const P: Mark = Mark::Player;

    fn create_test_rng() -> SessionRng {
        SessionRng::new(12345)
    }

    fn all_boards_reachable(board: Board, to_move: Side, out: &mut HashSet<(Board, Side)>) {
        if evaluate(&board).is_terminal() || !out.insert((board, to_move)) {
            return;
        }
        for position in board.available_moves() {
            let mut next = board;
            next.set(position, to_move.mark()).unwrap();
            all_boards_reachable(next, to_move.opponent(), out);
        }
    }

    /// Plays Hard for the computer against every possible opponent reply and
    /// collects the final outcomes.
    fn hard_outcomes_against_any_opponent(
        board: &mut Board,
        to_move: Side,
        rng: &mut SessionRng,
        outcomes: &mut Vec<Outcome>,
    ) {
        let outcome = evaluate(board);
        if outcome.is_terminal() {
            outcomes.push(outcome);
            return;
        }

        match to_move {
            Side::Computer => {
                let before = *board;
                let position = select_move(board, Difficulty::Hard, rng).unwrap();
                assert_eq!(*board, before);
                let mut child = board.provisional(position, Mark::Computer);
                hard_outcomes_against_any_opponent(&mut child, Side::Player, rng, outcomes);
            }
            Side::Player => {
                for position in board.available_moves() {
                    let mut child = board.provisional(position, Mark::Player);
                    hard_outcomes_against_any_opponent(&mut child, Side::Computer, rng, outcomes);
                }
            }
        }
    }

    #[test]
    fn test_forced_win_selected_by_medium_and_hard() {
        let board = Board::from_cells([[C, C, E], [P, P, E], [E, E, E]]);
        let mut rng = create_test_rng();

        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            let position = select_move(&board, difficulty, &mut rng).unwrap();
            assert_eq!(position, Position::new(0, 2), "difficulty {}", difficulty);
        }
    }

    #[test]
    fn test_forced_block_selected_by_medium_and_hard() {
        let board = Board::from_cells([[P, P, E], [C, E, E], [E, E, E]]);
        let mut rng = create_test_rng();

        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            let position = select_move(&board, difficulty, &mut rng).unwrap();
            assert_eq!(position, Position::new(0, 2), "difficulty {}", difficulty);
        }
    }

    #[test]
    fn test_medium_prefers_win_over_block() {
        // both sides threaten; the computer's own win sits later in scan order
        let board = Board::from_cells([[P, P, E], [E, E, E], [C, C, E]]);
        let mut rng = create_test_rng();

        let position = select_move(&board, Difficulty::Medium, &mut rng).unwrap();

        assert_eq!(position, Position::new(2, 2));
    }

    #[test]
    fn test_medium_blocks_opponent_column() {
        let board = Board::from_cells([[E, P, C], [E, P, E], [C, E, E]]);
        let mut rng = create_test_rng();

        for _ in 0..20 {
            let position = select_move(&board, Difficulty::Medium, &mut rng).unwrap();
            assert_eq!(position, Position::new(2, 1));
        }
    }

    #[test]
    fn test_medium_without_threats_picks_empty_cell() {
        let board = Board::from_cells([[P, E, E], [E, E, E], [E, E, E]]);
        let mut rng = create_test_rng();

        for _ in 0..50 {
            let position = select_move(&board, Difficulty::Medium, &mut rng).unwrap();
            assert!(board.is_empty_at(position));
        }
    }

    #[test]
    fn test_easy_only_picks_empty_cells() {
        let board = Board::from_cells([[P, C, P], [E, C, E], [P, E, C]]);
        let mut rng = create_test_rng();
        let mut seen = Vec::new();

        for _ in 0..200 {
            let position = select_move(&board, Difficulty::Easy, &mut rng).unwrap();
            assert!(board.is_empty_at(position));
            if !seen.contains(&position) {
                seen.push(position);
            }
        }

        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_easy_is_reproducible_for_a_seed() {
        let board = Board::new();
        let mut first = SessionRng::new(99);
        let mut second = SessionRng::new(99);

        for _ in 0..10 {
            assert_eq!(
                select_move(&board, Difficulty::Easy, &mut first).unwrap(),
                select_move(&board, Difficulty::Easy, &mut second).unwrap()
            );
        }
    }

    #[test]
    fn test_hard_is_deterministic_first_maximum() {
        let mut rng = create_test_rng();

        // every opening move draws under perfect play, so the first cell wins the tie
        let position = select_move(&Board::new(), Difficulty::Hard, &mut rng).unwrap();

        assert_eq!(position, Position::new(0, 0));
    }

    #[test]
    fn test_decided_board_is_invalid_state() {
        let won = Board::from_cells([[C, C, C], [P, P, E], [E, E, E]]);
        let drawn = Board::from_cells([[P, C, P], [P, C, C], [C, P, P]]);
        let mut rng = create_test_rng();

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(
                select_move(&won, difficulty, &mut rng),
                Err(TicTacToeError::InvalidState(Outcome::ComputerWins))
            );
            assert_eq!(
                select_move(&drawn, difficulty, &mut rng),
                Err(TicTacToeError::InvalidState(Outcome::Draw))
            );
        }
    }

    #[test]
    fn test_select_move_never_mutates_board() {
        let mut reachable = HashSet::new();
        all_boards_reachable(Board::new(), Side::Player, &mut reachable);
        let mut rng = create_test_rng();

        for (board, _) in &reachable {
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                let before = *board;
                let position = select_move(board, difficulty, &mut rng).unwrap();
                assert_eq!(*board, before);
                assert!(board.is_empty_at(position));
            }
        }
    }

    #[test]
    fn test_play_computer_move_changes_exactly_one_cell() {
        let mut rng = create_test_rng();
        let start = Board::from_cells([[P, E, E], [E, C, E], [E, E, P]]);

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut board = start;
            let position = play_computer_move(&mut board, difficulty, &mut rng).unwrap();

            let changed: Vec<Position> = (0..3)
                .flat_map(|row| (0..3).map(move |col| Position::new(row, col)))
                .filter(|&p| board[p] != start[p])
                .collect();
            assert_eq!(changed, vec![position]);
            assert_eq!(start[position], Mark::Empty);
            assert_eq!(board[position], Mark::Computer);
        }
    }

    #[test]
    fn test_hard_never_loses_when_player_starts() {
        let mut rng = create_test_rng();
        let mut outcomes = Vec::new();

        hard_outcomes_against_any_opponent(&mut Board::new(), Side::Player, &mut rng, &mut outcomes);

        assert!(!outcomes.is_empty());
        assert!(!outcomes.contains(&Outcome::PlayerWins));
    }

    #[test]
    fn test_hard_never_loses_when_computer_starts() {
        let mut rng = create_test_rng();
        let mut outcomes = Vec::new();

        hard_outcomes_against_any_opponent(&mut Board::new(), Side::Computer, &mut rng, &mut outcomes);

        assert!(!outcomes.is_empty());
        assert!(!outcomes.contains(&Outcome::PlayerWins));
        assert!(outcomes.contains(&Outcome::ComputerWins));
    }

    #[test]
    fn test_hard_never_loses_from_any_reachable_position() {
        let mut reachable = HashSet::new();
        all_boards_reachable(Board::new(), Side::Player, &mut reachable);
        all_boards_reachable(Board::new(), Side::Computer, &mut reachable);
        let mut rng = create_test_rng();

        for (board, to_move) in reachable.into_iter().filter(|(_, side)| *side == Side::Computer) {
            // a position already lost is not the engine's doing
            if minimax_value(&board, to_move) < 0 {
                continue;
            }
            let mut outcomes = Vec::new();
            let mut start = board;
            hard_outcomes_against_any_opponent(&mut start, to_move, &mut rng, &mut outcomes);
            assert!(!outcomes.contains(&Outcome::PlayerWins), "lost from\n{}", board);
        }
    }

    #[test]
    fn test_hard_vs_hard_from_empty_board_draws() {
        let mut rng = create_test_rng();

        for first in [Side::Computer, Side::Player] {
            let mut board = Board::new();
            let mut to_move = first;
            while !evaluate(&board).is_terminal() {
                let position = select_move_for(&board, Difficulty::Hard, to_move, &mut rng).unwrap();
                board.set(position, to_move.mark()).unwrap();
                to_move = to_move.opponent();
            }

            assert_eq!(evaluate(&board), Outcome::Draw);
        }
    }

    #[test]
    fn test_minimax_values() {
        assert_eq!(minimax_value(&Board::new(), Side::Computer), DRAW_SCORE);
        assert_eq!(minimax_value(&Board::new(), Side::Player), DRAW_SCORE);

        let computer_threat = Board::from_cells([[C, C, E], [P, P, E], [E, E, E]]);
        assert_eq!(minimax_value(&computer_threat, Side::Computer), WIN_SCORE);
        assert_eq!(minimax_value(&computer_threat, Side::Player), LOSS_SCORE);
    }

    #[test]
    fn test_player_side_heuristic_is_symmetric() {
        let board = Board::from_cells([[P, P, E], [C, C, E], [E, E, E]]);
        let mut rng = create_test_rng();

        let for_player = select_move_for(&board, Difficulty::Medium, Side::Player, &mut rng).unwrap();
        let for_computer = select_move(&board, Difficulty::Medium, &mut rng).unwrap();

        assert_eq!(for_player, Position::new(0, 2));
        assert_eq!(for_computer, Position::new(1, 2));
    }
}
