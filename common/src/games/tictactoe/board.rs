use std::fmt;
use std::ops::{Deref, DerefMut, Index};

use super::error::TicTacToeError;
use super::types::{BOARD_SIZE, Mark, Position};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [[Mark; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Builds a board from nested rows, rejecting anything that is not 3×3.
    pub fn from_rows(rows: &[Vec<Mark>]) -> Result<Self, TicTacToeError> {
        if rows.len() != BOARD_SIZE {
            return Err(TicTacToeError::InvalidInput(format!(
                "expected {} rows, got {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        let mut board = Self::new();
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(TicTacToeError::InvalidInput(format!(
                    "row {} has {} cells, expected {}",
                    row_index,
                    row.len(),
                    BOARD_SIZE
                )));
            }
            board.cells[row_index].copy_from_slice(row);
        }
        Ok(board)
    }

    pub fn from_sentinels(rows: &[Vec<i32>]) -> Result<Self, TicTacToeError> {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|&v| Mark::try_from(v)).collect())
            .collect::<Result<Vec<Vec<Mark>>, _>>()?;
        Self::from_rows(&rows)
    }

    pub fn to_sentinels(&self) -> Vec<Vec<i32>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|mark| mark.to_sentinel()).collect())
            .collect()
    }

    pub fn cells(&self) -> &[[Mark; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn get(&self, position: Position) -> Option<Mark> {
        self.cells
            .get(position.row)
            .and_then(|row| row.get(position.col))
            .copied()
    }

    pub fn set(&mut self, position: Position, mark: Mark) -> Result<(), TicTacToeError> {
        if !position.is_on_board() {
            return Err(TicTacToeError::OutOfBounds(position));
        }
        self.cells[position.row][position.col] = mark;
        Ok(())
    }

    pub fn is_empty_at(&self, position: Position) -> bool {
        self.get(position) == Some(Mark::Empty)
    }

    /// Empty cells in row-major order.
    pub fn available_moves(&self) -> Vec<Position> {
        let mut moves = Vec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Mark::Empty {
                    moves.push(Position::new(row, col));
                }
            }
        }
        moves
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == mark)
            .count()
    }

    /// Places `mark` at an on-board `position` until the returned guard is dropped.
    pub fn provisional(&mut self, position: Position, mark: Mark) -> ProvisionalMove<'_> {
        let previous = self.cells[position.row][position.col];
        self.cells[position.row][position.col] = mark;
        ProvisionalMove {
            board: self,
            position,
            previous,
        }
    }
}

impl Index<Position> for Board {
    type Output = Mark;

    fn index(&self, position: Position) -> &Mark {
        &self.cells[position.row][position.col]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.iter().enumerate() {
            let line: Vec<String> = row.iter().map(|mark| mark.symbol().to_string()).collect();
            write!(f, "{}", line.join(" "))?;
            if row_index + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Scoped provisional placement used by the search. The cell goes back to its
/// previous content on every exit path, unwinding included.
pub struct ProvisionalMove<'a> {
    board: &'a mut Board,
    position: Position,
    previous: Mark,
}

impl Deref for ProvisionalMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for ProvisionalMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for ProvisionalMove<'_> {
    fn drop(&mut self) {
        self.board.cells[self.position.row][self.position.col] = self.previous;
    }
}
