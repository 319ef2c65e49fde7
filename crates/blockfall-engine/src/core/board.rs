use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    piece::{Piece, PieceKind, PiecePosition},
    shape::Shape,
};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a locked piece of a specific kind.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub const fn kind(self) -> Option<PieceKind> {
        match self {
            Block::Empty => None,
            Block::Piece(kind) => Some(kind),
        }
    }

    /// Returns `.` for an empty cell, the piece kind's letter otherwise.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Block::Empty => '.',
            Block::Piece(kind) => kind.as_char(),
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Block::Empty);
        }
        match PieceKind::from_char(c) {
            Some(kind) => Some(Block::Piece(kind)),
            None => None,
        }
    }
}

/// One row of the board, left to right.
pub type BoardRow = [Block; Board::WIDTH];

/// The 10×20 grid of locked cells.
///
/// Row 0 is the top of the board. Cells above row 0 are not stored: a piece
/// may hang above the visible area, and the part of it that does is ignored
/// by collision against locked cells and dropped when the piece is merged.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Block, Board, Piece, PieceKind};
///
/// let board = Board::EMPTY;
/// let piece = board.drop_position(Piece::new(PieceKind::O));
/// assert_eq!(piece.position().y(), 18);
///
/// let board = board.merged(piece);
/// assert_eq!(board.rows()[19][4], Block::Piece(PieceKind::O));
/// assert!(board.is_colliding(piece));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [BoardRow; Board::HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 20;

    const EMPTY_ROW: BoardRow = [Block::Empty; Self::WIDTH];

    pub const EMPTY: Self = Self {
        rows: [Self::EMPTY_ROW; Self::HEIGHT],
    };

    /// Builds a board from exactly [`Board::HEIGHT`] rows of
    /// [`Board::WIDTH`] characters, using the [`Block::as_char`] encoding.
    pub fn from_rows<S>(rows: &[S]) -> Result<Self, ParseBoardError>
    where
        S: AsRef<str>,
    {
        if rows.len() != Self::HEIGHT {
            return Err(ParseBoardError::RowCount { actual: rows.len() });
        }
        let mut board = Self::EMPTY;
        for (y, (line, row)) in rows.iter().zip(&mut board.rows).enumerate() {
            let line = line.as_ref();
            let width = line.chars().count();
            if width != Self::WIDTH {
                return Err(ParseBoardError::RowWidth {
                    row: y,
                    actual: width,
                });
            }
            for (x, (c, cell)) in line.chars().zip(row).enumerate() {
                *cell = Block::from_char(c).ok_or(ParseBoardError::InvalidCell {
                    row: y,
                    column: x,
                    found: c,
                })?;
            }
        }
        Ok(board)
    }

    #[must_use]
    pub fn rows(&self) -> &[BoardRow; Board::HEIGHT] {
        &self.rows
    }

    #[must_use]
    pub fn block(&self, x: usize, y: usize) -> Option<Block> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Sets a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the board.
    pub fn set_block(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y][x] = block;
    }

    /// Returns whether `shape` fits at `position`.
    ///
    /// A placement is invalid when an occupied cell lies left of column 0,
    /// right of the last column or below the last row, or lands on a locked
    /// cell. Cells above row 0 are only checked against the side walls.
    #[must_use]
    pub fn is_valid_placement(&self, shape: &Shape, position: PiecePosition) -> bool {
        shape.occupied_cells().all(|(dx, dy)| {
            let (x, y) = position.cell(dx, dy);
            let Some(x) = usize::try_from(x).ok().filter(|x| *x < Self::WIDTH) else {
                return false;
            };
            match usize::try_from(y) {
                Err(_) => true,
                Ok(y) => y < Self::HEIGHT && self.rows[y][x].is_empty(),
            }
        })
    }

    #[must_use]
    pub fn is_colliding(&self, piece: Piece) -> bool {
        !self.is_valid_placement(&piece.shape(), piece.position())
    }

    /// Returns the lowest position `piece` reaches by falling straight down.
    #[must_use]
    pub fn drop_position(&self, piece: Piece) -> Piece {
        let mut dropped = piece;
        while let Some(next) = dropped.down().filter(|p| !self.is_colliding(*p)) {
            dropped = next;
        }
        dropped
    }

    /// Writes `kind` into every cell of `shape` at `position` that lies on the board.
    pub fn fill_shape(&mut self, shape: &Shape, position: PiecePosition, kind: PieceKind) {
        for (dx, dy) in shape.occupied_cells() {
            if let Some((x, y)) = Self::cell_index(position.cell(dx, dy)) {
                self.rows[y][x] = Block::Piece(kind);
            }
        }
    }

    /// Locks the piece's cells into the board.
    ///
    /// Cells above row 0 are dropped.
    pub fn fill_piece(&mut self, piece: Piece) {
        self.fill_shape(&piece.shape(), piece.position(), piece.kind());
    }

    /// Like [`Self::fill_shape`], but returns a new board.
    #[must_use]
    pub fn merge(&self, shape: &Shape, position: PiecePosition, kind: PieceKind) -> Self {
        let mut board = self.clone();
        board.fill_shape(shape, position, kind);
        board
    }

    /// Like [`Self::fill_piece`], but returns a new board.
    #[must_use]
    pub fn merged(&self, piece: Piece) -> Self {
        self.merge(&piece.shape(), piece.position(), piece.kind())
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Kept rows move down in their original order and empty rows fill the top,
    /// so the board always keeps [`Board::HEIGHT`] rows.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..Self::HEIGHT).rev() {
            if self.rows[y].iter().all(|b| b.is_piece()) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(Self::EMPTY_ROW);
        count
    }

    /// Like [`Self::clear_lines`], but returns the cleared board with the count.
    #[must_use]
    pub fn without_full_lines(&self) -> (Self, usize) {
        let mut board = self.clone();
        let count = board.clear_lines();
        (board, count)
    }

    fn cell_index((x, y): (i32, i32)) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|x| *x < Self::WIDTH)?;
        let y = usize::try_from(y).ok().filter(|y| *y < Self::HEIGHT)?;
        Some((x, y))
    }

    fn row_string(row: &BoardRow) -> String {
        row.iter().map(|b| b.as_char()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            f.write_str(&Self::row_string(row))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rows.iter().map(Self::row_string))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected 20 rows, got {actual}")]
    RowCount { actual: usize },
    #[display("row {row}: expected 10 cells, got {actual}")]
    RowWidth { row: usize, actual: usize },
    #[display("row {row}, column {column}: invalid cell {found:?}")]
    InvalidCell {
        row: usize,
        column: usize,
        found: char,
    },
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rows(&s.lines().collect::<Vec<_>>())
    }
}

/// Serialized as an array of row strings, e.g. `"..IIII...."`.
impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.rows.iter().map(Self::row_string))
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Self::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::PieceRotation;

    /// Builds a board whose bottom rows are `rows`; everything above is empty.
    fn board_with_bottom(rows: &[&str]) -> Board {
        let mut lines = vec![".........."; Board::HEIGHT - rows.len()];
        lines.extend_from_slice(rows);
        Board::from_rows(&lines).unwrap()
    }

    fn piece_at(kind: PieceKind, rotation: u8, x: i8, y: i8) -> Piece {
        Piece::with_placement(kind, PieceRotation::new(rotation), PiecePosition::new(x, y))
    }

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        assert_eq!(board.rows().len(), Board::HEIGHT);
        assert!(board.rows().iter().flatten().all(|b| b.is_empty()));
        assert_eq!(board.block(Board::WIDTH, 0), None);
        assert_eq!(board.block(0, Board::HEIGHT), None);
    }

    #[test]
    fn test_placement_walls_and_floor() {
        let board = Board::EMPTY;
        assert!(!board.is_colliding(piece_at(PieceKind::I, 0, 0, 0)));
        assert!(!board.is_colliding(piece_at(PieceKind::I, 0, 6, 19)));
        assert!(board.is_colliding(piece_at(PieceKind::I, 0, -1, 0)));
        assert!(board.is_colliding(piece_at(PieceKind::I, 0, 7, 0)));
        assert!(board.is_colliding(piece_at(PieceKind::I, 0, 0, 20)));
        // vertical I occupies rows y..y+4
        assert!(!board.is_colliding(piece_at(PieceKind::I, 1, 9, 16)));
        assert!(board.is_colliding(piece_at(PieceKind::I, 1, 9, 17)));
    }

    #[test]
    fn test_cells_above_board_only_check_walls() {
        let mut board = Board::EMPTY;
        for x in 0..Board::WIDTH {
            board.set_block(x, 0, Block::Piece(PieceKind::Z));
        }
        // vertical I with three cells above the board and one on the filled row
        assert!(board.is_colliding(piece_at(PieceKind::I, 1, 3, -3)));
        // entirely above the board
        assert!(!board.is_colliding(piece_at(PieceKind::I, 1, 3, -4)));
        // above the board but outside the side walls
        assert!(board.is_colliding(piece_at(PieceKind::I, 1, -1, -4)));
        assert!(board.is_colliding(piece_at(PieceKind::I, 1, 10, -4)));
    }

    #[test]
    fn test_placement_against_locked_cells() {
        let board = board_with_bottom(&["....T....."]);
        assert!(board.is_colliding(piece_at(PieceKind::O, 0, 3, 18)));
        assert!(!board.is_colliding(piece_at(PieceKind::O, 0, 5, 18)));
        assert!(!board.is_colliding(piece_at(PieceKind::O, 0, 3, 17)));
    }

    #[test]
    fn test_drop_position() {
        let board = board_with_bottom(&["....J.....", "....JJJ..."]);
        let dropped = board.drop_position(Piece::new(PieceKind::O));
        assert_eq!(dropped.position(), PiecePosition::new(4, 16));
        let dropped = board.drop_position(piece_at(PieceKind::O, 0, 0, 0));
        assert_eq!(dropped.position(), PiecePosition::new(0, 18));
    }

    #[test]
    fn test_merge_drops_cells_above_board() {
        let board = Board::EMPTY.merged(piece_at(PieceKind::I, 1, 2, -2));
        assert_eq!(board.block(2, 0), Some(Block::Piece(PieceKind::I)));
        assert_eq!(board.block(2, 1), Some(Block::Piece(PieceKind::I)));
        assert_eq!(board.block(2, 2), Some(Block::Empty));
        assert_eq!(board.rows().iter().flatten().filter(|b| b.is_piece()).count(), 2);
    }

    #[test]
    fn test_merge_leaves_original_untouched() {
        let board = Board::EMPTY;
        let shape = PieceKind::T.shape(PieceRotation::default());
        let merged = board.merge(&shape, PiecePosition::new(0, 18), PieceKind::T);
        assert_eq!(board, Board::EMPTY);
        assert_eq!(
            merged,
            board_with_bottom(&[".T........", "TTT......."])
        );
    }

    #[test]
    fn test_clear_lines() {
        let mut board = board_with_bottom(&[
            "I.........",
            "LLLLLLLLLL",
            ".O........",
            "ZZZZZZZZZZ",
        ]);
        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board, board_with_bottom(&["I.........", ".O........"]));
    }

    #[test]
    fn test_clear_four_lines() {
        let full = "SSSSSSSSSS";
        let mut board = board_with_bottom(&["..T.......", full, full, full, full]);
        assert_eq!(board.clear_lines(), 4);
        assert_eq!(board, board_with_bottom(&["..T......."]));
    }

    #[test]
    fn test_without_full_lines_is_idempotent() {
        let board = board_with_bottom(&["JJJJ.JJJJJ", "LL.LLLLLLL"]);
        let (cleared, count) = board.without_full_lines();
        assert_eq!(count, 0);
        assert_eq!(cleared, board);
        assert_eq!(cleared.rows().len(), Board::HEIGHT);
    }

    #[test]
    fn test_board_serialization() {
        let board = board_with_bottom(&["..IIII...."]);
        let json = serde_json::to_value(&board).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), Board::HEIGHT);
        assert_eq!(rows[0], "..........");
        assert_eq!(rows[19], "..IIII....");

        let deserialized: Board = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, board);
    }

    #[test]
    fn test_board_parse_errors() {
        assert_eq!(
            Board::from_rows(&[".........."; 19]),
            Err(ParseBoardError::RowCount { actual: 19 })
        );

        let mut rows = vec![".........."; Board::HEIGHT];
        rows[3] = "...";
        assert_eq!(
            Board::from_rows(&rows),
            Err(ParseBoardError::RowWidth { row: 3, actual: 3 })
        );

        rows[3] = "....X.....";
        let err = Board::from_rows(&rows).unwrap_err();
        assert_eq!(
            err,
            ParseBoardError::InvalidCell {
                row: 3,
                column: 4,
                found: 'X'
            }
        );
        assert_eq!(err.to_string(), "row 3, column 4: invalid cell 'X'");
    }

    #[test]
    fn test_display_round_trip() {
        let board = board_with_bottom(&["T..O..S..Z"]);
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }
}
