use std::fmt;

/// Occupancy matrix of a piece at one orientation.
///
/// A shape uses the minimal bounding box of its piece: the straight piece is
/// 1×4 at spawn orientation, the square is 2×2 and the other five are 2×3.
/// Cell `(x, y)` is column `x` of row `y`, counted from the top-left corner of
/// the bounding box.
///
/// The four orientations of every piece kind are derived at compile time by
/// applying [`Shape::rotated_right`] to the base shape, so looking up a shape
/// is a table access.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceKind, PieceRotation};
///
/// let shape = PieceKind::J.shape(PieceRotation::default());
/// assert_eq!(shape.to_string(), "#..\n###");
///
/// let rotated = shape.rotated_right();
/// assert_eq!(rotated.to_string(), "##\n#.\n#.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; Shape::MAX_SIZE]; Shape::MAX_SIZE],
}

impl Shape {
    /// Largest bounding box side length of any piece.
    pub const MAX_SIZE: usize = 4;

    /// Builds a shape from row patterns where `#` marks an occupied cell.
    ///
    /// All rows must have the same width, and the pattern must fit in
    /// [`Shape::MAX_SIZE`] in both directions.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn parse(pattern: &[&str]) -> Self {
        let rows = pattern.len();
        assert!(rows > 0 && rows <= Self::MAX_SIZE);
        let cols = pattern[0].len();
        assert!(cols > 0 && cols <= Self::MAX_SIZE);

        let mut cells = [[false; Self::MAX_SIZE]; Self::MAX_SIZE];
        let mut y = 0;
        while y < rows {
            let row = pattern[y].as_bytes();
            assert!(row.len() == cols);
            let mut x = 0;
            while x < cols {
                cells[y][x] = row[x] == b'#';
                x += 1;
            }
            y += 1;
        }
        Self {
            rows: rows as u8,
            cols: cols as u8,
            cells,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows as usize
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Returns whether the cell at column `x`, row `y` is occupied.
    ///
    /// Cells outside the bounding box are reported as unoccupied.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.cols() && y < self.rows() && self.cells[y][x]
    }

    /// Returns the `(x, y)` offsets of the occupied cells, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.rows).flat_map(move |y| {
            (0..self.cols)
                .filter(move |&x| self.cells[usize::from(y)][usize::from(x)])
                .map(move |x| (x, y))
        })
    }

    /// Rotates the shape a quarter turn clockwise.
    ///
    /// An R×C shape becomes C×R with `out[i][j] = in[R-1-j][i]`.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        let out_rows = self.cols();
        let out_cols = self.rows();
        let mut cells = [[false; Self::MAX_SIZE]; Self::MAX_SIZE];
        let mut i = 0;
        while i < out_rows {
            let mut j = 0;
            while j < out_cols {
                cells[i][j] = self.cells[out_cols - 1 - j][i];
                j += 1;
            }
            i += 1;
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.cols() {
                f.write_str(if self.cells[y][x] { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

const fn rotations(base: Shape) -> [Shape; 4] {
    let right = base.rotated_right();
    let half = right.rotated_right();
    let left = half.rotated_right();
    [base, right, half, left]
}

/// Shapes indexed by `[PieceKind as usize][rotation]`.
pub(crate) const PIECE_SHAPES: [[Shape; 4]; 7] = [
    // I-piece
    rotations(Shape::parse(&["####"])),
    // O-piece
    rotations(Shape::parse(&["##", "##"])),
    // T-piece
    rotations(Shape::parse(&[".#.", "###"])),
    // S-piece
    rotations(Shape::parse(&[".##", "##."])),
    // Z-piece
    rotations(Shape::parse(&["##.", ".##"])),
    // J-piece
    rotations(Shape::parse(&["#..", "###"])),
    // L-piece
    rotations(Shape::parse(&["..#", "###"])),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let shape = Shape::parse(&[".#.", "###"]);
        assert_eq!(shape.rows(), 2);
        assert_eq!(shape.cols(), 3);
        assert!(!shape.is_occupied(0, 0));
        assert!(shape.is_occupied(1, 0));
        assert!(shape.is_occupied(2, 1));
        assert!(!shape.is_occupied(3, 1));
        assert_eq!(shape.to_string(), ".#.\n###");
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let straight = Shape::parse(&["####"]);
        let vertical = straight.rotated_right();
        assert_eq!((vertical.rows(), vertical.cols()), (4, 1));
        assert_eq!(vertical.to_string(), "#\n#\n#\n#");
    }

    #[test]
    fn test_rotation_is_clockwise() {
        let t = Shape::parse(&[".#.", "###"]);
        assert_eq!(t.rotated_right().to_string(), "#.\n##\n#.");
        assert_eq!(t.rotated_right().rotated_right().to_string(), "###\n.#.");

        let l = Shape::parse(&["..#", "###"]);
        assert_eq!(l.rotated_right().to_string(), "#.\n#.\n##");
    }

    #[test]
    fn test_four_rotations_restore_every_shape() {
        for rotations in &PIECE_SHAPES {
            let base = rotations[0];
            let mut shape = base;
            for expected in rotations.iter().skip(1) {
                shape = shape.rotated_right();
                assert_eq!(&shape, expected);
            }
            assert_eq!(shape.rotated_right(), base);
        }
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for rotations in &PIECE_SHAPES {
            for shape in rotations {
                assert_eq!(shape.occupied_cells().count(), 4, "{shape}");
            }
        }
    }

    #[test]
    fn test_occupied_cells_order() {
        let s = Shape::parse(&[".##", "##."]);
        let cells: Vec<_> = s.occupied_cells().collect();
        assert_eq!(cells, [(1, 0), (2, 0), (0, 1), (1, 1)]);
    }
}
