use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::shape::{PIECE_SHAPES, Shape};

/// The falling piece: kind, rotation and bounding-box position.
///
/// Pieces are immutable values. Movement and rotation return new `Piece`
/// instances and leave collision checks to the [`Board`](super::board::Board).
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::T);
/// let moved = piece.right().unwrap();
/// let rotated = moved.rotated_right();
/// assert_eq!(rotated.position().x(), 5);
/// assert_eq!(rotated.to_string(), "T#1@5,0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    position: PiecePosition,
    rotation: PieceRotation,
    kind: PieceKind,
}

impl Piece {
    /// Creates a piece of `kind` at the spawn position with rotation 0.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self::with_placement(kind, PieceRotation::SPAWN, PiecePosition::SPAWN)
    }

    #[must_use]
    pub const fn with_placement(
        kind: PieceKind,
        rotation: PieceRotation,
        position: PiecePosition,
    ) -> Self {
        Self {
            position,
            rotation,
            kind,
        }
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.kind.shape(self.rotation)
    }

    /// Returns the absolute board coordinates of the occupied cells.
    ///
    /// Rows above the visible board have negative `y`.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let position = self.position;
        let shape = self.shape();
        shape
            .occupied_cells()
            .map(move |(dx, dy)| position.cell(dx, dy))
            .collect::<ArrayVec<_, 4>>()
            .into_iter()
    }

    #[must_use]
    pub fn shifted(&self, dx: i8, dy: i8) -> Option<Self> {
        Some(Self {
            position: self.position.shifted(dx, dy)?,
            ..*self
        })
    }

    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.shifted(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.shifted(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Option<Self> {
        self.shifted(0, 1)
    }

    /// Rotates a quarter turn clockwise around the bounding box's top-left corner.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_right(),
            ..*self
        }
    }
}

/// Formats as `kind#rotation@x,y`, e.g. `S#1@4,18`.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.position.x,
            self.position.y
        )
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid piece {input:?}: {reason}")]
pub struct ParsePieceError {
    input: String,
    reason: &'static str,
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason| ParsePieceError {
            input: s.to_owned(),
            reason,
        };

        let (kind, rest) = s
            .split_once('#')
            .ok_or_else(|| error("expected format 'kind#rotation@x,y'"))?;
        let (rotation, position) = rest
            .split_once('@')
            .ok_or_else(|| error("missing '@' before position"))?;
        let (x, y) = position
            .split_once(',')
            .ok_or_else(|| error("missing ',' between coordinates"))?;

        let mut kind_chars = kind.chars();
        let kind = match (kind_chars.next(), kind_chars.next()) {
            (Some(c), None) => {
                PieceKind::from_char(c).ok_or_else(|| error("unknown piece kind"))?
            }
            _ => return Err(error("piece kind must be a single character")),
        };
        let rotation = rotation
            .parse::<u8>()
            .ok()
            .filter(|r| *r < 4)
            .ok_or_else(|| error("rotation must be 0-3"))?;
        let x = x.parse().map_err(|_| error("invalid x coordinate"))?;
        let y = y.parse().map_err(|_| error("invalid y coordinate"))?;

        Ok(Self::with_placement(
            kind,
            PieceRotation(rotation),
            PiecePosition::new(x, y),
        ))
    }
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Top-left corner of a piece's bounding box in board coordinates.
///
/// - (0, 0) is the top-left cell of the board
/// - X increases rightward (columns)
/// - Y increases downward (rows), and is negative above the visible board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i8,
    y: i8,
}

impl PiecePosition {
    /// Where every new piece appears: near the horizontal center, top row.
    pub const SPAWN: Self = Self::new(4, 0);

    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i8 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i8 {
        self.y
    }

    /// Returns the position moved by `(dx, dy)`, or `None` on overflow.
    #[must_use]
    pub const fn shifted(self, dx: i8, dy: i8) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }

    /// Absolute coordinates of the shape cell at offset `(dx, dy)`.
    #[must_use]
    pub fn cell(self, dx: u8, dy: u8) -> (i32, i32) {
        (
            i32::from(self.x) + i32::from(dx),
            i32::from(self.y) + i32::from(dy),
        )
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotation wraps around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    pub const SPAWN: Self = Self(0);

    /// Creates a rotation state, wrapping `quarter_turns` modulo 4.
    #[must_use]
    pub const fn new(quarter_turns: u8) -> Self {
        Self(quarter_turns % 4)
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// Straight piece.
    I = 0,
    /// Square piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-skew piece.
    S = 3,
    /// Z-skew piece.
    Z = 4,
    /// J-hook piece.
    J = 5,
    /// L-hook piece.
    L = 6,
}

/// Uniform draw over the seven kinds.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::O,
        Self::T,
        Self::S,
        Self::Z,
        Self::J,
        Self::L,
    ];

    /// Returns the occupancy matrix of this kind at `rotation`.
    #[must_use]
    pub const fn shape(self, rotation: PieceRotation) -> Shape {
        PIECE_SHAPES[self as usize][rotation.as_usize()]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('S'), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}
