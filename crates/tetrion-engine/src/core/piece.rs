use super::{
    board::Cell,
    shape::{Rotation, Shape, ShapeKind},
};

/// Direction in which a piece can be moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the `(delta_row, delta_col)` translation for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// A shape placed on the board with a rotation state.
///
/// The anchor `(row, col)` is the top-left corner of the shape's 4×4 bounding
/// box. It is signed: a box may hang over the board edge while the occupied
/// cells stay inside.
///
/// A piece never validates its own position; that is the board's job. Use
/// [`Board::can_move`](super::board::Board::can_move) and friends before
/// applying a move.
///
/// # Example
///
/// ```
/// use tetrion_engine::{Direction, Piece, ShapeKind};
///
/// let piece = Piece::new(ShapeKind::T, 0, 3);
/// let moved = piece.moved(Direction::Right);
/// assert_eq!((moved.row(), moved.col()), (0, 4));
/// assert_eq!(piece.col(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    row: i32,
    col: i32,
    rotation: Rotation,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: ShapeKind, row: i32, col: i32) -> Self {
        Self {
            kind,
            row,
            col,
            rotation: Rotation::new(0),
        }
    }

    #[must_use]
    pub const fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &'static Shape {
        self.kind.shape()
    }

    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn col(&self) -> i32 {
        self.col
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Returns the absolute cells covered by this piece, tagged with the shape color.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let Self { row, col, .. } = *self;
        let shape = self.shape();
        shape
            .offsets(self.rotation)
            .map(move |(dr, dc)| Cell::new(row + dr, col + dc, shape.color()))
    }

    /// Returns a copy of this piece translated one step in `direction`.
    #[must_use]
    pub const fn moved(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
            ..self
        }
    }

    /// Returns a copy of this piece rotated by a quarter turn.
    #[must_use]
    pub const fn rotated(self, counterclockwise: bool) -> Self {
        let rotation = if counterclockwise {
            self.rotation.rotated_counterclockwise()
        } else {
            self.rotation.rotated_clockwise()
        };
        Self { rotation, ..self }
    }

    /// Translates the anchor one step in `direction`, unconditionally.
    pub const fn move_by(&mut self, direction: Direction) {
        *self = self.moved(direction);
    }

    /// Rotates by a quarter turn, unconditionally.
    pub const fn rotate(&mut self, counterclockwise: bool) {
        *self = self.rotated(counterclockwise);
    }
}
