use serde::{Deserialize, Serialize};

/// Display color of a shape.
///
/// Colors are purely cosmetic and have no effect on gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ShapeColor {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

/// A tetromino definition: four rotation masks and a color.
///
/// Each mask is a 16-bit value over the 4×4 bounding box of the shape. The
/// most significant bit is the top-left cell, bits run row-major with 4 bits
/// per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    kind: ShapeKind,
    masks: [u16; 4],
    color: ShapeColor,
}

impl Shape {
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub const fn color(&self) -> ShapeColor {
        self.color
    }

    /// Returns the mask of the given rotation state.
    #[must_use]
    pub const fn mask(&self, rotation: Rotation) -> u16 {
        self.masks[rotation.as_usize()]
    }

    /// Returns the `(row_offset, col_offset)` pairs occupied in the given rotation state.
    pub fn offsets(&self, rotation: Rotation) -> impl Iterator<Item = (i32, i32)> + use<> {
        cells_for(self.mask(rotation))
    }
}

/// Decodes a 4×4 rotation mask into `(row_offset, col_offset)` pairs.
///
/// Bits are scanned from 15 down to 0, so the offsets come out in row-major
/// order starting at the top-left cell.
///
/// # Example
///
/// ```
/// use tetrion_engine::cells_for;
///
/// // The O shape: top-left 2×2 square.
/// let cells: Vec<_> = cells_for(0xCC00).collect();
/// assert_eq!(cells, [(0, 0), (0, 1), (1, 0), (1, 1)]);
/// ```
pub fn cells_for(mask: u16) -> impl Iterator<Item = (i32, i32)> {
    (0..16)
        .filter(move |&i| mask & (0x8000_u16 >> i) != 0)
        .map(|i| (i / 4, i % 4))
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotation operations wrap around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation(u8);

impl Rotation {
    /// Creates a rotation state from an index in `0..4`.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < 4);
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn rotated_clockwise(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn rotated_counterclockwise(self) -> Self {
        Self((self.0 + 3) % 4)
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// The seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    /// All shape kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Returns the catalog entry for this kind.
    #[must_use]
    pub fn shape(self) -> &'static Shape {
        &SHAPES[self as usize]
    }

    /// Returns the single character representation of this shape kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrion_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::Z.as_char(), 'Z');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
            ShapeKind::O => 'O',
            ShapeKind::S => 'S',
            ShapeKind::T => 'T',
            ShapeKind::Z => 'Z',
        }
    }

    /// Parses a shape kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(ShapeKind::I),
            'J' => Some(ShapeKind::J),
            'L' => Some(ShapeKind::L),
            'O' => Some(ShapeKind::O),
            'S' => Some(ShapeKind::S),
            'T' => Some(ShapeKind::T),
            'Z' => Some(ShapeKind::Z),
            _ => None,
        }
    }
}

static SHAPES: [Shape; ShapeKind::LEN] = {
    const fn s(kind: ShapeKind, masks: [u16; 4], color: ShapeColor) -> Shape {
        let mut i = 0;
        while i < 4 {
            assert!(masks[i].count_ones() == 4, "every rotation must cover 4 cells");
            i += 1;
        }
        Shape { kind, masks, color }
    }

    let shapes = [
        s(ShapeKind::I, [0x0F00, 0x2222, 0x00F0, 0x4444], ShapeColor::Cyan),
        s(ShapeKind::J, [0x44C0, 0x8E00, 0x6440, 0x0E20], ShapeColor::Blue),
        s(ShapeKind::L, [0x4460, 0x0E80, 0xC440, 0x2E00], ShapeColor::Orange),
        s(ShapeKind::O, [0xCC00, 0xCC00, 0xCC00, 0xCC00], ShapeColor::Yellow),
        s(ShapeKind::S, [0x06C0, 0x8C40, 0x6C00, 0x4620], ShapeColor::Green),
        s(ShapeKind::T, [0x0E40, 0x4C40, 0x4E00, 0x4640], ShapeColor::Purple),
        s(ShapeKind::Z, [0x0C60, 0x4C80, 0xC600, 0x2640], ShapeColor::Red),
    ];

    let mut i = 0;
    while i < ShapeKind::LEN {
        assert!(shapes[i].kind as usize == i, "catalog order must match ShapeKind");
        i += 1;
    }
    shapes
};
