use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{
    piece::{Direction, Piece},
    shape::ShapeColor,
};

/// A single occupied grid position.
///
/// Two cells are equal when they share `(row, col)`; the color is ignored.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Cell {
    row: i32,
    col: i32,
    color: ShapeColor,
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        (self.row, self.col) == (other.row, other.col)
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.row, self.col).hash(state);
    }
}

impl Cell {
    #[must_use]
    pub const fn new(row: i32, col: i32, color: ShapeColor) -> Self {
        Self { row, col, color }
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
    pub const fn color(&self) -> ShapeColor {
        self.color
    }
}

/// The playfield: a `rows × cols` grid of landed cells.
///
/// Row 0 is the top of the board and rows grow downward. Landed cells are
/// stored row-major as optional colors, so two landed cells can never share a
/// position.
///
/// The board is the single authority on whether a piece may occupy a
/// position. Probing methods ([`Self::can_move`], [`Self::can_rotate`]) work on
/// a candidate value and never touch the piece passed in.
///
/// # Example
///
/// ```
/// use tetrion_engine::{Board, Direction, Piece, ShapeKind};
///
/// let board = Board::new(20, 10);
/// let piece = Piece::new(ShapeKind::O, 0, 0);
///
/// assert!(board.is_valid(&piece));
/// assert!(!board.can_move(&piece, Direction::Left));
/// assert!(board.can_move(&piece, Direction::Right));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<ShapeColor>>,
}

impl Board {
    /// Standard board height.
    pub const DEFAULT_ROWS: usize = 20;
    /// Standard board width.
    pub const DEFAULT_COLS: usize = 10;

    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero, or if they do not fit in `i32`.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be positive");
        assert!(i32::try_from(rows).is_ok() && i32::try_from(cols).is_ok());
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Converts signed coordinates into a grid index, or `None` when off the board.
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let row = usize::try_from(row).ok().filter(|&r| r < self.rows)?;
        let col = usize::try_from(col).ok().filter(|&c| c < self.cols)?;
        Some(row * self.cols + col)
    }

    /// Returns the landed cell at `(row, col)`, if any.
    #[must_use]
    pub fn occupied_at(&self, row: i32, col: i32) -> Option<Cell> {
        let color = self.cells[self.index(row, col)?]?;
        Some(Cell::new(row, col, color))
    }

    /// Returns an iterator over all landed cells, top row first.
    pub fn landed_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, color)| {
            let color = (*color)?;
            #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let (row, col) = ((i / self.cols) as i32, (i % self.cols) as i32);
            Some(Cell::new(row, col, color))
        })
    }

    /// Returns the number of landed cells.
    #[must_use]
    pub fn landed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Returns `true` if any column of `row` holds a landed cell.
    ///
    /// Rows below the board are never occupied.
    #[must_use]
    pub fn is_row_occupied(&self, row: usize) -> bool {
        row < self.rows && self.row_cells(row).iter().any(Option::is_some)
    }

    fn row_cells(&self, row: usize) -> &[Option<ShapeColor>] {
        &self.cells[row * self.cols..][..self.cols]
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.row_cells(row).iter().all(Option::is_some)
    }

    /// Returns `true` if every cell of `piece` lies on the board and on no landed cell.
    #[must_use]
    pub fn is_valid(&self, piece: &Piece) -> bool {
        piece
            .occupied_cells()
            .all(|c| self.index(c.row(), c.col()).is_some_and(|i| self.cells[i].is_none()))
    }

    /// Returns `true` if `piece` could be moved one step in `direction`.
    #[must_use]
    pub fn can_move(&self, piece: &Piece, direction: Direction) -> bool {
        self.is_valid(&piece.moved(direction))
    }

    /// Returns `true` if `piece` could be rotated by a quarter turn.
    #[must_use]
    pub fn can_rotate(&self, piece: &Piece, counterclockwise: bool) -> bool {
        self.is_valid(&piece.rotated(counterclockwise))
    }

    /// Returns `true` if `piece` cannot fall any further.
    ///
    /// A piece has landed when one of its cells sits on the bottom row or
    /// directly above a landed cell.
    #[must_use]
    pub fn has_landed(&self, piece: &Piece) -> bool {
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let bottom = self.rows as i32 - 1;
        piece
            .occupied_cells()
            .any(|c| c.row() >= bottom || self.occupied_at(c.row() + 1, c.col()).is_some())
    }

    /// Fixes the cells of `piece` onto the board.
    ///
    /// No overlap check is done here; callers land only pieces whose position
    /// is valid. Cells off the board are discarded.
    pub fn land(&mut self, piece: &Piece) {
        for cell in piece.occupied_cells() {
            self.fill_cell(cell);
        }
    }

    pub(crate) fn fill_cell(&mut self, cell: Cell) {
        if let Some(i) = self.index(cell.row(), cell.col()) {
            self.cells[i] = Some(cell.color());
        }
    }

    /// Removes every full row, shifting the rows above down, and returns how many were removed.
    ///
    /// Rows are scanned from the bottom up. After a row is removed the same
    /// row index is examined again, since the row above has just moved into it.
    pub fn remove_full_lines(&mut self) -> usize {
        let mut lines = 0;
        let mut row = self.rows;
        while row > 0 {
            if self.is_row_full(row - 1) {
                self.remove_row(row - 1);
                lines += 1;
            } else {
                row -= 1;
            }
        }
        lines
    }

    fn remove_row(&mut self, row: usize) {
        let cols = self.cols;
        self.cells.copy_within(..row * cols, cols);
        self.cells[..cols].fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROWS, Self::DEFAULT_COLS)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::ShapeKind;

    use super::*;

    const C: ShapeColor = ShapeColor::Cyan;

    fn fill_row(board: &mut Board, row: i32) {
        let cols = i32::try_from(board.cols()).unwrap();
        for col in 0..cols {
            board.fill_cell(Cell::new(row, col, C));
        }
    }

    fn assert_no_overlap(board: &Board) {
        let cells: Vec<_> = board.landed_cells().collect();
        let unique: HashSet<_> = cells.iter().copied().collect();
        assert_eq!(cells.len(), unique.len());
    }

    #[test]
    fn test_cell_equality_ignores_color() {
        assert_eq!(
            Cell::new(1, 2, ShapeColor::Red),
            Cell::new(1, 2, ShapeColor::Blue)
        );
        assert_ne!(Cell::new(1, 2, C), Cell::new(2, 1, C));
    }

    #[test]
    #[should_panic(expected = "board dimensions must be positive")]
    fn test_zero_dimension_panics() {
        let _ = Board::new(0, 10);
    }

    #[test]
    fn test_is_row_occupied_out_of_range() {
        let mut board = Board::new(4, 8);
        board.fill_cell(Cell::new(3, 0, ShapeColor::Red));
        assert!(board.is_row_occupied(3));
        assert!(!board.is_row_occupied(2));
        assert!(!board.is_row_occupied(4));
        assert!(!board.is_row_occupied(usize::MAX));
    }

    #[test]
    fn test_is_valid_rejects_out_of_bounds() {
        let board = Board::new(20, 10);
        assert!(board.is_valid(&Piece::new(ShapeKind::O, 0, 0)));
        assert!(board.is_valid(&Piece::new(ShapeKind::O, 18, 8)));
        assert!(!board.is_valid(&Piece::new(ShapeKind::O, 19, 0)));
        assert!(!board.is_valid(&Piece::new(ShapeKind::O, 0, 9)));
        assert!(!board.is_valid(&Piece::new(ShapeKind::O, 0, -1)));
        assert!(!board.is_valid(&Piece::new(ShapeKind::O, -1, 0)));
    }

    #[test]
    fn test_is_valid_accepts_box_hanging_over_edge() {
        // Vertical I occupies column offset 2 only.
        let board = Board::new(20, 10);
        let piece = Piece::new(ShapeKind::I, 0, -2).rotated(false);
        assert!(board.is_valid(&piece));
        assert!(!board.can_move(&piece, Direction::Left));
    }

    #[test]
    fn test_is_valid_rejects_collision() {
        let mut board = Board::new(20, 10);
        board.fill_cell(Cell::new(5, 5, C));
        assert!(!board.is_valid(&Piece::new(ShapeKind::O, 4, 4)));
        assert!(board.is_valid(&Piece::new(ShapeKind::O, 3, 4)));
    }

    #[test]
    fn test_probes_do_not_mutate_piece() {
        let mut board = Board::new(20, 10);
        board.fill_cell(Cell::new(2, 1, C));
        for kind in ShapeKind::ALL {
            let piece = Piece::new(kind, 0, 0);
            let before = piece;
            for direction in [Direction::Down, Direction::Left, Direction::Right] {
                let _ = board.can_move(&piece, direction);
                assert_eq!(piece, before);
            }
            for ccw in [false, true] {
                let _ = board.can_rotate(&piece, ccw);
                assert_eq!(piece, before);
            }
        }
    }

    #[test]
    fn test_has_landed_on_floor() {
        let board = Board::new(20, 10);
        assert!(!board.has_landed(&Piece::new(ShapeKind::O, 17, 0)));
        assert!(board.has_landed(&Piece::new(ShapeKind::O, 18, 0)));
    }

    #[test]
    fn test_has_landed_on_stack() {
        let mut board = Board::new(20, 10);
        board.fill_cell(Cell::new(10, 1, C));
        assert!(board.has_landed(&Piece::new(ShapeKind::O, 8, 0)));
        assert!(!board.has_landed(&Piece::new(ShapeKind::O, 8, 2)));
    }

    #[test]
    fn test_has_landed_agrees_with_can_move_down() {
        let mut board = Board::new(20, 10);
        for col in [0, 3, 4, 7] {
            board.fill_cell(Cell::new(15, col, C));
        }
        board.fill_cell(Cell::new(12, 9, C));
        for kind in ShapeKind::ALL {
            for rotation in 0..4 {
                for row in -1..20 {
                    for col in -3..10 {
                        let piece = Piece::new(kind, row, col)
                            .with_rotation(crate::Rotation::new(rotation));
                        if !board.is_valid(&piece) {
                            continue;
                        }
                        assert_eq!(
                            board.has_landed(&piece),
                            !board.can_move(&piece, Direction::Down),
                            "{piece:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_land_fills_piece_cells() {
        let mut board = Board::new(20, 10);
        let piece = Piece::new(ShapeKind::T, 17, 3);
        board.land(&piece);
        assert_eq!(board.landed_count(), 4);
        for cell in piece.occupied_cells() {
            let landed = board.occupied_at(cell.row(), cell.col()).unwrap();
            assert_eq!(landed.color(), ShapeColor::Purple);
        }
        assert!(board.occupied_at(0, 0).is_none());
        assert!(board.occupied_at(-1, 0).is_none());
        assert!(board.occupied_at(0, 10).is_none());
    }

    #[test]
    fn test_remove_full_lines_without_full_rows_is_identity() {
        let mut board = Board::new(20, 10);
        board.land(&Piece::new(ShapeKind::T, 17, 3));
        board.fill_cell(Cell::new(19, 0, C));
        let before = board.clone();
        assert_eq!(board.remove_full_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_remove_full_lines_single_row() {
        let mut board = Board::new(20, 10);
        fill_row(&mut board, 19);
        board.fill_cell(Cell::new(18, 4, ShapeColor::Green));
        board.fill_cell(Cell::new(0, 0, ShapeColor::Red));

        assert_eq!(board.remove_full_lines(), 1);
        assert_eq!(board.landed_count(), 2);
        assert_eq!(
            board.occupied_at(19, 4).map(|c| c.color()),
            Some(ShapeColor::Green)
        );
        assert_eq!(
            board.occupied_at(1, 0).map(|c| c.color()),
            Some(ShapeColor::Red)
        );
        assert!(!board.is_row_occupied(0));
    }

    #[test]
    fn test_remove_full_lines_non_adjacent_rows() {
        let mut board = Board::new(20, 10);
        fill_row(&mut board, 19);
        fill_row(&mut board, 17);
        board.fill_cell(Cell::new(18, 0, C));
        board.fill_cell(Cell::new(16, 9, C));
        board.fill_cell(Cell::new(15, 5, C));
        let before = board.landed_count();

        let lines = board.remove_full_lines();
        assert_eq!(lines, 2);
        assert_eq!(board.landed_count(), before - lines * board.cols());
        assert!(board.occupied_at(19, 0).is_some());
        assert!(board.occupied_at(18, 9).is_some());
        assert!(board.occupied_at(17, 5).is_some());
        assert_no_overlap(&board);
    }

    #[test]
    fn test_remove_full_lines_stacked_rows() {
        let mut board = Board::new(20, 10);
        for row in 16..20 {
            fill_row(&mut board, row);
        }
        board.fill_cell(Cell::new(15, 3, C));

        assert_eq!(board.remove_full_lines(), 4);
        assert_eq!(board.landed_count(), 1);
        assert!(board.occupied_at(19, 3).is_some());
    }

    #[test]
    fn test_remove_full_lines_whole_board() {
        let mut board = Board::new(6, 4);
        for row in 0..6 {
            fill_row(&mut board, row);
        }
        assert_eq!(board.remove_full_lines(), 6);
        assert_eq!(board.landed_count(), 0);
    }

    #[test]
    fn test_remove_full_lines_top_row() {
        let mut board = Board::new(20, 10);
        fill_row(&mut board, 0);
        assert_eq!(board.remove_full_lines(), 1);
        assert!(!board.is_row_occupied(0));
    }
}
