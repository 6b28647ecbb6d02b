use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};
use tetrion_engine::{Board, Piece, ShapeColor};

use crate::view::widgets::CellDisplay;

/// The playfield: landed cells with the falling piece drawn on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            falling_piece: None,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: Piece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        self.board.cols() as u16 * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        self.board.rows() as u16 * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn color_at(&self, row: i32, col: i32) -> Option<ShapeColor> {
        let falling = self.falling_piece.iter().flat_map(Piece::occupied_cells);
        falling
            .chain(self.board.occupied_at(row, col))
            .find(|cell| cell.row() == row && cell.col() == col)
            .map(|cell| cell.color())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.board.cols()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..self.board.rows()).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        for (row, grid_row) in area.layout_vec(&vertical).into_iter().enumerate() {
            for (col, grid_cell) in grid_row.layout_vec(&horizontal).into_iter().enumerate() {
                let color = self.color_at(row as i32, col as i32);
                CellDisplay::from_color(color, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tetrion_engine::{Direction, ShapeKind};

    use super::*;
    use crate::view::widgets::style;

    #[test]
    fn test_size_follows_board_dimensions() {
        let board = Board::new(12, 8);
        let display = BoardDisplay::new(&board);
        assert_eq!((display.width(), display.height()), (16, 12));

        let display = display.block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (18, 14));
    }

    #[test]
    fn test_renders_landed_and_falling_cells() {
        let mut board = Board::new(20, 10);
        let mut landed = Piece::new(ShapeKind::O, 0, 0);
        while board.can_move(&landed, Direction::Down) {
            landed.move_by(Direction::Down);
        }
        board.land(&landed);
        let falling = Piece::new(ShapeKind::T, 0, 4);

        let display = BoardDisplay::new(&board).falling_piece(falling);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        let yellow = style::shape(ShapeColor::Yellow).bg;
        let purple = style::shape(ShapeColor::Purple).bg;
        // O occupies rows 18-19, cols 0-1
        assert_eq!(buf[(0, 19)].style().bg, yellow);
        assert_eq!(buf[(3, 18)].style().bg, yellow);
        // T rotation 0 occupies row 1 cols 4-6 and row 2 col 5
        assert_eq!(buf[(8, 1)].style().bg, purple);
        assert_eq!(buf[(12, 1)].style().bg, purple);
        assert_eq!(buf[(10, 2)].style().bg, purple);
        assert_eq!(buf[(0, 0)].style().bg, style::EMPTY_DOT.bg);
    }
}
