use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetrion_engine::{Rotation, ShapeKind};

use crate::view::widgets::CellDisplay;

/// Preview of a single shape in its spawn orientation, trimmed to its
/// bounding box and centered in the area.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    shape: Option<ShapeKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(self, shape: ShapeKind) -> Self {
        Self {
            shape: Some(shape),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        3 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Offsets of the spawn orientation shifted so the bounding box starts at `(0, 0)`,
/// together with the box size in `(cols, rows)`.
fn normalized_offsets(kind: ShapeKind) -> (Vec<(i32, i32)>, (i32, i32)) {
    let offsets: Vec<_> = kind.shape().offsets(Rotation::default()).collect();
    let min_row = offsets.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let max_row = offsets.iter().map(|&(r, _)| r).max().unwrap_or(0);
    let min_col = offsets.iter().map(|&(_, c)| c).min().unwrap_or(0);
    let max_col = offsets.iter().map(|&(_, c)| c).max().unwrap_or(0);
    let offsets = offsets
        .into_iter()
        .map(|(r, c)| (r - min_row, c - min_col))
        .collect();
    (offsets, (max_col - min_col + 1, max_row - min_row + 1))
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let empty_cell = CellDisplay::from_color(None, false);
        Widget::render(&empty_cell, area, buf);

        let Some(kind) = self.shape else {
            return;
        };
        let (offsets, (width, height)) = normalized_offsets(kind);
        let piece_area = area.centered(
            Constraint::Length(width as u16 * CellDisplay::width()),
            Constraint::Length(height as u16 * CellDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let occupied_cell = CellDisplay::from_color(Some(kind.shape().color()), false);
        for (row, col) in offsets {
            let grid_row = piece_area.layout_vec(&vertical)[row as usize];
            let grid_cell = grid_row.layout_vec(&horizontal)[col as usize];
            Widget::render(&occupied_cell, grid_cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::widgets::style;

    #[test]
    fn test_normalized_offsets_trim_empty_rows() {
        let (offsets, size) = normalized_offsets(ShapeKind::I);
        assert_eq!(offsets, [(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(size, (4, 1));

        let (offsets, size) = normalized_offsets(ShapeKind::T);
        assert_eq!(offsets, [(0, 0), (0, 1), (0, 2), (1, 1)]);
        assert_eq!(size, (3, 2));
    }

    #[test]
    fn test_empty_preview_renders_blank() {
        let display = PieceDisplay::default();
        assert_eq!((display.width(), display.height()), (8, 3));

        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        assert!(buf.content().iter().all(|cell| cell.style().bg == style::EMPTY.bg));
    }

    #[test]
    fn test_every_spawn_orientation_fits_preview() {
        for kind in ShapeKind::ALL {
            let (_, (width, height)) = normalized_offsets(kind);
            assert!(width <= 4 && height <= 3, "{kind:?}");
        }
    }
}
