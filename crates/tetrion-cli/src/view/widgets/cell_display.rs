use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use tetrion_engine::ShapeColor;

use crate::view::widgets::style;

/// One board cell drawn as two terminal columns.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    /// Empty cells are drawn as a dim dot when `show_dots` is set.
    pub fn from_color(color: Option<ShapeColor>, show_dots: bool) -> Self {
        match color {
            Some(color) => Self::new(style::shape(color), ""),
            None if show_dots => Self::new(style::EMPTY_DOT, "."),
            None => Self::new(style::EMPTY, ""),
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fills_whole_area() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        CellDisplay::from_color(Some(ShapeColor::Red), false).render(area, &mut buf);
        for x in 0..2 {
            assert_eq!(buf[(x, 0)].style().bg, style::shape(ShapeColor::Red).bg);
        }
    }

    #[test]
    fn test_empty_cell_dot() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        CellDisplay::from_color(None, true).render(area, &mut buf);
        let line: String = (0..2).map(|x| buf[(x, 0)].symbol()).collect();
        assert_eq!(line.trim(), ".");
    }
}
