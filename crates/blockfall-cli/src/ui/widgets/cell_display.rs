use blockfall_engine::Cell;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// One board cell, drawn two terminal columns wide.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    /// Empty cells show a dim dot so the grid stays visible.
    pub fn from_cell(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::new(style::EMPTY_DOT, "."),
            Cell::Filled(color) => Self::new(style::filled(color), ""),
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
    use blockfall_engine::ShapeColor;

    use super::*;

    #[test]
    fn test_empty_cell_renders_dot() {
        let area = Rect::new(0, 0, CellDisplay::width(), CellDisplay::height());
        let mut buf = Buffer::empty(area);
        CellDisplay::from_cell(Cell::Empty).render(area, &mut buf);
        let symbols: String = (0..2).map(|x| buf[(x, 0)].symbol()).collect();
        assert_eq!(symbols.trim(), ".");
        assert_eq!(buf[(0, 0)].style().fg, style::EMPTY_DOT.fg);
    }

    #[test]
    fn test_filled_cell_uses_shape_color() {
        let area = Rect::new(0, 0, CellDisplay::width(), CellDisplay::height());
        let mut buf = Buffer::empty(area);
        CellDisplay::from_cell(Cell::Filled(ShapeColor::Red)).render(area, &mut buf);
        let expected = style::filled(ShapeColor::Red);
        assert!((0..2).all(|x| buf[(x, 0)].style().bg == expected.bg));
    }
}
