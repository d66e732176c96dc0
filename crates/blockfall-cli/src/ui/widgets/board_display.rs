use std::iter;

use blockfall_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::CellDisplay;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: Piece) -> Self {
        Self {
            piece: Some(piece),
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
        BOARD_WIDTH as u16 * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        BOARD_HEIGHT as u16 * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Returns a copy of `board` with the active piece painted in.
///
/// Cells of the piece that lie above the board are not shown.
fn compose(board: &Board, piece: Option<&Piece>) -> Board {
    let mut board = board.clone();
    if let Some(piece) = piece {
        let cell = Cell::Filled(piece.color());
        for (x, y) in piece.occupied_positions() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
                board.set_cell(x, y, cell);
            }
        }
    }
    board
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
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let board = compose(self.board, self.piece.as_ref());

        let col_constraints = (0..BOARD_WIDTH).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..BOARD_HEIGHT).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<BOARD_HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_WIDTH>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, board.rows()) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                CellDisplay::from_cell(*cell).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{ShapeColor, ShapeKind};

    use super::*;

    #[test]
    fn test_compose_paints_piece() {
        let board = Board::EMPTY;
        let piece = Piece::new(ShapeKind::O, 2, 3);
        let composed = compose(&board, Some(&piece));
        let yellow = Cell::Filled(ShapeColor::Yellow);
        for (x, y) in [(2, 3), (3, 3), (2, 4), (3, 4)] {
            assert_eq!(composed.cell(x, y), Some(yellow), "({x}, {y})");
        }
        assert_eq!(&board, &Board::EMPTY);
    }

    #[test]
    fn test_compose_skips_cells_above_board() {
        let piece = Piece::new(ShapeKind::O, 0, -1);
        let composed = compose(&Board::EMPTY, Some(&piece));
        assert_eq!(composed.cell(0, 0), Some(Cell::Filled(ShapeColor::Yellow)));
        assert_eq!(composed.cell(0, 1), Some(Cell::Empty));
    }

    #[test]
    fn test_render_size_with_border() {
        let display = BoardDisplay::new(&Board::EMPTY).block(BlockWidget::bordered());
        assert_eq!(display.width(), 22);
        assert_eq!(display.height(), 22);

        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        assert!((1..3).any(|x| buf[(x, 1)].symbol() == "."));
    }
}
