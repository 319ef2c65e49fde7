use blockfall_engine::{PieceKind, PieceRotation};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

/// Preview of a piece in its spawn orientation, centered in a 4x2 box.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    kind: PieceKind,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new(kind: PieceKind) -> Self {
        Self { kind, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let shape = self.kind.shape(PieceRotation::SPAWN);
        let (cols, rows) = (shape.cols(), shape.rows());
        let piece_area = area.centered(
            Constraint::Length(BlockDisplay::WIDTH * u16::try_from(cols).unwrap_or(0)),
            Constraint::Length(BlockDisplay::HEIGHT * u16::try_from(rows).unwrap_or(0)),
        );

        let horizontal =
            Layout::horizontal((0..cols).map(|_| Constraint::Length(BlockDisplay::WIDTH)));
        let vertical = Layout::vertical((0..rows).map(|_| Constraint::Length(BlockDisplay::HEIGHT)));

        let filled = BlockDisplay::piece(self.kind);
        let empty = BlockDisplay::empty(false);
        for (y, row_area) in piece_area.layout_vec(&vertical).into_iter().enumerate() {
            for (x, cell_area) in row_area.layout_vec(&horizontal).into_iter().enumerate() {
                let cell = if shape.is_occupied(x, y) { filled } else { empty };
                cell.render(cell_area, buf);
            }
        }
    }
}
