use blockfall_engine::{Block, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// One board cell, two terminal columns wide.
#[derive(Debug, Clone, Copy)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    /// An empty cell, dotted on the board and blank in previews.
    pub const fn empty(show_dots: bool) -> Self {
        if show_dots {
            Self::new(style::EMPTY_DOT, " .")
        } else {
            Self::new(style::EMPTY, "")
        }
    }

    /// Outline of where the falling piece would land.
    pub const fn ghost() -> Self {
        Self::new(style::GHOST, "[]")
    }

    pub const fn piece(kind: PieceKind) -> Self {
        let style = match kind {
            PieceKind::I => style::I_BLOCK,
            PieceKind::O => style::O_BLOCK,
            PieceKind::T => style::T_BLOCK,
            PieceKind::S => style::S_BLOCK,
            PieceKind::Z => style::Z_BLOCK,
            PieceKind::J => style::J_BLOCK,
            PieceKind::L => style::L_BLOCK,
        };
        Self::new(style, "")
    }

    pub const fn from_block(block: Block, show_dots: bool) -> Self {
        match block {
            Block::Empty => Self::empty(show_dots),
            Block::Piece(kind) => Self::piece(kind),
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // a Paragraph paints the whole area, not just the symbol's cells
        Paragraph::new(self.symbol)
            .style(self.style)
            .render(area, buf);
    }
}
