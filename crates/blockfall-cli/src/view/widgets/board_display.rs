use std::iter;

use blockfall_engine::{Block, Board, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

/// The 10x20 playfield.
///
/// The board is drawn as given, so a snapshot board already shows the
/// falling piece. The ghost only fills cells that are still empty.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            block: None,
        }
    }

    pub fn ghost(self, ghost: Option<Piece>) -> Self {
        Self { ghost, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        Board::WIDTH as u16 * BlockDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        Board::HEIGHT as u16 * BlockDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }

    fn is_ghost_cell(&self, x: usize, y: usize) -> bool {
        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            return false;
        };
        self.ghost
            .is_some_and(|ghost| ghost.occupied_cells().any(|cell| cell == (x, y)))
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let horizontal = Layout::horizontal(
            (0..Board::WIDTH).map(|_| Constraint::Length(BlockDisplay::WIDTH)),
        )
        .flex(Flex::Center);
        let vertical =
            Layout::vertical((0..Board::HEIGHT).map(|_| Constraint::Length(BlockDisplay::HEIGHT)));

        let grid = area
            .layout::<{ Board::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Board::WIDTH }>(&horizontal));

        for (y, (grid_row, row)) in iter::zip(grid, self.board.rows()).enumerate() {
            for (x, (cell_area, block)) in iter::zip(grid_row, row).enumerate() {
                let cell = match block {
                    Block::Empty if self.is_ghost_cell(x, y) => BlockDisplay::ghost(),
                    block => BlockDisplay::from_block(*block, true),
                };
                cell.render(cell_area, buf);
            }
        }
    }
}
