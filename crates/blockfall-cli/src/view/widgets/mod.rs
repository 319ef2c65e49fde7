use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, game_display::*, key_binding_display::*,
    piece_display::*, stats_display::*,
};

mod block_display;
mod board_display;
mod game_display;
mod key_binding_display;
mod piece_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const PURPLE: Color = Color::Rgb(160, 0, 240);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(64, 64, 64);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn solid(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const KEY: Style = fg_bg(color::CYAN, color::BLACK);
    pub const DIM: Style = fg_bg(color::GRAY, color::BLACK);
    pub const EMPTY: Style = solid(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);
    pub const GHOST: Style = fg_bg(color::GRAY, color::BLACK);

    pub const PAUSED: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);

    pub const I_BLOCK: Style = solid(color::CYAN);
    pub const O_BLOCK: Style = solid(color::YELLOW);
    pub const T_BLOCK: Style = solid(color::PURPLE);
    pub const S_BLOCK: Style = solid(color::GREEN);
    pub const Z_BLOCK: Style = solid(color::RED);
    pub const J_BLOCK: Style = solid(color::BLUE);
    pub const L_BLOCK: Style = solid(color::ORANGE);

    pub const BORDER_PLAYING: Color = color::WHITE;
    pub const BORDER_PAUSED: Color = color::YELLOW;
    pub const BORDER_GAME_OVER: Color = color::RED;
}

/// Rows taken by the border and padding of `block`.
fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let outer = Rect::new(0, 0, 100, 100);
    outer.height - block.map_or(outer, |block| block.inner(outer)).height
}

/// Columns taken by the border and padding of `block`.
fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let outer = Rect::new(0, 0, 100, 100);
    outer.width - block.map_or(outer, |block| block.inner(outer)).width
}
