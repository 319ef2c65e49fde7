use blockfall_engine::{GameSnapshot, GameStats, Piece, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, PieceDisplay, StatsDisplay, style};

/// Full game view: stats on the left, the board in the middle and the next
/// piece on the right, with a banner over the board when paused or over.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    snapshot: &'a GameSnapshot,
    stats: &'a GameStats,
    ghost: Option<Piece>,
}

impl<'a> GameDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot, stats: &'a GameStats) -> Self {
        Self {
            snapshot,
            stats,
            ghost: None,
        }
    }

    /// Shows where the falling piece would land. Hidden unless playing.
    pub fn ghost(self, ghost: Piece) -> Self {
        Self {
            ghost: Some(ghost),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        BoardDisplay::new(self.snapshot.board())
            .block(Block::bordered())
            .height()
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.snapshot.session_state();
        let border_color = match state {
            SessionState::Playing => style::BORDER_PLAYING,
            SessionState::Paused => style::BORDER_PAUSED,
            SessionState::GameOver => style::BORDER_GAME_OVER,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(border_color)
                .style(style::DEFAULT)
        };

        let board = BoardDisplay::new(self.snapshot.board())
            .ghost(self.ghost.filter(|_| state.is_playing()))
            .block(Block::bordered().border_style(border_color).style(style::DEFAULT));
        let next = PieceDisplay::new(self.snapshot.next_piece()).block(panel("NEXT"));
        let stats = StatsDisplay::new(self.snapshot, self.stats).block(panel("STATS"));

        let [stats_column, board_column, next_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
            Constraint::Length(next.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);
        let [board_area] = Layout::vertical([Constraint::Length(board.height())]).areas(board_column);
        let [next_area] = Layout::vertical([Constraint::Length(next.height())]).areas(next_column);

        let board_width = board.width();
        stats.render(stats_area, buf);
        board.render(board_area, buf);
        next.render(next_area, buf);

        let banner = match state {
            SessionState::Playing => None,
            SessionState::Paused => Some(("PAUSED", style::PAUSED)),
            SessionState::GameOver => Some(("GAME OVER", style::GAME_OVER)),
        };
        if let Some((text, style)) = banner {
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            Clear.render(area, buf);
            Block::new().style(style).render(area, buf);
            Text::styled(text, style)
                .centered()
                .render(area.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
