use std::{iter, time::Duration};

use blockfall_engine::{GameSnapshot, GameStats};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

/// Score, time, level and the line clear histogram.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    snapshot: &'a GameSnapshot,
    stats: &'a GameStats,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot, stats: &'a GameStats) -> Self {
        Self {
            snapshot,
            stats,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

type Value = fn(&GameSnapshot, &GameStats) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    Heading(&'static str),
    Value(Value),
    Labeled(&'static str, Value),
}

const ROWS: &[Row] = &[
    Row::Heading("SCORE:"),
    Row::Value(|snapshot, _| snapshot.score().to_string()),
    Row::Heading("TIME:"),
    Row::Value(|snapshot, _| format_time(snapshot.elapsed())),
    Row::Empty,
    Row::Labeled("LEVEL:", |snapshot, _| snapshot.level().to_string()),
    Row::Labeled("LINES:", |snapshot, _| snapshot.cleared_lines().to_string()),
    Row::Labeled("PIECES:", |_, stats| stats.completed_pieces().to_string()),
    Row::Empty,
    Row::Labeled("SINGLE:", |_, stats| stats.line_cleared_counter()[1].to_string()),
    Row::Labeled("DOUBLE:", |_, stats| stats.line_cleared_counter()[2].to_string()),
    Row::Labeled("TRIPLE:", |_, stats| stats.line_cleared_counter()[3].to_string()),
    Row::Labeled("FOUR:", |_, stats| stats.line_cleared_counter()[4].to_string()),
];

/// `m:ss.cc`
fn format_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{}:{:0>2}.{:0>2}",
        secs / 60,
        secs % 60,
        elapsed.subsec_millis() / 10
    )
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let row_areas = Layout::vertical(ROWS.iter().map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), row_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::Heading(label) => {
                    Line::styled(label, style::DEFAULT).left_aligned().render(area, buf);
                }
                Row::Value(value) => {
                    Line::styled(value(self.snapshot, self.stats), style::DEFAULT)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::Labeled(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style::DEFAULT)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.snapshot, self.stats), style::DEFAULT)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
