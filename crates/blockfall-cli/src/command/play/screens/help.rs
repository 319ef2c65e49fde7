use crossterm::event::{Event, KeyEventKind};
use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
};
use ratatui_runtime::{Runtime, Screen, ScreenTransition};

use crate::{command::play::input::KEY_BINDINGS, view::widgets::style};

/// Key reference shown over the paused game. Any key returns.
#[derive(Debug, Default)]
pub struct HelpScreen {}

impl HelpScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for HelpScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.wake_at(None);
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => ScreenTransition::Pop,
            _ => ScreenTransition::Stay,
        }
    }

    fn update(&mut self, _runtime: &mut Runtime) {}

    fn draw(&self, frame: &mut Frame) {
        let lines: Vec<Line> = KEY_BINDINGS
            .iter()
            .map(|(keys, description)| {
                Line::from(vec![
                    Span::styled(format!("{:<12}", keys.join(" / ")), style::KEY),
                    Span::styled(*description, style::DEFAULT),
                ])
            })
            .collect();

        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX) + 4;
        let area = frame
            .area()
            .centered(Constraint::Length(36), Constraint::Length(height));
        let help = Paragraph::new(lines).block(
            Block::bordered()
                .title(Line::from("HELP").centered())
                .title_bottom(Line::from("press any key").centered())
                .padding(Padding::uniform(1))
                .style(style::DEFAULT),
        );
        frame.render_widget(help, area);
    }
}
