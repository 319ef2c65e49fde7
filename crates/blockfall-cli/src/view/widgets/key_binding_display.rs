use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Span},
    widgets::Widget,
};

use super::style;

/// Keys that trigger an action, and what the action is called.
pub type KeyBinding = (&'static [&'static str], &'static str);

/// One-line key reference, e.g. `A/← Left | D/→ Right`.
#[derive(Debug)]
pub struct KeyBindingDisplay {
    bindings: &'static [KeyBinding],
}

impl KeyBindingDisplay {
    pub fn new(bindings: &'static [KeyBinding]) -> Self {
        Self { bindings }
    }
}

impl Widget for KeyBindingDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![];
        for (i, (keys, description)) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", style::DIM));
            }
            for (j, key) in keys.iter().enumerate() {
                if j > 0 {
                    spans.push(Span::styled("/", style::DIM));
                }
                spans.push(Span::styled(*key, style::KEY));
            }
            spans.push(Span::styled(format!(" {description}"), style::DEFAULT));
        }
        Line::from(spans).centered().render(area, buf);
    }
}
