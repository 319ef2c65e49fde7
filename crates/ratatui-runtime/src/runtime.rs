use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use ratatui::DefaultTerminal;

use crate::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// TUI application runtime.
///
/// Owns the monotonic clock and the event loop. Applications read the clock
/// with [`Self::now`] and ask to be woken with [`Self::wake_at`], which
/// drives [`App::update`].
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
    started: Instant,
    key_release_events: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(),
            started: Instant::now(),
            key_release_events: false,
        }
    }

    /// Monotonic time since the runtime was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }

    /// Requests a call to [`App::update`] once [`Self::now`] reaches `at`.
    ///
    /// Replaces any earlier request. `None` cancels it.
    pub fn wake_at(&mut self, at: Option<Duration>) {
        self.events.set_wake_at(at.map(|at| self.started + at));
    }

    /// Pending wake-up, on the [`Self::now`] clock.
    #[must_use]
    pub fn next_wake(&self) -> Option<Duration> {
        self.events
            .wake_at()
            .map(|at| at.saturating_duration_since(self.started))
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Forces a redraw even though no event arrived.
    pub fn request_render(&mut self) {
        self.events.mark_dirty();
    }

    /// Whether the terminal reports key releases.
    ///
    /// Without it every key event is a press, and held keys show up as
    /// repeated presses.
    #[must_use]
    pub fn has_key_release_events(&self) -> bool {
        self.key_release_events
    }

    /// Runs the application until [`App::should_exit`] returns true.
    ///
    /// Key release reporting is switched on for the duration of the run when
    /// the terminal supports it.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            self.key_release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
            if self.key_release_events {
                execute!(
                    io::stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
            }

            let result = self.event_loop(terminal, app);

            if self.key_release_events {
                execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            }
            result
        })
    }

    fn event_loop<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(self);
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Wake => app.update(self),
                TuiEvent::Render => {
                    terminal.draw(|frame| app.draw(frame))?;
                }
                TuiEvent::Terminal(event) => app.handle_event(self, event),
            }
        }
        Ok(())
    }
}
