use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use crate::{App, Runtime};

/// One layer of a [`ScreenStack`].
///
/// Only the top screen receives events, updates and draw calls.
///
/// ```text
/// pushed ──> on_active ──> (top) ──> on_inactive ──> (covered)
///               ^                                       │
///               └──────────── screen above pops ────────┘
///
/// popped or exit: on_close
/// ```
///
/// The wake-up deadline and render mode belong to the top screen, so a
/// screen sets them again in [`Self::on_active`]:
///
/// ```rust
/// use crossterm::event::Event;
/// use ratatui::Frame;
/// use ratatui_runtime::{RenderMode, Runtime, Screen, ScreenTransition};
///
/// #[derive(Debug)]
/// struct Clock;
///
/// impl Screen for Clock {
///     fn on_active(&mut self, runtime: &mut Runtime) {
///         runtime.set_render_mode(RenderMode::throttled_from_rate(30.0));
///         runtime.wake_at(Some(runtime.now()));
///     }
///
///     fn handle_event(&mut self, _runtime: &mut Runtime, _event: &Event) -> ScreenTransition {
///         ScreenTransition::Exit
///     }
///
///     fn update(&mut self, runtime: &mut Runtime) {
///         runtime.wake_at(Some(runtime.now() + std::time::Duration::from_secs(1)));
///     }
///
///     fn draw(&self, _frame: &mut Frame) {}
/// }
/// ```
pub trait Screen: fmt::Debug {
    /// The screen became the top of the stack.
    fn on_active(&mut self, runtime: &mut Runtime);

    /// A pushed screen covered this one.
    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    /// The screen is leaving the stack for good. [`Self::on_inactive`] is
    /// not called first.
    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition;

    /// The wake-up requested with [`Runtime::wake_at`] is due.
    fn update(&mut self, runtime: &mut Runtime);

    fn draw(&self, frame: &mut Frame);
}

/// What the stack does after a screen handled an event.
#[derive(Debug)]
pub enum ScreenTransition {
    Stay,
    /// Cover the current screen with a new one.
    Push(Box<dyn Screen>),
    /// Close the current screen and reactivate the one below.
    Pop,
    /// Close every screen and stop the runtime.
    Exit,
}

/// Stack of screens, run as a single [`App`].
///
/// The stack exits when it becomes empty.
#[derive(Debug)]
pub struct ScreenStack<'a> {
    screens: Vec<Box<dyn Screen + 'a>>,
    exiting: bool,
}

impl<'a> ScreenStack<'a> {
    #[must_use]
    pub fn new(root: Box<dyn Screen + 'a>) -> Self {
        Self {
            screens: vec![root],
            exiting: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    fn close_top(&mut self, runtime: &mut Runtime) {
        if let Some(mut screen) = self.screens.pop() {
            screen.on_close(runtime);
        }
    }

    fn transition(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                if let Some(top) = self.screens.last_mut() {
                    top.on_inactive(runtime);
                }
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                self.close_top(runtime);
                if let Some(top) = self.screens.last_mut() {
                    top.on_active(runtime);
                }
            }
            ScreenTransition::Exit => {
                while !self.screens.is_empty() {
                    self.close_top(runtime);
                }
                self.exiting = true;
            }
        }
        runtime.request_render();
    }
}

impl App for ScreenStack<'_> {
    fn init(&mut self, runtime: &mut Runtime) {
        if let Some(top) = self.screens.last_mut() {
            top.on_active(runtime);
        }
    }

    fn should_exit(&self) -> bool {
        self.exiting || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(top) = self.screens.last_mut() {
            let transition = top.handle_event(runtime, &event);
            self.transition(runtime, transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(top) = self.screens.last() {
            top.draw(frame);
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        if let Some(top) = self.screens.last_mut() {
            top.update(runtime);
        }
    }
}
