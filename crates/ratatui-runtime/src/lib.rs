//! Minimal event loop for ratatui applications that run on deadlines.
//!
//! Instead of a fixed tick rate, an [`App`] asks the [`Runtime`] to wake it at
//! a point on the runtime's monotonic clock. Between wake-ups the loop only
//! wakes for terminal input and redraws.

pub use self::{
    app::App,
    event_loop::RenderMode,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod event;
mod event_loop;
mod runtime;
mod screen;
