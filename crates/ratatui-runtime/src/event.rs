use crossterm::event::Event;

/// What woke the event loop.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The deadline requested with `Runtime::wake_at` has passed.
    Wake,
    /// The screen should be redrawn.
    Render,
    /// Key input, resize or any other terminal event.
    Terminal(Event),
}
