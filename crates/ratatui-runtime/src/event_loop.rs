use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw after every wake-up or terminal event.
    #[default]
    OnDirty,
    /// Redraw after state changes, at most once per interval.
    ///
    /// Bursts of key presses are folded into one frame.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from a frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Waits for the earliest of: the requested wake-up, the next frame, or a
/// terminal event.
#[derive(Debug)]
pub(super) struct EventLoop {
    wake_at: Option<Instant>,
    render_mode: RenderMode,
    last_render: Option<Instant>,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            wake_at: None,
            render_mode: RenderMode::default(),
            last_render: None,
            dirty: true,
        }
    }

    /// Replaces the pending wake-up. `None` sleeps until a terminal event.
    pub(super) fn set_wake_at(&mut self, wake_at: Option<Instant>) {
        self.wake_at = wake_at;
    }

    pub(super) fn wake_at(&self) -> Option<Instant> {
        self.wake_at
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    pub(super) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Blocks until the next event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due(now) {
                return Ok(event);
            }
            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns the timer event that is due at `now`, if any.
    ///
    /// A wake-up is one-shot and wins over rendering.
    fn due(&mut self, now: Instant) -> Option<TuiEvent> {
        if self.wake_at.is_some_and(|wake_at| wake_at <= now) {
            self.wake_at = None;
            self.dirty = true;
            return Some(TuiEvent::Wake);
        }
        let render = self.dirty
            && match (self.render_mode, self.last_render) {
                (RenderMode::OnDirty, _) | (RenderMode::Throttled(_), None) => true,
                (RenderMode::Throttled(interval), Some(last)) => now >= last + interval,
            };
        if render {
            self.last_render = Some(now);
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// How long to wait for terminal input before a timer event is due.
    ///
    /// `None` means wait indefinitely.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let render_at = match (self.render_mode, self.last_render) {
            _ if !self.dirty => None,
            (RenderMode::OnDirty, _) | (RenderMode::Throttled(_), None) => Some(now),
            (RenderMode::Throttled(interval), Some(last)) => Some(last + interval),
        };
        let deadline = [self.wake_at, render_at].into_iter().flatten().min()?;
        Some(deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn drain(events: &mut EventLoop, now: Instant) -> Vec<TuiEvent> {
        std::iter::from_fn(|| events.due(now)).collect()
    }

    #[test]
    fn test_first_frame_is_rendered_immediately() {
        let mut events = EventLoop::new();
        let now = Instant::now();
        assert_eq!(events.timeout(now), Some(Duration::ZERO));
        assert_eq!(drain(&mut events, now), [TuiEvent::Render]);
        assert_eq!(events.timeout(now), None);
    }

    #[test]
    fn test_wake_fires_once_then_renders() {
        let mut events = EventLoop::new();
        let start = Instant::now();
        drain(&mut events, start);

        events.set_wake_at(Some(start + ms(800)));
        assert_eq!(events.timeout(start), Some(ms(800)));
        assert!(events.due(start + ms(799)).is_none());

        let now = start + ms(800);
        assert_eq!(drain(&mut events, now), [TuiEvent::Wake, TuiEvent::Render]);
        assert_eq!(events.wake_at(), None);
    }

    #[test]
    fn test_throttled_render_waits_for_interval() {
        let mut events = EventLoop::new();
        events.set_render_mode(RenderMode::Throttled(ms(16)));
        let start = Instant::now();
        assert_eq!(drain(&mut events, start), [TuiEvent::Render]);

        events.mark_dirty();
        assert!(events.due(start + ms(5)).is_none());
        assert_eq!(events.timeout(start + ms(5)), Some(ms(11)));
        assert_eq!(drain(&mut events, start + ms(16)), [TuiEvent::Render]);
    }

    #[test]
    fn test_earliest_deadline_wins() {
        let mut events = EventLoop::new();
        events.set_render_mode(RenderMode::Throttled(ms(16)));
        let start = Instant::now();
        drain(&mut events, start);

        events.mark_dirty();
        events.set_wake_at(Some(start + ms(50)));
        assert_eq!(events.timeout(start), Some(ms(16)));

        events.set_wake_at(Some(start + ms(3)));
        assert_eq!(events.timeout(start), Some(ms(3)));
    }

    #[test]
    fn test_throttled_from_rate() {
        assert_eq!(
            RenderMode::throttled_from_rate(50.0),
            RenderMode::Throttled(ms(20))
        );
    }
}
