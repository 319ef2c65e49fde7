use std::time::Duration;

use super::game_session::GameSession;

/// Drop interval while soft drop is held.
pub const SOFT_DROP_INTERVAL: Duration = Duration::from_millis(50);

const BASE_GRAVITY_INTERVAL: Duration = Duration::from_millis(800);
const GRAVITY_STEP: Duration = Duration::from_millis(80);
const MIN_GRAVITY_INTERVAL: Duration = Duration::from_millis(100);

/// Gravity interval for `level`: 800 ms at level 1, 80 ms faster per level,
/// never below 100 ms.
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::gravity_interval;
///
/// assert_eq!(gravity_interval(1), Duration::from_millis(800));
/// assert_eq!(gravity_interval(5), Duration::from_millis(480));
/// assert_eq!(gravity_interval(9), Duration::from_millis(160));
/// assert_eq!(gravity_interval(10), Duration::from_millis(100));
/// assert_eq!(gravity_interval(30), Duration::from_millis(100));
/// ```
#[must_use]
pub fn gravity_interval(level: usize) -> Duration {
    let steps = u32::try_from(level.saturating_sub(1)).unwrap_or(u32::MAX);
    BASE_GRAVITY_INTERVAL
        .saturating_sub(GRAVITY_STEP.saturating_mul(steps))
        .max(MIN_GRAVITY_INTERVAL)
}

/// Drop interval the session currently calls for, or `None` when it is not playing.
#[must_use]
pub fn drop_interval(session: &GameSession) -> Option<Duration> {
    if !session.session_state().is_playing() {
        return None;
    }
    if session.is_soft_dropping() {
        return Some(SOFT_DROP_INTERVAL);
    }
    Some(gravity_interval(session.stats().level()))
}

/// Single drop clock for a session.
///
/// The driver owns real time and passes monotonic timestamps in. After every
/// command it calls [`Self::sync`], which switches between the gravity and
/// soft drop intervals and stops the clock while the session is paused or over.
/// On every loop iteration it calls [`Self::poll`] and runs a tick when a drop
/// is due.
///
/// Switching the interval re-arms the clock one full interval after the switch,
/// so releasing soft drop never fires a tick in the same instant.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{DropScheduler, GameSession};
///
/// let mut session = GameSession::new();
/// let mut scheduler = DropScheduler::new();
///
/// scheduler.sync(Duration::ZERO, &session);
/// assert!(!scheduler.poll(Duration::from_millis(799)));
/// assert!(scheduler.poll(Duration::from_millis(800)));
/// _ = session.tick();
///
/// session.set_soft_drop(true).unwrap();
/// scheduler.sync(Duration::from_millis(810), &session);
/// assert!(scheduler.poll(Duration::from_millis(860)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DropScheduler {
    interval: Option<Duration>,
    next_drop: Option<Duration>,
    running_since: Option<Duration>,
    play_time: Duration,
}

impl DropScheduler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: None,
            next_drop: None,
            running_since: None,
            play_time: Duration::ZERO,
        }
    }

    /// Interval of the running clock, `None` while stopped.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Time at which the next drop is due, `None` while stopped.
    #[must_use]
    pub fn next_drop(&self) -> Option<Duration> {
        self.next_drop
    }

    /// Total time the clock has been running up to `now`.
    #[must_use]
    pub fn play_time(&self, now: Duration) -> Duration {
        let running = self
            .running_since
            .map_or(Duration::ZERO, |since| now.saturating_sub(since));
        self.play_time + running
    }

    /// Re-selects the drop interval after a change of session state.
    ///
    /// Does nothing if the interval is unchanged, so the pending drop keeps its
    /// time. Otherwise the clock stops, or restarts one interval from `now`.
    pub fn sync(&mut self, now: Duration, session: &GameSession) {
        let interval = drop_interval(session);
        match (self.running_since, interval) {
            (None, Some(_)) => self.running_since = Some(now),
            (Some(since), None) => {
                self.play_time += now.saturating_sub(since);
                self.running_since = None;
            }
            _ => {}
        }
        if interval == self.interval {
            return;
        }
        self.interval = interval;
        self.next_drop = interval.map(|interval| now + interval);
    }

    /// Returns whether a drop is due at `now` and, if so, schedules the next one.
    ///
    /// The next drop is one interval after `now`; drops missed during a stall
    /// are not replayed.
    pub fn poll(&mut self, now: Duration) -> bool {
        let (Some(interval), Some(next_drop)) = (self.interval, self.next_drop) else {
            return false;
        };
        if now < next_drop {
            return false;
        }
        self.next_drop = Some(now + interval);
        true
    }

    /// Holds off the next drop until at least `delay` after `now`.
    pub fn postpone(&mut self, now: Duration, delay: Duration) {
        if let Some(next_drop) = &mut self.next_drop {
            *next_drop = (*next_drop).max(now + delay);
        }
    }

    /// Stops the clock and forgets accumulated play time.
    pub fn restart(&mut self) {
        *self = Self::new();
    }
}
