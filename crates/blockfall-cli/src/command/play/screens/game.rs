use std::time::Duration;

use blockfall_engine::{Command, DropScheduler, GameConfig};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use ratatui_runtime::{RenderMode, Runtime, Screen, ScreenTransition};

use crate::{
    command::play::{
        input::{self, Action, KEY_BINDINGS, SoftDropKey},
        screens::HelpScreen,
    },
    record::{RecordingSession, SessionRecording},
    view::widgets::{GameDisplay, KeyBindingDisplay},
};

const FPS: f64 = 60.0;

/// Gravity waits at least this long after a hard drop, so the next piece
/// does not fall the moment it spawns.
const HARD_DROP_DELAY: Duration = Duration::from_millis(100);

/// Redraw interval for the play clock when nothing else happens.
const CLOCK_REFRESH: Duration = Duration::from_millis(100);

/// The playing field.
///
/// Forwards keys to the session, runs gravity from a [`DropScheduler`] and
/// hands the recording over when it closes.
#[derive(Debug)]
pub struct GameScreen<'a> {
    session: RecordingSession,
    scheduler: DropScheduler,
    soft_drop_key: SoftDropKey,
    now: Duration,
    recording: &'a mut Option<SessionRecording>,
}

impl<'a> GameScreen<'a> {
    pub fn new(config: GameConfig, recording: &'a mut Option<SessionRecording>) -> Self {
        Self {
            session: RecordingSession::new(config),
            scheduler: DropScheduler::new(),
            soft_drop_key: SoftDropKey::new(true),
            now: Duration::ZERO,
            recording,
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::SoftDrop(true) => self.soft_drop_key.press(self.now),
            Command::SoftDrop(false) => self.soft_drop_key.release(),
            _ => {}
        }
        let result = self.session.apply(command);
        if command == Command::Reset {
            self.scheduler.restart();
        }
        self.scheduler.sync(self.now, &self.session);
        if command == Command::HardDrop && result.is_ok() {
            self.scheduler.postpone(self.now, HARD_DROP_DELAY);
        }
    }

    /// Requests the next wake-up: a due drop, the end of an emulated soft
    /// drop hold, or a clock refresh.
    fn schedule_wake(&self, runtime: &mut Runtime) {
        let refresh = self
            .session
            .session_state()
            .is_playing()
            .then(|| self.now + CLOCK_REFRESH);
        let wake = [
            self.scheduler.next_drop(),
            self.soft_drop_key.deadline(),
            refresh,
        ]
        .into_iter()
        .flatten()
        .min();
        runtime.wake_at(wake);
    }
}

impl Screen for GameScreen<'_> {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
        self.soft_drop_key = SoftDropKey::new(!runtime.has_key_release_events());
        self.now = runtime.now();
        self.scheduler.sync(self.now, &self.session);
        self.schedule_wake(runtime);
    }

    fn on_inactive(&mut self, runtime: &mut Runtime) {
        self.now = runtime.now();
        self.apply(Command::SoftDrop(false));
        if self.session.session_state().is_playing() {
            self.apply(Command::TogglePause);
        }
    }

    fn on_close(&mut self, runtime: &mut Runtime) {
        let play_time = self.scheduler.play_time(runtime.now());
        *self.recording = Some(self.session.to_recording(play_time));
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        let Event::Key(key) = event else {
            return ScreenTransition::Stay;
        };
        self.now = runtime.now();
        let transition = match input::action(*key) {
            Some(Action::Game(command)) => {
                self.apply(command);
                ScreenTransition::Stay
            }
            Some(Action::Help) => ScreenTransition::Push(Box::new(HelpScreen::new())),
            Some(Action::Quit) => ScreenTransition::Exit,
            None => ScreenTransition::Stay,
        };
        self.schedule_wake(runtime);
        transition
    }

    fn update(&mut self, runtime: &mut Runtime) {
        self.now = runtime.now();
        if self.soft_drop_key.expire(self.now) {
            self.apply(Command::SoftDrop(false));
        }
        if self.scheduler.poll(self.now) {
            self.apply(Command::Tick);
        }
        self.schedule_wake(runtime);
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self
            .session
            .snapshot()
            .with_elapsed(self.scheduler.play_time(self.now));
        let game = GameDisplay::new(&snapshot, self.session.stats())
            .ghost(self.session.ghost_piece());
        let help = KeyBindingDisplay::new(KEY_BINDINGS);

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(game.height()), Constraint::Length(1)])
                .areas(frame.area());
        frame.render_widget(game, main_area);
        frame.render_widget(help, help_area);
    }
}
