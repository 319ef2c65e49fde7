use std::time::Duration;

use blockfall_engine::{Command, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::view::widgets::KeyBinding;

/// How long a soft drop lasts after its last key press when the terminal
/// does not report key releases.
///
/// Longer than the usual auto-repeat delay, so holding the key reads as one
/// continuous press.
pub const SOFT_DROP_HOLD: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    Help,
    Quit,
}

pub const KEY_BINDINGS: &[KeyBinding] = &[
    (&["A", "←"], "Left"),
    (&["D", "→"], "Right"),
    (&["W", "↑"], "Rotate"),
    (&["S", "↓"], "Soft Drop"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["R"], "New Game"),
    (&["H", "?"], "Help"),
    (&["Q", "Esc"], "Quit"),
];

/// Maps a key event to an action.
///
/// Soft drop follows the key: press and repeat start it, release stops it.
/// Left and right fire on press and repeat. Every other action fires once
/// per press.
pub fn action(key: KeyEvent) -> Option<Action> {
    let released = key.kind == KeyEventKind::Release;
    let pressed = key.kind == KeyEventKind::Press;
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (pressed && matches!(key.code, KeyCode::Char('c'))).then_some(Action::Quit);
    }
    let KeyCode::Char(c) = key.code else {
        return match key.code {
            KeyCode::Down => Some(Action::Game(Command::SoftDrop(!released))),
            _ if released => None,
            KeyCode::Left => Some(Action::Game(Command::Move(Direction::Left))),
            KeyCode::Right => Some(Action::Game(Command::Move(Direction::Right))),
            _ if !pressed => None,
            KeyCode::Up => Some(Action::Game(Command::Rotate)),
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::F(1) => Some(Action::Help),
            _ => None,
        };
    };
    let command = match c.to_ascii_lowercase() {
        's' => Command::SoftDrop(!released),
        _ if released => return None,
        'a' => Command::Move(Direction::Left),
        'd' => Command::Move(Direction::Right),
        _ if !pressed => return None,
        'w' => Command::Rotate,
        ' ' => Command::HardDrop,
        'p' => Command::TogglePause,
        'r' => Command::Reset,
        'h' | '?' => return Some(Action::Help),
        'q' => return Some(Action::Quit),
        _ => return None,
    };
    Some(Action::Game(command))
}

/// Soft drop key state for terminals that only report presses.
///
/// Each press holds the key for [`SOFT_DROP_HOLD`]; auto-repeat keeps
/// extending it. With release events available the hold never expires on
/// its own.
#[derive(Debug, Clone)]
pub struct SoftDropKey {
    emulate_release: bool,
    release_at: Option<Duration>,
}

impl SoftDropKey {
    pub fn new(emulate_release: bool) -> Self {
        Self {
            emulate_release,
            release_at: None,
        }
    }

    pub fn press(&mut self, now: Duration) {
        if self.emulate_release {
            self.release_at = Some(now + SOFT_DROP_HOLD);
        }
    }

    pub fn release(&mut self) {
        self.release_at = None;
    }

    /// When the emulated release is due.
    pub fn deadline(&self) -> Option<Duration> {
        self.release_at
    }

    /// Returns true once, when the emulated hold has run out at `now`.
    pub fn expire(&mut self, now: Duration) -> bool {
        if self.release_at.is_some_and(|at| at <= now) {
            self.release_at = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> Option<Action> {
        action(key(code, KeyEventKind::Press))
    }

    #[test]
    fn test_letter_and_arrow_keys_match() {
        for (letter, arrow) in [('a', KeyCode::Left), ('d', KeyCode::Right), ('w', KeyCode::Up)] {
            assert_eq!(press(KeyCode::Char(letter)), press(arrow));
            assert_eq!(press(KeyCode::Char(letter.to_ascii_uppercase())), press(arrow));
        }
        assert_eq!(
            press(KeyCode::Char('a')),
            Some(Action::Game(Command::Move(Direction::Left)))
        );
        assert_eq!(press(KeyCode::Char(' ')), Some(Action::Game(Command::HardDrop)));
        assert_eq!(press(KeyCode::Char('p')), Some(Action::Game(Command::TogglePause)));
        assert_eq!(press(KeyCode::Char('r')), Some(Action::Game(Command::Reset)));
        assert_eq!(press(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(press(KeyCode::Char('?')), Some(Action::Help));
        assert_eq!(press(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_soft_drop_follows_key() {
        for code in [KeyCode::Char('s'), KeyCode::Down] {
            assert_eq!(
                action(key(code, KeyEventKind::Press)),
                Some(Action::Game(Command::SoftDrop(true)))
            );
            assert_eq!(
                action(key(code, KeyEventKind::Repeat)),
                Some(Action::Game(Command::SoftDrop(true)))
            );
            assert_eq!(
                action(key(code, KeyEventKind::Release)),
                Some(Action::Game(Command::SoftDrop(false)))
            );
        }
    }

    #[test]
    fn test_releases_are_ignored_for_other_keys() {
        assert_eq!(action(key(KeyCode::Char(' '), KeyEventKind::Release)), None);
        assert_eq!(action(key(KeyCode::Left, KeyEventKind::Release)), None);
        assert_eq!(
            action(key(KeyCode::Left, KeyEventKind::Repeat)),
            Some(Action::Game(Command::Move(Direction::Left)))
        );
    }

    #[test]
    fn test_repeats_only_move_and_soft_drop() {
        let repeat = |code| action(key(code, KeyEventKind::Repeat));
        for code in [
            KeyCode::Char(' '),
            KeyCode::Char('p'),
            KeyCode::Char('w'),
            KeyCode::Up,
            KeyCode::Char('r'),
            KeyCode::Char('h'),
            KeyCode::F(1),
            KeyCode::Char('q'),
            KeyCode::Esc,
        ] {
            assert_eq!(repeat(code), None, "{code:?}");
        }
        assert_eq!(
            repeat(KeyCode::Char('d')),
            Some(Action::Game(Command::Move(Direction::Right)))
        );
        assert_eq!(
            repeat(KeyCode::Right),
            Some(Action::Game(Command::Move(Direction::Right)))
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action(event), Some(Action::Quit));
        let event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(action(event), None);
    }

    #[test]
    fn test_emulated_soft_drop_release() {
        let ms = Duration::from_millis;
        let mut soft_drop = SoftDropKey::new(true);
        soft_drop.press(ms(0));
        assert!(!soft_drop.expire(ms(200)));

        // auto-repeat extends the hold
        soft_drop.press(ms(250));
        assert!(!soft_drop.expire(ms(400)));
        assert_eq!(soft_drop.deadline(), Some(ms(550)));
        assert!(soft_drop.expire(ms(550)));
        assert!(!soft_drop.expire(ms(600)));
        assert_eq!(soft_drop.deadline(), None);
    }

    #[test]
    fn test_real_release_events_never_expire() {
        let mut soft_drop = SoftDropKey::new(false);
        soft_drop.press(Duration::ZERO);
        assert_eq!(soft_drop.deadline(), None);
        assert!(!soft_drop.expire(Duration::from_secs(60)));
    }
}
