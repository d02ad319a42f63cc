//! Key bindings: arrows plus vim-style letters.

use crate::session::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press means to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    Quit,
    None,
}

/// Map a key event to an action. Releases and modified keys (other than
/// Shift, and Ctrl-C) are ignored.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = key;
    if kind == KeyEventKind::Release {
        return Action::None;
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::None,
        };
    }
    if !(modifiers.is_empty() || modifiers == KeyModifiers::SHIFT) {
        return Action::None;
    }
    let command = match code {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Left | KeyCode::Char('h') => Command::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') => Command::MoveRight,
        KeyCode::Down | KeyCode::Char('j') => Command::SoftDrop,
        KeyCode::Up | KeyCode::Char('k' | 'i') => Command::Rotate,
        KeyCode::Enter | KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('p' | 'P') => Command::TogglePause,
        KeyCode::Char('n' | 'r' | 'N' | 'R') => Command::NewGame,
        _ => return Action::None,
    };
    Action::Game(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_vim_keys_agree() {
        assert_eq!(key_to_action(press(KeyCode::Left)), Action::Game(Command::MoveLeft));
        assert_eq!(key_to_action(press(KeyCode::Char('h'))), Action::Game(Command::MoveLeft));
        assert_eq!(key_to_action(press(KeyCode::Up)), Action::Game(Command::Rotate));
        assert_eq!(key_to_action(press(KeyCode::Char('k'))), Action::Game(Command::Rotate));
        assert_eq!(key_to_action(press(KeyCode::Char(' '))), Action::Game(Command::HardDrop));
    }

    #[test]
    fn session_keys() {
        assert_eq!(key_to_action(press(KeyCode::Char('p'))), Action::Game(Command::TogglePause));
        assert_eq!(key_to_action(press(KeyCode::Char('n'))), Action::Game(Command::NewGame));
        assert_eq!(key_to_action(press(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn releases_and_alt_are_ignored() {
        let mut release = press(KeyCode::Left);
        release.kind = KeyEventKind::Release;
        assert_eq!(key_to_action(release), Action::None);
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Left, KeyModifiers::ALT)),
            Action::None
        );
    }
}
