/// Keyboard event to action mapping
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use super::action::Action;

pub fn key_to_action(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    trace!("KEY: {:?}", key);

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),

        KeyCode::Char('s') | KeyCode::Tab => Some(Action::NextSport),
        KeyCode::Char('S') | KeyCode::BackTab => Some(Action::PreviousSport),

        KeyCode::Left => Some(Action::PreviousDate),
        KeyCode::Right => Some(Action::NextDate),
        KeyCode::Char('t') => Some(Action::Today),

        KeyCode::Char('f') => Some(Action::ToggleHideFinished),
        KeyCode::Char('n') => Some(Action::ToggleHideNotStarted),
        KeyCode::Char('l') => Some(Action::ToggleLongNames),

        KeyCode::Char('r') => Some(Action::RefreshData),

        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        KeyCode::Enter => Some(Action::OpenSelected),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_filter_keys() {
        assert!(matches!(key_to_action(press(KeyCode::Char('f'))), Some(Action::ToggleHideFinished)));
        assert!(matches!(key_to_action(press(KeyCode::Char('n'))), Some(Action::ToggleHideNotStarted)));
        assert!(matches!(key_to_action(press(KeyCode::Char('l'))), Some(Action::ToggleLongNames)));
    }

    #[test]
    fn test_navigation_keys() {
        assert!(matches!(key_to_action(press(KeyCode::Right)), Some(Action::NextDate)));
        assert!(matches!(key_to_action(press(KeyCode::Left)), Some(Action::PreviousDate)));
        assert!(matches!(key_to_action(press(KeyCode::Char('s'))), Some(Action::NextSport)));
        assert!(matches!(key_to_action(press(KeyCode::BackTab)), Some(Action::PreviousSport)));
        assert!(matches!(key_to_action(press(KeyCode::Enter)), Some(Action::OpenSelected)));
    }

    #[test]
    fn test_quit_keys() {
        assert!(matches!(key_to_action(press(KeyCode::Char('q'))), Some(Action::Quit)));
        assert!(matches!(key_to_action(press(KeyCode::Esc)), Some(Action::Quit)));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(key_to_action(ctrl_c), Some(Action::Quit)));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(key_to_action(release).is_none());
        assert!(key_to_action(press(KeyCode::F(5))).is_none());
    }
}
