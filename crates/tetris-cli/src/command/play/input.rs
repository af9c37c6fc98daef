use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui_runtime::HeldKeys;
use tetris_engine::{InputSnapshot, Track};

const TRACK_KEYS: [KeyCode; 3] = [KeyCode::F(1), KeyCode::F(2), KeyCode::F(3)];

/// Maps the held keys onto the game's controls.
pub(crate) fn snapshot(held: &HeldKeys, quit: bool) -> InputSnapshot {
    InputSnapshot {
        quit,
        rotate: held.contains(KeyCode::Up),
        soft_drop: held.contains(KeyCode::Down),
        move_left: held.contains(KeyCode::Left),
        move_right: held.contains(KeyCode::Right),
        hard_drop: held.contains(KeyCode::Char(' ')),
        pause: held.contains(KeyCode::Char('p')),
        track: TRACK_KEYS
            .into_iter()
            .zip(Track::ALL)
            .find_map(|(key, track)| held.contains(key).then_some(track)),
    }
}

/// Esc, `q` and Ctrl-C end the game.
pub(crate) fn is_quit(event: &KeyEvent) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match event.code {
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui_runtime::KeyboardState;

    use super::*;

    fn held(codes: &[KeyCode]) -> HeldKeys {
        let mut keyboard = KeyboardState::new();
        let now = Instant::now();
        for &code in codes {
            keyboard.handle_key_event(&KeyEvent::new(code, KeyModifiers::NONE), now);
        }
        keyboard.snapshot(now)
    }

    #[test]
    fn test_nothing_held_is_idle() {
        assert!(snapshot(&held(&[]), false).is_idle());
        assert!(snapshot(&held(&[]), true).quit);
    }

    #[test]
    fn test_arrow_keys_and_space() {
        let input = snapshot(
            &held(&[KeyCode::Up, KeyCode::Left, KeyCode::Char(' ')]),
            false,
        );
        assert!(input.rotate && input.move_left && input.hard_drop);
        assert!(!input.move_right && !input.soft_drop && !input.pause);
    }

    #[test]
    fn test_pause_ignores_case() {
        assert!(snapshot(&held(&[KeyCode::Char('P')]), false).pause);
    }

    #[test]
    fn test_first_track_key_wins() {
        let input = snapshot(&held(&[KeyCode::F(3), KeyCode::F(2)]), false);
        assert_eq!(input.track, Some(Track::Menuet));
        let input = snapshot(&held(&[KeyCode::F(3)]), false);
        assert_eq!(input.track, Some(Track::RussianSong));
    }

    #[test]
    fn test_quit_keys() {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);
        assert!(is_quit(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&key(KeyCode::Char('p'), KeyModifiers::NONE)));
        assert!(!is_quit(&KeyEvent::new_with_kind(
            KeyCode::Esc,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        )));
    }
}
