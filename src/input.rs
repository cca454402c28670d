use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::movement::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    Quit,
    /// A key with no binding. Consumes the tick's input slot and does nothing.
    Ignored,
}

impl Input {
    /// Decodes a key event; key releases produce nothing.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let input = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Input::Quit,
            KeyCode::Esc | KeyCode::Char('q') => Input::Quit,
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Input::Move(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => {
                Input::Move(Direction::Down)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => {
                Input::Move(Direction::Left)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => {
                Input::Move(Direction::Right)
            }
            _ => Input::Ignored,
        };
        Some(input)
    }
}

/// Starts the terminal reader thread.
///
/// The thread blocks on the terminal and forwards every decoded key to `tx`.
/// A read error is forwarded as [`Input::Quit`] and ends the thread, as does
/// a dropped receiver. The handle is normally left detached.
pub fn spawn_reader(tx: Sender<Input>) -> JoinHandle<()> {
    thread::spawn(move || loop {
        let input = match event::read() {
            Ok(Event::Key(key)) => match Input::from_key(key) {
                Some(input) => input,
                None => continue,
            },
            Ok(_) => continue,
            Err(err) => {
                tracing::warn!("terminal input failed: {}", err);
                Input::Quit
            }
        };
        let quit = input == Input::Quit;
        if tx.send(input).is_err() || quit {
            return;
        }
    })
}

/// Takes at most one pending input without blocking.
///
/// A disconnected channel means the reader is gone, which ends the game.
pub fn poll(rx: &Receiver<Input>) -> Option<Input> {
    match rx.try_recv() {
        Ok(input) => Some(input),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(Input::Quit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_letters_map_to_directions() {
        assert_eq!(Input::from_key(press(KeyCode::Up)), Some(Input::Move(Direction::Up)));
        assert_eq!(
            Input::from_key(press(KeyCode::Char('s'))),
            Some(Input::Move(Direction::Down))
        );
        assert_eq!(
            Input::from_key(press(KeyCode::Char('h'))),
            Some(Input::Move(Direction::Left))
        );
        assert_eq!(
            Input::from_key(press(KeyCode::Right)),
            Some(Input::Move(Direction::Right))
        );
    }

    #[test]
    fn escape_q_and_ctrl_c_quit() {
        assert_eq!(Input::from_key(press(KeyCode::Esc)), Some(Input::Quit));
        assert_eq!(Input::from_key(press(KeyCode::Char('q'))), Some(Input::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Input::from_key(ctrl_c), Some(Input::Quit));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(Input::from_key(press(KeyCode::Char('c'))), Some(Input::Ignored));
        assert_eq!(Input::from_key(press(KeyCode::Enter)), Some(Input::Ignored));
    }

    #[test]
    fn releases_are_dropped() {
        let mut key = press(KeyCode::Up);
        key.kind = KeyEventKind::Release;
        assert_eq!(Input::from_key(key), None);
    }

    #[test]
    fn poll_takes_one_event_at_a_time() {
        let (tx, rx) = mpsc::channel();
        tx.send(Input::Move(Direction::Up)).unwrap();
        tx.send(Input::Move(Direction::Left)).unwrap();
        assert_eq!(poll(&rx), Some(Input::Move(Direction::Up)));
        assert_eq!(poll(&rx), Some(Input::Move(Direction::Left)));
        assert_eq!(poll(&rx), None);
        drop(tx);
        assert_eq!(poll(&rx), Some(Input::Quit));
    }
}
