use std::sync::mpsc::{self, Receiver};
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error};

use crate::snake::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
    Ignore,
}

pub fn command_for(key: &KeyEvent) -> Command {
    if key.kind != KeyEventKind::Press {
        return Command::Ignore;
    }

    if is_ctrl_c(key) {
        return Command::Quit;
    }

    match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Command::Turn(Direction::Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Command::Turn(Direction::Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Command::Turn(Direction::Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Command::Turn(Direction::Right),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        _ => Command::Ignore,
    }
}

/// Starts a thread that blocks on the terminal and forwards every key event.
///
/// The thread ends once the receiver is dropped, or when reading from the
/// terminal fails; in the latter case the receiver sees a disconnect.
pub fn spawn_reader() -> Receiver<KeyEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if tx.send(key).is_err() {
                    debug!("Key receiver gone, reader exiting");
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!("Reading terminal events failed: {}", e);
                break;
            }
        }
    });

    rx
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(command_for(&press(KeyCode::Up)), Command::Turn(Direction::Up));
        assert_eq!(command_for(&press(KeyCode::Down)), Command::Turn(Direction::Down));
        assert_eq!(command_for(&press(KeyCode::Left)), Command::Turn(Direction::Left));
        assert_eq!(command_for(&press(KeyCode::Right)), Command::Turn(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(command_for(&press(KeyCode::Char('w'))), Command::Turn(Direction::Up));
        assert_eq!(command_for(&press(KeyCode::Char('a'))), Command::Turn(Direction::Left));
        assert_eq!(command_for(&press(KeyCode::Char('s'))), Command::Turn(Direction::Down));
        assert_eq!(command_for(&press(KeyCode::Char('D'))), Command::Turn(Direction::Right));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(command_for(&press(KeyCode::Esc)), Command::Quit);
        assert_eq!(command_for(&press(KeyCode::Char('q'))), Command::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(&ctrl_c), Command::Quit);
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(command_for(&press(KeyCode::Char('c'))), Command::Ignore);
        assert_eq!(command_for(&press(KeyCode::Enter)), Command::Ignore);
    }

    #[test]
    fn test_release_ignored() {
        let release = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(command_for(&release), Command::Ignore);
    }
}
