//! Key mapping from terminal events to commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Navigation on the menu, difficulty and score screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Select,
    Back,
}

/// Presses and auto-repeats act; releases are ignored.
pub fn is_actionable(key: KeyEvent) -> bool {
    matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}

/// Map in-game keyboard input to an engine command.
pub fn game_command(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Command::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Command::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),

        _ => None,
    }
}

/// Map keyboard input on a menu screen.
pub fn menu_key(key: KeyEvent) -> Option<MenuKey> {
    match key.code {
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(MenuKey::Up),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(MenuKey::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(MenuKey::Select),
        KeyCode::Esc | KeyCode::Backspace => Some(MenuKey::Back),
        _ => None,
    }
}

/// Start a fresh game from the game screen.
pub fn is_new_game(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('n') | KeyCode::Char('N'))
}

/// Leave the game screen for the start menu.
pub fn is_back(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
