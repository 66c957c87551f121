//! Keyboard input normalized into game commands.

use ratzilla::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// One click on the big shape.
    Action,
    /// Buy the upgrade at this catalog index.
    Buy(usize),
    /// Trigger a random scenario now.
    Scenario,
    Save,
    /// Wipe the save (after confirmation).
    Reset,
}

pub fn command_for_key(code: &KeyCode) -> Option<Command> {
    match code {
        KeyCode::Enter => Some(Command::Action),
        KeyCode::Char(c) => command_for_char(*c),
        _ => None,
    }
}

pub fn command_for_char(c: char) -> Option<Command> {
    match c.to_ascii_lowercase() {
        ' ' | 'c' => Some(Command::Action),
        '1'..='9' => Some(Command::Buy(c as usize - '1' as usize)),
        'n' => Some(Command::Scenario),
        's' => Some(Command::Save),
        'r' => Some(Command::Reset),
        _ => None,
    }
}
