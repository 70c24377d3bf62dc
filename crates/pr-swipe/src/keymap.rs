//! Key bindings
//!
//! Maps key presses to deck commands. Several keys may trigger the same
//! command; the help line groups them.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the reviewer asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Swipe right on the top card
    Merge,
    /// Swipe left on the top card
    Close,
    Undo,
    OpenInBrowser,
    Reload,
    DismissError,
    Quit,
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Close => "close",
            Self::Undo => "undo",
            Self::OpenInBrowser => "open",
            Self::Reload => "reload",
            Self::DismissError => "dismiss",
            Self::Quit => "quit",
        }
    }
}

/// A single keybinding that maps a key to a command
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub code: KeyCode,
    /// Display hint for the UI - e.g., "→", "l"
    pub hint: &'static str,
    pub command: Command,
}

impl KeyBinding {
    pub fn new(code: KeyCode, hint: &'static str, command: Command) -> Self {
        Self {
            code,
            hint,
            command,
        }
    }
}

pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    /// Resolve a key press; Ctrl+C always quits
    pub fn command_for(&self, key: &KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return (key.code == KeyCode::Char('c')).then_some(Command::Quit);
        }
        self.bindings
            .iter()
            .find(|binding| binding.code == key.code)
            .map(|binding| binding.command)
    }

    /// "→/l merge  ←/h close ..." in binding order
    pub fn help_line(&self) -> String {
        let mut groups: Vec<(Command, Vec<&str>)> = Vec::new();
        for binding in &self.bindings {
            match groups.iter_mut().find(|(command, _)| *command == binding.command) {
                Some((_, hints)) => hints.push(binding.hint),
                None => groups.push((binding.command, vec![binding.hint])),
            }
        }

        groups
            .iter()
            .map(|(command, hints)| format!("{} {}", hints.join("/"), command.label()))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

/// Get the default keymap
pub fn default_keymap() -> Keymap {
    use Command::*;

    Keymap::new(vec![
        KeyBinding::new(KeyCode::Right, "→", Merge),
        KeyBinding::new(KeyCode::Char('l'), "l", Merge),
        KeyBinding::new(KeyCode::Left, "←", Close),
        KeyBinding::new(KeyCode::Char('h'), "h", Close),
        KeyBinding::new(KeyCode::Char('u'), "u", Undo),
        KeyBinding::new(KeyCode::Char('o'), "o", OpenInBrowser),
        KeyBinding::new(KeyCode::Char('r'), "r", Reload),
        KeyBinding::new(KeyCode::Esc, "Esc", DismissError),
        KeyBinding::new(KeyCode::Char('q'), "q", Quit),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let keymap = default_keymap();
        assert_eq!(keymap.command_for(&press(KeyCode::Right)), Some(Command::Merge));
        assert_eq!(keymap.command_for(&press(KeyCode::Char('l'))), Some(Command::Merge));
        assert_eq!(keymap.command_for(&press(KeyCode::Char('h'))), Some(Command::Close));
        assert_eq!(keymap.command_for(&press(KeyCode::Esc)), Some(Command::DismissError));
        assert_eq!(keymap.command_for(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits_and_other_ctrl_keys_are_ignored() {
        let keymap = default_keymap();
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(keymap.command_for(&ctrl('c')), Some(Command::Quit));
        assert_eq!(keymap.command_for(&ctrl('l')), None);
    }

    #[test]
    fn test_help_line_groups_hints() {
        let help = default_keymap().help_line();
        assert!(help.starts_with("→/l merge  ←/h close  u undo"));
        assert!(help.ends_with("Esc dismiss  q quit"));
    }
}
