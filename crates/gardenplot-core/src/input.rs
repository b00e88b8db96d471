//! Keyboard shortcut resolution.

use crate::tools::ToolKind;

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Ctrl (or Cmd on macOS).
    pub primary: bool,
    /// Shift.
    pub shift: bool,
    /// Alt.
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Modifiers = Modifiers {
        primary: false,
        shift: false,
        alt: false,
    };

    /// Primary modifier only.
    pub const PRIMARY: Modifiers = Modifiers {
        primary: true,
        shift: false,
        alt: false,
    };

    /// Primary plus shift.
    pub const PRIMARY_SHIFT: Modifiers = Modifiers {
        primary: true,
        shift: true,
        alt: false,
    };
}

/// A key press, reduced to what the shortcut map cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// The Delete key.
    Delete,
    /// The Backspace key.
    Backspace,
}

/// An editor command produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Save the layout now.
    Save,
    /// Undo the last edit.
    Undo,
    /// Redo an undone edit.
    Redo,
    /// Duplicate the selection.
    Duplicate,
    /// Delete the selection.
    DeleteSelection,
    /// Switch to a tool.
    SwitchTool(ToolKind),
}

/// Resolve a key press to a command.
///
/// Returns `None` while a text label is being edited so typing never
/// triggers shortcuts. Primary-modifier chords take precedence over the
/// bare-letter tool shortcuts.
pub fn resolve(key: Key, modifiers: Modifiers, text_editing: bool) -> Option<Command> {
    if text_editing {
        return None;
    }
    match key {
        Key::Char(ch) if modifiers.primary => match ch.to_ascii_lowercase() {
            's' => Some(Command::Save),
            'z' if modifiers.shift => Some(Command::Redo),
            'z' => Some(Command::Undo),
            'y' => Some(Command::Redo),
            'd' => Some(Command::Duplicate),
            _ => None,
        },
        Key::Char(ch) if !modifiers.shift && !modifiers.alt => {
            ToolKind::from_shortcut(ch).map(Command::SwitchTool)
        }
        Key::Delete | Key::Backspace if !modifiers.primary => Some(Command::DeleteSelection),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_chords() {
        assert_eq!(resolve(Key::Char('s'), Modifiers::PRIMARY, false), Some(Command::Save));
        assert_eq!(resolve(Key::Char('z'), Modifiers::PRIMARY, false), Some(Command::Undo));
        assert_eq!(
            resolve(Key::Char('z'), Modifiers::PRIMARY_SHIFT, false),
            Some(Command::Redo)
        );
        assert_eq!(resolve(Key::Char('y'), Modifiers::PRIMARY, false), Some(Command::Redo));
        assert_eq!(
            resolve(Key::Char('d'), Modifiers::PRIMARY, false),
            Some(Command::Duplicate)
        );
    }

    #[test]
    fn bare_letters_switch_tools() {
        assert_eq!(
            resolve(Key::Char('r'), Modifiers::NONE, false),
            Some(Command::SwitchTool(ToolKind::Rect))
        );
        assert_eq!(
            resolve(Key::Char('d'), Modifiers::NONE, false),
            Some(Command::SwitchTool(ToolKind::Delete))
        );
        assert_eq!(resolve(Key::Char('q'), Modifiers::NONE, false), None);
    }

    #[test]
    fn delete_keys_remove_selection() {
        assert_eq!(
            resolve(Key::Delete, Modifiers::NONE, false),
            Some(Command::DeleteSelection)
        );
        assert_eq!(
            resolve(Key::Backspace, Modifiers::NONE, false),
            Some(Command::DeleteSelection)
        );
    }

    #[test]
    fn text_editing_swallows_everything() {
        assert_eq!(resolve(Key::Char('r'), Modifiers::NONE, true), None);
        assert_eq!(resolve(Key::Char('s'), Modifiers::PRIMARY, true), None);
        assert_eq!(resolve(Key::Backspace, Modifiers::NONE, true), None);
    }
}
