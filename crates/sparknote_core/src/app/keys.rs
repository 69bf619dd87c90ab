//! Keyboard shortcut mapping.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Char(char),
    Other,
}

/// One key press with the modifiers the widget cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
        }
    }

    pub fn with_meta(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: true,
        }
    }

    /// Widget action bound to this key press, if any.
    pub fn shortcut(&self) -> Option<Shortcut> {
        match self.key {
            Key::Enter if self.ctrl || self.meta => Some(Shortcut::CreateNote),
            Key::Escape => Some(Shortcut::CancelEdit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl/Cmd + Enter.
    CreateNote,
    /// Escape.
    CancelEdit,
}
