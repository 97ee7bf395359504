use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton};
use ratatui::layout::Position;

/// Input delivered to a dialog's modal loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    /// The pointer moved. `column`/`row` may be stale once the event has been
    /// queued for a while; handlers should ask the `Ui` for the live position.
    PointerMove {
        column: u16,
        row: u16,
        primary_held: bool,
    },
    PointerUp {
        column: u16,
        row: u16,
        button: MouseButton,
    },
    KeyDown(KeyPress),
    KeyUp(KeyPress),
    Tick,
    Resize {
        width: u16,
        height: u16,
    },
    /// Request to close the whole program.
    Quit,
    Other,
}

impl DialogEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DialogEvent::PointerMove { .. } => EventKind::PointerMove,
            DialogEvent::PointerUp { .. } => EventKind::PointerUp,
            DialogEvent::KeyDown(_) => EventKind::KeyDown,
            DialogEvent::KeyUp(_) => EventKind::KeyUp,
            DialogEvent::Tick => EventKind::Tick,
            DialogEvent::Resize { .. } => EventKind::Resize,
            DialogEvent::Quit => EventKind::Quit,
            DialogEvent::Other => EventKind::Other,
        }
    }

    /// Pointer position carried by pointer events.
    pub fn position(&self) -> Option<Position> {
        match self {
            DialogEvent::PointerMove { column, row, .. } | DialogEvent::PointerUp { column, row, .. } => {
                Some(Position::new(*column, *row))
            }
            _ => None,
        }
    }

    pub fn key_down(code: KeyCode) -> Self {
        DialogEvent::KeyDown(KeyPress::new(code, KeyModifiers::NONE))
    }

    pub fn key_up(code: KeyCode) -> Self {
        DialogEvent::KeyUp(KeyPress::new(code, KeyModifiers::NONE))
    }

    pub fn click(column: u16, row: u16) -> Self {
        DialogEvent::PointerUp {
            column,
            row,
            button: MouseButton::Left,
        }
    }
}

/// Queue-level classification used when discarding pending events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerUp,
    KeyDown,
    KeyUp,
    Tick,
    Resize,
    Quit,
    Other,
}

/// Handler categories a dialog can register callbacks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PointerMove,
    Drag,
    Tick,
    /// Both key-down and key-up.
    Key,
    KeyDown,
    KeyUp,
    /// Pointer button released.
    Click,
}

/// Identity a key handler is bound to.
///
/// A key-down is looked up under its printable character first and then under
/// its key code, so `Char('y')` and `Code(KeyCode::Char('y'))` are distinct
/// namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyId {
    Char(char),
    Code(KeyCode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Physical key. Character keys are folded to lowercase so the code does
    /// not depend on shift state.
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    /// Printable character produced by the press, if any.
    pub text: Option<char>,
    /// Set on presses re-delivered by key repeat.
    pub synthetic: bool,
}

impl KeyPress {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let text = match code {
            KeyCode::Char(ch)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    && !ch.is_control() =>
            {
                Some(ch)
            }
            _ => None,
        };
        let code = match code {
            KeyCode::Char(ch) => KeyCode::Char(ch.to_ascii_lowercase()),
            other => other,
        };
        Self {
            code,
            modifiers,
            text,
            synthetic: false,
        }
    }

    pub fn char(ch: char) -> Self {
        let modifiers = if ch.is_ascii_uppercase() {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        Self::new(KeyCode::Char(ch), modifiers)
    }

    pub(crate) fn repeated(&self) -> Self {
        Self {
            synthetic: true,
            ..self.clone()
        }
    }

    /// Key identities consulted for this press, character identity first.
    pub fn identities(&self, with_text: bool) -> Vec<KeyId> {
        let mut ids = Vec::with_capacity(2);
        if with_text && let Some(ch) = self.text {
            ids.push(KeyId::Char(ch));
        }
        ids.push(KeyId::Code(self.code));
        ids
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        KeyPress::new(event.code, event.modifiers)
    }
}
