use super::keys::Modifiers;

/// What physically happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Key,
    MousePress(u8),
    MouseRelease(u8),
    Wheel,
}

/// The originating input event handed to command handlers.
///
/// Carries only what handlers need: where the pointer was and which
/// modifiers were held. Keyboard events report the last known pointer
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub x: i32,
    pub y: i32,
    pub modifiers: Modifiers,
}

impl InputEvent {
    pub fn new(kind: InputKind, x: i32, y: i32, modifiers: Modifiers) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers,
        }
    }

    pub fn is_mouse(&self) -> bool {
        !matches!(self.kind, InputKind::Key)
    }
}
