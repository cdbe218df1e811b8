//! Translation of terminal key/mouse events into binding lookups.
//!
//! Each terminal event becomes zero or more `(KeyChord, InputEvent)` pairs.
//! Mouse buttons use X11 numbering: 1 left, 2 middle, 3 right, 4/5 wheel
//! up/down, 6/7 wheel left/right. A release close enough to its press also
//! produces a `mouseClickN` chord.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::input_event::{InputEvent, InputKind};
use super::keys::{Key, KeyChord, Modifiers};

/// Maximum press-to-release distance (Manhattan, in cells) for a click.
pub const CLICK_DISTANCE: i32 = 1;

pub fn modifiers_from(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    out
}

fn button_number(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => 1,
        MouseButton::Middle => 2,
        MouseButton::Right => 3,
    }
}

pub fn key_from(code: KeyCode, mods: Modifiers) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) if c.is_control() => return None,
        KeyCode::Char(c) if c.is_ascii_uppercase() && !mods.contains(Modifiers::SHIFT) => {
            Key::Char(c.to_ascii_lowercase())
        }
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Enter => Key::Return,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Esc,
        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PgUp,
        KeyCode::PageDown => Key::PgDn,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::F(n) if (1..=35).contains(&n) => Key::F(n),
        _ => return None,
    };
    Some(key)
}

#[derive(Debug, Default)]
pub struct EventTranslator {
    pointer: (i32, i32),
    last_press: Option<(u8, i32, i32)>,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    pub fn translate(&mut self, event: &Event) -> Vec<(KeyChord, InputEvent)> {
        match event {
            Event::Key(key) => self.translate_key(key).into_iter().collect(),
            Event::Mouse(mouse) => self.translate_mouse(mouse),
            _ => Vec::new(),
        }
    }

    fn translate_key(&mut self, key: &KeyEvent) -> Option<(KeyChord, InputEvent)> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let mods = modifiers_from(key.modifiers);
        let code = key_from(key.code, mods)?;
        let (x, y) = self.pointer;
        Some((
            KeyChord::new(code, mods),
            InputEvent::new(InputKind::Key, x, y, mods),
        ))
    }

    fn translate_mouse(&mut self, mouse: &MouseEvent) -> Vec<(KeyChord, InputEvent)> {
        let mods = modifiers_from(mouse.modifiers);
        let x = i32::from(mouse.column);
        let y = i32::from(mouse.row);
        self.pointer = (x, y);

        let wheel = |btn: u8| {
            vec![(
                KeyChord::new(Key::MousePress(btn), mods),
                InputEvent::new(InputKind::Wheel, x, y, mods),
            )]
        };

        match mouse.kind {
            MouseEventKind::Down(button) => {
                let btn = button_number(button);
                self.last_press = Some((btn, x, y));
                vec![(
                    KeyChord::new(Key::MousePress(btn), mods),
                    InputEvent::new(InputKind::MousePress(btn), x, y, mods),
                )]
            }
            MouseEventKind::Up(button) => {
                let btn = button_number(button);
                let event = InputEvent::new(InputKind::MouseRelease(btn), x, y, mods);
                let mut out = vec![(KeyChord::new(Key::MouseRelease(btn), mods), event)];
                if let Some((pressed, px, py)) = self.last_press.take() {
                    if pressed == btn && (x - px).abs() + (y - py).abs() <= CLICK_DISTANCE {
                        out.push((KeyChord::new(Key::MouseClick(btn), mods), event));
                    }
                }
                out
            }
            MouseEventKind::ScrollUp => wheel(4),
            MouseEventKind::ScrollDown => wheel(5),
            MouseEventKind::ScrollLeft => wheel(6),
            MouseEventKind::ScrollRight => wheel(7),
            _ => Vec::new(),
        }
    }
}
