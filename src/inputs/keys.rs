//! Key codes, modifier masks and binding contexts, plus the textual forms
//! used in configuration files (`ctrl-pgdn`, `mousePress1`,
//! `fullScreen,overLink`, ...).

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

const MAX_FUNCTION_KEY: u8 = 35;
const MAX_MOUSE_BUTTON: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Tab,
    Return,
    Enter,
    Backspace,
    Esc,
    Insert,
    Delete,
    Home,
    End,
    PgUp,
    PgDn,
    Left,
    Right,
    Up,
    Down,
    F(u8),
    MousePress(u8),
    MouseRelease(u8),
    MouseClick(u8),
}

impl Key {
    /// Character keys in the Latin-1 range. Shift is not significant when
    /// matching these, since it is already folded into the character.
    pub fn is_latin1_char(&self) -> bool {
        matches!(self, Key::Char(c) if (*c as u32) <= 0xff)
    }
}

const NAMED_KEYS: &[(&str, Key)] = &[
    ("space", Key::Char(' ')),
    ("tab", Key::Tab),
    ("return", Key::Return),
    ("enter", Key::Enter),
    ("backspace", Key::Backspace),
    ("esc", Key::Esc),
    ("insert", Key::Insert),
    ("delete", Key::Delete),
    ("home", Key::Home),
    ("end", Key::End),
    ("pgup", Key::PgUp),
    ("pgdn", Key::PgDn),
    ("left", Key::Left),
    ("right", Key::Right),
    ("up", Key::Up),
    ("down", Key::Down),
];

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, k)| k == self) {
            return f.write_str(name);
        }
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::F(n) => write!(f, "f{n}"),
            Key::MousePress(n) => write!(f, "mousePress{n}"),
            Key::MouseRelease(n) => write!(f, "mouseRelease{n}"),
            Key::MouseClick(n) => write!(f, "mouseClick{n}"),
            // all remaining variants are in NAMED_KEYS
            _ => Ok(()),
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}

impl Modifiers {
    pub const NONE: Self = Self::empty();
}

bitflags! {
    /// UI state a binding can be restricted to. Bits come in
    /// mutually-exclusive pairs; an empty mask means "any".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Context: u16 {
        const FULL_SCREEN = 1 << 0;
        const WINDOW = 1 << 1;
        const CONTINUOUS = 1 << 2;
        const SINGLE_PAGE = 1 << 3;
        const OVER_LINK = 1 << 4;
        const OFF_LINK = 1 << 5;
        const OUTLINE_FOCUS = 1 << 6;
        const MAIN_WIN_FOCUS = 1 << 7;
        const SCR_LOCK_ON = 1 << 8;
        const SCR_LOCK_OFF = 1 << 9;
    }
}

const CONTEXT_NAMES: &[(&str, Context)] = &[
    ("fullScreen", Context::FULL_SCREEN),
    ("window", Context::WINDOW),
    ("continuous", Context::CONTINUOUS),
    ("singlePage", Context::SINGLE_PAGE),
    ("overLink", Context::OVER_LINK),
    ("offLink", Context::OFF_LINK),
    ("outline", Context::OUTLINE_FOCUS),
    ("mainWin", Context::MAIN_WIN_FOCUS),
    ("scrLockOn", Context::SCR_LOCK_ON),
    ("scrLockOff", Context::SCR_LOCK_OFF),
];

impl Context {
    pub const ANY: Self = Self::empty();

    /// A binding restricted to `self` applies when every one of its bits
    /// is present in `current`.
    pub fn applies_in(self, current: Context) -> bool {
        current.contains(self)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("any");
        }
        let names: Vec<&str> = CONTEXT_NAMES
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        f.write_str(&names.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeySpecError {
    #[error("empty key specification")]
    Empty,
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("key number out of range in '{0}'")]
    OutOfRange(String),
    #[error("unknown context '{0}'")]
    UnknownContext(String),
}

impl FromStr for Context {
    type Err = KeySpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "any" {
            return Ok(Context::ANY);
        }
        s.split(',')
            .try_fold(Context::ANY, |acc, part| {
                CONTEXT_NAMES
                    .iter()
                    .find(|(name, _)| *name == part)
                    .map(|(_, flag)| acc | *flag)
                    .ok_or_else(|| KeySpecError::UnknownContext(part.to_string()))
            })
    }
}

/// A key together with the modifiers held while pressing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: Key,
    pub mods: Modifiers,
}

impl KeyChord {
    pub fn new(key: Key, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

fn numbered(rest: &str, max: u8, spec: &str) -> Result<u8, KeySpecError> {
    let n: u8 = rest
        .parse()
        .map_err(|_| KeySpecError::UnknownKey(spec.to_string()))?;
    if n == 0 || n > max {
        return Err(KeySpecError::OutOfRange(spec.to_string()));
    }
    Ok(n)
}

fn parse_key_name(name: &str, spec: &str) -> Result<Key, KeySpecError> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if (' '..='~').contains(&c) {
            return Ok(Key::Char(c));
        }
    }
    if let Some((_, key)) = NAMED_KEYS.iter().find(|(n, _)| *n == name) {
        return Ok(*key);
    }
    if let Some(rest) = name.strip_prefix("mousePress") {
        return numbered(rest, MAX_MOUSE_BUTTON, spec).map(Key::MousePress);
    }
    if let Some(rest) = name.strip_prefix("mouseRelease") {
        return numbered(rest, MAX_MOUSE_BUTTON, spec).map(Key::MouseRelease);
    }
    if let Some(rest) = name.strip_prefix("mouseClick") {
        return numbered(rest, MAX_MOUSE_BUTTON, spec).map(Key::MouseClick);
    }
    if let Some(rest) = name.strip_prefix('f') {
        if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
            return numbered(rest, MAX_FUNCTION_KEY, spec).map(Key::F);
        }
    }
    Err(KeySpecError::UnknownKey(spec.to_string()))
}

impl FromStr for KeyChord {
    type Err = KeySpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(KeySpecError::Empty);
        }
        let mut mods = Modifiers::NONE;
        let mut rest = s;
        // a bare "-" is the minus key, not a dangling prefix
        while rest.len() > 1 {
            if let Some(r) = rest.strip_prefix("shift-") {
                mods |= Modifiers::SHIFT;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("ctrl-") {
                mods |= Modifiers::CTRL;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("alt-") {
                mods |= Modifiers::ALT;
                rest = r;
            } else {
                break;
            }
        }
        Ok(KeyChord::new(parse_key_name(rest, s)?, mods))
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(Modifiers::SHIFT) {
            f.write_str("shift-")?;
        }
        if self.mods.contains(Modifiers::CTRL) {
            f.write_str("ctrl-")?;
        }
        if self.mods.contains(Modifiers::ALT) {
            f.write_str("alt-")?;
        }
        write!(f, "{}", self.key)
    }
}
