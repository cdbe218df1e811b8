//! Key binding table: (key, modifiers, context) -> ordered command strings.

use log::{debug, warn};

use crate::inputs::{Context, KeyChord, KeySpecError, Modifiers};
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub chord: KeyChord,
    pub context: Context,
    pub commands: Vec<String>,
}

impl KeyBinding {
    pub fn new(chord: KeyChord, context: Context, commands: Vec<String>) -> Self {
        Self {
            chord,
            context,
            commands,
        }
    }

    /// Build a binding from its configuration-file spelling.
    pub fn parse<I, C>(key: &str, context: &str, commands: I) -> Result<Self, KeySpecError>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Ok(Self::new(
            key.parse()?,
            context.parse()?,
            commands.into_iter().map(Into::into).collect(),
        ))
    }

    fn matches(&self, chord: &KeyChord, context: Context) -> bool {
        if self.chord.key != chord.key || !self.context.applies_in(context) {
            return false;
        }
        if chord.key.is_latin1_char() {
            // shift is already part of the character
            self.chord.mods.difference(Modifiers::SHIFT) == chord.mods.difference(Modifiers::SHIFT)
        } else {
            self.chord.mods == chord.mods
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: Vec<KeyBinding>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        for (key, context, commands) in DEFAULT_BINDINGS {
            match KeyBinding::parse(key, context, commands.iter().copied()) {
                Ok(binding) => table.bind(binding),
                Err(e) => warn!("Skipping default binding '{key}': {e}"),
            }
        }
        table
    }

    /// Build the table described by the settings file.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut table = if settings.default_bindings {
            Self::with_defaults()
        } else {
            Self::empty()
        };

        for entry in &settings.unbind {
            match (entry.key.parse::<KeyChord>(), entry.context.parse::<Context>()) {
                (Ok(chord), Ok(context)) => {
                    if !table.unbind(chord, context) {
                        debug!("unbind {} {}: nothing bound", entry.key, entry.context);
                    }
                }
                (Err(e), _) | (_, Err(e)) => {
                    warn!("Ignoring unbind '{} {}': {e}", entry.key, entry.context)
                }
            }
        }

        for entry in &settings.bindings {
            if entry.commands.is_empty() {
                warn!("Ignoring binding '{}': no commands", entry.key);
                continue;
            }
            match KeyBinding::parse(&entry.key, &entry.context, entry.commands.iter().cloned()) {
                Ok(binding) => table.bind(binding),
                Err(e) => warn!("Ignoring binding '{}': {e}", entry.key),
            }
        }

        table
    }

    /// Add a binding, replacing one with the same key, modifiers and context.
    pub fn bind(&mut self, binding: KeyBinding) {
        self.bindings
            .retain(|b| !(b.chord == binding.chord && b.context == binding.context));
        self.bindings.push(binding);
    }

    pub fn unbind(&mut self, chord: KeyChord, context: Context) -> bool {
        let before = self.bindings.len();
        self.bindings
            .retain(|b| !(b.chord == chord && b.context == context));
        self.bindings.len() != before
    }

    /// Commands bound to `chord` in the current `context`, if any.
    pub fn lookup(&self, chord: &KeyChord, context: Context) -> Option<&[String]> {
        self.bindings
            .iter()
            .find(|b| b.matches(chord, context))
            .map(|b| b.commands.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[rustfmt::skip]
const DEFAULT_BINDINGS: &[(&str, &str, &[&str])] = &[
    ("mousePress1",   "any", &["startSelection"]),
    ("mouseRelease1", "any", &["endSelection"]),
    ("mouseClick1",   "any", &["followLinkNoSel"]),
    ("mousePress2",   "any", &["startPan"]),
    ("mouseRelease2", "any", &["endPan"]),
    ("mousePress3",   "any", &["postPopupMenu"]),
    ("mousePress4",   "any", &["scrollUpPrevPage(16)"]),
    ("mousePress5",   "any", &["scrollDownNextPage(16)"]),
    ("mousePress6",   "any", &["scrollLeft(16)"]),
    ("mousePress7",   "any", &["scrollRight(16)"]),
    ("ctrl-home",     "any", &["gotoPage(1)"]),
    ("home",          "any", &["scrollToTopLeft"]),
    ("ctrl-end",      "any", &["gotoLastPage"]),
    ("end",           "any", &["scrollToBottomRight"]),
    ("pgup",          "any", &["pageUp"]),
    ("backspace",     "any", &["pageUp"]),
    ("delete",        "any", &["pageUp"]),
    ("pgdn",          "any", &["pageDown"]),
    ("space",         "any", &["pageDown"]),
    ("left",          "any", &["scrollLeft(16)"]),
    ("right",         "any", &["scrollRight(16)"]),
    ("up",            "any", &["scrollUp(16)"]),
    ("down",          "any", &["scrollDown(16)"]),
    ("o",             "any", &["open"]),
    ("O",             "any", &["open"]),
    ("ctrl-o",        "any", &["open"]),
    ("r",             "any", &["reload"]),
    ("R",             "any", &["reload"]),
    ("ctrl-r",        "any", &["reload"]),
    ("f",             "any", &["find"]),
    ("F",             "any", &["find"]),
    ("ctrl-f",        "any", &["find"]),
    ("ctrl-g",        "any", &["findNext"]),
    ("ctrl-p",        "any", &["print"]),
    ("ctrl-c",        "any", &["copy"]),
    ("ctrl-s",        "any", &["saveAs"]),
    ("n",             "scrLockOff", &["nextPage"]),
    ("N",             "scrLockOff", &["nextPage"]),
    ("n",             "scrLockOn", &["nextPageNoScroll"]),
    ("N",             "scrLockOn", &["nextPageNoScroll"]),
    ("p",             "scrLockOff", &["prevPage"]),
    ("P",             "scrLockOff", &["prevPage"]),
    ("p",             "scrLockOn", &["prevPageNoScroll"]),
    ("P",             "scrLockOn", &["prevPageNoScroll"]),
    ("v",             "any", &["goForward"]),
    ("b",             "any", &["goBackward"]),
    ("g",             "any", &["focusToPageNum"]),
    ("0",             "any", &["zoomPercent(125)"]),
    ("+",             "any", &["zoomIn"]),
    ("-",             "any", &["zoomOut"]),
    ("ctrl-+",        "any", &["zoomIn"]),
    ("ctrl-=",        "any", &["zoomIn"]),
    ("ctrl--",        "any", &["zoomOut"]),
    ("z",             "any", &["zoomFitPage"]),
    ("w",             "any", &["zoomFitWidth"]),
    ("alt-f",         "any", &["toggleFullScreenMode"]),
    ("esc",           "fullScreen", &["windowMode"]),
    ("ctrl-t",        "any", &["newTab"]),
    ("ctrl-n",        "any", &["newWindow"]),
    ("ctrl-w",        "any", &["closeTabOrQuit"]),
    ("ctrl-tab",      "any", &["nextTab"]),
    ("shift-ctrl-tab", "any", &["prevTab"]),
    ("ctrl-pgdn",     "any", &["nextTab"]),
    ("ctrl-pgup",     "any", &["prevTab"]),
    ("ctrl-q",        "any", &["quit"]),
    ("?",             "any", &["help"]),
    ("q",             "any", &["quit"]),
    ("Q",             "any", &["quit"]),
];
