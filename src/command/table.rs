use std::fmt;

use super::error::TableError;
use super::parser::MAX_ARGS;
use crate::inputs::InputEvent;

/// Something a command name can be routed to.
///
/// The state type `S` is the application context the handler operates on;
/// it is passed in explicitly on every call.
pub trait CommandHandler<S: ?Sized> {
    fn invoke(&self, state: &mut S, args: &[String], event: Option<&InputEvent>);
}

impl<S: ?Sized, F> CommandHandler<S> for F
where
    F: Fn(&mut S, &[String], Option<&InputEvent>),
{
    fn invoke(&self, state: &mut S, args: &[String], event: Option<&InputEvent>) {
        self(state, args, event)
    }
}

pub struct CommandEntry<S: ?Sized> {
    name: &'static str,
    arity: usize,
    requires_document: bool,
    requires_event: bool,
    handler: Box<dyn CommandHandler<S>>,
}

impl<S: ?Sized> CommandEntry<S> {
    pub fn new<F>(name: &'static str, arity: usize, handler: F) -> Self
    where
        F: Fn(&mut S, &[String], Option<&InputEvent>) + 'static,
    {
        Self::with_handler(name, arity, handler)
    }

    pub fn with_handler(
        name: &'static str,
        arity: usize,
        handler: impl CommandHandler<S> + 'static,
    ) -> Self {
        Self {
            name,
            arity,
            requires_document: false,
            requires_event: false,
            handler: Box::new(handler),
        }
    }

    /// Only run while a document is open.
    pub fn requires_document(mut self) -> Self {
        self.requires_document = true;
        self
    }

    /// Only run when triggered by an input event (reads cursor position etc).
    pub fn requires_event(mut self) -> Self {
        self.requires_event = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn needs_document(&self) -> bool {
        self.requires_document
    }

    pub fn needs_event(&self) -> bool {
        self.requires_event
    }

    pub(crate) fn invoke(&self, state: &mut S, args: &[String], event: Option<&InputEvent>) {
        self.handler.invoke(state, args, event);
    }
}

impl<S: ?Sized> fmt::Debug for CommandEntry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("requires_document", &self.requires_document)
            .field("requires_event", &self.requires_event)
            .finish_non_exhaustive()
    }
}

/// Immutable, name-sorted set of commands.
///
/// Entries are sorted when the table is built, so registration order does
/// not matter and lookups can binary search.
pub struct CommandTable<S: ?Sized> {
    entries: Vec<CommandEntry<S>>,
}

impl<S: ?Sized> CommandTable<S> {
    pub fn new(mut entries: Vec<CommandEntry<S>>) -> Result<Self, TableError> {
        for entry in &entries {
            if entry.name.is_empty() || !entry.name.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(TableError::InvalidName(entry.name.to_string()));
            }
            if entry.arity > MAX_ARGS {
                return Err(TableError::ArityTooLarge {
                    name: entry.name.to_string(),
                    arity: entry.arity,
                    max: MAX_ARGS,
                });
            }
        }

        entries.sort_by(|a, b| a.name.cmp(b.name));
        if let Some(pair) = entries.windows(2).find(|w| w[0].name == w[1].name) {
            return Err(TableError::DuplicateName(pair[0].name.to_string()));
        }

        Ok(Self { entries })
    }

    /// Binary search for `name` (byte-wise, case-sensitive).
    pub fn resolve(&self, name: &str) -> Option<&CommandEntry<S>> {
        self.entries
            .binary_search_by(|entry| entry.name.cmp(name))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry<S>> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: ?Sized> fmt::Debug for CommandTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut (), _: &[String], _: Option<&InputEvent>) {}

    fn table(names: &[&'static str]) -> CommandTable<()> {
        CommandTable::new(names.iter().map(|n| CommandEntry::new(*n, 0, noop)).collect()).unwrap()
    }

    #[test]
    fn entries_are_sorted_regardless_of_registration_order() {
        let t = table(&["zoomIn", "about", "quit", "gotoPage", "Zeta"]);
        let names: Vec<_> = t.names().collect();
        assert_eq!(names, vec!["Zeta", "about", "gotoPage", "quit", "zoomIn"]);
    }

    #[test]
    fn resolve_finds_every_entry() {
        let names = [
            "about", "copy", "find", "gotoPage", "nextPage", "open", "quit", "reload", "zoomIn",
        ];
        let t = table(&names);
        for name in names {
            assert_eq!(t.resolve(name).map(|e| e.name()), Some(name));
        }
    }

    #[test]
    fn resolve_misses_cleanly() {
        let t = table(&["about", "quit"]);
        assert!(t.resolve("").is_none());
        assert!(t.resolve("Quit").is_none());
        assert!(t.resolve("aaa").is_none());
        assert!(t.resolve("zzz").is_none());
        assert!(t.resolve("quitt").is_none());
    }

    #[test]
    fn duplicates_are_rejected() {
        let err = CommandTable::<()>::new(vec![
            CommandEntry::new("quit", 0, noop),
            CommandEntry::new("about", 0, noop),
            CommandEntry::new("quit", 1, noop),
        ])
        .unwrap_err();
        assert_eq!(err, TableError::DuplicateName("quit".into()));
    }

    #[test]
    fn bad_names_and_arities_are_rejected() {
        let err = CommandTable::<()>::new(vec![CommandEntry::new("go-to", 0, noop)]).unwrap_err();
        assert_eq!(err, TableError::InvalidName("go-to".into()));

        let err = CommandTable::<()>::new(vec![CommandEntry::new("big", MAX_ARGS + 1, noop)])
            .unwrap_err();
        assert!(matches!(err, TableError::ArityTooLarge { arity: 9, .. }));
    }

    #[test]
    fn flags_are_recorded() {
        let t = CommandTable::<()>::new(vec![
            CommandEntry::new("startPan", 0, noop)
                .requires_document()
                .requires_event(),
        ])
        .unwrap();
        let entry = t.resolve("startPan").unwrap();
        assert!(entry.needs_document());
        assert!(entry.needs_event());
        assert_eq!(entry.arity(), 0);
    }
}
