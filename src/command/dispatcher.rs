use log::{debug, error};

use super::error::CommandError;
use super::parser::parse_command;
use super::table::CommandTable;
use crate::inputs::InputEvent;

/// The one piece of application state the dispatcher itself consults.
pub trait DocumentState {
    fn has_open_document(&self) -> bool;
}

/// Routes command strings to the handlers of a [`CommandTable`].
///
/// Stateless apart from the table; all mutable state lives in the `S`
/// passed to each call.
pub struct Dispatcher<S> {
    table: CommandTable<S>,
}

impl<S: DocumentState> Dispatcher<S> {
    pub fn new(table: CommandTable<S>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CommandTable<S> {
        &self.table
    }

    /// Parse, resolve, validate and run one command string.
    ///
    /// Returns the name of the command that ran. Nothing is logged here;
    /// see [`Dispatcher::execute`].
    pub fn dispatch(
        &self,
        state: &mut S,
        cmd: &str,
        event: Option<&InputEvent>,
    ) -> Result<&'static str, CommandError> {
        let parsed = parse_command(cmd).map_err(|source| CommandError::Parse {
            command: cmd.to_string(),
            source,
        })?;

        let entry = self
            .table
            .resolve(&parsed.name)
            .ok_or_else(|| CommandError::UnknownCommand(cmd.to_string()))?;

        if parsed.arg_count() != entry.arity() {
            return Err(CommandError::InvalidSyntax {
                command: cmd.to_string(),
                reason: format!(
                    "expected {} argument(s), got {}",
                    entry.arity(),
                    parsed.arg_count()
                ),
            });
        }
        if entry.needs_event() && event.is_none() {
            return Err(CommandError::InvalidSyntax {
                command: cmd.to_string(),
                reason: "must be triggered by an input event".to_string(),
            });
        }
        if entry.needs_document() && !state.has_open_document() {
            return Err(CommandError::DocumentNotReady(entry.name().to_string()));
        }

        entry.invoke(state, &parsed.args, event);
        Ok(entry.name())
    }

    /// [`Dispatcher::dispatch`] plus diagnostics: reportable failures are
    /// logged, a missing document is not.
    pub fn execute(
        &self,
        state: &mut S,
        cmd: &str,
        event: Option<&InputEvent>,
    ) -> Result<(), CommandError> {
        match self.dispatch(state, cmd, event) {
            Ok(name) => {
                debug!("Executed command '{name}' from '{cmd}'");
                Ok(())
            }
            Err(e) => {
                if e.is_reportable() {
                    error!("{e}");
                } else {
                    debug!("Skipped '{cmd}': no open document");
                }
                Err(e)
            }
        }
    }

    /// Run every command of a binding in order. A failing command never
    /// stops the ones after it. Returns the reportable failures.
    pub fn execute_all<I, C>(
        &self,
        state: &mut S,
        cmds: I,
        event: Option<&InputEvent>,
    ) -> Vec<CommandError>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        cmds.into_iter()
            .filter_map(|cmd| self.execute(state, cmd.as_ref(), event).err())
            .filter(CommandError::is_reportable)
            .collect()
    }
}
