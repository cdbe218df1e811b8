use thiserror::Error;

/// Why a command string could not be split into a name and arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("command name is empty")]
    EmptyName,
    #[error("argument list is not closed with ')'")]
    MissingCloseParen,
    #[error("more than {max} arguments")]
    TooManyArguments { max: usize },
    #[error("unexpected trailing characters '{0}'")]
    TrailingCharacters(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("invalid command syntax: '{command}': {source}")]
    Parse {
        command: String,
        #[source]
        source: ParseError,
    },

    #[error("unknown command: '{0}'")]
    UnknownCommand(String),

    #[error("invalid command syntax: '{command}': {reason}")]
    InvalidSyntax { command: String, reason: String },

    /// The command needs an open document and there is none. Routine,
    /// e.g. a click binding firing in an empty window.
    #[error("command '{0}' requires an open document")]
    DocumentNotReady(String),
}

impl CommandError {
    /// Whether this outcome should be surfaced through the diagnostic log.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, CommandError::DocumentNotReady(_))
    }
}

/// Errors raised while building a command table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("command '{0}' is registered twice")]
    DuplicateName(String),
    #[error("command '{name}' declares {arity} arguments, more than the maximum of {max}")]
    ArityTooLarge {
        name: String,
        arity: usize,
        max: usize,
    },
    #[error("command name '{0}' is not alphanumeric")]
    InvalidName(String),
}
