pub mod dispatcher;
pub mod error;
pub mod parser;
pub mod table;

pub use dispatcher::{Dispatcher, DocumentState};
pub use error::{CommandError, ParseError, TableError};
pub use parser::{MAX_ARGS, ParsedCommand, parse_command};
pub use table::{CommandEntry, CommandHandler, CommandTable};
