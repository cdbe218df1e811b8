pub mod event_source;
pub mod input_event;
pub mod keys;
pub mod terminal_input;

pub use event_source::{Event, EventSource, SimulatedEventSource, TerminalEventSource};
pub use input_event::{InputEvent, InputKind};
pub use keys::{Context, Key, KeyChord, KeySpecError, Modifiers};
pub use terminal_input::EventTranslator;
