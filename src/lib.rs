pub mod app;
pub mod command;
pub mod inputs;
pub mod jump_list;
pub mod key_bindings;
pub mod panic_handler;
pub mod settings;
pub mod system_command;
pub mod viewer;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use app::{App, run_app_with_event_source};
