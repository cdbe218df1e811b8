use crossterm::{event::DisableMouseCapture, execute, terminal::disable_raw_mode};
use log::error;
use std::io::{self, Write};
use std::panic;

/// Install a panic hook that puts the terminal back before the report is
/// printed, so the backtrace is readable.
pub fn initialize_panic_handler() {
    better_panic::install();

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        error!("panic: {panic_info}");
        default_hook(panic_info);
        std::process::exit(1);
    }));
}

/// Leave raw mode, stop mouse reporting and show the cursor.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), DisableMouseCapture, crossterm::cursor::Show);
    let _ = writeln!(io::stderr());
}
