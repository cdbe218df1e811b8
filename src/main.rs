use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::EnableMouseCapture,
    execute,
    terminal::{Clear, ClearType, enable_raw_mode},
};
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use pagecmd::inputs::{KeyChord, TerminalEventSource};
use pagecmd::key_bindings::KeyBindings;
use pagecmd::panic_handler::{initialize_panic_handler, restore_terminal};
use pagecmd::settings::load_settings;
use pagecmd::system_command::RealSystemCommandExecutor;
use pagecmd::viewer::Viewer;
use pagecmd::{App, run_app_with_event_source};

#[derive(Parser)]
#[command(author, version, about = "Drive a PDF viewer through its command language")]
struct Cli {
    /// PDF file to open
    file: Option<PathBuf>,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start from an empty key binding table
    #[arg(long)]
    no_default_bindings: bool,

    /// Command to run, e.g. 'gotoPage(5)'. May be repeated
    #[arg(short = 'c', long = "command")]
    commands: Vec<String>,

    /// Key presses to simulate after the commands, e.g. 'n,n,ctrl-end'
    #[arg(short, long, value_delimiter = ',')]
    keys: Vec<String>,

    /// Print every known command with its arity and flags
    #[arg(long)]
    list_commands: bool,

    /// Print the active key bindings
    #[arg(long)]
    list_bindings: bool,

    /// Read keys and mouse events from the terminal until 'quit'
    #[arg(short, long)]
    interactive: bool,

    #[arg(long, default_value = "pagecmd.log")]
    log_file: PathBuf,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "debug", value_parser = parse_level)]
    log_level: LevelFilter,
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|_| format!("unknown log level '{s}'"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    WriteLogger::init(
        cli.log_level,
        Config::default(),
        File::create(&cli.log_file)
            .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?,
    )?;
    info!("Starting pagecmd");

    let mut settings = load_settings(cli.config.as_deref());
    if cli.no_default_bindings {
        settings.default_bindings = false;
    }
    let bindings = KeyBindings::from_settings(&settings);
    let viewer = Viewer::with_settings(Box::new(RealSystemCommandExecutor), &settings);
    let mut app = App::new(viewer, bindings)?;

    if cli.list_commands {
        for entry in app.dispatcher().table().iter() {
            let mut flags = Vec::new();
            if entry.needs_document() {
                flags.push("document");
            }
            if entry.needs_event() {
                flags.push("event");
            }
            println!("{}\t{}\t{}", entry.name(), entry.arity(), flags.join(","));
        }
    }
    if cli.list_bindings {
        for binding in app.bindings().iter() {
            println!(
                "{}\t{}\t{}",
                binding.chord,
                binding.context,
                binding.commands.join(" ")
            );
        }
    }
    if cli.list_commands || cli.list_bindings {
        return Ok(());
    }

    if let Some(file) = &cli.file {
        app.viewer.open_file(file)?;
    }

    if cli.interactive {
        return run_interactive(&mut app);
    }

    for cmd in &cli.commands {
        if let Err(e) = app.execute(cmd) {
            if e.is_reportable() {
                eprintln!("{e}");
            }
        }
    }
    for spec in &cli.keys {
        let chord: KeyChord = match spec.parse() {
            Ok(chord) => chord,
            Err(e) => {
                error!("Bad key '{spec}': {e}");
                eprintln!("{e}");
                continue;
            }
        };
        for e in app.press(chord) {
            eprintln!("{e}");
        }
    }

    println!("{}", serde_json::to_string_pretty(&app.viewer.snapshot())?);
    info!("Shutting down pagecmd");
    Ok(())
}

fn run_interactive(app: &mut App) -> Result<()> {
    initialize_panic_handler();

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, Clear(ClearType::All), EnableMouseCapture)?;

    let res = run_app_with_event_source(&mut stdout, app, &mut TerminalEventSource);

    restore_terminal();

    if let Err(err) = &res {
        error!("Application error: {err:?}");
    }
    info!("Shutting down pagecmd");
    res
}
