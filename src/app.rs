use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use log::{debug, info};

use crate::command::{CommandError, Dispatcher};
use crate::inputs::{Event, EventSource, EventTranslator, InputEvent, InputKind, Key, KeyChord};
use crate::key_bindings::KeyBindings;
use crate::viewer::{Viewer, command_table};

/// A viewer wired to its command table and key bindings.
pub struct App {
    pub viewer: Viewer,
    dispatcher: Dispatcher<Viewer>,
    bindings: KeyBindings,
    translator: EventTranslator,
}

impl App {
    pub fn new(viewer: Viewer, bindings: KeyBindings) -> Result<Self> {
        let dispatcher = Dispatcher::new(command_table()?);
        info!(
            "Command table ready: {} commands, {} key bindings",
            dispatcher.table().len(),
            bindings.len()
        );
        Ok(Self {
            viewer,
            dispatcher,
            bindings,
            translator: EventTranslator::new(),
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher<Viewer> {
        &self.dispatcher
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    pub fn should_quit(&self) -> bool {
        self.viewer.quit_requested()
    }

    /// Run a single command string with no originating event.
    pub fn execute(&mut self, cmd: &str) -> Result<(), CommandError> {
        self.dispatcher.execute(&mut self.viewer, cmd, None)
    }

    pub fn dispatch(
        &mut self,
        cmd: &str,
        event: Option<&InputEvent>,
    ) -> Result<&'static str, CommandError> {
        self.dispatcher.dispatch(&mut self.viewer, cmd, event)
    }

    pub fn execute_all<I, C>(&mut self, cmds: I, event: Option<&InputEvent>) -> Vec<CommandError>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        self.dispatcher.execute_all(&mut self.viewer, cmds, event)
    }

    /// Translate a terminal event and run whatever is bound to it.
    /// Returns the diagnostics of every command that failed.
    pub fn handle_event(&mut self, event: &Event) -> Vec<CommandError> {
        let translated = self.translator.translate(event);
        if let Event::Mouse(_) = event {
            let (x, y) = self.translator.pointer();
            self.viewer.set_pointer(x, y);
        }

        let mut errors = Vec::new();
        for (chord, input) in translated {
            errors.extend(self.run_binding(&chord, &input));
        }
        errors
    }

    /// Act as if `chord` was pressed at the current pointer position.
    pub fn press(&mut self, chord: KeyChord) -> Vec<CommandError> {
        let kind = match chord.key {
            Key::MousePress(4..) => InputKind::Wheel,
            Key::MousePress(btn) => InputKind::MousePress(btn),
            Key::MouseRelease(btn) | Key::MouseClick(btn) => InputKind::MouseRelease(btn),
            _ => InputKind::Key,
        };
        let (x, y) = self.viewer.pointer();
        let input = InputEvent::new(kind, x, y, chord.mods);
        self.run_binding(&chord, &input)
    }

    fn run_binding(&mut self, chord: &KeyChord, input: &InputEvent) -> Vec<CommandError> {
        let context = self.viewer.context();
        match self.bindings.lookup(chord, context) {
            Some(cmds) => self
                .dispatcher
                .execute_all(&mut self.viewer, cmds, Some(input)),
            None => {
                debug!("No binding for {chord} in {context}");
                Vec::new()
            }
        }
    }

    /// One-line summary of where the viewer is.
    pub fn status_line(&self) -> String {
        let tab = self.viewer.tab();
        let vp = self.viewer.viewport();
        match &tab.document {
            Some(doc) => format!(
                "{} | page {}/{} | {:.0}% | {:?} | tab {}/{}",
                doc.path().display(),
                tab.page,
                tab.num_pages(),
                tab.zoom_percent(vp),
                tab.display_mode,
                self.viewer.current_tab_index() + 1,
                self.viewer.tabs().len()
            ),
            None => "no document".to_string(),
        }
    }
}

fn draw_status<W: Write>(out: &mut W, app: &App) -> Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, 0),
        Clear(ClearType::CurrentLine),
        Print(app.status_line())
    )?;
    if let Some(request) = app.viewer.requests().last() {
        queue!(
            out,
            cursor::MoveTo(0, 1),
            Clear(ClearType::CurrentLine),
            Print(format!("{request:?}"))
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Feed events from `event_source` to the app until a command asks to quit
/// or the source runs dry. A status line is redrawn on `out` after every
/// batch of events.
pub fn run_app_with_event_source<W: Write>(
    out: &mut W,
    app: &mut App,
    event_source: &mut dyn EventSource,
) -> Result<()> {
    let tick_rate = Duration::from_millis(50);
    draw_status(out, app)?;
    loop {
        let mut events_processed = 0;
        while event_source.poll(Duration::from_millis(0))? && events_processed < 50 {
            let event = event_source.read()?;
            events_processed += 1;
            let errors = app.handle_event(&event);
            if !errors.is_empty() {
                debug!("{} command(s) failed for {event:?}", errors.len());
            }
            if app.should_quit() {
                break;
            }
        }

        if events_processed > 0 {
            draw_status(out, app)?;
        }
        if app.should_quit() || event_source.is_exhausted() {
            break;
        }
        if !event_source.poll(tick_rate)? && event_source.is_exhausted() {
            break;
        }
    }
    info!("Event loop finished");
    Ok(())
}
