pub mod test_helpers {
    use crate::inputs::event_source::{
        Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind, SimulatedEventSource,
    };
    use crate::key_bindings::KeyBindings;
    use crate::system_command::MockSystemCommandExecutor;
    use crate::viewer::{Document, Viewer};
    use crate::App;

    /// Builder for creating test scenarios with simulated user input
    pub struct TestScenarioBuilder {
        events: Vec<Event>,
    }

    impl Default for TestScenarioBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TestScenarioBuilder {
        pub fn new() -> Self {
            Self { events: Vec::new() }
        }

        /// Add a character key press
        pub fn press_char(mut self, c: char) -> Self {
            self.events.push(SimulatedEventSource::char_key(c));
            self
        }

        /// Add a Ctrl+character key press
        pub fn press_ctrl_char(mut self, c: char) -> Self {
            self.events.push(SimulatedEventSource::ctrl_char_key(c));
            self
        }

        pub fn press_key(mut self, code: KeyCode, modifiers: KeyModifiers) -> Self {
            self.events
                .push(SimulatedEventSource::key_event(code, modifiers));
            self
        }

        /// Move the pointer without pressing anything
        pub fn move_to(mut self, column: u16, row: u16) -> Self {
            self.events.push(SimulatedEventSource::mouse_event(
                MouseEventKind::Moved,
                column,
                row,
            ));
            self
        }

        pub fn press(mut self, button: MouseButton, column: u16, row: u16) -> Self {
            self.events.push(SimulatedEventSource::mouse_event(
                MouseEventKind::Down(button),
                column,
                row,
            ));
            self
        }

        pub fn release(mut self, button: MouseButton, column: u16, row: u16) -> Self {
            self.events.push(SimulatedEventSource::mouse_event(
                MouseEventKind::Up(button),
                column,
                row,
            ));
            self
        }

        /// Press and release `button` at the same spot
        pub fn click(self, button: MouseButton, column: u16, row: u16) -> Self {
            self.press(button, column, row).release(button, column, row)
        }

        /// Drag with the left button from one cell to another
        pub fn drag(self, from: (u16, u16), to: (u16, u16)) -> Self {
            self.press(MouseButton::Left, from.0, from.1)
                .release(MouseButton::Left, to.0, to.1)
        }

        /// Scroll the wheel one notch down (or up)
        pub fn wheel(mut self, down: bool, column: u16, row: u16) -> Self {
            let kind = if down {
                MouseEventKind::ScrollDown
            } else {
                MouseEventKind::ScrollUp
            };
            self.events
                .push(SimulatedEventSource::mouse_event(kind, column, row));
            self
        }

        /// Quit the application (press 'q')
        pub fn quit(mut self) -> Self {
            self.events.push(SimulatedEventSource::char_key('q'));
            self
        }

        /// Build the simulated event source
        pub fn build(self) -> SimulatedEventSource {
            SimulatedEventSource::new(self.events)
        }
    }

    /// An app with the default bindings, a mock process launcher and an
    /// in-memory document of `pages` letter-sized pages.
    pub fn create_test_app(pages: usize) -> App {
        create_test_app_with_bindings(pages, KeyBindings::with_defaults())
    }

    pub fn create_test_app_with_bindings(pages: usize, bindings: KeyBindings) -> App {
        let mut viewer = Viewer::new(Box::new(MockSystemCommandExecutor::new()));
        if pages > 0 {
            viewer.open_document(Document::new("test.pdf", pages));
        }
        App::new(viewer, bindings).unwrap()
    }
}
