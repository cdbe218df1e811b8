//! Application state that command handlers operate on.
//!
//! Effects that need a real toolkit (dialogs, the clipboard, printing, the
//! popup menu) are queued as [`UiRequest`]s for the front end to carry out.

pub mod commands;
pub mod document;
pub mod run_command;
pub mod tab;

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, info};
use serde::Serialize;

use crate::command::DocumentState;
use crate::inputs::Context;
use crate::settings::Settings;
use crate::system_command::SystemCommandExecutor;

pub use commands::command_table;
pub use document::{Document, Link, LinkTarget};
pub use tab::{DisplayMode, SelectMode, Selection, Tab, Viewport, Zoom};

pub const HELP_URL: &str = "http://www.xpdfreader.com/help";
const DEFAULT_SIDEBAR_WIDTH: i64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Document,
    PageNumber,
    FindBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindDirection {
    First,
    Next,
    Previous,
}

/// Something only the front end can do.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum UiRequest {
    About,
    OpenUrl { url: String },
    OpenFileDialog { start_dir: Option<PathBuf> },
    SaveAsDialog { start_dir: Option<PathBuf> },
    SaveImageDialog,
    Print,
    CopySelection { selection: Selection },
    Find { direction: FindDirection },
    PopupMenu { x: i32, y: i32 },
    ShowErrorWindow,
    NewWindow { file: Option<PathBuf>, page: Option<usize> },
    Message { text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowGeometry {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 800,
            height: 600,
        }
    }
}

pub struct Viewer {
    tabs: Vec<Tab>,
    current: usize,
    pub full_screen: bool,
    pub sidebar_open: bool,
    pub sidebar_width: i64,
    pub window: WindowGeometry,
    pub screen: (i64, i64),
    pub focus: Focus,
    scroll_scale: f64,
    max_zoom: u32,
    pointer: (i32, i32),
    requests: Vec<UiRequest>,
    quit_requested: bool,
    executor: Box<dyn SystemCommandExecutor>,
}

impl Viewer {
    pub fn new(executor: Box<dyn SystemCommandExecutor>) -> Self {
        Self {
            tabs: vec![Tab::default()],
            current: 0,
            full_screen: false,
            sidebar_open: false,
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            window: WindowGeometry::default(),
            screen: (1920, 1080),
            focus: Focus::Document,
            scroll_scale: 1.0,
            max_zoom: 2000,
            pointer: (0, 0),
            requests: Vec::new(),
            quit_requested: false,
            executor,
        }
    }

    pub fn with_settings(executor: Box<dyn SystemCommandExecutor>, settings: &Settings) -> Self {
        let mut viewer = Self::new(executor);
        viewer.scroll_scale = settings.scroll_scale;
        viewer.max_zoom = settings.max_zoom.max(1);
        viewer
    }

    pub fn tab(&self) -> &Tab {
        &self.tabs[self.current]
    }

    pub fn tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.current]
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn current_tab_index(&self) -> usize {
        self.current
    }

    pub fn document(&self) -> Option<&Document> {
        self.tab().document.as_ref()
    }

    pub fn max_zoom(&self) -> u32 {
        self.max_zoom
    }

    pub fn executor(&self) -> &dyn SystemCommandExecutor {
        self.executor.as_ref()
    }

    /// Load `path` into the current tab.
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let document = Document::load(path)?;
        info!("Opened {path:?} ({} pages)", document.num_pages());
        self.open_document(document);
        Ok(())
    }

    pub fn open_document(&mut self, document: Document) {
        self.tab_mut().set_document(document);
    }

    /// The document area: the window minus the sidebar, or the whole
    /// screen in full-screen mode.
    pub fn viewport(&self) -> Viewport {
        if self.full_screen {
            return Viewport {
                width: self.screen.0.max(1),
                height: self.screen.1.max(1),
            };
        }
        let sidebar = if self.sidebar_open { self.sidebar_width } else { 0 };
        Viewport {
            width: (self.window.width - sidebar).max(1),
            height: self.window.height.max(1),
        }
    }

    /// Key binding context for the current UI state. Scroll lock is never
    /// reported as on.
    pub fn context(&self) -> Context {
        let mut context = if self.full_screen {
            Context::FULL_SCREEN
        } else {
            Context::WINDOW
        };
        context |= if self.tab().display_mode.is_continuous() {
            Context::CONTINUOUS
        } else {
            Context::SINGLE_PAGE
        };
        context |= if self.tab().hover_link.is_some() {
            Context::OVER_LINK
        } else {
            Context::OFF_LINK
        };
        context | Context::SCR_LOCK_OFF
    }

    /// Scale a scroll delta for the display density. Never shrinks it.
    pub fn scale_scroll(&self, delta: i64) -> i64 {
        let scaled = (delta as f64 * self.scroll_scale) as i64;
        if delta >= 0 {
            scaled.max(delta)
        } else {
            scaled.min(delta)
        }
    }

    pub fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    /// Record the pointer position and refresh the link under it.
    pub fn set_pointer(&mut self, x: i32, y: i32) {
        self.pointer = (x, y);
        let vp = self.viewport();
        let link = self.tab().link_at(x, y, vp).cloned();
        self.tab_mut().hover_link = link;
    }

    pub fn request(&mut self, request: UiRequest) {
        debug!("UI request: {request:?}");
        self.requests.push(request);
    }

    pub fn requests(&self) -> &[UiRequest] {
        &self.requests
    }

    pub fn take_requests(&mut self) -> Vec<UiRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn add_tab(&mut self, tab: Tab) {
        self.tabs.push(tab);
        self.current = self.tabs.len() - 1;
    }

    /// Close the current tab. Returns false when it was the last one.
    pub fn close_tab(&mut self) -> bool {
        self.tabs.remove(self.current);
        if self.tabs.is_empty() {
            self.tabs.push(Tab::default());
            self.current = 0;
            return false;
        }
        self.current = self.current.min(self.tabs.len() - 1);
        true
    }

    pub fn next_tab(&mut self) {
        self.current = (self.current + 1) % self.tabs.len();
    }

    pub fn prev_tab(&mut self) {
        self.current = (self.current + self.tabs.len() - 1) % self.tabs.len();
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        let vp = self.viewport();
        let tab = self.tab();
        ViewerSnapshot {
            file: tab.document.as_ref().map(|d| d.path().to_path_buf()),
            num_pages: tab.num_pages(),
            page: tab.page,
            scroll_x: tab.scroll_x,
            scroll_y: tab.scroll_y,
            zoom: tab.zoom,
            zoom_percent: tab.zoom_percent(vp),
            rotate: tab.rotate,
            display_mode: tab.display_mode,
            select_mode: tab.select_mode,
            selection: tab.selection,
            tab: self.current,
            tab_count: self.tabs.len(),
            full_screen: self.full_screen,
            sidebar_open: self.sidebar_open,
            window: self.window,
            focus: self.focus,
            context: self.context().to_string(),
            quit_requested: self.quit_requested,
            requests: self.requests.clone(),
        }
    }
}

impl DocumentState for Viewer {
    fn has_open_document(&self) -> bool {
        self.tab().document.is_some()
    }
}

/// Serializable view of the viewer, printed by the command-line front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerSnapshot {
    pub file: Option<PathBuf>,
    pub num_pages: usize,
    pub page: usize,
    pub scroll_x: i64,
    pub scroll_y: i64,
    pub zoom: Zoom,
    pub zoom_percent: f64,
    pub rotate: u16,
    pub display_mode: DisplayMode,
    pub select_mode: SelectMode,
    pub selection: Option<Selection>,
    pub tab: usize,
    pub tab_count: usize,
    pub full_screen: bool,
    pub sidebar_open: bool,
    pub window: WindowGeometry,
    pub focus: Focus,
    pub context: String,
    pub quit_requested: bool,
    pub requests: Vec<UiRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system_command::MockSystemCommandExecutor;

    fn viewer() -> Viewer {
        Viewer::new(Box::new(MockSystemCommandExecutor::new()))
    }

    #[test]
    fn context_reflects_state() {
        let mut v = viewer();
        assert_eq!(
            v.context(),
            Context::WINDOW | Context::CONTINUOUS | Context::OFF_LINK | Context::SCR_LOCK_OFF
        );

        v.full_screen = true;
        v.tab_mut().display_mode = DisplayMode::SideBySideSingle;
        v.tab_mut().hover_link = Some(LinkTarget::Page(2));
        assert_eq!(
            v.context(),
            Context::FULL_SCREEN | Context::SINGLE_PAGE | Context::OVER_LINK | Context::SCR_LOCK_OFF
        );

        v.tab_mut().display_mode = DisplayMode::HorizontalContinuous;
        assert!(v.context().contains(Context::CONTINUOUS));
    }

    #[test]
    fn scale_scroll_never_shrinks() {
        let mut v = viewer();
        assert_eq!(v.scale_scroll(16), 16);
        v.scroll_scale = 1.5;
        assert_eq!(v.scale_scroll(16), 24);
        assert_eq!(v.scale_scroll(-16), -24);
        v.scroll_scale = 0.5;
        assert_eq!(v.scale_scroll(16), 16);
        assert_eq!(v.scale_scroll(-16), -16);
    }

    #[test]
    fn viewport_excludes_sidebar_unless_full_screen() {
        let mut v = viewer();
        assert_eq!(v.viewport(), Viewport { width: 800, height: 600 });
        v.sidebar_open = true;
        assert_eq!(v.viewport().width, 600);
        v.full_screen = true;
        assert_eq!(v.viewport(), Viewport { width: 1920, height: 1080 });
    }

    #[test]
    fn pointer_tracks_hovered_link() {
        let mut v = viewer();
        v.open_document(Document::new("a.pdf", 2).with_page_size(100.0, 200.0).with_link(
            1,
            Link::new([0.0, 150.0, 50.0, 200.0], LinkTarget::Uri("https://x".into())),
        ));
        v.tab_mut().zoom = Zoom::Percent(100);

        v.set_pointer(10, 10);
        assert!(v.context().contains(Context::OVER_LINK));
        v.set_pointer(10, 100);
        assert!(v.context().contains(Context::OFF_LINK));
        assert_eq!(v.pointer(), (10, 100));
    }

    #[test]
    fn closing_the_last_tab_reports_it() {
        let mut v = viewer();
        v.add_tab(Tab::default());
        assert_eq!(v.current_tab_index(), 1);
        assert!(v.close_tab());
        assert_eq!(v.tabs().len(), 1);
        assert!(!v.close_tab());
        assert_eq!(v.tabs().len(), 1);
    }

    #[test]
    fn snapshot_serializes() {
        let mut v = viewer();
        v.open_document(Document::new("a.pdf", 3));
        v.request(UiRequest::Print);
        let json = serde_json::to_value(v.snapshot()).unwrap();
        assert_eq!(json["num_pages"], 3);
        assert_eq!(json["display_mode"], "continuous");
        assert_eq!(json["requests"][0]["request"], "print");
        assert_eq!(json["context"], "window,continuous,offLink,scrLockOff");
    }
}
