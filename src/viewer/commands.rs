//! The built-in commands and their handlers.
//!
//! Arguments arrive as raw strings and are read leniently: numbers use
//! C-style prefix parsing, so `"12abc"` is 12 and `"abc"` is 0.

use log::{error, warn};

use super::document::{Document, LinkTarget};
use super::run_command::{self, RunContext};
use super::tab::{DisplayMode, SelectMode, Selection, Tab, ZOOM_STEPS, Zoom};
use super::{FindDirection, Focus, HELP_URL, UiRequest, Viewer};
use crate::command::{CommandEntry, CommandTable, TableError};
use crate::inputs::InputEvent;

type Args<'a> = &'a [String];
type Event<'a> = Option<&'a InputEvent>;

/// Leading integer of `s`, like C `atoi`.
pub fn atoi(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    if negative { -value } else { value }
}

/// Leading decimal number of `s`, like C `atof`.
pub fn atof(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

fn pointer_of(viewer: &Viewer, event: Event) -> (i32, i32) {
    event.map_or(viewer.pointer(), |e| (e.x, e.y))
}

/// Build the command table every viewer front end dispatches through.
pub fn command_table() -> Result<CommandTable<Viewer>, TableError> {
    CommandTable::new(vec![
        CommandEntry::new("about", 0, about),
        CommandEntry::new("blockSelectMode", 0, block_select_mode),
        CommandEntry::new("closeSidebar", 0, close_sidebar),
        CommandEntry::new("closeSidebarMoveResizeWin", 0, close_sidebar_move_resize_win),
        CommandEntry::new("closeSidebarResizeWin", 0, close_sidebar_resize_win),
        CommandEntry::new("closeTabOrQuit", 0, close_tab_or_quit),
        CommandEntry::new("closeWindowOrQuit", 0, close_window_or_quit),
        CommandEntry::new("continuousMode", 0, continuous_mode),
        CommandEntry::new("copy", 0, copy),
        CommandEntry::new("endPan", 0, end_pan).requires_document().requires_event(),
        CommandEntry::new("endSelection", 0, end_selection).requires_document().requires_event(),
        CommandEntry::new("find", 0, find).requires_document(),
        CommandEntry::new("findFirst", 0, find_first).requires_document(),
        CommandEntry::new("findNext", 0, find_next).requires_document(),
        CommandEntry::new("findPrevious", 0, find_previous).requires_document(),
        CommandEntry::new("focusToDocWin", 0, focus_to_doc_win),
        CommandEntry::new("focusToPageNum", 0, focus_to_page_num),
        CommandEntry::new("followLink", 0, follow_link).requires_document().requires_event(),
        CommandEntry::new("followLinkInNewTab", 0, follow_link_in_new_tab)
            .requires_document()
            .requires_event(),
        CommandEntry::new("followLinkInNewTabNoSel", 0, follow_link_in_new_tab_no_sel)
            .requires_document()
            .requires_event(),
        CommandEntry::new("followLinkInNewWin", 0, follow_link_in_new_win)
            .requires_document()
            .requires_event(),
        CommandEntry::new("followLinkInNewWinNoSel", 0, follow_link_in_new_win_no_sel)
            .requires_document()
            .requires_event(),
        CommandEntry::new("followLinkNoSel", 0, follow_link_no_sel)
            .requires_document()
            .requires_event(),
        CommandEntry::new("fullScreenMode", 0, full_screen_mode),
        CommandEntry::new("goBackward", 0, go_backward),
        CommandEntry::new("goForward", 0, go_forward),
        CommandEntry::new("gotoDest", 1, goto_dest).requires_document(),
        CommandEntry::new("gotoLastPage", 0, goto_last_page).requires_document(),
        CommandEntry::new("gotoPage", 1, goto_page).requires_document(),
        CommandEntry::new("help", 0, help),
        CommandEntry::new("horizontalContinuousMode", 0, horizontal_continuous_mode),
        CommandEntry::new("linearSelectMode", 0, linear_select_mode),
        CommandEntry::new("newTab", 0, new_tab),
        CommandEntry::new("newWindow", 0, new_window),
        CommandEntry::new("nextPage", 0, next_page).requires_document(),
        CommandEntry::new("nextPageNoScroll", 0, next_page_no_scroll).requires_document(),
        CommandEntry::new("nextTab", 0, next_tab).requires_document(),
        CommandEntry::new("open", 0, open),
        CommandEntry::new("openErrorWindow", 0, open_error_window),
        CommandEntry::new("openSidebar", 0, open_sidebar),
        CommandEntry::new("openSidebarMoveResizeWin", 0, open_sidebar_move_resize_win),
        CommandEntry::new("openSidebarResizeWin", 0, open_sidebar_resize_win),
        CommandEntry::new("pageDown", 0, page_down).requires_document(),
        CommandEntry::new("pageUp", 0, page_up).requires_document(),
        CommandEntry::new("postPopupMenu", 0, post_popup_menu).requires_event(),
        CommandEntry::new("prevPage", 0, prev_page).requires_document(),
        CommandEntry::new("prevPageNoScroll", 0, prev_page_no_scroll).requires_document(),
        CommandEntry::new("prevTab", 0, prev_tab).requires_document(),
        CommandEntry::new("print", 0, print).requires_document(),
        CommandEntry::new("quit", 0, quit),
        CommandEntry::new("reload", 0, reload).requires_document(),
        CommandEntry::new("rotateCCW", 0, rotate_ccw).requires_document(),
        CommandEntry::new("rotateCW", 0, rotate_cw).requires_document(),
        CommandEntry::new("run", 1, run),
        CommandEntry::new("saveAs", 0, save_as).requires_document(),
        CommandEntry::new("saveImage", 0, save_image).requires_document(),
        CommandEntry::new("scrollDown", 1, scroll_down).requires_document(),
        CommandEntry::new("scrollDownNextPage", 1, scroll_down_next_page).requires_document(),
        CommandEntry::new("scrollLeft", 1, scroll_left).requires_document(),
        CommandEntry::new("scrollOutlineDown", 1, scroll_outline_down).requires_document(),
        CommandEntry::new("scrollOutlineUp", 1, scroll_outline_up).requires_document(),
        CommandEntry::new("scrollRight", 1, scroll_right).requires_document(),
        CommandEntry::new("scrollToBottomEdge", 0, scroll_to_bottom_edge).requires_document(),
        CommandEntry::new("scrollToBottomRight", 0, scroll_to_bottom_right).requires_document(),
        CommandEntry::new("scrollToLeftEdge", 0, scroll_to_left_edge).requires_document(),
        CommandEntry::new("scrollToRightEdge", 0, scroll_to_right_edge).requires_document(),
        CommandEntry::new("scrollToTopEdge", 0, scroll_to_top_edge).requires_document(),
        CommandEntry::new("scrollToTopLeft", 0, scroll_to_top_left).requires_document(),
        CommandEntry::new("scrollUp", 1, scroll_up).requires_document(),
        CommandEntry::new("scrollUpPrevPage", 1, scroll_up_prev_page).requires_document(),
        CommandEntry::new("setSelection", 5, set_selection).requires_document(),
        CommandEntry::new("sideBySideContinuousMode", 0, side_by_side_continuous_mode),
        CommandEntry::new("sideBySideSingleMode", 0, side_by_side_single_mode),
        CommandEntry::new("singlePageMode", 0, single_page_mode),
        CommandEntry::new("startPan", 0, start_pan).requires_document().requires_event(),
        CommandEntry::new("startSelection", 0, start_selection)
            .requires_document()
            .requires_event(),
        CommandEntry::new("toggleContinuousMode", 0, toggle_continuous_mode),
        CommandEntry::new("toggleFullScreenMode", 0, toggle_full_screen_mode),
        CommandEntry::new("toggleSelectMode", 0, toggle_select_mode),
        CommandEntry::new("toggleSidebar", 0, toggle_sidebar),
        CommandEntry::new("toggleSidebarMoveResizeWin", 0, toggle_sidebar_move_resize_win),
        CommandEntry::new("toggleSidebarResizeWin", 0, toggle_sidebar_resize_win),
        CommandEntry::new("windowMode", 0, window_mode),
        CommandEntry::new("zoomFitPage", 0, zoom_fit_page),
        CommandEntry::new("zoomFitWidth", 0, zoom_fit_width),
        CommandEntry::new("zoomIn", 0, zoom_in),
        CommandEntry::new("zoomOut", 0, zoom_out),
        CommandEntry::new("zoomPercent", 1, zoom_percent),
        CommandEntry::new("zoomToSelection", 0, zoom_to_selection).requires_document(),
    ])
}

fn about(v: &mut Viewer, _: Args, _: Event) {
    v.request(UiRequest::About);
}

fn help(v: &mut Viewer, _: Args, _: Event) {
    v.request(UiRequest::OpenUrl {
        url: HELP_URL.to_string(),
    });
}

fn open_error_window(v: &mut Viewer, _: Args, _: Event) {
    v.request(UiRequest::ShowErrorWindow);
}

// Selection

fn block_select_mode(v: &mut Viewer, _: Args, _: Event) {
    v.tab_mut().select_mode = SelectMode::Block;
}

fn linear_select_mode(v: &mut Viewer, _: Args, _: Event) {
    v.tab_mut().select_mode = SelectMode::Linear;
}

fn toggle_select_mode(v: &mut Viewer, _: Args, _: Event) {
    let tab = v.tab_mut();
    tab.select_mode = match tab.select_mode {
        SelectMode::Block => SelectMode::Linear,
        SelectMode::Linear => SelectMode::Block,
    };
}

fn start_selection(v: &mut Viewer, _: Args, event: Event) {
    let (x, y) = pointer_of(v, event);
    v.tab_mut().start_selection(x, y);
}

fn end_selection(v: &mut Viewer, _: Args, event: Event) {
    let (x, y) = pointer_of(v, event);
    let vp = v.viewport();
    v.tab_mut().end_selection(x, y, vp);
}

fn set_selection(v: &mut Viewer, args: Args, _: Event) {
    let Ok(page) = usize::try_from(atoi(&args[0])) else {
        return;
    };
    let selection = Selection::new(
        page,
        atof(&args[1]),
        atof(&args[2]),
        atof(&args[3]),
        atof(&args[4]),
    );
    v.tab_mut().set_selection(selection);
}

fn copy(v: &mut Viewer, _: Args, _: Event) {
    if let Some(selection) = v.tab().selection {
        v.request(UiRequest::CopySelection { selection });
    }
}

fn zoom_to_selection(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    let max_zoom = v.max_zoom();
    v.tab_mut().zoom_to_selection(max_zoom, vp);
}

// Panning

fn start_pan(v: &mut Viewer, _: Args, event: Event) {
    let (x, y) = pointer_of(v, event);
    let vp = v.viewport();
    v.tab_mut().start_pan(x, y, vp);
}

fn end_pan(v: &mut Viewer, _: Args, event: Event) {
    let (x, y) = pointer_of(v, event);
    let vp = v.viewport();
    v.tab_mut().end_pan(x, y, vp);
}

// Sidebar and window

fn set_sidebar(v: &mut Viewer, open: bool, resize_window: bool, move_window: bool) {
    if v.sidebar_open == open {
        return;
    }
    v.sidebar_open = open;
    let delta = if open { v.sidebar_width } else { -v.sidebar_width };
    if resize_window {
        v.window.width += delta;
    }
    if move_window {
        v.window.x -= delta;
    }
}

fn open_sidebar(v: &mut Viewer, _: Args, _: Event) {
    set_sidebar(v, true, false, false);
}

fn open_sidebar_resize_win(v: &mut Viewer, _: Args, _: Event) {
    set_sidebar(v, true, true, false);
}

fn open_sidebar_move_resize_win(v: &mut Viewer, _: Args, _: Event) {
    set_sidebar(v, true, true, true);
}

fn close_sidebar(v: &mut Viewer, _: Args, _: Event) {
    set_sidebar(v, false, false, false);
}

fn close_sidebar_resize_win(v: &mut Viewer, _: Args, _: Event) {
    set_sidebar(v, false, true, false);
}

fn close_sidebar_move_resize_win(v: &mut Viewer, _: Args, _: Event) {
    set_sidebar(v, false, true, true);
}

fn toggle_sidebar(v: &mut Viewer, _: Args, _: Event) {
    let open = !v.sidebar_open;
    set_sidebar(v, open, false, false);
}

fn toggle_sidebar_resize_win(v: &mut Viewer, _: Args, _: Event) {
    let open = !v.sidebar_open;
    set_sidebar(v, open, true, false);
}

fn toggle_sidebar_move_resize_win(v: &mut Viewer, _: Args, _: Event) {
    let open = !v.sidebar_open;
    set_sidebar(v, open, true, true);
}

fn full_screen_mode(v: &mut Viewer, _: Args, _: Event) {
    v.full_screen = true;
}

fn window_mode(v: &mut Viewer, _: Args, _: Event) {
    v.full_screen = false;
}

fn toggle_full_screen_mode(v: &mut Viewer, _: Args, _: Event) {
    v.full_screen = !v.full_screen;
}

fn focus_to_doc_win(v: &mut Viewer, _: Args, _: Event) {
    v.focus = Focus::Document;
}

fn focus_to_page_num(v: &mut Viewer, _: Args, _: Event) {
    v.focus = Focus::PageNumber;
}

fn post_popup_menu(v: &mut Viewer, _: Args, event: Event) {
    let (x, y) = pointer_of(v, event);
    v.request(UiRequest::PopupMenu { x, y });
}

fn scroll_outline_down(v: &mut Viewer, args: Args, _: Event) {
    let delta = atoi(&args[0]);
    let tab = v.tab_mut();
    tab.outline_scroll = i64::from(tab.outline_scroll)
        .saturating_add(delta)
        .clamp(0, i64::from(u32::MAX)) as u32;
}

fn scroll_outline_up(v: &mut Viewer, args: Args, _: Event) {
    let delta = atoi(&args[0]);
    let tab = v.tab_mut();
    tab.outline_scroll = i64::from(tab.outline_scroll)
        .saturating_sub(delta)
        .clamp(0, i64::from(u32::MAX)) as u32;
}

// Tabs, windows, files

fn new_tab(v: &mut Viewer, _: Args, _: Event) {
    v.add_tab(Tab::default());
}

fn next_tab(v: &mut Viewer, _: Args, _: Event) {
    v.next_tab();
}

fn prev_tab(v: &mut Viewer, _: Args, _: Event) {
    v.prev_tab();
}

fn close_tab_or_quit(v: &mut Viewer, _: Args, _: Event) {
    if !v.close_tab() {
        v.request_quit();
    }
}

fn close_window_or_quit(v: &mut Viewer, _: Args, _: Event) {
    v.request_quit();
}

fn quit(v: &mut Viewer, _: Args, _: Event) {
    v.request_quit();
}

fn new_window(v: &mut Viewer, _: Args, _: Event) {
    v.request(UiRequest::NewWindow {
        file: None,
        page: None,
    });
}

fn document_dir(v: &Viewer) -> Option<std::path::PathBuf> {
    v.document()
        .and_then(|d| d.path().parent())
        .map(|p| p.to_path_buf())
}

fn open(v: &mut Viewer, _: Args, _: Event) {
    let start_dir = document_dir(v);
    v.request(UiRequest::OpenFileDialog { start_dir });
}

fn save_as(v: &mut Viewer, _: Args, _: Event) {
    let start_dir = document_dir(v);
    v.request(UiRequest::SaveAsDialog { start_dir });
}

fn save_image(v: &mut Viewer, _: Args, _: Event) {
    v.request(UiRequest::SaveImageDialog);
}

fn print(v: &mut Viewer, _: Args, _: Event) {
    v.request(UiRequest::Print);
}

fn reload(v: &mut Viewer, _: Args, _: Event) {
    let Some(path) = v.document().map(|d| d.path().to_path_buf()) else {
        return;
    };
    match Document::load(&path) {
        Ok(document) => {
            let vp = v.viewport();
            let tab = v.tab_mut();
            let location = tab.location();
            tab.document = Some(document);
            tab.restore(location, vp);
        }
        Err(e) => {
            error!("Reload failed: {e:#}");
            v.request(UiRequest::Message {
                text: "Couldn't reload file".to_string(),
            });
        }
    }
}

// Find

fn find(v: &mut Viewer, _: Args, _: Event) {
    v.focus = Focus::FindBox;
}

fn find_first(v: &mut Viewer, _: Args, _: Event) {
    v.request(UiRequest::Find {
        direction: FindDirection::First,
    });
}

fn find_next(v: &mut Viewer, _: Args, _: Event) {
    v.request(UiRequest::Find {
        direction: FindDirection::Next,
    });
}

fn find_previous(v: &mut Viewer, _: Args, _: Event) {
    v.request(UiRequest::Find {
        direction: FindDirection::Previous,
    });
}

// Navigation

fn goto_page(v: &mut Viewer, args: Args, _: Event) {
    let Ok(page) = usize::try_from(atoi(&args[0])) else {
        return;
    };
    let vp = v.viewport();
    v.tab_mut().jump_to_page(page, vp);
}

fn goto_last_page(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    let tab = v.tab_mut();
    let last = tab.num_pages();
    tab.jump_to_page(last, vp);
}

fn goto_dest(v: &mut Viewer, args: Args, _: Event) {
    let Some(page) = v.document().and_then(|d| d.destination(&args[0])) else {
        warn!("Unknown destination '{}'", args[0]);
        return;
    };
    let vp = v.viewport();
    v.tab_mut().jump_to_page(page, vp);
}

fn go_backward(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    let tab = v.tab_mut();
    let current = tab.location();
    if let Some(location) = tab.history.jump_back(Some(current)) {
        tab.restore(location, vp);
    }
}

fn go_forward(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    let tab = v.tab_mut();
    if let Some(location) = tab.history.jump_forward() {
        tab.restore(location, vp);
    }
}

fn next_page(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    v.tab_mut().next_page(true, vp);
}

fn next_page_no_scroll(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    v.tab_mut().next_page(false, vp);
}

fn prev_page(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    v.tab_mut().prev_page(true, vp);
}

fn prev_page_no_scroll(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    v.tab_mut().prev_page(false, vp);
}

fn page_down(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    v.tab_mut().page_down(vp);
}

fn page_up(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    v.tab_mut().page_up(vp);
}

fn scroll(v: &mut Viewer, dx: i64, dy: i64) {
    let vp = v.viewport();
    let dx = v.scale_scroll(dx);
    let dy = v.scale_scroll(dy);
    v.tab_mut().scroll_by(dx, dy, vp);
}

fn scroll_down(v: &mut Viewer, args: Args, _: Event) {
    scroll(v, 0, atoi(&args[0]));
}

fn scroll_up(v: &mut Viewer, args: Args, _: Event) {
    scroll(v, 0, atoi(&args[0]).saturating_neg());
}

fn scroll_left(v: &mut Viewer, args: Args, _: Event) {
    scroll(v, atoi(&args[0]).saturating_neg(), 0);
}

fn scroll_right(v: &mut Viewer, args: Args, _: Event) {
    scroll(v, atoi(&args[0]), 0);
}

fn scroll_down_next_page(v: &mut Viewer, args: Args, _: Event) {
    let vp = v.viewport();
    let dy = v.scale_scroll(atoi(&args[0]));
    v.tab_mut().scroll_down_next_page(dy, vp);
}

fn scroll_up_prev_page(v: &mut Viewer, args: Args, _: Event) {
    let vp = v.viewport();
    let dy = v.scale_scroll(atoi(&args[0]));
    v.tab_mut().scroll_up_prev_page(dy, vp);
}

fn scroll_to_top_edge(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    v.tab_mut().scroll_to_top_edge(vp);
}

fn scroll_to_bottom_edge(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    v.tab_mut().scroll_to_bottom_edge(vp);
}

fn scroll_to_left_edge(v: &mut Viewer, _: Args, _: Event) {
    v.tab_mut().scroll_to_left_edge();
}

fn scroll_to_right_edge(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    v.tab_mut().scroll_to_right_edge(vp);
}

fn scroll_to_top_left(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    let tab = v.tab_mut();
    tab.scroll_to_top_edge(vp);
    tab.scroll_to_left_edge();
}

fn scroll_to_bottom_right(v: &mut Viewer, _: Args, _: Event) {
    let vp = v.viewport();
    let tab = v.tab_mut();
    tab.scroll_to_bottom_edge(vp);
    tab.scroll_to_right_edge(vp);
}

// Links

fn follow_link_with(
    v: &mut Viewer,
    event: Event,
    only_if_no_selection: bool,
    new_tab: bool,
    new_window: bool,
) {
    if only_if_no_selection && v.tab().selection.is_some() {
        return;
    }
    let (x, y) = pointer_of(v, event);
    let vp = v.viewport();
    let Some(target) = v.tab().link_at(x, y, vp).cloned() else {
        return;
    };

    let page = match target {
        LinkTarget::Uri(url) => {
            v.request(UiRequest::OpenUrl { url });
            return;
        }
        LinkTarget::Page(page) => page,
        LinkTarget::Dest(name) => match v.document().and_then(|d| d.destination(&name)) {
            Some(page) => page,
            None => {
                warn!("Link to unknown destination '{name}'");
                return;
            }
        },
    };

    if new_window {
        let file = v.document().map(|d| d.path().to_path_buf());
        v.request(UiRequest::NewWindow {
            file,
            page: Some(page),
        });
    } else if new_tab {
        let Some(document) = v.document().cloned() else {
            return;
        };
        let mut tab = Tab::with_document(document);
        tab.zoom = v.tab().zoom;
        tab.display_mode = v.tab().display_mode;
        tab.goto_page(page, true, vp);
        v.add_tab(tab);
    } else {
        v.tab_mut().jump_to_page(page, vp);
    }
}

fn follow_link(v: &mut Viewer, _: Args, event: Event) {
    follow_link_with(v, event, false, false, false);
}

fn follow_link_no_sel(v: &mut Viewer, _: Args, event: Event) {
    follow_link_with(v, event, true, false, false);
}

fn follow_link_in_new_tab(v: &mut Viewer, _: Args, event: Event) {
    follow_link_with(v, event, false, true, false);
}

fn follow_link_in_new_tab_no_sel(v: &mut Viewer, _: Args, event: Event) {
    follow_link_with(v, event, true, true, false);
}

fn follow_link_in_new_win(v: &mut Viewer, _: Args, event: Event) {
    follow_link_with(v, event, false, false, true);
}

fn follow_link_in_new_win_no_sel(v: &mut Viewer, _: Args, event: Event) {
    follow_link_with(v, event, true, false, true);
}

// Display modes, rotation, zoom

fn set_display_mode(v: &mut Viewer, mode: DisplayMode) {
    let vp = v.viewport();
    v.tab_mut().set_display_mode(mode, vp);
}

fn single_page_mode(v: &mut Viewer, _: Args, _: Event) {
    set_display_mode(v, DisplayMode::Single);
}

fn continuous_mode(v: &mut Viewer, _: Args, _: Event) {
    set_display_mode(v, DisplayMode::Continuous);
}

fn side_by_side_single_mode(v: &mut Viewer, _: Args, _: Event) {
    set_display_mode(v, DisplayMode::SideBySideSingle);
}

fn side_by_side_continuous_mode(v: &mut Viewer, _: Args, _: Event) {
    set_display_mode(v, DisplayMode::SideBySideContinuous);
}

fn horizontal_continuous_mode(v: &mut Viewer, _: Args, _: Event) {
    set_display_mode(v, DisplayMode::HorizontalContinuous);
}

/// Single page goes to continuous; every other mode goes to single page.
fn toggle_continuous_mode(v: &mut Viewer, _: Args, _: Event) {
    let mode = if v.tab().display_mode == DisplayMode::Single {
        DisplayMode::Continuous
    } else {
        DisplayMode::Single
    };
    set_display_mode(v, mode);
}

fn rotate_by(v: &mut Viewer, degrees: u16) {
    let vp = v.viewport();
    let tab = v.tab_mut();
    let rotate = (tab.rotate + degrees) % 360;
    tab.set_rotate(rotate, vp);
}

fn rotate_cw(v: &mut Viewer, _: Args, _: Event) {
    rotate_by(v, 90);
}

fn rotate_ccw(v: &mut Viewer, _: Args, _: Event) {
    rotate_by(v, 270);
}

fn set_zoom(v: &mut Viewer, zoom: Zoom) {
    let vp = v.viewport();
    v.tab_mut().set_zoom(zoom, vp);
}

fn zoom_fit_page(v: &mut Viewer, _: Args, _: Event) {
    set_zoom(v, Zoom::FitPage);
}

fn zoom_fit_width(v: &mut Viewer, _: Args, _: Event) {
    set_zoom(v, Zoom::FitWidth);
}

/// Rounds to the nearest whole percent and caps at the configured maximum.
fn zoom_percent(v: &mut Viewer, args: Args, _: Event) {
    let z = (atof(&args[0]) + 0.5).floor();
    let z = z.clamp(1.0, f64::from(v.max_zoom())) as u32;
    set_zoom(v, Zoom::Percent(z));
}

fn zoom_in(v: &mut Viewer, _: Args, _: Event) {
    let current = v.tab().zoom_percent(v.viewport());
    if let Some(step) = ZOOM_STEPS.iter().find(|z| f64::from(**z) > current) {
        set_zoom(v, Zoom::Percent(*step));
    }
}

fn zoom_out(v: &mut Viewer, _: Args, _: Event) {
    let current = v.tab().zoom_percent(v.viewport());
    if let Some(step) = ZOOM_STEPS.iter().rev().find(|z| f64::from(**z) < current) {
        set_zoom(v, Zoom::Percent(*step));
    }
}

// External programs

fn run(v: &mut Viewer, args: Args, event: Event) {
    let vp = v.viewport();
    let (x, y) = pointer_of(v, event);
    let tab = v.tab();
    let link_info = match (tab.document.as_ref(), tab.hover_link.as_ref()) {
        (Some(doc), Some(link)) => Some(doc.link_info(link)),
        _ => None,
    };
    let ctx = RunContext {
        file: tab.document.as_ref().map(Document::path),
        link_info,
        mid_page: tab.mid_page(vp),
        selection: tab.selection,
        mouse: tab.window_to_page(x, y, vp).unwrap_or((0, 0.0, 0.0)),
    };
    let command_line = run_command::expand(&args[0], &ctx);
    if let Err(e) = v.executor().spawn_detached(&command_line) {
        error!("run({}): {e:#}", args[0]);
    }
}
