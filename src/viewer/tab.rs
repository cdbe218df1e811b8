//! Per-tab view state: which page is shown, where it is scrolled to, how
//! it is zoomed and laid out.
//!
//! All positions are integer device pixels. At 100% zoom one PDF point is
//! one pixel. Pages are laid out in rows of [`DisplayMode::pages_across`]
//! pages; continuous modes stack rows with no gap, single-page modes show
//! one row at a time.

use serde::Serialize;

use super::document::{Document, LinkTarget};
use crate::jump_list::{JumpList, PageLocation};

pub const ZOOM_STEPS: [u32; 13] = [25, 50, 75, 100, 110, 125, 150, 175, 200, 300, 400, 600, 800];
pub const DEFAULT_ZOOM: u32 = 125;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Zoom {
    Percent(u32),
    FitPage,
    FitWidth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Single,
    Continuous,
    SideBySideSingle,
    SideBySideContinuous,
    HorizontalContinuous,
}

impl DisplayMode {
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            DisplayMode::Continuous
                | DisplayMode::SideBySideContinuous
                | DisplayMode::HorizontalContinuous
        )
    }

    pub fn pages_across(self) -> usize {
        match self {
            DisplayMode::SideBySideSingle | DisplayMode::SideBySideContinuous => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    Linear,
    Block,
}

/// A selected rectangle in PDF user space, normalized so `x0 <= x1` and
/// `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Selection {
    pub page: usize,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Selection {
    pub fn new(page: usize, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            page,
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }
}

/// Size of the document area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PanAnchor {
    x: i32,
    y: i32,
    scroll_x: i64,
    abs_y: i64,
}

pub struct Tab {
    pub document: Option<Document>,
    pub page: usize,
    pub scroll_x: i64,
    /// Offset of the window top from the top of the current page's row.
    pub scroll_y: i64,
    pub zoom: Zoom,
    pub rotate: u16,
    pub display_mode: DisplayMode,
    pub select_mode: SelectMode,
    pub selection: Option<Selection>,
    pub hover_link: Option<LinkTarget>,
    pub outline_scroll: u32,
    pub history: JumpList,
    pan_anchor: Option<PanAnchor>,
    selection_anchor: Option<(i32, i32)>,
}

impl Default for Tab {
    fn default() -> Self {
        Self {
            document: None,
            page: 1,
            scroll_x: 0,
            scroll_y: 0,
            zoom: Zoom::Percent(DEFAULT_ZOOM),
            rotate: 0,
            display_mode: DisplayMode::Continuous,
            select_mode: SelectMode::Linear,
            selection: None,
            hover_link: None,
            outline_scroll: 0,
            history: JumpList::default(),
            pan_anchor: None,
            selection_anchor: None,
        }
    }
}

impl Tab {
    pub fn with_document(document: Document) -> Self {
        Self {
            document: Some(document),
            ..Self::default()
        }
    }

    /// Replace the document, keeping the view settings.
    pub fn set_document(&mut self, document: Document) {
        self.document = Some(document);
        self.page = 1;
        self.scroll_x = 0;
        self.scroll_y = 0;
        self.selection = None;
        self.hover_link = None;
        self.history.clear();
    }

    pub fn num_pages(&self) -> usize {
        self.document.as_ref().map_or(0, Document::num_pages)
    }

    /// Page size in points after rotation.
    fn page_size_pts(&self) -> (f64, f64) {
        let (w, h) = self
            .document
            .as_ref()
            .map_or(super::document::DEFAULT_PAGE_SIZE, Document::page_size);
        if self.rotate % 180 == 90 { (h, w) } else { (w, h) }
    }

    fn across(&self) -> usize {
        self.display_mode.pages_across()
    }

    pub fn zoom_percent(&self, vp: Viewport) -> f64 {
        let (w, h) = self.page_size_pts();
        let row_w = w * self.across() as f64;
        match self.zoom {
            Zoom::Percent(z) => f64::from(z),
            Zoom::FitWidth => vp.width as f64 / row_w * 100.0,
            Zoom::FitPage => (vp.width as f64 / row_w).min(vp.height as f64 / h) * 100.0,
        }
    }

    fn scale(&self, vp: Viewport) -> f64 {
        self.zoom_percent(vp) / 100.0
    }

    /// One page in pixels, never smaller than 1x1.
    fn page_px(&self, vp: Viewport) -> (i64, i64) {
        let (w, h) = self.page_size_pts();
        let s = self.scale(vp);
        (((w * s).round() as i64).max(1), ((h * s).round() as i64).max(1))
    }

    fn num_rows(&self) -> i64 {
        self.num_pages().div_ceil(self.across()) as i64
    }

    fn row_of(&self, page: usize) -> i64 {
        ((page.max(1) - 1) / self.across()) as i64
    }

    /// First page of the row holding `page`.
    fn row_start(&self, page: usize) -> usize {
        self.row_of(page) as usize * self.across() + 1
    }

    fn max_scroll_x(&self, vp: Viewport) -> i64 {
        let (pw, _) = self.page_px(vp);
        (pw * self.across() as i64 - vp.width).max(0)
    }

    /// Largest `scroll_y` within a single row.
    fn max_scroll_y(&self, vp: Viewport) -> i64 {
        let (_, ph) = self.page_px(vp);
        (ph - vp.height).max(0)
    }

    fn abs_y(&self, vp: Viewport) -> i64 {
        let (_, ph) = self.page_px(vp);
        self.row_of(self.page) * ph + self.scroll_y
    }

    fn set_abs_y(&mut self, y: i64, vp: Viewport) {
        let (_, ph) = self.page_px(vp);
        let max = (self.num_rows() * ph - vp.height).max(0);
        let y = y.clamp(0, max);
        let row = (y / ph).min((self.num_rows() - 1).max(0));
        self.page = row as usize * self.across() + 1;
        self.scroll_y = y - row * ph;
    }

    fn at_bottom(&self, vp: Viewport) -> bool {
        self.scroll_y >= self.max_scroll_y(vp)
    }

    pub fn location(&self) -> PageLocation {
        PageLocation::new(self.page, self.scroll_y)
    }

    pub fn restore(&mut self, location: PageLocation, vp: Viewport) {
        self.goto_page(location.page, true, vp);
        self.scroll_y = location.scroll_y.clamp(0, self.max_scroll_y(vp));
    }

    /// Show `page`, scrolled to its top when `top` is set. Side-by-side
    /// modes snap to the first page of the row.
    pub fn goto_page(&mut self, page: usize, top: bool, vp: Viewport) {
        let n = self.num_pages();
        if n == 0 {
            return;
        }
        self.page = self.row_start(page.clamp(1, n));
        if top {
            self.scroll_y = 0;
        } else {
            self.scroll_y = self.scroll_y.clamp(0, self.max_scroll_y(vp));
        }
    }

    /// Jump to `page`, remembering where we came from.
    pub fn jump_to_page(&mut self, page: usize, vp: Viewport) {
        if page == 0 || page > self.num_pages() {
            return;
        }
        self.history.push(self.location());
        self.goto_page(page, true, vp);
    }

    pub fn next_page(&mut self, top: bool, vp: Viewport) {
        let next = self.row_start(self.page) + self.across();
        if next <= self.num_pages() {
            self.goto_page(next, top, vp);
        }
    }

    pub fn prev_page(&mut self, top: bool, vp: Viewport) {
        let start = self.row_start(self.page);
        if start > 1 {
            self.goto_page(start.saturating_sub(self.across()).max(1), top, vp);
        }
    }

    pub fn scroll_by(&mut self, dx: i64, dy: i64, vp: Viewport) {
        self.scroll_x = self.scroll_x.saturating_add(dx).clamp(0, self.max_scroll_x(vp));
        if self.display_mode.is_continuous() {
            let y = self.abs_y(vp).saturating_add(dy);
            self.set_abs_y(y, vp);
        } else {
            self.scroll_y = self.scroll_y.saturating_add(dy).clamp(0, self.max_scroll_y(vp));
        }
    }

    pub fn scroll_down_next_page(&mut self, dy: i64, vp: Viewport) {
        if !self.display_mode.is_continuous() && self.at_bottom(vp) {
            self.next_page(true, vp);
        } else {
            self.scroll_by(0, dy, vp);
        }
    }

    pub fn scroll_up_prev_page(&mut self, dy: i64, vp: Viewport) {
        if !self.display_mode.is_continuous() && self.scroll_y <= 0 {
            if self.row_start(self.page) > 1 {
                self.prev_page(true, vp);
                self.scroll_y = self.max_scroll_y(vp);
            }
        } else {
            self.scroll_by(0, dy.saturating_neg(), vp);
        }
    }

    pub fn page_down(&mut self, vp: Viewport) {
        self.scroll_down_next_page(vp.height, vp);
    }

    pub fn page_up(&mut self, vp: Viewport) {
        self.scroll_up_prev_page(vp.height, vp);
    }

    pub fn scroll_to_top_edge(&mut self, vp: Viewport) {
        if self.display_mode.is_continuous() {
            let (_, ph) = self.page_px(vp);
            self.set_abs_y(self.row_of(self.page) * ph, vp);
        } else {
            self.scroll_y = 0;
        }
    }

    pub fn scroll_to_bottom_edge(&mut self, vp: Viewport) {
        if self.display_mode.is_continuous() {
            let (_, ph) = self.page_px(vp);
            self.set_abs_y((self.row_of(self.page) + 1) * ph - vp.height, vp);
        } else {
            self.scroll_y = self.max_scroll_y(vp);
        }
    }

    pub fn scroll_to_left_edge(&mut self) {
        self.scroll_x = 0;
    }

    pub fn scroll_to_right_edge(&mut self, vp: Viewport) {
        self.scroll_x = self.max_scroll_x(vp);
    }

    /// Page under the vertical middle of the window.
    pub fn mid_page(&self, vp: Viewport) -> usize {
        if self.num_pages() == 0 {
            return 0;
        }
        if !self.display_mode.is_continuous() {
            return self.page;
        }
        let (_, ph) = self.page_px(vp);
        let row = ((self.abs_y(vp) + vp.height / 2) / ph).min(self.num_rows() - 1);
        row as usize * self.across() + 1
    }

    /// Convert a window position to a page number and PDF user-space
    /// coordinates (origin bottom-left). Rotation is not applied.
    pub fn window_to_page(&self, x: i32, y: i32, vp: Viewport) -> Option<(usize, f64, f64)> {
        if self.num_pages() == 0 || x < 0 || y < 0 {
            return None;
        }
        let (pw, ph) = self.page_px(vp);
        let doc_x = i64::from(x) + self.scroll_x;
        let column = doc_x / pw;
        if column >= self.across() as i64 {
            return None;
        }
        let (row, in_page_y) = if self.display_mode.is_continuous() {
            let doc_y = self.abs_y(vp) + i64::from(y);
            (doc_y / ph, doc_y % ph)
        } else {
            let in_page_y = self.scroll_y + i64::from(y);
            if in_page_y >= ph {
                return None;
            }
            (self.row_of(self.page), in_page_y)
        };
        let page = row as usize * self.across() + column as usize + 1;
        if page > self.num_pages() {
            return None;
        }
        let s = self.scale(vp);
        let (_, page_h) = self.page_size_pts();
        let pdf_x = (doc_x - column * pw) as f64 / s;
        let pdf_y = page_h - in_page_y as f64 / s;
        Some((page, pdf_x, pdf_y))
    }

    pub fn link_at(&self, x: i32, y: i32, vp: Viewport) -> Option<&LinkTarget> {
        let (page, px, py) = self.window_to_page(x, y, vp)?;
        self.document
            .as_ref()?
            .link_at(page, px, py)
            .map(|link| &link.target)
    }

    pub fn start_selection(&mut self, x: i32, y: i32) {
        self.selection_anchor = Some((x, y));
    }

    /// Finish a drag started by [`Tab::start_selection`]. A drag that does
    /// not span a non-empty rectangle on one page clears the selection.
    pub fn end_selection(&mut self, x: i32, y: i32, vp: Viewport) {
        let Some((ax, ay)) = self.selection_anchor.take() else {
            return;
        };
        let start = self.window_to_page(ax, ay, vp);
        let end = self.window_to_page(x, y, vp);
        self.selection = match (start, end) {
            (Some((p0, x0, y0)), Some((p1, x1, y1))) if p0 == p1 => {
                Some(Selection::new(p0, x0, y0, x1, y1)).filter(|s| !s.is_empty())
            }
            _ => None,
        };
    }

    pub fn set_selection(&mut self, selection: Selection) {
        if selection.page >= 1 && selection.page <= self.num_pages() {
            self.selection = Some(selection).filter(|s| !s.is_empty());
        }
    }

    pub fn start_pan(&mut self, x: i32, y: i32, vp: Viewport) {
        self.pan_anchor = Some(PanAnchor {
            x,
            y,
            scroll_x: self.scroll_x,
            abs_y: self.abs_y(vp),
        });
    }

    /// Move the view so the point grabbed by [`Tab::start_pan`] follows
    /// the pointer.
    pub fn end_pan(&mut self, x: i32, y: i32, vp: Viewport) {
        let Some(anchor) = self.pan_anchor.take() else {
            return;
        };
        let dx = i64::from(anchor.x) - i64::from(x);
        let dy = i64::from(anchor.y) - i64::from(y);
        self.scroll_x = anchor.scroll_x.saturating_add(dx).clamp(0, self.max_scroll_x(vp));
        if self.display_mode.is_continuous() {
            self.set_abs_y(anchor.abs_y.saturating_add(dy), vp);
        } else {
            self.scroll_y = self.scroll_y.saturating_add(dy).clamp(0, self.max_scroll_y(vp));
        }
    }

    pub fn set_zoom(&mut self, zoom: Zoom, vp: Viewport) {
        self.zoom = zoom;
        self.clamp_scroll(vp);
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode, vp: Viewport) {
        self.display_mode = mode;
        self.goto_page(self.page, false, vp);
        self.clamp_scroll(vp);
    }

    pub fn set_rotate(&mut self, rotate: u16, vp: Viewport) {
        self.rotate = rotate % 360;
        self.clamp_scroll(vp);
    }

    fn clamp_scroll(&mut self, vp: Viewport) {
        self.scroll_x = self.scroll_x.clamp(0, self.max_scroll_x(vp));
        if self.display_mode.is_continuous() {
            let y = self.abs_y(vp);
            self.set_abs_y(y, vp);
        } else {
            self.scroll_y = self.scroll_y.clamp(0, self.max_scroll_y(vp));
        }
    }

    /// Zoom so the selection fills the window, capped at `max_zoom`, and
    /// scroll to its top-left corner.
    pub fn zoom_to_selection(&mut self, max_zoom: u32, vp: Viewport) {
        let Some(sel) = self.selection else {
            return;
        };
        let rx = vp.width as f64 / (sel.x1 - sel.x0);
        let ry = vp.height as f64 / (sel.y1 - sel.y0);
        // f64::max drops a NaN ratio from infinite coordinates
        let z = (rx.min(ry) * 100.0).floor().max(1.0).min(f64::from(max_zoom.max(1))) as u32;
        self.zoom = Zoom::Percent(z);
        self.goto_page(sel.page, true, vp);

        let s = f64::from(z) / 100.0;
        let (pw, _) = self.page_px(vp);
        let (_, page_h) = self.page_size_pts();
        let column = ((sel.page - 1) % self.across()) as i64;
        let x = (column * pw).saturating_add((sel.x0 * s).round() as i64);
        let y = ((page_h - sel.y1) * s).round() as i64;
        self.scroll_x = x.clamp(0, self.max_scroll_x(vp));
        if self.display_mode.is_continuous() {
            let row_top = self.abs_y(vp);
            self.set_abs_y(row_top.saturating_add(y), vp);
        } else {
            self.scroll_y = y.clamp(0, self.max_scroll_y(vp));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    /// 10 pages of 100x200 points, shown at 100%.
    fn tab(mode: DisplayMode) -> Tab {
        let mut tab = Tab::with_document(Document::new("t.pdf", 10).with_page_size(100.0, 200.0));
        tab.zoom = Zoom::Percent(100);
        tab.display_mode = mode;
        tab
    }

    fn tall_tab(mode: DisplayMode) -> Tab {
        let mut tab = Tab::with_document(Document::new("t.pdf", 10).with_page_size(1000.0, 1000.0));
        tab.zoom = Zoom::Percent(100);
        tab.display_mode = mode;
        tab
    }

    #[test]
    fn display_mode_classes() {
        assert!(DisplayMode::Continuous.is_continuous());
        assert!(DisplayMode::SideBySideContinuous.is_continuous());
        assert!(DisplayMode::HorizontalContinuous.is_continuous());
        assert!(!DisplayMode::Single.is_continuous());
        assert!(!DisplayMode::SideBySideSingle.is_continuous());
    }

    #[test]
    fn goto_page_clamps_and_snaps_rows() {
        let mut t = tab(DisplayMode::Single);
        t.goto_page(99, true, VP);
        assert_eq!(t.page, 10);

        let mut t = tab(DisplayMode::SideBySideSingle);
        t.goto_page(4, true, VP);
        assert_eq!(t.page, 3);
        t.next_page(true, VP);
        assert_eq!(t.page, 5);
        t.prev_page(true, VP);
        assert_eq!(t.page, 3);
    }

    #[test]
    fn next_and_prev_stop_at_the_ends() {
        let mut t = tab(DisplayMode::Single);
        t.prev_page(true, VP);
        assert_eq!(t.page, 1);
        t.goto_page(10, true, VP);
        t.next_page(true, VP);
        assert_eq!(t.page, 10);
    }

    #[test]
    fn continuous_scroll_crosses_pages() {
        let mut t = tab(DisplayMode::Continuous);
        t.scroll_by(0, 450, VP);
        assert_eq!((t.page, t.scroll_y), (3, 50));
        t.scroll_by(0, -100, VP);
        assert_eq!((t.page, t.scroll_y), (2, 150));
        t.scroll_by(0, 100_000, VP);
        // 2000px of pages, 600px window
        assert_eq!(t.abs_y(VP), 1400);
    }

    #[test]
    fn single_page_scroll_stays_in_page_until_edge() {
        let mut t = tall_tab(DisplayMode::Single);
        t.scroll_down_next_page(300, VP);
        assert_eq!((t.page, t.scroll_y), (1, 300));
        t.scroll_down_next_page(300, VP);
        assert_eq!((t.page, t.scroll_y), (1, 400));
        t.scroll_down_next_page(300, VP);
        assert_eq!((t.page, t.scroll_y), (2, 0));
        t.scroll_up_prev_page(300, VP);
        assert_eq!((t.page, t.scroll_y), (1, 400));
    }

    #[test]
    fn page_down_then_up() {
        let mut t = tall_tab(DisplayMode::Single);
        t.page_down(VP);
        assert_eq!((t.page, t.scroll_y), (1, 400));
        t.page_down(VP);
        assert_eq!((t.page, t.scroll_y), (2, 0));
        t.page_up(VP);
        assert_eq!((t.page, t.scroll_y), (1, 400));
        t.page_up(VP);
        assert_eq!((t.page, t.scroll_y), (1, 0));
    }

    #[test]
    fn edges() {
        let mut t = tall_tab(DisplayMode::Single);
        t.scroll_to_bottom_edge(VP);
        t.scroll_to_right_edge(VP);
        assert_eq!((t.scroll_x, t.scroll_y), (200, 400));
        t.scroll_to_top_edge(VP);
        t.scroll_to_left_edge();
        assert_eq!((t.scroll_x, t.scroll_y), (0, 0));

        let mut t = tall_tab(DisplayMode::Continuous);
        t.goto_page(3, true, VP);
        t.scroll_to_bottom_edge(VP);
        assert_eq!((t.page, t.scroll_y), (3, 400));
        t.scroll_to_top_edge(VP);
        assert_eq!((t.page, t.scroll_y), (3, 0));
    }

    #[test]
    fn fit_zoom_uses_viewport() {
        let mut t = tab(DisplayMode::Single);
        t.zoom = Zoom::FitWidth;
        assert_eq!(t.zoom_percent(VP), 800.0);
        t.zoom = Zoom::FitPage;
        assert_eq!(t.zoom_percent(VP), 300.0);
        t.rotate = 90;
        assert_eq!(t.zoom_percent(VP), 400.0);
    }

    #[test]
    fn window_coordinates_map_to_pdf_space() {
        let t = tab(DisplayMode::Continuous);
        assert_eq!(t.window_to_page(10, 20, VP), Some((1, 10.0, 180.0)));
        assert_eq!(t.window_to_page(10, 220, VP), Some((2, 10.0, 180.0)));
        assert_eq!(t.window_to_page(150, 20, VP), None);

        let t = tab(DisplayMode::Single);
        assert_eq!(t.window_to_page(10, 250, VP), None);
    }

    #[test]
    fn drag_selects_and_click_clears() {
        let mut t = tab(DisplayMode::Single);
        t.start_selection(10, 20);
        t.end_selection(60, 120, VP);
        assert_eq!(t.selection, Some(Selection::new(1, 10.0, 80.0, 60.0, 180.0)));

        t.start_selection(30, 30);
        t.end_selection(30, 30, VP);
        assert_eq!(t.selection, None);
    }

    #[test]
    fn pan_moves_against_the_drag() {
        let mut t = tall_tab(DisplayMode::Single);
        t.start_pan(300, 300, VP);
        t.end_pan(250, 200, VP);
        assert_eq!((t.scroll_x, t.scroll_y), (50, 100));
    }

    #[test]
    fn pan_to_extreme_pointer_positions_clamps() {
        for mode in [DisplayMode::Single, DisplayMode::Continuous] {
            let mut t = tall_tab(mode);
            t.start_pan(i32::MAX, i32::MAX, VP);
            t.end_pan(i32::MIN, i32::MIN, VP);
            assert_eq!(t.scroll_x, t.max_scroll_x(VP));

            t.start_pan(i32::MIN, i32::MIN, VP);
            t.end_pan(i32::MAX, i32::MAX, VP);
            assert_eq!((t.scroll_x, t.scroll_y, t.page), (0, 0, 1));
        }
    }

    #[test]
    fn scroll_by_saturates_at_the_extremes() {
        for mode in [DisplayMode::Single, DisplayMode::Continuous] {
            let mut t = tall_tab(mode);
            t.scroll_by(50, 50, VP);
            t.scroll_by(i64::MAX, i64::MAX, VP);
            assert_eq!(t.scroll_x, t.max_scroll_x(VP));
            t.scroll_by(i64::MIN, i64::MIN, VP);
            assert_eq!((t.scroll_x, t.scroll_y, t.page), (0, 0, 1));
            t.scroll_up_prev_page(i64::MIN, VP);
            assert!(t.scroll_y >= 0);
        }
    }

    #[test]
    fn zoom_to_selection_fills_window() {
        let mut t = tab(DisplayMode::Single);
        t.set_selection(Selection::new(4, 0.0, 100.0, 50.0, 200.0));
        t.zoom_to_selection(2000, VP);
        assert_eq!(t.zoom, Zoom::Percent(600));
        assert_eq!(t.page, 4);

        t.set_selection(Selection::new(4, 0.0, 199.0, 1.0, 200.0));
        t.zoom_to_selection(2000, VP);
        assert_eq!(t.zoom, Zoom::Percent(2000));
    }

    #[test]
    fn history_round_trip() {
        let mut t = tab(DisplayMode::Single);
        t.jump_to_page(5, VP);
        assert_eq!(t.page, 5);
        let back = t.history.jump_back(Some(t.location())).unwrap();
        t.restore(back, VP);
        assert_eq!(t.page, 1);
        let fwd = t.history.jump_forward().unwrap();
        t.restore(fwd, VP);
        assert_eq!(t.page, 5);
    }
}
