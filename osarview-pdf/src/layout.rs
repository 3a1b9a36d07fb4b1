//! Backend-neutral page layout.
//!
//! Documents are laid out as a sequence of A4 pages holding absolute draw
//! operations, with coordinates in millimetres from the top-left corner.
//! [`PageBuilder`] is the explicit pagination accumulator: it owns the page
//! list and a single vertical cursor, and every emitted block advances the
//! cursor. The sole pagination rule is [`PageBuilder::ensure_room`] — any
//! block that would cross the bottom margin starts a new page and resets the
//! cursor to the top margin. Rendering (printpdf) happens separately in
//! [`crate::render`], which keeps pagination testable without a PDF backend.

/// A4 page width in millimetres.
pub const PAGE_WIDTH_MM: f64 = 210.0;
/// A4 page height in millimetres.
pub const PAGE_HEIGHT_MM: f64 = 297.0;
/// Cursor position at the top of a fresh page.
pub const TOP_MARGIN_Y: f64 = 20.0;
/// Safe bottom margin; no block may start past this line.
pub const PAGE_BOTTOM_Y: f64 = 287.0;
/// Left content margin.
pub const LEFT_MARGIN: f64 = 10.0;
/// Right content edge (separator rules run from left margin to here).
pub const RIGHT_EDGE: f64 = 200.0;
/// Vertical advance of one emitted line.
pub const LINE_HEIGHT: f64 = 8.0;
/// Horizontal centre of the page.
pub const CENTER_X: f64 = PAGE_WIDTH_MM / 2.0;

/// Points to millimetres.
pub const PT_TO_MM: f64 = 0.352_778;

/// Rough text width estimate for builtin (non-measurable) fonts; average
/// glyph width is taken as half the font size.
pub fn approx_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.5 * PT_TO_MM
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    /// Forest green used for the title and table header fill.
    pub const TITLE_GREEN: Color = Color { r: 34, g: 139, b: 34 };
    pub const LINK_BLUE: Color = Color { r: 0, g: 0, b: 255 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One absolute draw operation. `y` is measured from the page top.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f64,
        y: f64,
        size: f64,
        style: FontStyle,
        color: Color,
        align: Align,
        text: String,
    },
    /// Clickable text; rendered in link blue with a URI annotation.
    Link {
        x: f64,
        y: f64,
        size: f64,
        text: String,
        url: String,
    },
    /// Horizontal or arbitrary rule.
    Rule {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        thickness: f64,
    },
    /// Filled rectangle; `y` is the top edge.
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Color,
    },
    /// PNG image; `y` is the top edge. Undecodable bytes are skipped at
    /// render time, never fatal.
    Image {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        png: Vec<u8>,
    },
}

/// One laid-out page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// All text content on the page (plain and linked), in emission order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } | DrawOp::Link { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn push_op(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

/// A laid-out multi-page document.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDocument {
    pub title: String,
    pub pages: Vec<Page>,
}

/// Pagination accumulator: current page plus a single vertical cursor.
#[derive(Debug)]
pub struct PageBuilder {
    pages: Vec<Page>,
    y: f64,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: TOP_MARGIN_Y,
        }
    }

    /// Current vertical cursor, from the page top.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Place the cursor at an absolute vertical position on the current page.
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Advance the cursor without emitting anything.
    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Emit a draw operation onto the current page.
    pub fn push(&mut self, op: DrawOp) {
        // The builder always holds at least one page.
        if let Some(page) = self.pages.last_mut() {
            page.push_op(op);
        }
    }

    /// Start a fresh page and reset the cursor to the top margin.
    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = TOP_MARGIN_Y;
    }

    /// Start a new page if a block of `needed` height would cross the bottom
    /// margin. Returns whether a page break happened.
    pub fn ensure_room(&mut self, needed: f64) -> bool {
        if self.y + needed > PAGE_BOTTOM_Y {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Emit a separator rule across the content width at the cursor.
    pub fn rule(&mut self, thickness: f64) {
        self.push(DrawOp::Rule {
            x1: LEFT_MARGIN,
            y1: self.y,
            x2: RIGHT_EDGE,
            y2: self.y,
            thickness,
        });
    }

    pub fn finish(self, title: impl Into<String>) -> LayoutDocument {
        LayoutDocument {
            title: title.into(),
            pages: self.pages,
        }
    }
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_starts_at_top_margin() {
        let b = PageBuilder::new();
        assert_eq!(b.y(), TOP_MARGIN_Y);
        assert_eq!(b.page_count(), 1);
        assert_eq!(b.page_index(), 0);
    }

    #[test]
    fn test_ensure_room_breaks_only_when_block_crosses_bottom() {
        let mut b = PageBuilder::new();
        b.set_y(280.0);
        assert!(!b.ensure_room(7.0)); // 287.0 is still inside the margin
        assert_eq!(b.page_count(), 1);

        assert!(b.ensure_room(8.0)); // 288.0 crosses it
        assert_eq!(b.page_count(), 2);
        assert_eq!(b.y(), TOP_MARGIN_Y);
    }

    #[test]
    fn test_ops_land_on_current_page() {
        let mut b = PageBuilder::new();
        b.push(DrawOp::Text {
            x: LEFT_MARGIN,
            y: b.y(),
            size: 12.0,
            style: FontStyle::Regular,
            color: Color::BLACK,
            align: Align::Left,
            text: "first".to_string(),
        });
        b.new_page();
        b.push(DrawOp::Text {
            x: LEFT_MARGIN,
            y: b.y(),
            size: 12.0,
            style: FontStyle::Regular,
            color: Color::BLACK,
            align: Align::Left,
            text: "second".to_string(),
        });

        let doc = b.finish("t");
        assert_eq!(doc.pages[0].texts(), vec!["first"]);
        assert_eq!(doc.pages[1].texts(), vec!["second"]);
    }

    #[test]
    fn test_approx_text_width_scales_with_length_and_size() {
        let narrow = approx_text_width("ab", 10.0);
        let wide = approx_text_width("abcd", 10.0);
        assert!((wide - 2.0 * narrow).abs() < 1e-9);
        assert!(approx_text_width("ab", 20.0) > narrow);
    }
}
