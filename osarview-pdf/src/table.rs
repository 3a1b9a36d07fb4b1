//! Generic tabular layout over [`PageBuilder`].
//!
//! Fixed-width columns, a filled header row, and word wrapping inside cells.
//! When a table spans several pages, the column header row is redrawn on
//! every continuation page and a caller-supplied continuation heading is
//! drawn only on pages strictly after the table's starting page — never on
//! the page the table begins on. Rows taller than the remaining page space
//! are split across the break line by line, so no wrapped content is ever
//! drawn past the bottom margin.

use crate::layout::{
    Align, Color, DrawOp, FontStyle, LEFT_MARGIN, PAGE_BOTTOM_Y, PT_TO_MM, PageBuilder,
};

/// Vertical position of the continuation heading on overflow pages.
const CONTINUATION_HEADING_Y: f64 = 18.0;
/// Vertical position of the rule under the continuation heading.
const CONTINUATION_RULE_Y: f64 = 22.0;
/// Cursor position where table content resumes under a continuation heading.
const CONTINUATION_CONTENT_Y: f64 = 28.0;

/// A table column: header text and width in millimetres.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub width: f64,
}

impl Column {
    pub fn new(header: impl Into<String>, width: f64) -> Self {
        Self {
            header: header.into(),
            width,
        }
    }
}

/// Table typography and colors.
#[derive(Debug, Clone)]
pub struct TableStyle {
    pub font_size: f64,
    pub cell_padding: f64,
    pub header_fill: Color,
    pub header_text: Color,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            cell_padding: 3.0,
            header_fill: Color::TITLE_GREEN,
            header_text: Color::WHITE,
        }
    }
}

/// One table cell; linked cells render their text as a URI annotation.
#[derive(Debug, Clone)]
pub struct Cell {
    pub text: String,
    pub url: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
        }
    }

    pub fn linked(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
        }
    }
}

/// Lay a table out onto the builder, paginating rows as needed.
///
/// `continuation_heading` is drawn (with a rule) at the top of every page the
/// table overflows onto.
pub fn draw_table(
    b: &mut PageBuilder,
    columns: &[Column],
    rows: &[Vec<Cell>],
    style: &TableStyle,
    continuation_heading: &str,
) {
    let line_h = style.font_size * PT_TO_MM * 1.3;
    let header_h = 2.0 * style.cell_padding + line_h;

    // The header never sits alone at the bottom: keep room for it plus one
    // one-line row. A break here moves the whole table, so it is a plain page
    // break without the continuation heading.
    b.ensure_room(header_h + 2.0 * style.cell_padding + line_h);
    draw_header_row(b, columns, style, header_h, line_h);

    for row in rows {
        let wrapped: Vec<Vec<String>> = columns
            .iter()
            .zip(row)
            .map(|(col, cell)| wrap_cell(&cell.text, col.width, style))
            .collect();
        let total_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);

        // Emit the row in line slices, breaking mid-row when the remaining
        // page space holds fewer lines than the row needs.
        let mut offset = 0;
        while offset < total_lines {
            let available = PAGE_BOTTOM_Y - b.y() - 2.0 * style.cell_padding;
            let fit = (available / line_h).floor() as usize;
            if fit == 0 {
                continuation_break(b, columns, style, header_h, line_h, continuation_heading);
                continue;
            }
            let take = fit.min(total_lines - offset);
            draw_row_slice(b, columns, row, &wrapped, style, line_h, offset, take);
            b.advance(2.0 * style.cell_padding + take as f64 * line_h);
            offset += take;
            if offset < total_lines {
                continuation_break(b, columns, style, header_h, line_h, continuation_heading);
            }
        }

        // Thin rule under each row.
        b.push(DrawOp::Rule {
            x1: LEFT_MARGIN,
            y1: b.y(),
            x2: LEFT_MARGIN + total_width(columns),
            y2: b.y(),
            thickness: 0.2,
        });
    }
}

/// Continuation heading, separator rule, and a fresh header row at the top of
/// an overflow page.
fn continuation_break(
    b: &mut PageBuilder,
    columns: &[Column],
    style: &TableStyle,
    header_h: f64,
    line_h: f64,
    heading: &str,
) {
    b.new_page();
    b.push(DrawOp::Text {
        x: LEFT_MARGIN,
        y: CONTINUATION_HEADING_Y,
        size: 14.0,
        style: FontStyle::Bold,
        color: Color::BLACK,
        align: Align::Left,
        text: heading.to_string(),
    });
    b.push(DrawOp::Rule {
        x1: LEFT_MARGIN,
        y1: CONTINUATION_RULE_Y,
        x2: LEFT_MARGIN + total_width(columns),
        y2: CONTINUATION_RULE_Y,
        thickness: 0.5,
    });
    b.set_y(CONTINUATION_CONTENT_Y);
    draw_header_row(b, columns, style, header_h, line_h);
}

fn total_width(columns: &[Column]) -> f64 {
    columns.iter().map(|c| c.width).sum()
}

fn draw_header_row(
    b: &mut PageBuilder,
    columns: &[Column],
    style: &TableStyle,
    header_h: f64,
    line_h: f64,
) {
    b.push(DrawOp::Rect {
        x: LEFT_MARGIN,
        y: b.y(),
        w: total_width(columns),
        h: header_h,
        fill: style.header_fill,
    });

    let baseline = b.y() + style.cell_padding + line_h * 0.8;
    let mut x = LEFT_MARGIN;
    for col in columns {
        b.push(DrawOp::Text {
            x: x + style.cell_padding,
            y: baseline,
            size: style.font_size,
            style: FontStyle::Bold,
            color: style.header_text,
            align: Align::Left,
            text: col.header.clone(),
        });
        x += col.width;
    }
    b.advance(header_h);
}

#[allow(clippy::too_many_arguments)]
fn draw_row_slice(
    b: &mut PageBuilder,
    columns: &[Column],
    row: &[Cell],
    wrapped: &[Vec<String>],
    style: &TableStyle,
    line_h: f64,
    offset: usize,
    take: usize,
) {
    let mut x = LEFT_MARGIN;
    for ((col, cell), lines) in columns.iter().zip(row).zip(wrapped) {
        let mut baseline = b.y() + style.cell_padding + line_h * 0.8;
        for (index, line) in lines.iter().enumerate().skip(offset).take(take) {
            // A linked cell carries its annotation on the first line.
            match (&cell.url, index) {
                (Some(url), 0) => b.push(DrawOp::Link {
                    x: x + style.cell_padding,
                    y: baseline,
                    size: style.font_size,
                    text: line.clone(),
                    url: url.clone(),
                }),
                _ => b.push(DrawOp::Text {
                    x: x + style.cell_padding,
                    y: baseline,
                    size: style.font_size,
                    style: FontStyle::Regular,
                    color: Color::BLACK,
                    align: Align::Left,
                    text: line.clone(),
                }),
            }
            baseline += line_h;
        }
        x += col.width;
    }
}

/// Greedy word wrap against an estimated glyph width; words longer than a
/// cell are hard-split.
fn wrap_cell(text: &str, width: f64, style: &TableStyle) -> Vec<String> {
    let char_w = style.font_size * 0.5 * PT_TO_MM;
    let max_chars = (((width - 2.0 * style.cell_padding) / char_w) as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(max_chars)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(word[..split_at].to_string());
            word = &word[split_at..];
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
