//! OSAR document builder: walks an assessment report and lays it out as a
//! fixed-order, paginated A4 document.
//!
//! Emission order is fixed: title (with optional attestation icon), schema
//! version, asset key/value block, then per assessment a labeled key/value
//! block followed by its results table.

use osarview_core::shape::{display_text, is_url, tool_type_label};
use osarview_core::types::{Assessment, OsarReport};

use crate::layout::{
    Align, CENTER_X, Color, DrawOp, FontStyle, LayoutDocument, LEFT_MARGIN, LINE_HEIGHT,
    PageBuilder,
};
use crate::table::{Cell, Column, TableStyle, draw_table};

/// Document title, also used as PDF metadata.
pub const REPORT_TITLE: &str = "Open Source Assessment Report (OSAR)";

/// Key/value rows indent their value to this x position.
const VALUE_X: f64 = LEFT_MARGIN + 40.0;
/// Attestation icon geometry, anchored to the title line.
const ICON_X: f64 = 185.0;
const ICON_SIZE: f64 = 13.0;

/// A key/value row value: plain text or a clickable link.
#[derive(Debug, Clone)]
pub(crate) enum KvValue {
    Text(String),
    Link { label: String, url: String },
}

fn opt_text(value: &Option<String>) -> KvValue {
    match value {
        Some(s) => KvValue::Text(s.clone()),
        None => KvValue::Text("-".to_string()),
    }
}

fn opt_link(value: &Option<String>, label: Option<&str>) -> KvValue {
    match value.as_deref() {
        Some(url) if !url.is_empty() => KvValue::Link {
            label: label.map(str::to_string).unwrap_or_else(|| url.to_string()),
            url: url.to_string(),
        },
        _ => KvValue::Text("-".to_string()),
    }
}

/// Lay out a complete OSAR report.
///
/// `icon_png` is the decorative attestation icon; it is only drawn when
/// `attested` is set, and callers pass `None` when loading it failed —
/// generation always proceeds without it.
pub fn build_document(report: &OsarReport, attested: bool, icon_png: Option<&[u8]>) -> LayoutDocument {
    let mut b = PageBuilder::new();

    // Title
    b.push(DrawOp::Text {
        x: CENTER_X,
        y: b.y(),
        size: 22.0,
        style: FontStyle::Bold,
        color: Color::TITLE_GREEN,
        align: Align::Center,
        text: REPORT_TITLE.to_string(),
    });
    if attested {
        if let Some(png) = icon_png {
            b.push(DrawOp::Image {
                x: ICON_X,
                y: b.y() - 9.0,
                w: ICON_SIZE,
                h: ICON_SIZE,
                png: png.to_vec(),
            });
        }
    }
    b.advance(15.0);

    // Schema version subtitle
    b.push(DrawOp::Text {
        x: CENTER_X,
        y: b.y(),
        size: 16.0,
        style: FontStyle::Regular,
        color: Color::BLACK,
        align: Align::Center,
        text: format!(
            "Schema Version: {}",
            report.schema_version.as_deref().unwrap_or("-")
        ),
    });
    b.advance(15.0);

    // Asset block
    section_heading(&mut b, "Asset Details");
    let asset = &report.asset;
    kv_block(
        &mut b,
        &[
            ("Type", opt_text(&asset.asset_type)),
            ("Name", opt_text(&asset.name)),
            ("Version", opt_text(&asset.version)),
            ("Environment", opt_text(&asset.environment)),
            ("URL", opt_link(&asset.url, None)),
        ],
        None,
    );

    for assessment in &report.assessments {
        emit_assessment(&mut b, assessment);
    }

    b.finish(REPORT_TITLE)
}

fn emit_assessment(b: &mut PageBuilder, assessment: &Assessment) {
    let tool = &assessment.tool;
    let execution = &assessment.execution;
    let label = tool_type_label(tool.tool_type.as_deref().or(tool.name.as_deref()));

    b.ensure_room(40.0);
    b.advance(LINE_HEIGHT);
    section_heading(b, &label);

    kv_block(
        b,
        &[
            ("Tool Name", opt_text(&tool.name)),
            ("Tool Type", opt_text(&tool.tool_type)),
            ("Tool Version", opt_text(&tool.version)),
            ("Playbook", opt_text(&tool.playbook)),
            ("Execution Type", opt_text(&execution.exec_type)),
            ("Execution ID", opt_text(&execution.id)),
            ("Status", opt_text(&execution.status)),
            ("Timestamp", opt_text(&execution.timestamp)),
            ("Duration", opt_text(&execution.duration)),
            ("Output", opt_link(&execution.output_path, Some("Link"))),
        ],
        Some(&label),
    );

    b.advance(LINE_HEIGHT);
    b.ensure_room(40.0);
    section_heading(b, "Assessment Result");

    let columns = vec![
        Column::new("Feature", 40.0),
        Column::new("Aspect", 40.0),
        Column::new("Attribute", 40.0),
        Column::new("Value", 70.0),
    ];
    let rows: Vec<Vec<Cell>> = assessment
        .results
        .iter()
        .map(|r| {
            let value_text = display_text(r.value.as_ref());
            let value_cell = if is_url(&value_text) {
                Cell::linked(value_text.clone(), value_text)
            } else {
                Cell::text(value_text)
            };
            vec![
                Cell::text(r.feature.as_deref().unwrap_or("-")),
                Cell::text(r.aspect.as_deref().unwrap_or("-")),
                Cell::text(r.attribute.as_deref().unwrap_or("-")),
                value_cell,
            ]
        })
        .collect();

    draw_table(
        b,
        &columns,
        &rows,
        &TableStyle::default(),
        &format!("{label} - Assessment Result (continued)"),
    );
    b.advance(10.0);
}

/// Bold heading with a separator rule underneath.
fn section_heading(b: &mut PageBuilder, text: &str) {
    b.push(DrawOp::Text {
        x: LEFT_MARGIN,
        y: b.y(),
        size: 16.0,
        style: FontStyle::Bold,
        color: Color::BLACK,
        align: Align::Left,
        text: text.to_string(),
    });
    b.advance(LINE_HEIGHT);
    b.rule(0.5);
    b.advance(LINE_HEIGHT);
}

/// Emit a key/value block, breaking pages per line. When `continued` is set,
/// overflow pages repeat `<label> (continued)` with a rule before resuming.
pub(crate) fn kv_block(b: &mut PageBuilder, pairs: &[(&str, KvValue)], continued: Option<&str>) {
    let needed = if continued.is_some() { 12.0 } else { 10.0 };
    for (key, value) in pairs {
        if b.ensure_room(needed) {
            if let Some(label) = continued {
                b.push(DrawOp::Text {
                    x: LEFT_MARGIN,
                    y: b.y(),
                    size: 14.0,
                    style: FontStyle::Bold,
                    color: Color::BLACK,
                    align: Align::Left,
                    text: format!("{label} (continued)"),
                });
                b.advance(LINE_HEIGHT);
                b.rule(0.5);
                b.advance(LINE_HEIGHT);
            }
        }

        b.push(DrawOp::Text {
            x: LEFT_MARGIN,
            y: b.y(),
            size: 12.0,
            style: FontStyle::Bold,
            color: Color::BLACK,
            align: Align::Left,
            text: format!("{key}:"),
        });
        match value {
            KvValue::Text(text) => b.push(DrawOp::Text {
                x: VALUE_X,
                y: b.y(),
                size: 12.0,
                style: FontStyle::Regular,
                color: Color::BLACK,
                align: Align::Left,
                text: text.clone(),
            }),
            KvValue::Link { label, url } => b.push(DrawOp::Link {
                x: VALUE_X,
                y: b.y(),
                size: 12.0,
                text: label.clone(),
                url: url.clone(),
            }),
        }
        b.advance(LINE_HEIGHT);
    }
}
