//! printpdf backend for [`LayoutDocument`].
//!
//! Layout coordinates are millimetres from the top-left corner; printpdf
//! measures from the bottom-left, so every y is flipped against the page
//! height here and nowhere else.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    Actions, BorderArray, BuiltinFont, Color as PdfColor, ColorArray, HighlightingMode, Image,
    ImageTransform, IndirectFontRef, Line, LinkAnnotation, Mm, PdfDocument, PdfLayerReference,
    Point, Polygon, Rect, Rgb,
};
use tracing::debug;

use crate::error::PdfError;
use crate::layout::{
    Align, Color, DrawOp, FontStyle, LayoutDocument, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PT_TO_MM,
    approx_text_width,
};

/// DPI assumed when placing embedded images.
const IMAGE_DPI: f64 = 300.0;

// Layout works in f64 millimetres; printpdf's units are f32. Conversion
// happens only at this boundary.
fn mm(v: f64) -> Mm {
    Mm(v as f32)
}

fn flip(y: f64) -> f64 {
    PAGE_HEIGHT_MM - y
}

fn pdf_color(c: Color) -> PdfColor {
    PdfColor::Rgb(Rgb::new(
        c.r as f32 / 255.0,
        c.g as f32 / 255.0,
        c.b as f32 / 255.0,
        None,
    ))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn pick(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }
}

/// Render a laid-out document to PDF bytes.
pub fn render_to_bytes(doc: &LayoutDocument) -> Result<Vec<u8>, PdfError> {
    let (pdf, first_page, first_layer) = PdfDocument::new(
        &doc.title,
        mm(PAGE_WIDTH_MM),
        mm(PAGE_HEIGHT_MM),
        "content",
    );
    let fonts = Fonts {
        regular: pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_err)?,
        bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_err)?,
    };

    for (index, page) in doc.pages.iter().enumerate() {
        let layer = if index == 0 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = pdf.add_page(mm(PAGE_WIDTH_MM), mm(PAGE_HEIGHT_MM), "content");
            pdf.get_page(p).get_layer(l)
        };
        for op in &page.ops {
            draw_op(&layer, &fonts, op);
        }
    }

    pdf.save_to_bytes().map_err(render_err)
}

/// Render a laid-out document straight to a file.
pub fn render_to_file(doc: &LayoutDocument, path: &Path) -> Result<(), PdfError> {
    let bytes = render_to_bytes(doc)?;
    fs::write(path, bytes).map_err(|source| PdfError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn render_err(source: printpdf::Error) -> PdfError {
    PdfError::Render {
        message: source.to_string(),
    }
}

fn draw_op(layer: &PdfLayerReference, fonts: &Fonts, op: &DrawOp) {
    match op {
        DrawOp::Text {
            x,
            y,
            size,
            style,
            color,
            align,
            text,
        } => {
            let x = match align {
                Align::Left => *x,
                Align::Center => *x - approx_text_width(text, *size) / 2.0,
            };
            layer.set_fill_color(pdf_color(*color));
            layer.use_text(
                text.clone(),
                *size as f32,
                mm(x),
                mm(flip(*y)),
                fonts.pick(*style),
            );
        }
        DrawOp::Link { x, y, size, text, url } => {
            layer.set_fill_color(pdf_color(Color::LINK_BLUE));
            layer.use_text(
                text.clone(),
                *size as f32,
                mm(*x),
                mm(flip(*y)),
                fonts.pick(FontStyle::Regular),
            );
            let width = approx_text_width(text, *size);
            let height = size * PT_TO_MM;
            layer.add_link_annotation(LinkAnnotation::new(
                Rect::new(
                    mm(*x),
                    mm(flip(*y) - 1.0),
                    mm(*x + width),
                    mm(flip(*y) + height),
                ),
                Some(BorderArray::default()),
                Some(ColorArray::default()),
                Actions::uri(url.clone()),
                Some(HighlightingMode::Invert),
            ));
        }
        DrawOp::Rule {
            x1,
            y1,
            x2,
            y2,
            thickness,
        } => {
            layer.set_outline_color(pdf_color(Color::BLACK));
            layer.set_outline_thickness(*thickness as f32);
            layer.add_line(Line {
                points: vec![
                    (Point::new(mm(*x1), mm(flip(*y1))), false),
                    (Point::new(mm(*x2), mm(flip(*y2))), false),
                ],
                is_closed: false,
            });
        }
        DrawOp::Rect { x, y, w, h, fill } => {
            layer.set_fill_color(pdf_color(*fill));
            let top = flip(*y);
            let bottom = flip(*y + *h);
            layer.add_polygon(Polygon {
                rings: vec![vec![
                    (Point::new(mm(*x), mm(top)), false),
                    (Point::new(mm(*x + *w), mm(top)), false),
                    (Point::new(mm(*x + *w), mm(bottom)), false),
                    (Point::new(mm(*x), mm(bottom)), false),
                ]],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }
        DrawOp::Image { x, y, w, h, png } => {
            // A broken icon never fails the export.
            let image = match PngDecoder::new(Cursor::new(png.as_slice())) {
                Ok(decoder) => match Image::try_from(decoder) {
                    Ok(image) => image,
                    Err(error) => {
                        debug!(%error, "skipping undecodable embedded image");
                        return;
                    }
                },
                Err(error) => {
                    debug!(%error, "skipping undecodable embedded image");
                    return;
                }
            };
            let natural_w = image.image.width.0 as f64 * 25.4 / IMAGE_DPI;
            let natural_h = image.image.height.0 as f64 * 25.4 / IMAGE_DPI;
            image.add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(mm(*x)),
                    translate_y: Some(mm(flip(*y + *h))),
                    scale_x: Some((*w / natural_w.max(f64::EPSILON)) as f32),
                    scale_y: Some((*h / natural_h.max(f64::EPSILON)) as f32),
                    dpi: Some(IMAGE_DPI as f32),
                    ..Default::default()
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageBuilder;

    fn sample_doc() -> LayoutDocument {
        let mut b = PageBuilder::new();
        b.push(DrawOp::Text {
            x: 10.0,
            y: b.y(),
            size: 12.0,
            style: FontStyle::Bold,
            color: Color::BLACK,
            align: Align::Left,
            text: "hello".to_string(),
        });
        b.rule(0.5);
        b.push(DrawOp::Link {
            x: 10.0,
            y: 40.0,
            size: 12.0,
            text: "link".to_string(),
            url: "https://example.org".to_string(),
        });
        b.push(DrawOp::Rect {
            x: 10.0,
            y: 60.0,
            w: 100.0,
            h: 10.0,
            fill: Color::TITLE_GREEN,
        });
        b.new_page();
        b.finish("test")
    }

    #[test]
    fn test_layout_units_convert_to_printpdf_units() {
        assert_eq!(mm(210.0), Mm(210.0));
        assert_eq!(mm(PAGE_HEIGHT_MM), Mm(297.0));
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_to_bytes(&sample_doc()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_undecodable_image_is_skipped_not_fatal() {
        let mut b = PageBuilder::new();
        b.push(DrawOp::Image {
            x: 10.0,
            y: 10.0,
            w: 13.0,
            h: 13.0,
            png: vec![0xde, 0xad, 0xbe, 0xef],
        });
        let bytes = render_to_bytes(&b.finish("broken icon")).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_to_file_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        render_to_file(&sample_doc(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
