//! [`Canvas`] implementation that builds printpdf pages
//!
//! Layout hands over millimeters from the top-left corner; PDF space starts at
//! the bottom-left in points, so every coordinate is flipped against the
//! current page height on the way in.

use booklet_layout::canvas::{Align, Canvas, Point, TextCell};
use booklet_layout::constants::{CELL_MARGIN_MM, LINE_WIDTH_MM};
use booklet_layout::{BuiltinMetrics, FontFamily, FontSpec, Rgb, TextMeasure};
use printpdf::{
    BuiltinFont, Color, Line, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions,
    Polygon, PolygonRing, Pt, TextItem, WindingOrder,
};

use crate::types::{RenderError, Result};

/// Baseline offset below the vertical centre of a cell, as a share of the font size
const BASELINE_SHIFT: f32 = 0.3;

/// Underline distance below the baseline, as a share of the font size
const UNDERLINE_DROP: f32 = 0.12;

struct PageBuffer {
    width_mm: f32,
    height_mm: f32,
    ops: Vec<Op>,
}

/// Collects drawing calls into printpdf pages
pub struct PdfCanvas {
    title: String,
    metrics: BuiltinMetrics,
    pages: Vec<PdfPage>,
    current: Option<PageBuffer>,
}

impl PdfCanvas {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            metrics: BuiltinMetrics,
            pages: Vec::new(),
            current: None,
        }
    }

    /// Pages started so far, including the one being drawn
    pub fn page_count(&self) -> usize {
        self.pages.len() + usize::from(self.current.is_some())
    }

    fn finish_page(&mut self) {
        if let Some(page) = self.current.take() {
            self.pages
                .push(PdfPage::new(Mm(page.width_mm), Mm(page.height_mm), page.ops));
        }
    }

    pub fn into_document(mut self) -> Result<PdfDocument> {
        self.finish_page();
        if self.pages.is_empty() {
            return Err(RenderError::Pdf("nothing was drawn".to_string()));
        }

        let mut doc = PdfDocument::new(&self.title);
        doc.pages = self.pages;
        Ok(doc)
    }

    /// Serialize everything drawn so far
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let doc = self.into_document()?;
        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("PDF writer reported {} warning(s)", warnings.len());
        }
        Ok(bytes)
    }

    fn page(&mut self) -> Option<&mut PageBuffer> {
        if self.current.is_none() {
            log::warn!("Drawing before the first page was started; ignored");
        }
        self.current.as_mut()
    }

    fn fill_rect(page: &mut PageBuffer, origin: Point, width: f32, height: f32, color: Rgb) {
        let corners = [
            origin,
            origin.offset(width, 0.0),
            origin.offset(width, height),
            origin.offset(0.0, height),
        ];
        let points = corners
            .iter()
            .map(|&p| LinePoint {
                p: pdf_point(page.height_mm, p),
                bezier: false,
            })
            .collect();

        page.ops.push(Op::SetFillColor {
            col: pdf_color(color),
        });
        page.ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing { points }],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            },
        });
    }

    fn stroke(page: &mut PageBuffer, from: Point, to: Point, color: Rgb, width_mm: f32) {
        page.ops.push(Op::SetOutlineColor {
            col: pdf_color(color),
        });
        page.ops.push(Op::SetOutlineThickness {
            pt: Mm(width_mm).into_pt(),
        });
        page.ops.push(Op::DrawLine {
            line: Line {
                points: vec![
                    LinePoint {
                        p: pdf_point(page.height_mm, from),
                        bezier: false,
                    },
                    LinePoint {
                        p: pdf_point(page.height_mm, to),
                        bezier: false,
                    },
                ],
                is_closed: false,
            },
        });
    }
}

impl Canvas for PdfCanvas {
    fn new_page(&mut self, width_mm: f32, height_mm: f32) {
        self.finish_page();
        self.current = Some(PageBuffer {
            width_mm,
            height_mm,
            ops: Vec::new(),
        });
    }

    fn draw_cell(&mut self, cell: &TextCell) {
        let text_width = self.metrics.text_width(&cell.text, &cell.font);
        let Some(page) = self.page() else {
            return;
        };

        if let Some(fill) = cell.fill {
            Self::fill_rect(page, cell.origin, cell.width, cell.height, fill);
        }

        if !cell.text.is_empty() {
            let baseline = text_baseline(cell, text_width);
            let font = builtin_font(&cell.font);

            page.ops.push(Op::SetFillColor {
                col: pdf_color(cell.color),
            });
            page.ops.push(Op::StartTextSection);
            page.ops.push(Op::SetTextCursor {
                pos: pdf_point(page.height_mm, baseline),
            });
            page.ops.push(Op::SetFontSizeBuiltinFont {
                font,
                size: Pt(cell.font.size_pt),
            });
            page.ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(cell.text.clone())],
                font,
            });
            page.ops.push(Op::EndTextSection);

            if cell.font.style.underline {
                let drop = UNDERLINE_DROP * cell.font.size_mm();
                let start = baseline.offset(0.0, drop);
                Self::stroke(
                    page,
                    start,
                    start.offset(text_width, 0.0),
                    cell.color,
                    LINE_WIDTH_MM,
                );
            }
        }

        let Point { x, y } = cell.origin;
        let (right, bottom) = (x + cell.width, y + cell.height);
        let edges = [
            (cell.border.top, Point::new(x, y), Point::new(right, y)),
            (cell.border.right, Point::new(right, y), Point::new(right, bottom)),
            (cell.border.bottom, Point::new(x, bottom), Point::new(right, bottom)),
            (cell.border.left, Point::new(x, y), Point::new(x, bottom)),
        ];
        for (_, from, to) in edges.into_iter().filter(|(on, _, _)| *on) {
            Self::stroke(page, from, to, Rgb::BLACK, LINE_WIDTH_MM);
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width_mm: f32) {
        if let Some(page) = self.page() {
            Self::stroke(page, from, to, color, width_mm);
        }
    }
}

/// Where the text baseline starts, in top-left millimeters
fn text_baseline(cell: &TextCell, text_width: f32) -> Point {
    let x = match cell.align {
        Align::Left => cell.origin.x + CELL_MARGIN_MM,
        Align::Center => cell.origin.x + (cell.width - text_width) / 2.0,
        Align::Right => cell.origin.x + cell.width - CELL_MARGIN_MM - text_width,
    };
    let y = cell.origin.y + cell.height / 2.0 + BASELINE_SHIFT * cell.font.size_mm();
    Point::new(x, y)
}

fn pdf_point(page_height_mm: f32, p: Point) -> printpdf::Point {
    printpdf::Point {
        x: Mm(p.x).into_pt(),
        y: Mm(page_height_mm - p.y).into_pt(),
    }
}

fn pdf_color(color: Rgb) -> Color {
    let channel = |c: u8| c as f32 / 255.0;
    Color::Rgb(printpdf::Rgb::new(
        channel(color.r),
        channel(color.g),
        channel(color.b),
        None,
    ))
}

fn builtin_font(font: &FontSpec) -> BuiltinFont {
    let (bold, italic) = (font.style.bold, font.style.italic);
    match (font.family, bold, italic) {
        (FontFamily::Helvetica, false, false) => BuiltinFont::Helvetica,
        (FontFamily::Helvetica, true, false) => BuiltinFont::HelveticaBold,
        (FontFamily::Helvetica, false, true) => BuiltinFont::HelveticaOblique,
        (FontFamily::Helvetica, true, true) => BuiltinFont::HelveticaBoldOblique,
        (FontFamily::Times, false, false) => BuiltinFont::TimesRoman,
        (FontFamily::Times, true, false) => BuiltinFont::TimesBold,
        (FontFamily::Times, false, true) => BuiltinFont::TimesItalic,
        (FontFamily::Times, true, true) => BuiltinFont::TimesBoldItalic,
        (FontFamily::Courier, false, false) => BuiltinFont::Courier,
        (FontFamily::Courier, true, false) => BuiltinFont::CourierBold,
        (FontFamily::Courier, false, true) => BuiltinFont::CourierOblique,
        (FontFamily::Courier, true, true) => BuiltinFont::CourierBoldOblique,
    }
}
