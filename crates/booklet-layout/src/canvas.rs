//! Drawing surface contract
//!
//! Coordinates are millimeters from the top-left corner of the current page,
//! y growing downward. Measurement lives in [`crate::metrics::TextMeasure`]
//! rather than here so that a layout pass can hold a shared measurement
//! snapshot while the canvas is borrowed mutably for drawing.

use crate::metrics::FontSpec;
use crate::types::Rgb;

/// A position on the page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Horizontal text alignment inside a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Which cell edges get a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Border {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl Border {
    pub const NONE: Border = Border {
        left: false,
        top: false,
        right: false,
        bottom: false,
    };

    pub const ALL: Border = Border {
        left: true,
        top: true,
        right: true,
        bottom: true,
    };

    pub fn without_left(self) -> Self {
        Self {
            left: false,
            ..self
        }
    }

    pub fn without_top(self) -> Self {
        Self { top: false, ..self }
    }
}

/// A single-line text cell, optionally filled and bordered
#[derive(Debug, Clone, PartialEq)]
pub struct TextCell {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
    pub text: String,
    pub font: FontSpec,
    pub color: Rgb,
    pub align: Align,
    pub border: Border,
    pub fill: Option<Rgb>,
}

impl TextCell {
    pub fn new(origin: Point, width: f32, height: f32, text: impl Into<String>, font: FontSpec) -> Self {
        Self {
            origin,
            width,
            height,
            text: text.into(),
            font,
            color: Rgb::BLACK,
            align: Align::Left,
            border: Border::NONE,
            fill: None,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    pub fn fill(mut self, fill: Rgb) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// Target of the draw instructions produced by layout
pub trait Canvas {
    /// Start a new physical page of the given size
    fn new_page(&mut self, width_mm: f32, height_mm: f32);

    /// Draw a text cell on the current page
    fn draw_cell(&mut self, cell: &TextCell);

    /// Stroke a straight line on the current page
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width_mm: f32);
}

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    NewPage {
        width_mm: f32,
        height_mm: f32,
    },
    Cell(TextCell),
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        width_mm: f32,
    },
}

/// Canvas that keeps every call, for inspection and dry runs
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::NewPage { .. }))
            .count()
    }

    /// Cells drawn on each page, in order
    pub fn cells_by_page(&self) -> Vec<Vec<&TextCell>> {
        let mut pages: Vec<Vec<&TextCell>> = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::NewPage { .. } => pages.push(Vec::new()),
                DrawOp::Cell(cell) => {
                    if let Some(page) = pages.last_mut() {
                        page.push(cell);
                    }
                }
                DrawOp::Line { .. } => {}
            }
        }
        pages
    }
}

impl Canvas for RecordingCanvas {
    fn new_page(&mut self, width_mm: f32, height_mm: f32) {
        self.ops.push(DrawOp::NewPage {
            width_mm,
            height_mm,
        });
    }

    fn draw_cell(&mut self, cell: &TextCell) {
        self.ops.push(DrawOp::Cell(cell.clone()));
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width_mm: f32) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            width_mm,
        });
    }
}
