//! Font metrics and the measurement snapshot used by every height and draw call.
//!
//! Blocks never look up font state on their own: they receive a
//! [`LayoutContext`] and measure through it, so the height computed while
//! paginating is the height consumed while drawing.
//!
//! The built-in tables are the standard PDF base-14 advance widths in 1/1000 em
//! for ASCII 0x20..=0x7E. Helvetica and Courier obliques share the upright
//! widths; Times italics have their own tables.

use crate::constants::{CELL_MARGIN_MM, LINE_WIDTH_MM, pt_to_mm};
use crate::types::FontFamily;

/// Inline emphasis applied to a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl FontStyle {
    pub const PLAIN: FontStyle = FontStyle {
        bold: false,
        italic: false,
        underline: false,
    };
    pub const BOLD: FontStyle = FontStyle {
        bold: true,
        italic: false,
        underline: false,
    };
}

/// A font family at a size with a style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub family: FontFamily,
    pub style: FontStyle,
    pub size_pt: f32,
}

impl FontSpec {
    pub fn new(family: FontFamily, style: FontStyle, size_pt: f32) -> Self {
        Self {
            family,
            style,
            size_pt,
        }
    }

    pub fn plain(family: FontFamily, size_pt: f32) -> Self {
        Self::new(family, FontStyle::PLAIN, size_pt)
    }

    pub fn bold(family: FontFamily, size_pt: f32) -> Self {
        Self::new(family, FontStyle::BOLD, size_pt)
    }

    pub fn with_style(self, style: FontStyle) -> Self {
        Self { style, ..self }
    }

    pub fn with_size(self, size_pt: f32) -> Self {
        Self { size_pt, ..self }
    }

    /// Font size expressed in layout units; also the height of one text line
    pub fn size_mm(&self) -> f32 {
        pt_to_mm(self.size_pt)
    }
}

/// Measures rendered string widths in millimeters
pub trait TextMeasure {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32;
}

/// Immutable measurement snapshot passed to block height and draw operations
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub measure: &'a dyn TextMeasure,
    /// Padding on each side of a text run
    pub cell_margin_mm: f32,
    /// Stroke width of separator lines
    pub line_width_mm: f32,
}

impl<'a> LayoutContext<'a> {
    pub fn new(measure: &'a dyn TextMeasure) -> Self {
        Self {
            measure,
            cell_margin_mm: CELL_MARGIN_MM,
            line_width_mm: LINE_WIDTH_MM,
        }
    }

    pub fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        self.measure.text_width(text, font)
    }

    /// Width a run occupies once both side margins are added
    pub fn run_width(&self, text: &str, font: &FontSpec) -> f32 {
        self.text_width(text, font) + 2.0 * self.cell_margin_mm
    }
}

impl std::fmt::Debug for LayoutContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("cell_margin_mm", &self.cell_margin_mm)
            .field("line_width_mm", &self.line_width_mm)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Built-in metric tables
// =============================================================================

/// Width tables for the PDF standard fonts
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMetrics;

struct WidthTable {
    widths: [u16; 95],
    fallback: u16,
}

impl WidthTable {
    fn units(&self, text: &str) -> u32 {
        text.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32] as u32
                } else {
                    self.fallback as u32
                }
            })
            .sum()
    }
}

fn table_for(family: FontFamily, style: FontStyle) -> &'static WidthTable {
    match (family, style.bold, style.italic) {
        (FontFamily::Helvetica, false, _) => &HELVETICA,
        (FontFamily::Helvetica, true, _) => &HELVETICA_BOLD,
        (FontFamily::Times, false, false) => &TIMES_ROMAN,
        (FontFamily::Times, true, false) => &TIMES_BOLD,
        (FontFamily::Times, false, true) => &TIMES_ITALIC,
        (FontFamily::Times, true, true) => &TIMES_BOLD_ITALIC,
        (FontFamily::Courier, _, _) => &COURIER,
    }
}

impl TextMeasure for BuiltinMetrics {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        let units = table_for(font.family, font.style).units(text);
        units as f32 / 1000.0 * font.size_mm()
    }
}

static HELVETICA: WidthTable = WidthTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    fallback: 556,
};

static HELVETICA_BOLD: WidthTable = WidthTable {
    #[rustfmt::skip]
    widths: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        333, 333, 584, 584, 584, 611, 975,
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        333, 278, 333, 584, 556, 333,
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        389, 280, 389, 584,
    ],
    fallback: 611,
};

static TIMES_ROMAN: WidthTable = WidthTable {
    #[rustfmt::skip]
    widths: [
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        278, 278, 564, 564, 564, 444, 921,
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        333, 278, 333, 469, 500, 333,
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        480, 200, 480, 541,
    ],
    fallback: 500,
};

static TIMES_BOLD: WidthTable = WidthTable {
    #[rustfmt::skip]
    widths: [
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 570, 570, 570, 500, 930,
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        333, 278, 333, 581, 500, 333,
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        394, 220, 394, 520,
    ],
    fallback: 556,
};

static TIMES_ITALIC: WidthTable = WidthTable {
    #[rustfmt::skip]
    widths: [
        250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 675, 675, 675, 500, 920,
        611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833,
        667, 722, 611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556,
        389, 278, 389, 422, 500, 333,
        500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722,
        500, 500, 500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389,
        400, 275, 400, 541,
    ],
    fallback: 500,
};

static TIMES_BOLD_ITALIC: WidthTable = WidthTable {
    #[rustfmt::skip]
    widths: [
        250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 570, 570, 570, 500, 832,
        667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889,
        722, 722, 611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611,
        333, 278, 333, 570, 500, 333,
        500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778,
        556, 500, 500, 500, 389, 389, 278, 556, 444, 667, 500, 444, 389,
        348, 220, 348, 570,
    ],
    fallback: 500,
};

static COURIER: WidthTable = WidthTable {
    widths: [600; 95],
    fallback: 600,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courier_is_monospaced() {
        let font = FontSpec::plain(FontFamily::Courier, 10.0);
        let a = BuiltinMetrics.text_width("iiii", &font);
        let b = BuiltinMetrics.text_width("MMMM", &font);
        assert!((a - b).abs() < f32::EPSILON);
        // 4 glyphs * 0.6em * 10pt in mm
        assert!((a - 4.0 * 0.6 * pt_to_mm(10.0)).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = FontSpec::plain(FontFamily::Helvetica, 10.0);
        let bold = regular.with_style(FontStyle::BOLD);
        let text = "Friday Night Fellowship";
        assert!(BuiltinMetrics.text_width(text, &bold) > BuiltinMetrics.text_width(text, &regular));
    }

    #[test]
    fn test_times_italic_has_own_widths() {
        let roman = FontSpec::plain(FontFamily::Times, 10.0);
        let italic = roman.with_style(FontStyle {
            italic: true,
            ..FontStyle::PLAIN
        });
        // Times-Roman 'A' is 722 units, Times-Italic 'A' is 611
        assert!((BuiltinMetrics.text_width("A", &roman) - 0.722 * pt_to_mm(10.0)).abs() < 1e-4);
        assert!((BuiltinMetrics.text_width("A", &italic) - 0.611 * pt_to_mm(10.0)).abs() < 1e-4);

        let bold_italic = roman.with_style(FontStyle {
            bold: true,
            italic: true,
            underline: false,
        });
        // Times-BoldItalic 'm' is 778 units
        assert!((BuiltinMetrics.text_width("m", &bold_italic) - 0.778 * pt_to_mm(10.0)).abs() < 1e-4);
    }

    #[test]
    fn test_helvetica_oblique_shares_upright_widths() {
        let upright = FontSpec::plain(FontFamily::Helvetica, 10.0);
        let oblique = upright.with_style(FontStyle {
            italic: true,
            ..FontStyle::PLAIN
        });
        let text = "Open Discussion";
        assert_eq!(
            BuiltinMetrics.text_width(text, &upright),
            BuiltinMetrics.text_width(text, &oblique)
        );
    }

    #[test]
    fn test_run_width_adds_both_margins() {
        let ctx = LayoutContext::new(&BuiltinMetrics);
        let font = FontSpec::plain(FontFamily::Times, 12.0);
        let text = "Basic Text";
        let diff = ctx.run_width(text, &font) - ctx.text_width(text, &font);
        assert!((diff - 2.0 * CELL_MARGIN_MM).abs() < 1e-6);
    }

    #[test]
    fn test_non_ascii_uses_fallback() {
        let font = FontSpec::plain(FontFamily::Helvetica, 10.0);
        let width = BuiltinMetrics.text_width("é", &font);
        assert!((width - 0.556 * pt_to_mm(10.0)).abs() < 1e-4);
    }
}
