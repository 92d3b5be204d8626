use thiserror::Error;

/// A raw record field that could not be coerced into its typed form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum BookletError {
    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("{what} is {height_mm:.1}mm tall but a column only holds {capacity_mm:.1}mm")]
    LayoutInvariant {
        what: String,
        height_mm: f32,
        capacity_mm: f32,
    },
    #[error("No pages to lay out")]
    NoPages,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, BookletError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Paper the booklet is printed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PaperSize {
    #[default]
    Letter,
    Legal,
    Tabloid,
}

impl PaperSize {
    pub const ALL: [PaperSize; 3] = [PaperSize::Letter, PaperSize::Legal, PaperSize::Tabloid];

    /// Get base dimensions (portrait: width < height)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::Letter => (216.0, 279.0),
            PaperSize::Legal => (216.0, 356.0),
            PaperSize::Tabloid => (279.0, 432.0),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::Letter => "letter",
            PaperSize::Legal => "legal",
            PaperSize::Tabloid => "tabloid",
        }
    }
}

impl std::str::FromStr for PaperSize {
    type Err = BookletError;

    fn from_str(s: &str) -> Result<Self> {
        PaperSize::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                BookletError::Config(format!(
                    "Invalid paper size '{}', valid choices are: letter, legal, tabloid",
                    s
                ))
            })
    }
}

/// Meeting field used to group the listing under section headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HeaderField {
    Weekday,
    City,
}

/// Built-in font families available to both measurement and drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const SILVER: Rgb = Rgb::new(192, 192, 192);
    pub const LIGHT_GRAY: Rgb = Rgb::new(211, 211, 211);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Statistics about a laid-out booklet
#[derive(Debug, Clone, PartialEq)]
pub struct BookletStatistics {
    /// Meetings listed
    pub meetings: usize,
    /// Logical pages produced by pagination (before padding)
    pub content_pages: usize,
    /// Filler text pages inserted as padding
    pub filler_pages: usize,
    /// Blank pages inserted as padding
    pub blank_pages: usize,
    /// Logical pages after padding
    pub logical_pages: usize,
    /// Physical page sides emitted
    pub physical_pages: usize,
    /// Sheets of paper needed (two physical sides each in booklet mode)
    pub sheets: usize,
}
