use crate::constants::{GUTTER_MM, MAX_FONT_SIZE_PT};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Booklet configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookletOptions {
    // Paper
    pub paper_size: PaperSize,
    /// Lay two booklet pages side by side on each landscape sheet
    pub bookletize: bool,
    pub margin_mm: f32,

    // Grouping
    pub main_header_field: HeaderField,
    pub second_header_field: Option<HeaderField>,

    // Meeting rows
    pub time_column_width_mm: f32,
    pub duration_column_width_mm: f32,
    pub meeting_font: FontFamily,
    pub meeting_font_size_pt: f32,
    /// `#RRGGBB` colour of the line under each meeting
    pub separator_color: String,

    // Headers
    pub header_font: FontFamily,
    pub header_font_size_pt: f32,

    // Formats legend
    pub include_formats_table: bool,
    pub formats_table_title: String,
    pub format_key_column_width_mm: f32,
    pub table_margin_mm: f32,

    // Extra pages
    pub phone_list: bool,
    pub filler_min_font_size_pt: f32,
    pub filler_max_font_size_pt: f32,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter,
            bookletize: false,
            margin_mm: 5.0,
            main_header_field: HeaderField::Weekday,
            second_header_field: None,
            time_column_width_mm: 20.0,
            duration_column_width_mm: 15.0,
            meeting_font: FontFamily::Helvetica,
            meeting_font_size_pt: 10.0,
            separator_color: "#D3D3D3".to_string(),
            header_font: FontFamily::Helvetica,
            header_font_size_pt: 10.0,
            include_formats_table: true,
            formats_table_title: "Meeting Format Legend".to_string(),
            format_key_column_width_mm: 10.0,
            table_margin_mm: 5.0,
            phone_list: false,
            filler_min_font_size_pt: 6.0,
            filler_max_font_size_pt: 24.0,
        }
    }
}

/// Page and column dimensions derived from the options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub orientation: Orientation,
    pub margin_mm: f32,
    pub column_width_mm: f32,
    /// Column capacity: content height available before a break
    pub column_height_mm: f32,
    /// x of the left half (or the only column)
    pub left_column_x_mm: f32,
    /// x of the right half in booklet mode
    pub right_column_x_mm: f32,
}

impl BookletOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| BookletError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookletError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if Some(self.main_header_field) == self.second_header_field {
            return Err(BookletError::Config(
                "Main header field and second header field cannot be the same".to_string(),
            ));
        }

        let lengths = [
            ("margin", self.margin_mm, true),
            ("time column width", self.time_column_width_mm, false),
            ("duration column width", self.duration_column_width_mm, false),
            ("meeting font size", self.meeting_font_size_pt, false),
            ("header font size", self.header_font_size_pt, false),
            ("format key column width", self.format_key_column_width_mm, false),
            ("table margin", self.table_margin_mm, true),
            ("minimum filler font size", self.filler_min_font_size_pt, false),
            ("maximum filler font size", self.filler_max_font_size_pt, false),
        ];
        for (name, value, zero_allowed) in lengths {
            if !value.is_finite() || value < 0.0 || (!zero_allowed && value == 0.0) {
                return Err(BookletError::Config(format!(
                    "Invalid {}: {}",
                    name, value
                )));
            }
        }

        let font_sizes = [
            ("meeting font size", self.meeting_font_size_pt),
            ("header font size", self.header_font_size_pt),
            ("maximum filler font size", self.filler_max_font_size_pt),
        ];
        for (name, size) in font_sizes {
            if size > MAX_FONT_SIZE_PT {
                return Err(BookletError::Config(format!(
                    "{} {}pt is larger than {}pt",
                    name, size, MAX_FONT_SIZE_PT
                )));
            }
        }

        if self.filler_min_font_size_pt > self.filler_max_font_size_pt {
            return Err(BookletError::Config(
                "Minimum filler font size exceeds the maximum".to_string(),
            ));
        }

        if Rgb::from_hex(&self.separator_color).is_none() {
            return Err(BookletError::Config(format!(
                "Invalid separator color '{}', expected #RRGGBB",
                self.separator_color
            )));
        }

        let geometry = self.geometry();
        if geometry.column_width_mm <= 0.0 || geometry.column_height_mm <= 0.0 {
            return Err(BookletError::Config(
                "Margins leave no room for content".to_string(),
            ));
        }

        if self.meeting_column_width_mm() <= 0.0 {
            return Err(BookletError::Config(format!(
                "Time and duration columns ({}mm + {}mm) leave no room for the meeting column in a {:.1}mm column",
                self.time_column_width_mm, self.duration_column_width_mm, geometry.column_width_mm
            )));
        }

        let table_cell = (geometry.column_width_mm - self.table_margin_mm) / 2.0;
        if table_cell - self.format_key_column_width_mm <= 0.0 {
            return Err(BookletError::Config(format!(
                "Format key column ({}mm) leaves no room for format names",
                self.format_key_column_width_mm
            )));
        }

        Ok(())
    }

    /// Physical page and column dimensions.
    ///
    /// Booklet mode prints on the full sheet in landscape with two columns.
    /// Otherwise each PDF page is half a sheet (for a printer's own booklet
    /// mode) holding a single column.
    pub fn geometry(&self) -> PageGeometry {
        let margin = self.margin_mm;
        if self.bookletize {
            let (width, height) = self
                .paper_size
                .dimensions_with_orientation(Orientation::Landscape);
            let column_width = (width - 2.0 * margin) / 2.0 - GUTTER_MM / 2.0;
            PageGeometry {
                page_width_mm: width,
                page_height_mm: height,
                orientation: Orientation::Landscape,
                margin_mm: margin,
                column_width_mm: column_width,
                column_height_mm: height - 2.0 * margin,
                left_column_x_mm: margin,
                right_column_x_mm: margin + column_width + GUTTER_MM,
            }
        } else {
            let (paper_width, paper_height) = self.paper_size.dimensions_mm();
            let width = paper_height / 2.0;
            let height = paper_width;
            PageGeometry {
                page_width_mm: width,
                page_height_mm: height,
                orientation: Orientation::Portrait,
                margin_mm: margin,
                column_width_mm: width - 2.0 * margin,
                column_height_mm: height - 2.0 * margin,
                left_column_x_mm: margin,
                right_column_x_mm: margin,
            }
        }
    }

    pub fn meeting_column_width_mm(&self) -> f32 {
        self.geometry().column_width_mm - self.time_column_width_mm - self.duration_column_width_mm
    }

    /// Parsed separator colour, falling back to light gray
    pub fn separator_rgb(&self) -> Rgb {
        Rgb::from_hex(&self.separator_color).unwrap_or(Rgb::LIGHT_GRAY)
    }
}
