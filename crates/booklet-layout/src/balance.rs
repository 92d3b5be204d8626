//! Row balancing for the two-column formats legend
//!
//! Entries are paired left/right in order. Each row is as tall as its taller
//! cell, and both cells are drawn stretched to that height, so borders line
//! up without touching the text.

use crate::blocks::FormatEntry;
use crate::metrics::LayoutContext;

/// One legend row and the height both of its cells are drawn at
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'t> {
    pub left: &'t FormatEntry,
    pub right: Option<&'t FormatEntry>,
    pub height_mm: f32,
}

/// Append a blank entry when the count is odd
pub fn pad_to_even(entries: &mut Vec<FormatEntry>) {
    let blank = entries
        .last()
        .filter(|_| entries.len() % 2 != 0)
        .map(FormatEntry::blank_like);
    entries.extend(blank);
}

/// Pair entries two per row (index 2k left, 2k+1 right)
pub fn balance_rows<'t>(entries: &'t [FormatEntry], ctx: &LayoutContext<'_>) -> Vec<TableRow<'t>> {
    entries
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1);
            let height_mm = right
                .map(|r| r.height(ctx))
                .unwrap_or(0.0)
                .max(left.height(ctx));
            TableRow {
                left,
                right,
                height_mm,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FontSpec, TextMeasure};
    use crate::records::Format;
    use crate::types::FontFamily;

    struct OneMmPerChar;

    impl TextMeasure for OneMmPerChar {
        fn text_width(&self, text: &str, _font: &FontSpec) -> f32 {
            text.chars().count() as f32
        }
    }

    fn entry(key: &str, name: &str) -> FormatEntry {
        FormatEntry {
            format: Format {
                id: 1,
                key: key.to_string(),
                name: name.to_string(),
                description: None,
            },
            key_width: 5.0,
            name_width: 12.0,
            font: FontSpec::plain(FontFamily::Helvetica, 10.0),
        }
    }

    #[test]
    fn test_pad_to_even_adds_blank() {
        let mut entries = vec![entry("O", "Open"), entry("C", "Closed"), entry("WC", "Wheelchair")];
        pad_to_even(&mut entries);
        assert_eq!(entries.len(), 4);
        assert!(entries[3].format.key.is_empty());
        assert!(entries[3].format.name.is_empty());

        pad_to_even(&mut entries);
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_pad_to_even_empty_stays_empty() {
        let mut entries = Vec::new();
        pad_to_even(&mut entries);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_row_takes_taller_cell() {
        let ctx = LayoutContext::new(&OneMmPerChar);
        // "Wheelchair Access Available" wraps to three lines at 12mm
        let entries = vec![entry("O", "Open"), entry("WC", "Wheelchair Access Available")];
        let rows = balance_rows(&entries, &ctx);
        assert_eq!(rows.len(), 1);
        assert!((rows[0].height_mm - entries[1].height(&ctx)).abs() < 1e-6);
        assert!(rows[0].height_mm > entries[0].height(&ctx));
    }
}
