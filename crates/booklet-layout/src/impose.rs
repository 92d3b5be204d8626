//! Booklet imposition
//!
//! Logical pages are placed onto physical pages. Without bookletizing each
//! logical page is its own physical page. With it, two logical pages share a
//! landscape sheet side and the sequence is padded to a multiple of four, then
//! arranged so that the printed stack folds into reading order:
//!
//! ```text
//! 8 logical pages, 4 physical sides:
//!   side 1: [8 | 1]   side 2: [2 | 7]
//!   side 3: [6 | 3]   side 4: [4 | 5]
//! ```

use std::collections::VecDeque;

use crate::blocks::{LayoutBlock, LayoutStyle};
use crate::constants::FILLER_SIZE_STEP_PT;
use crate::fillers::FillerContent;
use crate::metrics::LayoutContext;
use crate::options::PageGeometry;
use crate::paginate::LogicalPage;

/// Where on the physical page a logical page lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Left,
    Right,
    /// The whole page (not bookletized)
    Full,
}

/// A logical page positioned on a physical page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedColumn {
    pub half: Half,
    pub x_mm: f32,
    pub page: LogicalPage,
}

/// One physical page side and the columns drawn on it
#[derive(Debug, Clone, PartialEq)]
pub struct ImposedPage {
    /// 1-based physical page number
    pub number: usize,
    pub columns: Vec<PlacedColumn>,
}

/// Font size range searched when fitting filler text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillerSizing {
    pub min_pt: f32,
    pub max_pt: f32,
}

/// Lay `content` out at the largest size in range that fits `capacity`.
///
/// A filler without items is never used.
pub fn fit_filler(
    content: &FillerContent,
    style: &LayoutStyle,
    sizing: FillerSizing,
    capacity: f32,
    ctx: &LayoutContext<'_>,
) -> Option<LayoutBlock> {
    if content.items.is_empty() {
        log::debug!("filler '{}' has no items, skipped", content.title);
        return None;
    }

    let steps = ((sizing.max_pt - sizing.min_pt) / FILLER_SIZE_STEP_PT).floor().max(0.0) as u32;
    let mut best = None;
    for step in 0..=steps {
        let size = sizing.min_pt + step as f32 * FILLER_SIZE_STEP_PT;
        let page = style.filler_page(content, size);
        if page.height(ctx) > capacity {
            break;
        }
        best = Some(page);
    }

    if let Some(page) = &best {
        log::debug!(
            "filler '{}' fits at {:.1}pt",
            content.title,
            page.font.size_pt
        );
    }
    best.map(LayoutBlock::Filler)
}

/// Insert filler (or blank) pages before the last page until the count is a
/// multiple of four. Each filler is used at most once.
pub fn pad_to_multiple_of_four(
    pages: &mut Vec<LogicalPage>,
    fillers: &[FillerContent],
    style: &LayoutStyle,
    sizing: FillerSizing,
    capacity: f32,
    ctx: &LayoutContext<'_>,
) {
    let missing = (4 - pages.len() % 4) % 4;
    let mut candidates = fillers.iter();

    for _ in 0..missing {
        let filler = candidates
            .by_ref()
            .find_map(|content| fit_filler(content, style, sizing, capacity, ctx));
        let page = match filler {
            Some(block) => LogicalPage::new(vec![block]),
            None => {
                log::warn!("No filler fits the column, inserting a blank page");
                LogicalPage::blank()
            }
        };
        let at = pages.len().saturating_sub(1);
        pages.insert(at, page);
    }
}

/// Place logical pages onto physical pages.
///
/// In booklet mode the page count should already be a multiple of four; an
/// odd count leaves the right half of the final side empty.
pub fn impose(pages: Vec<LogicalPage>, geometry: &PageGeometry, bookletize: bool) -> Vec<ImposedPage> {
    if !bookletize {
        return pages
            .into_iter()
            .enumerate()
            .map(|(i, page)| ImposedPage {
                number: i + 1,
                columns: vec![PlacedColumn {
                    half: Half::Full,
                    x_mm: geometry.left_column_x_mm,
                    page,
                }],
            })
            .collect();
    }

    let mut queue: VecDeque<LogicalPage> = pages.into();
    let mut imposed = Vec::with_capacity(queue.len().div_ceil(2));

    while !queue.is_empty() {
        let number = imposed.len() + 1;
        // Odd sides read back|front, even sides front|back
        let odd = number % 2 == 1;
        let left = if odd { queue.pop_back() } else { queue.pop_front() };
        let right = if odd { queue.pop_front() } else { queue.pop_back() };

        let columns = [
            left.map(|page| PlacedColumn {
                half: Half::Left,
                x_mm: geometry.left_column_x_mm,
                page,
            }),
            right.map(|page| PlacedColumn {
                half: Half::Right,
                x_mm: geometry.right_column_x_mm,
                page,
            }),
        ]
        .into_iter()
        .flatten()
        .collect();

        log::debug!("imposed physical page {}", number);
        imposed.push(ImposedPage { number, columns });
    }

    imposed
}
