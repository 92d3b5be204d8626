use crate::paginate::{LogicalPage, PageKind};
use crate::types::*;

/// Calculate statistics for a laid-out booklet
pub fn calculate_statistics(
    meetings: usize,
    pages: &[LogicalPage],
    bookletize: bool,
) -> Result<BookletStatistics> {
    if pages.is_empty() {
        return Err(BookletError::NoPages);
    }

    let count = |kind: PageKind| pages.iter().filter(|p| p.kind() == kind).count();
    let filler_pages = count(PageKind::Filler);
    let blank_pages = count(PageKind::Blank);

    let (physical_pages, sheets) = if bookletize {
        // two logical pages per side, two sides per sheet
        let sides = pages.len().div_ceil(2);
        (sides, sides.div_ceil(2))
    } else {
        // half-size pages, printed four to a duplex sheet
        (pages.len(), pages.len().div_ceil(4))
    };

    Ok(BookletStatistics {
        meetings,
        content_pages: pages.len() - filler_pages - blank_pages,
        filler_pages,
        blank_pages,
        logical_pages: pages.len(),
        physical_pages,
        sheets,
    })
}
