//! Booklet orchestration
//!
//! Pipeline:
//! 1. Group meetings under section headers, append the trailing content
//! 2. Paginate into columns and split into logical pages
//! 3. Pad with filler pages (booklet mode)
//! 4. Impose onto physical pages

use crate::blocks::{LayoutBlock, LayoutStyle};
use crate::fillers::{FillerContent, builtin_fillers};
use crate::impose::{FillerSizing, ImposedPage, impose, pad_to_multiple_of_four};
use crate::metrics::LayoutContext;
use crate::options::{BookletOptions, PageGeometry};
use crate::paginate::{ContentGroup, LogicalPage, group_meetings, paginate, split_pages};
use crate::records::{Format, Meeting, RawRecord, normalize_formats, normalize_meetings};
use crate::stats::calculate_statistics;
use crate::types::*;

/// Normalized content for one booklet
#[derive(Debug, Clone, PartialEq)]
pub struct BookletInput {
    pub meetings: Vec<Meeting>,
    /// Ordered by key, without duplicates
    pub formats: Vec<Format>,
    pub fillers: Vec<FillerContent>,
}

impl BookletInput {
    /// Uses the built-in fillers
    pub fn new(meetings: Vec<Meeting>, formats: Vec<Format>) -> Self {
        Self {
            meetings,
            formats,
            fillers: builtin_fillers(),
        }
    }

    /// Normalize raw records; any invalid record fails the whole input
    pub fn from_records(meetings: &[RawRecord], formats: &[RawRecord]) -> Result<Self> {
        Ok(Self::new(
            normalize_meetings(meetings)?,
            normalize_formats(formats)?,
        ))
    }

    pub fn with_fillers(mut self, fillers: Vec<FillerContent>) -> Self {
        self.fillers = fillers;
        self
    }
}

/// A fully imposed booklet, ready to render
#[derive(Debug, Clone)]
pub struct BookletLayout {
    pub geometry: PageGeometry,
    pub pages: Vec<ImposedPage>,
    pub statistics: BookletStatistics,
}

/// Paginate `input` into logical pages, padded in booklet mode
pub fn logical_pages(
    input: &BookletInput,
    options: &BookletOptions,
    ctx: &LayoutContext<'_>,
) -> Result<Vec<LogicalPage>> {
    options.validate()?;

    let geometry = options.geometry();
    let capacity = geometry.column_height_mm;
    let style = LayoutStyle::from_options(options);

    let mut groups = group_meetings(
        &input.meetings,
        &style,
        options.main_header_field,
        options.second_header_field,
    );
    if options.include_formats_table && !input.formats.is_empty() {
        groups.push(ContentGroup::standalone(LayoutBlock::FormatsTable(
            style.formats_table(&input.formats),
        )));
    }
    if options.phone_list {
        groups.push(ContentGroup::full_column(LayoutBlock::PhoneList(
            style.phone_list(capacity, ctx),
        )));
    }

    let mut pages = split_pages(paginate(groups, capacity, ctx)?);
    if pages.is_empty() {
        return Err(BookletError::NoPages);
    }
    log::debug!("{} content page(s) at {:.1}mm per column", pages.len(), capacity);

    if options.bookletize {
        let sizing = FillerSizing {
            min_pt: options.filler_min_font_size_pt,
            max_pt: options.filler_max_font_size_pt,
        };
        pad_to_multiple_of_four(&mut pages, &input.fillers, &style, sizing, capacity, ctx);
    }

    Ok(pages)
}

/// Lay out and impose a complete booklet
pub fn layout_booklet(
    input: &BookletInput,
    options: &BookletOptions,
    ctx: &LayoutContext<'_>,
) -> Result<BookletLayout> {
    let pages = logical_pages(input, options, ctx)?;
    let statistics = calculate_statistics(input.meetings.len(), &pages, options.bookletize)?;
    let geometry = options.geometry();
    let pages = impose(pages, &geometry, options.bookletize);

    log::info!(
        "Laid out {} meetings on {} logical pages ({} physical)",
        statistics.meetings,
        statistics.logical_pages,
        statistics.physical_pages
    );

    Ok(BookletLayout {
        geometry,
        pages,
        statistics,
    })
}
