//! Column pagination
//!
//! Content arrives as groups that must stay together (a meeting with the
//! headers it opens, or a trailing table). Groups are poured into columns of
//! fixed height; when one no longer fits, a [`LayoutBlock::ColumnBreak`] is
//! emitted and the headers still open above it are repeated with a
//! " (Continued)" suffix at the top of the next column.

use crate::blocks::{HeaderLevel, LayoutBlock, LayoutStyle, SectionHeader};
use crate::metrics::LayoutContext;
use crate::records::Meeting;
use crate::types::{BookletError, HeaderField, Result};

/// How a group relates to the sections around it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Part of the header/meeting flow
    Section,
    /// Closes any open section; never gets continuation headers
    Standalone,
    /// Standalone, and always starts a fresh column
    FullColumn,
}

/// Blocks that are never split across a column break
#[derive(Debug, Clone, PartialEq)]
pub struct ContentGroup {
    pub blocks: Vec<LayoutBlock>,
    pub kind: GroupKind,
}

impl ContentGroup {
    pub fn section(blocks: Vec<LayoutBlock>) -> Self {
        Self {
            blocks,
            kind: GroupKind::Section,
        }
    }

    pub fn standalone(block: LayoutBlock) -> Self {
        Self {
            blocks: vec![block],
            kind: GroupKind::Standalone,
        }
    }

    pub fn full_column(block: LayoutBlock) -> Self {
        Self {
            blocks: vec![block],
            kind: GroupKind::FullColumn,
        }
    }

    pub fn height(&self, ctx: &LayoutContext<'_>) -> f32 {
        self.blocks.iter().map(|b| b.height(ctx)).sum()
    }

    fn opens_with(&self, level: HeaderLevel) -> bool {
        self.blocks.first().is_some_and(|b| b.is_header(level))
    }

    fn describe(&self) -> String {
        self.blocks
            .last()
            .map(LayoutBlock::describe)
            .unwrap_or_else(|| "empty group".to_string())
    }
}

/// Group meetings under main (and optionally secondary) headers.
///
/// A header is emitted whenever its field's value differs from the previous
/// meeting's; a new main value always reopens the secondary header.
pub fn group_meetings(
    meetings: &[Meeting],
    style: &LayoutStyle,
    main_field: HeaderField,
    second_field: Option<HeaderField>,
) -> Vec<ContentGroup> {
    let mut groups = Vec::with_capacity(meetings.len());
    let mut current_main: Option<String> = None;
    let mut current_second: Option<String> = None;

    for meeting in meetings {
        let mut blocks = Vec::with_capacity(3);

        let main_label = meeting.group_label(main_field);
        if current_main.as_deref() != Some(main_label.as_str()) {
            blocks.push(LayoutBlock::Header(
                style.header(HeaderLevel::Main, main_label.clone()),
            ));
            current_main = Some(main_label);
            current_second = None;
        }

        if let Some(field) = second_field {
            let label = meeting.group_label(field);
            if current_second.as_deref() != Some(label.as_str()) {
                blocks.push(LayoutBlock::Header(
                    style.header(HeaderLevel::Sub, label.clone()),
                ));
                current_second = Some(label);
            }
        }

        blocks.push(LayoutBlock::Meeting(style.meeting_row(meeting.clone())));
        groups.push(ContentGroup::section(blocks));
    }

    groups
}

/// Headers whose sections are still open in the current column
#[derive(Debug, Default)]
struct OpenSections {
    main: Option<SectionHeader>,
    sub: Option<SectionHeader>,
}

impl OpenSections {
    fn track(&mut self, group: &ContentGroup) {
        if group.kind != GroupKind::Section {
            self.main = None;
            self.sub = None;
            return;
        }
        for header in group.blocks.iter().filter_map(LayoutBlock::as_header) {
            match header.level {
                HeaderLevel::Main => {
                    self.main = Some(header.clone());
                    self.sub = None;
                }
                HeaderLevel::Sub => self.sub = Some(header.clone()),
                HeaderLevel::Table => {}
            }
        }
    }

    /// Headers to repeat above `group` at the top of a new column
    fn continuations(&self, group: &ContentGroup) -> Vec<SectionHeader> {
        if group.kind != GroupKind::Section || group.opens_with(HeaderLevel::Main) {
            return Vec::new();
        }
        let mut headers: Vec<SectionHeader> = self.main.iter().map(SectionHeader::continued).collect();
        if !group.opens_with(HeaderLevel::Sub) {
            headers.extend(self.sub.iter().map(SectionHeader::continued));
        }
        headers
    }
}

/// Pour groups into columns of `capacity` height.
///
/// Returns the blocks interleaved with column breaks. Fails with
/// [`BookletError::LayoutInvariant`] when a group cannot fit in an empty
/// column, continuation headers included.
pub fn paginate(
    groups: impl IntoIterator<Item = ContentGroup>,
    capacity: f32,
    ctx: &LayoutContext<'_>,
) -> Result<Vec<LayoutBlock>> {
    let mut blocks = Vec::new();
    let mut open = OpenSections::default();
    let mut position = 0.0_f32;
    let mut columns = 1;

    for group in groups {
        let height = group.height(ctx);
        if height > capacity {
            return Err(BookletError::LayoutInvariant {
                what: group.describe(),
                height_mm: height,
                capacity_mm: capacity,
            });
        }

        let overflows = position + height > capacity;
        let wants_fresh = group.kind == GroupKind::FullColumn && position > 0.0;
        if overflows || wants_fresh {
            blocks.push(LayoutBlock::ColumnBreak);
            columns += 1;

            let carried = open.continuations(&group);
            let carried_height: f32 = carried.iter().map(|h| h.height(ctx)).sum();
            if carried_height + height > capacity {
                return Err(BookletError::LayoutInvariant {
                    what: format!("{} with continuation headers", group.describe()),
                    height_mm: carried_height + height,
                    capacity_mm: capacity,
                });
            }

            log::debug!(
                "column {} starts at {}, {} continuation header(s)",
                columns,
                group.describe(),
                carried.len()
            );
            blocks.extend(carried.into_iter().map(LayoutBlock::Header));
            position = carried_height;
        }

        open.track(&group);
        position += height;
        blocks.extend(group.blocks);
    }

    Ok(blocks)
}

/// Kind of logical page, used for statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Content,
    Filler,
    Blank,
}

/// One column's worth of blocks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogicalPage {
    pub blocks: Vec<LayoutBlock>,
}

impl LogicalPage {
    pub fn new(blocks: Vec<LayoutBlock>) -> Self {
        Self { blocks }
    }

    pub fn blank() -> Self {
        Self::new(vec![LayoutBlock::BlankPage])
    }

    pub fn kind(&self) -> PageKind {
        match self.blocks.as_slice() {
            [LayoutBlock::Filler(_)] => PageKind::Filler,
            [LayoutBlock::BlankPage] => PageKind::Blank,
            _ => PageKind::Content,
        }
    }

    pub fn height(&self, ctx: &LayoutContext<'_>) -> f32 {
        self.blocks.iter().map(|b| b.height(ctx)).sum()
    }
}

/// Split paginated blocks into logical pages at each column break
pub fn split_pages(blocks: Vec<LayoutBlock>) -> Vec<LogicalPage> {
    let mut pages = Vec::new();
    let mut current = Vec::new();
    for block in blocks {
        if matches!(block, LayoutBlock::ColumnBreak) {
            pages.push(LogicalPage::new(std::mem::take(&mut current)));
        } else {
            current.push(block);
        }
    }
    if !current.is_empty() {
        pages.push(LogicalPage::new(current));
    }
    pages
}
