//! Drawable layout blocks
//!
//! Every block reports its height and draws itself through the same
//! [`LayoutContext`], so pagination and drawing agree on how much room a
//! block takes. Positions are the block's top-left corner; `draw` returns
//! the height consumed so callers can stack blocks down a column.

use crate::balance::{balance_rows, pad_to_even};
use crate::canvas::{Align, Border, Canvas, Point, TextCell};
use crate::constants::*;
use crate::fillers::FillerContent;
use crate::metrics::{FontSpec, LayoutContext};
use crate::options::BookletOptions;
use crate::records::{Format, Meeting};
use crate::text::{StyledLine, StyledWrap, wrap_plain};
use crate::types::Rgb;

const CONTINUED_SUFFIX: &str = " (Continued)";

/// Section header flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLevel {
    /// White on black, opens a main grouping
    Main,
    /// Black on silver, opens a secondary grouping
    Sub,
    /// Black on white, titles a table
    Table,
}

impl HeaderLevel {
    /// (text, fill) colours
    pub fn colors(self) -> (Rgb, Rgb) {
        match self {
            HeaderLevel::Main => (Rgb::WHITE, Rgb::BLACK),
            HeaderLevel::Sub => (Rgb::BLACK, Rgb::SILVER),
            HeaderLevel::Table => (Rgb::BLACK, Rgb::WHITE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionHeader {
    pub level: HeaderLevel,
    pub text: String,
    pub font: FontSpec,
    pub width: f32,
}

impl SectionHeader {
    pub fn new(level: HeaderLevel, text: impl Into<String>, font: FontSpec, width: f32) -> Self {
        Self {
            level,
            text: text.into(),
            font,
            width,
        }
    }

    /// Copy for the top of a column that resumes this section
    pub fn continued(&self) -> Self {
        let mut header = self.clone();
        if !header.text.ends_with(CONTINUED_SUFFIX) {
            header.text.push_str(CONTINUED_SUFFIX);
        }
        header
    }

    fn cell_height(&self) -> f32 {
        self.font.size_mm() + HEADER_LINE_PADDING_MM
    }

    pub fn height(&self, _ctx: &LayoutContext<'_>) -> f32 {
        self.cell_height() + HEADER_GAP_MM
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, ctx: &LayoutContext<'_>, origin: Point) -> f32 {
        let (color, fill) = self.level.colors();
        canvas.draw_cell(
            &TextCell::new(origin, self.width, self.cell_height(), &self.text, self.font)
                .align(Align::Center)
                .color(color)
                .fill(fill),
        );
        self.height(ctx)
    }
}

/// Widths of the three meeting columns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeetingColumns {
    pub total_width: f32,
    pub time_width: f32,
    pub duration_width: f32,
}

impl MeetingColumns {
    pub fn meeting_width(&self) -> f32 {
        self.total_width - self.time_width - self.duration_width
    }
}

/// One listing: time, duration, bold name with formats, then location
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingRow {
    pub meeting: Meeting,
    pub columns: MeetingColumns,
    /// Regular face; the name line uses the bold variant
    pub font: FontSpec,
    pub separator: Rgb,
}

impl MeetingRow {
    /// Name followed by the format codes in parentheses
    pub fn title(&self) -> String {
        let name = self.meeting.name.trim();
        let formats = self.meeting.formats.trim();
        if formats.is_empty() {
            name.to_string()
        } else {
            format!("{} ({})", name, formats)
        }
    }

    fn title_font(&self) -> FontSpec {
        self.font.with_style(crate::metrics::FontStyle::BOLD)
    }

    fn title_lines(&self, ctx: &LayoutContext<'_>) -> Vec<String> {
        wrap_plain(ctx, &self.title(), &self.title_font(), self.columns.meeting_width())
    }

    fn location_lines(&self, ctx: &LayoutContext<'_>) -> Vec<String> {
        wrap_plain(
            ctx,
            &self.meeting.location(),
            &self.font,
            self.columns.meeting_width(),
        )
    }

    pub fn height(&self, ctx: &LayoutContext<'_>) -> f32 {
        let lines = self.title_lines(ctx).len() + self.location_lines(ctx).len();
        // 1mm above and below the separator
        lines as f32 * self.font.size_mm() + ctx.line_width_mm + 2.0
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, ctx: &LayoutContext<'_>, origin: Point) -> f32 {
        let line_height = self.font.size_mm();
        let bold = self.title_font();
        let columns = self.columns;

        canvas.draw_cell(
            &TextCell::new(
                origin,
                columns.time_width,
                line_height,
                self.meeting.display_start_time(),
                bold,
            )
            .align(Align::Center),
        );
        canvas.draw_cell(
            &TextCell::new(
                origin.offset(columns.time_width, 0.0),
                columns.duration_width,
                line_height,
                self.meeting.display_duration(),
                bold,
            )
            .align(Align::Center),
        );

        let text_x = columns.time_width + columns.duration_width;
        let mut y = 0.0;
        let title = self.title_lines(ctx).into_iter().map(|line| (line, bold));
        let location = self.location_lines(ctx).into_iter().map(|line| (line, self.font));
        for (line, font) in title.chain(location) {
            canvas.draw_cell(&TextCell::new(
                origin.offset(text_x, y),
                columns.meeting_width(),
                line_height,
                line,
                font,
            ));
            y += line_height;
        }

        let height = self.height(ctx);
        let separator_y = height - 1.0 - ctx.line_width_mm;
        canvas.draw_line(
            origin.offset(0.0, separator_y),
            origin.offset(columns.total_width, separator_y),
            self.separator,
            ctx.line_width_mm,
        );
        height
    }
}

/// A key/name pair in the formats legend
#[derive(Debug, Clone, PartialEq)]
pub struct FormatEntry {
    pub format: Format,
    pub key_width: f32,
    pub name_width: f32,
    /// Regular face; the key uses the bold variant
    pub font: FontSpec,
}

impl FormatEntry {
    /// Empty entry with the same geometry
    pub fn blank_like(&self) -> Self {
        Self {
            format: Format::blank(),
            ..self.clone()
        }
    }

    fn line_height(&self) -> f32 {
        self.font.size_mm() + TABLE_LINE_PADDING_MM
    }

    fn name_lines(&self, ctx: &LayoutContext<'_>) -> Vec<String> {
        wrap_plain(ctx, &self.format.name, &self.font, self.name_width)
    }

    /// Height of this cell on its own; blank names still take one line
    pub fn height(&self, ctx: &LayoutContext<'_>) -> f32 {
        self.name_lines(ctx).len().max(1) as f32 * self.line_height()
    }

    /// Draw the key and name cells stretched to `height`
    pub fn draw_cell(
        &self,
        canvas: &mut dyn Canvas,
        ctx: &LayoutContext<'_>,
        origin: Point,
        height: f32,
        border: Border,
    ) {
        let bold = self.font.with_style(crate::metrics::FontStyle::BOLD);
        canvas.draw_cell(
            &TextCell::new(origin, self.key_width, height, &self.format.key, bold).border(border),
        );

        let name_origin = origin.offset(self.key_width, 0.0);
        canvas.draw_cell(
            &TextCell::new(name_origin, self.name_width, height, "", self.font)
                .border(border.without_left()),
        );
        let line_height = self.line_height();
        for (i, line) in self.name_lines(ctx).into_iter().enumerate() {
            canvas.draw_cell(&TextCell::new(
                name_origin.offset(0.0, i as f32 * line_height),
                self.name_width,
                line_height,
                line,
                self.font,
            ));
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, ctx: &LayoutContext<'_>, origin: Point) -> f32 {
        let height = self.height(ctx);
        self.draw_cell(canvas, ctx, origin, height, Border::ALL);
        height
    }
}

/// Two-column legend of format codes under a title
#[derive(Debug, Clone, PartialEq)]
pub struct FormatsTable {
    pub header: SectionHeader,
    /// Always an even count; the last may be blank
    pub entries: Vec<FormatEntry>,
    pub total_width: f32,
    /// Horizontal space split evenly either side of the table
    pub margin: f32,
}

impl FormatsTable {
    pub fn new(header: SectionHeader, mut entries: Vec<FormatEntry>, total_width: f32, margin: f32) -> Self {
        pad_to_even(&mut entries);
        Self {
            header,
            entries,
            total_width,
            margin,
        }
    }

    /// Width of one key+name cell pair
    pub fn cell_width(&self) -> f32 {
        (self.total_width - self.margin) / 2.0
    }

    pub fn height(&self, ctx: &LayoutContext<'_>) -> f32 {
        self.header.height(ctx)
            + balance_rows(&self.entries, ctx)
                .iter()
                .map(|row| row.height_mm)
                .sum::<f32>()
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, ctx: &LayoutContext<'_>, origin: Point) -> f32 {
        let mut y = self.header.draw(canvas, ctx, origin);
        let left_x = self.margin / 2.0;
        let cell_width = self.cell_width();

        for (i, row) in balance_rows(&self.entries, ctx).iter().enumerate() {
            let left_border = if i == 0 {
                Border::ALL
            } else {
                Border::ALL.without_top()
            };
            row.left
                .draw_cell(canvas, ctx, origin.offset(left_x, y), row.height_mm, left_border);
            if let Some(right) = row.right {
                right.draw_cell(
                    canvas,
                    ctx,
                    origin.offset(left_x + cell_width, y),
                    row.height_mm,
                    left_border.without_left(),
                );
            }
            y += row.height_mm;
        }
        y
    }
}

/// Ruled rows for writing down names and phone numbers
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneList {
    pub header: SectionHeader,
    /// Rows including the label row
    pub rows: usize,
    pub width: f32,
    pub font: FontSpec,
}

impl PhoneList {
    /// As many rows as fit under the header in `capacity`
    pub fn fitting(header: SectionHeader, capacity: f32, width: f32, font: FontSpec, ctx: &LayoutContext<'_>) -> Self {
        let room = (capacity - header.height(ctx)).max(0.0);
        Self {
            header,
            rows: (room / PHONE_ROW_HEIGHT_MM).floor() as usize,
            width,
            font,
        }
    }

    pub fn height(&self, ctx: &LayoutContext<'_>) -> f32 {
        self.header.height(ctx) + self.rows as f32 * PHONE_ROW_HEIGHT_MM
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, ctx: &LayoutContext<'_>, origin: Point) -> f32 {
        let mut y = self.header.draw(canvas, ctx, origin);
        let name_width = self.width * PHONE_NAME_SHARE;
        let bold = self.font.with_style(crate::metrics::FontStyle::BOLD);

        for row in 0..self.rows {
            let (name, phone, border) = if row == 0 {
                ("Name", "Phone", Border::ALL)
            } else {
                ("", "", Border::ALL.without_top())
            };
            canvas.draw_cell(
                &TextCell::new(origin.offset(0.0, y), name_width, PHONE_ROW_HEIGHT_MM, name, bold)
                    .border(border),
            );
            canvas.draw_cell(
                &TextCell::new(
                    origin.offset(name_width, y),
                    self.width - name_width,
                    PHONE_ROW_HEIGHT_MM,
                    phone,
                    bold,
                )
                .border(border.without_left()),
            );
            y += PHONE_ROW_HEIGHT_MM;
        }
        y
    }
}

/// A filler list laid out at one font size
#[derive(Debug, Clone, PartialEq)]
pub struct FillerPage {
    pub title: SectionHeader,
    /// Items as styled markup, already numbered
    pub items: Vec<String>,
    pub font: FontSpec,
    pub width: f32,
}

impl FillerPage {
    pub fn new(title: SectionHeader, content: &FillerContent, font: FontSpec, width: f32) -> Self {
        Self {
            title,
            items: content.numbered_items().collect(),
            font,
            width,
        }
    }

    fn wraps<'a>(&'a self, ctx: &LayoutContext<'a>) -> impl Iterator<Item = StyledWrap<'a>> + 'a {
        let ctx = *ctx;
        self.items
            .iter()
            .map(move |item| StyledWrap::new(ctx, item, self.font, self.width))
    }

    pub fn height(&self, ctx: &LayoutContext<'_>) -> f32 {
        let line_height = self.font.size_mm();
        self.title.height(ctx)
            + self
                .wraps(ctx)
                .map(|wrap| wrap.line_count() as f32 * line_height + FILLER_ITEM_GAP_MM)
                .sum::<f32>()
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, ctx: &LayoutContext<'_>, origin: Point) -> f32 {
        let line_height = self.font.size_mm();
        let mut y = self.title.draw(canvas, ctx, origin);
        for wrap in self.wraps(ctx) {
            for line in wrap.lines() {
                draw_styled_line(canvas, ctx, &line, &self.font, origin.offset(0.0, y));
                y += line_height;
            }
            y += FILLER_ITEM_GAP_MM;
        }
        y
    }
}

/// Draw each run as its own cell, advancing by the measured run width
fn draw_styled_line(
    canvas: &mut dyn Canvas,
    ctx: &LayoutContext<'_>,
    line: &StyledLine,
    font: &FontSpec,
    origin: Point,
) {
    let mut x = 0.0;
    for run in &line.runs {
        let run_font = font.with_style(run.style);
        let width = ctx.run_width(&run.text, &run_font);
        canvas.draw_cell(&TextCell::new(
            origin.offset(x, 0.0),
            width,
            font.size_mm(),
            &run.text,
            run_font,
        ));
        x += width;
    }
}

/// Everything a column can hold
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutBlock {
    Header(SectionHeader),
    Meeting(MeetingRow),
    FormatEntry(FormatEntry),
    FormatsTable(FormatsTable),
    PhoneList(PhoneList),
    Filler(FillerPage),
    BlankPage,
    /// End of a column; never drawn
    ColumnBreak,
}

impl LayoutBlock {
    pub fn height(&self, ctx: &LayoutContext<'_>) -> f32 {
        match self {
            LayoutBlock::Header(header) => header.height(ctx),
            LayoutBlock::Meeting(row) => row.height(ctx),
            LayoutBlock::FormatEntry(entry) => entry.height(ctx),
            LayoutBlock::FormatsTable(table) => table.height(ctx),
            LayoutBlock::PhoneList(list) => list.height(ctx),
            LayoutBlock::Filler(filler) => filler.height(ctx),
            LayoutBlock::BlankPage | LayoutBlock::ColumnBreak => 0.0,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, ctx: &LayoutContext<'_>, origin: Point) -> f32 {
        match self {
            LayoutBlock::Header(header) => header.draw(canvas, ctx, origin),
            LayoutBlock::Meeting(row) => row.draw(canvas, ctx, origin),
            LayoutBlock::FormatEntry(entry) => entry.draw(canvas, ctx, origin),
            LayoutBlock::FormatsTable(table) => table.draw(canvas, ctx, origin),
            LayoutBlock::PhoneList(list) => list.draw(canvas, ctx, origin),
            LayoutBlock::Filler(filler) => filler.draw(canvas, ctx, origin),
            LayoutBlock::BlankPage | LayoutBlock::ColumnBreak => 0.0,
        }
    }

    pub fn as_header(&self) -> Option<&SectionHeader> {
        match self {
            LayoutBlock::Header(header) => Some(header),
            _ => None,
        }
    }

    pub fn is_header(&self, level: HeaderLevel) -> bool {
        self.as_header().is_some_and(|h| h.level == level)
    }

    /// Short description for diagnostics
    pub fn describe(&self) -> String {
        match self {
            LayoutBlock::Header(header) => format!("header '{}'", header.text),
            LayoutBlock::Meeting(row) => format!("meeting '{}'", row.meeting.name),
            LayoutBlock::FormatEntry(entry) => format!("format '{}'", entry.format.key),
            LayoutBlock::FormatsTable(table) => format!("formats table '{}'", table.header.text),
            LayoutBlock::PhoneList(_) => "phone list".to_string(),
            LayoutBlock::Filler(filler) => format!("filler '{}'", filler.title.text),
            LayoutBlock::BlankPage => "blank page".to_string(),
            LayoutBlock::ColumnBreak => "column break".to_string(),
        }
    }
}

// =============================================================================
// Block construction
// =============================================================================

/// Fonts and widths shared by every block of one booklet
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStyle {
    pub column_width: f32,
    /// Bold header face
    pub header_font: FontSpec,
    /// Regular body face
    pub body_font: FontSpec,
    pub time_column_width: f32,
    pub duration_column_width: f32,
    pub separator: Rgb,
    pub format_key_column_width: f32,
    pub table_margin: f32,
    pub formats_table_title: String,
}

impl LayoutStyle {
    pub fn from_options(options: &BookletOptions) -> Self {
        Self {
            column_width: options.geometry().column_width_mm,
            header_font: FontSpec::bold(options.header_font, options.header_font_size_pt),
            body_font: FontSpec::plain(options.meeting_font, options.meeting_font_size_pt),
            time_column_width: options.time_column_width_mm,
            duration_column_width: options.duration_column_width_mm,
            separator: options.separator_rgb(),
            format_key_column_width: options.format_key_column_width_mm,
            table_margin: options.table_margin_mm,
            formats_table_title: options.formats_table_title.clone(),
        }
    }

    pub fn header(&self, level: HeaderLevel, text: impl Into<String>) -> SectionHeader {
        SectionHeader::new(level, text, self.header_font, self.column_width)
    }

    pub fn meeting_row(&self, meeting: Meeting) -> MeetingRow {
        MeetingRow {
            meeting,
            columns: MeetingColumns {
                total_width: self.column_width,
                time_width: self.time_column_width,
                duration_width: self.duration_column_width,
            },
            font: self.body_font,
            separator: self.separator,
        }
    }

    pub fn format_entry(&self, format: Format) -> FormatEntry {
        let cell_width = (self.column_width - self.table_margin) / 2.0;
        FormatEntry {
            format,
            key_width: self.format_key_column_width,
            name_width: cell_width - self.format_key_column_width,
            font: self.body_font,
        }
    }

    pub fn formats_table(&self, formats: &[Format]) -> FormatsTable {
        FormatsTable::new(
            self.header(HeaderLevel::Table, self.formats_table_title.clone()),
            formats.iter().cloned().map(|f| self.format_entry(f)).collect(),
            self.column_width,
            self.table_margin,
        )
    }

    pub fn phone_list(&self, capacity: f32, ctx: &LayoutContext<'_>) -> PhoneList {
        PhoneList::fitting(
            self.header(HeaderLevel::Table, "Phone List"),
            capacity,
            self.column_width,
            self.body_font,
            ctx,
        )
    }

    pub fn filler_page(&self, content: &FillerContent, size_pt: f32) -> FillerPage {
        FillerPage::new(
            self.header(HeaderLevel::Main, content.title.clone()),
            content,
            self.body_font.with_size(size_pt),
            self.column_width,
        )
    }
}
