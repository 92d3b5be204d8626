mod logger;

use anyhow::{Context, Result};
use booklet_layout::{
    BookletOptions, BookletStatistics, BuiltinMetrics, DrawOp, LayoutContext, RecordingCanvas,
    layout_booklet, load_records, render_booklet,
};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use logger::StderrLogger;

#[derive(Parser)]
#[command(name = "booklet", about = "Meeting list booklet generator", version)]
struct Cli {
    /// Input JSON file with "meetings", "formats" and optional "fillers"
    input: PathBuf,

    /// Output PDF file
    #[arg(short, long, default_value = "meeting_list.pdf")]
    output: PathBuf,

    /// Load options from a JSON file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Impose two pages per landscape sheet, padded for folding
    #[arg(long, conflicts_with = "no_bookletize")]
    bookletize: bool,

    /// One half-sheet page per PDF page, overriding the config file
    #[arg(long)]
    no_bookletize: bool,

    /// Field for the main section headers
    #[arg(long, value_enum)]
    main_header: Option<HeaderArg>,

    /// Field for the second-level headers
    #[arg(long, value_enum, conflicts_with = "no_second_header")]
    second_header: Option<HeaderArg>,

    /// Drop the second-level headers set in the config file
    #[arg(long)]
    no_second_header: bool,

    /// Font for meeting rows
    #[arg(long, value_enum)]
    meeting_font: Option<FontArg>,

    /// Meeting font size in points
    #[arg(long)]
    meeting_font_size: Option<f32>,

    /// Font for headers
    #[arg(long, value_enum)]
    header_font: Option<FontArg>,

    /// Header font size in points
    #[arg(long)]
    header_font_size: Option<f32>,

    /// Time column width in mm
    #[arg(long)]
    time_column_width: Option<f32>,

    /// Duration column width in mm
    #[arg(long)]
    duration_column_width: Option<f32>,

    /// Separator line colour as #RRGGBB
    #[arg(long)]
    separator_color: Option<String>,

    /// Page margin in mm
    #[arg(long)]
    margin: Option<f32>,

    /// Leave out the format legend table
    #[arg(long)]
    no_formats_table: bool,

    /// Title of the format legend table
    #[arg(long)]
    formats_table_title: Option<String>,

    /// Append a column of blank name/phone rows
    #[arg(long, conflicts_with = "no_phone_list")]
    phone_list: bool,

    /// Leave out the phone list, overriding the config file
    #[arg(long)]
    no_phone_list: bool,

    /// Smallest filler font size in points
    #[arg(long)]
    filler_min_size: Option<f32>,

    /// Largest filler font size in points
    #[arg(long)]
    filler_max_size: Option<f32>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// Log draw operations instead of writing a PDF
    #[arg(long)]
    dry_run: bool,

    /// More log output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum HeaderArg {
    Weekday,
    City,
}

#[derive(Clone, Copy, ValueEnum)]
enum FontArg {
    Helvetica,
    Times,
    Courier,
}

impl From<PaperArg> for booklet_layout::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<HeaderArg> for booklet_layout::HeaderField {
    fn from(arg: HeaderArg) -> Self {
        match arg {
            HeaderArg::Weekday => Self::Weekday,
            HeaderArg::City => Self::City,
        }
    }
}

impl From<FontArg> for booklet_layout::FontFamily {
    fn from(arg: FontArg) -> Self {
        match arg {
            FontArg::Helvetica => Self::Helvetica,
            FontArg::Times => Self::Times,
            FontArg::Courier => Self::Courier,
        }
    }
}

impl Cli {
    /// Start from the config file (or defaults) and apply the flags that were given
    async fn options(&self) -> Result<BookletOptions> {
        let mut options = match &self.config {
            Some(path) => BookletOptions::load(path)
                .await
                .with_context(|| format!("Loading options from {}", path.display()))?,
            None => BookletOptions::default(),
        };
        self.apply(&mut options);
        options.validate()?;
        Ok(options)
    }

    fn apply(&self, options: &mut BookletOptions) {
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if self.bookletize {
            options.bookletize = true;
        }
        if self.no_bookletize {
            options.bookletize = false;
        }
        if let Some(field) = self.main_header {
            options.main_header_field = field.into();
        }
        if let Some(field) = self.second_header {
            options.second_header_field = Some(field.into());
        }
        if self.no_second_header {
            options.second_header_field = None;
        }
        if let Some(font) = self.meeting_font {
            options.meeting_font = font.into();
        }
        if let Some(size) = self.meeting_font_size {
            options.meeting_font_size_pt = size;
        }
        if let Some(font) = self.header_font {
            options.header_font = font.into();
        }
        if let Some(size) = self.header_font_size {
            options.header_font_size_pt = size;
        }
        if let Some(width) = self.time_column_width {
            options.time_column_width_mm = width;
        }
        if let Some(width) = self.duration_column_width {
            options.duration_column_width_mm = width;
        }
        if let Some(color) = &self.separator_color {
            options.separator_color = color.clone();
        }
        if let Some(margin) = self.margin {
            options.margin_mm = margin;
        }
        if self.no_formats_table {
            options.include_formats_table = false;
        }
        if let Some(title) = &self.formats_table_title {
            options.formats_table_title = title.clone();
        }
        if self.phone_list {
            options.phone_list = true;
        }
        if self.no_phone_list {
            options.phone_list = false;
        }
        if let Some(size) = self.filler_min_size {
            options.filler_min_font_size_pt = size;
        }
        if let Some(size) = self.filler_max_size {
            options.filler_max_font_size_pt = size;
        }
    }
}

fn print_statistics(stats: &BookletStatistics) {
    println!("Booklet Statistics:");
    println!("  Meetings: {}", stats.meetings);
    println!("  Content pages: {}", stats.content_pages);
    println!("  Filler pages added: {}", stats.filler_pages);
    println!("  Blank pages added: {}", stats.blank_pages);
    println!("  Logical pages: {}", stats.logical_pages);
    println!("  Physical pages: {}", stats.physical_pages);
    println!("  Sheets: {}", stats.sheets);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    StderrLogger::new(StderrLogger::level_for(cli.verbose, cli.quiet)).init()?;

    let options = cli.options().await?;
    if let Some(path) = &cli.save_config {
        options
            .save(path)
            .await
            .with_context(|| format!("Saving options to {}", path.display()))?;
        log::info!("Saved options to {}", path.display());
    }

    let input = load_records(&cli.input)
        .await
        .with_context(|| format!("Reading {}", cli.input.display()))?
        .into_input()?;

    if cli.stats_only || cli.dry_run {
        let ctx = LayoutContext::new(&BuiltinMetrics);
        let layout = layout_booklet(&input, &options, &ctx)?;
        print_statistics(&layout.statistics);

        if cli.dry_run {
            let mut canvas = RecordingCanvas::new();
            render_booklet(&layout.pages, &layout.geometry, &mut canvas, &ctx);
            for op in &canvas.ops {
                match op {
                    DrawOp::NewPage { .. } => log::info!("{:?}", op),
                    _ => log::debug!("{:?}", op),
                }
            }
            println!("Dry run: {} draw operations", canvas.ops.len());
        }
        return Ok(());
    }

    let stats = booklet_pdf::generate_pdf(&input, &options, &cli.output).await?;
    print_statistics(&stats);
    println!("Generated booklet → {}", cli.output.display());

    Ok(())
}
