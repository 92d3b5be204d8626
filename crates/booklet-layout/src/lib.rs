pub mod balance;
pub mod blocks;
mod booklet;
pub mod canvas;
pub mod constants;
mod fillers;
pub mod impose;
#[cfg(feature = "serde")]
mod io;
pub mod metrics;
mod options;
pub mod paginate;
pub mod records;
mod render;
mod stats;
pub mod text;
mod types;

pub use booklet::{BookletInput, BookletLayout, layout_booklet, logical_pages};
pub use canvas::{Canvas, DrawOp, RecordingCanvas};
pub use fillers::{FillerContent, builtin_fillers};
#[cfg(feature = "serde")]
pub use io::{RecordSet, load_records};
pub use metrics::{BuiltinMetrics, FontSpec, FontStyle, LayoutContext, TextMeasure};
pub use options::*;
pub use records::{Format, Meeting, normalize_formats, normalize_meetings};
pub use render::render_booklet;
pub use stats::calculate_statistics;
pub use types::*;
