//! PDF output for booklet layouts, drawn with the standard PDF fonts

mod canvas;
mod pdf;
mod types;

pub use canvas::PdfCanvas;
pub use pdf::{generate_pdf, generate_pdf_bytes};
pub use types::*;
