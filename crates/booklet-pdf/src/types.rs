use booklet_layout::BookletError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Layout error: {0}")]
    Layout(#[from] BookletError),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
