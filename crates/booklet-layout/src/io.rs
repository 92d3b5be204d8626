//! Record file I/O

use crate::booklet::BookletInput;
use crate::fillers::FillerContent;
use crate::records::RawRecord;
use crate::types::*;
use serde::Deserialize;
use std::path::Path;

/// Meeting and format records as exported by the meeting-list service.
///
/// Meetings are expected in listing order (grouping fields, then start time).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordSet {
    #[serde(default)]
    pub meetings: Vec<RawRecord>,
    #[serde(default)]
    pub formats: Vec<RawRecord>,
    /// Replaces the built-in filler texts when present
    #[serde(default)]
    pub fillers: Option<Vec<FillerContent>>,
}

impl RecordSet {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Normalize the records, keeping the built-in fillers unless overridden
    pub fn into_input(self) -> Result<BookletInput> {
        let input = BookletInput::from_records(&self.meetings, &self.formats)?;
        Ok(match self.fillers {
            Some(fillers) => input.with_fillers(fillers),
            None => input,
        })
    }
}

/// Load a record set from a JSON file
pub async fn load_records(path: impl AsRef<Path>) -> Result<RecordSet> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let records = tokio::task::spawn_blocking(move || RecordSet::from_slice(&bytes)).await??;
    log::info!(
        "Loaded {} meeting and {} format records from {}",
        records.meetings.len(),
        records.formats.len(),
        path.display()
    );
    Ok(records)
}
