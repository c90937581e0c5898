//! The seam between the scan logic and remote storage.

use serde_json::Value;

use crate::error::CotejoError;
use crate::model::{Attachment, CandidateFile, ExtractionResult, SheetRef};
use crate::trace::ScanTrace;

/// Remote file storage as the scan needs it.
///
/// Implementations own all I/O. The orchestrator treats every method
/// failure as a skippable problem, never as a fatal one, so an
/// implementation is free to return errors for anything it cannot serve.
pub trait RemoteSource {
    /// Non-trashed files directly inside a folder.
    fn list_folder(&self, folder_id: &str) -> Result<Vec<CandidateFile>, CotejoError>;

    /// Name and MIME type of a single file.
    fn file_metadata(&self, file_id: &str) -> Result<CandidateFile, CotejoError>;

    /// Raw bytes of a binary file.
    fn download_file(&self, file_id: &str) -> Result<Vec<u8>, CotejoError>;

    /// Tab titles of a native sheet, in workbook order.
    fn sheet_tabs(&self, sheet_id: &str) -> Result<Vec<String>, CotejoError>;

    /// Unformatted cell values of one tab, row-major.
    fn tab_values(&self, sheet_id: &str, tab: &str) -> Result<Vec<Vec<Value>>, CotejoError>;
}

/// Everything one mail offers the scan: its attachments, the links its
/// text carried, and the text itself for last-resort mining.
#[derive(Debug, Clone, Default)]
pub struct ExtractionRequest {
    pub subject: String,
    pub attachments: Vec<Attachment>,
    pub refs: Vec<SheetRef>,
    pub body_text: String,
}

/// What a scan produced and how it got there.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub result: ExtractionResult,
    pub trace: ScanTrace,
}
