use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel for a field the extraction could not recover.
pub const NOT_SPECIFIED: &str = "No especificado";

/// MIME type of a native Google Sheets file.
pub const GOOGLE_SHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// The two labelled column sections a comparison sheet carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    PptoMetaHg,
    Expediente,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::PptoMetaHg => write!(f, "PPTO META HG"),
            SectionKind::Expediente => write!(f, "EXPEDIENTE"),
        }
    }
}

/// The three figures recovered from a comparison sheet.
///
/// Each field holds a formatted amount ("S/ 39,488.25") or [`NOT_SPECIFIED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub monto_cc: String,
    pub ppto_meta_hg: String,
    pub expediente: String,
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self {
            monto_cc: NOT_SPECIFIED.to_string(),
            ppto_meta_hg: NOT_SPECIFIED.to_string(),
            expediente: NOT_SPECIFIED.to_string(),
        }
    }
}

impl ExtractionResult {
    /// Fill fields still unset from `other`. A field already recovered
    /// from an earlier source is never overwritten.
    pub fn merge_missing(&mut self, other: &ExtractionResult) {
        merge_field(&mut self.monto_cc, &other.monto_cc);
        merge_field(&mut self.ppto_meta_hg, &other.ppto_meta_hg);
        merge_field(&mut self.expediente, &other.expediente);
    }

    /// Both the winning-vendor amount and the target budget are present.
    /// The case reference is optional for completeness.
    pub fn is_complete(&self) -> bool {
        self.monto_cc != NOT_SPECIFIED && self.ppto_meta_hg != NOT_SPECIFIED
    }

    pub fn any_specified(&self) -> bool {
        self.monto_cc != NOT_SPECIFIED
            || self.ppto_meta_hg != NOT_SPECIFIED
            || self.expediente != NOT_SPECIFIED
    }
}

fn merge_field(target: &mut String, source: &str) {
    if target == NOT_SPECIFIED && source != NOT_SPECIFIED {
        *target = source.to_string();
    }
}

/// A file listed from a remote folder, before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    pub name: String,
    pub id: String,
    pub mime_type: String,
}

impl CandidateFile {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn is_google_sheet(&self) -> bool {
        self.mime_type == GOOGLE_SHEET_MIME
    }

    /// Matches the folder-listing filter: native sheets, Excel MIME
    /// families, or an Excel-looking file name.
    pub fn is_spreadsheet(&self) -> bool {
        self.is_google_sheet()
            || self.mime_type.ends_with("spreadsheetml.sheet")
            || self.mime_type.ends_with("ms-excel")
            || self.mime_type.ends_with("openxmlformats")
            || is_spreadsheet_name(&self.name)
    }
}

/// A candidate with its relevance score for a given subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub file: CandidateFile,
    pub score: f64,
}

/// What kind of remote object a discovered link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    Folder,
    File,
    Sheet,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefKind::Folder => write!(f, "folder"),
            RefKind::File => write!(f, "file"),
            RefKind::Sheet => write!(f, "sheet"),
        }
    }
}

/// An externally-resolved spreadsheet reference (folder, file or sheet id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRef {
    pub kind: RefKind,
    pub id: String,
}

impl SheetRef {
    pub fn new(kind: RefKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// A message attachment handed to the orchestrator.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn is_spreadsheet(&self) -> bool {
        is_spreadsheet_name(&self.filename)
    }
}

/// Excel-looking file name check shared by attachments and folder listings.
pub fn is_spreadsheet_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".xlsx") || lower.ends_with(".xlsm") || lower.ends_with(".xls")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_not_specified() {
        let r = ExtractionResult::default();
        assert_eq!(r.monto_cc, NOT_SPECIFIED);
        assert_eq!(r.ppto_meta_hg, NOT_SPECIFIED);
        assert_eq!(r.expediente, NOT_SPECIFIED);
        assert!(!r.any_specified());
    }

    #[test]
    fn test_merge_fills_only_missing() {
        let mut first = ExtractionResult {
            monto_cc: "S/ 1,000.00".into(),
            ..Default::default()
        };
        let second = ExtractionResult {
            monto_cc: "S/ 9,999.00".into(),
            ppto_meta_hg: "S/ 2,000.00".into(),
            ..Default::default()
        };
        first.merge_missing(&second);
        assert_eq!(first.monto_cc, "S/ 1,000.00");
        assert_eq!(first.ppto_meta_hg, "S/ 2,000.00");
        assert_eq!(first.expediente, NOT_SPECIFIED);
    }

    #[test]
    fn test_complete_ignores_expediente() {
        let r = ExtractionResult {
            monto_cc: "S/ 1.00".into(),
            ppto_meta_hg: "S/ 2.00".into(),
            expediente: NOT_SPECIFIED.into(),
        };
        assert!(r.is_complete());
    }

    #[test]
    fn test_spreadsheet_detection() {
        assert!(CandidateFile::new("a", "1", GOOGLE_SHEET_MIME).is_spreadsheet());
        assert!(CandidateFile::new(
            "b.xlsx",
            "2",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        )
        .is_spreadsheet());
        assert!(CandidateFile::new("c.xls", "3", "application/octet-stream").is_spreadsheet());
        assert!(!CandidateFile::new("notes.pdf", "4", "application/pdf").is_spreadsheet());
    }

    #[test]
    fn test_spreadsheet_name_extensions() {
        assert!(is_spreadsheet_name("Comparativo VS.xlsx"));
        assert!(is_spreadsheet_name("old.XLS"));
        assert!(is_spreadsheet_name("macro.xlsm"));
        assert!(!is_spreadsheet_name("resumen.csv"));
    }
}
