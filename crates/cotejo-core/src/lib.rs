pub mod error;
pub mod extract;
pub mod grid;
pub mod matching;
pub mod model;
pub mod parsing;
pub mod profile;
pub mod sources;
pub mod text;
pub mod trace;

use error::CotejoError;
use grid::{rank_sheet_names, ValuesGrid, Workbook, MAX_SHEETS_PER_WORKBOOK};
use matching::{rank_candidates, MAX_FOLDER_CANDIDATES};
use model::{CandidateFile, ExtractionResult, RefKind, SheetRef, NOT_SPECIFIED};
use profile::MatchProfile;
use sources::{ExtractionRequest, RemoteSource, ScanOutcome};
use text::amounts::{scan_amount, scan_budget};
use trace::ScanTrace;

/// Main API entry point: scan every source a mail offers and return the
/// merged figures plus a trace of what was tried.
///
/// Sources are consulted in order of reliability: attachments first, then
/// linked folders, files and sheets, and finally the mail text itself.
/// Fields found by an earlier source are never overwritten, and the scan
/// stops as soon as both amounts are in hand.
pub fn extract_comparison(
    request: &ExtractionRequest,
    source: &dyn RemoteSource,
    profile: &MatchProfile,
) -> ScanOutcome {
    let mut result = ExtractionResult::default();
    let mut trace = ScanTrace::default();

    for attachment in &request.attachments {
        if result.is_complete() {
            break;
        }
        if !attachment.is_spreadsheet() {
            continue;
        }
        let label = format!("attachment:{}", attachment.filename);
        trace.tried(label.clone());
        match extract_from_workbook(&attachment.data, &attachment.filename) {
            Ok(partial) => result.merge_missing(&partial),
            Err(e) => trace.warn(label, e.to_string()),
        }
    }

    for reference in &request.refs {
        if result.is_complete() {
            break;
        }
        scan_reference(reference, request, source, profile, &mut result, &mut trace);
    }

    if !result.is_complete() && !request.body_text.is_empty() {
        trace.tried("body-text");
        if result.monto_cc == NOT_SPECIFIED {
            if let Some(amount) = scan_amount(&request.body_text) {
                result.monto_cc = amount;
            }
        }
        if result.ppto_meta_hg == NOT_SPECIFIED {
            if let Some(budget) = scan_budget(&request.body_text) {
                result.ppto_meta_hg = budget;
            }
        }
    }

    ScanOutcome { result, trace }
}

/// Extract the comparison figures from workbook bytes.
///
/// Worksheets are ranked by name and scanned best first, merging partial
/// results until the budget section turns up.
pub fn extract_from_workbook(
    bytes: &[u8],
    filename: &str,
) -> Result<ExtractionResult, CotejoError> {
    let mut workbook = Workbook::open(bytes, filename)?;
    let ranked = rank_sheet_names(&workbook.sheet_names());

    let mut result = ExtractionResult::default();
    for name in ranked.iter().take(MAX_SHEETS_PER_WORKBOOK) {
        let Ok(grid) = workbook.grid(name) else {
            continue;
        };
        result.merge_missing(&extract::extract_sections(&grid));
        if result.ppto_meta_hg != NOT_SPECIFIED {
            break;
        }
    }
    Ok(result)
}

/// Extract the comparison figures from one row-major range of unformatted
/// cell values, as a sheets API returns them.
pub fn extract_from_values(values: Vec<Vec<serde_json::Value>>) -> ExtractionResult {
    extract::extract_sections(&ValuesGrid::new(values))
}

/// Resolve one discovered reference, merging whatever it yields.
fn scan_reference(
    reference: &SheetRef,
    request: &ExtractionRequest,
    source: &dyn RemoteSource,
    profile: &MatchProfile,
    result: &mut ExtractionResult,
    trace: &mut ScanTrace,
) {
    let label = format!("{}:{}", reference.kind, reference.id);
    trace.tried(label.clone());

    match reference.kind {
        RefKind::Folder => {
            let files = match source.list_folder(&reference.id) {
                Ok(files) => files,
                Err(e) => {
                    trace.warn(label, e.to_string());
                    return;
                }
            };
            let spreadsheets: Vec<CandidateFile> =
                files.into_iter().filter(|f| f.is_spreadsheet()).collect();
            if spreadsheets.is_empty() {
                return;
            }
            let ranked = rank_candidates(&request.subject, &spreadsheets, profile);
            for candidate in ranked.iter().take(MAX_FOLDER_CANDIDATES) {
                if result.is_complete() {
                    break;
                }
                let partial = if candidate.file.is_google_sheet() {
                    scan_native_sheet(&candidate.file.id, source, trace)
                } else {
                    download_and_extract(&candidate.file, source, trace)
                };
                if let Some(partial) = partial {
                    result.merge_missing(&partial);
                }
            }
        }
        RefKind::Sheet => {
            if let Some(partial) = scan_native_sheet(&reference.id, source, trace) {
                result.merge_missing(&partial);
            }
        }
        RefKind::File => {
            let meta = match source.file_metadata(&reference.id) {
                Ok(meta) => meta,
                Err(e) => {
                    trace.warn(label, e.to_string());
                    return;
                }
            };
            let partial = if meta.is_google_sheet() {
                scan_native_sheet(&meta.id, source, trace)
            } else if meta.mime_type.contains("spreadsheet") || meta.mime_type.contains("excel") {
                download_and_extract(&meta, source, trace)
            } else {
                trace.warn(label, format!("unsupported MIME type '{}'", meta.mime_type));
                None
            };
            if let Some(partial) = partial {
                result.merge_missing(&partial);
            }
        }
    }
}

/// Scan a native sheet tab by tab, best-named tabs first.
fn scan_native_sheet(
    sheet_id: &str,
    source: &dyn RemoteSource,
    trace: &mut ScanTrace,
) -> Option<ExtractionResult> {
    let tabs = match source.sheet_tabs(sheet_id) {
        Ok(tabs) => tabs,
        Err(e) => {
            trace.warn(format!("sheet:{sheet_id}"), e.to_string());
            return None;
        }
    };

    let ranked = rank_sheet_names(&tabs);
    let mut result = ExtractionResult::default();
    for tab in ranked.iter().take(MAX_SHEETS_PER_WORKBOOK) {
        match source.tab_values(sheet_id, tab) {
            Ok(values) => {
                result.merge_missing(&extract_from_values(values));
                if result.ppto_meta_hg != NOT_SPECIFIED {
                    break;
                }
            }
            Err(e) => trace.warn(format!("sheet:{sheet_id}!{tab}"), e.to_string()),
        }
    }
    Some(result)
}

/// Download a binary spreadsheet and run the workbook extraction on it.
fn download_and_extract(
    file: &CandidateFile,
    source: &dyn RemoteSource,
    trace: &mut ScanTrace,
) -> Option<ExtractionResult> {
    let label = format!("file:{}", file.name);
    let bytes = match source.download_file(&file.id) {
        Ok(bytes) => bytes,
        Err(e) => {
            trace.warn(label, e.to_string());
            return None;
        }
    };
    match extract_from_workbook(&bytes, &file.name) {
        Ok(result) => Some(result),
        Err(e) => {
            trace.warn(label, e.to_string());
            None
        }
    }
}
