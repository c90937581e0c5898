//! Filesystem-backed remote source.
//!
//! Folder ids are directory paths and file ids are file paths, which lets
//! the scan pipeline run against a local folder of downloaded comparisons.
//! A `.json` file plays the role of a native sheet: either a plain 2-D
//! array of cell values, or a list of `{ "title", "values" }` tabs.

use std::fs;
use std::path::Path;

use cotejo_core::error::CotejoError;
use cotejo_core::model::{CandidateFile, GOOGLE_SHEET_MIME};
use cotejo_core::sources::RemoteSource;
use serde::Deserialize;
use serde_json::Value;

pub struct FsSource;

#[derive(Deserialize)]
struct TabDef {
    title: String,
    values: Vec<Vec<Value>>,
}

impl FsSource {
    fn candidate(path: &Path) -> CandidateFile {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let mime = mime_for(&name);
        CandidateFile::new(name, path.display().to_string(), mime)
    }

    fn load_tabs(sheet_id: &str) -> Result<Vec<TabDef>, CotejoError> {
        let content = fs::read_to_string(sheet_id).map_err(|e| unavailable(sheet_id, &e))?;
        if let Ok(tabs) = serde_json::from_str::<Vec<TabDef>>(&content) {
            return Ok(tabs);
        }
        let rows: Vec<Vec<Value>> = serde_json::from_str(&content)?;
        Ok(vec![TabDef {
            title: "Hoja 1".into(),
            values: rows,
        }])
    }
}

impl RemoteSource for FsSource {
    fn list_folder(&self, folder_id: &str) -> Result<Vec<CandidateFile>, CotejoError> {
        let mut files = Vec::new();
        for entry in fs::read_dir(folder_id).map_err(|e| unavailable(folder_id, &e))? {
            let entry = entry.map_err(|e| unavailable(folder_id, &e))?;
            let path = entry.path();
            if path.is_file() {
                files.push(Self::candidate(&path));
            }
        }
        // Listing order feeds ranking tie-breaks; keep it stable.
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    fn file_metadata(&self, file_id: &str) -> Result<CandidateFile, CotejoError> {
        let path = Path::new(file_id);
        if !path.is_file() {
            return Err(CotejoError::SourceUnavailable {
                name: file_id.to_string(),
                reason: "no such file".into(),
            });
        }
        Ok(Self::candidate(path))
    }

    fn download_file(&self, file_id: &str) -> Result<Vec<u8>, CotejoError> {
        fs::read(file_id).map_err(|e| unavailable(file_id, &e))
    }

    fn sheet_tabs(&self, sheet_id: &str) -> Result<Vec<String>, CotejoError> {
        Ok(Self::load_tabs(sheet_id)?
            .into_iter()
            .map(|t| t.title)
            .collect())
    }

    fn tab_values(&self, sheet_id: &str, tab: &str) -> Result<Vec<Vec<Value>>, CotejoError> {
        Self::load_tabs(sheet_id)?
            .into_iter()
            .find(|t| t.title == tab)
            .map(|t| t.values)
            .ok_or_else(|| CotejoError::SourceUnavailable {
                name: format!("{sheet_id}!{tab}"),
                reason: "tab not found".into(),
            })
    }
}

fn mime_for(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    if lower.ends_with(".json") {
        GOOGLE_SHEET_MIME
    } else if lower.ends_with(".xlsx") {
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    } else if lower.ends_with(".xlsm") {
        "application/vnd.ms-excel.sheet.macroEnabled.12"
    } else if lower.ends_with(".xls") {
        "application/vnd.ms-excel"
    } else {
        "application/octet-stream"
    }
}

fn unavailable(name: &str, e: &std::io::Error) -> CotejoError {
    CotejoError::SourceUnavailable {
        name: name.to_string(),
        reason: e.to_string(),
    }
}
