use std::path::PathBuf;

use cotejo_core::error::CotejoError;
use cotejo_core::model::{RefKind, SheetRef};
use cotejo_core::profile::{detect_project, load_profile, MatchProfile};
use cotejo_core::sources::ExtractionRequest;
use cotejo_core::text::links::extract_sheet_refs;

use crate::fs_source::FsSource;
use crate::output;

pub fn run(
    subject: String,
    dir: Option<PathBuf>,
    body: Option<PathBuf>,
    sender: Option<String>,
    profile_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), CotejoError> {
    let profile = match profile_file {
        Some(path) => load_profile(&path)?,
        None => MatchProfile::default(),
    };
    let body_text = match body {
        Some(path) => std::fs::read_to_string(&path)?,
        None => String::new(),
    };

    // The local folder is scanned first, then whatever the body links to.
    let mut refs = Vec::new();
    if let Some(dir) = &dir {
        refs.push(SheetRef::new(RefKind::Folder, dir.display().to_string()));
    }
    refs.extend(extract_sheet_refs(&body_text));

    let request = ExtractionRequest {
        subject,
        attachments: Vec::new(),
        refs,
        body_text,
    };
    let outcome = cotejo_core::extract_comparison(&request, &FsSource, &profile);

    let project = detect_project(&request.subject, sender.as_deref().unwrap_or(""), &profile)
        .unwrap_or("OTROS");

    for warning in &outcome.trace.warnings {
        eprintln!("warning: {}: {}", warning.source, warning.message);
    }

    match output_format {
        "json" => output::json::print_scan(&outcome, project)?,
        _ => output::table::print_scan(&outcome, project),
    }

    Ok(())
}
