use std::path::PathBuf;

use cotejo_core::error::CotejoError;
use cotejo_core::matching::rank_candidates;
use cotejo_core::model::CandidateFile;
use cotejo_core::parsing::keywords::subject_keywords;
use cotejo_core::profile::{load_profile, MatchProfile};
use cotejo_core::sources::RemoteSource;

use crate::fs_source::FsSource;

pub fn run(
    subject: &str,
    dir: PathBuf,
    profile_file: Option<PathBuf>,
) -> Result<(), CotejoError> {
    let profile = match profile_file {
        Some(path) => load_profile(&path)?,
        None => MatchProfile::default(),
    };

    let files = FsSource.list_folder(&dir.display().to_string())?;
    let spreadsheets: Vec<CandidateFile> = files
        .into_iter()
        .filter(|f| f.is_spreadsheet())
        .collect();
    if spreadsheets.is_empty() {
        println!("No spreadsheet files in {}.", dir.display());
        return Ok(());
    }

    let keywords = subject_keywords(subject, &profile);
    if keywords.is_empty() {
        println!("Subject keywords: (none)");
    } else {
        println!("Subject keywords: {}", keywords.join(", "));
    }
    println!();

    for scored in rank_candidates(subject, &spreadsheets, &profile) {
        println!("  {:>7.3}  {}", scored.score, scored.file.name);
    }

    Ok(())
}
