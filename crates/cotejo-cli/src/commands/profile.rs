use std::path::Path;

use cotejo_core::error::CotejoError;
use cotejo_core::profile::{load_profile, MatchProfile};

pub fn show() -> Result<(), CotejoError> {
    let profile = MatchProfile::default();
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), CotejoError> {
    let profile = load_profile(file)?;
    println!(
        "Profile OK: {} stop words, {} project codes, {} projects.",
        profile.stop_words.len(),
        profile.project_codes.len(),
        profile.projects.len()
    );
    Ok(())
}
