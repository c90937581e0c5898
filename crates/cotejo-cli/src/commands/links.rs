use std::path::PathBuf;

use cotejo_core::error::CotejoError;
use cotejo_core::text::links::extract_sheet_refs;

pub fn run(input_file: PathBuf) -> Result<(), CotejoError> {
    let text = std::fs::read_to_string(&input_file)?;
    let refs = extract_sheet_refs(&text);

    if refs.is_empty() {
        println!("No references found.");
        return Ok(());
    }
    for reference in &refs {
        println!("{:<8} {}", reference.kind.to_string(), reference.id);
    }

    Ok(())
}
