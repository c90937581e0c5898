use std::path::{Path, PathBuf};

use cotejo_core::error::CotejoError;
use cotejo_core::model::ExtractionResult;
use serde_json::Value;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), CotejoError> {
    let result = extract(&input_file)?;

    match output_file {
        Some(path) => {
            let json = serde_json::to_string_pretty(&result)?;
            std::fs::write(&path, json)?;
            eprintln!("Result written to {}", path.display());
        }
        None => match output_format {
            "json" => output::json::print_result(&result)?,
            _ => output::table::print_result(&result),
        },
    }

    Ok(())
}

fn extract(input_file: &Path) -> Result<ExtractionResult, CotejoError> {
    let is_json = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        // Pre-fetched cell values, row-major.
        let bytes = std::fs::read(input_file)?;
        let values: Vec<Vec<Value>> = serde_json::from_slice(&bytes)?;
        Ok(cotejo_core::extract_from_values(values))
    } else {
        let bytes = std::fs::read(input_file)?;
        let filename = input_file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        cotejo_core::extract_from_workbook(&bytes, filename)
    }
}
