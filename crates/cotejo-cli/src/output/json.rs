use cotejo_core::error::CotejoError;
use cotejo_core::model::ExtractionResult;
use cotejo_core::sources::ScanOutcome;

pub fn print_result(result: &ExtractionResult) -> Result<(), CotejoError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

pub fn print_scan(outcome: &ScanOutcome, project: &str) -> Result<(), CotejoError> {
    let value = serde_json::json!({
        "project": project,
        "result": &outcome.result,
        "trace": &outcome.trace,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
