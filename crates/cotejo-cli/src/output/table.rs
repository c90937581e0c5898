use cotejo_core::model::ExtractionResult;
use cotejo_core::sources::ScanOutcome;

pub fn print_result(result: &ExtractionResult) {
    println!("  Monto CC:      {}", result.monto_cc);
    println!("  PPTO META HG:  {}", result.ppto_meta_hg);
    println!("  Expediente:    {}", result.expediente);
}

pub fn print_scan(outcome: &ScanOutcome, project: &str) {
    println!("=== {project} ===\n");
    print_result(&outcome.result);
    println!();

    if outcome.trace.sources_tried.is_empty() {
        println!("  No sources consulted.");
    } else {
        println!("  Sources tried:");
        for source in &outcome.trace.sources_tried {
            println!("    {source}");
        }
    }
}
