//! Diagnostic record of a scan.
//!
//! The orchestrator never fails on a bad source; it records what it tried
//! and what went wrong so a caller can print or serialize the whole story
//! next to the result.

use serde::{Deserialize, Serialize};

/// Sources consulted during one scan, in order, plus any non-fatal
/// problems hit along the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanTrace {
    pub sources_tried: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScanWarning>,
}

/// One skipped source and the reason it was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    pub source: String,
    pub message: String,
}

impl ScanTrace {
    pub fn tried(&mut self, source: impl Into<String>) {
        self.sources_tried.push(source.into());
    }

    pub fn warn(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ScanWarning {
            source: source.into(),
            message: message.into(),
        });
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_records_in_order() {
        let mut trace = ScanTrace::default();
        trace.tried("attachment:cuadro.xlsx");
        trace.tried("folder:ABC");
        trace.warn("folder:ABC", "listing failed");
        assert_eq!(
            trace.sources_tried,
            vec!["attachment:cuadro.xlsx", "folder:ABC"]
        );
        assert!(trace.has_warnings());
        assert_eq!(trace.warnings[0].source, "folder:ABC");
    }

    #[test]
    fn test_empty_warnings_not_serialized() {
        let trace = ScanTrace {
            sources_tried: vec!["body-text".to_string()],
            warnings: Vec::new(),
        };
        let json = serde_json::to_string(&trace).unwrap();
        assert!(!json.contains("warnings"));
    }
}
