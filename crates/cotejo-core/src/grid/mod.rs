pub mod values;
pub mod workbook;

use rust_decimal::Decimal;

pub use values::ValuesGrid;
pub use workbook::{rank_sheet_names, Workbook, WorkbookGrid, MAX_SHEETS_PER_WORKBOOK};

/// Scan window caps. Comparison sheets are small; anything past this window
/// is trailing junk (pivot caches, print areas) and is never read.
pub const MAX_SCAN_ROWS: usize = 200;
pub const MAX_SCAN_COLS: usize = 50;

/// A cell as the extraction sees it. Anything that is neither text nor a
/// plain number (dates, booleans, formula errors) collapses to `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(Decimal),
    Empty,
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// Read-only, 0-indexed cell access over one worksheet-shaped value range.
///
/// Implementations cap their reported dimensions at [`MAX_SCAN_ROWS`] x
/// [`MAX_SCAN_COLS`] and return `CellValue::Empty` for any read outside
/// them, so callers never bounds-check.
pub trait Grid {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn cell(&self, row: usize, col: usize) -> CellValue;
}

/// Convert f64 to Decimal, preserving reasonable precision.
///
/// Uses string round-trip to avoid floating-point artifacts
/// (e.g., 39488.25_f64 carrying a long binary tail).
pub(crate) fn f64_to_decimal(f: f64) -> Decimal {
    let s = format!("{f}");
    s.parse::<Decimal>()
        .unwrap_or_else(|_| Decimal::try_from(f).unwrap_or_default())
}
