use std::io::Cursor;

use calamine::{Data, Range, Reader, Xls, Xlsx};
use rust_decimal::Decimal;

use super::{f64_to_decimal, CellValue, Grid, MAX_SCAN_COLS, MAX_SCAN_ROWS};
use crate::error::CotejoError;

/// How many ranked worksheets of one workbook get scanned before giving up.
pub const MAX_SHEETS_PER_WORKBOOK: usize = 3;

/// An opened Excel workbook, format chosen by file extension.
pub enum Workbook<'a> {
    Xlsx(Xlsx<Cursor<&'a [u8]>>),
    Xls(Xls<Cursor<&'a [u8]>>),
}

impl<'a> Workbook<'a> {
    /// Open workbook bytes in memory. The extension of `filename` picks the
    /// backend; anything but .xlsx/.xlsm/.xls is rejected.
    pub fn open(bytes: &'a [u8], filename: &str) -> Result<Workbook<'a>, CotejoError> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".xlsx") || lower.ends_with(".xlsm") {
            let wb: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes))
                .map_err(|e| CotejoError::WorkbookOpen(format!("{filename}: {e}")))?;
            Ok(Workbook::Xlsx(wb))
        } else if lower.ends_with(".xls") {
            let wb: Xls<_> = calamine::open_workbook_from_rs(Cursor::new(bytes))
                .map_err(|e| CotejoError::WorkbookOpen(format!("{filename}: {e}")))?;
            Ok(Workbook::Xls(wb))
        } else {
            Err(CotejoError::UnsupportedFormat(filename.to_string()))
        }
    }

    pub fn sheet_names(&self) -> Vec<String> {
        match self {
            Workbook::Xlsx(wb) => wb.sheet_names(),
            Workbook::Xls(wb) => wb.sheet_names(),
        }
    }

    pub fn grid(&mut self, sheet: &str) -> Result<WorkbookGrid, CotejoError> {
        let range = match self {
            Workbook::Xlsx(wb) => wb
                .worksheet_range(sheet)
                .map_err(|e| CotejoError::WorkbookOpen(format!("sheet '{sheet}': {e}")))?,
            Workbook::Xls(wb) => wb
                .worksheet_range(sheet)
                .map_err(|e| CotejoError::WorkbookOpen(format!("sheet '{sheet}': {e}")))?,
        };
        Ok(WorkbookGrid::from_range(range))
    }
}

/// Order worksheet names by how likely they are to hold the comparison.
///
/// Tiers concatenate: a sheet literally named "VS" first, then names
/// containing "vs", then the usual summary names. Lower tiers stay in the
/// list so the scan can fall through when a better-named sheet turns out
/// to hold nothing. With no match at all, the first few sheets are tried.
pub fn rank_sheet_names(names: &[String]) -> Vec<String> {
    let mut ranked: Vec<String> = names
        .iter()
        .filter(|n| n.trim().to_lowercase() == "vs")
        .cloned()
        .collect();

    for name in names {
        if name.to_lowercase().contains("vs") && !ranked.contains(name) {
            ranked.push(name.clone());
        }
    }

    for name in names {
        let lower = name.to_lowercase();
        let themed = ["comparativo", "resumen", "cuadro"]
            .iter()
            .any(|kw| lower.contains(kw));
        if themed && !ranked.contains(name) {
            ranked.push(name.clone());
        }
    }

    if ranked.is_empty() {
        return names.iter().take(MAX_SHEETS_PER_WORKBOOK).cloned().collect();
    }
    ranked
}

/// Grid over a calamine cell range.
///
/// Dimensions come from the range's absolute end position, so sheets whose
/// used area starts below row 1 keep their original coordinates.
pub struct WorkbookGrid {
    range: Range<Data>,
    rows: usize,
    cols: usize,
}

impl WorkbookGrid {
    pub fn from_range(range: Range<Data>) -> Self {
        let (rows, cols) = match range.end() {
            Some((r, c)) => (
                (r as usize + 1).min(MAX_SCAN_ROWS),
                (c as usize + 1).min(MAX_SCAN_COLS),
            ),
            None => (0, 0),
        };
        Self { range, rows, cols }
    }
}

impl Grid for WorkbookGrid {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn cell(&self, row: usize, col: usize) -> CellValue {
        if row >= self.rows || col >= self.cols {
            return CellValue::Empty;
        }
        match self.range.get_value((row as u32, col as u32)) {
            Some(Data::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(trimmed.to_string())
                }
            }
            Some(Data::Float(f)) => CellValue::Number(f64_to_decimal(*f)),
            Some(Data::Int(i)) => CellValue::Number(Decimal::from(*i)),
            _ => CellValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rank_exact_vs_first() {
        let ranked = rank_sheet_names(&names(&["Datos", "VS", "vs comparativo"]));
        assert_eq!(ranked, vec!["VS", "vs comparativo"]);
    }

    #[test]
    fn test_rank_containing_vs() {
        let ranked = rank_sheet_names(&names(&["Datos", "CC vs PPTO", "Resumen"]));
        assert_eq!(ranked, vec!["CC vs PPTO", "Resumen"]);
    }

    #[test]
    fn test_rank_keeps_lower_tiers() {
        // A top-ranked sheet can turn out to be a cover page; the themed
        // names stay behind it instead of being dropped.
        let ranked = rank_sheet_names(&names(&["VS", "Cuadro Comparativo"]));
        assert_eq!(ranked, vec!["VS", "Cuadro Comparativo"]);
    }

    #[test]
    fn test_rank_themed_names() {
        let ranked = rank_sheet_names(&names(&["Portada", "Cuadro Comparativo", "Resumen"]));
        assert_eq!(ranked, vec!["Cuadro Comparativo", "Resumen"]);
    }

    #[test]
    fn test_rank_falls_back_to_first_sheets() {
        let ranked = rank_sheet_names(&names(&["Hoja1", "Hoja2", "Hoja3", "Hoja4"]));
        assert_eq!(ranked, vec!["Hoja1", "Hoja2", "Hoja3"]);
    }

    #[test]
    fn test_grid_maps_cell_types() {
        let mut range: Range<Data> = Range::new((0, 0), (3, 3));
        range.set_value((0, 0), Data::String("  PPTO META HG  ".into()));
        range.set_value((1, 1), Data::Float(39488.25));
        range.set_value((2, 2), Data::Int(500));
        range.set_value((3, 3), Data::Bool(true));

        let grid = WorkbookGrid::from_range(range);
        assert_eq!(grid.cell(0, 0), CellValue::Text("PPTO META HG".into()));
        assert_eq!(grid.cell(1, 1), CellValue::Number(dec!(39488.25)));
        assert_eq!(grid.cell(2, 2), CellValue::Number(dec!(500)));
        assert_eq!(grid.cell(3, 3), CellValue::Empty);
        assert_eq!(grid.cell(50, 50), CellValue::Empty);
    }

    #[test]
    fn test_grid_keeps_absolute_coordinates() {
        // Used area starts at (5, 2); earlier cells read as empty but stay
        // addressable under their sheet coordinates.
        let mut range: Range<Data> = Range::new((5, 2), (6, 4));
        range.set_value((5, 2), Data::String("EXPEDIENTE".into()));

        let grid = WorkbookGrid::from_range(range);
        assert_eq!(grid.rows(), 7);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.cell(0, 0), CellValue::Empty);
        assert_eq!(grid.cell(5, 2), CellValue::Text("EXPEDIENTE".into()));
    }

    #[test]
    fn test_grid_caps_dimensions() {
        let range: Range<Data> = Range::new((0, 0), (999, 99));
        let grid = WorkbookGrid::from_range(range);
        assert_eq!(grid.rows(), MAX_SCAN_ROWS);
        assert_eq!(grid.cols(), MAX_SCAN_COLS);
    }
}
