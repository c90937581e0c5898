use rust_decimal::Decimal;
use serde_json::Value;

use super::{f64_to_decimal, CellValue, Grid, MAX_SCAN_COLS, MAX_SCAN_ROWS};

/// Grid over a row-major block of JSON values, the shape a remote values
/// read returns. Rows may be ragged; short rows read as empty cells.
pub struct ValuesGrid {
    data: Vec<Vec<Value>>,
    rows: usize,
    cols: usize,
}

impl ValuesGrid {
    pub fn new(data: Vec<Vec<Value>>) -> Self {
        let rows = data.len().min(MAX_SCAN_ROWS);
        let cols = data
            .iter()
            .map(|r| r.len())
            .max()
            .unwrap_or(0)
            .min(MAX_SCAN_COLS);
        Self { data, rows, cols }
    }
}

impl Grid for ValuesGrid {
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
        match self.data.get(row).and_then(|r| r.get(col)) {
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(trimmed.to_string())
                }
            }
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Number(Decimal::from(i))
                } else if let Some(u) = n.as_u64() {
                    CellValue::Number(Decimal::from(u))
                } else if let Some(f) = n.as_f64() {
                    CellValue::Number(f64_to_decimal(f))
                } else {
                    CellValue::Empty
                }
            }
            _ => CellValue::Empty,
        }
    }
}
