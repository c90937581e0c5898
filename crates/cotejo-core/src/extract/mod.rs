//! Section extraction over a comparison worksheet.
//!
//! The sheets carry labelled column sections (EXPEDIENTE, one or more
//! vendors, PPTO META HG) whose exact position varies per author. The
//! extraction anchors on the section header band, finds each section's
//! SUB TOTAL column, and reads the bottom "TOTAL (CON IGV)" row.

use rust_decimal::Decimal;

use crate::grid::Grid;
use crate::model::ExtractionResult;
use crate::parsing::amount::{format_soles, significant_amount};

/// Section headers live in the top rows; nothing below this band counts.
const HEADER_BAND_ROWS: usize = 20;
/// Widest section seen in practice, used when no neighbor bounds it.
const SECTION_SPAN_COLS: usize = 12;
/// Sub-header labels sit within a few rows of the section header.
const SUBHEADER_DEPTH: usize = 5;
/// Assumed width of the EXPEDIENTE section when its subtotal column is
/// unknown, for placing the start of the vendor window.
const ESTIMATED_SECTION_WIDTH: usize = 5;
/// How deep the numeric sub-column fallback probes below the header.
const NUMERIC_PROBE_DEPTH: usize = 10;

const TOTAL_ROW_LABELS: [&str; 4] = [
    "sub total",
    "subtotal",
    "costo directo",
    "costo directo (sin igv)",
];

#[derive(Debug, Clone, Copy)]
struct SectionHeader {
    row: usize,
    col: usize,
}

/// Recover the three figures from one worksheet.
///
/// Returns a partial result on malformed or sparse grids; a grid with no
/// PPTO META HG header yields all fields unset. Never fails.
pub fn extract_sections(grid: &dyn Grid) -> ExtractionResult {
    let mut result = ExtractionResult::default();
    let rows = grid.rows();
    let cols = grid.cols();
    if rows == 0 || cols == 0 {
        return result;
    }

    // Section headers. Top-to-bottom, left-to-right; the last occurrence
    // of each label wins, and a budget label is never re-read as a case
    // reference.
    let mut ppto: Option<SectionHeader> = None;
    let mut expediente: Option<SectionHeader> = None;
    for row in 0..rows.min(HEADER_BAND_ROWS) {
        for col in 0..cols {
            let Some(text) = grid.cell(row, col).as_text().map(str::to_lowercase) else {
                continue;
            };
            if (text.contains("ppto") && text.contains("meta")) || text.contains("meta hg") {
                ppto = Some(SectionHeader { row, col });
            } else if text.contains("expediente") {
                expediente = Some(SectionHeader { row, col });
            }
        }
    }

    // Without the budget section the sheet is not a comparison; report
    // nothing rather than guessing.
    let Some(ppto) = ppto else {
        return result;
    };
    let header_row = ppto.row;

    let ppto_end = ppto.col + SECTION_SPAN_COLS;
    let ppto_subtotal = find_subtotal_col(grid, header_row, ppto.col, ppto_end);

    let exp_end = expediente.map(|h| {
        if ppto.col > h.col {
            ppto.col
        } else {
            h.col + SECTION_SPAN_COLS
        }
    });
    let exp_subtotal = expediente
        .zip(exp_end)
        .and_then(|(h, end)| find_subtotal_col(grid, header_row, h.col, end));

    if let Some(v) = section_total(grid, header_row, ppto_subtotal, ppto.col, ppto_end) {
        result.ppto_meta_hg = format_soles(v);
    }
    if let (Some(h), Some(end)) = (expediente, exp_end) {
        if let Some(v) = section_total(grid, header_row, exp_subtotal, h.col, end) {
            result.expediente = format_soles(v);
        }
    }

    if let Some(v) = provider_total(grid, expediente, exp_subtotal, ppto.col) {
        result.monto_cc = format_soles(v);
    }

    result
}

/// Locate the SUB TOTAL column of a section spanning `start..end`.
///
/// Prefers a labelled sub-header near the section header; failing that,
/// the first column holding a significant number just below it.
fn find_subtotal_col(grid: &dyn Grid, header_row: usize, start: usize, end: usize) -> Option<usize> {
    let rows = grid.rows();
    let end = end.min(grid.cols());

    for row in header_row..(header_row + SUBHEADER_DEPTH).min(rows) {
        for col in start..end {
            if let Some(text) = grid.cell(row, col).as_text() {
                let t = text.to_lowercase();
                if t.contains("sub total") || t.contains("subtotal") || t == "sub-total" {
                    return Some(col);
                }
            }
        }
    }

    for col in start..end {
        for row in (header_row + 1)..(header_row + NUMERIC_PROBE_DEPTH).min(rows) {
            if significant_amount(&grid.cell(row, col)).is_some() {
                return Some(col);
            }
        }
    }

    None
}

/// Read a section's grand total.
///
/// Primary: the lowest row labelled TOTAL + IGV anywhere across the sheet;
/// the value sits in the subtotal column, or failing that anywhere in the
/// section span. Then rows labelled exactly SUB TOTAL / COSTO DIRECTO.
/// The weakest fallback takes the last significant number in the subtotal
/// column and can pick an unrelated figure on sheets with no total markers.
fn section_total(
    grid: &dyn Grid,
    header_row: usize,
    subtotal_col: Option<usize>,
    start: usize,
    end: usize,
) -> Option<Decimal> {
    let subtotal_col = subtotal_col?;
    let rows = grid.rows();
    let end = end.min(grid.cols());

    for row in ((header_row + 1)..rows).rev() {
        if !row_has_total_igv(grid, row) {
            continue;
        }
        if let Some(v) = significant_amount(&grid.cell(row, subtotal_col)) {
            return Some(v);
        }
        for col in start..end {
            if let Some(v) = significant_amount(&grid.cell(row, col)) {
                return Some(v);
            }
        }
        // Only the lowest total row counts; an empty one means the sheet
        // left the section blank.
        break;
    }

    for row in ((header_row + 1)..rows).rev() {
        if row_has_total_label(grid, row) {
            if let Some(v) = significant_amount(&grid.cell(row, subtotal_col)) {
                return Some(v);
            }
        }
    }

    let mut last = None;
    for row in (header_row + 2)..rows {
        if let Some(v) = significant_amount(&grid.cell(row, subtotal_col)) {
            last = Some(v);
        }
    }
    last
}

/// The winning vendor's total: vendor columns sit between the EXPEDIENTE
/// and PPTO META HG sections, and the lowest TOTAL + IGV row holds their
/// totals side by side. The first significant value in the window wins.
fn provider_total(
    grid: &dyn Grid,
    expediente: Option<SectionHeader>,
    exp_subtotal: Option<usize>,
    ppto_start: usize,
) -> Option<Decimal> {
    let window_start = match (expediente, exp_subtotal) {
        (Some(_), Some(sub)) => sub + 1,
        (Some(h), None) => h.col + ESTIMATED_SECTION_WIDTH,
        (None, _) => 0,
    };
    if window_start >= ppto_start {
        return None;
    }
    let window_end = ppto_start.min(grid.cols());

    // Row 0 can only ever be a header row; the scan stops above it.
    for row in (1..grid.rows()).rev() {
        if !row_has_total_igv(grid, row) {
            continue;
        }
        for col in window_start..window_end {
            if let Some(v) = significant_amount(&grid.cell(row, col)) {
                return Some(v);
            }
        }
        break;
    }
    None
}

fn row_has_total_igv(grid: &dyn Grid, row: usize) -> bool {
    (0..grid.cols()).any(|col| {
        grid.cell(row, col).as_text().is_some_and(|t| {
            let t = t.to_lowercase();
            t.contains("total") && t.contains("igv")
        })
    })
}

fn row_has_total_label(grid: &dyn Grid, row: usize) -> bool {
    (0..grid.cols()).any(|col| {
        grid.cell(row, col)
            .as_text()
            .is_some_and(|t| TOTAL_ROW_LABELS.contains(&t.to_lowercase().as_str()))
    })
}
