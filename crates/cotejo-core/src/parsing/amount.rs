use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::grid::CellValue;

/// Below this, a number is noise (quantities, percentages, row counters)
/// and never accepted as a section total.
pub const SIGNIFICANCE_FLOOR: Decimal = Decimal::ONE_HUNDRED;

static SOL_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[sS]/\.?\s*").unwrap());
static CURRENCY_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(PEN|USD|US\$|\$)\s*").unwrap());
static NON_NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d.,\-]").unwrap());

/// Parse a cell into an amount. Numbers pass through unchanged; text goes
/// through [`parse_amount_str`]; empty cells are `None`.
pub fn parse_amount(value: &CellValue) -> Option<Decimal> {
    match value {
        CellValue::Number(d) => Some(*d),
        CellValue::Text(s) => parse_amount_str(s),
        CellValue::Empty => None,
    }
}

/// Parse an amount string whose locale is unknown.
///
/// Handles formats like:
/// - "39,488.25" -> 39488.25 (comma thousands, dot decimal)
/// - "39.488,25" -> 39488.25 (dot thousands, comma decimal)
/// - "39488.25"  -> 39488.25
/// - "S/ 1,500.00", "S/. 1500", "PEN 2500", "US$ 1,200.50" (currency stripped)
///
/// The decimal separator is whichever of '.' and ',' occurs last. Bare
/// separators and empty residue return `None`, as does anything Decimal
/// cannot parse after normalization.
pub fn parse_amount_str(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let stripped = SOL_PREFIX.replace_all(trimmed, "");
    let stripped = CURRENCY_CODE.replace_all(&stripped, "");
    let cleaned = NON_NUMERIC.replace_all(&stripped, "");

    if cleaned.is_empty() || matches!(cleaned.as_ref(), "-" | "." | ",") {
        return None;
    }

    let last_dot = cleaned.rfind('.').map(|i| i as isize).unwrap_or(-1);
    let last_comma = cleaned.rfind(',').map(|i| i as isize).unwrap_or(-1);

    let normalized = if last_dot > last_comma {
        // English style: commas group thousands
        cleaned.replace(',', "")
    } else if last_comma > last_dot {
        // Spanish style: dots group thousands, comma is the decimal mark
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned.into_owned()
    };

    Decimal::from_str(&normalized).ok()
}

pub fn is_significant(amount: Decimal) -> bool {
    amount >= SIGNIFICANCE_FLOOR
}

/// Parse and apply the significance floor in one step.
pub fn significant_amount(value: &CellValue) -> Option<Decimal> {
    parse_amount(value).filter(|d| is_significant(*d))
}

/// Render an amount the way the comparison sheets do: "S/ 39,488.25".
/// Rounds to two decimals (banker's) and groups thousands with commas.
pub fn format_soles(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let plain = format!("{rounded:.2}");
    let (int_part, frac_part) = match plain.split_once('.') {
        Some(parts) => parts,
        None => (plain.as_str(), "00"),
    };
    format!("S/ {}.{}", group_thousands(int_part), frac_part)
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{sign}{out}")
}
