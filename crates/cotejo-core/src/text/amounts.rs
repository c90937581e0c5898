//! Mines free-form mail text for money amounts.
//!
//! This is the weakest source the scan falls back to when no spreadsheet
//! yielded a figure. Patterns are tried in order of reliability: an amount
//! next to an explicit label or currency marker beats a bare number.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::parsing::amount::is_significant;

/// Amount patterns, strongest first. Group 1 is always the digits.
static AMOUNT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "ahorro de S/ 14,573.66" and friends
        r"(?i)(?:ahorro|pérdida|perdida|ganancia)\s+de\s+(?:S/\.?|PEN)?\s*-?\s*(\d{1,3}(?:,\d{3})*(?:\.\d+)?)",
        // soles prefix with thousands groups, then without
        r"(?i)(?:S/\.?)\s*-?\s*(\d{1,3}(?:,\d{3})+(?:\.\d+)?)",
        r"(?i)(?:S/\.?)\s*-?\s*(\d{3,}(?:\.\d+)?)",
        // dollar prefix
        r"(?i)(?:USD|US\$|\$)\s*-?\s*(\d{1,3}(?:,\d{3})+(?:\.\d+)?)",
        r"(?i)(?:USD|US\$|\$)\s*-?\s*(\d{3,}(?:\.\d+)?)",
        // currency written after the number
        r"(?i)-?\s*(\d{1,3}(?:,\d{3})+(?:\.\d+)?)\s*(?:S/\.?|PEN|soles)",
        r"(?i)-?\s*(\d{1,3}(?:,\d{3})+(?:\.\d+)?)\s*(?:USD|dolares|dólares)",
        // bare number right after a money word
        r"(?i)(?:monto|total|precio|valor|costo|importe)[\s:]+(?:S/\.?|PEN|USD|\$)?\s*-?\s*(\d{1,3}(?:,\d{3})+(?:\.\d+)?)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Budget label patterns, most specific first. Group 1 is the digits.
static BUDGET_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)PPTO\.?\s*META\s*HG\w*\s*[:\s]*(?:S/\.?|PEN|USD|\$)?\s*(\d{1,3}(?:[,.]?\d{3})*(?:\.\d+)?)",
        r"(?i)PRESUPUESTO\s*META\s*HG\w*\s*[:\s]*(?:S/\.?|PEN|USD|\$)?\s*(\d{1,3}(?:[,.]?\d{3})*(?:\.\d+)?)",
        r"(?i)PPTO\.?\s*META\s*[:\s]*(?:S/\.?|PEN|USD|\$)?\s*(\d{1,3}(?:[,.]?\d{3})*(?:\.\d+)?)",
        r"(?i)META\s*HG\s*[:\s]*(?:S/\.?|PEN|USD|\$)?\s*(\d{1,3}(?:[,.]?\d{3})*(?:\.\d+)?)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

const SOL_MARKERS: [&str; 3] = ["s/", "pen", "soles"];
const DOLLAR_MARKERS: [&str; 5] = ["usd", "$", "us$", "dolar", "dólar"];

/// Finds the first significant amount in `text` and returns it with a
/// currency marker, e.g. `"S/ 39,488.25"`. Digits are kept exactly as
/// written. Returns `None` when nothing at or above the significance
/// floor is mentioned.
pub fn scan_amount(text: &str) -> Option<String> {
    for pattern in AMOUNT_PATTERNS.iter() {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };
        let (Some(whole), Some(group)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let digits = group.as_str();
        let Ok(value) = Decimal::from_str(&digits.replace(',', "")) else {
            continue;
        };
        if !is_significant(value) {
            continue;
        }

        let context = context_window(text, whole.start(), whole.end()).to_lowercase();
        // A hyphen near the amount marks a loss.
        let sign = if context.contains('-') { "-" } else { "" };

        if SOL_MARKERS.iter().any(|m| context.contains(m)) {
            return Some(format!("S/ {sign}{digits}"));
        }
        if DOLLAR_MARKERS.iter().any(|m| context.contains(m)) {
            return Some(format!("USD {sign}{digits}"));
        }
        return Some(format!("S/ {sign}{digits}"));
    }
    None
}

/// Finds the first amount attached to a PPTO META HG style label.
/// Returns `None` when no labelled figure clears the significance floor.
pub fn scan_budget(text: &str) -> Option<String> {
    for pattern in BUDGET_PATTERNS.iter() {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };
        let Some(group) = caps.get(1) else {
            continue;
        };
        let digits = group.as_str();
        let Ok(value) = Decimal::from_str(&digits.replace(',', "")) else {
            continue;
        };
        if is_significant(value) {
            return Some(format!("S/ {digits}"));
        }
    }
    None
}

/// Up to 20 characters of text either side of the match.
fn context_window(text: &str, start: usize, end: usize) -> &str {
    let lo = text[..start]
        .char_indices()
        .rev()
        .nth(19)
        .map_or(0, |(i, _)| i);
    let hi = text[end..]
        .char_indices()
        .nth(20)
        .map_or(text.len(), |(i, _)| end + i);
    &text[lo..hi]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_amount_savings_phrase() {
        let text = "Se obtuvo un ahorro de S/ 14,573.66 respecto al presupuesto.";
        assert_eq!(scan_amount(text), Some("S/ 14,573.66".to_string()));
    }

    #[test]
    fn test_scan_amount_soles_prefix() {
        let text = "El monto adjudicado es S/ 39,488.25 incluido IGV.";
        assert_eq!(scan_amount(text), Some("S/ 39,488.25".to_string()));
    }

    #[test]
    fn test_scan_amount_soles_without_thousands_groups() {
        assert_eq!(scan_amount("Flete S/ 450"), Some("S/ 450".to_string()));
    }

    #[test]
    fn test_scan_amount_dollar_prefix() {
        let text = "Adjudicado por USD 12,500.00 a la empresa ganadora.";
        assert_eq!(scan_amount(text), Some("USD 12,500.00".to_string()));
    }

    #[test]
    fn test_scan_amount_currency_after_number() {
        let text = "se pagaron 1,500.00 soles por el servicio";
        assert_eq!(scan_amount(text), Some("S/ 1,500.00".to_string()));
    }

    #[test]
    fn test_scan_amount_money_word_label() {
        let text = "Importe: 25,300.50 segun cuadro adjunto";
        assert_eq!(scan_amount(text), Some("S/ 25,300.50".to_string()));
    }

    #[test]
    fn test_scan_amount_negative_from_context() {
        let text = "representa una pérdida de S/ -10,659.27 en el proyecto";
        assert_eq!(scan_amount(text), Some("S/ -10,659.27".to_string()));
    }

    #[test]
    fn test_scan_amount_accented_context_reaches_marker() {
        // The currency word sits at the edge of the context window;
        // accented characters in between must not push it out.
        let text = "Cifra en dólares según corte monto: 12,500.00";
        assert_eq!(scan_amount(text), Some("USD 12,500.00".to_string()));
    }

    #[test]
    fn test_scan_amount_below_floor_is_skipped() {
        assert_eq!(scan_amount("costo del courier S/ 99.50"), None);
    }

    #[test]
    fn test_scan_amount_nothing_found() {
        assert_eq!(scan_amount("Buenos dias, adjunto el cuadro solicitado."), None);
        assert_eq!(scan_amount(""), None);
    }

    #[test]
    fn test_scan_budget_full_label() {
        let text = "PPTO META HG: S/ 39,488.25 para la partida";
        assert_eq!(scan_budget(text), Some("S/ 39,488.25".to_string()));
    }

    #[test]
    fn test_scan_budget_presupuesto_variant() {
        let text = "Presupuesto Meta HG S/. 22,000.00";
        assert_eq!(scan_budget(text), Some("S/ 22,000.00".to_string()));
    }

    #[test]
    fn test_scan_budget_short_label() {
        let text = "segun META HG 118,000.00 aprobado";
        assert_eq!(scan_budget(text), Some("S/ 118,000.00".to_string()));
    }

    #[test]
    fn test_scan_budget_below_floor() {
        assert_eq!(scan_budget("META HG: 45"), None);
    }

    #[test]
    fn test_scan_budget_no_label() {
        assert_eq!(scan_budget("el total es S/ 39,488.25"), None);
    }
}
