/// Parse an SG amount cell: "1 234,56 €", "-12,3", "1.234,56EUR".
///
/// Empty cells are 0.0 by contract (FormatA leaves one of Débit/Crédit
/// blank on every row). Malformed cells also degrade to 0.0; a bad
/// amount never drops the row.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let mut cleaned = trimmed
        .replace('€', "")
        .replace('\u{00A0}', "")
        .replace("EUR", "")
        .replace(' ', "");

    // French number format: when a decimal comma is present, dots are
    // thousands separators.
    if cleaned.contains(',') {
        cleaned = cleaned.replace('.', "").replace(',', ".");
    }

    if let Ok(value) = cleaned.parse::<f64>() {
        return value;
    }

    // Last resort: keep digits, sign and decimal point only.
    let stripped: String = cleaned
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(*c, '.' | '-' | '+'))
        .collect();
    stripped.parse::<f64>().unwrap_or(0.0)
}

/// Round to 2 decimal places, the precision of every emitted monetary
/// field.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
