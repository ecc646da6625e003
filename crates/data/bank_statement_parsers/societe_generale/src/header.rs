use crate::text::normalize_key;

/// Header row + data rows sliced out of a decoded export.
///
/// SG exports prepend free-form preamble lines (account holder, balance,
/// separator bars) before the actual CSV table; `locate` discards those.
/// Rows are not guaranteed to be header-length and must be indexed
/// defensively.
#[derive(Debug, Default)]
pub struct HeaderSlice {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Name of the heuristic that selected the header line.
    pub strategy: &'static str,
}

type Strategy = fn(&[&str]) -> Option<usize>;

/// Ordered header-detection heuristics; first match wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("signature", find_by_signature),
    ("loose-date-or-label", find_by_loose_keywords),
    ("first-line", find_first_line),
];

/// Slice an export into header and data rows. Never fails: a file with
/// no usable lines yields an empty slice.
pub fn locate(text: &str) -> HeaderSlice {
    let lines: Vec<&str> = text.lines().filter(|line| !is_junk(line)).collect();
    if lines.is_empty() {
        return HeaderSlice::default();
    }

    let mut header_idx = 0;
    let mut strategy = "first-line";
    for &(name, find) in STRATEGIES {
        if let Some(idx) = find(&lines) {
            header_idx = idx;
            strategy = name;
            break;
        }
    }

    let snippet = lines[header_idx..].join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(snippet.as_bytes());

    let mut parsed: Vec<Vec<String>> = Vec::new();
    for record in reader.records().flatten() {
        parsed.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    if parsed.is_empty() {
        return HeaderSlice::default();
    }

    let headers = parsed.remove(0);
    HeaderSlice {
        headers,
        rows: parsed,
        strategy,
    }
}

/// Preamble noise: blank lines, separator bars, anything without the
/// `;` delimiter.
fn is_junk(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with("==") || !trimmed.contains(';')
}

/// Known SG header signatures on the normalized line.
fn find_by_signature(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| {
        let key = normalize_key(line);
        (key.contains("date") && key.contains("operation"))
            || key.contains("libelle")
            || (key.contains("montant") && key.contains("devise"))
    })
}

/// Weaker fallback: raw substring check, tolerant of truncated headers.
fn find_by_loose_keywords(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| {
        let low = line.to_lowercase();
        low.contains("date") || low.contains("libell")
    })
}

/// Worst case: assume the first surviving line is the header.
fn find_first_line(lines: &[&str]) -> Option<usize> {
    (!lines.is_empty()).then_some(0)
}
