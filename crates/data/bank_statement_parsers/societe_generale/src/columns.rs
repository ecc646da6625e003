use crate::layout::LayoutKind;
use crate::text::normalize_key;

// Header synonyms per logical field, in priority order. Wording varies
// across export versions (abbreviations, accents, truncation), so
// matching is substring-based on normalized keys. Adding a layout means
// adding a table, not a builder.
const DATE_OPERATION_A: &[&str] = &["date operation", "date op"];
const DATE_VALEUR: &[&str] = &["date valeur", "date val"];
const LABEL_A: &[&str] = &["libelle", "nature", "intitule"];
const DEBIT: &[&str] = &["debit", "montant debit"];
const CREDIT: &[&str] = &["credit", "montant credit"];

const DATE_OPERATION_B: &[&str] = &[
    "date de l'operation",
    "date operation",
    "date de l operation",
];
const LABEL_B: &[&str] = &["libelle", "intitule"];
const DETAIL: &[&str] = &[
    "detail de l'ecriture",
    "detail de l ecriture",
    "detail",
    "details",
];
const AMOUNT: &[&str] = &["montant de l'operation", "montant operation", "montant"];
const CURRENCY: &[&str] = &["devise"];

/// Find the column whose normalized header contains one of the
/// candidate names, trying candidates in priority order; the first
/// candidate that matches any header wins, first matching header first.
pub fn resolve_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    let keys: Vec<String> = headers.iter().map(|h| normalize_key(h)).collect();
    for want in candidates {
        let want_key = normalize_key(want);
        if let Some(idx) = keys.iter().position(|k| k.contains(&want_key)) {
            return Some(idx);
        }
    }
    None
}

/// How a layout encodes the transaction amount.
#[derive(Debug, Clone, Copy)]
pub enum AmountColumns {
    /// Separate "Débit" / "Crédit" magnitude columns (FormatA).
    Split {
        debit: Option<usize>,
        credit: Option<usize>,
    },
    /// One signed "Montant" column (FormatB).
    Signed { amount: Option<usize> },
}

/// Column bindings for one layout, consumed by the generic record
/// builder. Every index is optional: a missing column degrades the
/// field, it never aborts the file.
#[derive(Debug, Clone, Copy)]
pub struct LayoutColumns {
    pub date_operation: Option<usize>,
    pub date_valeur: Option<usize>,
    pub label: Option<usize>,
    pub detail: Option<usize>,
    /// FormatB carries a currency column; resolved to validate the
    /// layout but not emitted (records are EUR by construction).
    pub currency: Option<usize>,
    pub amounts: AmountColumns,
}

impl LayoutColumns {
    pub fn resolve(layout: LayoutKind, headers: &[String]) -> Option<Self> {
        match layout {
            LayoutKind::FormatA => Some(Self {
                date_operation: resolve_column(headers, DATE_OPERATION_A),
                date_valeur: resolve_column(headers, DATE_VALEUR),
                label: resolve_column(headers, LABEL_A),
                detail: None,
                currency: None,
                amounts: AmountColumns::Split {
                    debit: resolve_column(headers, DEBIT),
                    credit: resolve_column(headers, CREDIT),
                },
            }),
            LayoutKind::FormatB => Some(Self {
                date_operation: resolve_column(headers, DATE_OPERATION_B),
                date_valeur: None,
                label: resolve_column(headers, LABEL_B),
                detail: resolve_column(headers, DETAIL),
                currency: resolve_column(headers, CURRENCY),
                amounts: AmountColumns::Signed {
                    amount: resolve_column(headers, AMOUNT),
                },
            }),
            LayoutKind::Unknown => None,
        }
    }
}
