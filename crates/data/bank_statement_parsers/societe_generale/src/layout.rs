use crate::text::normalize_key;

/// The two known SG export layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// `Date opération;Date valeur;Libellé;Débit;Crédit`
    FormatA,
    /// `Date de l'opération;Libellé;Détail de l'écriture;Montant de l'opération;Devise`
    FormatB,
    Unknown,
}

/// Decide which layout a header row belongs to.
///
/// A value-date column is the strongest signal since FormatB never has
/// one; it is checked first. "montant" without "devise" is still
/// accepted as FormatB so that older exports with trimmed headers keep
/// parsing.
pub fn classify(headers: &[String]) -> LayoutKind {
    let keys: Vec<String> = headers.iter().map(|h| normalize_key(h)).collect();
    let has = |needle: &str| keys.iter().any(|k| k.contains(needle));

    if has("date valeur") {
        LayoutKind::FormatA
    } else if has("montant") {
        LayoutKind::FormatB
    } else {
        LayoutKind::Unknown
    }
}
