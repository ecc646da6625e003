//! Société Générale bank-statement CSV parser.
//!
//! Ingests raw SG exports in either of the two historical column
//! layouts and emits normalized transaction records. The pipeline is
//! best-effort end to end: undecodable bytes, missing headers, unknown
//! layouts and malformed rows degrade to an empty or partial record
//! list, never to an error.

pub mod amount;
pub mod columns;
pub mod header;
pub mod layout;
pub mod record;
pub mod text;

pub use header::HeaderSlice;
pub use layout::LayoutKind;
pub use record::{TransactionRecord, BANK_CODE};

use chrono::{Datelike, NaiveDate};
use std::io::Read;
use uuid::Uuid;

use crate::amount::{parse_amount, round2};
use crate::columns::{AmountColumns, LayoutColumns};

pub const PARSER_NAME: &str = "societe_generale";

/// Full pipeline: bytes -> decoded text -> header slice -> layout ->
/// records. `source_file` is the uploaded filename, passed through on
/// every record.
pub fn parse_statement_bytes(bytes: &[u8], source_file: &str) -> Vec<TransactionRecord> {
    let decoded = text::decode_text_lossy(bytes);
    let slice = header::locate(&decoded);
    if slice.headers.is_empty() {
        return Vec::new();
    }

    let layout = layout::classify(&slice.headers);
    build_records(layout, &slice, source_file)
}

/// Convenience entry for file and upload streams.
pub fn parse_statement_reader<R: Read>(
    mut reader: R,
    source_file: &str,
) -> anyhow::Result<Vec<TransactionRecord>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(parse_statement_bytes(&buf, source_file))
}

/// Generic row-to-record mapper shared by both layouts; the resolved
/// column table is the only layout-specific input.
///
/// A row without a parseable operation date is dropped entirely. A
/// value date that fails to parse is treated as absent but keeps the
/// row.
pub fn build_records(
    layout: LayoutKind,
    slice: &HeaderSlice,
    source_file: &str,
) -> Vec<TransactionRecord> {
    let Some(cols) = LayoutColumns::resolve(layout, &slice.headers) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for row in &slice.rows {
        let Some(date_operation) = cols
            .date_operation
            .and_then(|idx| cell(row, idx))
            .and_then(parse_fr_date)
        else {
            continue;
        };

        let date_valeur = cols
            .date_valeur
            .and_then(|idx| cell(row, idx))
            .and_then(parse_fr_date);

        let label = cols
            .label
            .and_then(|idx| cell(row, idx))
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let details = cols
            .detail
            .and_then(|idx| cell(row, idx))
            .map(|s| s.trim().to_string());

        let (debit, credit) = match cols.amounts {
            AmountColumns::Split { debit, credit } => {
                let d = debit.and_then(|idx| cell(row, idx)).map(parse_amount);
                let c = credit.and_then(|idx| cell(row, idx)).map(parse_amount);
                (d.unwrap_or(0.0), c.unwrap_or(0.0))
            }
            AmountColumns::Signed { amount } => {
                let signed = amount
                    .and_then(|idx| cell(row, idx))
                    .map(parse_amount)
                    .unwrap_or(0.0);
                if signed < 0.0 {
                    (signed.abs(), 0.0)
                } else {
                    (0.0, signed)
                }
            }
        };
        let debit = round2(debit);
        let credit = round2(credit);

        out.push(TransactionRecord {
            id: Uuid::new_v4().to_string(),
            bank: BANK_CODE.to_string(),
            account_iban: None,
            date_operation,
            date_valeur,
            label,
            details,
            debit,
            credit,
            amount: round2(credit - debit),
            year_month: format!("{:04}-{:02}", date_operation.year(), date_operation.month()),
            source_file: source_file.to_string(),
            category_id: None,
        });
    }

    out
}

/// Rows are not guaranteed header-length; index defensively. Blank
/// cells count as absent.
fn cell(row: &[String], idx: usize) -> Option<&str> {
    row.get(idx)
        .map(|s| s.as_str())
        .filter(|s| !s.trim().is_empty())
}

/// SG dates are day/month/year with slashes, zero-padded or not.
fn parse_fr_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAT_A: &str = "Relevé des opérations\n\
        ==========\n\
        Date opération;Date valeur;Libellé;Débit;Crédit\n\
        01/03/2024;02/03/2024;VIREMENT SALAIRE;;2500,00\n\
        05/03/2024;;ACHAT CB;19,90;\n";

    const FORMAT_B: &str = "Date de l'opération;Libellé;Détail de l'écriture;Montant de l'opération;Devise\n\
        10/04/2024;ACHAT CB;PAIEMENT X;-45,00;EUR\n";

    #[test]
    fn test_end_to_end_format_a() {
        let records = parse_statement_bytes(FORMAT_A.as_bytes(), "releve.csv");
        assert_eq!(records.len(), 2);

        let salary = &records[0];
        assert_eq!(salary.bank, "SG");
        assert_eq!(salary.label, "VIREMENT SALAIRE");
        assert_eq!(salary.debit, 0.0);
        assert_eq!(salary.credit, 2500.0);
        assert_eq!(salary.amount, 2500.0);
        assert_eq!(salary.year_month, "2024-03");
        assert_eq!(
            salary.date_valeur,
            NaiveDate::from_ymd_opt(2024, 3, 2)
        );
        assert!(salary.details.is_none());
        assert_eq!(salary.source_file, "releve.csv");

        let purchase = &records[1];
        assert_eq!(purchase.debit, 19.9);
        assert_eq!(purchase.credit, 0.0);
        assert_eq!(purchase.amount, -19.9);
        assert!(purchase.date_valeur.is_none());
        assert!(purchase.details.is_none());
    }

    #[test]
    fn test_end_to_end_format_b() {
        let records = parse_statement_bytes(FORMAT_B.as_bytes(), "export.csv");
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.debit, 45.0);
        assert_eq!(record.credit, 0.0);
        assert_eq!(record.amount, -45.0);
        assert_eq!(record.details.as_deref(), Some("PAIEMENT X"));
        assert!(record.date_valeur.is_none());
        assert_eq!(record.year_month, "2024-04");
    }

    #[test]
    fn test_amount_invariant_holds() {
        for record in parse_statement_bytes(FORMAT_A.as_bytes(), "a.csv")
            .iter()
            .chain(parse_statement_bytes(FORMAT_B.as_bytes(), "b.csv").iter())
        {
            assert_eq!(record.amount, round2(record.credit - record.debit));
            assert!(record.debit >= 0.0);
            assert!(record.credit >= 0.0);
        }
    }

    #[test]
    fn test_row_with_bad_operation_date_is_dropped() {
        let input = "Date opération;Date valeur;Libellé;Débit;Crédit\n\
            pas une date;;LIGNE CASSEE;1,00;\n\
            ;;LIGNE VIDE;2,00;\n\
            05/03/2024;;LIGNE VALIDE;3,00;\n";
        let records = parse_statement_bytes(input.as_bytes(), "f.csv");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "LIGNE VALIDE");
    }

    #[test]
    fn test_bad_value_date_keeps_row() {
        let input = "Date opération;Date valeur;Libellé;Débit;Crédit\n\
            05/03/2024;31/31/2024;ACHAT;1,00;\n";
        let records = parse_statement_bytes(input.as_bytes(), "f.csv");
        assert_eq!(records.len(), 1);
        assert!(records[0].date_valeur.is_none());
    }

    #[test]
    fn test_unpadded_date_components() {
        let input = "Date opération;Date valeur;Libellé;Débit;Crédit\n\
            1/3/2024;;ACHAT;1,00;\n";
        let records = parse_statement_bytes(input.as_bytes(), "f.csv");
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].date_operation,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_zero_amount_format_b() {
        let input = "Date de l'opération;Libellé;Montant de l'opération;Devise\n\
            10/04/2024;REGULARISATION;0,00;EUR\n";
        let records = parse_statement_bytes(input.as_bytes(), "f.csv");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].debit, 0.0);
        assert_eq!(records[0].credit, 0.0);
        assert_eq!(records[0].amount, 0.0);
    }

    #[test]
    fn test_malformed_amount_defaults_to_zero_row_kept() {
        let input = "Date opération;Date valeur;Libellé;Débit;Crédit\n\
            05/03/2024;;FRAIS;n/a;\n";
        let records = parse_statement_bytes(input.as_bytes(), "f.csv");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].debit, 0.0);
        assert_eq!(records[0].amount, 0.0);
    }

    #[test]
    fn test_short_rows_are_indexed_defensively() {
        let input = "Date opération;Date valeur;Libellé;Débit;Crédit\n\
            05/03/2024;;ACHAT\n";
        let records = parse_statement_bytes(input.as_bytes(), "f.csv");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "ACHAT");
        assert_eq!(records[0].debit, 0.0);
        assert_eq!(records[0].credit, 0.0);
    }

    #[test]
    fn test_junk_only_file_yields_no_records() {
        let input = "Relevé de compte\nAucune donnée disponible\n";
        assert!(parse_statement_bytes(input.as_bytes(), "vide.csv").is_empty());
    }

    #[test]
    fn test_unknown_layout_yields_no_records() {
        let input = "colonne a;colonne b\nx;y\n";
        assert!(parse_statement_bytes(input.as_bytes(), "autre.csv").is_empty());
    }

    #[test]
    fn test_windows_1252_statement() {
        // FormatA header with Windows-1252 accents (é = 0xE9).
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"Date op\xE9ration;Date valeur;Libell\xE9;D\xE9bit;Cr\xE9dit\n");
        bytes.extend_from_slice(b"01/03/2024;;CH\xC8QUE 123;50,00;\n");

        let records = parse_statement_bytes(&bytes, "legacy.csv");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].debit, 50.0);
        assert_eq!(records[0].label, "CHÈQUE 123");
    }

    #[test]
    fn test_record_ids_are_unique() {
        let records = parse_statement_bytes(FORMAT_A.as_bytes(), "releve.csv");
        assert_ne!(records[0].id, records[1].id);
    }
}
