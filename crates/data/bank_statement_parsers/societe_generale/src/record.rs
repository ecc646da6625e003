use chrono::NaiveDate;
use serde::Serialize;

/// Institution code carried on every record.
pub const BANK_CODE: &str = "SG";

/// One normalized transaction row, the shape the aggregation backend
/// stores. Nullable fields serialize as explicit `null`: the store
/// expects the full shape on every record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Freshly generated UUID, no external meaning.
    pub id: String,
    pub bank: String,
    /// Not derivable from the CSV export.
    pub account_iban: Option<String>,
    pub date_operation: NaiveDate,
    /// FormatA only.
    pub date_valeur: Option<NaiveDate>,
    pub label: String,
    /// FormatB only.
    pub details: Option<String>,
    pub debit: f64,
    pub credit: f64,
    /// Signed net value, always `round(credit - debit, 2)`.
    pub amount: f64,
    /// "YYYY-MM" bucket of `date_operation`, used for aggregation.
    pub year_month: String,
    /// Uploaded filename, passed through unvalidated.
    pub source_file: String,
    /// Assigned later by the categorization service.
    pub category_id: Option<String>,
}
