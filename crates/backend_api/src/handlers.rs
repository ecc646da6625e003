use axum::{extract::Multipart, response::IntoResponse, Json};
use serde::Serialize;

use societe_generale::TransactionRecord;

use crate::{error::ApiError, Result};

/// Response body for the parse endpoint.
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub transactions: Vec<TransactionRecord>,
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

/// POST /parse/sg/csv
///
/// Multipart upload, field `file`. Always 200 for a well-formed
/// request: undecodable, headerless or unknown-layout content yields
/// an empty transaction list, never an error status.
pub async fn parse_sg_csv(mut multipart: Multipart) -> Result<Json<ParseResponse>> {
    let mut transactions: Vec<TransactionRecord> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let source_file = field
            .file_name()
            .map(|name| name.to_string())
            .unwrap_or_else(|| "upload.csv".to_string());

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Multipart(e.to_string()))?;

        transactions = societe_generale::parse_statement_bytes(&bytes, &source_file);

        tracing::info!(
            source_file = %source_file,
            bytes = bytes.len(),
            records = transactions.len(),
            "parsed SG statement upload"
        );
        break;
    }

    Ok(Json(ParseResponse { transactions }))
}
