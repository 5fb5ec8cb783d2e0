// crates/tradeboard-protocol/src/error.rs

use thiserror::Error;

use tradeboard_core::TradeId;

/// Failure decoding a response body or a dataset file.
///
/// `row` is 1-based and counts data rows only (a CSV header is not a row).
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: missing field `{field}`")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: invalid {field} {value:?}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("duplicate trade id {0}")]
    DuplicateId(TradeId),

    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),
}
