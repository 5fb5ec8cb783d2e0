// crates/tradeboard-protocol/src/api.rs

//! Remote trade API: endpoint paths and body codecs.
//!
//! Endpoints, relative to a base URL such as `http://localhost:8000/api`:
//!
//! - `GET    {base}/trades`       → `[TradeRecord]`
//! - `POST   {base}/trades`       → `TradeRecord` (body: `NewTrade`)
//! - `PUT    {base}/trades/{id}`  → `TradeRecord` (body: `TradeRecord`)
//! - `DELETE {base}/trades/{id}`  → any body
//!
//! Response bodies go through the same lenient decoding as datasets, so a
//! backend that returns numeric columns as strings still works. Unlike
//! datasets, every record must carry its `id`.

use tradeboard_core::{NewTrade, TradeId, TradeRecord};

use crate::dataset::{finish_row, finish_rows, json_row, json_rows};
use crate::error::ProtocolError;

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

pub fn trades_url(base: &str) -> String {
    join(base, "trades")
}

pub fn trade_url(base: &str, id: TradeId) -> String {
    join(base, &format!("trades/{id}"))
}

/// Decode the body of `GET /trades`.
pub fn decode_records(body: &str) -> Result<Vec<TradeRecord>, ProtocolError> {
    finish_rows(json_rows(body)?, false)
}

/// Decode the body of a create or update response.
pub fn decode_record(body: &str) -> Result<TradeRecord, ProtocolError> {
    finish_row(json_row(body)?)
}

pub fn encode_new_trade(trade: &NewTrade) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(trade)?)
}

pub fn encode_record(record: &TradeRecord) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(record)?)
}
