//! tradeboard-protocol
//!
//! Text encodings for trade records.
//!
//! This crate turns response bodies and dataset files into
//! `tradeboard_core::TradeRecord`s and back again. It performs no I/O.
//!
//! - [`api`]       : remote API endpoints and JSON bodies
//! - [`dataset`]   : lenient JSON/CSV dataset decoding
//! - [`csv_codec`] : CSV datasets and exports

pub mod error;
pub mod dataset;
pub mod csv_codec;
pub mod api;

pub use error::ProtocolError;
pub use dataset::{parse_dataset, DatasetFormat};
pub use csv_codec::{read_records_csv, write_records_csv};
