//! Error types for the view-model core.
//!
//! The pipeline itself is infallible. The fallible steps are turning a
//! user-typed add/edit form into a [`NewTrade`](crate::record::NewTrade),
//! which reports the first offending field, and parsing configuration
//! values.

use thiserror::Error;

use crate::form::FormField;
use crate::record::PriceField;

/// Add/edit form validation failure.
///
/// `Display` is the message shown inline under the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Trade code is required.")]
    MissingTradeCode,

    #[error("Invalid date.")]
    InvalidDate,

    #[error("{0} must be a valid number.")]
    InvalidPrice(PriceField),

    #[error("Volume must be an integer.")]
    InvalidVolume,
}

impl ValidationError {
    /// The form field the message belongs to.
    pub fn field(&self) -> FormField {
        match self {
            ValidationError::MissingTradeCode => FormField::TradeCode,
            ValidationError::InvalidDate => FormField::Date,
            ValidationError::InvalidPrice(price) => FormField::from(*price),
            ValidationError::InvalidVolume => FormField::Volume,
        }
    }
}

/// Error returned when parsing an unknown [`GroupOrder`](crate::GroupOrder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown group order {0:?} (expected \"chronological\" or \"first-seen\")")]
pub struct UnknownGroupOrder(pub String);
