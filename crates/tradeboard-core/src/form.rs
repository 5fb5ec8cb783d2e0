//! Add / edit form state and validation.
//!
//! A [`TradeDraft`] holds exactly what the user typed. [`TradeDraft::validate`]
//! turns it into a [`NewTrade`] or stops at the first bad field:
//!
//! 1. trade code: trimmed, upper-cased, must be non-empty
//! 2. date: `YYYY-MM-DD`
//! 3. open, high, low, close: finite numbers, in that order
//! 4. volume: an integer (`"12"` and `"12.0"` pass, `"12.5"` does not)

use crate::error::ValidationError;
use crate::record::{iso_date, NewTrade, PriceField, TradeId, TradeRecord};

/// Editable fields, in tab order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FormField {
    TradeCode,
    Date,
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::TradeCode,
        FormField::Date,
        FormField::Open,
        FormField::High,
        FormField::Low,
        FormField::Close,
        FormField::Volume,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::TradeCode => "Trade Code",
            FormField::Date => "Date",
            FormField::Open => "Open",
            FormField::High => "High",
            FormField::Low => "Low",
            FormField::Close => "Close",
            FormField::Volume => "Volume",
        }
    }

    fn position(self) -> usize {
        FormField::ALL
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        FormField::ALL[(self.position() + 1) % FormField::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let len = FormField::ALL.len();
        FormField::ALL[(self.position() + len - 1) % len]
    }
}

impl From<PriceField> for FormField {
    fn from(price: PriceField) -> Self {
        match price {
            PriceField::Open => FormField::Open,
            PriceField::High => FormField::High,
            PriceField::Low => FormField::Low,
            PriceField::Close => FormField::Close,
        }
    }
}

/// Raw text of every form field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TradeDraft {
    pub trade_code: String,
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl TradeDraft {
    /// Prefill from an existing record (edit).
    pub fn from_record(record: &TradeRecord) -> Self {
        TradeDraft {
            trade_code: record.trade_code.clone(),
            date: record.date_label(),
            open: record.open.to_string(),
            high: record.high.to_string(),
            low: record.low.to_string(),
            close: record.close.to_string(),
            volume: record.volume.to_string(),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::TradeCode => &self.trade_code,
            FormField::Date => &self.date,
            FormField::Open => &self.open,
            FormField::High => &self.high,
            FormField::Low => &self.low,
            FormField::Close => &self.close,
            FormField::Volume => &self.volume,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::TradeCode => &mut self.trade_code,
            FormField::Date => &mut self.date,
            FormField::Open => &mut self.open,
            FormField::High => &mut self.high,
            FormField::Low => &mut self.low,
            FormField::Close => &mut self.close,
            FormField::Volume => &mut self.volume,
        }
    }

    fn price(&self, field: PriceField) -> &str {
        self.field(FormField::from(field))
    }

    /// Validate every field in order; the first failure wins.
    pub fn validate(&self) -> Result<NewTrade, ValidationError> {
        let trade_code = self.trade_code.trim().to_uppercase();
        if trade_code.is_empty() {
            return Err(ValidationError::MissingTradeCode);
        }

        let date = iso_date::parse(&self.date).ok_or(ValidationError::InvalidDate)?;

        let mut prices = [0.0_f64; 4];
        for (slot, field) in prices.iter_mut().zip(PriceField::ALL) {
            *slot = parse_price(self.price(field)).ok_or(ValidationError::InvalidPrice(field))?;
        }
        let [open, high, low, close] = prices;

        let volume = parse_volume(&self.volume).ok_or(ValidationError::InvalidVolume)?;

        Ok(NewTrade {
            trade_code,
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Parse a finite number.
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse a non-negative integer volume.
///
/// Integral decimals such as `"12.0"` are accepted; anything with a
/// fractional part, a sign, or no digits at all is rejected.
pub fn parse_volume(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
        Some(v as u64)
    } else {
        None
    }
}

/// Whether a form creates a record or edits an existing one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(TradeId),
}

/// An open add/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeForm {
    pub mode: FormMode,
    pub draft: TradeDraft,
    pub focus: FormField,
    /// Inline validation message.
    pub error: Option<ValidationError>,
    /// Submitted and waiting for the data source.
    pub pending: bool,
}

impl TradeForm {
    pub fn add() -> Self {
        TradeForm {
            mode: FormMode::Add,
            draft: TradeDraft::default(),
            focus: FormField::TradeCode,
            error: None,
            pending: false,
        }
    }

    pub fn edit(record: &TradeRecord) -> Self {
        TradeForm {
            mode: FormMode::Edit(record.id),
            draft: TradeDraft::from_record(record),
            focus: FormField::TradeCode,
            error: None,
            pending: false,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.draft.field_mut(self.focus).push(c);
    }

    pub fn pop_char(&mut self) {
        self.draft.field_mut(self.focus).pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TradeDraft {
        TradeDraft {
            trade_code: " aci ".to_string(),
            date: "2024-03-01".to_string(),
            open: "10".to_string(),
            high: "12.5".to_string(),
            low: "9.75".to_string(),
            close: "11".to_string(),
            volume: "1500".to_string(),
        }
    }

    #[test]
    fn valid_draft_is_normalised() {
        let trade = draft().validate().unwrap();
        assert_eq!(trade.trade_code, "ACI");
        assert_eq!(trade.high, 12.5);
        assert_eq!(trade.volume, 1500);
    }

    #[test]
    fn first_failing_field_wins() {
        let mut d = draft();
        d.date = "yesterday".to_string();
        d.open = "abc".to_string();
        assert_eq!(d.validate(), Err(ValidationError::InvalidDate));

        let mut d = draft();
        d.low = "".to_string();
        d.close = "NaN".to_string();
        assert_eq!(d.validate(), Err(ValidationError::InvalidPrice(PriceField::Low)));
        assert_eq!(
            ValidationError::InvalidPrice(PriceField::Low).to_string(),
            "low must be a valid number."
        );

        let mut d = draft();
        d.trade_code = "   ".to_string();
        assert_eq!(d.validate(), Err(ValidationError::MissingTradeCode));
    }

    #[test]
    fn fractional_volume_is_rejected() {
        let mut d = draft();
        d.volume = "12.5".to_string();
        let err = d.validate().unwrap_err();
        assert_eq!(err, ValidationError::InvalidVolume);
        assert_eq!(err.field(), FormField::Volume);
    }

    #[test]
    fn volume_parsing_edges() {
        assert_eq!(parse_volume("12"), Some(12));
        assert_eq!(parse_volume(" 12.0 "), Some(12));
        assert_eq!(parse_volume("-3"), None);
        assert_eq!(parse_volume(""), None);
        assert_eq!(parse_volume("inf"), None);
    }

    #[test]
    fn infinite_prices_are_rejected() {
        assert_eq!(parse_price("1e400"), None);
        assert_eq!(parse_price("-2.5"), Some(-2.5));
    }

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut form = TradeForm::add();
        for _ in 0..FormField::ALL.len() {
            form.focus_next();
        }
        assert_eq!(form.focus, FormField::TradeCode);
        form.focus_prev();
        assert_eq!(form.focus, FormField::Volume);

        form.push_char('7');
        form.push_char('0');
        form.pop_char();
        assert_eq!(form.draft.volume, "7");
    }
}
