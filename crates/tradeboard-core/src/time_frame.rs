//! Aggregation granularity of the price & volume chart.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownGroupOrder;

/// Chart time-frame: one point per day, month or year.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TimeFrame {
    #[default]
    Day,
    Month,
    Year,
}

impl TimeFrame {
    /// Next time-frame in the selector (wraps around).
    pub fn next(self) -> Self {
        match self {
            TimeFrame::Day => TimeFrame::Month,
            TimeFrame::Month => TimeFrame::Year,
            TimeFrame::Year => TimeFrame::Day,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeFrame::Day => "Day",
            TimeFrame::Month => "Month",
            TimeFrame::Year => "Year",
        }
    }
}

/// Emission order of aggregated month/year groups.
///
/// `FirstSeen` follows the order in which each period key is first
/// met while walking the working set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupOrder {
    #[default]
    Chronological,
    FirstSeen,
}

impl FromStr for GroupOrder {
    type Err = UnknownGroupOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chronological" => Ok(GroupOrder::Chronological),
            "first-seen" | "first_seen" => Ok(GroupOrder::FirstSeen),
            other => Err(UnknownGroupOrder(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_order_parses_config_spellings() {
        assert_eq!("Chronological".parse::<GroupOrder>(), Ok(GroupOrder::Chronological));
        assert_eq!(" first_seen ".parse::<GroupOrder>(), Ok(GroupOrder::FirstSeen));

        let err = "weekly".parse::<GroupOrder>().unwrap_err();
        assert_eq!(err, UnknownGroupOrder("weekly".into()));
        assert_eq!(
            err.to_string(),
            "unknown group order \"weekly\" (expected \"chronological\" or \"first-seen\")"
        );
    }

    #[test]
    fn time_frame_cycles() {
        assert_eq!(TimeFrame::Day.next().next().next(), TimeFrame::Day);
    }
}
