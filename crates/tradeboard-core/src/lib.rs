//! tradeboard-core
//!
//! Pure view-model logic for the trade dashboard:
//! - trade records and the add/edit form
//! - filter → sort → paginate over the working set
//! - price/volume and comparison chart series
//! - the dashboard reducer (actions in, effects out)
//!
//! Nothing in here does I/O; the client crate drives it.

pub mod record;
pub mod column;
pub mod time_frame;
pub mod view_state;
pub mod pipeline;
pub mod chart;
pub mod form;
pub mod error;
pub mod messages;
pub mod dashboard;

pub use record::{NewTrade, PriceField, TradeId, TradeRecord};
pub use column::{Column, SortDirection};
pub use time_frame::{GroupOrder, TimeFrame};
pub use view_state::{SortState, ViewState, PAGE_SIZE};
pub use pipeline::TableView;
pub use chart::{ComparisonPoint, ComparisonSeries, Ohlc, PriceVolumeSeries, SeriesPoint};
pub use form::{FormField, FormMode, TradeDraft, TradeForm};
pub use error::{UnknownGroupOrder, ValidationError};
pub use messages::{Action, Effect};
pub use dashboard::{Dashboard, LoadStatus};
