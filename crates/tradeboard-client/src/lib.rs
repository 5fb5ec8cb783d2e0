//! tradeboard-client
//!
//! Terminal front end for the trade dashboard:
//! - [`app`]     : key handling on top of the core `Dashboard`
//! - [`ui`]      : ratatui layout and [`components`]
//! - [`network`] : background worker running effects against a data source
//! - [`api`]     : reqwest client for the remote trade API
//! - [`config`]  : layered TOML / env configuration

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod network;
pub mod theme;
pub mod ui;

pub use api::{ApiClient, ApiError};
pub use app::{App, InputMode};
pub use config::{ClientConfig, ConfigError};
pub use network::{DataSource, DataWorker};
pub use theme::{Theme, ThemeName};
