// crates/tradeboard-client/src/components/mod.rs

pub mod trade_table;
pub mod price_chart;
pub mod compare_chart;
pub mod trade_form;
pub mod notice;
pub mod status_bar;
pub mod help;
