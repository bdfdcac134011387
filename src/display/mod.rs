//! Display formatting for terminal output

pub mod chart;

pub use chart::format_chart_list;
