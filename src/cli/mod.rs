//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the exporters.

pub mod chart;
pub mod export;

pub use chart::{handle_chart_command, ChartCommands};
pub use export::{handle_export_command, BundleFormat, ExportCommands};
