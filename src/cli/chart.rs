//! Chart CLI commands
//!
//! Read-only inspection of the charts in the store.

use clap::Subcommand;

use crate::display::format_chart_list;
use crate::error::{ExportError, ExportResult};
use crate::models::ChartId;
use crate::storage::Storage;

/// Chart subcommands
#[derive(Subcommand, Debug)]
pub enum ChartCommands {
    /// List all charts
    List,
    /// Show the file that would be exported for a chart
    Show {
        /// Chart ID
        id: i64,
    },
}

/// Handle a chart command
pub fn handle_chart_command(storage: &Storage, cmd: ChartCommands) -> ExportResult<()> {
    match cmd {
        ChartCommands::List => {
            let charts = storage.charts.get_all()?;
            println!("{}", format_chart_list(&charts));
        }
        ChartCommands::Show { id } => {
            let chart = storage
                .charts
                .get(ChartId::new(id))?
                .ok_or_else(|| ExportError::chart_not_found(id))?;
            let dataset_uuid = match chart.dataset_id {
                Some(dataset_id) => Some(
                    storage
                        .datasets
                        .get(dataset_id)?
                        .ok_or_else(|| ExportError::dataset_not_found(dataset_id))?
                        .uuid,
                ),
                None => None,
            };

            println!("# {}", crate::export::ChartExporter::file_name(&chart));
            print!(
                "{}",
                crate::export::ChartExporter::file_content(&chart, dataset_uuid)?
            );
        }
    }

    Ok(())
}
