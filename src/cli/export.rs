//! CLI commands for data export
//!
//! Provides commands for exporting charts and tags as bundles.

use std::iter;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::error::{ExportError, ExportResult};
use crate::export::{
    bundle_root, write_dir, write_zip_file, ChartExporter, DatasetExporter, ExportCommand,
    ExportStream, IdList, TagExporter, EXPORT_VERSION,
};
use crate::models::{ChartId, DashboardId, DatasetId};
use crate::storage::Storage;

/// Bundle format options
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum BundleFormat {
    /// Single zip archive
    #[default]
    Zip,
    /// Plain directory tree
    Dir,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export charts with their datasets and tags
    Charts {
        /// Chart IDs to export
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Output path (defaults to the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bundle format
        #[arg(short, long, value_enum, default_value = "zip")]
        format: BundleFormat,

        /// Do not write tags.yaml
        #[arg(long)]
        no_tags: bool,

        /// Export chart files only, without datasets or tags
        #[arg(long)]
        no_related: bool,

        /// List the files that would be written without rendering them
        #[arg(long)]
        dry_run: bool,
    },

    /// Export datasets with the databases they live in
    Datasets {
        /// Dataset IDs to export
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Output path (defaults to the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bundle format
        #[arg(short, long, value_enum, default_value = "zip")]
        format: BundleFormat,

        /// Export dataset files only, without database files
        #[arg(long)]
        no_related: bool,

        /// List the files that would be written without rendering them
        #[arg(long)]
        dry_run: bool,
    },

    /// Export the merged tags of dashboards and charts
    Tags {
        /// Dashboard IDs whose tags are exported
        #[arg(short, long = "dashboard")]
        dashboards: Vec<i64>,

        /// Chart IDs whose tags are exported
        #[arg(short, long = "chart")]
        charts: Vec<i64>,

        /// Output path (defaults to the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bundle format
        #[arg(short, long, value_enum, default_value = "zip")]
        format: BundleFormat,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> ExportResult<()> {
    match cmd {
        ExportCommands::Charts {
            ids,
            output,
            format,
            no_tags,
            no_related,
            dry_run,
        } => {
            let exporter =
                ChartExporter::new(storage.daos()).with_tags(settings.export_tags && !no_tags);
            let stream = exporter.run(ids.into_iter().map(ChartId::new), !no_related)?;

            if dry_run {
                return print_paths(stream);
            }
            write_bundle(storage, settings, stream, output, format)
        }
        ExportCommands::Datasets {
            ids,
            output,
            format,
            no_related,
            dry_run,
        } => {
            let exporter = DatasetExporter::new(&storage.datasets);
            let stream = ExportCommand::new(exporter, ids.into_iter().map(DatasetId::new))
                .export_related(!no_related)
                .run()?;

            if dry_run {
                return print_paths(stream);
            }
            write_bundle(storage, settings, stream, output, format)
        }
        ExportCommands::Tags {
            dashboards,
            charts,
            output,
            format,
        } => {
            let exporter = TagExporter::new(&storage.dashboards, &storage.charts);
            let dashboard_ids: Option<IdList<DashboardId>> = (!dashboards.is_empty())
                .then(|| dashboards.into_iter().map(DashboardId::new).collect::<Vec<_>>().into());
            let chart_ids: Option<IdList<ChartId>> = (!charts.is_empty())
                .then(|| charts.into_iter().map(ChartId::new).collect::<Vec<_>>().into());

            let unit = exporter.export(dashboard_ids, chart_ids);
            let stream: ExportStream<'_> = Box::new(iter::once(Ok::<_, ExportError>(unit)));
            write_bundle(storage, settings, stream, output, format)
        }
        ExportCommands::Info => handle_export_info(storage),
    }
}

/// Write a stream to the requested location
fn write_bundle(
    storage: &Storage,
    settings: &Settings,
    stream: ExportStream<'_>,
    output: Option<PathBuf>,
    format: BundleFormat,
) -> ExportResult<()> {
    let root = bundle_root(&settings.bundle_prefix, Utc::now());

    match format {
        BundleFormat::Zip => {
            let output = output
                .unwrap_or_else(|| storage.paths().exports_dir().join(format!("{}.zip", root)));
            let written = write_zip_file(stream, &output, &root)?;
            println!("Exported {} files to: {}", written.len(), output.display());
        }
        BundleFormat::Dir => {
            let output = output.unwrap_or_else(|| storage.paths().exports_dir().join(&root));
            let written = write_dir(stream, &output)?;
            println!("Exported {} files to: {}", written.len(), output.display());
        }
    }

    Ok(())
}

/// Print the path of every unit without rendering it
fn print_paths(stream: ExportStream<'_>) -> ExportResult<()> {
    for unit in stream {
        println!("{}", unit?.path());
    }
    Ok(())
}

/// Show export information
fn handle_export_info(storage: &Storage) -> ExportResult<()> {
    let charts = storage.charts.get_all()?;
    let datasets = storage.datasets.count()?;
    let with_dataset = charts.iter().filter(|c| c.dataset_id.is_some()).count();

    println!("Export Information");
    println!("==================\n");

    println!("Export Version: {}", EXPORT_VERSION);
    println!("App Version:    {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Data Summary:");
    println!("  Charts:              {}", charts.len());
    println!("  Charts with dataset: {}", with_dataset);
    println!("  Datasets:            {}", datasets);
    println!();

    println!("Examples:");
    println!("  chart-export charts 1 2 3");
    println!("  chart-export charts 7 --no-tags --format dir -o ./out");
    println!("  chart-export datasets 3 --dry-run");
    println!("  chart-export tags --dashboard 4 --chart 7");

    Ok(())
}
