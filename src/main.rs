use anyhow::Result;
use clap::{Parser, Subcommand};

use chart_export::cli::{handle_chart_command, handle_export_command, ChartCommands, ExportCommands};
use chart_export::config::{paths::ExportPaths, settings::Settings};
use chart_export::logging::init_logging;
use chart_export::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "chart-export",
    version,
    about = "Export charts, datasets and tags as re-importable YAML bundles",
    long_about = "chart-export turns charts from a local analytics store into a bundle \
                  of YAML files: one file per chart, the datasets and databases they \
                  read from, a merged tags.yaml and a metadata.yaml header."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Export(ExportCommands),

    #[command(flatten)]
    Chart(ChartCommands),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExportPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings.log_level)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing chart-export at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Store files:");
            println!("  {}", paths.charts_file().display());
            println!("  {}", paths.dashboards_file().display());
            println!("  {}", paths.datasets_file().display());
        }
        Some(Commands::Config) => {
            println!("chart-export Configuration");
            println!("==========================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            println!("Initialized:       {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Export tags:   {}", settings.export_tags);
            println!("  Log level:     {}", settings.log_level);
            println!("  Bundle prefix: {}", settings.bundle_prefix);
        }
        Some(Commands::Export(cmd)) => {
            let storage = Storage::new(paths)?;
            storage.load_all()?;
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Chart(cmd)) => {
            let storage = Storage::new(paths)?;
            storage.load_all()?;
            handle_chart_command(&storage, cmd)?;
        }
        None => {
            println!("chart-export - YAML bundles for charts, datasets and tags");
            println!();
            println!("Run 'chart-export --help' for usage information.");
        }
    }

    Ok(())
}
