mod cli;
mod commands;
mod error;
mod inventory;
mod output;
mod publish;
mod sampler;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use output::print_error;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Inventory {
            format,
            probe_timeout,
        } => commands::show_inventory(format, *probe_timeout),
        Commands::Cpu {
            format,
            probe_timeout,
        } => commands::show_cpu(format, *probe_timeout),
        Commands::Memory {
            format,
            probe_timeout,
        } => commands::show_memory(format, *probe_timeout),
        Commands::Model { format } => commands::show_model(format),
        Commands::Disks {
            format,
            probe_timeout,
        } => commands::show_disks(format, *probe_timeout),
        Commands::PostInventory { url, probe_timeout } => {
            commands::post_inventory(url, *probe_timeout)
        }
        Commands::Watch {
            interval,
            url,
            probe_timeout,
            retries,
        } => commands::watch(*interval, url.as_deref(), *probe_timeout, *retries),
    };

    if let Err(e) = result {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
