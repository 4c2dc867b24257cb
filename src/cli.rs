use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "node-inventory")]
#[command(about = "Collects node hardware inventory and reports disk temperatures")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect the full inventory snapshot
    Inventory {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,

        /// Per-probe timeout in seconds
        #[arg(long, default_value = "30")]
        probe_timeout: u64,
    },
    /// Show CPU topology
    Cpu {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,

        /// Per-probe timeout in seconds
        #[arg(long, default_value = "30")]
        probe_timeout: u64,
    },
    /// Show the online memory summary
    Memory {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,

        /// Per-probe timeout in seconds
        #[arg(long, default_value = "30")]
        probe_timeout: u64,
    },
    /// Show the system model identity
    Model {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Show enumerated disks with serial numbers
    Disks {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,

        /// Per-probe timeout in seconds
        #[arg(long, default_value = "30")]
        probe_timeout: u64,
    },
    /// Post the inventory snapshot to a store
    PostInventory {
        /// Store base URL
        #[arg(short, long, default_value = "http://localhost:6183")]
        url: String,

        /// Per-probe timeout in seconds
        #[arg(long, default_value = "30")]
        probe_timeout: u64,
    },
    /// Publish the snapshot, then report disk temperatures forever
    Watch {
        /// Seconds between sampling cycles
        #[arg(short, long, default_value = "60")]
        interval: u64,

        /// Store base URL; prints to the console when omitted
        #[arg(short, long)]
        url: Option<String>,

        /// Per-probe timeout in seconds
        #[arg(long, default_value = "30")]
        probe_timeout: u64,

        /// Extra attempts per disk for failed temperature probes
        #[arg(long, default_value = "2")]
        retries: u32,
    },
}
