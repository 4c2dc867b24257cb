use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::inventory::{
    node_name, probe_cpu_info, probe_memory_info, probe_model_info, Collector,
};
use crate::output::output_data;
use crate::publish::{Publisher, StorePublisher};

fn build_collector(probe_timeout: u64) -> Result<Collector> {
    Collector::new(Duration::from_secs(probe_timeout))
        .context("failed to build probe worker pool")
}

pub fn show_inventory(format: &str, probe_timeout: u64) -> Result<()> {
    let collector = build_collector(probe_timeout)?;
    let snapshot = collector.collect_snapshot(&node_name())?;
    output_data(&snapshot, format)
}

pub fn show_cpu(format: &str, probe_timeout: u64) -> Result<()> {
    let cpus = probe_cpu_info(Duration::from_secs(probe_timeout))?;
    output_data(&cpus, format)
}

pub fn show_memory(format: &str, probe_timeout: u64) -> Result<()> {
    let memory = probe_memory_info(Duration::from_secs(probe_timeout))?;
    output_data(&memory, format)
}

pub fn show_model(format: &str) -> Result<()> {
    let model = probe_model_info()?;
    output_data(&model, format)
}

pub fn show_disks(format: &str, probe_timeout: u64) -> Result<()> {
    let collector = build_collector(probe_timeout)?;
    let disks = collector.collect_disks()?;
    output_data(&disks, format)
}

pub fn post_inventory(url: &str, probe_timeout: u64) -> Result<()> {
    let collector = build_collector(probe_timeout)?;
    let host = node_name();
    let snapshot = collector.collect_snapshot(&host)?;

    let publisher = StorePublisher::new(url);
    publisher
        .publish_snapshot(&host, &snapshot)
        .context("failed to post inventory snapshot")?;
    info!(host = %host, url, "inventory snapshot posted");
    Ok(())
}
