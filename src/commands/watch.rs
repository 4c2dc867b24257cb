use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::inventory::{node_name, Collector};
use crate::publish::{ConsolePublisher, Publisher, StorePublisher};
use crate::sampler::TemperatureSampler;

/// Assemble one snapshot, publish it, then sample disk temperatures on the
/// given interval until the process is terminated.
pub fn watch(interval: u64, url: Option<&str>, probe_timeout: u64, retries: u32) -> Result<()> {
    let collector = Collector::new(Duration::from_secs(probe_timeout))
        .context("failed to build probe worker pool")?;

    let host = node_name();
    let snapshot = collector.collect_snapshot(&host)?;

    let publisher: Box<dyn Publisher> = match url {
        Some(url) => Box::new(StorePublisher::new(url)),
        None => Box::new(ConsolePublisher),
    };

    publisher
        .publish_snapshot(&host, &snapshot)
        .context("failed to publish inventory snapshot")?;

    info!(
        host = %host,
        disks = snapshot.disks.len(),
        interval,
        "starting temperature sampling"
    );

    let sampler = TemperatureSampler::new(&collector, Duration::from_secs(interval), retries);
    sampler
        .run(&host, &snapshot.disks, publisher.as_ref())
        .context("temperature publishing failed")?;

    Ok(())
}
