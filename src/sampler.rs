use std::thread;
use std::time::Duration;

use tracing::info;

use crate::error::PublishError;
use crate::inventory::types::{DiskRecord, DiskTemperature};
use crate::inventory::Collector;
use crate::publish::Publisher;

/// Continuous per-disk temperature reporter.
///
/// Alternates between sampling (one concurrent probe per disk) and idling
/// out the fixed interval, forever. The disk list is frozen at snapshot
/// assembly; devices hot-plugged while the loop runs are not picked up —
/// known limitation.
pub struct TemperatureSampler<'a> {
    collector: &'a Collector,
    interval: Duration,
    retries: u32,
}

impl<'a> TemperatureSampler<'a> {
    pub fn new(collector: &'a Collector, interval: Duration, retries: u32) -> Self {
        Self {
            collector,
            interval,
            retries,
        }
    }

    /// Run sampling cycles until the process is terminated. A failing disk
    /// probe is reported as an absent temperature and never stalls the
    /// cycle; a publisher failure is surfaced and ends the loop.
    pub fn run(
        &self,
        host: &str,
        disks: &[DiskRecord],
        publisher: &dyn Publisher,
    ) -> Result<(), PublishError> {
        loop {
            let samples = self.collector.sample_temperatures(disks, self.retries);
            let line = format_sample_line(&samples);
            publisher.publish_temperatures(host, &line)?;
            info!(host, disks = samples.len(), "published temperature cycle");
            thread::sleep(self.interval);
        }
    }
}

/// One "`name` `temperature-or-empty`" pair per disk, '|'-separated. A disk
/// with no reading still appears in the line so every cycle covers the full
/// disk list.
pub fn format_sample_line(samples: &[DiskTemperature]) -> String {
    samples
        .iter()
        .map(|sample| format!("{} {}", sample.disk, sample.celsius.as_deref().unwrap_or("")))
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(disk: &str, celsius: Option<&str>) -> DiskTemperature {
        DiskTemperature {
            disk: disk.to_string(),
            celsius: celsius.map(str::to_string),
        }
    }

    #[test]
    fn test_sample_line_joins_with_pipe() {
        let samples = vec![sample("sda", Some("34")), sample("nvme0n1", Some("41"))];
        assert_eq!(format_sample_line(&samples), "sda 34|nvme0n1 41");
    }

    #[test]
    fn test_cycle_line_keeps_every_disk_when_one_has_no_reading() {
        let samples = vec![
            sample("sda", Some("34")),
            sample("sdb", None),
            sample("nvme0n1", Some("41")),
        ];
        let line = format_sample_line(&samples);
        assert_eq!(line, "sda 34|sdb |nvme0n1 41");
        assert_eq!(line.split('|').count(), 3);
    }

    #[test]
    fn test_empty_disk_list_yields_empty_line() {
        assert_eq!(format_sample_line(&[]), "");
    }
}
