use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{AssemblyError, ProbeError};
use crate::inventory::probe_cpu::probe_cpu_info;
use crate::inventory::probe_disks::{
    enumerate_disks, probe_disk_serial, probe_disk_temperature, reconcile_serials,
};
use crate::inventory::probe_identity::probe_model_info;
use crate::inventory::probe_memory::probe_memory_info;
use crate::inventory::types::{
    CpuSocket, DiskRecord, DiskTemperature, InventorySnapshot, MemoryInfo, ModelInfo,
};

/// Worker threads for probe dispatch. Probes block on external commands, so
/// this bounds both the facet wave and the per-disk fan-out instead of
/// spawning one thread per disk.
const PROBE_WORKERS: usize = 4;

/// The four top-level facet probes. Injectable so assembly can be exercised
/// without spawning external commands.
struct FacetProbes {
    model: Box<dyn Fn() -> Result<ModelInfo, ProbeError> + Send + Sync>,
    cpu: Box<dyn Fn() -> Result<Vec<CpuSocket>, ProbeError> + Send + Sync>,
    memory: Box<dyn Fn() -> Result<MemoryInfo, ProbeError> + Send + Sync>,
    disks: Box<dyn Fn() -> Result<Vec<DiskRecord>, ProbeError> + Send + Sync>,
}

impl FacetProbes {
    fn host_probes(timeout: Duration) -> Self {
        Self {
            model: Box::new(probe_model_info),
            cpu: Box::new(move || probe_cpu_info(timeout)),
            memory: Box::new(move || probe_memory_info(timeout)),
            disks: Box::new(move || enumerate_disks(timeout)),
        }
    }
}

/// Owns the probe worker pool and the per-probe timeout. Built once and
/// passed explicitly to whatever needs to dispatch probes.
pub struct Collector {
    pool: rayon::ThreadPool,
    probe_timeout: Duration,
}

impl Collector {
    pub fn new(probe_timeout: Duration) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(PROBE_WORKERS)
            .thread_name(|i| format!("probe-{}", i))
            .build()?;
        Ok(Self {
            pool,
            probe_timeout,
        })
    }

    /// Assemble the one inventory snapshot for this run.
    ///
    /// The four facet probes run as one concurrent wave; any facet failure
    /// aborts the assembly (a snapshot with unknown CPU or memory facts is
    /// not useful inventory). Per-disk serial lookups run as a second wave
    /// and degrade to absent serials on failure.
    pub fn collect_snapshot(&self, host: &str) -> Result<InventorySnapshot, AssemblyError> {
        self.collect_snapshot_with(host, &FacetProbes::host_probes(self.probe_timeout))
    }

    fn collect_snapshot_with(
        &self,
        host: &str,
        probes: &FacetProbes,
    ) -> Result<InventorySnapshot, AssemblyError> {
        let ((model, cpus), (memory, disks)) = self.pool.install(|| {
            rayon::join(
                || rayon::join(|| (probes.model)(), || (probes.cpu)()),
                || rayon::join(|| (probes.memory)(), || (probes.disks)()),
            )
        });

        // Failures are checked in fixed facet order so the surfaced error
        // is deterministic.
        let model = model.map_err(|err| AssemblyError::new("model", err))?;
        let cpus = cpus.map_err(|err| AssemblyError::new("cpu", err))?;
        let memory = memory.map_err(|err| AssemblyError::new("memory", err))?;
        let mut disks = disks.map_err(|err| AssemblyError::new("disk", err))?;

        let serials = self.lookup_serials(&disks);
        reconcile_serials(&mut disks, &serials);

        debug!(
            cpus = cpus.len(),
            disks = disks.len(),
            "inventory facets collected"
        );

        Ok(InventorySnapshot {
            host: host.to_string(),
            collected_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            model,
            cpus,
            memory,
            disks,
        })
    }

    /// Enumerate disks and fill in their serial numbers. Used directly by
    /// the per-facet disk command.
    pub fn collect_disks(&self) -> Result<Vec<DiskRecord>, ProbeError> {
        let mut disks = enumerate_disks(self.probe_timeout)?;
        let serials = self.lookup_serials(&disks);
        reconcile_serials(&mut disks, &serials);
        Ok(disks)
    }

    fn lookup_serials(&self, disks: &[DiskRecord]) -> Vec<(String, Option<String>)> {
        let timeout = self.probe_timeout;
        self.pool.install(|| {
            disks
                .par_iter()
                .map(|disk| {
                    let serial = match probe_disk_serial(&disk.name, timeout) {
                        Ok(serial) => Some(serial),
                        Err(err) => {
                            warn!(disk = %disk.name, error = %err, "disk serial lookup failed");
                            None
                        }
                    };
                    (disk.name.clone(), serial)
                })
                .collect()
        })
    }

    /// One temperature pass over a fixed disk list. Each disk is probed on
    /// the pool; transient execution failures are retried up to `retries`
    /// extra attempts, and a disk whose probe still fails is reported with
    /// an absent temperature rather than aborting the cycle.
    pub fn sample_temperatures(&self, disks: &[DiskRecord], retries: u32) -> Vec<DiskTemperature> {
        let timeout = self.probe_timeout;
        self.sample_temperatures_with(disks, retries, |disk| {
            probe_disk_temperature(&disk.name, disk.class, timeout)
        })
    }

    fn sample_temperatures_with<F>(
        &self,
        disks: &[DiskRecord],
        retries: u32,
        probe: F,
    ) -> Vec<DiskTemperature>
    where
        F: Fn(&DiskRecord) -> Result<Option<String>, ProbeError> + Sync,
    {
        self.pool.install(|| {
            disks
                .par_iter()
                .map(|disk| {
                    let celsius = probe_with_retry(retries, || probe(disk)).unwrap_or_else(|err| {
                        warn!(disk = %disk.name, error = %err, "temperature probe failed");
                        None
                    });
                    DiskTemperature {
                        disk: disk.name.clone(),
                        celsius,
                    }
                })
                .collect()
        })
    }
}

/// Retry transient execution failures a bounded number of times. Parse
/// misses mean the command ran and the data is genuinely not there, so they
/// are not retried.
fn probe_with_retry<F>(retries: u32, mut probe: F) -> Result<Option<String>, ProbeError>
where
    F: FnMut() -> Result<Option<String>, ProbeError>,
{
    let mut attempt = 0;
    loop {
        match probe() {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_parse() && attempt < retries => {
                attempt += 1;
                debug!(attempt, error = %err, "retrying probe");
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::types::DiskClass;

    fn exec_failure() -> ProbeError {
        ProbeError::Exit {
            command: "smartctl".to_string(),
            code: Some(2),
        }
    }

    fn test_collector() -> Collector {
        Collector::new(Duration::from_secs(5)).unwrap()
    }

    fn disk(name: &str, class: DiskClass) -> DiskRecord {
        DiskRecord {
            name: name.to_string(),
            size: "1T".to_string(),
            class,
            controller_path: None,
            serial: None,
        }
    }

    fn working_probes() -> FacetProbes {
        FacetProbes {
            model: Box::new(|| {
                Ok(ModelInfo {
                    model: "Test Box 9000".to_string(),
                    serial: "SN-1".to_string(),
                })
            }),
            cpu: Box::new(|| {
                Ok(vec![CpuSocket {
                    cpu_num: 0,
                    model: "X".to_string(),
                    cores_per_socket: 8,
                    threads_per_core: 2,
                }])
            }),
            memory: Box::new(|| {
                Ok(MemoryInfo {
                    total_online_memory: "64G".to_string(),
                })
            }),
            disks: Box::new(|| Ok(Vec::new())),
        }
    }

    #[test]
    fn test_assembles_snapshot_when_all_facets_succeed() {
        let collector = test_collector();
        let snapshot = collector
            .collect_snapshot_with("node-1", &working_probes())
            .unwrap();
        assert_eq!(snapshot.host, "node-1");
        assert_eq!(snapshot.cpus.len(), 1);
        assert_eq!(snapshot.memory.total_online_memory, "64G");
    }

    #[test]
    fn test_memory_failure_fails_assembly_as_a_whole() {
        let collector = test_collector();
        let mut probes = working_probes();
        probes.memory = Box::new(|| Err(exec_failure()));
        probes.disks = Box::new(|| Ok(vec![disk("sda", DiskClass::Hdd)]));

        let err = collector
            .collect_snapshot_with("node-1", &probes)
            .unwrap_err();
        assert_eq!(err.facet, "memory");
    }

    #[test]
    fn test_facet_errors_surface_in_fixed_order() {
        let collector = test_collector();
        let mut probes = working_probes();
        probes.memory = Box::new(|| Err(exec_failure()));
        probes.disks = Box::new(|| Err(exec_failure()));

        let err = collector
            .collect_snapshot_with("node-1", &probes)
            .unwrap_err();
        assert_eq!(err.facet, "memory");
    }

    #[test]
    fn test_cycle_keeps_all_disks_when_one_probe_fails() {
        let collector = test_collector();
        let disks = vec![
            disk("sda", DiskClass::Hdd),
            disk("sdb", DiskClass::Ssd),
            disk("nvme0n1", DiskClass::Nvme),
        ];

        let samples = collector.sample_temperatures_with(&disks, 1, |disk| {
            if disk.name == "sdb" {
                Err(exec_failure())
            } else {
                Ok(Some("34".to_string()))
            }
        });

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].celsius.as_deref(), Some("34"));
        assert_eq!(samples[1].disk, "sdb");
        assert_eq!(samples[1].celsius, None);
        assert_eq!(samples[2].celsius.as_deref(), Some("34"));
    }

    #[test]
    fn test_retry_recovers_from_transient_failure() {
        let mut calls = 0;
        let result = probe_with_retry(2, || {
            calls += 1;
            if calls == 1 {
                Err(exec_failure())
            } else {
                Ok(Some("34".to_string()))
            }
        });
        assert_eq!(result.unwrap(), Some("34".to_string()));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_retry_gives_up_after_budget() {
        let mut calls = 0;
        let result = probe_with_retry(1, || {
            calls += 1;
            Err(exec_failure())
        });
        assert!(result.is_err());
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_parse_miss_is_not_retried() {
        let mut calls = 0;
        let result = probe_with_retry(3, || {
            calls += 1;
            Err(ProbeError::MissingFact {
                command: "smartctl",
                fact: "serial number",
            })
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_absent_sensor_is_not_an_error() {
        let result = probe_with_retry(3, || Ok(None));
        assert_eq!(result.unwrap(), None);
    }
}
