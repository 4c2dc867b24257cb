use serde::Serialize;

/// System model identity, read once from the DMI identity files.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model: String,
    pub serial: String,
}

/// One CPU socket. All sockets on a host share the same model and core
/// counts (single-topology assumption), so these records differ only in
/// `cpu_num`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpuSocket {
    pub cpu_num: u32,
    pub model: String,
    pub cores_per_socket: u32,
    pub threads_per_core: u32,
}

/// Memory summary. The value keeps the tool's human-readable unit suffix
/// (e.g. "64G") rather than being normalized to bytes.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryInfo {
    pub total_online_memory: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskClass {
    Nvme,
    Hdd,
    Ssd,
}

/// One block device, keyed by kernel device name within a snapshot.
/// `controller_path` is the SCSI HCTL address and is absent for NVMe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskRecord {
    pub name: String,
    pub size: String,
    pub class: DiskClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_path: Option<String>,
    pub serial: Option<String>,
}

/// One disk's temperature reading from a sampling cycle. `celsius` is absent
/// when the device exposes no matching sensor or its probe failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskTemperature {
    pub disk: String,
    pub celsius: Option<String>,
}

/// The complete inventory record for one host at one point in time. Built
/// once per run and never mutated afterwards; temperature sampling produces
/// new `DiskTemperature` values instead.
#[derive(Debug, Serialize)]
pub struct InventorySnapshot {
    pub host: String,
    pub collected_at: String,
    pub model: ModelInfo,
    pub cpus: Vec<CpuSocket>,
    pub memory: MemoryInfo,
    pub disks: Vec<DiskRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_class_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DiskClass::Nvme).unwrap(), "\"nvme\"");
        assert_eq!(serde_json::to_string(&DiskClass::Hdd).unwrap(), "\"hdd\"");
        assert_eq!(serde_json::to_string(&DiskClass::Ssd).unwrap(), "\"ssd\"");
    }

    #[test]
    fn test_nvme_record_omits_controller_path() {
        let disk = DiskRecord {
            name: "nvme0n1".to_string(),
            size: "1T".to_string(),
            class: DiskClass::Nvme,
            controller_path: None,
            serial: None,
        };
        let json = serde_json::to_value(&disk).unwrap();
        assert!(json.get("controller_path").is_none());
    }
}
