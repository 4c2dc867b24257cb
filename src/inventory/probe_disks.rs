use std::time::Duration;

use crate::error::ProbeError;
use crate::inventory::parse::{parse_disk_inventory, parse_disk_serial, parse_disk_temperature};
use crate::inventory::runner::run_command;
use crate::inventory::types::{DiskClass, DiskRecord};

const LSBLK_ARGS: &[&str] = &[
    "--noheadings",
    "--list",
    "--nodeps",
    "--output",
    "KNAME,HCTL,ROTA,SIZE",
];

/// Enumerate the host's block devices via `lsblk`. Serial numbers are not
/// part of the enumeration; they are probed per disk and merged in with
/// [`reconcile_serials`].
pub fn enumerate_disks(timeout: Duration) -> Result<Vec<DiskRecord>, ProbeError> {
    let text = run_command("lsblk", LSBLK_ARGS, timeout)?;
    parse_disk_inventory(&text)
}

/// Probe one disk's serial number via `smartctl -i`.
pub fn probe_disk_serial(name: &str, timeout: Duration) -> Result<String, ProbeError> {
    let dev_path = format!("/dev/{}", name);
    let text = run_command("smartctl", &["-i", &dev_path], timeout)?;
    parse_disk_serial(&text)
}

/// Probe one disk's temperature via `smartctl -A`. `Ok(None)` means the
/// command ran but the device exposes no temperature sensor.
pub fn probe_disk_temperature(
    name: &str,
    class: DiskClass,
    timeout: Duration,
) -> Result<Option<String>, ProbeError> {
    let dev_path = format!("/dev/{}", name);
    let text = run_command("smartctl", &["-A", &dev_path], timeout)?;
    Ok(parse_disk_temperature(class, &text))
}

/// Merge independently probed serial numbers into the enumerated disk set by
/// exact name match. Disks with no matching pair keep `serial = None`. The
/// merge is idempotent and does not depend on the order of the pairs.
pub fn reconcile_serials(disks: &mut [DiskRecord], serials: &[(String, Option<String>)]) {
    for (name, serial) in serials {
        if let Some(disk) = disks.iter_mut().find(|disk| &disk.name == name) {
            disk.serial = serial.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enumerated_disks() -> Vec<DiskRecord> {
        vec![
            DiskRecord {
                name: "sda".to_string(),
                size: "500G".to_string(),
                class: DiskClass::Hdd,
                controller_path: Some("1:0:0:0".to_string()),
                serial: None,
            },
            DiskRecord {
                name: "nvme0n1".to_string(),
                size: "1T".to_string(),
                class: DiskClass::Nvme,
                controller_path: None,
                serial: None,
            },
        ]
    }

    #[test]
    fn test_reconcile_matches_by_exact_name() {
        let mut disks = enumerated_disks();
        let serials = vec![
            ("sda".to_string(), Some("WD-123".to_string())),
            ("nvme0n1".to_string(), Some("S5H9".to_string())),
        ];
        reconcile_serials(&mut disks, &serials);
        assert_eq!(disks[0].serial.as_deref(), Some("WD-123"));
        assert_eq!(disks[1].serial.as_deref(), Some("S5H9"));
    }

    #[test]
    fn test_reconcile_is_order_independent() {
        let serials = vec![
            ("sda".to_string(), Some("WD-123".to_string())),
            ("nvme0n1".to_string(), Some("S5H9".to_string())),
        ];
        let mut forward = enumerated_disks();
        reconcile_serials(&mut forward, &serials);

        let reversed: Vec<_> = serials.into_iter().rev().collect();
        let mut backward = enumerated_disks();
        reconcile_serials(&mut backward, &reversed);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let serials = vec![("sda".to_string(), Some("WD-123".to_string()))];
        let mut once = enumerated_disks();
        reconcile_serials(&mut once, &serials);

        let mut twice = enumerated_disks();
        reconcile_serials(&mut twice, &serials);
        reconcile_serials(&mut twice, &serials);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_disk_without_serial_pair_stays_absent() {
        let mut disks = enumerated_disks();
        let serials = vec![("sda".to_string(), Some("WD-123".to_string()))];
        reconcile_serials(&mut disks, &serials);
        assert_eq!(disks[1].serial, None);
    }

    #[test]
    fn test_failed_lookup_pair_keeps_serial_absent() {
        let mut disks = enumerated_disks();
        let serials = vec![
            ("sda".to_string(), None),
            ("nvme0n1".to_string(), Some("S5H9".to_string())),
        ];
        reconcile_serials(&mut disks, &serials);
        assert_eq!(disks[0].serial, None);
        assert_eq!(disks[1].serial.as_deref(), Some("S5H9"));
    }
}
