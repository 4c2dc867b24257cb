//! Text parsers for the inspection utilities. Pure functions: captured
//! output in, typed records out. All prefix/column knowledge about a given
//! tool's format lives here, so format drift only touches this module.

use crate::error::ProbeError;
use crate::inventory::types::{CpuSocket, DiskClass, DiskRecord};

/// Value after the first ':' on a line, trimmed.
fn value_after_colon(line: &str) -> Option<String> {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_count(fact: &'static str, value: &str) -> Result<u32, ProbeError> {
    value.parse::<u32>().map_err(|_| ProbeError::BadValue {
        command: "lscpu",
        fact,
        value: value.to_string(),
    })
}

/// Parse `lscpu` output into one record per socket.
///
/// Matches the fixed label prefixes line by line. The tool may repeat a
/// label in per-socket detail blocks; the last occurrence wins.
pub fn parse_cpu_topology(text: &str) -> Result<Vec<CpuSocket>, ProbeError> {
    let mut threads = None;
    let mut cores = None;
    let mut sockets = None;
    let mut model = None;

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with("Thread") {
            threads = value_after_colon(line);
        } else if line.starts_with("Core") {
            cores = value_after_colon(line);
        } else if line.starts_with("Socket") {
            sockets = value_after_colon(line);
        } else if line.starts_with("Model name") {
            model = value_after_colon(line);
        }
    }

    let missing = |fact: &'static str| ProbeError::MissingFact {
        command: "lscpu",
        fact,
    };

    let sockets = parse_count("socket count", &sockets.ok_or_else(|| missing("socket count"))?)?;
    let cores = parse_count(
        "cores per socket",
        &cores.ok_or_else(|| missing("cores per socket"))?,
    )?;
    let threads = parse_count(
        "threads per core",
        &threads.ok_or_else(|| missing("threads per core"))?,
    )?;
    let model = model.ok_or_else(|| missing("model name"))?;

    if sockets == 0 {
        return Err(ProbeError::BadValue {
            command: "lscpu",
            fact: "socket count",
            value: "0".to_string(),
        });
    }

    Ok((0..sockets)
        .map(|cpu_num| CpuSocket {
            cpu_num,
            model: model.clone(),
            cores_per_socket: cores,
            threads_per_core: threads,
        })
        .collect())
}

/// Extract the "Total online" summary value from `lsmem` output.
pub fn parse_total_memory(text: &str) -> Result<String, ProbeError> {
    for line in text.lines() {
        let line = line.trim();
        if line.starts_with("Total online") {
            if let Some(value) = value_after_colon(line) {
                return Ok(value);
            }
        }
    }

    Err(ProbeError::MissingFact {
        command: "lsmem",
        fact: "total online memory",
    })
}

/// Extract the serial number from `smartctl -i` output. A device that does
/// not report one is a parse error here; the caller decides whether that is
/// fatal.
pub fn parse_disk_serial(text: &str) -> Result<String, ProbeError> {
    for line in text.lines() {
        let line = line.trim();
        if line.starts_with("Serial") {
            if let Some(value) = value_after_colon(line) {
                return Ok(value);
            }
        }
    }

    Err(ProbeError::MissingFact {
        command: "smartctl",
        fact: "serial number",
    })
}

/// Parse `lsblk --noheadings --list --nodeps --output KNAME,HCTL,ROTA,SIZE`
/// output into one record per device.
///
/// NVMe devices have no HCTL address, so their rows carry three fields
/// (KNAME ROTA SIZE) and are always classified `nvme`. Other devices carry
/// four fields (KNAME HCTL ROTA SIZE); a rotational flag of "1" means `hdd`,
/// anything else `ssd`.
pub fn parse_disk_inventory(text: &str) -> Result<Vec<DiskRecord>, ProbeError> {
    let mut disks = Vec::new();

    for line in text.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        let short_row = || ProbeError::BadValue {
            command: "lsblk",
            fact: "device row",
            value: line.to_string(),
        };

        let name = fields[0];
        let record = if name.starts_with("nvme") {
            DiskRecord {
                name: name.to_string(),
                size: fields.get(2).ok_or_else(short_row)?.to_string(),
                class: DiskClass::Nvme,
                controller_path: None,
                serial: None,
            }
        } else {
            let size = fields.get(3).ok_or_else(short_row)?;
            let class = if fields[2] == "1" {
                DiskClass::Hdd
            } else {
                DiskClass::Ssd
            };
            DiskRecord {
                name: name.to_string(),
                size: size.to_string(),
                class,
                controller_path: Some(fields[1].to_string()),
                serial: None,
            }
        };

        disks.push(record);
    }

    Ok(disks)
}

/// Extract a temperature reading from `smartctl -A` output. The device
/// class decides which branch applies: NVMe reports a labeled
/// "Temperature:" line, rotational and solid-state devices report the
/// Temperature_Celsius SMART attribute whose reading sits in the RAW_VALUE
/// column. Devices without a matching line yield `None` — not every device
/// exposes this sensor.
pub fn parse_disk_temperature(class: DiskClass, text: &str) -> Option<String> {
    match class {
        DiskClass::Nvme => text
            .lines()
            .map(str::trim)
            .find(|line| line.starts_with("Temperature:"))
            .and_then(|line| line.split_whitespace().nth(1))
            .map(str::to_string),
        DiskClass::Hdd | DiskClass::Ssd => text
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>())
            .find(|fields| fields.get(1) == Some(&"Temperature_Celsius"))
            .and_then(|fields| fields.get(9).map(|value| value.to_string())),
    }
}
