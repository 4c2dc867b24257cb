use std::time::Duration;

use crate::error::ProbeError;
use crate::inventory::parse::parse_cpu_topology;
use crate::inventory::runner::run_command;
use crate::inventory::types::CpuSocket;

/// Probe CPU topology via `lscpu`, one record per socket.
pub fn probe_cpu_info(timeout: Duration) -> Result<Vec<CpuSocket>, ProbeError> {
    let text = run_command("lscpu", &[], timeout)?;
    parse_cpu_topology(&text)
}
