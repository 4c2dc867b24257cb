use std::time::Duration;

use crate::error::ProbeError;
use crate::inventory::parse::parse_total_memory;
use crate::inventory::runner::run_command;
use crate::inventory::types::MemoryInfo;

/// Probe the online memory summary via `lsmem`.
pub fn probe_memory_info(timeout: Duration) -> Result<MemoryInfo, ProbeError> {
    let text = run_command("lsmem", &[], timeout)?;
    Ok(MemoryInfo {
        total_online_memory: parse_total_memory(&text)?,
    })
}
