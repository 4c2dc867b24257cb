use std::fs;
use std::io;

use crate::error::ProbeError;
use crate::inventory::types::ModelInfo;

const PRODUCT_NAME_PATH: &str = "/sys/class/dmi/id/product_name";
const PRODUCT_SERIAL_PATH: &str = "/sys/class/dmi/id/product_serial";

/// Read the system model and serial from the DMI identity files. Both files
/// are single-line values written by firmware; either one missing is fatal
/// for the model facet.
pub fn probe_model_info() -> Result<ModelInfo, ProbeError> {
    Ok(ModelInfo {
        model: read_identity_file(PRODUCT_NAME_PATH)?,
        serial: read_identity_file(PRODUCT_SERIAL_PATH)?,
    })
}

fn read_identity_file(path: &str) -> Result<String, ProbeError> {
    let text = fs::read_to_string(path).map_err(|source| ProbeError::Read {
        path: path.to_string(),
        source,
    })?;

    let value = text.lines().next().unwrap_or("").trim();
    if value.is_empty() {
        return Err(ProbeError::Read {
            path: path.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidData, "file is empty"),
        });
    }

    Ok(value.to_string())
}

/// Kernel hostname, resolved once at startup.
pub fn node_name() -> String {
    fs::read_to_string("/proc/sys/kernel/hostname")
        .unwrap_or_else(|_| "unknown".to_string())
        .trim()
        .to_string()
}
