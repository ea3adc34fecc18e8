//! Details from the proprietary driver's `/proc/driver/nvidia/gpus/<addr>/information`.

use std::fs;

use super::{DeviceOrigin, GpuDevice};
use crate::config::ProbePaths;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NvidiaInfo {
    pub model: Option<String>,
    pub uuid: Option<String>,
    pub bios_version: Option<String>,
}

type FieldSetter = fn(&mut NvidiaInfo, String);

fn set_model(nv: &mut NvidiaInfo, value: String) {
    nv.model = Some(value);
}

fn set_uuid(nv: &mut NvidiaInfo, value: String) {
    nv.uuid = Some(value);
}

fn set_bios_version(nv: &mut NvidiaInfo, value: String) {
    nv.bios_version = Some(value);
}

// Tried in order, first prefix match wins for a line.
// TODO: pick up "IRQ" and "Bus Type" once the record has fields for them.
const INFORMATION_FIELDS: &[(&str, FieldSetter)] = &[
    ("Model", set_model),
    ("GPU UUID", set_uuid),
    ("Video BIOS", set_bios_version),
];

/// Attaches driver details when the information file exists for the device's
/// PCI address. Returns `false`, leaving the device untouched, otherwise.
pub fn try_enrich_nvidia(gpu: &mut GpuDevice, paths: &ProbePaths) -> bool {
    let DeviceOrigin::Pci(pci) = &gpu.origin else {
        return false;
    };

    let path = paths.nvidia_information_path(&pci.address());
    let raw = match fs::read(&path) {
        Ok(raw) if !raw.is_empty() => raw,
        _ => return false,
    };

    tracing::debug!(path = %path.display(), "reading NVIDIA driver information");
    gpu.nv_info = Some(parse_information(&String::from_utf8_lossy(&raw)));
    true
}

pub fn parse_information(content: &str) -> NvidiaInfo {
    let mut info = NvidiaInfo::default();

    for line in content.lines() {
        let line = line.trim();
        for (prefix, set) in INFORMATION_FIELDS {
            if let Some(value) = line_value(line, prefix) {
                set(&mut info, value.to_string());
                break;
            }
        }
    }

    info
}

/// Value after `prefix` and its one-character separator.
fn line_value<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(prefix)?;
    let mut chars = rest.chars();
    chars.next();
    Some(chars.as_str().trim())
}
