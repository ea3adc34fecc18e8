use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{InventoryError, InventoryResult};

#[derive(Debug, Clone, Default)]
struct VendorNames {
    name: String,
    devices: HashMap<u16, String>,
}

/// Vendor and device names from a `pci.ids` database.
#[derive(Debug, Clone, Default)]
pub struct PciIds {
    vendors: HashMap<u16, VendorNames>,
}

impl PciIds {
    /// Loads the first database found in `paths`.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> InventoryResult<Self> {
        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                continue;
            }
            let content = fs::read_to_string(path)?;
            let ids = Self::parse(&content);
            tracing::debug!(path = %path.display(), vendors = ids.vendors.len(), "loaded pci.ids");
            return Ok(ids);
        }

        Err(InventoryError::SourceUnavailable(
            paths
                .first()
                .map(|p| p.as_ref().to_path_buf())
                .unwrap_or_default(),
        ))
    }

    pub fn parse(content: &str) -> Self {
        let mut vendors: HashMap<u16, VendorNames> = HashMap::new();
        let mut current: Option<u16> = None;

        for line in content.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Subsystem entries
            if line.starts_with("\t\t") {
                continue;
            }

            if let Some(entry) = line.strip_prefix('\t') {
                let Some(vendor_id) = current else {
                    continue;
                };
                if let Some((id, name)) = split_entry(entry)
                    && let Some(vendor) = vendors.get_mut(&vendor_id)
                {
                    vendor.devices.insert(id, name.to_string());
                }
                continue;
            }

            // Device class section closes the vendor list
            if line.starts_with("C ") {
                break;
            }

            current = None;
            if let Some((id, name)) = split_entry(line) {
                vendors.insert(
                    id,
                    VendorNames {
                        name: name.to_string(),
                        devices: HashMap::new(),
                    },
                );
                current = Some(id);
            }
        }

        Self { vendors }
    }

    pub fn vendor_name(&self, vendor_id: u16) -> Option<&str> {
        self.vendors.get(&vendor_id).map(|v| v.name.as_str())
    }

    pub fn device_name(&self, vendor_id: u16, device_id: u16) -> Option<&str> {
        self.vendors
            .get(&vendor_id)
            .and_then(|v| v.devices.get(&device_id))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}

fn split_entry(entry: &str) -> Option<(u16, &str)> {
    let (id, name) = entry.split_once("  ")?;
    let id = u16::from_str_radix(id.trim(), 16).ok()?;
    Some((id, name.trim()))
}
