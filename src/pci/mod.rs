//! PCI bus enumeration through sysfs.

#![allow(clippy::cast_possible_truncation)]

pub mod ids;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ProbePaths;
use crate::error::{InventoryError, InventoryResult};
use crate::utils::{parse_pci_address, pci_address_str, read_sysfs_hex};

pub use ids::PciIds;

/// Display controller class range (class/subclass, inclusive).
pub const DISPLAY_CLASS_MIN: u32 = 0x300;
pub const DISPLAY_CLASS_MAX: u32 = 0x3ff;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PciDevice {
    pub domain: u32,
    pub bus: u32,
    pub device: u32,
    pub function: u32,

    // Identifiers
    pub vendor_id: u16,
    pub device_id: u16,
    pub subsystem_vendor_id: u16,
    pub subsystem_device_id: u16,
    pub revision: u8,
    /// 24-bit class code as exposed by sysfs (class, subclass, prog-if).
    pub class: u32,

    // Names from pci.ids
    pub vendor_id_str: Option<String>,
    pub device_id_str: Option<String>,
}

impl PciDevice {
    pub fn address(&self) -> String {
        pci_address_str(self.domain, self.bus, self.device, self.function)
    }

    /// Class and subclass without the programming interface byte.
    #[must_use]
    pub const fn class_code(&self) -> u32 {
        self.class >> 8
    }
}

/// Source of PCI devices filtered by class code.
pub trait PciSource {
    fn display_devices(&self, class_min: u32, class_max: u32) -> InventoryResult<Vec<PciDevice>>;
}

/// Reads devices from `/sys/bus/pci/devices`, naming them from `pci.ids`.
#[derive(Debug, Clone)]
pub struct SysfsPci {
    root: PathBuf,
    ids: PciIds,
}

impl SysfsPci {
    pub fn new(paths: &ProbePaths) -> Self {
        let ids = PciIds::load(&paths.pci_ids_paths).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "no pci.ids database, devices stay unnamed");
            PciIds::default()
        });
        Self::with_ids(&paths.pci_sysfs_root, ids)
    }

    pub fn with_ids(root: impl Into<PathBuf>, ids: PciIds) -> Self {
        Self {
            root: root.into(),
            ids,
        }
    }

    fn read_device(&self, path: &Path, address: &str) -> InventoryResult<PciDevice> {
        let (domain, bus, device, function) = parse_pci_address(address)?;

        let vendor_id = read_sysfs_hex(path, "vendor")? as u16;
        let device_id = read_sysfs_hex(path, "device")? as u16;
        let class = read_sysfs_hex(path, "class")?;
        let subsystem_vendor_id = read_sysfs_hex(path, "subsystem_vendor").unwrap_or(0) as u16;
        let subsystem_device_id = read_sysfs_hex(path, "subsystem_device").unwrap_or(0) as u16;
        let revision = read_sysfs_hex(path, "revision").unwrap_or(0) as u8;

        Ok(PciDevice {
            domain,
            bus,
            device,
            function,
            vendor_id,
            device_id,
            subsystem_vendor_id,
            subsystem_device_id,
            revision,
            class,
            vendor_id_str: self.ids.vendor_name(vendor_id).map(str::to_string),
            device_id_str: self.ids.device_name(vendor_id, device_id).map(str::to_string),
        })
    }
}

impl PciSource for SysfsPci {
    fn display_devices(&self, class_min: u32, class_max: u32) -> InventoryResult<Vec<PciDevice>> {
        if !self.root.exists() {
            return Err(InventoryError::SourceUnavailable(self.root.clone()));
        }

        let mut paths: Vec<_> = fs::read_dir(&self.root)?
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .collect();
        paths.sort();

        let mut devices = Vec::new();
        for path in paths {
            let Some(address) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            match self.read_device(&path, address) {
                Ok(dev) if (class_min..=class_max).contains(&dev.class_code()) => {
                    tracing::trace!(address, class = dev.class, "display-class device");
                    devices.push(dev);
                }
                Ok(_) => {}
                Err(e) => tracing::debug!(address, error = %e, "skipping unreadable PCI entry"),
            }
        }

        Ok(devices)
    }
}
