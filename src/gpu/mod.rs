//! GPU discovery: PCI display controllers first, the device tree SOC GPU
//! when the PCI bus has none.

pub mod naming;
pub mod nvidia;
pub mod soc;

use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::config::ProbePaths;
use crate::devicetree::{DeviceTreeSource, FsDeviceTree};
use crate::pci::{DISPLAY_CLASS_MAX, DISPLAY_CLASS_MIN, PciDevice, PciSource, SysfsPci};

pub use nvidia::NvidiaInfo;

// ===============================================================================================
// Data Structures
// ===============================================================================================

/// Device tree details of a SOC GPU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtInfo {
    /// Raw compatible string list.
    pub compat: String,
    pub vendor: Option<&'static str>,
    pub device: Option<&'static str>,
}

/// Where a device record came from. PCI and device tree payloads never coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceOrigin {
    Pci(PciDevice),
    DeviceTree(DtInfo),
    Synthetic,
}

/// Discovery source of a record, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceSource {
    Pci,
    DeviceTree,
    Synthetic,
}

impl From<&DeviceOrigin> for DeviceSource {
    fn from(origin: &DeviceOrigin) -> Self {
        match origin {
            DeviceOrigin::Pci(_) => Self::Pci,
            DeviceOrigin::DeviceTree(_) => Self::DeviceTree,
            DeviceOrigin::Synthetic => Self::Synthetic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuDevice {
    /// Unique within one discovery pass, e.g. `drm-card0` or `pci-dc0`.
    pub id: String,
    /// `PCI/0000:01:00.0` or `SOC`.
    pub location: String,
    pub nice_name: String,
    pub vendor_str: Option<String>,
    pub device_str: Option<String>,
    /// DRM card name such as `card0`.
    pub drm_dev: Option<String>,
    pub sysfs_drm_path: Option<PathBuf>,
    pub nv_info: Option<NvidiaInfo>,
    pub origin: DeviceOrigin,
}

impl GpuDevice {
    pub fn source(&self) -> DeviceSource {
        DeviceSource::from(&self.origin)
    }

    pub fn pci(&self) -> Option<&PciDevice> {
        match &self.origin {
            DeviceOrigin::Pci(pci) => Some(pci),
            _ => None,
        }
    }

    pub fn device_tree(&self) -> Option<&DtInfo> {
        match &self.origin {
            DeviceOrigin::DeviceTree(dt) => Some(dt),
            _ => None,
        }
    }
}

impl fmt::Display for GpuDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.id, self.nice_name, self.location)
    }
}

/// Devices from one discovery pass, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpuList {
    devices: Vec<GpuDevice>,
}

impl GpuList {
    pub fn count(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GpuDevice> {
        self.devices.iter()
    }

    pub fn as_slice(&self) -> &[GpuDevice] {
        &self.devices
    }

    pub fn get(&self, id: &str) -> Option<&GpuDevice> {
        self.devices.iter().find(|gpu| gpu.id == id)
    }
}

impl FromIterator<GpuDevice> for GpuList {
    fn from_iter<I: IntoIterator<Item = GpuDevice>>(iter: I) -> Self {
        Self {
            devices: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for GpuList {
    type Item = GpuDevice;
    type IntoIter = std::vec::IntoIter<GpuDevice>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.into_iter()
    }
}

impl<'a> IntoIterator for &'a GpuList {
    type Item = &'a GpuDevice;
    type IntoIter = std::slice::Iter<'a, GpuDevice>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter()
    }
}

// ===============================================================================================
// Discovery
// ===============================================================================================

/// `pci-dc<N>` ids handed out when a device has no DRM card; lives for one pass.
#[derive(Debug, Default)]
struct FallbackIds {
    next: u32,
}

impl FallbackIds {
    fn next_id(&mut self) -> String {
        let id = format!("pci-dc{}", self.next);
        self.next += 1;
        id
    }
}

pub struct GpuDiscovery<P, D> {
    paths: ProbePaths,
    pci: P,
    dt: D,
}

impl GpuDiscovery<SysfsPci, FsDeviceTree> {
    /// Sysfs PCI scan and the kernel's device tree export, honouring
    /// `GPU_INVENTORY_SYSROOT`.
    pub fn system() -> Self {
        let paths = ProbePaths::from_env();
        let pci = SysfsPci::new(&paths);
        let dt = FsDeviceTree::new(&paths);
        Self::new(paths, pci, dt)
    }
}

impl<P: PciSource, D: DeviceTreeSource> GpuDiscovery<P, D> {
    pub fn new(paths: ProbePaths, pci: P, dt: D) -> Self {
        Self { paths, pci, dt }
    }

    pub fn paths(&self) -> &ProbePaths {
        &self.paths
    }

    pub fn discover(&self) -> GpuList {
        let pci_devices = self
            .pci
            .display_devices(DISPLAY_CLASS_MIN, DISPLAY_CLASS_MAX)
            .unwrap_or_else(|e| {
                tracing::debug!(error = %e, "PCI scan unavailable");
                Vec::new()
            });

        if !pci_devices.is_empty() {
            let mut fallback = FallbackIds::default();
            let list: GpuList = pci_devices
                .into_iter()
                .map(|pci| self.pci_gpu(pci, &mut fallback))
                .collect();
            tracing::debug!(count = list.count(), "found PCI display devices");
            return list;
        }

        if let Some(gpu) = soc::probe_soc_gpu(&self.dt, &self.paths) {
            return std::iter::once(gpu).collect();
        }

        tracing::debug!("no GPU found");
        GpuList::default()
    }

    fn pci_gpu(&self, pci: PciDevice, fallback: &mut FallbackIds) -> GpuDevice {
        let address = pci.address();

        let drm_dev = self.resolve_drm_card(&address);
        let id = match &drm_dev {
            Some(card) => format!("drm-{card}"),
            None => {
                let id = fallback.next_id();
                tracing::trace!(address = %address, id = %id, "no DRM card, using fallback id");
                id
            }
        };

        let sysfs_candidate = self.paths.pci_sysfs_drm_path(&address);
        let sysfs_drm_path = sysfs_candidate.exists().then_some(sysfs_candidate);

        let mut gpu = GpuDevice {
            id,
            location: format!("PCI/{address}"),
            nice_name: String::new(),
            vendor_str: pci.vendor_id_str.clone(),
            device_str: pci.device_id_str.clone(),
            drm_dev,
            sysfs_drm_path,
            nv_info: None,
            origin: DeviceOrigin::Pci(pci),
        };

        nvidia::try_enrich_nvidia(&mut gpu, &self.paths);
        naming::synthesize_name(&mut gpu);

        gpu
    }

    /// Card name from the `/dev/dri/by-path/pci-<addr>-card` link target.
    fn resolve_drm_card(&self, address: &str) -> Option<String> {
        let target = fs::read_link(self.paths.drm_by_path_link(address)).ok()?;
        let target = target.to_string_lossy();
        let start = target.find("card")?;
        Some(target[start..].to_string())
    }
}

/// Discovers GPUs on the running system.
pub fn discover() -> GpuList {
    GpuDiscovery::system().discover()
}
