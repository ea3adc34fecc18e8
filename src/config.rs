//! Filesystem locations read during discovery.

use std::env;
use std::path::{Path, PathBuf};

pub const SYSROOT_ENV: &str = "GPU_INVENTORY_SYSROOT";

const PCI_SYSFS_ROOT: &str = "/sys/bus/pci/devices";
const DRM_BY_PATH_DIR: &str = "/dev/dri/by-path";
const NVIDIA_PROCFS_DIR: &str = "/proc/driver/nvidia/gpus";
const SOC_GPU_DRM_PATH: &str = "/sys/devices/platform/soc/soc:gpu/drm";
const DEVICE_TREE_ROOTS: &[&str] = &["/proc/device-tree", "/sys/firmware/devicetree/base"];
const PCI_IDS_PATHS: &[&str] = &[
    "/usr/share/hwdata/pci.ids",
    "/usr/share/misc/pci.ids",
    "/usr/share/pci.ids",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePaths {
    pub pci_sysfs_root: PathBuf,
    pub drm_by_path_dir: PathBuf,
    pub nvidia_procfs_dir: PathBuf,
    pub soc_gpu_drm_path: PathBuf,
    pub device_tree_roots: Vec<PathBuf>,
    pub pci_ids_paths: Vec<PathBuf>,
}

impl Default for ProbePaths {
    fn default() -> Self {
        Self {
            pci_sysfs_root: PathBuf::from(PCI_SYSFS_ROOT),
            drm_by_path_dir: PathBuf::from(DRM_BY_PATH_DIR),
            nvidia_procfs_dir: PathBuf::from(NVIDIA_PROCFS_DIR),
            soc_gpu_drm_path: PathBuf::from(SOC_GPU_DRM_PATH),
            device_tree_roots: DEVICE_TREE_ROOTS.iter().map(PathBuf::from).collect(),
            pci_ids_paths: PCI_IDS_PATHS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl ProbePaths {
    /// Re-roots every default location under `root`, e.g. a mounted image.
    pub fn with_sysroot(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let defaults = Self::default();
        Self {
            pci_sysfs_root: reroot(root, &defaults.pci_sysfs_root),
            drm_by_path_dir: reroot(root, &defaults.drm_by_path_dir),
            nvidia_procfs_dir: reroot(root, &defaults.nvidia_procfs_dir),
            soc_gpu_drm_path: reroot(root, &defaults.soc_gpu_drm_path),
            device_tree_roots: defaults
                .device_tree_roots
                .iter()
                .map(|p| reroot(root, p))
                .collect(),
            pci_ids_paths: defaults
                .pci_ids_paths
                .iter()
                .map(|p| reroot(root, p))
                .collect(),
        }
    }

    /// System defaults, re-rooted when `GPU_INVENTORY_SYSROOT` is set.
    pub fn from_env() -> Self {
        match env::var_os(SYSROOT_ENV) {
            Some(root) if !root.is_empty() => {
                tracing::debug!(sysroot = ?root, "using sysroot override");
                Self::with_sysroot(root)
            }
            _ => Self::default(),
        }
    }

    pub fn drm_by_path_link(&self, pci_address: &str) -> PathBuf {
        self.drm_by_path_dir.join(format!("pci-{pci_address}-card"))
    }

    pub fn pci_sysfs_drm_path(&self, pci_address: &str) -> PathBuf {
        self.pci_sysfs_root.join(pci_address).join("drm")
    }

    pub fn nvidia_information_path(&self, pci_address: &str) -> PathBuf {
        self.nvidia_procfs_dir.join(pci_address).join("information")
    }
}

fn reroot(root: &Path, path: &Path) -> PathBuf {
    root.join(path.strip_prefix("/").unwrap_or(path))
}
