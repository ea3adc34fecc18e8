//! Best-effort GPU inventory for Linux.
//!
//! Display-class PCI devices are read from sysfs and enriched with their DRM
//! card, sysfs DRM directory and, for the proprietary NVIDIA driver, the
//! procfs information file. Systems without PCI GPUs fall back to the device
//! tree SOC GPU. Missing sources are never errors: a headless machine simply
//! yields an empty [`GpuList`].
//!
//! ```no_run
//! for gpu in &gpu_inventory::discover() {
//!     println!("{gpu}");
//! }
//! ```

pub mod config;
pub mod devicetree;
pub mod error;
pub mod gpu;
pub mod pci;
pub mod utils;
pub mod vendor;

pub use config::ProbePaths;
pub use error::{InventoryError, InventoryResult};
pub use gpu::{
    DeviceOrigin, DeviceSource, DtInfo, GpuDevice, GpuDiscovery, GpuList, NvidiaInfo,
    discover,
};
