use super::{DeviceOrigin, DtInfo, GpuDevice, naming};
use crate::config::ProbePaths;
use crate::devicetree::DeviceTreeSource;

pub const SOC_GPU_COMPATIBLE: &str = "/soc/gpu/compatible";
pub const SOC_GPU_ID: &str = "dt-soc-gpu";
pub const SOC_GPU_LOCATION: &str = "SOC";

struct SocGpuLookup {
    compatible: &'static str,
    vendor: &'static str,
    soc: &'static str,
}

// A compatible list names the chip before its family ("brcm,bcm2837",
// "brcm,bcm2836"), so specific chips go first or the family would match.
const SOC_GPU_LOOKUP_TABLE: &[SocGpuLookup] = &[
    SocGpuLookup {
        compatible: "brcm,bcm2837-vc4",
        vendor: "Broadcom",
        soc: "VideoCore IV",
    },
    SocGpuLookup {
        compatible: "brcm,bcm2836-vc4",
        vendor: "Broadcom",
        soc: "VideoCore IV",
    },
    SocGpuLookup {
        compatible: "brcm,bcm2835-vc4",
        vendor: "Broadcom",
        soc: "VideoCore IV",
    },
];

fn find_soc_gpu(compatible: &str) -> Option<&'static SocGpuLookup> {
    SOC_GPU_LOOKUP_TABLE
        .iter()
        .find(|entry| compatible.contains(entry.compatible))
}

/// Builds the SOC GPU record from the device tree, if the platform has one.
pub fn probe_soc_gpu<D: DeviceTreeSource + ?Sized>(
    dt: &D,
    paths: &ProbePaths,
) -> Option<GpuDevice> {
    let compat = dt.get_string(SOC_GPU_COMPATIBLE)?;
    let entry = find_soc_gpu(&compat);

    match entry {
        Some(e) => {
            tracing::debug!(compat = %compat, vendor = e.vendor, soc = e.soc, "matched SOC GPU");
        }
        None => tracing::debug!(compat = %compat, "unrecognised SOC GPU"),
    }

    let sysfs_drm_path = paths
        .soc_gpu_drm_path
        .exists()
        .then(|| paths.soc_gpu_drm_path.clone());

    let mut gpu = GpuDevice {
        id: SOC_GPU_ID.to_string(),
        location: SOC_GPU_LOCATION.to_string(),
        nice_name: String::new(),
        vendor_str: entry.map(|e| e.vendor.to_string()),
        device_str: entry.map(|e| e.soc.to_string()),
        drm_dev: None,
        sysfs_drm_path,
        nv_info: None,
        origin: DeviceOrigin::DeviceTree(DtInfo {
            compat,
            vendor: entry.map(|e| e.vendor),
            device: entry.map(|e| e.soc),
        }),
    };
    naming::synthesize_name(&mut gpu);

    Some(gpu)
}
