use super::GpuDevice;

const UNKNOWN_VENDOR: &str = "Unknown";
const UNKNOWN_DEVICE: &str = "Device";

/// Fills `nice_name` from what discovery has already collected.
pub fn synthesize_name(gpu: &mut GpuDevice) {
    let model = gpu.nv_info.as_ref().and_then(|nv| nv.model.as_deref());
    gpu.nice_name = nice_name(gpu.vendor_str.as_deref(), gpu.device_str.as_deref(), model);
}

#[must_use]
pub fn nice_name(vendor: Option<&str>, device: Option<&str>, nvidia_model: Option<&str>) -> String {
    if let Some(model) = nvidia_model {
        return format!("NVIDIA {model}");
    }

    let vendor = vendor.unwrap_or(UNKNOWN_VENDOR);
    let device = device.unwrap_or(UNKNOWN_DEVICE);

    if vendor.contains("NVIDIA") {
        format!("NVIDIA {device}")
    } else if vendor.contains("AMD/ATI") {
        // One chip id covers many products; keep the chip name before the bracket.
        let chip = device.split('[').next().unwrap_or(device).trim();
        format!("AMD/ATI {chip}")
    } else {
        format!("{vendor} {device}")
    }
}
