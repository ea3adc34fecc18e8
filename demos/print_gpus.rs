use gpu_inventory::{GpuDiscovery, vendor};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!("============================================================");
    println!("                     GPU Inventory                          ");
    println!("============================================================");

    let discovery = GpuDiscovery::system();
    println!("[+] PCI sysfs root: {}", discovery.paths().pci_sysfs_root.display());

    let gpus = discovery.discover();
    if gpus.is_empty() {
        println!("[-] No GPU found");
        return;
    }
    println!("[+] Found {} GPU(s)", gpus.count());

    for gpu in &gpus {
        println!("\n------------------------------------------------------------");
        println!(" {}", gpu.nice_name);
        println!("------------------------------------------------------------");
        println!("    Id:            {}", gpu.id);
        println!("    Location:      {}", gpu.location);

        if let Some(vendor_str) = gpu.vendor_str.as_deref() {
            println!("    Vendor:        {vendor_str}");
            if let Some(url) = vendor::lookup_url(Some(vendor_str)) {
                println!("    Vendor URL:    {url}");
            }
        }
        if let Some(device_str) = gpu.device_str.as_deref() {
            println!("    Device:        {device_str}");
        }
        if let Some(pci) = gpu.pci() {
            println!(
                "    PCI ID:        {:04x}:{:04x} (rev {:02x})",
                pci.vendor_id, pci.device_id, pci.revision
            );
        }
        if let Some(drm) = gpu.drm_dev.as_deref() {
            println!("    DRM Device:    {drm}");
        }
        if let Some(path) = &gpu.sysfs_drm_path {
            println!("    Sysfs DRM:     {}", path.display());
        }
        if let Some(nv) = &gpu.nv_info {
            println!("    NVIDIA Driver:");
            if let Some(uuid) = nv.uuid.as_deref() {
                println!("      UUID:        {uuid}");
            }
            if let Some(bios) = nv.bios_version.as_deref() {
                println!("      Video BIOS:  {bios}");
            }
        }
        if let Some(dt) = gpu.device_tree() {
            println!("    DT Compatible: {}", dt.compat);
        }
    }
}
