use std::cell::Cell;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::Path;
use std::rc::Rc;

use gpu_inventory::devicetree::{DeviceTreeSource, FsDeviceTree};
use gpu_inventory::pci::{PciDevice, PciIds, PciSource, SysfsPci};
use gpu_inventory::{
    DeviceOrigin, DeviceSource, GpuDiscovery, InventoryError, InventoryResult, ProbePaths,
};
use tempfile::TempDir;

struct FakePci {
    devices: Vec<PciDevice>,
    calls: Rc<Cell<usize>>,
}

impl FakePci {
    fn new(devices: Vec<PciDevice>) -> Self {
        Self {
            devices,
            calls: Rc::default(),
        }
    }
}

impl PciSource for FakePci {
    fn display_devices(&self, class_min: u32, class_max: u32) -> InventoryResult<Vec<PciDevice>> {
        assert_eq!((class_min, class_max), (0x300, 0x3ff));
        self.calls.set(self.calls.get() + 1);
        Ok(self.devices.clone())
    }
}

struct BrokenPci;

impl PciSource for BrokenPci {
    fn display_devices(&self, _: u32, _: u32) -> InventoryResult<Vec<PciDevice>> {
        Err(InventoryError::SourceUnavailable("/sys/bus/pci/devices".into()))
    }
}

struct FakeTree {
    compatible: Option<&'static str>,
    calls: Rc<Cell<usize>>,
}

impl FakeTree {
    fn new(compatible: Option<&'static str>) -> Self {
        Self {
            compatible,
            calls: Rc::default(),
        }
    }
}

impl DeviceTreeSource for FakeTree {
    fn get_string(&self, _property: &str) -> Option<String> {
        self.calls.set(self.calls.get() + 1);
        self.compatible.map(str::to_string)
    }
}

fn pci_device(bus: u32, vendor: Option<&str>, device: Option<&str>) -> PciDevice {
    PciDevice {
        bus,
        class: 0x030000,
        vendor_id_str: vendor.map(str::to_string),
        device_id_str: device.map(str::to_string),
        ..Default::default()
    }
}

fn sysroot() -> (TempDir, ProbePaths) {
    let tmp = tempfile::tempdir().unwrap();
    let paths = ProbePaths::with_sysroot(tmp.path());
    (tmp, paths)
}

fn link_drm_card(paths: &ProbePaths, address: &str, card: &str) {
    fs::create_dir_all(&paths.drm_by_path_dir).unwrap();
    symlink(format!("../{card}"), paths.drm_by_path_link(address)).unwrap();
}

fn write_nvidia_information(paths: &ProbePaths, address: &str, content: &str) {
    let path = paths.nvidia_information_path(address);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn fallback_ids_follow_enumeration_order() {
    let (_tmp, paths) = sysroot();
    let pci = FakePci::new(vec![
        pci_device(1, Some("NVIDIA Corporation"), Some("GP104")),
        pci_device(2, Some("Intel Corporation"), Some("UHD Graphics 630")),
        pci_device(3, None, None),
    ]);
    let pci_calls = Rc::clone(&pci.calls);

    let discovery = GpuDiscovery::new(paths, pci, FakeTree::new(None));
    let list = discovery.discover();

    let ids: Vec<_> = list.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, ["pci-dc0", "pci-dc1", "pci-dc2"]);

    // The counter belongs to one pass; a second pass hands out the same ids.
    assert_eq!(discovery.discover(), list);
    assert_eq!(pci_calls.get(), 2);
    let locations: Vec<_> = list.iter().map(|g| g.location.as_str()).collect();
    assert_eq!(
        locations,
        ["PCI/0000:01:00.0", "PCI/0000:02:00.0", "PCI/0000:03:00.0"]
    );
    assert_eq!(list.count(), 3);
    assert!(list.iter().all(|g| g.drm_dev.is_none()));
    assert_eq!(list.as_slice()[2].nice_name, "Unknown Device");
}

#[test]
fn drm_cards_give_ids_and_counter_only_covers_the_rest() {
    let (_tmp, paths) = sysroot();
    link_drm_card(&paths, "0000:02:00.0", "card1");
    let pci = FakePci::new(vec![
        pci_device(1, Some("NVIDIA Corporation"), Some("GP104")),
        pci_device(2, Some("Intel Corporation"), Some("UHD Graphics 630")),
        pci_device(3, Some("Intel Corporation"), Some("Arc A380")),
    ]);

    let list = GpuDiscovery::new(paths, pci, FakeTree::new(None)).discover();

    let ids: Vec<_> = list.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, ["pci-dc0", "drm-card1", "pci-dc1"]);
    assert_eq!(
        list.get("drm-card1").and_then(|g| g.drm_dev.as_deref()),
        Some("card1")
    );
}

#[test]
fn sysfs_drm_directory_is_attached_when_present() {
    let (_tmp, paths) = sysroot();
    let drm = paths.pci_sysfs_drm_path("0000:01:00.0");
    fs::create_dir_all(&drm).unwrap();
    let pci = FakePci::new(vec![
        pci_device(1, Some("NVIDIA Corporation"), Some("GP104")),
        pci_device(2, Some("NVIDIA Corporation"), Some("TU104")),
    ]);

    let list = GpuDiscovery::new(paths, pci, FakeTree::new(None)).discover();

    assert_eq!(list.as_slice()[0].sysfs_drm_path.as_ref(), Some(&drm));
    assert_eq!(list.as_slice()[1].sysfs_drm_path, None);
}

#[test]
fn nvidia_procfs_enriches_and_names() {
    let (_tmp, paths) = sysroot();
    write_nvidia_information(
        &paths,
        "0000:01:00.0",
        "Model: \t\t GeForce GTX 1080\n\
         GPU UUID: \t GPU-1234\n\
         Video BIOS: \t 86.04.17.00.01\n\
         IRQ: 130\n",
    );
    write_nvidia_information(&paths, "0000:02:00.0", "");
    let pci = FakePci::new(vec![
        pci_device(
            1,
            Some("Advanced Micro Devices, Inc. [AMD/ATI]"),
            Some("Odd [Thing]"),
        ),
        pci_device(2, Some("NVIDIA Corporation"), Some("TU104 [GeForce RTX 2080]")),
    ]);

    let list = GpuDiscovery::new(paths, pci, FakeTree::new(None)).discover();
    let first = &list.as_slice()[0];
    let second = &list.as_slice()[1];

    let nv = first.nv_info.as_ref().unwrap();
    assert_eq!(nv.model.as_deref(), Some("GeForce GTX 1080"));
    assert_eq!(nv.uuid.as_deref(), Some("GPU-1234"));
    assert_eq!(nv.bios_version.as_deref(), Some("86.04.17.00.01"));
    assert_eq!(first.nice_name, "NVIDIA GeForce GTX 1080");

    // An empty information file counts as absent.
    assert_eq!(second.nv_info, None);
    assert_eq!(second.nice_name, "NVIDIA TU104 [GeForce RTX 2080]");
}

#[test]
fn pci_devices_skip_device_tree_lookup() {
    let (_tmp, paths) = sysroot();
    let pci = FakePci::new(vec![pci_device(1, Some("NVIDIA Corporation"), Some("GP104"))]);
    let tree = FakeTree::new(Some("brcm,bcm2837-vc4"));
    let tree_calls = Rc::clone(&tree.calls);

    let list = GpuDiscovery::new(paths, pci, tree).discover();

    assert_eq!(list.count(), 1);
    assert!(matches!(list.as_slice()[0].origin, DeviceOrigin::Pci(_)));
    assert_eq!(tree_calls.get(), 0);
}

#[test]
fn device_tree_used_when_pci_is_empty() {
    let (_tmp, paths) = sysroot();
    fs::create_dir_all(&paths.soc_gpu_drm_path).unwrap();
    let soc_drm = paths.soc_gpu_drm_path.clone();
    let pci = FakePci::new(Vec::new());
    let tree = FakeTree::new(Some("brcm,bcm2837-vc4, brcm,bcm2836-vc4"));
    let tree_calls = Rc::clone(&tree.calls);

    let list = GpuDiscovery::new(paths, pci, tree).discover();

    assert_eq!(tree_calls.get(), 1);
    assert_eq!(list.count(), 1);
    let gpu = &list.as_slice()[0];
    assert_eq!(gpu.id, "dt-soc-gpu");
    assert_eq!(gpu.location, "SOC");
    assert_eq!(gpu.nice_name, "Broadcom VideoCore IV");
    assert_eq!(gpu.sysfs_drm_path.as_ref(), Some(&soc_drm));
    assert_eq!(gpu.source(), DeviceSource::DeviceTree);
    let dt = gpu.device_tree().unwrap();
    assert_eq!(dt.vendor, Some("Broadcom"));
    assert_eq!(dt.device, Some("VideoCore IV"));
    assert!(gpu.pci().is_none());
}

#[test]
fn empty_system_yields_empty_list() {
    let (_tmp, paths) = sysroot();
    let discovery = GpuDiscovery::new(paths, FakePci::new(Vec::new()), FakeTree::new(None));
    let list = discovery.discover();
    assert!(list.is_empty());
    // Each pass starts over; nothing is cached between calls.
    assert!(discovery.discover().is_empty());
    assert_eq!(list.count(), 0);
}

#[test]
fn unavailable_pci_scan_falls_back_to_device_tree() {
    let (_tmp, paths) = sysroot();
    let list =
        GpuDiscovery::new(paths, BrokenPci, FakeTree::new(Some("brcm,bcm2835-vc4"))).discover();
    assert_eq!(list.count(), 1);
    assert_eq!(list.as_slice()[0].id, "dt-soc-gpu");
}

fn write_sysfs_device(root: &Path, address: &str, vendor: &str, device: &str, class: &str) {
    let dir = root.join(address);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("vendor"), vendor).unwrap();
    fs::write(dir.join("device"), device).unwrap();
    fs::write(dir.join("class"), class).unwrap();
}

#[test]
fn full_sysroot_discovery() {
    let (tmp, paths) = sysroot();
    write_sysfs_device(&paths.pci_sysfs_root, "0000:00:02.0", "0x8086", "0x3e92", "0x030000");
    write_sysfs_device(&paths.pci_sysfs_root, "0000:00:1f.3", "0x8086", "0xa348", "0x040300");
    write_sysfs_device(&paths.pci_sysfs_root, "0000:01:00.0", "0x1002", "0x73bf", "0x030000");
    fs::create_dir_all(paths.pci_sysfs_drm_path("0000:01:00.0")).unwrap();
    link_drm_card(&paths, "0000:01:00.0", "card0");

    let ids_path = &paths.pci_ids_paths[0];
    fs::create_dir_all(ids_path.parent().unwrap()).unwrap();
    fs::write(
        ids_path,
        "1002  Advanced Micro Devices, Inc. [AMD/ATI]\n\
         \t73bf  Navi 21 [Radeon RX 6800/6800 XT / 6900 XT]\n\
         8086  Intel Corporation\n\
         \t3e92  CoffeeLake-S GT2 [UHD Graphics 630]\n",
    )
    .unwrap();

    let pci = SysfsPci::new(&paths);
    let dt = FsDeviceTree::new(&paths);
    let list = GpuDiscovery::new(paths, pci, dt).discover();

    let names: Vec<_> = list.iter().map(ToString::to_string).collect();
    assert_eq!(
        names,
        [
            "pci-dc0: Intel Corporation CoffeeLake-S GT2 [UHD Graphics 630] (PCI/0000:00:02.0)",
            "drm-card0: AMD/ATI Navi 21 (PCI/0000:01:00.0)",
        ]
    );
    assert!(list.as_slice()[1].sysfs_drm_path.is_some());
    drop(tmp);
}

#[test]
fn full_sysroot_device_tree_discovery() {
    let (_tmp, paths) = sysroot();
    let base = &paths.device_tree_roots[0];
    fs::create_dir_all(base.join("soc/gpu")).unwrap();
    fs::write(base.join("soc/gpu/compatible"), b"brcm,bcm2836-vc4\0").unwrap();

    let pci = SysfsPci::with_ids(&paths.pci_sysfs_root, PciIds::default());
    let dt = FsDeviceTree::new(&paths);
    let list = GpuDiscovery::new(paths, pci, dt).discover();

    assert_eq!(list.count(), 1);
    let gpu = list.into_iter().next().unwrap();
    assert_eq!(gpu.nice_name, "Broadcom VideoCore IV");
    assert_eq!(gpu.device_tree().map(|dt| dt.compat.as_str()), Some("brcm,bcm2836-vc4"));
}
