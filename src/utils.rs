use std::fs;
use std::path::Path;

use crate::error::{InventoryError, InventoryResult};

const PCI_BUS_MASK: u32 = 0xFF;
const PCI_DEVICE_MASK: u32 = 0x1F;
const PCI_FUNCTION_MASK: u32 = 0x07;

/// Canonical `dddd:bb:dd.f` form of a PCI location. Domains wider than
/// 16 bits (VMD) print in full.
#[must_use]
pub fn pci_address_str(domain: u32, bus: u32, device: u32, function: u32) -> String {
    format!(
        "{:04x}:{:02x}:{:02x}.{:01x}",
        domain,
        bus & PCI_BUS_MASK,
        device & PCI_DEVICE_MASK,
        function & PCI_FUNCTION_MASK
    )
}

/// Splits a sysfs directory name such as `0000:01:00.0` into its parts.
pub fn parse_pci_address(address: &str) -> InventoryResult<(u32, u32, u32, u32)> {
    let invalid = || InventoryError::InvalidPciAddress(address.to_string());

    let (domain, rest) = address.split_once(':').ok_or_else(invalid)?;
    let (bus, rest) = rest.split_once(':').ok_or_else(invalid)?;
    let (device, function) = rest.split_once('.').ok_or_else(invalid)?;

    let domain = u32::from_str_radix(domain, 16).map_err(|_| invalid())?;
    let parse = |s: &str, mask: u32| {
        u32::from_str_radix(s, 16)
            .ok()
            .filter(|v| v & !mask == 0)
            .ok_or_else(invalid)
    };

    Ok((
        domain,
        parse(bus, PCI_BUS_MASK)?,
        parse(device, PCI_DEVICE_MASK)?,
        parse(function, PCI_FUNCTION_MASK)?,
    ))
}

/// Reads a `0x`-prefixed hex attribute such as `class` or `vendor`.
pub fn read_sysfs_hex(dir: &Path, attr: &str) -> InventoryResult<u32> {
    let path = dir.join(attr);
    let content = fs::read_to_string(&path)?;
    let value = content.trim();
    let digits = value.strip_prefix("0x").unwrap_or(value);
    u32::from_str_radix(digits, 16).map_err(|_| InventoryError::InvalidValue {
        path,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_address_with_fixed_widths() {
        assert_eq!(pci_address_str(0, 1, 0, 0), "0000:01:00.0");
        assert_eq!(pci_address_str(0x10, 0xab, 0x1f, 7), "0010:ab:1f.7");
    }

    #[test]
    fn wide_domains_are_kept() {
        assert_eq!(pci_address_str(0x10000, 0, 0, 0), "10000:00:00.0");
        assert_eq!(
            parse_pci_address("10000:00:00.0").unwrap(),
            (0x10000, 0, 0, 0)
        );
        assert_eq!(
            parse_pci_address("10001:e1:00.0").unwrap(),
            (0x10001, 0xe1, 0, 0)
        );
    }

    #[test]
    fn parses_sysfs_directory_names() {
        assert_eq!(parse_pci_address("0000:01:00.0").unwrap(), (0, 1, 0, 0));
        assert_eq!(
            parse_pci_address("0001:c3:1f.3").unwrap(),
            (1, 0xc3, 0x1f, 3)
        );
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "0000:01", "0000:01:00", "zzzz:01:00.0", "0000:01:20.0", "0000:01:00.8"] {
            assert!(
                matches!(
                    parse_pci_address(bad),
                    Err(InventoryError::InvalidPciAddress(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn reads_hex_attributes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("class"), "0x030000\n").unwrap();
        fs::write(dir.path().join("bogus"), "nope\n").unwrap();

        assert_eq!(read_sysfs_hex(dir.path(), "class").unwrap(), 0x030000);
        assert!(matches!(
            read_sysfs_hex(dir.path(), "bogus"),
            Err(InventoryError::InvalidValue { .. })
        ));
        assert!(matches!(
            read_sysfs_hex(dir.path(), "missing"),
            Err(InventoryError::Io(_))
        ));
    }
}
