//! Device tree property access.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ProbePaths;
use crate::error::{InventoryError, InventoryResult};

/// Source of device tree string properties, addressed like `/soc/gpu/compatible`.
pub trait DeviceTreeSource {
    fn get_string(&self, property: &str) -> Option<String>;
}

/// Reads properties from the kernel's flattened device tree export.
#[derive(Debug, Clone)]
pub struct FsDeviceTree {
    roots: Vec<PathBuf>,
}

impl FsDeviceTree {
    pub fn new(paths: &ProbePaths) -> Self {
        Self::with_roots(paths.device_tree_roots.clone())
    }

    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    fn base(&self) -> Option<&Path> {
        self.roots.iter().map(PathBuf::as_path).find(|p| p.is_dir())
    }

    pub fn read_property(&self, property: &str) -> InventoryResult<Vec<u8>> {
        let base = self.base().ok_or_else(|| {
            InventoryError::SourceUnavailable(self.roots.first().cloned().unwrap_or_default())
        })?;
        let path = base.join(property.trim_start_matches('/'));
        Ok(fs::read(path)?)
    }
}

impl DeviceTreeSource for FsDeviceTree {
    fn get_string(&self, property: &str) -> Option<String> {
        match self.read_property(property) {
            Ok(raw) => format_string_list(&raw),
            Err(e) => {
                tracing::trace!(property, error = %e, "device tree property absent");
                None
            }
        }
    }
}

/// Renders a NUL-separated string list as `a, b, c`.
fn format_string_list(raw: &[u8]) -> Option<String> {
    let items: Vec<_> = raw
        .split(|b| *b == 0)
        .filter(|s| !s.is_empty())
        .map(String::from_utf8_lossy)
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}
