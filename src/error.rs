use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value {value:?} in {path}")]
    InvalidValue { path: PathBuf, value: String },

    #[error("Invalid PCI address: {0}")]
    InvalidPciAddress(String),

    #[error("Source not available: {0}")]
    SourceUnavailable(PathBuf),
}

// A convenient alias
pub type InventoryResult<T> = Result<T, InventoryError>;
