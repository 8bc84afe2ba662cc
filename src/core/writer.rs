//! Persists exported files into the languages tree

use std::fs;
use std::path::Path;

use tracing::info;

use crate::core::errors::Result;

/// Write `bytes` to `destination`, creating missing parent directories and
/// overwriting any existing file at that path.
pub fn write(bytes: &[u8], destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(destination, bytes)?;
    info!("Wrote {} bytes to {}", bytes.len(), destination.display());
    Ok(())
}
