use std::path::Path;
use std::fs;
use log::trace;

use crate::error::LicenseResult;

/// Read a file as raw bytes
pub fn read_file_bytes(path: impl AsRef<Path>) -> LicenseResult<Vec<u8>> {
    let path = path.as_ref();
    let content = fs::read(path)?;
    trace!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// Replace the content of an existing file with `content` in a single write
///
/// The buffer is complete before the call, so a reader never sees a partial
/// header from this process. Permissions of the existing file are kept.
pub fn write_bytes_to_file(path: impl AsRef<Path>, content: &[u8]) -> LicenseResult<()> {
    let path = path.as_ref();
    fs::write(path, content)?;
    trace!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
