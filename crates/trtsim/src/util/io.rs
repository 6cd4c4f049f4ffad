//! I/O utility functions

use std::fs;
use std::io;
use std::path::Path;

/// Write `content` to `path` via a sibling temp file and a rename, creating
/// missing parent directories first.
///
/// A reader never observes a half-written table or bundle.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
