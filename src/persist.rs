//! Disk I/O: the load ladder and atomic write.
//!
//! The rename-over approach is close to atomic on most platforms. On NTFS
//! (Windows) it's reliable; on FAT32 or network shares there are no hard
//! guarantees. If that matters to you, keep backups or use a real database.

use crate::error::{Error, Result};
use crate::serializer::JsonCodec;
use serde_json::{Map, Value};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Loads the backing file at `path`.
///
/// A missing file is not an error: the store starts empty and nothing is
/// created on disk until the first flush. An existing file must be both
/// readable and writable, and (when non-empty) must hold a JSON object.
pub fn load(path: &Path, codec: &JsonCodec) -> Result<Map<String, Value>> {
    let meta = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(Error::access_denied(path))
        }
        Err(e) => return Err(Error::io(path, &e)),
    };

    // The file will be rewritten on flush, so require write access up front
    // rather than failing on the first mutation.
    let mut file = match OpenOptions::new().read(true).write(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(Error::access_denied(path))
        }
        Err(e) => return Err(Error::io(path, &e)),
    };

    if meta.len() == 0 {
        return Ok(Map::new());
    }

    let mut bytes = Vec::with_capacity(meta.len() as usize);
    file.read_to_end(&mut bytes)
        .map_err(|e| Error::io(path, &e))?;

    log::debug!("loaded {} bytes from {}", bytes.len(), path.display());
    codec.decode(&bytes).map_err(|e| Error::corrupt(path, &e))
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`. This avoids
/// leaving a half-written file if the process crashes mid-write.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    std::fs::write(&tmp, bytes).map_err(|e| write_error(path, e))?;
    std::fs::rename(&tmp, path).map_err(|e| write_error(path, e))?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn write_error(path: &Path, cause: std::io::Error) -> Error {
    if cause.kind() == ErrorKind::PermissionDenied {
        Error::access_denied(path)
    } else {
        Error::io(path, &cause)
    }
}
