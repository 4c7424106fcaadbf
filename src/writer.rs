//! Atomic replace of the destination file.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{AppError, AppResult};

/// Mode given to a destination file that did not exist before.
#[cfg(unix)]
pub const NEW_FILE_MODE: u32 = 0o644;

/// Write `data` to `path` through a temp file in the same directory, then rename it
/// into place. An existing file keeps its permissions; a new one gets `NEW_FILE_MODE`.
/// On any failure the temp file is dropped and `path` is left as it was.
pub fn write_atomic(path: &Path, data: &[u8]) -> AppResult<()> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| write_error(format!("failed to create temp file in {}: {e}", dir.display())))?;
    temp.write_all(data)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| write_error(format!("failed to write temp file for {}: {e}", path.display())))?;
    carry_permissions(&temp, path)
        .map_err(|e| write_error(format!("failed to set permissions for {}: {e}", path.display())))?;
    temp.persist(path)
        .map_err(|e| write_error(format!("failed to persist {}: {}", path.display(), e.error)))?;
    tracing::trace!(path = %path.display(), len = data.len(), "persisted");
    Ok(())
}

// NamedTempFile is created 0600; match what a plain write would have left behind.
#[cfg(unix)]
fn carry_permissions(temp: &NamedTempFile, target: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let perms = match fs::metadata(target) {
        Ok(meta) if meta.is_file() => meta.permissions(),
        _ => fs::Permissions::from_mode(NEW_FILE_MODE),
    };
    temp.as_file().set_permissions(perms)
}

#[cfg(not(unix))]
fn carry_permissions(_temp: &NamedTempFile, _target: &Path) -> std::io::Result<()> {
    Ok(())
}

fn write_error(message: String) -> AppError {
    AppError::write("write_failed", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_bytes_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.json");
        let data = b"{\"info\":{}}\n\xff\x00 not utf8".to_vec();
        write_atomic(&path, &data).unwrap();
        assert_eq!(fs::read(&path).unwrap(), data);
    }

    #[test]
    fn replaces_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.json");
        fs::write(&path, b"old contents that are longer").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
        let leftovers: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn keeps_mode_of_existing_file() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.json");
        fs::write(&path, b"old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn new_file_is_not_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("fresh.json");

        write_atomic(&path, b"{}").unwrap();

        assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, NEW_FILE_MODE);
    }

    #[test]
    fn missing_directory_is_write_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nope").join("out.json");
        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, AppError::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn target_is_a_directory_leaves_it_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("taken");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"k").unwrap();
        let err = write_atomic(&target, b"x").unwrap_err();
        assert_eq!(err.exit_code(), 6);
        assert!(target.join("keep").exists());
        // only the pre-existing directory remains; the temp file was cleaned up
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }
}
