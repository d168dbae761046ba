use std::io::Write;
use std::path::{Path, PathBuf};

use crate::adapters::crypto::local_identity::{self, LocalIdentity};
use crate::core::errors::{Result, SeckitError};
use crate::core::models::protection::ProtectionLevel;

/// Write `bytes` to `path` atomically: temp file in the same directory,
/// then rename over the destination.
///
/// `mode` sets unix permissions on the final file; `None` gives `0o644`.
pub fn write_atomic(path: &Path, bytes: &[u8], mode: Option<u32>) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    set_mode(tmp.path(), mode.unwrap_or(0o644))?;

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

/// Writes and reads text files under a chosen protection level.
pub struct ProtectedFileWriter {
    identity: LocalIdentity,
}

impl ProtectedFileWriter {
    pub fn new(identity: LocalIdentity) -> Self {
        Self { identity }
    }

    /// Save `value` to `path` with the given protection.
    pub fn secure_save(&self, value: &str, path: &Path, level: ProtectionLevel) -> Result<()> {
        if value.is_empty() {
            return Err(SeckitError::invalid_content("refusing to save an empty value"));
        }
        // Plain text must not be mistaken for a sealed file on read.
        if level != ProtectionLevel::Complete && local_identity::is_sealed(value.as_bytes()) {
            return Err(SeckitError::invalid_content(
                "plain text starting with an age armor header needs the complete level",
            ));
        }

        let fail = |reason: String| SeckitError::ProtectionFailed {
            path: path.to_path_buf(),
            reason,
        };

        let result = match level {
            ProtectionLevel::None => write_atomic(path, value.as_bytes(), None),
            ProtectionLevel::OwnerOnly => write_atomic(path, value.as_bytes(), Some(0o600)),
            ProtectionLevel::Complete => self
                .identity
                .seal(value.as_bytes())
                .and_then(|sealed| write_atomic(path, &sealed, Some(0o600))),
        };
        result.map_err(|e| fail(e.to_string()))?;

        tracing::debug!(path = %path.display(), %level, "protected file written");
        Ok(())
    }

    /// Read a file written by `secure_save`, unsealing it if needed.
    ///
    /// Files starting with the age armor header are always unsealed.
    pub fn secure_read(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|_| SeckitError::FileNotFound {
            path: path.to_path_buf(),
        })?;

        let plain = if local_identity::is_sealed(&bytes) {
            self.identity
                .open(&bytes)
                .map_err(|e| SeckitError::ProtectionFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?
        } else {
            bytes
        };

        String::from_utf8(plain).map_err(|_| SeckitError::ProtectionFailed {
            path: path.to_path_buf(),
            reason: "content is not valid UTF-8".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(dir: &Path) -> ProtectedFileWriter {
        let identity = LocalIdentity::generate(&dir.join("identity.txt")).unwrap();
        ProtectedFileWriter::new(identity)
    }

    #[test]
    fn complete_level_is_sealed_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let w = writer(dir.path());
        let path = dir.path().join("protectedData.txt");

        w.secure_save("Super secret text", &path, ProtectionLevel::Complete)
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with(local_identity::ARMOR_HEADER));
        assert!(!raw.contains("Super secret text"));
        assert_eq!(w.secure_read(&path).unwrap(), "Super secret text");
    }

    #[test]
    fn none_level_writes_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let w = writer(dir.path());
        let path = dir.path().join("plain.txt");

        w.secure_save("hello", &path, ProtectionLevel::None).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert_eq!(w.secure_read(&path).unwrap(), "hello");
    }

    #[test]
    fn empty_value_is_invalid_content() {
        let dir = tempfile::tempdir().unwrap();
        let w = writer(dir.path());
        let result = w.secure_save("", &dir.path().join("x.txt"), ProtectionLevel::None);
        assert!(matches!(result, Err(SeckitError::InvalidContent { .. })));
    }

    #[test]
    fn overwrite_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let w = writer(dir.path());
        let path = dir.path().join("data.txt");

        w.secure_save("first", &path, ProtectionLevel::OwnerOnly).unwrap();
        w.secure_save("second", &path, ProtectionLevel::Complete).unwrap();
        assert_eq!(w.secure_read(&path).unwrap(), "second");
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let w = writer(dir.path());
        let result = w.secure_read(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(SeckitError::FileNotFound { .. })));
    }

    #[test]
    fn plain_text_with_armor_header_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let w = writer(dir.path());
        let path = dir.path().join("armored.txt");
        let text = format!("{}\nnot really sealed", local_identity::ARMOR_HEADER);

        for level in [ProtectionLevel::None, ProtectionLevel::OwnerOnly] {
            let result = w.secure_save(&text, &path, level);
            assert!(matches!(result, Err(SeckitError::InvalidContent { .. })));
        }
        assert!(!path.exists());

        w.secure_save(&text, &path, ProtectionLevel::Complete).unwrap();
        assert_eq!(w.secure_read(&path).unwrap(), text);
    }

    #[test]
    fn sealing_failure_is_protection_failure() {
        let dir = tempfile::tempdir().unwrap();
        let w = ProtectedFileWriter::new(LocalIdentity::new(dir.path().join("missing.txt")));
        let path = dir.path().join("data.txt");

        let result = w.secure_save("text", &path, ProtectionLevel::Complete);
        assert!(matches!(result, Err(SeckitError::ProtectionFailed { .. })));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn none_level_uses_mode_0644() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let w = writer(dir.path());
        let path = dir.path().join("plain.txt");

        w.secure_save("x", &path, ProtectionLevel::None).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn owner_only_sets_mode_0600() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let w = writer(dir.path());
        let path = dir.path().join("owner.txt");

        w.secure_save("x", &path, ProtectionLevel::OwnerOnly).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
