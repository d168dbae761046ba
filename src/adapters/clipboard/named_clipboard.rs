use std::path::{Path, PathBuf};

use crate::adapters::protection::protected_file;
use crate::core::errors::{Result, SeckitError};
use crate::core::traits::clipboard::Clipboard;

/// Clipboard persisted as one owner-only file per name, so separate
/// `seckit` invocations see the same buffer.
pub struct FileClipboard {
    name: String,
    path: PathBuf,
}

impl FileClipboard {
    /// Open the clipboard `name` under `dir`, e.g. `<home>/clipboard`.
    pub fn open(dir: &Path, name: &str) -> Result<Self> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            path: dir.join(format!("{name}.txt")),
        })
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clipboard for FileClipboard {
    fn string(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| SeckitError::ClipboardError {
            detail: format!("cannot read '{}': {e}", self.name),
        })?;
        Ok(Some(content).filter(|c| !c.is_empty()))
    }

    fn set_string(&self, value: Option<&str>) -> Result<()> {
        match value {
            Some(text) => protected_file::write_atomic(&self.path, text.as_bytes(), Some(0o600))
                .map_err(|e| SeckitError::ClipboardError {
                    detail: format!("cannot write '{}': {e}", self.name),
                }),
            None if self.path.exists() => std::fs::remove_file(&self.path).map_err(|e| {
                SeckitError::ClipboardError {
                    detail: format!("cannot clear '{}': {e}", self.name),
                }
            }),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Clipboard held in memory for the life of the process.
#[cfg(test)]
pub struct MemoryClipboard {
    name: String,
    content: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            content: std::sync::Mutex::new(None),
        }
    }
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn string(&self) -> Result<Option<String>> {
        let content = self.content.lock().map_err(|_| SeckitError::ClipboardError {
            detail: "clipboard lock poisoned".into(),
        })?;
        Ok(content.clone().filter(|c| !c.is_empty()))
    }

    fn set_string(&self, value: Option<&str>) -> Result<()> {
        let mut content = self.content.lock().map_err(|_| SeckitError::ClipboardError {
            detail: "clipboard lock poisoned".into(),
        })?;
        *content = value.map(str::to_string);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Clipboard names become file names: letters, digits, `-`, `_`, `.` only.
pub fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= 64
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(SeckitError::ClipboardError {
            detail: format!("invalid clipboard name '{name}'"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_clipboard_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let clip = FileClipboard::open(dir.path(), "CustomPasteboard").unwrap();
        assert_eq!(clip.string().unwrap(), None);
    }

    #[test]
    fn file_clipboard_is_shared_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileClipboard::open(dir.path(), "CustomPasteboard").unwrap();
        let reader = FileClipboard::open(dir.path(), "CustomPasteboard").unwrap();

        writer.set_string(Some("copied")).unwrap();
        assert_eq!(reader.string().unwrap().as_deref(), Some("copied"));
    }

    #[test]
    fn names_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let a = FileClipboard::open(dir.path(), "a").unwrap();
        let b = FileClipboard::open(dir.path(), "b").unwrap();

        a.set_string(Some("only a")).unwrap();
        assert_eq!(b.string().unwrap(), None);
    }

    #[test]
    fn clear_removes_content() {
        let dir = tempfile::tempdir().unwrap();
        let clip = FileClipboard::open(dir.path(), "board").unwrap();
        clip.set_string(Some("x")).unwrap();
        clip.clear().unwrap();

        assert_eq!(clip.string().unwrap(), None);
        assert!(!clip.path().exists());
        clip.clear().unwrap();
    }

    #[test]
    fn rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileClipboard::open(dir.path(), "../escape").is_err());
        assert!(FileClipboard::open(dir.path(), "").is_err());
        assert!(FileClipboard::open(dir.path(), ".hidden").is_err());
    }

    #[test]
    fn empty_string_reads_as_empty_clipboard() {
        let dir = tempfile::tempdir().unwrap();
        let file = FileClipboard::open(dir.path(), "board").unwrap();
        let memory = MemoryClipboard::new("board");

        for clip in [&file as &dyn Clipboard, &memory] {
            clip.set_string(Some("")).unwrap();
            assert_eq!(clip.string().unwrap(), None);
        }
    }

    #[test]
    fn memory_clipboard_set_and_clear() {
        let clip = MemoryClipboard::new("mem");
        clip.set_string(Some("hi")).unwrap();
        assert_eq!(clip.string().unwrap().as_deref(), Some("hi"));
        clip.clear().unwrap();
        assert_eq!(clip.string().unwrap(), None);
    }
}
