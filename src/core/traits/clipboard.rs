use crate::core::errors::Result;

/// Port for a named, shared text buffer.
///
/// One instance is created per process and handed to every consumer by
/// reference.
pub trait Clipboard: Send + Sync {
    /// Current contents, `None` when the buffer is empty.
    fn string(&self) -> Result<Option<String>>;

    /// Replace the contents. `None` empties the buffer.
    fn set_string(&self, value: Option<&str>) -> Result<()>;

    fn clear(&self) -> Result<()> {
        self.set_string(None)
    }

    fn name(&self) -> &str;
}
