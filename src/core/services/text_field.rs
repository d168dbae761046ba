use crate::core::errors::Result;
use crate::core::traits::clipboard::Clipboard;

/// Editable text bound to a shared clipboard for copy, cut and paste.
///
/// The clipboard is borrowed, not owned: every field in a session
/// talks to the same instance.
pub struct TextField<'a> {
    text: Option<String>,
    clipboard: &'a dyn Clipboard,
}

impl<'a> TextField<'a> {
    pub fn new(clipboard: &'a dyn Clipboard) -> Self {
        Self {
            text: None,
            clipboard,
        }
    }

    pub fn with_text(clipboard: &'a dyn Clipboard, text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            clipboard,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Clipboard ← text.
    pub fn copy_text(&self) -> Result<()> {
        self.clipboard.set_string(self.text.as_deref())
    }

    /// Text ← clipboard, left untouched when the clipboard is empty.
    pub fn paste_text(&mut self) -> Result<()> {
        if let Some(content) = self.clipboard.string()? {
            self.text = Some(content);
        }
        Ok(())
    }

    /// Clipboard ← text, then clear the text.
    pub fn cut_text(&mut self) -> Result<()> {
        self.clipboard.set_string(self.text.as_deref())?;
        self.text = None;
        Ok(())
    }
}
