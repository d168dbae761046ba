use crate::adapters::clipboard::named_clipboard::FileClipboard;
use crate::cli::ClipAction;
use crate::cli::{context, output};
use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditAction;
use crate::core::services::text_field::TextField;
use crate::core::traits::clipboard::Clipboard;

use super::audit_helpers::audited;

/// Execute the `seckit clip` command against the configured clipboard.
pub fn execute(action: &ClipAction) -> Result<()> {
    let config = context::load_config()?;
    let clipboard =
        FileClipboard::open(&context::home().join("clipboard"), &config.clipboard.name)?;
    let name = clipboard.name().to_string();

    match action {
        ClipAction::Copy { text } => {
            let field = TextField::with_text(&clipboard, text);
            audited(
                &config,
                AuditAction::Clipboard,
                &[&name],
                Some("copy".into()),
                field.copy_text(),
            )?;
            output::success(&format!("Copied to '{name}'"));
        }
        ClipAction::Cut { text } => {
            let mut field = TextField::with_text(&clipboard, text);
            audited(
                &config,
                AuditAction::Clipboard,
                &[&name],
                Some("cut".into()),
                field.cut_text(),
            )?;
            output::success(&format!("Cut to '{name}' (field is now empty)"));
        }
        ClipAction::Paste => {
            let mut field = TextField::new(&clipboard);
            field.paste_text()?;
            match field.text() {
                Some(text) => println!("{text}"),
                None => output::warning(&format!("Clipboard '{name}' is empty")),
            }
        }
        ClipAction::Clear => {
            audited(
                &config,
                AuditAction::Clipboard,
                &[&name],
                Some("clear".into()),
                clipboard.clear(),
            )?;
            output::success(&format!("Cleared '{name}'"));
        }
    }
    Ok(())
}
