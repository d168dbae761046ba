use crate::adapters::clipboard::named_clipboard::FileClipboard;
use crate::adapters::crypto::local_identity::LocalIdentity;
use crate::adapters::protection::protected_file::ProtectedFileWriter;
use crate::cli::{context, output};
use crate::core::errors::Result;
use crate::core::models::protection::ProtectionLevel;
use crate::core::services::text_field::TextField;

const DEMO_USERNAME_KEY: &str = "seckit.demo.username";
const DEMO_PASSWORD_KEY: &str = "seckit.demo.password";

/// Execute `seckit demo`: each feature once, results on the console.
///
/// A failing step is reported and the demo moves on to the next one.
/// Demo credentials are removed at the end so the demo can be rerun.
pub fn execute() -> Result<()> {
    let config = context::load_config()?;
    let facade = context::open_facade(&config)?;

    output::header("Credentials");
    let stored = facade
        .set("alice", DEMO_USERNAME_KEY)
        .and_then(|_| facade.set("correct horse battery staple", DEMO_PASSWORD_KEY))
        .and_then(|_| {
            Ok((
                facade.string(DEMO_USERNAME_KEY)?,
                facade.string(DEMO_PASSWORD_KEY)?,
            ))
        });
    match stored {
        Ok((username, password)) => {
            output::success(&format!("Username: {username:?}"));
            output::success(&format!("Password: {password:?}"));
        }
        Err(e) => output::warning(&format!("Could not store credentials: {e}")),
    }
    for key in [DEMO_USERNAME_KEY, DEMO_PASSWORD_KEY] {
        if let Err(e) = facade.remove(key) {
            output::detail(&format!("Could not remove {key}: {e}"));
        }
    }

    output::header("Asymmetric encryption");
    let text = "The sensitive information";
    match facade
        .encrypt(text)
        .and_then(|ciphertext| facade.decrypt(&ciphertext))
    {
        Ok(plain) => output::success(&format!(
            "Round trip --> {}",
            String::from_utf8_lossy(&plain)
        )),
        Err(e) => output::warning(&format!("Encryption round trip failed: {e}")),
    }

    output::header("Data protection");
    let identity = LocalIdentity::open_or_generate(context::identity(&config).path())?;
    let writer = ProtectedFileWriter::new(identity);
    let file = context::home().join("protectedData.txt");
    match writer.secure_save("Super secret text", &file, ProtectionLevel::Complete) {
        Ok(()) => output::success(&format!("Save success at {}", file.display())),
        Err(e) => output::warning(&format!("Save failure: {e}")),
    }

    output::header("Clipboard");
    let clipboard =
        FileClipboard::open(&context::home().join("clipboard"), &config.clipboard.name)?;
    let source = TextField::with_text(&clipboard, "copied from the demo");
    let mut target = TextField::new(&clipboard);
    match source.copy_text().and_then(|_| target.paste_text()) {
        Ok(()) => output::success(&format!(
            "Pasted from '{}': {}",
            config.clipboard.name,
            target.text().unwrap_or_default()
        )),
        Err(e) => output::warning(&format!("Clipboard failed: {e}")),
    }

    println!();
    Ok(())
}
