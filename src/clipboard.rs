use anyhow::{Context, Result};

/// Writes `text` to the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("clipboard is not available")?;
    clipboard
        .set_text(text)
        .context("failed to write to the clipboard")?;
    Ok(())
}
