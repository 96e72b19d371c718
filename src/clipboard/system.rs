//! System clipboard via `arboard` (the `clipboard` feature).

use async_trait::async_trait;

use super::ClipboardBackend;
use crate::error::ClipboardError;

/// Writes to the OS clipboard. Without the `clipboard` feature every write
/// fails with `Unavailable`, which sends the writer down its fallback path.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "clipboard")]
#[async_trait]
impl ClipboardBackend for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        // arboard blocks on some platforms (X11 ownership handshake)
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Unavailable(format!("clipboard task failed: {e}")))?
    }
}

#[cfg(not(feature = "clipboard"))]
#[async_trait]
impl ClipboardBackend for SystemClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(
            "built without the clipboard feature".into(),
        ))
    }
}
