//! Clipboard writer with an async primary path and a synchronous fallback.
//!
//! The fallback mirrors the classic "hidden text field" trick: mount a
//! scratch surface holding the text, select it, run a synchronous copy
//! command, then unmount. Unmounting happens in a drop guard so the surface
//! is removed even when the copy command fails or panics.

pub mod osc52;
pub mod system;

pub use osc52::Osc52Surface;
pub use system::SystemClipboard;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ClipboardError;
use crate::notify::Notifier;

pub const COPIED: &str = "Copied to clipboard!";
pub const COPIED_FALLBACK: &str = "Copied to clipboard! (Fallback)";
pub const COPY_FAILED: &str = "Failed to copy text. Please copy manually.";

/// Primary, asynchronous clipboard write.
#[async_trait]
pub trait ClipboardBackend: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Scratch surface used by the synchronous fallback.
pub trait CopySurface: Send + Sync {
    /// Create the surface holding `text`.
    fn mount(&self, text: &str) -> Result<(), ClipboardError>;

    /// Select the surface contents.
    fn select(&self);

    /// Run the synchronous copy command on the selection.
    fn exec_copy(&self) -> Result<(), ClipboardError>;

    /// Remove the surface.
    fn unmount(&self);
}

/// Unmounts the surface when dropped.
struct MountedSurface<'a> {
    surface: &'a dyn CopySurface,
}

impl Drop for MountedSurface<'_> {
    fn drop(&mut self) {
        self.surface.unmount();
    }
}

/// Copy `text` through a scratch surface. The surface is always removed.
pub fn copy_via_surface(surface: &dyn CopySurface, text: &str) -> Result<(), ClipboardError> {
    surface.mount(text)?;
    let _mounted = MountedSurface { surface };
    surface.select();
    surface.exec_copy()
}

/// Which path, if any, put the text on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Primary,
    Fallback,
    Failed,
}

/// Copies text and reports the outcome as a toast.
#[derive(Clone)]
pub struct ClipboardWriter {
    primary: Arc<dyn ClipboardBackend>,
    fallback: Arc<dyn CopySurface>,
    notifier: Notifier,
}

impl ClipboardWriter {
    pub fn new(
        primary: Arc<dyn ClipboardBackend>,
        fallback: Arc<dyn CopySurface>,
        notifier: Notifier,
    ) -> Self {
        Self {
            primary,
            fallback,
            notifier,
        }
    }

    pub async fn copy(&self, text: &str) -> CopyOutcome {
        match self.primary.write_text(text).await {
            Ok(()) => {
                self.notifier.notify(COPIED);
                return CopyOutcome::Primary;
            }
            Err(e) => tracing::debug!("Primary clipboard write failed, using fallback: {e}"),
        }

        match copy_via_surface(self.fallback.as_ref(), text) {
            Ok(()) => {
                self.notifier.notify(COPIED_FALLBACK);
                CopyOutcome::Fallback
            }
            Err(e) => {
                tracing::error!("Failed to copy using fallback: {e}");
                self.notifier.notify(COPY_FAILED);
                CopyOutcome::Failed
            }
        }
    }
}
