//! OSC 52 fallback: asks the terminal emulator to set the clipboard.

use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::CopySurface;
use crate::error::ClipboardError;

/// Builds the OSC 52 "set clipboard" sequence for `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// A scratch surface that stages text and emits it as an OSC 52 sequence.
pub struct Osc52Surface {
    sink: Mutex<Box<dyn Write + Send>>,
    staged: Mutex<Option<String>>,
    selected: AtomicBool,
}

impl Osc52Surface {
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(sink),
            staged: Mutex::new(None),
            selected: AtomicBool::new(false),
        }
    }

    /// Surface that writes to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Whether text is currently mounted.
    pub fn is_mounted(&self) -> bool {
        self.staged
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

impl CopySurface for Osc52Surface {
    fn mount(&self, text: &str) -> Result<(), ClipboardError> {
        let mut staged = self.staged.lock().unwrap_or_else(|e| e.into_inner());
        *staged = Some(text.to_string());
        self.selected.store(false, Ordering::Relaxed);
        Ok(())
    }

    fn select(&self) {
        self.selected.store(true, Ordering::Relaxed);
    }

    fn exec_copy(&self) -> Result<(), ClipboardError> {
        if !self.selected.load(Ordering::Relaxed) {
            return Err(ClipboardError::CopyFailed("nothing selected".into()));
        }
        let staged = self.staged.lock().unwrap_or_else(|e| e.into_inner());
        let Some(text) = staged.as_deref() else {
            return Err(ClipboardError::CopyFailed("no surface mounted".into()));
        };

        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        sink.write_all(osc52_sequence(text).as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    fn unmount(&self) {
        *self.staged.lock().unwrap_or_else(|e| e.into_inner()) = None;
        self.selected.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clipboard::copy_via_surface;

    /// A `Write` that appends into a shared buffer.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sequence_is_base64_encoded() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn copy_writes_sequence_and_unmounts() {
        let buf = SharedBuf::default();
        let surface = Osc52Surface::new(Box::new(buf.clone()));

        copy_via_surface(&surface, "Subject: Hi\n\nBody").unwrap();

        let written = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, osc52_sequence("Subject: Hi\n\nBody"));
        assert!(!surface.is_mounted());
    }

    #[test]
    fn exec_without_select_fails() {
        let surface = Osc52Surface::new(Box::new(SharedBuf::default()));
        surface.mount("x").unwrap();
        assert!(matches!(
            surface.exec_copy(),
            Err(ClipboardError::CopyFailed(_))
        ));
    }

    #[test]
    fn write_error_still_unmounts() {
        let surface = Osc52Surface::new(Box::new(BrokenPipe));
        let err = copy_via_surface(&surface, "x").unwrap_err();
        assert!(matches!(err, ClipboardError::Io(_)));
        assert!(!surface.is_mounted());
    }
}
