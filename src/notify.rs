//! Transient status messages (toasts).
//!
//! Each `show` replaces the visible message and schedules its own hide.
//! Earlier hide timers are not cancelled, so a stale timer can hide a newer
//! message before its full duration has elapsed.

use std::sync::Arc;
use std::time::Duration;

/// Where toasts are drawn.
pub trait ToastSurface: Send + Sync {
    /// Replace the message text and make it visible.
    fn show_toast(&self, message: &str);

    /// Hide the toast.
    fn hide_toast(&self);
}

/// Auto-dismissing notification presenter.
#[derive(Clone)]
pub struct Notifier {
    surface: Arc<dyn ToastSurface>,
    default_duration: Duration,
}

impl Notifier {
    pub fn new(surface: Arc<dyn ToastSurface>, default_duration: Duration) -> Self {
        Self {
            surface,
            default_duration,
        }
    }

    /// Show a message for the default duration.
    pub fn notify(&self, message: &str) {
        self.show(message, self.default_duration);
    }

    /// Show a message and hide it after `duration`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: &str, duration: Duration) {
        tracing::debug!(message, ?duration, "Toast shown");
        self.surface.show_toast(message);

        let surface = Arc::clone(&self.surface);
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            surface.hide_toast();
        });
    }
}
