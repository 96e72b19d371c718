//! Terminal front end, a line-oriented stand-in for the draft form.

pub mod command;

pub use command::Command;

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::form::{DraftInput, PLACEHOLDER_TEXT, RenderedDraft, ToneOption};
use crate::notify::ToastSurface;
use crate::theme::{ThemeView, ThemeVisuals};
use crate::workflow::{FormView, Region, Trigger, TriggerState};

/// Form state plus a writer for everything the form draws.
pub struct TerminalView {
    draft: Mutex<DraftInput>,
    regions: Mutex<HashMap<Region, bool>>,
    light_mode: AtomicBool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalView {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            draft: Mutex::new(DraftInput::default()),
            regions: Mutex::new(HashMap::new()),
            light_mode: AtomicBool::new(false),
            out: Mutex::new(out),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Apply a field edit.
    pub fn edit(&self, f: impl FnOnce(&mut DraftInput)) {
        let mut draft = self.draft.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut *draft);
    }

    pub fn set_tone(&self, tone: ToneOption) {
        self.edit(|d| d.tone_option = tone);
    }

    pub fn region_visible(&self, region: Region) -> bool {
        self.regions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&region)
            .copied()
            .unwrap_or(false)
    }

    /// Print the current field values.
    pub fn print_fields(&self) {
        let d = self.draft.lock().unwrap_or_else(|e| e.into_inner()).clone();
        self.line(&format!(
            "From: {}\nTo: {}\nSubject: {}\nTone: {}\n\n{}",
            d.sender_email, d.recipient_email, d.subject, d.tone_option, d.body
        ));
    }

    pub fn line(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        // Output errors (closed stdout) are not actionable here.
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }
}

impl FormView for TerminalView {
    fn snapshot(&self) -> DraftInput {
        self.draft.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_trigger(&self, _trigger: Trigger, state: TriggerState) {
        if !state.enabled {
            self.line(&format!("⏳ {}", state.label));
        }
    }

    fn render_draft(&self, draft: &RenderedDraft) {
        self.line(&format!("──────────\n{}\n──────────", draft.to_text()));
    }

    fn render_placeholder(&self) {
        self.line(PLACEHOLDER_TEXT);
    }

    fn set_metrics(&self, tone: &str, readability: &str) {
        self.line(&format!("Tone: {tone} | Readability: {readability}"));
    }

    fn set_region_visible(&self, region: Region, visible: bool) {
        let was = self
            .regions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(region, visible)
            .unwrap_or(false);
        if region == Region::Actions && visible && !was {
            self.line("Actions: copy | send");
        }
    }

    fn set_char_count(&self, label: &str) {
        self.line(&format!("({label})"));
    }

    fn clear_inputs(&self) {
        *self.draft.lock().unwrap_or_else(|e| e.into_inner()) = DraftInput::default();
    }
}

impl ToastSurface for TerminalView {
    fn show_toast(&self, message: &str) {
        self.line(&format!("» {message}"));
    }

    // Printed lines cannot be taken back.
    fn hide_toast(&self) {}
}

impl ThemeView for TerminalView {
    fn apply_theme(&self, visuals: ThemeVisuals) {
        self.light_mode.store(visuals.light_mode, Ordering::Relaxed);
        let icon = if visuals.sun_icon_hidden { "☾" } else { "☀" };
        self.line(&format!(
            "{icon} {} mode",
            if visuals.light_mode { "light" } else { "dark" }
        ));
    }

    fn is_light_mode(&self) -> bool {
        self.light_mode.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::form::PolishedResult;
    use crate::theme::ThemeMode;

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

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn edits_show_in_snapshot() {
        let view = TerminalView::new(Box::new(SharedBuf::default()));
        view.edit(|d| d.subject = "Lunch".into());
        view.set_tone(ToneOption::Friendly);

        let snap = view.snapshot();
        assert_eq!(snap.subject, "Lunch");
        assert_eq!(snap.tone_option, ToneOption::Friendly);

        view.clear_inputs();
        assert_eq!(view.snapshot(), DraftInput::default());
    }

    #[test]
    fn draft_rendered_as_text() {
        let buf = SharedBuf::default();
        let view = TerminalView::new(Box::new(buf.clone()));
        let result = PolishedResult {
            subject: "Re: Hi".into(),
            body: "Line1\nLine2".into(),
            tone: "Casual".into(),
            readability: "Medium".into(),
        };

        view.render_draft(&RenderedDraft::from_result(&result));
        view.set_region_visible(Region::Actions, true);
        view.set_region_visible(Region::Actions, true);

        let text = buf.text();
        assert!(text.contains("Subject: Re: Hi\n\nLine1\nLine2"));
        assert_eq!(text.matches("Actions: copy | send").count(), 1);
        assert!(view.region_visible(Region::Actions));
    }

    #[test]
    fn busy_trigger_printed() {
        let buf = SharedBuf::default();
        let view = TerminalView::new(Box::new(buf.clone()));
        view.set_trigger(Trigger::Analyze, TriggerState::ANALYZE_BUSY);
        view.set_trigger(Trigger::Analyze, TriggerState::ANALYZE_IDLE);
        assert_eq!(buf.text(), "⏳ Polishing...\n");
    }

    #[test]
    fn theme_flag_tracks_visuals() {
        let view = TerminalView::new(Box::new(SharedBuf::default()));
        view.apply_theme(ThemeVisuals::for_mode(ThemeMode::Light));
        assert!(view.is_light_mode());
        view.apply_theme(ThemeVisuals::for_mode(ThemeMode::Dark));
        assert!(!view.is_light_mode());
    }
}
