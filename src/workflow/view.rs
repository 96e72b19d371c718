//! The view seam: everything the controller reads from or draws on the form.

use crate::form::{DraftInput, RenderedDraft};

/// A user-activatable control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Analyze,
    Send,
}

/// Enabled flag, label, and loader visibility of a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerState {
    pub enabled: bool,
    pub label: &'static str,
    pub loader_visible: bool,
}

impl TriggerState {
    pub const ANALYZE_IDLE: Self = Self {
        enabled: true,
        label: "Polish Email",
        loader_visible: false,
    };
    pub const ANALYZE_BUSY: Self = Self {
        enabled: false,
        label: "Polishing...",
        loader_visible: true,
    };
    pub const SEND_IDLE: Self = Self {
        enabled: true,
        label: "Confirm & Send",
        loader_visible: false,
    };
    pub const SEND_BUSY: Self = Self {
        enabled: false,
        label: "Sending...",
        loader_visible: false,
    };
}

/// A show/hide block of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Metrics,
    Actions,
}

/// Rendering and input access for the draft form.
pub trait FormView: Send + Sync {
    /// Current field values.
    fn snapshot(&self) -> DraftInput;

    fn set_trigger(&self, trigger: Trigger, state: TriggerState);

    /// Show a polished draft in the output area.
    fn render_draft(&self, draft: &RenderedDraft);

    /// Show the empty-output placeholder.
    fn render_placeholder(&self);

    fn set_metrics(&self, tone: &str, readability: &str);

    fn set_region_visible(&self, region: Region, visible: bool);

    fn set_char_count(&self, label: &str);

    /// Clear every input field back to its initial value.
    fn clear_inputs(&self);
}

/// Events raised by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// The body text changed.
    BodyInput,
    /// The analyze trigger was activated.
    Analyze,
    /// The copy button was activated.
    Copy,
    /// The send trigger was activated.
    Send,
    /// A native form submission (e.g. Enter in a field).
    Submit,
}
