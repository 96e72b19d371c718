//! Form data model: draft input, polished result, and workflow states.

use serde::{Deserialize, Serialize};

/// The style the backend is asked to apply to the polished draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ToneOption {
    #[default]
    Professional,
    Formal,
    Friendly,
    Urgent,
    Casual,
    /// Any other tone text; the backend accepts free-form styles.
    Custom(String),
}

impl ToneOption {
    /// The value sent as `toneOption`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Professional => "Professional",
            Self::Formal => "Formal",
            Self::Friendly => "Friendly",
            Self::Urgent => "Urgent",
            Self::Casual => "Casual",
            Self::Custom(s) => s,
        }
    }
}

impl std::fmt::Display for ToneOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToneOption {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tone = match s.trim().to_ascii_lowercase().as_str() {
            "professional" => Self::Professional,
            "formal" => Self::Formal,
            "friendly" => Self::Friendly,
            "urgent" => Self::Urgent,
            "casual" => Self::Casual,
            _ => Self::Custom(s.trim().to_string()),
        };
        Ok(tone)
    }
}

impl Serialize for ToneOption {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ToneOption {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.parse() {
            Ok(tone) => Ok(tone),
            Err(never) => match never {},
        }
    }
}

/// Snapshot of the form fields, taken when a trigger is activated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftInput {
    pub sender_email: String,
    pub recipient_email: String,
    pub subject: String,
    pub body: String,
    pub tone_option: ToneOption,
}

/// The polished draft returned by a successful analyze call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolishedResult {
    pub subject: String,
    pub body: String,
    pub tone: String,
    pub readability: String,
}

impl PolishedResult {
    /// Text placed on the clipboard by the copy action.
    pub fn clipboard_text(&self) -> String {
        format!("Subject: {}\n\n{}", self.subject, self.body)
    }
}

/// Where the submit/send workflow currently is.
///
/// `Idle → Analyzing → Ready → Sending → Idle`, with `Sending → Ready` on
/// failure. `Ready` may also re-enter `Analyzing`; a failed analyze goes back
/// to the state it started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    #[default]
    Idle,
    Analyzing,
    Ready,
    Sending,
}

impl WorkflowState {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: WorkflowState) -> bool {
        use WorkflowState::*;
        matches!(
            (self, target),
            (Idle, Analyzing)
                | (Ready, Analyzing)
                | (Analyzing, Ready)
                | (Analyzing, Idle)
                | (Ready, Sending)
                | (Sending, Ready)
                | (Ready, Idle)
                | (Idle, Idle)
        )
    }

    /// Whether this state must hold a polished result.
    pub fn requires_result(&self) -> bool {
        matches!(self, Self::Ready | Self::Sending)
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Analyzing => "analyzing",
            Self::Ready => "ready",
            Self::Sending => "sending",
        };
        write!(f, "{s}")
    }
}
