//! Output rendering of the polished draft, as markup or plain lines.

use super::model::PolishedResult;

/// Shown in the output area when there is no polished draft.
pub const PLACEHOLDER_TEXT: &str = "Your polished email will appear here...";

/// A polished draft laid out for display.
///
/// The subject and body come back from the backend already escaped, so they
/// are interpolated into markup as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDraft {
    pub subject: String,
    pub lines: Vec<String>,
}

impl RenderedDraft {
    pub fn from_result(result: &PolishedResult) -> Self {
        Self {
            subject: result.subject.clone(),
            lines: result.body.split('\n').map(str::to_string).collect(),
        }
    }

    /// Markup for the output region. Body newlines become `<br>`.
    pub fn to_html(&self) -> String {
        format!(
            "<strong>Subject:</strong> {}<br><br>{}",
            self.subject,
            self.lines.join("<br>")
        )
    }

    /// Plain-text rendering for terminal output.
    pub fn to_text(&self) -> String {
        let mut out = format!("Subject: {}\n\n", self.subject);
        out.push_str(&self.lines.join("\n"));
        out
    }
}

/// Character counter label: `1 character`, otherwise `N characters`.
pub fn char_count_label(body: &str) -> String {
    let count = body.chars().count();
    format!("{count} character{}", if count == 1 { "" } else { "s" })
}
