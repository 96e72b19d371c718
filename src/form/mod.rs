//! Form data, validation, and rendering helpers.

pub mod model;
pub mod render;
pub mod validate;

pub use model::{DraftInput, PolishedResult, ToneOption, WorkflowState};
pub use render::{PLACEHOLDER_TEXT, RenderedDraft, char_count_label};
pub use validate::{is_non_empty, is_valid_email, validate_draft};
