//! Workflow controller.
//!
//! The controller owns the single current `PolishedResult` and the
//! `WorkflowState`. Both live behind one mutex that is never held across a
//! backend call. Backend failures are logged and replaced with a generic
//! message; every path ends with the trigger re-enabled.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::view::{FormEvent, FormView, Region, Trigger, TriggerState};
use crate::clipboard::{ClipboardWriter, CopyOutcome};
use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::form::{PolishedResult, RenderedDraft, WorkflowState, char_count_label, validate_draft};
use crate::notify::Notifier;
use crate::safety::sanitize;
use crate::service::{AnalyzeRequest, PolishService, SendRequest};

pub const POLISHED: &str = "Email polished successfully!";
pub const POLISH_FAILED: &str = "Failed to polish email. Please try again.";
pub const POLISH_FIRST: &str = "Please polish the email first";
pub const SENT: &str = "Email sent successfully! ✓";
pub const SEND_FAILED: &str = "Failed to send email. Please try again.";

/// Collaborators the controller drives.
pub struct WorkflowDeps {
    pub view: Arc<dyn FormView>,
    pub service: Arc<dyn PolishService>,
    pub notifier: Notifier,
    pub clipboard: ClipboardWriter,
}

#[derive(Debug, Default)]
struct Session {
    state: WorkflowState,
    result: Option<PolishedResult>,
}

impl Session {
    /// Move to `state`. `Ready` and `Sending` always hold a result.
    fn enter(&mut self, state: WorkflowState) {
        debug_assert!(
            !state.requires_result() || self.result.is_some(),
            "entered {state} without a polished result"
        );
        self.state = state;
    }
}

struct Inner {
    view: Arc<dyn FormView>,
    service: Arc<dyn PolishService>,
    notifier: Notifier,
    clipboard: ClipboardWriter,
    send_toast_duration: Duration,
    reset_delay: Duration,
    session: Mutex<Session>,
}

/// Drives the draft form. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct WorkflowController {
    inner: Arc<Inner>,
}

impl WorkflowController {
    pub fn new(config: &ClientConfig, deps: WorkflowDeps) -> Self {
        Self {
            inner: Arc::new(Inner {
                view: deps.view,
                service: deps.service,
                notifier: deps.notifier,
                clipboard: deps.clipboard,
                send_toast_duration: config.send_toast_duration,
                reset_delay: config.reset_delay,
                session: Mutex::new(Session::default()),
            }),
        }
    }

    pub async fn state(&self) -> WorkflowState {
        self.inner.session.lock().await.state
    }

    /// The current polished result, if any.
    pub async fn result(&self) -> Option<PolishedResult> {
        self.inner.session.lock().await.result.clone()
    }

    /// Route a form event to its handler.
    pub async fn dispatch(&self, event: FormEvent) {
        match event {
            FormEvent::BodyInput => self.on_body_input(),
            FormEvent::Analyze => self.submit_analyze().await,
            FormEvent::Copy => {
                self.copy_result().await;
            }
            FormEvent::Send => self.confirm_send().await,
            FormEvent::Submit => debug!("Native form submit ignored"),
        }
    }

    /// Refresh the character counter from the current body.
    pub fn on_body_input(&self) {
        let body = self.inner.view.snapshot().body;
        self.inner.view.set_char_count(&char_count_label(&body));
    }

    /// Validate the form and ask the backend for a polished draft.
    pub async fn submit_analyze(&self) {
        let inner = &self.inner;
        let draft = inner.view.snapshot();

        if let Err(e) = validate_draft(&draft) {
            debug!(reason = %e, "Draft rejected");
            inner.notifier.notify(&e.to_string());
            return;
        }

        let started_from = {
            let mut session = inner.session.lock().await;
            if !session.state.can_transition_to(WorkflowState::Analyzing) {
                warn!(state = %session.state, "Analyze ignored while busy");
                return;
            }
            let from = session.state;
            session.enter(WorkflowState::Analyzing);
            from
        };
        inner.view.set_trigger(Trigger::Analyze, TriggerState::ANALYZE_BUSY);

        let request = AnalyzeRequest {
            subject: sanitize(&draft.subject),
            body: sanitize(&draft.body),
            tone_option: draft.tone_option.clone(),
        };
        info!(tone = %request.tone_option, "Polishing draft");

        let outcome = inner.service.analyze(&request).await.and_then(|resp| {
            if resp.polished_body.is_empty() {
                Err(TransportError::Decode {
                    endpoint: "analyze".into(),
                    reason: "polishedBody is empty".into(),
                })
            } else {
                Ok(resp.into_result())
            }
        });

        match outcome {
            Ok(result) => {
                self.show_result(&result);
                {
                    let mut session = inner.session.lock().await;
                    session.result = Some(result);
                    session.enter(WorkflowState::Ready);
                }
                info!("Draft polished");
                inner.notifier.notify(POLISHED);
            }
            Err(e) => {
                error!("Polish failed: {e}");
                // A failed re-polish keeps the draft that is already on screen.
                let keep_previous = {
                    let mut session = inner.session.lock().await;
                    let keep = started_from == WorkflowState::Ready && session.result.is_some();
                    if keep {
                        session.enter(WorkflowState::Ready);
                    } else {
                        session.result = None;
                        session.enter(WorkflowState::Idle);
                    }
                    keep
                };
                if !keep_previous {
                    self.clear_output();
                }
                inner.notifier.notify(POLISH_FAILED);
            }
        }

        inner.view.set_trigger(Trigger::Analyze, TriggerState::ANALYZE_IDLE);
    }

    /// Send the polished draft. On success the form resets after a delay.
    pub async fn confirm_send(&self) {
        let inner = &self.inner;

        let result = {
            let mut session = inner.session.lock().await;
            match session.result.clone() {
                None => None,
                Some(_) if !session.state.can_transition_to(WorkflowState::Sending) => {
                    warn!(state = %session.state, "Send ignored in current state");
                    return;
                }
                Some(result) => {
                    session.enter(WorkflowState::Sending);
                    Some(result)
                }
            }
        };
        let Some(result) = result else {
            inner.notifier.notify(POLISH_FIRST);
            return;
        };

        inner.view.set_trigger(Trigger::Send, TriggerState::SEND_BUSY);

        let draft = inner.view.snapshot();
        let request = SendRequest {
            from: sanitize(&draft.sender_email),
            to: sanitize(&draft.recipient_email),
            subject: result.subject,
            body: result.body,
        };

        match inner.service.send(&request).await {
            Ok(_) => {
                info!(to = %request.to, "Email sent");
                inner.session.lock().await.enter(WorkflowState::Ready);
                inner.notifier.show(SENT, inner.send_toast_duration);
                self.schedule_reset();
            }
            Err(e) => {
                error!("Send failed: {e}");
                inner.session.lock().await.enter(WorkflowState::Ready);
                inner.notifier.notify(SEND_FAILED);
            }
        }

        inner.view.set_trigger(Trigger::Send, TriggerState::SEND_IDLE);
    }

    /// Copy `Subject: ...` plus the body of the current result.
    pub async fn copy_result(&self) -> Option<CopyOutcome> {
        let Some(result) = self.result().await else {
            self.inner.notifier.notify(POLISH_FIRST);
            return None;
        };
        Some(self.inner.clipboard.copy(&result.clipboard_text()).await)
    }

    /// Return the form to its initial, empty state.
    pub async fn reset(&self) {
        let inner = &self.inner;
        inner.view.clear_inputs();
        self.clear_output();
        inner.view.set_char_count(&char_count_label(""));

        let mut session = inner.session.lock().await;
        session.result = None;
        session.enter(WorkflowState::Idle);
        debug!("Form reset");
    }

    fn schedule_reset(&self) {
        let this = self.clone();
        let delay = self.inner.reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.reset().await;
        });
    }

    fn show_result(&self, result: &PolishedResult) {
        let view = &self.inner.view;
        view.render_draft(&RenderedDraft::from_result(result));
        view.set_metrics(&result.tone, &result.readability);
        view.set_region_visible(Region::Metrics, true);
        view.set_region_visible(Region::Actions, true);
    }

    fn clear_output(&self) {
        let view = &self.inner.view;
        view.render_placeholder();
        view.set_region_visible(Region::Metrics, false);
        view.set_region_visible(Region::Actions, false);
    }
}
