//! The submit/validate/render/send workflow.

pub mod controller;
pub mod view;

pub use controller::{WorkflowController, WorkflowDeps};
pub use view::{FormEvent, FormView, Region, Trigger, TriggerState};
