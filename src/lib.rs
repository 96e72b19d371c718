//! mail-polish: draft form controller for an email polishing backend.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod form;
pub mod notify;
pub mod safety;
pub mod service;
pub mod terminal;
pub mod theme;
pub mod workflow;
