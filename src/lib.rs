//! Shotaudit core library.
//!
//! This crate scores screenshots against a fixed design-system rule set.
//! The evaluation is deterministic and keyed only by the caller's role; the
//! image content is never inspected.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `engine`: Rule evaluation, scoring formula, and summaries.
//! - `rules`: The base and role-specific rule table.
//! - `models`: Severity, issue, result, and role types.
//! - `upload`: Artifact references and the `image/*` filter.
//! - `session`: Idle/Analyzing/Results lifecycle with a cancellable delay.
//! - `presentation`: Severity and score-band display table.
//! - `output`: Human/JSON printers.
//! - `logging`: Tracing subscriber setup.
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod presentation;
pub mod rules;
pub mod session;
pub mod upload;

pub use engine::{evaluate, evaluate_token};
pub use error::{AuditError, Result};
pub use models::{AuditResult, Issue, Role, Severity, Summary};
