//! Shared data models for audit results and their summaries.

pub mod role;

use serde::Serialize;

pub use role::Role;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
/// Issue severity, declared from most to least severe.
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Every variant in decreasing order of severity.
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A single detected condition with its remediation.
pub struct Issue {
    pub rule: String,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Per-severity counts derived from an issue list.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Score plus the issues it was computed from.
///
/// Only the engine builds these, so `score` can never drift from `issues`.
pub struct AuditResult {
    score: u8,
    issues: Vec<Issue>,
}

impl AuditResult {
    pub(crate) fn from_issues(issues: Vec<Issue>) -> Self {
        let score = crate::engine::score_for(&issues);
        AuditResult { score, issues }
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Counts recomputed from `issues` on every call.
    pub fn summary(&self) -> Summary {
        crate::engine::summarize(&self.issues)
    }
}
