//! Validation findings
//!
//! `validate()` never fails. Every finding is a [`Warning`] carrying a
//! severity; the caller decides which severities block a rollout.

use std::fmt;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Policy or best-practice issue; the document still works
    Advisory,
    /// Broken wiring (dangling reference, no pipelines)
    Structural,
}

impl Severity {
    /// Marker prepended when a warning is displayed
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Advisory => "warning",
            Self::Structural => "error",
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Finding severity
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
}

impl Warning {
    /// Create an advisory warning
    #[inline]
    pub fn advisory(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Advisory,
            message: message.into(),
        }
    }

    /// Create a structural warning
    #[inline]
    pub fn structural(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Structural,
            message: message.into(),
        }
    }

    /// Check whether this finding is a structural break
    #[inline]
    pub fn is_structural(&self) -> bool {
        self.severity == Severity::Structural
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.marker(), self.message)
    }
}

/// Check whether any finding is structural
pub fn has_structural(warnings: &[Warning]) -> bool {
    warnings.iter().any(Warning::is_structural)
}
