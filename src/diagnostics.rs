use std::fmt;

use tracing::{error, warn};

use crate::error::StatementError;

/// How serious a reported problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Suspicious input that was still accepted.
    Warning,
    /// A malformed statement whose effect was skipped.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A non-fatal problem found while loading or interpreting a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message:  String,
    /// 1-based source line, when the problem belongs to one.
    pub line:     Option<usize>,
    /// The offending source text.
    pub source:   Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(source) = &self.source {
            match self.line {
                Some(line) => write!(f, "\n  --> line {line}: {source}")?,
                None => write!(f, "\n  --> {source}")?,
            }
        }
        Ok(())
    }
}

/// Collects diagnostics in the order they were reported.
///
/// Every report is also emitted as a `tracing` event, so a subscriber sees
/// problems as they happen while callers can still inspect the full list once
/// the run is over.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        let line = diagnostic.line.unwrap_or_default();
        let source = diagnostic.source.as_deref().unwrap_or_default();
        match diagnostic.severity {
            Severity::Warning => warn!(line, source, "{}", diagnostic.message),
            Severity::Error => error!(line, source, "{}", diagnostic.message),
        }
        self.entries.push(diagnostic);
    }

    /// Records a warning.
    pub fn warn(&mut self, message: impl Into<String>, line: Option<usize>, source: Option<&str>) {
        self.report(Diagnostic { severity: Severity::Warning,
                                 message: message.into(),
                                 line,
                                 source: source.map(str::to_string) });
    }

    /// Records a malformed statement together with its source text.
    pub fn statement(&mut self, error: &StatementError, source: &str) {
        self.report(Diagnostic { severity: Severity::Error,
                                 message:  error.to_string(),
                                 line:     Some(error.line()),
                                 source:   Some(source.to_string()), });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Returns the diagnostics of the given severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(move |diagnostic| diagnostic.severity == severity)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.with_severity(Severity::Error).next().is_some()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
