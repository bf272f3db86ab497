//! A shared diagnostic type used by the lexer, syntax analyzer, and
//! semantic analyzer alike, so the §6.4 renderer has exactly one shape to
//! format regardless of which phase raised the problem.

use crate::base::Span;

use super::codes::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A secondary location attached to a diagnostic, e.g. pointing back at the
/// `{` an unclosed block opened with.
#[derive(Debug, Clone)]
pub struct RelatedInfo {
    pub message: String,
    pub span: Span,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A single diagnostic raised by the lexer, syntax analyzer, or semantic
/// analyzer.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub code: ErrorCode,
    pub severity: Severity,
    pub expected: Option<String>,
    pub related: Vec<RelatedInfo>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: Span, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            span,
            code,
            severity: Severity::Error,
            expected: None,
            related: Vec::new(),
        }
    }

    pub fn builder(code: ErrorCode) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Builder for diagnostics that need more than a bare message and span —
/// an "expected X, found Y" description, a hint, or related locations.
pub struct DiagnosticBuilder {
    code: ErrorCode,
    message: Option<String>,
    span: Option<Span>,
    severity: Severity,
    expected: Option<String>,
    related: Vec<RelatedInfo>,
}

impl DiagnosticBuilder {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            span: None,
            severity: Severity::Error,
            expected: None,
            related: Vec::new(),
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn build(self) -> Diagnostic {
        let span = self.span.expect("DiagnosticBuilder::build: span not set");
        let message = self.message.unwrap_or_else(|| self.code.to_string());
        Diagnostic {
            message,
            span,
            code: self.code,
            severity: self.severity,
            expected: self.expected,
            related: self.related,
        }
    }
}
