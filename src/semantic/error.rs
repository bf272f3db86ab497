//! Semantic-analysis failure taxonomy (spec §4.4, §7): redeclaration and
//! modifier misuse. Both are fatal in the reference behavior, but this
//! analyzer collects every occurrence in one pass (spec §7 permits an
//! implementation to "collect and continue" as long as it does not emit a
//! valid AST downstream — callers are expected to check `is_empty()`
//! before trusting the resulting table for anything further).

use thiserror::Error;

use crate::base::Span;
use crate::errors::{Diagnostic, ErrorCode};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("'{name}' is already declared in this scope")]
    Redeclaration {
        name: String,
        span: Span,
        first_declared: Span,
    },

    #[error("internal error: non-modifier node found in modifier slot")]
    ModifierMisuse { span: Span },
}

impl SemanticError {
    pub fn span(&self) -> Span {
        match self {
            Self::Redeclaration { span, .. } | Self::ModifierMisuse { span } => *span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            Self::Redeclaration { .. } => ErrorCode::E0601,
            Self::ModifierMisuse { .. } => ErrorCode::E0602,
        };
        let mut builder = Diagnostic::builder(code).message(self.to_string()).span(self.span());
        if let Self::Redeclaration { first_declared, .. } = self {
            builder = builder.related(crate::errors::RelatedInfo::new(
                "first declared here",
                *first_declared,
            ));
        }
        builder.build()
    }
}
