//! Lexer failure taxonomy (spec §7): each kind is fatal once raised — the
//! lexer stops producing tokens and the caller renders the diagnostic.

use thiserror::Error;

use crate::base::Span;
use crate::errors::{Diagnostic, ErrorCode};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected symbol {byte:?}")]
    UnexpectedSymbol { byte: u8, span: Span },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unterminated pointer token")]
    UnterminatedPointer { span: Span },

    #[error("unterminated reference-to-pointer token, expected ')'")]
    UnterminatedReferenceToPointer { span: Span },

    #[error("non-ASCII byte {byte:#04x} outside a string literal")]
    NonAsciiByte { byte: u8, span: Span },

    #[error("internal lexer error: {message}")]
    Internal { message: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedSymbol { span, .. }
            | Self::UnterminatedString { span, .. }
            | Self::UnterminatedPointer { span, .. }
            | Self::UnterminatedReferenceToPointer { span, .. }
            | Self::NonAsciiByte { span, .. }
            | Self::Internal { span, .. } => *span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            Self::UnexpectedSymbol { .. } => ErrorCode::E0101,
            Self::UnterminatedString { .. } => ErrorCode::E0102,
            Self::UnterminatedPointer { .. } => ErrorCode::E0103,
            Self::UnterminatedReferenceToPointer { .. } => ErrorCode::E0104,
            Self::NonAsciiByte { .. } => ErrorCode::E0105,
            Self::Internal { .. } => ErrorCode::E0106,
        };
        Diagnostic::new(self.to_string(), self.span(), code)
    }
}
