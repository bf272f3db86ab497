//! Shared diagnostic types for the lexer, syntax analyzer, and semantic
//! analyzer.

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{Diagnostic, DiagnosticBuilder, RelatedInfo, Severity};
