//! Panic-mode error recovery (spec §4.2 "Recovery").
//!
//! Brace depth is tracked on [`RecoveryState`] rather than as a local so it
//! survives across separate calls into [`recover`] within the same phase —
//! several independent errors in one block must not cascade into spurious
//! "missing brace" reports.

use crate::token_cursor::TokenCursor;

use super::context::is_statement_start_keyword;
use crate::lexer::TokenKind;

#[derive(Debug, Default)]
pub struct RecoveryState {
    pub brace_depth: i32,
}

impl RecoveryState {
    pub fn enter_brace(&mut self) {
        self.brace_depth += 1;
    }

    pub fn exit_brace(&mut self) {
        self.brace_depth -= 1;
    }

    /// Skips tokens until the parser can plausibly resume: a `;` or a
    /// statement-starting keyword at the depth recording was entered at, or
    /// the `}` that closes the enclosing brace depth.
    pub fn recover(&mut self, cursor: &mut TokenCursor<'_, '_>) {
        let start_depth = self.brace_depth;

        loop {
            match cursor.kind() {
                TokenKind::Eof => break,
                TokenKind::LBrace => {
                    self.enter_brace();
                    cursor.bump();
                }
                TokenKind::RBrace => {
                    if self.brace_depth <= start_depth {
                        break;
                    }
                    self.exit_brace();
                    cursor.bump();
                    if self.brace_depth == start_depth {
                        break;
                    }
                }
                TokenKind::Semicolon if self.brace_depth == start_depth => {
                    cursor.bump();
                    break;
                }
                kind if self.brace_depth == start_depth && is_statement_start_keyword(kind) => {
                    break;
                }
                _ => {
                    cursor.bump();
                }
            }
        }
    }
}
