//! spacelang front-end: lexer, syntax analyzer, parse-tree generator, and
//! semantic analyzer (spec §1, §2). Back end / code generation is out of
//! scope — this crate only decides whether a source file is well-formed and
//! hands back the tree and symbol table a back end would consume.

pub mod ast;
pub mod base;
pub mod diagnostics;
pub mod errors;
pub mod lexer;
pub mod semantic;
pub mod syntax;
mod token_cursor;

use thiserror::Error;

use crate::ast::Node;
use crate::errors::Diagnostic;
use crate::lexer::LexError;
use crate::semantic::{SemanticError, SymbolTable};

/// Top-level failure of the four-phase pipeline (spec §7). Mirrors the
/// teacher's `InterchangeError` pattern: one `thiserror` enum wrapping each
/// subsystem's own error type, with `#[from]` conversions so `?` composes
/// across phases.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("{} syntax error(s)", .0.len())]
    Syntax(Vec<Diagnostic>),

    #[error("{} semantic error(s)", .0.len())]
    Semantic(Vec<SemanticError>),
}

impl CompileError {
    /// Flattens whichever phase failed into the shared [`Diagnostic`] shape
    /// the renderer in [`crate::diagnostics`] expects.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Self::Lex(e) => vec![e.to_diagnostic()],
            Self::Syntax(diags) => diags.clone(),
            Self::Semantic(errs) => errs.iter().map(SemanticError::to_diagnostic).collect(),
        }
    }
}

/// The result of a clean compile: the AST and the symbol table the semantic
/// analyzer built while walking it.
pub struct CompileOutput {
    pub ast: Node,
    pub symbols: SymbolTable,
}

/// Runs all four phases over `src` in order, stopping at the first phase
/// that rejects the input (spec §2's pipeline, spec §7's fail-fast
/// propagation). The syntax analyzer's own panic-mode recovery lets it
/// collect more than one diagnostic per run; lexing and semantic analysis
/// each surface every diagnostic they found before returning.
pub fn compile(src: &str) -> Result<CompileOutput, CompileError> {
    let tokens = lexer::tokenize(src)?;
    tracing::trace!(tokens = tokens.len(), "lexed source");

    let syntax_report = syntax::analyze(&tokens);
    if !syntax_report.ok {
        tracing::debug!(errors = syntax_report.diagnostics.len(), "syntax analysis rejected input");
        return Err(CompileError::Syntax(syntax_report.diagnostics));
    }

    let ast = ast::generate(&tokens);
    tracing::trace!(nodes = ast.descendant_count(), "generated AST");

    let semantic_report = semantic::analyze(&ast);
    if !semantic_report.is_ok() {
        tracing::debug!(errors = semantic_report.errors.len(), "semantic analysis rejected input");
        return Err(CompileError::Semantic(semantic_report.errors));
    }

    Ok(CompileOutput {
        ast,
        symbols: semantic_report.table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_a_well_formed_program() {
        let src = "class Vehicle => { var wheels = 4; function go() { return wheels; } }";
        let output = compile(src).expect("should compile");
        assert!(output.ast.descendant_count() > 1);
    }

    #[test]
    fn reports_lex_errors_first() {
        let result = compile("var x = @;");
        assert!(matches!(result, Err(CompileError::Lex(_))));
    }

    #[test]
    fn reports_syntax_errors_before_running_semantic_analysis() {
        let result = compile("var x = ;");
        assert!(matches!(result, Err(CompileError::Syntax(_))));
    }

    #[test]
    fn reports_semantic_errors_on_redeclaration() {
        let result = compile("var x = 1; var x = 2;");
        assert!(matches!(result, Err(CompileError::Semantic(_))));
    }
}
