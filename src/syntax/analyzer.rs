//! Predictive recursive-descent validation of a token stream (spec §4.2).
//!
//! This pass never builds a tree — it only decides whether the stream
//! conforms to the grammar, emitting one [`Diagnostic`] per rejected rule
//! and recovering in panic mode so independent errors are reported
//! together rather than one-at-a-time.

use crate::errors::{Diagnostic, ErrorCode};
use crate::lexer::{Token, TokenKind};
use crate::token_cursor::TokenCursor;

use super::context::{is_assignment_operator, is_relational_operator, is_var_type_start};
use super::parse_context::ParseContext;
use super::recovery::RecoveryState;

#[derive(Debug)]
pub struct SyntaxReport {
    pub ok: bool,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn analyze(tokens: &[Token<'_>]) -> SyntaxReport {
    let mut analyzer = Analyzer::new(tokens);
    analyzer.program();
    let ok = !analyzer.diagnostics.iter().any(Diagnostic::is_error);
    SyntaxReport {
        ok,
        diagnostics: analyzer.diagnostics,
    }
}

struct Analyzer<'t, 'src> {
    cursor: TokenCursor<'t, 'src>,
    diagnostics: Vec<Diagnostic>,
    recovery: RecoveryState,
    contexts: Vec<ParseContext>,
}

impl<'t, 'src> Analyzer<'t, 'src> {
    fn new(tokens: &'t [Token<'src>]) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            diagnostics: Vec::new(),
            recovery: RecoveryState::default(),
            contexts: Vec::new(),
        }
    }

    // ---- diagnostics -----------------------------------------------------

    fn current_context(&self) -> ParseContext {
        self.contexts.last().copied().unwrap_or_default()
    }

    /// Runs `f` with `ctx` pushed onto the context stack, popping it again
    /// once `f` returns — regardless of whether `f` accepted or rejected
    /// (spec.md is unaffected either way; this only flavors diagnostics).
    fn in_context<T>(&mut self, ctx: ParseContext, f: impl FnOnce(&mut Self) -> T) -> T {
        self.contexts.push(ctx);
        let result = f(self);
        self.contexts.pop();
        result
    }

    /// Reports a rule rejection at the current token and recovers in panic
    /// mode. Always returns `false` so call sites can `return self.fail(...)`.
    fn fail(&mut self, code: ErrorCode, message: impl Into<String>, expected: Option<&str>) -> bool {
        let ctx = self.current_context();
        let message = match ctx {
            ParseContext::TopLevel => message.into(),
            other => format!("{} ({})", message.into(), other.description()),
        };
        let mut diag = Diagnostic::builder(code).message(message).span(self.cursor.span());
        if let Some(expected) = expected {
            diag = diag.expected(expected.to_string());
        }
        self.diagnostics.push(diag.build());
        self.recovery.recover(&mut self.cursor);
        false
    }

    fn expect(&mut self, kind: TokenKind, code: ErrorCode) -> bool {
        if self.cursor.eat(kind) {
            true
        } else {
            let found = self.cursor.kind().describe();
            self.fail(
                code,
                format!("expected {}, found {found}", kind.describe()),
                Some(kind.describe()),
            )
        }
    }

    // ---- top level ---------------------------------------------------

    fn program(&mut self) {
        while !self.cursor.at_eof() {
            let pos = self.cursor.pos();
            self.statement();
            // A rule that neither advances nor recovers would loop forever;
            // force progress as a last resort.
            if self.cursor.pos() == pos && !self.cursor.at_eof() {
                self.cursor.bump();
            }
        }
    }

    fn block(&mut self) -> bool {
        if self.cursor.at(TokenKind::LBrace) {
            self.cursor.bump();
            self.recovery.enter_brace();
            while !self.cursor.at(TokenKind::RBrace) && !self.cursor.at_eof() {
                let pos = self.cursor.pos();
                self.statement();
                if self.cursor.pos() == pos {
                    self.cursor.bump();
                }
            }
            self.recovery.exit_brace();
            self.expect(TokenKind::RBrace, ErrorCode::E0202)
        } else {
            self.statement()
        }
    }

    fn statement(&mut self) -> bool {
        match self.cursor.kind() {
            TokenKind::GlobalKw | TokenKind::SecureKw | TokenKind::PrivateKw => {
                self.cursor.bump();
                self.statement()
            }
            TokenKind::VarKw | TokenKind::ConstKw => self.variable_decl(),
            TokenKind::IfKw => self.if_stmt(),
            TokenKind::WhileKw => self.while_stmt(),
            TokenKind::DoKw => self.do_stmt(),
            TokenKind::ForKw => self.for_stmt(),
            TokenKind::TryKw => self.try_stmt(),
            TokenKind::CheckKw => self.check_stmt(),
            TokenKind::IncludeKw | TokenKind::ExportKw => self.include_or_export(),
            TokenKind::EnumKw => self.enum_decl(),
            TokenKind::FunctionKw => self.function_decl(),
            TokenKind::ClassKw => self.class_decl(),
            TokenKind::ThisKw => self.constructor_decl(),
            TokenKind::BreakKw => {
                self.cursor.bump();
                self.expect(TokenKind::Semicolon, ErrorCode::E0201)
            }
            TokenKind::ContinueKw => {
                self.cursor.bump();
                self.expect(TokenKind::Semicolon, ErrorCode::E0201)
            }
            TokenKind::ReturnKw => self.return_stmt(),
            TokenKind::LBrace => self.block(),
            TokenKind::Eof => true,
            _ => self.expression_statement(),
        }
    }

    // ---- declarations --------------------------------------------------

    fn var_type(&mut self) -> bool {
        if is_var_type_start(self.cursor.kind()) {
            self.cursor.bump();
            true
        } else {
            self.fail(
                ErrorCode::E0302,
                "expected a type name",
                Some("type name"),
            )
        }
    }

    fn variable_decl(&mut self) -> bool {
        let is_const = self.cursor.at(TokenKind::ConstKw);
        self.cursor.bump(); // var | const

        if self.cursor.eat(TokenKind::Colon) && !self.var_type() {
            return false;
        }

        if !self.expect(TokenKind::Ident, ErrorCode::E0302) {
            return false;
        }

        // Array dimensions: `[` term `]`+
        while self.cursor.eat(TokenKind::LBracket) {
            if !self.cursor.at(TokenKind::RBracket) && !self.arithmetic_expr() {
                return false;
            }
            if !self.expect(TokenKind::RBracket, ErrorCode::E0304) {
                return false;
            }
        }

        if self.cursor.eat(TokenKind::Eq) {
            if self.cursor.at(TokenKind::LBrace) {
                self.array_assignment_literal() && self.expect(TokenKind::Semicolon, ErrorCode::E0201)
            } else if self.cursor.at(TokenKind::NewKw) {
                self.class_instance_rhs()
            } else {
                self.assignment_rhs()
            }
        } else if is_const {
            self.fail(
                ErrorCode::E0301,
                "'const' declared without an initializer",
                Some("'='"),
            )
        } else {
            self.expect(TokenKind::Semicolon, ErrorCode::E0201)
        }
    }

    fn class_instance_rhs(&mut self) -> bool {
        self.cursor.bump(); // new
        if !self.expect(TokenKind::Ident, ErrorCode::E0302) {
            return false;
        }
        if !self.expect(TokenKind::LParen, ErrorCode::E0203) {
            return false;
        }
        if !self.cursor.at(TokenKind::RParen) && !self.arg_list() {
            return false;
        }
        if !self.expect(TokenKind::RParen, ErrorCode::E0203) {
            return false;
        }
        self.expect(TokenKind::Semicolon, ErrorCode::E0201)
    }

    fn array_assignment_literal(&mut self) -> bool {
        self.cursor.bump(); // {
        if !self.cursor.at(TokenKind::RBrace) {
            loop {
                let accepted = if self.cursor.at(TokenKind::LBrace) {
                    self.array_assignment_literal()
                } else {
                    self.assignment_rhs_value()
                };
                if !accepted {
                    return false;
                }
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        if !self.expect(TokenKind::RBrace, ErrorCode::E0304) {
            return false;
        }
        // Only the outermost call should consume the trailing `;`.
        true
    }

    /// The terminal form of an array element or initializer RHS, without a
    /// required trailing semicolon (the enclosing declaration owns that).
    fn assignment_rhs_value(&mut self) -> bool {
        self.ternary()
    }

    /// A full declaration/assignment right-hand side, terminated by `;`.
    fn assignment_rhs(&mut self) -> bool {
        if !self.ternary() {
            return false;
        }
        self.expect(TokenKind::Semicolon, ErrorCode::E0201)
    }

    fn function_decl(&mut self) -> bool {
        self.cursor.bump(); // function
        if self.cursor.eat(TokenKind::Colon) && !self.var_type() {
            return false;
        }
        if !self.expect(TokenKind::Ident, ErrorCode::E0302) {
            return false;
        }
        if !self.in_context(ParseContext::ParamList, Self::param_list) {
            return false;
        }
        self.in_context(ParseContext::FunctionBody, Self::block)
    }

    fn constructor_decl(&mut self) -> bool {
        self.cursor.bump(); // this
        if !self.expect(TokenKind::Colon, ErrorCode::E0303) {
            return false;
        }
        if !self.expect(TokenKind::Colon, ErrorCode::E0303) {
            return false;
        }
        if !self.expect(TokenKind::ConstructorKw, ErrorCode::E0303) {
            return false;
        }
        if !self.in_context(ParseContext::ParamList, Self::param_list) {
            return false;
        }
        self.in_context(ParseContext::ConstructorBody, Self::block)
    }

    fn param_list(&mut self) -> bool {
        if !self.expect(TokenKind::LParen, ErrorCode::E0203) {
            return false;
        }
        if !self.cursor.at(TokenKind::RParen) {
            loop {
                if !self.param() {
                    return false;
                }
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, ErrorCode::E0203)
    }

    /// A parameter is `pointer | reference | IDENT (array-dims)? (":" var-type)?`
    /// (spec §4.2). A pointer/reference/reference-to-pointer token is a
    /// complete parameter by itself — it never takes a following `IDENT`,
    /// unlike a plain named parameter.
    fn param(&mut self) -> bool {
        if self
            .cursor
            .at_any(&[TokenKind::Pointer, TokenKind::Reference, TokenKind::ReferenceToPointer])
        {
            self.cursor.bump();
        } else {
            if !self.expect(TokenKind::Ident, ErrorCode::E0303) {
                return false;
            }
            while self.cursor.eat(TokenKind::LBracket) {
                if !self.expect(TokenKind::RBracket, ErrorCode::E0304) {
                    return false;
                }
            }
        }
        if self.cursor.eat(TokenKind::Colon) && !self.var_type() {
            return false;
        }
        true
    }

    fn class_decl(&mut self) -> bool {
        self.cursor.bump(); // class
        if !self.expect(TokenKind::Ident, ErrorCode::E0302) {
            return false;
        }
        if self.cursor.eat(TokenKind::ExtendsKw) && !self.expect(TokenKind::Ident, ErrorCode::E0302) {
            return false;
        }
        if self.cursor.eat(TokenKind::WithKw) {
            loop {
                if !self.expect(TokenKind::Ident, ErrorCode::E0302) {
                    return false;
                }
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        if !self.expect(TokenKind::FatArrow, ErrorCode::E0303) {
            return false;
        }
        self.in_context(ParseContext::ClassBody, Self::block)
    }

    fn enum_decl(&mut self) -> bool {
        self.cursor.bump(); // enum
        if !self.expect(TokenKind::Ident, ErrorCode::E0302) {
            return false;
        }
        if !self.expect(TokenKind::LBrace, ErrorCode::E0202) {
            return false;
        }
        self.recovery.enter_brace();
        if !self.cursor.at(TokenKind::RBrace) {
            loop {
                if !self.expect(TokenKind::Ident, ErrorCode::E0305) {
                    self.recovery.exit_brace();
                    return false;
                }
                if self.cursor.eat(TokenKind::Colon) && !self.expect(TokenKind::Number, ErrorCode::E0305) {
                    self.recovery.exit_brace();
                    return false;
                }
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.recovery.exit_brace();
        self.expect(TokenKind::RBrace, ErrorCode::E0202)
    }

    fn include_or_export(&mut self) -> bool {
        self.cursor.bump(); // include | export
        if !self.expect(TokenKind::Str, ErrorCode::E0302) {
            return false;
        }
        self.expect(TokenKind::Semicolon, ErrorCode::E0201)
    }

    // ---- control flow ----------------------------------------------------

    fn if_stmt(&mut self) -> bool {
        self.cursor.bump(); // if
        if !self.paren_condition() {
            return false;
        }
        if !self.block() {
            return false;
        }
        if self.cursor.at(TokenKind::ElseKw) {
            self.cursor.bump();
            if self.cursor.at(TokenKind::IfKw) {
                self.if_stmt()
            } else {
                self.block()
            }
        } else {
            true
        }
    }

    fn while_stmt(&mut self) -> bool {
        self.cursor.bump(); // while
        self.paren_condition() && self.block()
    }

    fn do_stmt(&mut self) -> bool {
        self.cursor.bump(); // do
        if !self.block() {
            return false;
        }
        if !self.expect(TokenKind::WhileKw, ErrorCode::E0501) {
            return false;
        }
        if !self.paren_condition() {
            return false;
        }
        self.expect(TokenKind::Semicolon, ErrorCode::E0201)
    }

    fn for_stmt(&mut self) -> bool {
        self.cursor.bump(); // for
        if !self.expect(TokenKind::LParen, ErrorCode::E0203) {
            return false;
        }
        let header_ok = self.in_context(ParseContext::ForHeader, |a| {
            if !a.variable_decl() {
                return false;
            }
            if !a.chained_condition() {
                return false;
            }
            if !a.expect(TokenKind::Semicolon, ErrorCode::E0201) {
                return false;
            }
            a.expression_no_semicolon()
        });
        if !header_ok {
            return false;
        }
        if !self.expect(TokenKind::RParen, ErrorCode::E0203) {
            return false;
        }
        self.block()
    }

    fn try_stmt(&mut self) -> bool {
        self.cursor.bump(); // try
        if !self.in_context(ParseContext::TryBody, Self::block) {
            return false;
        }
        if !self.expect(TokenKind::CatchKw, ErrorCode::E0502) {
            return false;
        }
        if !self.expect(TokenKind::LParen, ErrorCode::E0203) {
            return false;
        }
        if !self.var_type() {
            return false;
        }
        if !self.expect(TokenKind::Ident, ErrorCode::E0302) {
            return false;
        }
        if !self.expect(TokenKind::RParen, ErrorCode::E0203) {
            return false;
        }
        self.in_context(ParseContext::CatchBody, Self::block)
    }

    fn check_stmt(&mut self) -> bool {
        self.cursor.bump(); // check
        if !self.expect(TokenKind::LParen, ErrorCode::E0203) {
            return false;
        }
        if !self.expect(TokenKind::Ident, ErrorCode::E0302) {
            return false;
        }
        if !self.expect(TokenKind::RParen, ErrorCode::E0203) {
            return false;
        }
        if !self.expect(TokenKind::LBrace, ErrorCode::E0202) {
            return false;
        }
        self.recovery.enter_brace();
        let body_ok = self.in_context(ParseContext::CheckBody, |a| {
            while a.cursor.at(TokenKind::IsKw) {
                a.cursor.bump();
                let value_ok = matches!(
                    a.cursor.kind(),
                    TokenKind::Number | TokenKind::Float | TokenKind::Str | TokenKind::Ident
                );
                if !value_ok {
                    a.fail(ErrorCode::E0503, "expected a literal or identifier after 'is'", Some("literal"));
                    return false;
                }
                a.cursor.bump();
                if !a.expect(TokenKind::Colon, ErrorCode::E0503) {
                    return false;
                }
                while !a.cursor.at_any(&[TokenKind::IsKw, TokenKind::RBrace]) && !a.cursor.at_eof() {
                    let pos = a.cursor.pos();
                    a.statement();
                    if a.cursor.pos() == pos {
                        a.cursor.bump();
                    }
                }
            }
            true
        });
        self.recovery.exit_brace();
        if !body_ok {
            return false;
        }
        self.expect(TokenKind::RBrace, ErrorCode::E0202)
    }

    fn return_stmt(&mut self) -> bool {
        self.cursor.bump(); // return
        if self.cursor.at(TokenKind::Semicolon) {
            self.cursor.bump();
            return true;
        }
        if self.cursor.at(TokenKind::NewKw) {
            return self.class_instance_rhs();
        }
        self.assignment_rhs()
    }

    // ---- expressions / conditions -----------------------------------

    /// A condition in parentheses, as used by `if`/`while`/`do-while`.
    fn paren_condition(&mut self) -> bool {
        if !self.expect(TokenKind::LParen, ErrorCode::E0203) {
            return false;
        }
        if !self.chained_condition() {
            return false;
        }
        self.expect(TokenKind::RParen, ErrorCode::E0203)
    }

    /// Tracks a running open-bracket count to decide whether `(` opens a
    /// logical group or an arithmetic grouping (spec §4.2 "Condition
    /// prediction"); a mismatch is reported as "expected ')'".
    fn chained_condition(&mut self) -> bool {
        if !self.simple_condition() {
            return false;
        }
        while self.cursor.at_any(&[TokenKind::AndKw, TokenKind::OrKw]) {
            self.cursor.bump();
            if !self.simple_condition() {
                return false;
            }
        }
        true
    }

    fn simple_condition(&mut self) -> bool {
        // A `(` here opens a logical group rather than an arithmetic one;
        // recursion (not a manual bracket counter) tracks the nesting, since
        // each nested `(` is fully matched by the recursive call before this
        // frame looks for its own closing `)`.
        if self.cursor.eat(TokenKind::LParen) {
            if !self.chained_condition() {
                return false;
            }
            if !self.cursor.eat(TokenKind::RParen) {
                return self.fail(ErrorCode::E0402, "unbalanced parenthesis in condition", Some("')'"));
            }
            return true;
        }

        if !self.arithmetic_expr() {
            return false;
        }
        if is_relational_operator(self.cursor.kind()) {
            self.cursor.bump();
            if !self.arithmetic_expr() {
                return false;
            }
        }
        true
    }

    fn ternary(&mut self) -> bool {
        if !self.chained_condition() {
            return false;
        }
        if self.cursor.eat(TokenKind::Question) {
            if !self.ternary() {
                return false;
            }
            if !self.expect(TokenKind::Colon, ErrorCode::E0403) {
                return false;
            }
            if !self.ternary() {
                return false;
            }
        }
        true
    }

    fn arithmetic_expr(&mut self) -> bool {
        self.additive()
    }

    fn additive(&mut self) -> bool {
        if !self.multiplicative() {
            return false;
        }
        while self.cursor.at_any(&[TokenKind::Plus, TokenKind::Minus]) {
            self.cursor.bump();
            if !self.multiplicative() {
                return false;
            }
        }
        true
    }

    fn multiplicative(&mut self) -> bool {
        if !self.unary() {
            return false;
        }
        while self
            .cursor
            .at_any(&[TokenKind::Star, TokenKind::Slash, TokenKind::Percent])
        {
            self.cursor.bump();
            if !self.unary() {
                return false;
            }
        }
        true
    }

    fn unary(&mut self) -> bool {
        if self
            .cursor
            .at_any(&[TokenKind::Plus, TokenKind::Minus, TokenKind::Bang, TokenKind::PlusPlus, TokenKind::MinusMinus])
        {
            self.cursor.bump();
            return self.unary();
        }
        self.postfix()
    }

    fn postfix(&mut self) -> bool {
        if !self.primary() {
            return false;
        }
        while self.cursor.at_any(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) {
            self.cursor.bump();
        }
        true
    }

    fn primary(&mut self) -> bool {
        match self.cursor.kind() {
            TokenKind::LParen => {
                self.cursor.bump();
                if !self.arithmetic_expr() {
                    return false;
                }
                self.expect(TokenKind::RParen, ErrorCode::E0203)
            }
            TokenKind::Number
            | TokenKind::Float
            | TokenKind::Str
            | TokenKind::CharArray
            | TokenKind::TrueKw
            | TokenKind::FalseKw
            | TokenKind::NullKw => {
                self.cursor.bump();
                true
            }
            TokenKind::NewKw => {
                self.cursor.bump();
                if !self.expect(TokenKind::Ident, ErrorCode::E0302) {
                    return false;
                }
                if !self.expect(TokenKind::LParen, ErrorCode::E0203) {
                    return false;
                }
                if !self.cursor.at(TokenKind::RParen) && !self.arg_list() {
                    return false;
                }
                self.expect(TokenKind::RParen, ErrorCode::E0203)
            }
            TokenKind::Amp | TokenKind::Reference | TokenKind::Pointer | TokenKind::ReferenceToPointer => {
                self.cursor.bump();
                self.identifier_form()
            }
            TokenKind::ThisKw | TokenKind::Ident => self.identifier_form(),
            _ => self.fail(
                ErrorCode::E0401,
                format!("expected an expression, found {}", self.cursor.kind().describe()),
                Some("expression"),
            ),
        }
    }

    /// A dotted/arrow chain of identifiers, calls, and array indices (spec
    /// §4.2 "Identifier form").
    fn identifier_form(&mut self) -> bool {
        if !self.expect_identifier_like() {
            return false;
        }

        loop {
            if self.cursor.eat(TokenKind::LParen) {
                if !self.cursor.at(TokenKind::RParen) && !self.arg_list() {
                    return false;
                }
                if !self.expect(TokenKind::RParen, ErrorCode::E0203) {
                    return false;
                }
            }
            while self.cursor.eat(TokenKind::LBracket) {
                if !self.arithmetic_expr() {
                    return false;
                }
                if !self.expect(TokenKind::RBracket, ErrorCode::E0304) {
                    return false;
                }
            }

            if self.cursor.at_any(&[TokenKind::Dot, TokenKind::Arrow]) {
                self.cursor.bump();
                if !self.expect_identifier_like() {
                    return false;
                }
                continue;
            }
            break;
        }
        true
    }

    fn expect_identifier_like(&mut self) -> bool {
        if self.cursor.at_any(&[TokenKind::Ident, TokenKind::ThisKw]) {
            self.cursor.bump();
            true
        } else {
            self.expect(TokenKind::Ident, ErrorCode::E0302)
        }
    }

    fn arg_list(&mut self) -> bool {
        loop {
            if !self.ternary() {
                return false;
            }
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        true
    }

    /// An expression with no required trailing `;` — used for a `for`
    /// loop's step clause.
    fn expression_no_semicolon(&mut self) -> bool {
        self.ternary()
    }

    fn expression_statement(&mut self) -> bool {
        if !self.identifier_form() {
            return false;
        }
        if is_assignment_operator(self.cursor.kind()) {
            self.cursor.bump();
            if self.cursor.at(TokenKind::NewKw) {
                return self.class_instance_rhs();
            }
            return self.assignment_rhs();
        }
        self.expect(TokenKind::Semicolon, ErrorCode::E0201)
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
