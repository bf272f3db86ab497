//! A read-only cursor over a validated token slice, shared by the syntax
//! analyzer and the parse-tree generator so neither reimplements
//! peek/bump/lookahead bookkeeping (spec §4.2, §4.3 are deliberately two
//! separate passes over the same token vector).

use crate::base::Span;
use crate::lexer::{Token, TokenKind};

#[derive(Debug, Clone)]
pub struct TokenCursor<'t, 'src> {
    tokens: &'t [Token<'src>],
    pos: usize,
}

impl<'t, 'src> TokenCursor<'t, 'src> {
    /// `tokens` must end with an `Eof` token, as the lexer guarantees.
    pub fn new(tokens: &'t [Token<'src>]) -> Self {
        debug_assert!(
            tokens.last().is_some_and(Token::is_eof),
            "token stream must end with Eof"
        );
        Self { tokens, pos: 0 }
    }

    fn clamped(&self, idx: usize) -> &'t Token<'src> {
        self.tokens.get(idx).unwrap_or_else(|| self.tokens.last().expect("non-empty token stream"))
    }

    pub fn current(&self) -> &'t Token<'src> {
        self.clamped(self.pos)
    }

    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    pub fn text(&self) -> &'src str {
        self.current().text
    }

    pub fn span(&self) -> Span {
        self.current().span
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind())
    }

    pub fn at_eof(&self) -> bool {
        self.kind() == TokenKind::Eof
    }

    /// The kind of the `n`th token ahead without consuming anything; `n = 0`
    /// is equivalent to `kind()`.
    pub fn nth_kind(&self, n: usize) -> TokenKind {
        self.clamped(self.pos + n).kind
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len().saturating_sub(1));
    }

    /// Consumes and returns the current token, unless already at EOF (EOF
    /// never advances further so callers can always call `bump` safely).
    pub fn bump(&mut self) -> &'t Token<'src> {
        let tok = self.clamped(self.pos);
        if !tok.is_eof() {
            self.pos += 1;
        }
        tok
    }

    /// Consumes the current token if it matches `kind`, returning whether it did.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }
}
