//! The hand-rolled scanner that drives [`Token`] production from raw source
//! bytes (spec §4.1). Unlike a regex-table lexer, several token shapes here
//! depend on one or two bytes of lookahead — pointer runs, `&(*…)`, and the
//! unary-minus-absorption rule all need it — so tokenizing is a manual byte
//! walk rather than a generated state machine.

use text_size::TextSize;

use crate::base::Span;

use super::error::LexError;
use super::token::{keyword_kind, Token, TokenKind};

/// Byte pairs recognized as a single two-character operator token (spec
/// §4.1.3). Checked before falling back to the single-character table.
const DOUBLE_OPERATORS: &[(u8, u8, TokenKind)] = &[
    (b'+', b'=', TokenKind::PlusEq),
    (b'-', b'=', TokenKind::MinusEq),
    (b'*', b'=', TokenKind::StarEq),
    (b'/', b'=', TokenKind::SlashEq),
    (b'=', b'=', TokenKind::EqEq),
    (b'!', b'=', TokenKind::BangEq),
    (b'<', b'=', TokenKind::LtEq),
    (b'>', b'=', TokenKind::GtEq),
    (b'+', b'+', TokenKind::PlusPlus),
    (b'-', b'-', TokenKind::MinusMinus),
    (b'-', b'>', TokenKind::Arrow),
    (b'=', b'>', TokenKind::FatArrow),
];

fn is_operator_byte(b: u8) -> bool {
    matches!(
        b,
        b'+' | b'-'
            | b'*'
            | b'/'
            | b'%'
            | b'.'
            | b','
            | b';'
            | b':'
            | b'?'
            | b'('
            | b')'
            | b'{'
            | b'}'
            | b'['
            | b']'
            | b'='
            | b'<'
            | b'>'
            | b'!'
            | b'&'
            | b'$'
    )
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn single_operator_kind(b: u8) -> Option<TokenKind> {
    Some(match b {
        b'+' => TokenKind::Plus,
        b'-' => TokenKind::Minus,
        b'*' => TokenKind::Star,
        b'/' => TokenKind::Slash,
        b'%' => TokenKind::Percent,
        b'.' => TokenKind::Dot,
        b',' => TokenKind::Comma,
        b';' => TokenKind::Semicolon,
        b':' => TokenKind::Colon,
        b'?' => TokenKind::Question,
        b'(' => TokenKind::LParen,
        b')' => TokenKind::RParen,
        b'{' => TokenKind::LBrace,
        b'}' => TokenKind::RBrace,
        b'[' => TokenKind::LBracket,
        b']' => TokenKind::RBracket,
        b'=' => TokenKind::Eq,
        b'<' => TokenKind::Lt,
        b'>' => TokenKind::Gt,
        b'!' => TokenKind::Bang,
        b'&' => TokenKind::Amp,
        b'$' => TokenKind::Dollar,
        _ => return None,
    })
}

/// Walks a source buffer byte-by-byte, producing one [`Token`] per call to
/// [`Cursor::next_token`]. Positions are tracked in bytes; `\n` advances the
/// line counter, a lone `\r` does not (spec §6.2).
pub struct Cursor<'src> {
    src: &'src str,
    bytes: &'src [u8],
    pos: usize,
    line: u32,
    line_start: usize,
    done: bool,
}

impl<'src> Cursor<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 0,
            line_start: 0,
            done: false,
        }
    }

    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    fn current(&self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.byte_at(self.pos + ahead)
    }

    fn position(&self, offset: usize) -> crate::base::Position {
        crate::base::Position {
            line: self.line,
            column: (offset - self.line_start) as u32,
            offset: (offset as u32).into(),
        }
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(self.position(start), TextSize::from((self.pos - start) as u32))
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.current()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(b)
    }

    fn make_token(&self, kind: TokenKind, start: usize) -> Token<'src> {
        Token::new(kind, &self.src[start..self.pos], self.span_from(start))
    }

    /// Skips whitespace and comments. Returns `true` if anything was
    /// skipped, so the caller can loop until a real token boundary.
    fn skip_trivia(&mut self) -> bool {
        let start = self.pos;

        loop {
            match self.current() {
                Some(b) if b == b' ' || b == b'\t' || b == b'\r' || b == b'\n' => {
                    self.bump();
                }
                Some(b'/') if self.peek(1) == Some(b'/') => {
                    while !matches!(self.current(), None | Some(b'\n')) {
                        self.bump();
                    }
                }
                Some(b'/') if self.peek(1) == Some(b'*') => {
                    self.bump();
                    self.bump();
                    while let Some(b) = self.current() {
                        if b == b'*' && self.peek(1) == Some(b'/') {
                            self.bump();
                            self.bump();
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }

        self.pos != start
    }

    fn scan_ident(&mut self, start: usize) -> Token<'src> {
        while self.current().is_some_and(is_ident_continue) {
            self.bump();
        }
        let text = &self.src[start..self.pos];
        self.make_token(keyword_kind(text), start)
    }

    fn scan_number(&mut self, start: usize) -> Token<'src> {
        while self.current().is_some_and(|b| b.is_ascii_digit()) {
            self.bump();
        }

        let mut is_float = false;
        if self.current() == Some(b'.') && self.peek(1).is_some_and(|b| b.is_ascii_digit()) {
            is_float = true;
            self.bump();
            while self.current().is_some_and(|b| b.is_ascii_digit()) {
                self.bump();
            }
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Number
        };
        self.make_token(kind, start)
    }

    fn scan_string(&mut self, start: usize, quote: u8) -> Result<Token<'src>, LexError> {
        self.bump(); // opening quote
        loop {
            match self.current() {
                None => {
                    return Err(LexError::UnterminatedString {
                        span: self.span_from(start),
                    })
                }
                Some(b'\\') => {
                    self.bump();
                    if self.current().is_some() {
                        self.bump();
                    }
                }
                Some(b) if b == quote => {
                    self.bump();
                    break;
                }
                _ => {
                    self.bump();
                }
            }
        }
        let kind = if quote == b'\'' {
            TokenKind::CharArray
        } else {
            TokenKind::Str
        };
        Ok(self.make_token(kind, start))
    }

    /// A run of `*` is a pointer token only when it is immediately followed
    /// by a non-whitespace, non-digit, non-operator byte (spec §4.1.4). If
    /// it is followed by whitespace or a digit the run is malformed and
    /// raises [`LexError::UnterminatedPointer`]; if it is followed by
    /// another operator byte the run is ordinary `*` arithmetic instead.
    fn try_pointer(&mut self, start: usize) -> Result<Option<Token<'src>>, LexError> {
        let mut run_end = start;
        while self.byte_at(run_end) == Some(b'*') {
            run_end += 1;
        }

        match self.byte_at(run_end) {
            None => Err(LexError::UnterminatedPointer {
                span: self.span_from(start),
            }),
            Some(b) if b == b' ' || b == b'\t' || b == b'\r' || b == b'\n' || b.is_ascii_digit() => {
                Err(LexError::UnterminatedPointer {
                    span: self.span_from(start),
                })
            }
            Some(b) if is_operator_byte(b) => Ok(None),
            Some(_) => {
                while self.pos < run_end {
                    self.bump();
                }
                Ok(Some(self.make_token(TokenKind::Pointer, start)))
            }
        }
    }

    /// `&(*…)` is one reference-to-pointer token; the closing `)` is
    /// consumed. A missing `)` before whitespace or EOF is a lexer error
    /// (spec §4.1.4, confirmed against the reference implementation's
    /// `&(` scan), not a silent fallback to a plain reference token.
    fn try_reference_to_pointer(&mut self, start: usize) -> Result<Option<Token<'src>>, LexError> {
        if self.peek(1) != Some(b'(') || self.peek(2) != Some(b'*') {
            return Ok(None);
        }

        let mut i = 2;
        loop {
            match self.byte_at(start + i) {
                Some(b')') => {
                    while self.pos < start + i + 1 {
                        self.bump();
                    }
                    return Ok(Some(self.make_token(TokenKind::ReferenceToPointer, start)));
                }
                Some(b) if b == b' ' || b == b'\t' || b == b'\r' || b == b'\n' => {
                    return Err(LexError::UnterminatedReferenceToPointer {
                        span: self.span_from(start),
                    })
                }
                None => {
                    return Err(LexError::UnterminatedReferenceToPointer {
                        span: self.span_from(start),
                    })
                }
                Some(_) => i += 1,
            }
        }
    }

    fn scan_operator(&mut self, start: usize) -> Result<Token<'src>, LexError> {
        let b = self.current().expect("scan_operator called at EOF");

        // Only attempt the pointer-run scan when the byte right after this
        // `*` is itself not whitespace/a digit — `a * b` never enters the
        // run scan at all, so "a" times "b" stays a plain `Star` token with
        // no error. A run that *does* enter the scan can still end in an
        // unterminated-pointer error once the whole run is accounted for,
        // e.g. `** x` or `**5`.
        if b == b'*' && self.peek(1).is_some_and(|n| !(n == b' ' || n == b'\t' || n == b'\r' || n == b'\n' || n.is_ascii_digit()))
        {
            if let Some(tok) = self.try_pointer(start)? {
                return Ok(tok);
            }
        }

        if b == b'-' && self.peek(1).is_some_and(|n| n.is_ascii_digit()) {
            self.bump();
            return Ok(self.scan_number(start));
        }

        if b == b'&' {
            if let Some(tok) = self.try_reference_to_pointer(start)? {
                return Ok(tok);
            }
            self.bump();
            return Ok(self.make_token(TokenKind::Reference, start));
        }

        if let Some(next) = self.peek(1) {
            if let Some(&(_, _, kind)) = DOUBLE_OPERATORS
                .iter()
                .find(|&&(a, c, _)| a == b && c == next)
            {
                self.bump();
                self.bump();
                return Ok(self.make_token(kind, start));
            }
        }

        let kind = single_operator_kind(b).ok_or_else(|| LexError::UnexpectedSymbol {
            byte: b,
            span: self.span_from(start),
        })?;
        self.bump();
        Ok(self.make_token(kind, start))
    }

    /// Produces the next token, or `None` once the EOF token has been
    /// returned. Returns `Err` and leaves the cursor positioned at the
    /// offending byte on a lexical error; the caller treats this as fatal
    /// (spec §7) and does not call `next_token` again.
    pub fn next_token(&mut self) -> Option<Result<Token<'src>, LexError>> {
        if self.done {
            return None;
        }

        self.skip_trivia();

        let start = self.pos;
        let Some(b) = self.current() else {
            self.done = true;
            return Some(Ok(Token::new(
                TokenKind::Eof,
                "",
                Span::empty(self.position(start)),
            )));
        };

        if b == b'"' || b == b'\'' {
            return Some(self.scan_string(start, b).inspect_err(|_| self.done = true));
        }

        if is_ident_start(b) {
            return Some(Ok(self.scan_ident(start)));
        }

        if b.is_ascii_digit() {
            return Some(Ok(self.scan_number(start)));
        }

        if is_operator_byte(b) {
            return Some(self.scan_operator(start).inspect_err(|_| self.done = true));
        }

        if !b.is_ascii() {
            self.done = true;
            return Some(Err(LexError::NonAsciiByte {
                byte: b,
                span: self.span_from(start),
            }));
        }

        self.done = true;
        Some(Err(LexError::UnexpectedSymbol {
            byte: b,
            span: self.span_from(start),
        }))
    }
}
