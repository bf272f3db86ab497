//! Phase 1: turns raw source text into a flat token stream (spec §4.1).
//!
//! Tokenizing never allocates — every [`Token`] borrows its lexeme directly
//! from the input buffer — and stops at the first [`LexError`], since later
//! phases assume a token stream with no internal gaps.

mod cursor;
mod error;
mod token;

pub use error::LexError;
pub use token::{keyword_kind, Token, TokenKind};

use cursor::Cursor;

/// Tokenizes `src` in full, returning every token up to and including the
/// trailing [`TokenKind::Eof`], or the first lexical error encountered.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut cursor = Cursor::new(src);
    let mut tokens = Vec::new();

    while let Some(result) = cursor.next_token() {
        let token = result?;
        let is_eof = token.is_eof();
        tokens.push(token);
        if is_eof {
            break;
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src)
            .unwrap_or_else(|e| panic!("tokenize({src:?}) failed: {e}"))
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("var x"),
            vec![TokenKind::VarKw, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn unary_minus_absorbs_into_signed_number_regardless_of_context() {
        // a-1 always lexes as Ident, signed Number(-1) — not Ident, Minus, Number.
        let toks = tokenize("a-1").unwrap();
        assert_eq!(
            toks.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Ident, TokenKind::Number, TokenKind::Eof]
        );
        assert_eq!(toks[1].text, "-1");
    }

    #[test]
    fn unary_minus_absorbs_even_after_an_operand() {
        // the same rule applies after a closing paren, a case real subtraction
        // would want to win, but the language's lexer does not look back.
        let toks = tokenize("(a)-1").unwrap();
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LParen,
                TokenKind::Ident,
                TokenKind::RParen,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn float_literal_requires_digits_on_both_sides_of_the_dot() {
        assert_eq!(
            kinds("3.14"),
            vec![TokenKind::Float, TokenKind::Eof]
        );
        // a bare leading dot is not absorbed into a number.
        assert_eq!(
            kinds(".5"),
            vec![TokenKind::Dot, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn double_operators_are_recognized() {
        assert_eq!(
            kinds("+= -= *= /= == != <= >= ++ -- -> =>"),
            vec![
                TokenKind::PlusEq,
                TokenKind::MinusEq,
                TokenKind::StarEq,
                TokenKind::SlashEq,
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::Arrow,
                TokenKind::FatArrow,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn pointer_run_followed_by_identifier() {
        let toks = tokenize("**ptr").unwrap();
        assert_eq!(toks[0].kind, TokenKind::Pointer);
        assert_eq!(toks[0].text, "**");
        assert_eq!(toks[1].kind, TokenKind::Ident);
    }

    #[test]
    fn pointer_run_before_an_operator_falls_back_to_star() {
        // "a * b" — a single '*' followed by whitespace is never a pointer.
        assert_eq!(
            kinds("a * b"),
            vec![
                TokenKind::Ident,
                TokenKind::Star,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn single_star_before_whitespace_is_ordinary_multiply_not_an_error() {
        // the pointer-run scan is only entered once the byte right after the
        // first `*` is itself non-whitespace/non-digit, so `int* x` never
        // raises an unterminated-pointer error; it just yields a Star token.
        assert_eq!(
            kinds("int* x"),
            vec![
                TokenKind::IntKw,
                TokenKind::Star,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn multi_star_run_ending_before_a_digit_is_an_error() {
        let err = tokenize("x**5").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedPointer { .. }));
    }

    #[test]
    fn lone_ampersand_is_a_reference() {
        assert_eq!(
            kinds("&x"),
            vec![TokenKind::Reference, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn reference_to_pointer_consumes_the_closing_paren() {
        let toks = tokenize("&(*x) y").unwrap();
        assert_eq!(toks[0].kind, TokenKind::ReferenceToPointer);
        assert_eq!(toks[0].text, "&(*x)");
        assert_eq!(toks[1].kind, TokenKind::Ident);
    }

    #[test]
    fn ampersand_paren_without_a_star_is_not_a_reference_to_pointer() {
        // &(x) — the third byte isn't '*', so this is a plain reference
        // followed by an ordinary parenthesized group, not one token.
        assert_eq!(
            kinds("&(x)"),
            vec![
                TokenKind::Reference,
                TokenKind::LParen,
                TokenKind::Ident,
                TokenKind::RParen,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn reference_to_pointer_missing_close_paren_is_an_error() {
        let err = tokenize("&(*x y").unwrap_err();
        assert!(matches!(
            err,
            LexError::UnterminatedReferenceToPointer { .. }
        ));
    }

    #[test]
    fn string_literal_with_escapes() {
        let toks = tokenize(r#""a\"b""#).unwrap();
        assert_eq!(toks[0].kind, TokenKind::Str);
        assert_eq!(toks[0].text, r#""a\"b""#);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = tokenize("\"abc").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }

    #[test]
    fn char_array_literal() {
        assert_eq!(
            kinds("'a'"),
            vec![TokenKind::CharArray, TokenKind::Eof]
        );
    }

    #[test]
    fn line_comment_is_skipped_and_block_comment_spans_lines() {
        let toks = tokenize("var // trailing\nx /* skip\nthis */ y").unwrap();
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::VarKw,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn line_counter_advances_on_newline_but_not_on_lone_cr() {
        let toks = tokenize("a\nb\rc").unwrap();
        assert_eq!(toks[0].span.start.line, 0); // a
        assert_eq!(toks[1].span.start.line, 1); // b, after \n
        assert_eq!(toks[2].span.start.line, 1); // c, \r does not bump the line
    }

    #[test]
    fn unexpected_symbol_is_rejected() {
        let err = tokenize("@").unwrap_err();
        assert!(matches!(err, LexError::UnexpectedSymbol { byte: b'@', .. }));
    }

    #[test]
    fn non_ascii_byte_outside_a_string_is_rejected() {
        let err = tokenize("café").unwrap_err();
        assert!(matches!(err, LexError::NonAsciiByte { .. }));
    }

    #[test]
    fn non_ascii_bytes_inside_a_string_are_fine() {
        assert_eq!(kinds("\"café\""), vec![TokenKind::Str, TokenKind::Eof]);
    }

    #[test]
    fn tokens_are_verbatim_slices_of_the_source_buffer() {
        let src = "var total = 3.14;";
        let toks = tokenize(src).unwrap();
        for tok in &toks {
            if tok.kind != TokenKind::Eof {
                assert_eq!(&src[tok.span.range()], tok.text);
            }
        }
    }
}
