//! Grammar predicates shared by the syntax analyzer and the parse-tree
//! generator — both passes need to recognize "does a statement start here"
//! and "is this a visibility modifier" the same way (spec §4.2).

use crate::lexer::TokenKind;

pub fn is_statement_start_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::VarKw
            | TokenKind::ConstKw
            | TokenKind::IfKw
            | TokenKind::ElseKw
            | TokenKind::WhileKw
            | TokenKind::DoKw
            | TokenKind::ForKw
            | TokenKind::TryKw
            | TokenKind::CatchKw
            | TokenKind::CheckKw
            | TokenKind::IncludeKw
            | TokenKind::ExportKw
            | TokenKind::EnumKw
            | TokenKind::FunctionKw
            | TokenKind::ClassKw
            | TokenKind::ThisKw
            | TokenKind::BreakKw
            | TokenKind::ReturnKw
            | TokenKind::ContinueKw
            | TokenKind::GlobalKw
            | TokenKind::SecureKw
            | TokenKind::PrivateKw
    )
}

pub fn is_visibility_modifier(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::GlobalKw | TokenKind::SecureKw | TokenKind::PrivateKw
    )
}

/// Relational operators usable inside a simple condition (spec §4.2 table,
/// precedence level 3).
pub fn is_relational_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::EqEq
            | TokenKind::BangEq
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
    )
}

/// Assignment-family operators, precedence level 6 (right-associative).
pub fn is_assignment_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eq
            | TokenKind::PlusEq
            | TokenKind::MinusEq
            | TokenKind::StarEq
            | TokenKind::SlashEq
    )
}

pub fn is_var_type_start(kind: TokenKind) -> bool {
    kind.is_primitive_type() || kind == TokenKind::Ident
}
