//! Phase 3: builds the AST from a token stream the syntax analyzer has
//! already accepted (spec §4.3). This pass does not re-validate — on
//! malformed input its behavior is unspecified, per the contract — so it
//! favors straight-line construction over defensive rejection.

use crate::base::Span;
use crate::lexer::{Token, TokenKind};
use crate::syntax::{is_assignment_operator, is_relational_operator, is_var_type_start};
use crate::token_cursor::TokenCursor;

use super::node::{Node, NodeKind};

pub fn generate(tokens: &[Token<'_>]) -> Node {
    let mut gen = Generator::new(tokens);
    gen.program()
}

struct Generator<'t, 'src> {
    cursor: TokenCursor<'t, 'src>,
}

impl<'t, 'src> Generator<'t, 'src> {
    fn new(tokens: &'t [Token<'src>]) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
        }
    }

    fn span(&self) -> Span {
        self.cursor.span()
    }

    /// Consumes the current token and returns its (span, owned text).
    fn bump_text(&mut self) -> (Span, String) {
        let tok = self.cursor.bump();
        (tok.span, tok.text.to_string())
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    // ---- top level ---------------------------------------------------

    fn program(&mut self) -> Node {
        let start = self.span();
        let mut details = Vec::new();
        while !self.cursor.at_eof() {
            details.extend(self.statement());
        }
        Node::new(NodeKind::Runnable, "RUNNABLE", start).with_details(details)
    }

    /// A runnable is brace-delimited or a single statement; either way it
    /// always yields one `Runnable` node (spec §4.3's "Runnable" shape).
    fn runnable(&mut self) -> Node {
        let start = self.span();
        if self.cursor.at(TokenKind::LBrace) {
            self.cursor.bump();
            let mut details = Vec::new();
            while !self.cursor.at(TokenKind::RBrace) && !self.cursor.at_eof() {
                details.extend(self.statement());
            }
            self.eat(TokenKind::RBrace);
            Node::new(NodeKind::Runnable, "RUNNABLE", start).with_details(details)
        } else {
            let details = self.statement();
            Node::new(NodeKind::Runnable, "RUNNABLE", start).with_details(details)
        }
    }

    /// Most statements produce exactly one node; `if`/`try` chains can
    /// splice several sibling nodes into the enclosing runnable's details.
    fn statement(&mut self) -> Vec<Node> {
        match self.cursor.kind() {
            TokenKind::GlobalKw | TokenKind::SecureKw | TokenKind::PrivateKw => {
                let modifier = self.modifier();
                self.modified_statement(modifier)
            }
            TokenKind::VarKw | TokenKind::ConstKw => vec![self.variable_decl(None)],
            TokenKind::IfKw => self.if_chain(),
            TokenKind::WhileKw => vec![self.while_stmt()],
            TokenKind::DoKw => vec![self.do_stmt()],
            TokenKind::ForKw => vec![self.for_stmt()],
            TokenKind::TryKw => self.try_catch(),
            TokenKind::CheckKw => vec![self.check_stmt()],
            TokenKind::IncludeKw => vec![self.include_export(true)],
            TokenKind::ExportKw => vec![self.include_export(false)],
            TokenKind::EnumKw => vec![self.enum_decl()],
            TokenKind::FunctionKw => vec![self.function_decl(None)],
            TokenKind::ClassKw => vec![self.class_decl(None)],
            TokenKind::ThisKw if self.cursor.nth_kind(1) == TokenKind::Colon => {
                vec![self.constructor_decl()]
            }
            TokenKind::BreakKw => {
                let (span, _) = self.bump_text();
                self.eat(TokenKind::Semicolon);
                vec![Node::leaf(NodeKind::Break, "break", span)]
            }
            TokenKind::ContinueKw => {
                let (span, _) = self.bump_text();
                self.eat(TokenKind::Semicolon);
                vec![Node::leaf(NodeKind::Continue, "continue", span)]
            }
            TokenKind::ReturnKw => vec![self.return_stmt()],
            TokenKind::LBrace => vec![self.runnable()],
            _ => vec![self.expression_statement()],
        }
    }

    fn modified_statement(&mut self, modifier: Node) -> Vec<Node> {
        match self.cursor.kind() {
            TokenKind::VarKw | TokenKind::ConstKw => vec![self.variable_decl(Some(modifier))],
            TokenKind::FunctionKw => vec![self.function_decl(Some(modifier))],
            TokenKind::ClassKw => vec![self.class_decl(Some(modifier))],
            _ => self.statement(),
        }
    }

    fn modifier(&mut self) -> Node {
        let (span, text) = self.bump_text();
        Node::leaf(NodeKind::Modifier, text, span)
    }

    fn var_type(&mut self) -> Option<Node> {
        if !self.eat(TokenKind::Colon) {
            return None;
        }
        if is_var_type_start(self.cursor.kind()) {
            let (span, text) = self.bump_text();
            Some(Node::leaf(NodeKind::VarType, text, span))
        } else {
            None
        }
    }

    // ---- declarations --------------------------------------------------

    fn variable_decl(&mut self, modifier: Option<Node>) -> Node {
        let start = self.span();
        let is_const = self.cursor.at(TokenKind::ConstKw);
        self.cursor.bump();

        let var_type = self.var_type();
        let (_, name) = self.bump_text(); // identifier

        let mut dims = Vec::new();
        let mut dim_index = 0u32;
        while self.eat(TokenKind::LBracket) {
            let dim_start = self.span();
            let size = if !self.cursor.at(TokenKind::RBracket) {
                Some(Box::new(self.arithmetic_expr()))
            } else {
                None
            };
            self.eat(TokenKind::RBracket);
            let mut dim_node = Node::new(NodeKind::VarDimension, format!("d:{dim_index}"), dim_start);
            dim_node.right = size;
            dims.push(dim_node);
            dim_index += 1;
        }

        if !self.eat(TokenKind::Eq) {
            self.eat(TokenKind::Semicolon);
            let mut node = Node::new(NodeKind::Var, name, start);
            node.left = modifier.map(Box::new);
            if let Some(vt) = var_type {
                node.details.push(vt);
            }
            return node;
        }

        if !dims.is_empty() {
            let init = self.array_rhs();
            let mut node = Node::new(NodeKind::ArrayVar, name, start);
            node.left = modifier.map(Box::new);
            node.right = Some(Box::new(init));
            if let Some(vt) = var_type {
                node.details.push(vt);
            }
            node.details.extend(dims);
            return node;
        }

        if self.cursor.at(TokenKind::NewKw) {
            let instance = self.class_instance_rhs();
            self.eat(TokenKind::Semicolon);
            let mut node = Node::new(NodeKind::VarClassInstance, name, start);
            node.left = modifier.map(Box::new);
            node.right = Some(Box::new(instance));
            if let Some(vt) = var_type {
                node.details.push(vt);
            }
            return node;
        }

        let rhs = self.ternary();
        self.eat(TokenKind::Semicolon);
        let is_conditional = rhs.kind == NodeKind::CondAssign;
        let mut node = Node::new(
            if is_conditional { NodeKind::CondVar } else { NodeKind::Var },
            name,
            start,
        );
        node.left = modifier.map(Box::new);
        node.right = Some(Box::new(rhs));
        if let Some(vt) = var_type {
            node.details.push(vt);
        }
        let _ = is_const;
        node
    }

    fn array_rhs(&mut self) -> Node {
        if self.cursor.at(TokenKind::LBrace) {
            let node = self.array_assignment_literal(1);
            self.eat(TokenKind::Semicolon);
            node
        } else if self.cursor.at(TokenKind::NewKw) {
            let node = self.class_instance_rhs();
            self.eat(TokenKind::Semicolon);
            node
        } else {
            let node = self.ternary();
            self.eat(TokenKind::Semicolon);
            node
        }
    }

    fn array_assignment_literal(&mut self, depth: u32) -> Node {
        let start = self.span();
        self.cursor.bump(); // {
        let mut details = Vec::new();
        if !self.cursor.at(TokenKind::RBrace) {
            loop {
                let element = if self.cursor.at(TokenKind::LBrace) {
                    self.array_assignment_literal(depth + 1)
                } else {
                    self.ternary()
                };
                details.push(element);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.eat(TokenKind::RBrace);
        Node::new(NodeKind::ArrayAssign, format!("d:{depth}"), start).with_details(details)
    }

    fn class_instance_rhs(&mut self) -> Node {
        let start = self.span();
        self.cursor.bump(); // new
        let (ctor_span, ctor_name) = self.bump_text();
        self.eat(TokenKind::LParen);
        let mut args = Vec::new();
        if !self.cursor.at(TokenKind::RParen) {
            loop {
                args.push(self.ternary());
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.eat(TokenKind::RParen);
        Node::new(NodeKind::Inheritance, ctor_name, ctor_span).with_details(args).also_span(start)
    }

    fn function_decl(&mut self, modifier: Option<Node>) -> Node {
        let start = self.span();
        self.cursor.bump(); // function
        let ret_type = if self.eat(TokenKind::Colon) {
            let (span, text) = self.bump_text();
            Some(Node::leaf(NodeKind::VarType, text, span))
        } else {
            None
        };
        let (_, name) = self.bump_text();
        let params = self.param_list();
        let body = self.runnable();

        let mut details = params;
        details.push(body);
        let mut node = Node::new(NodeKind::Function, name, start).with_details(details);
        node.left = modifier.map(Box::new);
        node.right = ret_type.map(Box::new);
        node
    }

    fn constructor_decl(&mut self) -> Node {
        let start = self.span();
        self.cursor.bump(); // this
        self.eat(TokenKind::Colon);
        self.eat(TokenKind::Colon);
        self.eat(TokenKind::ConstructorKw);
        let params = self.param_list();
        let body = self.runnable();
        let mut details = params;
        details.push(body);
        Node::new(NodeKind::Constructor, "constructor", start).with_details(details)
    }

    fn param_list(&mut self) -> Vec<Node> {
        self.eat(TokenKind::LParen);
        let mut params = Vec::new();
        if !self.cursor.at(TokenKind::RParen) {
            loop {
                params.push(self.param());
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.eat(TokenKind::RParen);
        params
    }

    fn param(&mut self) -> Node {
        let start = self.span();
        if self
            .cursor
            .at_any(&[TokenKind::Pointer, TokenKind::Reference, TokenKind::ReferenceToPointer])
        {
            let kind = if self.cursor.at(TokenKind::Pointer) {
                NodeKind::Pointer
            } else {
                NodeKind::Reference
            };
            let (span, text) = self.bump_text();
            let mut node = Node::leaf(kind, text, span).also_span(start);
            if let Some(vt) = self.var_type() {
                node.details.push(vt);
            }
            return node;
        }

        let (_, name) = self.bump_text();
        let mut dims = 0u32;
        while self.eat(TokenKind::LBracket) {
            self.eat(TokenKind::RBracket);
            dims += 1;
        }
        let var_type = self.var_type();
        let mut node = Node::new(NodeKind::Param, name, start);
        if dims > 0 {
            node.details.push(Node::leaf(
                NodeKind::VarDimension,
                format!("d:{dims}"),
                start,
            ));
        }
        if let Some(vt) = var_type {
            node.details.push(vt);
        }
        node
    }

    fn class_decl(&mut self, modifier: Option<Node>) -> Node {
        let start = self.span();
        self.cursor.bump(); // class
        let (_, name) = self.bump_text();

        let mut details = Vec::new();
        if self.eat(TokenKind::ExtendsKw) {
            let (span, text) = self.bump_text();
            details.push(Node::leaf(NodeKind::Inheritance, text, span));
        }
        if self.eat(TokenKind::WithKw) {
            loop {
                let (span, text) = self.bump_text();
                details.push(Node::leaf(NodeKind::Interface, text, span));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.eat(TokenKind::FatArrow);
        let body = self.runnable();

        let mut node = Node::new(NodeKind::Class, name, start).with_details(details);
        node.left = modifier.map(Box::new);
        node.right = Some(Box::new(body));
        node
    }

    fn enum_decl(&mut self) -> Node {
        let start = self.span();
        self.cursor.bump(); // enum
        let (_, name) = self.bump_text();
        self.eat(TokenKind::LBrace);

        let mut details = Vec::new();
        if !self.cursor.at(TokenKind::RBrace) {
            loop {
                let (entry_span, entry_name) = self.bump_text();
                let mut entry = Node::new(NodeKind::Enumerator, entry_name, entry_span);
                if self.eat(TokenKind::Colon) {
                    let (val_span, val_text) = self.bump_text();
                    entry.right = Some(Box::new(Node::leaf(NodeKind::NumberLiteral, val_text, val_span)));
                }
                details.push(entry);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.eat(TokenKind::RBrace);
        Node::new(NodeKind::Enum, name, start).with_details(details)
    }

    fn include_export(&mut self, is_include: bool) -> Node {
        let start = self.span();
        self.cursor.bump(); // include | export
        let (_, path) = self.bump_text();
        self.eat(TokenKind::Semicolon);
        Node::leaf(
            if is_include { NodeKind::Include } else { NodeKind::Export },
            path,
            start,
        )
    }

    // ---- control flow ----------------------------------------------------

    fn if_chain(&mut self) -> Vec<Node> {
        let mut out = vec![self.if_like(NodeKind::IfStmt)];
        loop {
            if self.cursor.at(TokenKind::ElseKw) && self.cursor.nth_kind(1) == TokenKind::IfKw {
                self.cursor.bump(); // else
                out.push(self.if_like(NodeKind::ElseIfStmt));
            } else if self.cursor.at(TokenKind::ElseKw) {
                let start = self.span();
                self.cursor.bump(); // else
                let body = self.runnable();
                out.push(Node::new(NodeKind::ElseStmt, "else", start).with_right(body));
                break;
            } else {
                break;
            }
        }
        out
    }

    fn if_like(&mut self, kind: NodeKind) -> Node {
        let start = self.span();
        self.cursor.bump(); // if
        self.eat(TokenKind::LParen);
        let cond = self.chained_condition();
        self.eat(TokenKind::RParen);
        let body = self.runnable();
        Node::new(kind, if kind == NodeKind::IfStmt { "if" } else { "else if" }, start)
            .with_left(cond)
            .with_right(body)
    }

    fn while_stmt(&mut self) -> Node {
        let start = self.span();
        self.cursor.bump(); // while
        self.eat(TokenKind::LParen);
        let cond = self.chained_condition();
        self.eat(TokenKind::RParen);
        let body = self.runnable();
        Node::new(NodeKind::WhileStmt, "while", start).with_left(cond).with_right(body)
    }

    fn do_stmt(&mut self) -> Node {
        let start = self.span();
        self.cursor.bump(); // do
        let body = self.runnable();
        self.eat(TokenKind::WhileKw);
        self.eat(TokenKind::LParen);
        let cond = self.chained_condition();
        self.eat(TokenKind::RParen);
        self.eat(TokenKind::Semicolon);
        Node::new(NodeKind::DoStmt, "do", start).with_left(cond).with_right(body)
    }

    fn for_stmt(&mut self) -> Node {
        let start = self.span();
        self.cursor.bump(); // for
        self.eat(TokenKind::LParen);
        let init = self.variable_decl(None);
        let cond = self.chained_condition();
        self.eat(TokenKind::Semicolon);
        let step = self.ternary();
        self.eat(TokenKind::RParen);
        let body = self.runnable();
        Node::new(NodeKind::ForStmt, "for", start)
            .with_left(init)
            .with_right(body)
            .with_details(vec![cond, step])
    }

    fn try_catch(&mut self) -> Vec<Node> {
        let try_start = self.span();
        self.cursor.bump(); // try
        let try_body = self.runnable();
        let try_node = Node::new(NodeKind::TryStmt, "try", try_start).with_detail(try_body);

        let catch_start = self.span();
        self.eat(TokenKind::CatchKw);
        self.eat(TokenKind::LParen);
        let (type_span, type_text) = self.bump_text(); // exception type
        let (name_span, name_text) = self.bump_text(); // exception name
        self.eat(TokenKind::RParen);
        let catch_body = self.runnable();

        let exception_type = Node::leaf(NodeKind::ExceptionType, type_text, type_span);
        let exception_name =
            Node::leaf(NodeKind::ExceptionName, name_text, name_span).with_left(exception_type);
        let catch_node = Node::new(NodeKind::CatchStmt, "catch", catch_start)
            .with_left(exception_name)
            .with_right(catch_body);

        vec![try_node, catch_node]
    }

    fn check_stmt(&mut self) -> Node {
        let start = self.span();
        self.cursor.bump(); // check
        self.eat(TokenKind::LParen);
        let (subject_span, subject) = self.bump_text();
        self.eat(TokenKind::RParen);
        self.eat(TokenKind::LBrace);

        let mut arms = Vec::new();
        while self.cursor.at(TokenKind::IsKw) {
            let is_start = self.span();
            self.cursor.bump(); // is
            let (val_span, val_text) = self.bump_text();
            let value_kind = match self.cursor.kind() {
                _ if val_text.starts_with(|c: char| c.is_ascii_digit()) => NodeKind::NumberLiteral,
                _ => NodeKind::Identifier,
            };
            self.eat(TokenKind::Colon);
            let mut details = Vec::new();
            while !self.cursor.at_any(&[TokenKind::IsKw, TokenKind::RBrace]) && !self.cursor.at_eof() {
                details.extend(self.statement());
            }
            let body = Node::new(NodeKind::Runnable, "RUNNABLE", val_span).with_details(details);
            let is_node = Node::new(NodeKind::IsStmt, "is", is_start)
                .with_left(Node::leaf(value_kind, val_text, val_span))
                .with_right(body);
            arms.push(is_node);
        }
        self.eat(TokenKind::RBrace);

        let body = Node::new(NodeKind::Runnable, "RUNNABLE", start).with_details(arms);
        Node::new(NodeKind::CheckStmt, "check", start)
            .with_left(Node::leaf(NodeKind::Identifier, subject, subject_span))
            .with_right(body)
    }

    fn return_stmt(&mut self) -> Node {
        let start = self.span();
        self.cursor.bump(); // return
        if self.cursor.at(TokenKind::Semicolon) {
            self.cursor.bump();
            return Node::new(NodeKind::Return, "return", start);
        }
        let value = if self.cursor.at(TokenKind::NewKw) {
            self.class_instance_rhs()
        } else {
            self.ternary()
        };
        self.eat(TokenKind::Semicolon);
        Node::new(NodeKind::Return, "return", start).with_left(value)
    }

    // ---- expressions / conditions -----------------------------------

    fn chained_condition(&mut self) -> Node {
        let mut left = self.simple_condition();
        while self.cursor.at_any(&[TokenKind::AndKw, TokenKind::OrKw]) {
            let is_and = self.cursor.at(TokenKind::AndKw);
            let (span, text) = self.bump_text();
            let right = self.simple_condition();
            left = Node::new(if is_and { NodeKind::And } else { NodeKind::Or }, text, span)
                .with_left(left)
                .with_right(right);
        }
        left
    }

    fn simple_condition(&mut self) -> Node {
        if self.eat(TokenKind::LParen) {
            let inner = self.chained_condition();
            self.eat(TokenKind::RParen);
            return inner;
        }

        let left = self.arithmetic_expr();
        if is_relational_operator(self.cursor.kind()) {
            let (span, text) = self.bump_text();
            let right = self.arithmetic_expr();
            Node::new(NodeKind::BinaryCondition, text, span).with_left(left).with_right(right)
        } else {
            left
        }
    }

    fn ternary(&mut self) -> Node {
        let cond = self.chained_condition();
        if self.cursor.at(TokenKind::Question) {
            let start = self.span();
            self.cursor.bump();
            let true_value = Node::new(NodeKind::TrueValue, "true-arm", self.span()).with_left(self.ternary());
            self.eat(TokenKind::Colon);
            let false_value =
                Node::new(NodeKind::FalseValue, "false-arm", self.span()).with_left(self.ternary());
            Node::new(NodeKind::CondAssign, "?", start)
                .with_left(cond)
                .with_details(vec![true_value, false_value])
        } else {
            cond
        }
    }

    fn arithmetic_expr(&mut self) -> Node {
        self.additive()
    }

    fn additive(&mut self) -> Node {
        let mut left = self.multiplicative();
        while self.cursor.at_any(&[TokenKind::Plus, TokenKind::Minus]) {
            let (span, text) = self.bump_text();
            let right = self.multiplicative();
            left = Node::new(NodeKind::BinaryArith, text, span).with_left(left).with_right(right);
        }
        left
    }

    fn multiplicative(&mut self) -> Node {
        let mut left = self.unary();
        while self
            .cursor
            .at_any(&[TokenKind::Star, TokenKind::Slash, TokenKind::Percent])
        {
            let (span, text) = self.bump_text();
            let right = self.unary();
            left = Node::new(NodeKind::BinaryArith, text, span).with_left(left).with_right(right);
        }
        left
    }

    fn unary(&mut self) -> Node {
        if self.cursor.at_any(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) {
            let (span, text) = self.bump_text();
            let operand = self.unary();
            return Node::new(NodeKind::SimpleIncDec, text, span).with_left(operand);
        }
        if self.cursor.at_any(&[TokenKind::Plus, TokenKind::Minus, TokenKind::Bang]) {
            let (span, text) = self.bump_text();
            let operand = self.unary();
            return Node::new(NodeKind::BinaryArith, text, span).with_right(operand);
        }
        self.postfix()
    }

    fn postfix(&mut self) -> Node {
        let mut node = self.primary();
        while self.cursor.at_any(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) {
            let (span, text) = self.bump_text();
            node = Node::new(NodeKind::SimpleIncDec, text, span).with_right(node);
        }
        node
    }

    fn primary(&mut self) -> Node {
        match self.cursor.kind() {
            TokenKind::LParen => {
                self.cursor.bump();
                let inner = self.arithmetic_expr();
                self.eat(TokenKind::RParen);
                inner
            }
            TokenKind::Number => {
                let (span, text) = self.bump_text();
                Node::leaf(NodeKind::NumberLiteral, text, span)
            }
            TokenKind::Float => {
                let (span, text) = self.bump_text();
                Node::leaf(NodeKind::FloatLiteral, text, span)
            }
            TokenKind::Str | TokenKind::CharArray => {
                let (span, text) = self.bump_text();
                Node::leaf(NodeKind::StringLiteral, text, span)
            }
            TokenKind::TrueKw | TokenKind::FalseKw => {
                let (span, text) = self.bump_text();
                Node::leaf(NodeKind::BoolLiteral, text, span)
            }
            TokenKind::NullKw => {
                let (span, text) = self.bump_text();
                Node::leaf(NodeKind::NullLiteral, text, span)
            }
            TokenKind::NewKw => self.class_instance_rhs(),
            TokenKind::Amp => {
                let (span, text) = self.bump_text();
                Node::leaf(NodeKind::Reference, text, span)
            }
            TokenKind::Pointer => {
                let (span, text) = self.bump_text();
                Node::leaf(NodeKind::Pointer, text, span)
            }
            TokenKind::ReferenceToPointer => {
                let (span, text) = self.bump_text();
                Node::leaf(NodeKind::Reference, text, span)
            }
            _ => self.identifier_form(),
        }
    }

    /// A dotted/arrow chain of identifiers, calls, and array indices (spec
    /// §4.3 "Member / access chains").
    fn identifier_form(&mut self) -> Node {
        let (span, text) = self.bump_text(); // Ident | this
        let mut node = self.atom_suffix(Node::leaf(NodeKind::Identifier, text, span));

        loop {
            match self.cursor.kind() {
                TokenKind::Dot => {
                    let (op_span, op_text) = self.bump_text();
                    let (name_span, name_text) = self.bump_text();
                    let rhs = self.atom_suffix(Node::leaf(NodeKind::Identifier, name_text, name_span));
                    node = Node::new(NodeKind::MemberAccess, op_text, op_span).with_left(node).with_right(rhs);
                }
                TokenKind::Arrow => {
                    let (op_span, op_text) = self.bump_text();
                    let (name_span, name_text) = self.bump_text();
                    let rhs = self.atom_suffix(Node::leaf(NodeKind::Identifier, name_text, name_span));
                    node = Node::new(NodeKind::MemClassAcc, op_text, op_span).with_left(node).with_right(rhs);
                }
                _ => break,
            }
        }
        node
    }

    /// Attaches a call or array-index suffix to a freshly read atom.
    fn atom_suffix(&mut self, atom: Node) -> Node {
        if self.cursor.at(TokenKind::LParen) {
            let start = atom.span;
            self.cursor.bump();
            let mut args = Vec::new();
            if !self.cursor.at(TokenKind::RParen) {
                loop {
                    args.push(self.ternary());
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.eat(TokenKind::RParen);
            return Node::new(NodeKind::FunctionCall, atom.value, start).with_details(args);
        }

        let mut node = atom;
        while self.cursor.at(TokenKind::LBracket) {
            let start = node.span;
            self.cursor.bump();
            let index = self.arithmetic_expr();
            self.eat(TokenKind::RBracket);
            node = Node::new(NodeKind::ArrayAccess, "ARR_ACC", start).with_left(node).with_right(index);
        }
        node
    }

    fn expression_statement(&mut self) -> Node {
        let start = self.span();
        let lhs = self.identifier_form();

        if is_assignment_operator(self.cursor.kind()) {
            let (op_span, op_text) = self.bump_text();
            let rhs = if self.cursor.at(TokenKind::NewKw) {
                self.class_instance_rhs()
            } else {
                self.ternary()
            };
            self.eat(TokenKind::Semicolon);
            return Node::new(NodeKind::Assignment, op_text, op_span).with_left(lhs).with_right(rhs);
        }

        self.eat(TokenKind::Semicolon);
        let _ = start;
        lhs
    }
}
