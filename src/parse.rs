//! Recursive-descent parser for the analyzed Java subset.
//!
//! Parsing is total. Constructs the analysis has no semantics for (loops,
//! try/catch, casts, ternaries, object creation, ...) are reduced to `Other`
//! nodes, and anything unexpected is skipped token by token; the parser never
//! fails a run.

use crate::ast::{
    AssignExpr, BinaryExpr, BinaryOp, Block, CallExpr, ClassDecl, CompilationUnit, Declarator,
    Expr, ExprStmt, FieldAccessExpr, IfStmt, LiteralExpr, LiteralKind, MethodDecl, NameExpr,
    ParamDecl, ParenExpr, Span, Stmt, SwitchEntry, SwitchStmt, UnaryExpr, UnaryOp, VarDeclExpr,
};
use crate::lexer::{Lexer, Token, TokenKind};
use tracing::debug;

pub(crate) fn parse_unit(text: &str) -> CompilationUnit {
    let tokens: Vec<Token> = Lexer::new(text).collect();
    Parser::new(tokens).parse_compilation_unit()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Parser {
        Parser { tokens, pos: 0 }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_n(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    fn at_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|token| token.kind == kind)
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.peek()
            .is_some_and(|token| token.kind == TokenKind::Ident && token.text == keyword)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        Some(token)
    }

    fn eat_kind(&mut self, kind: TokenKind) -> bool {
        if self.at_kind(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes one token. On a mismatch the wrong token is returned anyway
    /// so callers keep making progress instead of looping.
    fn expect_kind(&mut self, kind: TokenKind) -> Token {
        match self.bump() {
            Some(token) => token,
            None => Token {
                kind,
                text: String::new(),
                span: self.eof_span(),
            },
        }
    }

    fn expect_ident(&mut self) -> Token {
        self.expect_kind(TokenKind::Ident)
    }

    fn eof_span(&self) -> Span {
        match self.tokens.last() {
            Some(token) => Span::new(token.span.end, token.span.end, token.span.line),
            None => Span::new(0, 0, 1),
        }
    }

    fn here_span(&self) -> Span {
        match self.peek() {
            Some(token) => token.span,
            None => self.eof_span(),
        }
    }

    // ---- declarations ----

    fn parse_compilation_unit(&mut self) -> CompilationUnit {
        if self.at_keyword("package") {
            self.skip_to_semi();
        }
        while self.at_keyword("import") {
            self.skip_to_semi();
        }
        let mut types = Vec::new();
        while !self.is_eof() {
            if let Some(class) = self.parse_class_decl() {
                types.push(class);
            } else if let Some(token) = self.bump() {
                debug!(
                    "parse recovery: skipping top-level token `{}` on line {}",
                    token.text, token.span.line
                );
            }
        }
        CompilationUnit { types }
    }

    fn parse_class_decl(&mut self) -> Option<ClassDecl> {
        let start_pos = self.pos;
        let start = self.here_span();
        self.skip_modifiers_and_annotations();
        if !self.at_keyword("class") && !self.at_keyword("interface") && !self.at_keyword("enum") {
            self.pos = start_pos;
            return None;
        }
        self.bump();
        let name = self.expect_ident();
        // type parameters, extends and implements clauses
        while !self.is_eof() && !self.at_kind(TokenKind::LBrace) {
            self.bump();
        }
        let (methods, end) = self.parse_class_body();
        Some(ClassDecl {
            name: name.text,
            methods,
            span: start.to(end),
        })
    }

    fn parse_class_body(&mut self) -> (Vec<MethodDecl>, Span) {
        self.expect_kind(TokenKind::LBrace);
        let mut methods = Vec::new();
        while !self.is_eof() && !self.at_kind(TokenKind::RBrace) {
            if let Some(method) = self.parse_method_decl() {
                methods.push(method);
                continue;
            }
            if self.at_kind(TokenKind::Ident) || self.at_kind(TokenKind::At) {
                self.skip_member();
            } else if let Some(token) = self.bump() {
                debug!(
                    "parse recovery: skipping token `{}` in class body on line {}",
                    token.text, token.span.line
                );
            }
        }
        let rbrace = self.expect_kind(TokenKind::RBrace);
        (methods, rbrace.span)
    }

    fn parse_method_decl(&mut self) -> Option<MethodDecl> {
        let start_pos = self.pos;
        let start = self.here_span();
        self.skip_modifiers_and_annotations();
        if self.at_kind(TokenKind::Lt) {
            self.skip_balanced(TokenKind::Lt, TokenKind::Gt);
        }
        if self.parse_type_ref().is_none() {
            self.pos = start_pos;
            return None;
        }
        let looks_like_method = self.at_kind(TokenKind::Ident)
            && self.peek_n(1).is_some_and(|token| token.kind == TokenKind::LParen);
        if !looks_like_method {
            self.pos = start_pos;
            return None;
        }
        let name = self.expect_ident();
        let params = self.parse_param_list();
        if self.at_keyword("throws") {
            while !self.is_eof()
                && !self.at_kind(TokenKind::LBrace)
                && !self.at_kind(TokenKind::Semi)
            {
                self.bump();
            }
        }
        let body = if self.at_kind(TokenKind::LBrace) {
            Some(self.parse_block())
        } else {
            // abstract or interface method
            self.eat_kind(TokenKind::Semi);
            None
        };
        let end = body.as_ref().map(|block| block.span).unwrap_or(name.span);
        Some(MethodDecl {
            name: name.text,
            params,
            body,
            span: start.to(end),
        })
    }

    /// Skips a member that is not a method: fields, constructors,
    /// initializer blocks, nested types.
    fn skip_member(&mut self) {
        while !self.is_eof() {
            if self.eat_kind(TokenKind::Semi) {
                return;
            }
            if self.at_kind(TokenKind::LBrace) {
                self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace);
                return;
            }
            if self.at_kind(TokenKind::RBrace) {
                return;
            }
            self.bump();
        }
    }

    fn skip_modifiers_and_annotations(&mut self) {
        loop {
            if self.at_kind(TokenKind::At) {
                self.bump();
                self.parse_annotation_name();
                if self.at_kind(TokenKind::LParen) {
                    self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
                }
                continue;
            }
            let is_modifier = self.peek().is_some_and(|token| {
                token.kind == TokenKind::Ident
                    && matches!(
                        token.text.as_str(),
                        "public"
                            | "protected"
                            | "private"
                            | "static"
                            | "final"
                            | "abstract"
                            | "synchronized"
                            | "native"
                            | "strictfp"
                            | "default"
                    )
            });
            if is_modifier {
                self.bump();
                continue;
            }
            break;
        }
    }

    fn parse_param_list(&mut self) -> Vec<ParamDecl> {
        self.expect_kind(TokenKind::LParen);
        let mut params = Vec::new();
        while !self.is_eof() && !self.at_kind(TokenKind::RParen) {
            let start = self.here_span();
            let annotations = self.parse_param_annotations();
            if self.parse_type_ref().is_some() {
                // varargs ellipsis
                while self.eat_kind(TokenKind::Dot) {}
                let name = self.expect_ident();
                params.push(ParamDecl {
                    annotations,
                    name: name.text,
                    span: start.to(name.span),
                });
            } else {
                self.bump();
            }
            self.eat_kind(TokenKind::Comma);
        }
        self.expect_kind(TokenKind::RParen);
        params
    }

    fn parse_param_annotations(&mut self) -> Vec<String> {
        let mut annotations = Vec::new();
        loop {
            if self.at_kind(TokenKind::At) {
                self.bump();
                if let Some(name) = self.parse_annotation_name() {
                    annotations.push(name);
                }
                if self.at_kind(TokenKind::LParen) {
                    self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
                }
                continue;
            }
            if self.at_keyword("final") {
                self.bump();
                continue;
            }
            break;
        }
        annotations
    }

    /// Annotation name exactly as written, dots included, so that a
    /// fully qualified name stays distinguishable from a simple one.
    fn parse_annotation_name(&mut self) -> Option<String> {
        if !self.at_kind(TokenKind::Ident) {
            return None;
        }
        let mut name = self.expect_ident().text;
        while self.at_kind(TokenKind::Dot)
            && self.peek_n(1).is_some_and(|token| token.kind == TokenKind::Ident)
        {
            self.bump();
            name.push('.');
            name.push_str(&self.expect_ident().text);
        }
        Some(name)
    }

    /// Possibly qualified type name with generic arguments and `[]` suffixes.
    /// Returns the covered span, or `None` when not looking at a type.
    fn parse_type_ref(&mut self) -> Option<Span> {
        if !self.at_kind(TokenKind::Ident) {
            return None;
        }
        let first = self.expect_ident();
        let mut end = first.span;
        while self.at_kind(TokenKind::Dot)
            && self.peek_n(1).is_some_and(|token| token.kind == TokenKind::Ident)
        {
            self.bump();
            end = self.expect_ident().span;
        }
        if self.at_kind(TokenKind::Lt) {
            end = self.skip_balanced(TokenKind::Lt, TokenKind::Gt);
        }
        while self.at_kind(TokenKind::LBracket)
            && self.peek_n(1).is_some_and(|token| token.kind == TokenKind::RBracket)
        {
            self.bump();
            end = self.expect_kind(TokenKind::RBracket).span;
        }
        Some(first.span.to(end))
    }

    /// Consumes a balanced `open`..`close` region; returns the span of the
    /// last token eaten.
    fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) -> Span {
        let mut last = self.here_span();
        if !self.at_kind(open) {
            return last;
        }
        let mut depth = 0usize;
        while !self.is_eof() {
            let Some(token) = self.bump() else { break };
            last = token.span;
            if token.kind == open {
                depth += 1;
            } else if token.kind == close {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
        }
        last
    }

    /// Skips forward through and including the next statement-level `;`,
    /// jumping over nested parens and braces. Stops before an unmatched `}`.
    fn skip_to_semi(&mut self) -> Span {
        let mut end = self.here_span();
        while !self.is_eof() {
            if self.at_kind(TokenKind::Semi) {
                let Some(semi) = self.bump() else { break };
                return semi.span;
            }
            if self.at_kind(TokenKind::LParen) {
                end = self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
                continue;
            }
            if self.at_kind(TokenKind::LBrace) {
                end = self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace);
                continue;
            }
            if self.at_kind(TokenKind::RBrace) {
                break;
            }
            let Some(token) = self.bump() else { break };
            end = token.span;
        }
        end
    }

    // ---- statements ----

    fn parse_block(&mut self) -> Block {
        let lbrace = self.expect_kind(TokenKind::LBrace);
        let mut statements = Vec::new();
        while !self.is_eof() && !self.at_kind(TokenKind::RBrace) {
            if let Some(stmt) = self.parse_stmt() {
                statements.push(stmt);
            } else {
                self.bump();
            }
        }
        let rbrace = self.expect_kind(TokenKind::RBrace);
        Block {
            statements,
            span: lbrace.span.to(rbrace.span),
        }
    }

    fn parse_stmt(&mut self) -> Option<Stmt> {
        if self.at_kind(TokenKind::Semi) {
            let semi = self.bump()?;
            return Some(Stmt::Other(semi.span));
        }
        if self.at_kind(TokenKind::LBrace) {
            return Some(Stmt::Block(self.parse_block()));
        }
        if self.at_keyword("if") {
            return Some(self.parse_if_stmt());
        }
        if self.at_keyword("switch") {
            return Some(self.parse_switch_stmt());
        }
        if self.at_keyword("return")
            || self.at_keyword("throw")
            || self.at_keyword("break")
            || self.at_keyword("continue")
            || self.at_keyword("assert")
        {
            let keyword = self.bump()?;
            let end = self.skip_to_semi();
            return Some(Stmt::Other(keyword.span.to(end)));
        }
        if self.at_keyword("while")
            || self.at_keyword("for")
            || self.at_keyword("do")
            || self.at_keyword("try")
            || self.at_keyword("synchronized")
        {
            return Some(self.skip_compound_stmt());
        }
        if let Some(decl) = self.try_parse_var_decl_stmt() {
            return Some(decl);
        }
        let expr = self.parse_expr()?;
        let semi = self.expect_kind(TokenKind::Semi);
        let span = expr.span().to(semi.span);
        Some(Stmt::Expr(ExprStmt { expr, span }))
    }

    fn parse_stmt_or_missing(&mut self) -> Stmt {
        let span = self.here_span();
        self.parse_stmt().unwrap_or(Stmt::Other(span))
    }

    fn parse_expr_or_missing(&mut self) -> Expr {
        let span = self.here_span();
        self.parse_expr().unwrap_or(Expr::Other(span))
    }

    fn parse_if_stmt(&mut self) -> Stmt {
        let keyword = self.expect_ident();
        self.expect_kind(TokenKind::LParen);
        let condition = self.parse_expr_or_missing();
        self.expect_kind(TokenKind::RParen);
        let then_branch = self.parse_stmt_or_missing();
        let (else_branch, end) = if self.at_keyword("else") {
            self.bump();
            let else_stmt = self.parse_stmt_or_missing();
            let end = else_stmt.span();
            (Some(Box::new(else_stmt)), end)
        } else {
            (None, then_branch.span())
        };
        Stmt::If(IfStmt {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
            span: keyword.span.to(end),
        })
    }

    fn parse_switch_stmt(&mut self) -> Stmt {
        let keyword = self.expect_ident();
        self.expect_kind(TokenKind::LParen);
        let selector = self.parse_expr_or_missing();
        self.expect_kind(TokenKind::RParen);
        self.expect_kind(TokenKind::LBrace);
        let mut entries = Vec::new();
        while !self.is_eof() && !self.at_kind(TokenKind::RBrace) {
            if self.at_keyword("case") || self.at_keyword("default") {
                entries.push(self.parse_switch_entry());
            } else {
                self.bump();
            }
        }
        let rbrace = self.expect_kind(TokenKind::RBrace);
        Stmt::Switch(SwitchStmt {
            selector,
            entries,
            span: keyword.span.to(rbrace.span),
        })
    }

    fn parse_switch_entry(&mut self) -> SwitchEntry {
        let label = self.expect_ident();
        if label.text == "case" {
            // the label expression carries no analysis meaning
            while !self.is_eof()
                && !self.at_kind(TokenKind::Colon)
                && !self.at_kind(TokenKind::Arrow)
                && !self.at_kind(TokenKind::RBrace)
            {
                self.bump();
            }
        }
        if !self.eat_kind(TokenKind::Colon) {
            self.eat_kind(TokenKind::Arrow);
        }
        let mut statements = Vec::new();
        let mut end = label.span;
        while !self.is_eof()
            && !self.at_kind(TokenKind::RBrace)
            && !self.at_keyword("case")
            && !self.at_keyword("default")
        {
            if let Some(stmt) = self.parse_stmt() {
                end = stmt.span();
                statements.push(stmt);
            } else {
                self.bump();
            }
        }
        SwitchEntry {
            statements,
            span: label.span.to(end),
        }
    }

    /// Loops, try/catch and synchronized blocks have no analysis semantics;
    /// the whole construct is consumed into one `Other` node.
    fn skip_compound_stmt(&mut self) -> Stmt {
        let Some(keyword) = self.bump() else {
            return Stmt::Other(self.eof_span());
        };
        let mut end = keyword.span;
        if self.at_kind(TokenKind::LParen) {
            end = self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
        }
        if self.at_kind(TokenKind::LBrace) {
            end = self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace);
        } else {
            // single-statement body
            end = self.parse_stmt_or_missing().span();
        }
        if keyword.text == "do" && self.at_keyword("while") {
            self.bump();
            end = self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
            if self.at_kind(TokenKind::Semi) {
                end = self.expect_kind(TokenKind::Semi).span;
            }
        }
        if keyword.text == "try" {
            while self.at_keyword("catch") {
                self.bump();
                self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
                end = self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace);
            }
            if self.at_keyword("finally") {
                self.bump();
                end = self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace);
            }
        }
        Stmt::Other(keyword.span.to(end))
    }

    fn try_parse_var_decl_stmt(&mut self) -> Option<Stmt> {
        let start_pos = self.pos;
        let start = self.here_span();
        self.skip_local_modifiers();
        if self.parse_type_ref().is_none() {
            self.pos = start_pos;
            return None;
        }
        // a declaration continues with name then `=`, `,` or `;`
        let looks_like_decl = self.at_kind(TokenKind::Ident)
            && self.peek_n(1).is_some_and(|token| {
                matches!(token.kind, TokenKind::Eq | TokenKind::Comma | TokenKind::Semi)
            });
        if !looks_like_decl {
            self.pos = start_pos;
            return None;
        }
        let mut declarators = Vec::new();
        loop {
            let name = self.expect_ident();
            let mut end = name.span;
            let init = if self.eat_kind(TokenKind::Eq) {
                let value = self.parse_expr_or_missing();
                end = value.span();
                Some(value)
            } else {
                None
            };
            declarators.push(Declarator {
                name: name.text,
                init,
                span: name.span.to(end),
            });
            if !self.eat_kind(TokenKind::Comma) || !self.at_kind(TokenKind::Ident) {
                break;
            }
        }
        let expr_end = declarators.last().map(|decl| decl.span).unwrap_or(start);
        let expr_span = start.to(expr_end);
        let semi = self.expect_kind(TokenKind::Semi);
        Some(Stmt::Expr(ExprStmt {
            expr: Expr::VarDecl(VarDeclExpr {
                declarators,
                span: expr_span,
            }),
            span: start.to(semi.span),
        }))
    }

    fn skip_local_modifiers(&mut self) {
        loop {
            if self.at_keyword("final") {
                self.bump();
                continue;
            }
            if self.at_kind(TokenKind::At) {
                self.bump();
                self.parse_annotation_name();
                if self.at_kind(TokenKind::LParen) {
                    self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
                }
                continue;
            }
            break;
        }
    }

    // ---- expressions ----

    fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_assignment_expr()
    }

    fn parse_assignment_expr(&mut self) -> Option<Expr> {
        let target = self.parse_ternary_expr()?;
        let compound = match self.peek().map(|token| token.kind) {
            Some(TokenKind::Eq) => false,
            Some(TokenKind::CompoundEq) => true,
            _ => return Some(target),
        };
        self.bump();
        let target_span = target.span();
        let value = self
            .parse_assignment_expr()
            .unwrap_or(Expr::Other(target_span));
        let span = target_span.to(value.span());
        Some(Expr::Assign(AssignExpr {
            target: Box::new(target),
            value: Box::new(value),
            compound,
            span,
        }))
    }

    fn parse_ternary_expr(&mut self) -> Option<Expr> {
        let condition = self.parse_binary_expr(0)?;
        if !self.eat_kind(TokenKind::Question) {
            return Some(condition);
        }
        self.parse_expr_or_missing();
        self.expect_kind(TokenKind::Colon);
        let else_value = self.parse_expr_or_missing();
        Some(Expr::Other(condition.span().to(else_value.span())))
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> Option<Expr> {
        let mut lhs = self.parse_unary_expr()?;
        loop {
            let (op, prec) = match self.peek().map(|token| token.kind) {
                Some(TokenKind::OrOr) => (BinaryOp::Or, 1),
                Some(TokenKind::AndAnd) => (BinaryOp::And, 2),
                Some(TokenKind::Pipe) => (BinaryOp::Other, 3),
                Some(TokenKind::Caret) => (BinaryOp::Other, 4),
                Some(TokenKind::Amp) => (BinaryOp::Other, 5),
                Some(TokenKind::EqEq) => (BinaryOp::Equals, 6),
                Some(TokenKind::BangEq) => (BinaryOp::NotEquals, 6),
                Some(TokenKind::Lt | TokenKind::Gt | TokenKind::Le | TokenKind::Ge) => {
                    (BinaryOp::Other, 7)
                }
                Some(TokenKind::Plus | TokenKind::Minus) => (BinaryOp::Other, 8),
                Some(TokenKind::Star | TokenKind::Slash | TokenKind::Percent) => {
                    (BinaryOp::Other, 9)
                }
                _ if self.at_keyword("instanceof") => (BinaryOp::Other, 7),
                _ => break,
            };
            if prec < min_prec {
                break;
            }
            self.bump();
            let lhs_span = lhs.span();
            let rhs = self
                .parse_binary_expr(prec + 1)
                .unwrap_or(Expr::Other(lhs_span));
            let span = lhs_span.to(rhs.span());
            lhs = Expr::Binary(BinaryExpr {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span,
            });
        }
        Some(lhs)
    }

    fn parse_unary_expr(&mut self) -> Option<Expr> {
        let op = match self.peek().map(|token| token.kind) {
            Some(TokenKind::Bang) => UnaryOp::Not,
            Some(
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Tilde
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus,
            ) => UnaryOp::Other,
            _ => return self.parse_postfix_expr(),
        };
        let token = self.bump()?;
        let operand = self.parse_unary_expr().unwrap_or(Expr::Other(token.span));
        let span = token.span.to(operand.span());
        Some(Expr::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            span,
        }))
    }

    fn parse_postfix_expr(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary_expr()?;
        loop {
            if self.at_kind(TokenKind::Dot)
                && self.peek_n(1).is_some_and(|token| token.kind == TokenKind::Ident)
            {
                self.bump();
                let name = self.expect_ident();
                if self.at_kind(TokenKind::LParen) {
                    let (args, end) = self.parse_arg_list();
                    let span = expr.span().to(end);
                    expr = Expr::Call(CallExpr {
                        receiver: Some(Box::new(expr)),
                        name: name.text,
                        args,
                        span,
                    });
                } else {
                    let span = expr.span().to(name.span);
                    expr = Expr::FieldAccess(FieldAccessExpr {
                        scope: Box::new(expr),
                        field: name.text,
                        span,
                    });
                }
                continue;
            }
            if self.at_kind(TokenKind::LParen) {
                let Expr::Name(name) = &expr else { break };
                let callee = name.clone();
                let (args, end) = self.parse_arg_list();
                expr = Expr::Call(CallExpr {
                    receiver: None,
                    name: callee.name,
                    args,
                    span: callee.span.to(end),
                });
                continue;
            }
            if self.at_kind(TokenKind::LBracket) {
                // array indexing is not analyzed
                let end = self.skip_balanced(TokenKind::LBracket, TokenKind::RBracket);
                expr = Expr::Other(expr.span().to(end));
                continue;
            }
            if self.at_kind(TokenKind::PlusPlus) || self.at_kind(TokenKind::MinusMinus) {
                let Some(token) = self.bump() else { break };
                expr = Expr::Other(expr.span().to(token.span));
                continue;
            }
            break;
        }
        Some(expr)
    }

    fn parse_primary_expr(&mut self) -> Option<Expr> {
        if self.at_keyword("new") {
            return Some(self.parse_new_expr());
        }
        let token = self.bump()?;
        let expr = match token.kind {
            TokenKind::Ident => match token.text.as_str() {
                "null" => Expr::Literal(LiteralExpr {
                    kind: LiteralKind::Null,
                    span: token.span,
                }),
                "true" | "false" => Expr::Literal(LiteralExpr {
                    kind: LiteralKind::Bool,
                    span: token.span,
                }),
                _ => Expr::Name(NameExpr {
                    name: token.text,
                    span: token.span,
                }),
            },
            TokenKind::IntLiteral => Expr::Literal(LiteralExpr {
                kind: LiteralKind::Int,
                span: token.span,
            }),
            TokenKind::FloatLiteral => Expr::Literal(LiteralExpr {
                kind: LiteralKind::Float,
                span: token.span,
            }),
            TokenKind::StringLiteral => Expr::Literal(LiteralExpr {
                kind: LiteralKind::Str,
                span: token.span,
            }),
            TokenKind::CharLiteral => Expr::Literal(LiteralExpr {
                kind: LiteralKind::Char,
                span: token.span,
            }),
            TokenKind::LParen => {
                let inner = self.parse_expr_or_missing();
                let rparen = self.expect_kind(TokenKind::RParen);
                Expr::Paren(ParenExpr {
                    inner: Box::new(inner),
                    span: token.span.to(rparen.span),
                })
            }
            _ => Expr::Other(token.span),
        };
        Some(expr)
    }

    fn parse_new_expr(&mut self) -> Expr {
        let keyword = self.expect_ident();
        let mut end = keyword.span;
        if let Some(type_span) = self.parse_type_ref() {
            end = type_span;
        }
        if self.at_kind(TokenKind::LParen) {
            end = self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
        }
        while self.at_kind(TokenKind::LBracket) {
            end = self.skip_balanced(TokenKind::LBracket, TokenKind::RBracket);
        }
        if self.at_kind(TokenKind::LBrace) {
            // anonymous class body or array initializer
            end = self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace);
        }
        Expr::Other(keyword.span.to(end))
    }

    fn parse_arg_list(&mut self) -> (Vec<Expr>, Span) {
        let lparen = self.expect_kind(TokenKind::LParen);
        let mut end = lparen.span;
        let mut args = Vec::new();
        while !self.is_eof() && !self.at_kind(TokenKind::RParen) {
            if let Some(arg) = self.parse_expr() {
                args.push(arg);
            } else {
                self.bump();
            }
            if !self.eat_kind(TokenKind::Comma) && !self.at_kind(TokenKind::RParen) {
                // unsupported argument shape, e.g. a lambda arrow
                self.bump();
            }
        }
        let rparen = self.expect_kind(TokenKind::RParen);
        if rparen.kind == TokenKind::RParen {
            end = rparen.span;
        }
        (args, end)
    }
}
