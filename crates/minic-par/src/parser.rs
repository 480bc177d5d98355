//! Recursive-descent parser with panic-mode error recovery.
//!
//! Every syntax error is recorded as a diagnostic and the parser
//! synchronizes to the next statement boundary rather than aborting —
//! `parse()` always returns a complete (if partially erroneous) tree.

use minic_util::Diagnostic;

use crate::ast::{Expr, LiteralKind, Param, Stmt, Type};
use minic_lex::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    pub diagnostics: Vec<Diagnostic>,
}

const DECL_STARTERS: &[TokenKind] = &[
    TokenKind::Int,
    TokenKind::Float,
    TokenKind::Bool,
    TokenKind::Void,
    TokenKind::If,
    TokenKind::While,
    TokenKind::For,
    TokenKind::Return,
];

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn parse(mut self) -> (Stmt, Vec<Diagnostic>) {
        let mut body = Vec::new();
        while !self.is_at_end() {
            let before = self.pos;
            body.push(self.declaration());
            if self.pos == before {
                self.synchronize();
            }
        }
        (Stmt::Program(body), self.diagnostics)
    }

    // ---- token-stream helpers ----

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tok
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        let tok = self.peek();
        self.diagnostics
            .push(Diagnostic::at(message, tok.line, tok.col));
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Token {
        if self.check(kind) {
            self.advance()
        } else {
            self.error(message.to_string());
            self.peek().clone()
        }
    }

    fn synchronize(&mut self) {
        while !self.is_at_end() {
            let prev = self.advance();
            if prev.kind == TokenKind::Semicolon {
                return;
            }
            if self.check(TokenKind::RBrace) {
                return;
            }
            if DECL_STARTERS.contains(&self.peek().kind) {
                return;
            }
        }
    }

    fn type_kind(&self) -> Option<Type> {
        match self.peek().kind {
            TokenKind::Int => Some(Type::Int),
            TokenKind::Float => Some(Type::Float),
            TokenKind::Bool => Some(Type::Bool),
            TokenKind::Void => Some(Type::Void),
            _ => None,
        }
    }

    // ---- declarations ----

    fn declaration(&mut self) -> Stmt {
        if self.type_kind().is_some() && self.peek_at(1).kind == TokenKind::Identifier {
            let is_function = self.peek_at(2).kind == TokenKind::LParen;
            let result = if is_function {
                self.function_decl()
            } else {
                self.var_decl()
            };
            return result;
        }
        self.statement()
    }

    fn function_decl(&mut self) -> Stmt {
        let (line, col) = {
            let t = self.peek();
            (t.line, t.col)
        };
        let return_type = self.type_kind().expect("caller checked");
        self.advance();
        let name = self.advance().lexeme;
        self.expect(TokenKind::LParen, "expected '(' after function name");
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let Some(ty) = self.type_kind() else {
                    self.error("expected parameter type");
                    break;
                };
                self.advance();
                let pname = self.expect(TokenKind::Identifier, "expected parameter name").lexeme;
                params.push(Param { ty, name: pname });
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "expected ')' after parameters");
        let body = self.block_statements();
        Stmt::FunctionDecl {
            return_type,
            name,
            params,
            body,
            line,
            col,
        }
    }

    fn var_decl(&mut self) -> Stmt {
        let var_type = self.type_kind().expect("caller checked");
        let type_tok = self.advance();
        if var_type == Type::Void {
            self.error("variables cannot have type 'void'");
        }
        let name = self.advance().lexeme;
        let init = if self.matches(TokenKind::Assign) {
            Some(self.expression())
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "expected ';' after variable declaration");
        Stmt::VarDecl {
            var_type,
            name,
            init,
            line: type_tok.line,
            col: type_tok.col,
        }
    }

    // ---- statements ----

    fn statement(&mut self) -> Stmt {
        match self.peek().kind {
            TokenKind::For => self.for_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::If => self.if_statement(),
            TokenKind::Print => self.print_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::LBrace => Stmt::Block(self.block_statements()),
            _ => self.expr_statement(),
        }
    }

    fn block_statements(&mut self) -> Vec<Stmt> {
        if self.check(TokenKind::LBrace) {
            self.advance();
        } else {
            self.error("expected '{'");
        }
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let before = self.pos;
            stmts.push(self.declaration());
            if self.pos == before {
                self.synchronize();
            }
        }
        self.expect(TokenKind::RBrace, "expected '}'");
        stmts
    }

    fn for_statement(&mut self) -> Stmt {
        self.advance();
        self.expect(TokenKind::LParen, "expected '(' after 'for'");

        let init = if self.check(TokenKind::Semicolon) {
            self.advance();
            None
        } else if self.type_kind().is_some() {
            Some(Box::new(self.var_decl()))
        } else {
            let e = self.expression();
            self.expect(TokenKind::Semicolon, "expected ';' after for-init");
            Some(Box::new(Stmt::ExprStmt(e)))
        };

        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression())
        };
        self.expect(TokenKind::Semicolon, "expected ';' after for-condition");

        let post = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.expression())
        };
        self.expect(TokenKind::RParen, "expected ')' after for-clauses");

        let body = Box::new(self.statement());
        Stmt::For { init, cond, post, body }
    }

    fn while_statement(&mut self) -> Stmt {
        self.advance();
        self.expect(TokenKind::LParen, "expected '(' after 'while'");
        let cond = self.expression();
        self.expect(TokenKind::RParen, "expected ')' after condition");
        let body = Box::new(self.statement());
        Stmt::While { cond, body }
    }

    fn if_statement(&mut self) -> Stmt {
        self.advance();
        self.expect(TokenKind::LParen, "expected '(' after 'if'");
        let cond = self.expression();
        self.expect(TokenKind::RParen, "expected ')' after condition");
        let then_branch = Box::new(self.statement());
        let else_branch = if self.matches(TokenKind::Else) {
            Some(Box::new(self.statement()))
        } else {
            None
        };
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        }
    }

    fn print_statement(&mut self) -> Stmt {
        self.advance();
        self.expect(TokenKind::LParen, "expected '(' after 'print'");
        let expr = self.expression();
        self.expect(TokenKind::RParen, "expected ')' after print argument");
        self.expect(TokenKind::Semicolon, "expected ';' after print statement");
        Stmt::Print(expr)
    }

    fn return_statement(&mut self) -> Stmt {
        let tok = self.advance();
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression())
        };
        self.expect(TokenKind::Semicolon, "expected ';' after return statement");
        Stmt::Return {
            value,
            line: tok.line,
            col: tok.col,
        }
    }

    fn expr_statement(&mut self) -> Stmt {
        let expr = self.expression();
        self.expect(TokenKind::Semicolon, "expected ';' after expression");
        Stmt::ExprStmt(expr)
    }

    // ---- expressions, lowest to highest precedence ----

    fn expression(&mut self) -> Expr {
        self.assignment()
    }

    fn assignment(&mut self) -> Expr {
        let expr = self.logic_or();
        if self.check(TokenKind::Assign) {
            let tok = self.advance();
            let value = self.assignment();
            if let Expr::Var { name, line, col } = expr {
                return Expr::Assign {
                    name,
                    value: Box::new(value),
                    line,
                    col,
                };
            }
            self.diagnostics
                .push(Diagnostic::at("invalid assignment target", tok.line, tok.col));
            return value;
        }
        expr
    }

    fn logic_or(&mut self) -> Expr {
        self.binary_left(Self::logic_and, &[(TokenKind::OrOr, "||")])
    }

    fn logic_and(&mut self) -> Expr {
        self.binary_left(Self::equality, &[(TokenKind::AndAnd, "&&")])
    }

    fn equality(&mut self) -> Expr {
        self.binary_left(
            Self::relational,
            &[(TokenKind::Eq, "=="), (TokenKind::NotEq, "!=")],
        )
    }

    fn relational(&mut self) -> Expr {
        self.binary_left(
            Self::additive,
            &[
                (TokenKind::Lt, "<"),
                (TokenKind::Le, "<="),
                (TokenKind::Gt, ">"),
                (TokenKind::Ge, ">="),
            ],
        )
    }

    fn additive(&mut self) -> Expr {
        self.binary_left(
            Self::multiplicative,
            &[(TokenKind::Plus, "+"), (TokenKind::Minus, "-")],
        )
    }

    fn multiplicative(&mut self) -> Expr {
        self.binary_left(
            Self::unary,
            &[
                (TokenKind::Star, "*"),
                (TokenKind::Slash, "/"),
                (TokenKind::Percent, "%"),
            ],
        )
    }

    fn binary_left(
        &mut self,
        operand: fn(&mut Self) -> Expr,
        ops: &[(TokenKind, &str)],
    ) -> Expr {
        let mut left = operand(self);
        loop {
            let Some((_, op)) = ops.iter().find(|(k, _)| self.check(*k)) else {
                break;
            };
            self.advance();
            let right = operand(self);
            let (line, col) = left.line_col();
            left = Expr::Binary {
                left: Box::new(left),
                op: op.to_string(),
                right: Box::new(right),
                line,
                col,
            };
        }
        left
    }

    fn unary(&mut self) -> Expr {
        let (op, consume) = match self.peek().kind {
            TokenKind::Bang => ("!", true),
            TokenKind::Minus => ("-", true),
            TokenKind::Plus => ("+", true),
            _ => ("", false),
        };
        if consume {
            let tok = self.advance();
            let right = self.unary();
            return Expr::Unary {
                op: op.to_string(),
                right: Box::new(right),
                line: tok.line,
                col: tok.col,
            };
        }
        self.primary()
    }

    fn primary(&mut self) -> Expr {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::IntLit => {
                self.advance();
                Expr::Literal {
                    value: tok.lexeme,
                    kind: LiteralKind::Int,
                    line: tok.line,
                    col: tok.col,
                }
            }
            TokenKind::FloatLit => {
                self.advance();
                Expr::Literal {
                    value: tok.lexeme,
                    kind: LiteralKind::Float,
                    line: tok.line,
                    col: tok.col,
                }
            }
            TokenKind::BoolLit => {
                self.advance();
                let value = if tok.lexeme == "true" { "1".to_string() } else { "0".to_string() };
                Expr::Literal {
                    value,
                    kind: LiteralKind::Bool,
                    line: tok.line,
                    col: tok.col,
                }
            }
            TokenKind::Identifier => {
                self.advance();
                if self.check(TokenKind::LParen) {
                    self.advance();
                    let mut args = Vec::new();
                    if !self.check(TokenKind::RParen) {
                        loop {
                            args.push(self.expression());
                            if !self.matches(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(TokenKind::RParen, "expected ')' after arguments");
                    Expr::Call {
                        name: tok.lexeme,
                        args,
                        line: tok.line,
                        col: tok.col,
                    }
                } else {
                    Expr::Var {
                        name: tok.lexeme,
                        line: tok.line,
                        col: tok.col,
                    }
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression();
                self.expect(TokenKind::RParen, "expected ')' after expression");
                Expr::Grouping(Box::new(inner))
            }
            _ => {
                self.error(format!("unexpected token '{}'", tok.lexeme));
                if !self.is_at_end() {
                    self.advance();
                }
                Expr::Literal {
                    value: "0".to_string(),
                    kind: LiteralKind::Int,
                    line: tok.line,
                    col: tok.col,
                }
            }
        }
    }
}
