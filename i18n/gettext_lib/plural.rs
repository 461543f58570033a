//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Plural expression parser and evaluator
//!
//! This module parses and evaluates the C-style expressions found in the
//! `Plural-Forms` header of a catalog. The expression selects which plural
//! form to use for a count `n`. Catalog files are untrusted input, so the
//! grammar is closed: the only variable is `n`, there are no calls or
//! assignments, and nesting depth and input length are bounded.
//!
//! Example expressions:
//! - English: `(n != 1)` - 2 forms: singular when n=1, plural otherwise
//! - Polish: `(n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2)` - 3 forms

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

/// Deepest nesting of parentheses, ternaries and unary operators accepted
pub const MAX_DEPTH: usize = 64;

/// Longest expression accepted, in bytes
pub const MAX_EXPR_LEN: usize = 1024;

/// A parsed plural expression that can be evaluated
#[derive(Debug, Clone, PartialEq)]
pub enum PluralExpr {
    /// The variable `n` (the count)
    N,
    /// A numeric literal
    Literal(i64),
    /// Unary operation
    UnaryOp(UnaryOp, Box<PluralExpr>),
    /// Binary operation
    BinaryOp(Box<PluralExpr>, BinaryOp, Box<PluralExpr>),
    /// Ternary conditional: condition ? if_true : if_false
    Ternary(Box<PluralExpr>, Box<PluralExpr>, Box<PluralExpr>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    /// Logical NOT (!)
    Not,
    /// Negation (-)
    Neg,
}

/// Binary operators supported in plural expressions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// Division, truncating toward zero
    Div,
    /// Remainder; the sign follows the dividend
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Logical AND (&&)
    And,
    /// Logical OR (||)
    Or,
}

/// Error type for plural expression parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PluralError {
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("expected {0}")]
    Expected(String),
    #[error("expression nested deeper than {} levels", MAX_DEPTH)]
    TooDeep,
    #[error("expression longer than {} bytes", MAX_EXPR_LEN)]
    TooLong,
    #[error("numeric literal out of range")]
    LiteralOverflow,
    #[error("malformed Plural-Forms header: {0}")]
    MalformedHeader(String),
}

/// Token types for the lexer
#[derive(Debug, Clone, PartialEq)]
enum Token {
    N,
    Number(i64),
    LParen,
    RParen,
    Question,
    Colon,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Not,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Eof,
}

/// Lexer for plural expressions
struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.chars().peekable(),
        }
    }

    fn next_token(&mut self) -> Result<Token, PluralError> {
        self.skip_whitespace();

        let c = match self.chars.peek().copied() {
            None => return Ok(Token::Eof),
            Some(c) => c,
        };

        if c.is_ascii_digit() {
            return self.read_number();
        }

        // ';' terminates the expression inside a Plural-Forms header
        if c == ';' {
            return Ok(Token::Eof);
        }

        self.chars.next();
        let token = match c {
            'n' => Token::N,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '?' => Token::Question,
            ':' => Token::Colon,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '=' => {
                if self.eat('=') {
                    Token::Eq
                } else {
                    return Err(PluralError::Expected("'=' after '='".to_string()));
                }
            }
            '!' => {
                if self.eat('=') {
                    Token::Ne
                } else {
                    Token::Not
                }
            }
            '<' => {
                if self.eat('=') {
                    Token::Le
                } else {
                    Token::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    Token::Ge
                } else {
                    Token::Gt
                }
            }
            '&' => {
                if self.eat('&') {
                    Token::And
                } else {
                    return Err(PluralError::Expected("'&' after '&'".to_string()));
                }
            }
            '|' => {
                if self.eat('|') {
                    Token::Or
                } else {
                    return Err(PluralError::Expected("'|' after '|'".to_string()));
                }
            }
            _ => return Err(PluralError::UnexpectedChar(c)),
        };

        // `n` must not run into other identifier characters ("nn", "nplurals")
        if token == Token::N {
            if let Some(&next) = self.chars.peek() {
                if next.is_ascii_alphanumeric() || next == '_' {
                    return Err(PluralError::UnexpectedChar(next));
                }
            }
        }

        Ok(token)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Result<Token, PluralError> {
        let mut value: i64 = 0;
        while let Some(&c) = self.chars.peek() {
            if let Some(digit) = c.to_digit(10) {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(i64::from(digit)))
                    .ok_or(PluralError::LiteralOverflow)?;
                self.chars.next();
            } else {
                break;
            }
        }
        Ok(Token::Number(value))
    }
}

/// Parser for plural expressions
///
/// Operator precedence (lowest to highest):
/// 1. Ternary: ? : (right associative)
/// 2. Logical OR: ||
/// 3. Logical AND: &&
/// 4. Equality: == !=
/// 5. Relational: < <= > >=
/// 6. Additive: + -
/// 7. Multiplicative: * / %
/// 8. Unary: ! -
/// 9. Primary: n, literals, (expr)
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input
    pub fn new(input: &'a str) -> Result<Self, PluralError> {
        if input.len() > MAX_EXPR_LEN {
            return Err(PluralError::TooLong);
        }
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            depth: 0,
        })
    }

    /// Parse a complete plural expression; trailing tokens are an error
    pub fn parse(&mut self) -> Result<PluralExpr, PluralError> {
        let expr = self.parse_ternary()?;
        if self.current != Token::Eof {
            return Err(PluralError::Expected(format!(
                "end of expression, found {:?}",
                self.current
            )));
        }
        Ok(expr)
    }

    fn advance(&mut self) -> Result<(), PluralError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, expected: Token) -> Result<(), PluralError> {
        if self.current == expected {
            self.advance()
        } else if self.current == Token::Eof {
            Err(PluralError::UnexpectedEof)
        } else {
            Err(PluralError::Expected(format!("{:?}", expected)))
        }
    }

    fn enter(&mut self) -> Result<(), PluralError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            Err(PluralError::TooDeep)
        } else {
            Ok(())
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // Ternary: or_expr ('?' ternary ':' ternary)?
    fn parse_ternary(&mut self) -> Result<PluralExpr, PluralError> {
        self.enter()?;
        let cond = self.parse_or()?;

        let expr = if self.current == Token::Question {
            self.advance()?;
            let if_true = self.parse_ternary()?;
            self.expect(Token::Colon)?;
            let if_false = self.parse_ternary()?;
            PluralExpr::Ternary(Box::new(cond), Box::new(if_true), Box::new(if_false))
        } else {
            cond
        };

        self.leave();
        Ok(expr)
    }

    // Or: and_expr ('||' and_expr)*
    fn parse_or(&mut self) -> Result<PluralExpr, PluralError> {
        let mut left = self.parse_and()?;

        while self.current == Token::Or {
            self.advance()?;
            let right = self.parse_and()?;
            left = PluralExpr::BinaryOp(Box::new(left), BinaryOp::Or, Box::new(right));
        }

        Ok(left)
    }

    // And: equality_expr ('&&' equality_expr)*
    fn parse_and(&mut self) -> Result<PluralExpr, PluralError> {
        let mut left = self.parse_equality()?;

        while self.current == Token::And {
            self.advance()?;
            let right = self.parse_equality()?;
            left = PluralExpr::BinaryOp(Box::new(left), BinaryOp::And, Box::new(right));
        }

        Ok(left)
    }

    // Equality: relational_expr (('==' | '!=') relational_expr)*
    fn parse_equality(&mut self) -> Result<PluralExpr, PluralError> {
        let mut left = self.parse_relational()?;

        loop {
            let op = match self.current {
                Token::Eq => BinaryOp::Eq,
                Token::Ne => BinaryOp::Ne,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_relational()?;
            left = PluralExpr::BinaryOp(Box::new(left), op, Box::new(right));
        }

        Ok(left)
    }

    // Relational: additive_expr (('<' | '<=' | '>' | '>=') additive_expr)*
    fn parse_relational(&mut self) -> Result<PluralExpr, PluralError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.current {
                Token::Lt => BinaryOp::Lt,
                Token::Le => BinaryOp::Le,
                Token::Gt => BinaryOp::Gt,
                Token::Ge => BinaryOp::Ge,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_additive()?;
            left = PluralExpr::BinaryOp(Box::new(left), op, Box::new(right));
        }

        Ok(left)
    }

    // Additive: multiplicative_expr (('+' | '-') multiplicative_expr)*
    fn parse_additive(&mut self) -> Result<PluralExpr, PluralError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = PluralExpr::BinaryOp(Box::new(left), op, Box::new(right));
        }

        Ok(left)
    }

    // Multiplicative: unary_expr (('*' | '/' | '%') unary_expr)*
    fn parse_multiplicative(&mut self) -> Result<PluralExpr, PluralError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                Token::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_unary()?;
            left = PluralExpr::BinaryOp(Box::new(left), op, Box::new(right));
        }

        Ok(left)
    }

    // Unary: ('!' | '-') unary_expr | primary
    fn parse_unary(&mut self) -> Result<PluralExpr, PluralError> {
        let op = match self.current {
            Token::Not => UnaryOp::Not,
            Token::Minus => UnaryOp::Neg,
            _ => return self.parse_primary(),
        };

        self.enter()?;
        self.advance()?;
        let operand = self.parse_unary()?;
        self.leave();

        Ok(PluralExpr::UnaryOp(op, Box::new(operand)))
    }

    // Primary: 'n' | number | '(' ternary ')'
    fn parse_primary(&mut self) -> Result<PluralExpr, PluralError> {
        match self.current {
            Token::N => {
                self.advance()?;
                Ok(PluralExpr::N)
            }
            Token::Number(v) => {
                self.advance()?;
                Ok(PluralExpr::Literal(v))
            }
            Token::LParen => {
                self.advance()?;
                let expr = self.parse_ternary()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Token::Eof => Err(PluralError::UnexpectedEof),
            _ => Err(PluralError::Expected("n, number, or '('".to_string())),
        }
    }
}

impl PluralExpr {
    /// Parse a plural expression from a string
    pub fn parse(input: &str) -> Result<Self, PluralError> {
        let mut parser = Parser::new(input)?;
        parser.parse()
    }

    /// Evaluate the expression with the given value of n
    ///
    /// Arithmetic wraps on overflow and division by zero yields 0, so any
    /// parsed expression evaluates without panicking.
    pub fn evaluate(&self, n: i64) -> i64 {
        match self {
            PluralExpr::N => n,
            PluralExpr::Literal(v) => *v,
            PluralExpr::UnaryOp(op, operand) => {
                let v = operand.evaluate(n);
                match op {
                    UnaryOp::Not => i64::from(v == 0),
                    UnaryOp::Neg => v.wrapping_neg(),
                }
            }
            PluralExpr::BinaryOp(left, BinaryOp::And, right) => {
                i64::from(left.evaluate(n) != 0 && right.evaluate(n) != 0)
            }
            PluralExpr::BinaryOp(left, BinaryOp::Or, right) => {
                i64::from(left.evaluate(n) != 0 || right.evaluate(n) != 0)
            }
            PluralExpr::BinaryOp(left, op, right) => {
                let l = left.evaluate(n);
                let r = right.evaluate(n);
                match op {
                    BinaryOp::Add => l.wrapping_add(r),
                    BinaryOp::Sub => l.wrapping_sub(r),
                    BinaryOp::Mul => l.wrapping_mul(r),
                    BinaryOp::Div => l.checked_div(r).unwrap_or(0),
                    BinaryOp::Mod => l.checked_rem(r).unwrap_or(0),
                    BinaryOp::Eq => i64::from(l == r),
                    BinaryOp::Ne => i64::from(l != r),
                    BinaryOp::Lt => i64::from(l < r),
                    BinaryOp::Le => i64::from(l <= r),
                    BinaryOp::Gt => i64::from(l > r),
                    BinaryOp::Ge => i64::from(l >= r),
                    BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
                }
            }
            PluralExpr::Ternary(cond, if_true, if_false) => {
                if cond.evaluate(n) != 0 {
                    if_true.evaluate(n)
                } else {
                    if_false.evaluate(n)
                }
            }
        }
    }
}

/// A compiled `Plural-Forms` header: form count plus selector expression
#[derive(Debug, Clone, PartialEq)]
pub struct PluralRule {
    nplurals: usize,
    expr: PluralExpr,
}

impl Default for PluralRule {
    /// `nplurals=2; plural=n != 1;`
    fn default() -> Self {
        PluralRule {
            nplurals: 2,
            expr: PluralExpr::BinaryOp(
                Box::new(PluralExpr::N),
                BinaryOp::Ne,
                Box::new(PluralExpr::Literal(1)),
            ),
        }
    }
}

impl PluralRule {
    pub fn new(nplurals: usize, expr: PluralExpr) -> Result<Self, PluralError> {
        if nplurals == 0 {
            return Err(PluralError::MalformedHeader(
                "nplurals must be at least 1".to_string(),
            ));
        }
        Ok(PluralRule { nplurals, expr })
    }

    /// Parse the value of a "Plural-Forms:" header
    ///
    /// Expected format: "nplurals=N; plural=EXPR;". The trailing semicolon is
    /// optional and whitespace around tokens is ignored.
    pub fn parse(header: &str) -> Result<Self, PluralError> {
        // stray literal "\n" sequences from badly generated catalogs
        let header = header.replace("\\n", " ");

        let mut nplurals = None;
        let mut plural_expr = None;

        for part in header.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let Some((name, value)) = part.split_once('=') else {
                return Err(PluralError::MalformedHeader(format!(
                    "missing '=' in \"{}\"",
                    part
                )));
            };
            match name.trim() {
                "nplurals" => {
                    let n = value.trim().parse::<usize>().map_err(|_| {
                        PluralError::MalformedHeader(format!(
                            "invalid nplurals \"{}\"",
                            value.trim()
                        ))
                    })?;
                    nplurals = Some(n);
                }
                "plural" => plural_expr = Some(PluralExpr::parse(value.trim())?),
                _ => {}
            }
        }

        match (nplurals, plural_expr) {
            (Some(n), Some(expr)) => PluralRule::new(n, expr),
            (None, _) => Err(PluralError::MalformedHeader(
                "nplurals is missing".to_string(),
            )),
            (_, None) => Err(PluralError::MalformedHeader(
                "plural is missing".to_string(),
            )),
        }
    }

    /// Compile an optional header value, degrading to the default rule
    pub fn from_header(header: Option<&str>) -> Self {
        let Some(value) = header else {
            return PluralRule::default();
        };

        match PluralRule::parse(value) {
            Ok(rule) => rule,
            Err(e) => {
                log::warn!("ignoring Plural-Forms \"{}\": {}", value, e);
                PluralRule::default()
            }
        }
    }

    pub fn nplurals(&self) -> usize {
        self.nplurals
    }

    pub fn expr(&self) -> &PluralExpr {
        &self.expr
    }

    /// Plural form index for `n`, clamped into `0..nplurals`
    pub fn select(&self, n: i64) -> usize {
        let index = self.expr.evaluate(n);
        if index < 0 {
            0
        } else {
            usize::try_from(index)
                .unwrap_or(usize::MAX)
                .min(self.nplurals - 1)
        }
    }
}
