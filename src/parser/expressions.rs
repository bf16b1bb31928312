//! Expression parsing implementation
//!
//! Expressions are parsed by precedence climbing (a Pratt parser). Each token
//! kind that can start an expression has a prefix handler; each binary
//! operator has an infix handler and a binding [`Precedence`].
//!
//! # Supported Expressions
//!
//! - Identifiers and integer literals
//! - Unary operators: `!`, `-`
//! - Binary operators: `==`, `!=`, `<`, `>`, `+`, `-`, `*`, `/`
//!
//! Chains of equal precedence associate to the left.
//!
//! Left-associative chains are built in a loop. Prefix operands and right-hand
//! operands recurse, so their nesting is capped at [`MAX_NESTING_DEPTH`].

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;
use crate::parser::trace::TraceSink;

/// Deepest recursion into `parse_expression` before the statement is
/// rejected with [`ParseError::NestingTooDeep`].
pub const MAX_NESTING_DEPTH: usize = 128;

/// Operator binding strength, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < >
    Sum,         // + -
    Product,     // * /
    Prefix,      // -x !x
    Call,        // reserved for f(x)
}

impl Precedence {
    /// Binding strength of `kind` in infix position.
    pub fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            _ => Precedence::Lowest,
        }
    }
}

fn infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    let op = match kind {
        TokenKind::Plus => InfixOperator::Add,
        TokenKind::Minus => InfixOperator::Sub,
        TokenKind::Asterisk => InfixOperator::Mul,
        TokenKind::Slash => InfixOperator::Div,
        TokenKind::Eq => InfixOperator::Eq,
        TokenKind::NotEq => InfixOperator::NotEq,
        TokenKind::Lt => InfixOperator::Lt,
        TokenKind::Gt => InfixOperator::Gt,
        _ => return None,
    };
    Some(op)
}

/// Convert integer literal text, honouring base prefixes: `0x` hex, `0o`
/// octal, `0b` binary, a bare leading `0` octal, decimal otherwise.
pub fn parse_int_literal(text: &str) -> Option<i64> {
    let lower = text.get(..2).map(str::to_ascii_lowercase);
    let (digits, radix) = match lower.as_deref() {
        Some("0x") => (&text[2..], 16),
        Some("0o") => (&text[2..], 8),
        Some("0b") => (&text[2..], 2),
        _ if text.len() > 1 && text.starts_with('0') => (&text[1..], 8),
        _ => (text, 10),
    };

    if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
        return None;
    }

    i64::from_str_radix(digits, radix).ok()
}

impl<S: TraceSink> Parser<S> {
    /// Parse an expression whose operators all bind tighter than `precedence`.
    ///
    /// On entry `current` is the first token of the expression; on success it
    /// is the last token of the expression.
    pub(crate) fn parse_expression(
        &mut self,
        precedence: Precedence,
    ) -> Result<Expression, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                location: self.current.location,
            });
        }

        self.depth += 1;
        let result = self.parse_expression_inner(precedence);
        self.depth -= 1;
        result
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> Result<Expression, ParseError> {
        self.traced("parse_expression", |p| {
            let mut left = p.parse_prefix()?;

            while !p.peek_is(TokenKind::Semicolon) && precedence < Precedence::of(p.peek.kind) {
                let Some(operator) = infix_operator(p.peek.kind) else {
                    return Ok(left);
                };
                p.advance();
                left = p.parse_infix_expression(left, operator)?;
            }

            Ok(left)
        })
    }

    /// Dispatch to the prefix handler for the current token.
    fn parse_prefix(&mut self) -> Result<Expression, ParseError> {
        match self.current.kind {
            TokenKind::Ident => Ok(self.parse_identifier()),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Bang => self.parse_prefix_expression(PrefixOperator::Not),
            TokenKind::Minus => self.parse_prefix_expression(PrefixOperator::Neg),
            kind => Err(ParseError::NoPrefixParseFn {
                kind,
                location: self.current.location,
            }),
        }
    }

    fn parse_identifier(&mut self) -> Expression {
        Expression::Identifier(Identifier {
            token: self.current.clone(),
            name: self.current.literal.clone(),
        })
    }

    fn parse_integer_literal(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let value = parse_int_literal(&token.literal).ok_or_else(|| ParseError::InvalidInteger {
            literal: token.literal.clone(),
            location: token.location,
        })?;

        Ok(Expression::IntegerLiteral(IntegerLiteral { token, value }))
    }

    /// Parse unary operator expression (`!x`, `-x`)
    fn parse_prefix_expression(
        &mut self,
        operator: PrefixOperator,
    ) -> Result<Expression, ParseError> {
        self.traced("parse_prefix_expression", |p| {
            let token = p.current.clone();
            p.advance();

            let operand = p.parse_expression(Precedence::Prefix)?;

            Ok(Expression::Prefix(PrefixExpression {
                token,
                operator,
                operand: Box::new(operand),
            }))
        })
    }

    /// Parse binary operator expression; `current` is the operator.
    fn parse_infix_expression(
        &mut self,
        left: Expression,
        operator: InfixOperator,
    ) -> Result<Expression, ParseError> {
        self.traced("parse_infix_expression", |p| {
            let token = p.current.clone();
            let precedence = Precedence::of(token.kind);
            p.advance();

            let right = p.parse_expression(precedence)?;

            Ok(Expression::Infix(InfixExpression {
                token,
                operator,
                left: Box::new(left),
                right: Box::new(right),
            }))
        })
    }
}
