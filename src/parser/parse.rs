//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The parser pulls tokens from a [`Lexer`] on demand and keeps a two-token
//! window: `current` and `peek`.
//! - This module: Parser struct, token window, diagnostics, top-level loop
//! - `statements`: `let`, `return` and expression statements
//! - `expressions`: precedence climbing over prefix and infix operators
//!
//! # Error handling
//!
//! Productions return `Result`. A syntax error abandons only the statement it
//! occurred in: the top-level loop records the error, skips the rest of that
//! statement and carries on. A statement production that consumes no tokens
//! at all is an internal failure and aborts the whole parse.

use crate::parser::ast::*;
use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenKind};
use crate::parser::trace::{NoTrace, TraceSink};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A required token was missing after a keyword or name.
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken { expected: TokenKind, found: Token },

    /// The current token cannot start an expression.
    #[error("no prefix parse function for {kind} found at {location}")]
    NoPrefixParseFn {
        kind: TokenKind,
        location: SourceLocation,
    },

    /// An integer literal that does not fit an i64 or has digits invalid for
    /// its base.
    #[error("could not parse {literal:?} as integer at {location}")]
    InvalidInteger {
        literal: String,
        location: SourceLocation,
    },

    /// Prefix operators or operands nested deeper than the parser recurses.
    #[error("expression nested deeper than {limit} levels at {location}")]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },

    /// A statement production returned without consuming any token.
    #[error("failed to advance tokens: parser stalled at {current}")]
    Stalled { current: Token },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::UnexpectedToken { found, .. } => found.location,
            ParseError::NoPrefixParseFn { location, .. } => *location,
            ParseError::InvalidInteger { location, .. } => *location,
            ParseError::NestingTooDeep { location, .. } => *location,
            ParseError::Stalled { current } => current.location,
        }
    }

    /// Internal consistency failures abort the whole parse; everything else
    /// only abandons one statement.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Stalled { .. })
    }
}

/// Pratt parser for Monkey
pub struct Parser<S: TraceSink = NoTrace> {
    lexer: Lexer,
    pub(crate) current: Token,
    pub(crate) peek: Token,
    progress: usize,
    pub(crate) depth: usize,
    diagnostics: Vec<ParseError>,
    trace: S,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Self::with_trace(lexer, NoTrace)
    }

    pub fn from_source(source: &str) -> Self {
        Self::new(Lexer::new(source))
    }
}

impl<S: TraceSink> Parser<S> {
    /// Create a parser that reports every production to `trace`.
    pub fn with_trace(mut lexer: Lexer, trace: S) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            progress: 0,
            depth: 0,
            diagnostics: Vec::new(),
            trace,
        }
    }

    /// Parse the entire program.
    ///
    /// Syntax errors do not fail the call: check [`Parser::diagnostics`] as
    /// well. `Err` means the parse was aborted and no program exists; the
    /// error is also the last entry of the diagnostics list.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        self.parse_program_with(Self::parse_statement)
    }

    pub(crate) fn parse_program_with(
        &mut self,
        mut production: impl FnMut(&mut Self) -> Result<Statement, ParseError>,
    ) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.current_is(TokenKind::Eof) {
            let before = self.progress;

            match production(self) {
                Ok(stmt) => program.statements.push(stmt),
                Err(err) => {
                    self.diagnostics.push(err);
                    self.skip_statement();
                }
            }

            // Every statement must consume at least one token.
            if self.progress == before {
                let err = ParseError::Stalled {
                    current: self.current.clone(),
                };
                self.diagnostics.push(err.clone());
                return Err(err);
            }
        }

        Ok(program)
    }

    /// Errors collected so far, in the order they were found.
    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    /// Diagnostics rendered for display.
    pub fn errors(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    /// Number of tokens the parser has advanced over.
    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn into_trace(self) -> S {
        self.trace
    }

    // ===== Helper methods =====

    pub(crate) fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
        self.progress += 1;
    }

    pub(crate) fn current_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advance onto the peek token if it has the expected kind.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind,
                found: self.peek.clone(),
            })
        }
    }

    /// Consume an optional `;` and step past the statement's last token.
    pub(crate) fn finish_statement(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        self.advance();
    }

    /// Drop the remainder of a failed statement, up to and including its `;`.
    fn skip_statement(&mut self) {
        while !self.current_is(TokenKind::Semicolon) && !self.current_is(TokenKind::Eof) {
            self.advance();
        }
        if self.current_is(TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Run `f` between enter/exit notifications to the trace sink.
    pub(crate) fn traced<R>(
        &mut self,
        production: &'static str,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.trace.enter(production, &self.current, &self.peek);
        let result = f(self);
        self.trace.exit(production);
        result
    }
}
