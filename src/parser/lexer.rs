//! Lexer (tokenizer) for Monkey source code
//!
//! Pull-based: the parser asks for one [`Token`] at a time with
//! [`Lexer::next_token`]. The lexer never fails. Characters it does not
//! recognise come back as [`TokenKind::Illegal`] tokens, and once the input is
//! exhausted every further call returns an EOF token.

use super::ast::SourceLocation;
use super::token::{lookup_ident, Token, TokenKind};

/// Lexer over one immutable source text.
#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input, ending with (and including) the EOF token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }

        tokens
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let offset = self.position;
        let loc = self.current_location();

        let ch = match self.peek() {
            // A NUL character ends the input just like running out of text.
            None | Some('\0') => return Token::new(TokenKind::Eof, "", offset, loc),
            Some(ch) => ch,
        };

        if ch.is_ascii_alphabetic() || ch == '_' {
            return self.identifier_or_keyword(offset, loc);
        }

        if ch.is_ascii_digit() {
            return self.number_literal(offset, loc);
        }

        self.advance();

        let kind = match ch {
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    return Token::new(TokenKind::Eq, "==", offset, loc);
                }
                TokenKind::Assign
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    return Token::new(TokenKind::NotEq, "!=", offset, loc);
                }
                TokenKind::Bang
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            _ => TokenKind::Illegal,
        };

        Token::new(kind, ch, offset, loc)
    }

    /// Scan an integer literal. The text is kept verbatim; numeric conversion
    /// is left to the parser.
    fn number_literal(&mut self, offset: usize, loc: SourceLocation) -> Token {
        let literal = self.take_while(|ch| ch.is_ascii_digit());
        Token::new(TokenKind::Int, literal, offset, loc)
    }

    /// Scan an identifier or keyword
    fn identifier_or_keyword(&mut self, offset: usize, loc: SourceLocation) -> Token {
        let ident = self.take_while(|ch| ch.is_ascii_alphanumeric() || ch == '_');
        Token::new(lookup_ident(&ident), ident, offset, loc)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }

        text
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        match ch {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            '\r' => {}
            _ => self.column += 1,
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
