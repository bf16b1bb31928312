//! # Introduction
//!
//! Front end for Monkey, a small expression-oriented language: a lexer that
//! classifies source text into tokens and a Pratt parser that builds an
//! abstract syntax tree from them.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Program (AST) + diagnostics
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds the AST. Syntax errors are
//!    collected rather than raised; see [`parser::parse::Parser::diagnostics`].
//! 2. [`repl`] — line-oriented interactive driver that echoes tokens or parse
//!    results; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use monkey::parser::parse::Parser;
//!
//! let mut parser = Parser::from_source("let x = 1 + 2 * 3;");
//! let program = parser.parse_program().unwrap();
//! assert!(parser.diagnostics().is_empty());
//! assert_eq!(program.to_string(), "let x = (1 + (2 * 3));");
//! ```

pub mod parser;
pub mod repl;
