//! Monkey source code parser
//!
//! This module transforms Monkey source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token kinds and the keyword table
//! - [`lexer`]: Tokenization (source text → tokens), one token per call
//! - [`parse`]: Parsing (tokens → AST), diagnostics and the top-level loop
//! - [`ast`]: AST node definitions
//! - [`trace`]: Caller-supplied parse tracing
//!
//! # Supported Language Subset
//!
//! - Statements: `let <name> = <expr>`, `return <expr>`, expression statements,
//!   each with an optional trailing `;`
//! - Expressions: identifiers, decimal integers, unary `!`/`-`, binary
//!   `+ - * / == != < >`
//!
//! The lexer also recognises `fn`, `if`, `else`, `true`, `false`, braces and
//! commas, but no expression form starts with them yet.
//!
//! # Parser Implementation
//!
//! Hand-written Pratt parser: precedence climbing with a prefix handler per
//! token kind and a binding power per binary operator. No external parser
//! generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod token;
pub mod trace;

pub use expressions::{parse_int_literal, Precedence};
