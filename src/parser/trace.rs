//! Parse tracing
//!
//! The parser reports each production it enters and leaves to a [`TraceSink`]
//! supplied by the caller. The default [`NoTrace`] discards everything;
//! [`WriterTrace`] prints an indented call log, one line per production.

use super::token::Token;
use std::io::Write;

pub trait TraceSink {
    fn enter(&mut self, production: &str, current: &Token, peek: &Token);
    fn exit(&mut self, production: &str);
}

/// Sink that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn enter(&mut self, _production: &str, _current: &Token, _peek: &Token) {}
    fn exit(&mut self, _production: &str) {}
}

/// Writes an indented trace to any [`Write`].
///
/// Write failures are ignored: tracing must never change the outcome of a
/// parse.
#[derive(Debug)]
pub struct WriterTrace<W: Write> {
    out: W,
    depth: usize,
}

impl<W: Write> WriterTrace<W> {
    pub fn new(out: W) -> Self {
        Self { out, depth: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for WriterTrace<W> {
    fn enter(&mut self, production: &str, current: &Token, peek: &Token) {
        let _ = writeln!(
            self.out,
            "{:indent$}{} current: {} peek: {}",
            "",
            production,
            current,
            peek,
            indent = self.depth * 4
        );
        self.depth += 1;
    }

    fn exit(&mut self, _production: &str) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::SourceLocation;
    use crate::parser::token::TokenKind;

    #[test]
    fn test_writer_trace_indents_nested_productions() {
        let tok = Token::new(TokenKind::Ident, "x", 0, SourceLocation::new(1, 1));
        let eof = Token::new(TokenKind::Eof, "", 1, SourceLocation::new(1, 2));

        let mut trace = WriterTrace::new(Vec::new());
        trace.enter("outer", &tok, &eof);
        trace.enter("inner", &tok, &eof);
        trace.exit("inner");
        trace.exit("outer");
        trace.enter("next", &eof, &eof);

        let text = String::from_utf8(trace.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "outer current: IDENT 'x' [1:1] peek: EOF '' [1:2]");
        assert!(lines[1].starts_with("    inner"));
        assert!(lines[2].starts_with("next"));
    }
}
