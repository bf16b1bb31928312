//! Line-oriented interactive driver.
//!
//! Every input line is handled on its own: a fresh [`Lexer`] is built for it
//! and, depending on [`ReplMode`], its tokens or its parse result are echoed.
//! Nothing carries over between lines.
//!
//! - **[`theme`]** — colour palette for token and diagnostic output

pub mod theme;

use crate::parser::lexer::Lexer;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;
use crossterm::style::Stylize;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use theme::DEFAULT_THEME;
use tracing::debug;

/// What the REPL prints for each line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplMode {
    /// One line per token, up to end of input.
    #[default]
    Tokens,
    /// The rendered AST followed by any diagnostics.
    Parse,
}

#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub prompt: String,
    /// Emit ANSI colours.
    pub color: bool,
    pub mode: ReplMode,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: ">> ".to_string(),
            color: true,
            mode: ReplMode::default(),
        }
    }
}

/// Run the read loop until `input` is exhausted.
pub fn start<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    config: &ReplConfig,
) -> io::Result<()> {
    let mut line = String::new();

    loop {
        write!(out, "{}", config.prompt)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let source = line.trim_end_matches(['\n', '\r']);

        match config.mode {
            ReplMode::Tokens => print_tokens(source, out, config.color)?,
            ReplMode::Parse => print_parse(source, out, config.color)?,
        }
    }
}

/// Print every token of `source` except the final EOF.
pub fn print_tokens<W: Write>(source: &str, out: &mut W, color: bool) -> io::Result<()> {
    let mut lexer = Lexer::new(source);
    let mut count = 0;

    loop {
        let token = lexer.next_token();
        if token.is(TokenKind::Eof) {
            break;
        }
        let color_of = DEFAULT_THEME.token_color(token.kind);
        write_styled(out, &token, color.then_some(color_of))?;
        count += 1;
    }

    debug!(tokens = count, "lexed line");
    Ok(())
}

/// Parse `source` and print the rendered program, then each diagnostic.
pub fn print_parse<W: Write>(source: &str, out: &mut W, color: bool) -> io::Result<()> {
    let mut parser = Parser::from_source(source);
    let result = parser.parse_program();

    if let Ok(program) = &result {
        if !program.statements.is_empty() {
            write_styled(out, program, color.then_some(DEFAULT_THEME.success))?;
        }
    }

    for diagnostic in parser.diagnostics() {
        write_styled(
            out,
            format_args!("error: {}", diagnostic),
            color.then_some(DEFAULT_THEME.error),
        )?;
    }

    debug!(
        diagnostics = parser.diagnostics().len(),
        aborted = result.is_err(),
        "parsed line"
    );
    Ok(())
}

fn write_styled<W: Write>(
    out: &mut W,
    value: impl Display,
    color: Option<crossterm::style::Color>,
) -> io::Result<()> {
    match color {
        Some(color) => writeln!(out, "{}", value.to_string().with(color)),
        None => writeln!(out, "{}", value),
    }
}
