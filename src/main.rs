// Monkey: lexer and Pratt parser front end

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser as CliParser};
use crossterm::style::Stylize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use monkey::parser::lexer::Lexer;
use monkey::parser::parse::Parser;
use monkey::parser::trace::WriterTrace;
use monkey::repl::{self, theme::DEFAULT_THEME, ReplConfig, ReplMode};

/// Tokenize and parse Monkey source.
///
/// With no FILE, starts an interactive session that echoes the tokens of each
/// line typed.
#[derive(Debug, CliParser)]
#[command(name = "monkey", version, about)]
struct Cli {
    /// Source file to parse. Reads lines interactively when omitted.
    file: Option<PathBuf>,

    /// Print tokens instead of the parsed program
    #[arg(long, requires = "file")]
    tokens: bool,

    /// Interactive mode: print the parsed program for each line
    #[arg(long, conflicts_with_all = ["tokens", "file"])]
    parse: bool,

    /// Write a parse trace of FILE to stderr
    #[arg(long, requires = "file", conflicts_with = "tokens")]
    trace: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_directive = match cli.verbose {
        0 => "monkey=warn",
        1 => "monkey=debug",
        _ => "monkey=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(io::stderr)
        .init();

    let color = !cli.no_color && io::stdout().is_terminal();

    match &cli.file {
        Some(path) => run_file(path, &cli, color),
        None => {
            let config = ReplConfig {
                color,
                mode: if cli.parse { ReplMode::Parse } else { ReplMode::Tokens },
                ..ReplConfig::default()
            };
            run_repl(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_repl(config: &ReplConfig) -> io::Result<()> {
    if config.color {
        println!("{}", "Monkey".with(DEFAULT_THEME.primary));
    } else {
        println!("Monkey");
    }

    debug!(mode = ?config.mode, "starting repl");
    repl::start(io::stdin().lock(), &mut io::stdout().lock(), config)
}

fn run_file(path: &Path, cli: &Cli, color: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let source = fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    info!(path = %path.display(), bytes = source.len(), "read source");

    if cli.tokens {
        repl::print_tokens(&source, &mut io::stdout().lock(), color)?;
        return Ok(ExitCode::SUCCESS);
    }

    let lexer = Lexer::new(&source);
    let (result, errors) = if cli.trace {
        let mut parser = Parser::with_trace(lexer, WriterTrace::new(io::stderr()));
        let result = parser.parse_program();
        (result, parser.errors())
    } else {
        let mut parser = Parser::new(lexer);
        let result = parser.parse_program();
        (result, parser.errors())
    };

    if let Ok(program) = &result {
        info!(statements = program.statements.len(), "parsed program");
        for stmt in &program.statements {
            println!("{}", stmt);
        }
    }

    for error in &errors {
        if color {
            eprintln!("{}", format!("error: {}", error).with(DEFAULT_THEME.error));
        } else {
            eprintln!("error: {}", error);
        }
    }

    if errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn accepts(args: &[&str]) -> bool {
        Cli::try_parse_from(std::iter::once("monkey").chain(args.iter().copied())).is_ok()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_valid_flag_combinations() {
        assert!(accepts(&[]));
        assert!(accepts(&["--parse"]));
        assert!(accepts(&["prog.mk"]));
        assert!(accepts(&["prog.mk", "--tokens"]));
        assert!(accepts(&["prog.mk", "--trace", "-vv"]));
        assert!(accepts(&["--no-color", "--parse"]));
    }

    #[test]
    fn test_ignored_flags_are_rejected() {
        assert!(!accepts(&["prog.mk", "--parse"]));
        assert!(!accepts(&["--parse", "--tokens"]));
        assert!(!accepts(&["--trace"]));
        assert!(!accepts(&["--tokens"]));
        assert!(!accepts(&["prog.mk", "--tokens", "--trace"]));
    }
}
