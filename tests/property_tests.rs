//! Property-based tests for the lexer and parser.
//!
//! 1. **Lexer never panics** and always ends with EOF
//! 2. **Lexing is deterministic** — same input, same tokens and positions
//! 3. **EOF is sticky** — calls past the end keep returning EOF
//! 4. **Parser never panics** and never stalls on arbitrary input
//! 5. **Well-formed expressions** parse cleanly with one paren pair per operator
//! 6. **Equal precedence associates left**

use monkey::parser::lexer::Lexer;
use monkey::parser::parse::Parser;
use monkey::parser::token::TokenKind;
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

const BINARY_OPS: &[&str] = &["+", "-", "*", "/", "==", "!=", "<", ">"];
const PREFIX_OPS: &[&str] = &["", "", "!", "-"];
const ADDITIVE_OPS: &[&str] = &["+", "-"];
const FRAGMENTS: &[&str] = &[
    "let", "return", "fn", "if", "x", "42", "08", "=", "==", "!", "+", "-", "*", ";", "(", ")", "{",
    "}", ",", "^", "\n",
];

fn operand() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,5}"
            .prop_filter("keywords are not operands", |s| {
                !matches!(s.as_str(), "fn" | "let" | "true" | "false" | "if" | "else" | "return")
            }),
        (0u32..100_000).prop_map(|n| n.to_string()),
    ]
}

fn prefixed_operand() -> impl Strategy<Value = (String, usize)> {
    (prop::sample::select(PREFIX_OPS), operand())
        .prop_map(|(op, operand)| (format!("{op}{operand}"), usize::from(!op.is_empty())))
}

/// Source text of a flat operator chain plus the number of operators in it.
fn expression() -> impl Strategy<Value = (String, usize)> {
    (
        prefixed_operand(),
        prop::collection::vec((prop::sample::select(BINARY_OPS), prefixed_operand()), 0..8),
    )
        .prop_map(|((first, mut ops), rest)| {
            let mut text = first;
            for (op, (operand, prefixes)) in rest {
                text.push_str(&format!(" {op} {operand}"));
                ops += 1 + prefixes;
            }
            (text, ops)
        })
}

/// Token-shaped fragments, valid or not, for exercising the parser.
fn fragment_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40).prop_map(|parts| parts.join(" "))
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn lexer_never_panics(input in "\\PC{0,300}") {
        let tokens = Lexer::new(&input).tokenize();
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert!(tokens[..tokens.len() - 1].iter().all(|t| t.kind != TokenKind::Eof));
    }

    #[test]
    fn lexer_is_deterministic(input in "\\PC{0,300}") {
        prop_assert_eq!(Lexer::new(&input).tokenize(), Lexer::new(&input).tokenize());
    }

    #[test]
    fn eof_is_sticky(input in "[ a-z0-9=!+*/<>;(){},^-]{0,50}", extra in 1usize..5) {
        let mut lexer = Lexer::new(&input);
        while lexer.next_token().kind != TokenKind::Eof {}
        for _ in 0..extra {
            prop_assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn token_positions_are_increasing(input in "[ a-z0-9=!+;\n]{0,80}") {
        let tokens = Lexer::new(&input).tokenize();
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].offset < pair[1].offset || pair[1].kind == TokenKind::Eof);
            prop_assert!(
                (pair[0].line(), pair[0].column()) < (pair[1].line(), pair[1].column())
                    || pair[1].kind == TokenKind::Eof
            );
        }
    }

    #[test]
    fn parser_never_panics_or_stalls(input in fragment_soup()) {
        let mut parser = Parser::from_source(&input);
        let result = parser.parse_program();
        prop_assert!(result.is_ok());
        prop_assert!(parser.diagnostics().iter().all(|d| !d.is_fatal()));
    }

    #[test]
    fn parser_never_panics_on_arbitrary_text(input in "\\PC{0,200}") {
        let mut parser = Parser::from_source(&input);
        let _ = parser.parse_program();
    }

    #[test]
    fn well_formed_expressions_parse_cleanly((source, operators) in expression()) {
        let mut parser = Parser::from_source(&source);
        let program = parser.parse_program().unwrap();

        prop_assert!(parser.diagnostics().is_empty(), "{}: {:?}", source, parser.errors());
        prop_assert_eq!(program.statements.len(), 1);

        let rendered = program.to_string();
        prop_assert_eq!(rendered.matches('(').count(), operators);
        prop_assert_eq!(rendered.matches(')').count(), operators);
    }

    #[test]
    fn equal_precedence_is_left_associative(
        first in "[a-z]",
        rest in prop::collection::vec((prop::sample::select(ADDITIVE_OPS), "[a-z]"), 1..6),
    ) {
        let mut source = first.clone();
        let mut expected = first;
        for (op, operand) in &rest {
            source.push_str(&format!(" {op} {operand}"));
            expected = format!("({expected} {op} {operand})");
        }

        let mut parser = Parser::from_source(&source);
        let program = parser.parse_program().unwrap();
        prop_assert_eq!(program.to_string(), expected);
    }
}
