//! Statement parsing implementation
//!
//! Statements:
//! - `let <ident> = <expr>;`
//! - `return <expr>;`
//! - `<expr>;`
//!
//! The trailing `;` is optional everywhere. Each production starts with the
//! statement's first token as `current` and finishes with `current` on the
//! first token after the statement.

use crate::parser::ast::*;
use crate::parser::expressions::Precedence;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;
use crate::parser::trace::TraceSink;

impl<S: TraceSink> Parser<S> {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.traced("parse_statement", |p| match p.current.kind {
            TokenKind::Let => p.parse_let_statement(),
            TokenKind::Return => p.parse_return_statement(),
            _ => p.parse_expression_statement(),
        })
    }

    /// Parse let statement
    fn parse_let_statement(&mut self) -> Result<Statement, ParseError> {
        self.traced("parse_let_statement", |p| {
            let token = p.current.clone();

            p.expect_peek(TokenKind::Ident)?;
            let name = Identifier {
                token: p.current.clone(),
                name: p.current.literal.clone(),
            };

            p.expect_peek(TokenKind::Assign)?;
            p.advance();

            let value = p.parse_expression(Precedence::Lowest)?;
            p.finish_statement();

            Ok(Statement::Let(LetStatement { token, name, value }))
        })
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        self.traced("parse_return_statement", |p| {
            let token = p.current.clone();
            p.advance();

            let value = p.parse_expression(Precedence::Lowest)?;
            p.finish_statement();

            Ok(Statement::Return(ReturnStatement { token, value }))
        })
    }

    /// Parse expression statement
    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        self.traced("parse_expression_statement", |p| {
            let token = p.current.clone();

            let expression = p.parse_expression(Precedence::Lowest)?;
            p.finish_statement();

            Ok(Statement::Expression(ExpressionStatement { token, expression }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Program {
        let mut parser = Parser::from_source(source);
        let program = parser.parse_program().expect("parse aborted");
        assert!(
            parser.diagnostics().is_empty(),
            "unexpected diagnostics: {:?}",
            parser.errors()
        );
        program
    }

    #[test]
    fn test_let_statements() {
        let program = parse_ok("let x = 5;\nlet y = 10;\nlet foobar = 838383;");

        let names: Vec<_> = program
            .statements
            .iter()
            .map(|stmt| match stmt {
                Statement::Let(stmt) => stmt.name.name.as_str(),
                other => panic!("Expected let statement, got {:?}", other),
            })
            .collect();
        assert_eq!(names, vec!["x", "y", "foobar"]);
    }

    #[test]
    fn test_let_without_semicolons() {
        let program = parse_ok("let x = 10\nlet y = 20");

        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.statements[1].location(), SourceLocation::new(2, 1));
        assert_eq!(program.to_string(), "let x = 10;let y = 20;");
    }

    #[test]
    fn test_let_value_is_full_expression() {
        let program = parse_ok("let a = b + c * 2;");
        assert_eq!(program.to_string(), "let a = (b + (c * 2));");
    }

    #[test]
    fn test_return_statements() {
        let program = parse_ok("return 5; return 10; return x + y;");

        assert_eq!(program.statements.len(), 3);
        for stmt in &program.statements {
            assert!(matches!(stmt, Statement::Return(_)));
            assert_eq!(stmt.token().literal, "return");
        }
        assert_eq!(program.to_string(), "return 5;return 10;return (x + y);");
    }

    #[test]
    fn test_expression_statement() {
        let program = parse_ok("foobar;");

        match &program.statements[0] {
            Statement::Expression(stmt) => match &stmt.expression {
                Expression::Identifier(ident) => assert_eq!(ident.name, "foobar"),
                other => panic!("Expected identifier, got {:?}", other),
            },
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_let_missing_assign() {
        let mut parser = Parser::from_source("let x 5;");
        let program = parser.parse_program().unwrap();

        assert!(program.statements.is_empty());
        assert_eq!(
            parser.errors(),
            vec!["expected next token to be =, got INTEGER '5' [1:7] instead"]
        );
    }

    #[test]
    fn test_return_missing_value() {
        let mut parser = Parser::from_source("return;");
        let program = parser.parse_program().unwrap();

        assert!(program.statements.is_empty());
        assert_eq!(parser.errors(), vec!["no prefix parse function for ; found at 1:7"]);
    }

    #[test]
    fn test_adjacent_expressions_split_into_statements() {
        let program = parse_ok("a b");
        assert_eq!(program.statements.len(), 2);
    }
}
