// AST (Abstract Syntax Tree) definitions for Monkey programs
//
// The tree is owned strictly top-down: statements own their expressions and
// expressions own their operands. Every node keeps the token that introduced
// it so later passes can point back at the source.
//
// A left-associative chain only grows the tree to the left and the parser
// builds it in a loop, so its depth is bounded by the input length alone.
// Dropping and rendering expressions therefore walk the tree with an explicit
// stack instead of recursing once per node.

use super::token::{Token, TokenKind};
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Not, // !x
    Neg, // -x
}

impl PrefixOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            PrefixOperator::Not => "!",
            PrefixOperator::Neg => "-",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    NotEq,
    Lt,
    Gt,
}

impl InfixOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            InfixOperator::Add => "+",
            InfixOperator::Sub => "-",
            InfixOperator::Mul => "*",
            InfixOperator::Div => "/",
            InfixOperator::Eq => "==",
            InfixOperator::NotEq => "!=",
            InfixOperator::Lt => "<",
            InfixOperator::Gt => ">",
        }
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: PrefixOperator,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfixExpression {
    pub token: Token,
    pub operator: InfixOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

/// Expression nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
}

impl Expression {
    /// The token that introduced this expression. For infix expressions this
    /// is the operator.
    pub fn token(&self) -> &Token {
        match self {
            Expression::Identifier(ident) => &ident.token,
            Expression::IntegerLiteral(lit) => &lit.token,
            Expression::Prefix(prefix) => &prefix.token,
            Expression::Infix(infix) => &infix.token,
        }
    }

    pub fn location(&self) -> SourceLocation {
        self.token().location
    }

    /// Leaf left behind in a parent once its operand has been detached.
    fn hollow() -> Expression {
        Expression::IntegerLiteral(IntegerLiteral {
            token: Token::new(TokenKind::Illegal, String::new(), 0, SourceLocation::new(0, 0)),
            value: 0,
        })
    }

    /// Move every compound operand of `self` onto `pending`.
    fn detach_operands(&mut self, pending: &mut Vec<Expression>) {
        let mut detach = |operand: &mut Box<Expression>| {
            if matches!(**operand, Expression::Prefix(_) | Expression::Infix(_)) {
                pending.push(std::mem::replace(&mut **operand, Expression::hollow()));
            }
        };
        match self {
            Expression::Prefix(prefix) => detach(&mut prefix.operand),
            Expression::Infix(infix) => {
                detach(&mut infix.left);
                detach(&mut infix.right);
            }
            Expression::Identifier(_) | Expression::IntegerLiteral(_) => {}
        }
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_operands(&mut pending);
        // Each popped node has only leaf operands left once detached, so its
        // own drop does not recurse.
        while let Some(mut expr) = pending.pop() {
            expr.detach_operands(&mut pending);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
}

impl Statement {
    pub fn token(&self) -> &Token {
        match self {
            Statement::Let(stmt) => &stmt.token,
            Statement::Return(stmt) => &stmt.token,
            Statement::Expression(stmt) => &stmt.token,
        }
    }

    pub fn location(&self) -> SourceLocation {
        self.token().location
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>, // In source order
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

enum Piece<'a> {
    Node(&'a Expression),
    Text(&'static str),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pieces are pushed in reverse so they pop in output order.
        let mut stack = vec![Piece::Node(self)];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Node(Expression::Identifier(ident)) => write!(f, "{}", ident)?,
                Piece::Node(Expression::IntegerLiteral(lit)) => write!(f, "{}", lit.value)?,
                Piece::Node(Expression::Prefix(prefix)) => stack.extend([
                    Piece::Text(")"),
                    Piece::Node(&prefix.operand),
                    Piece::Text(prefix.operator.symbol()),
                    Piece::Text("("),
                ]),
                Piece::Node(Expression::Infix(infix)) => stack.extend([
                    Piece::Text(")"),
                    Piece::Node(&infix.right),
                    Piece::Text(" "),
                    Piece::Text(infix.operator.symbol()),
                    Piece::Text(" "),
                    Piece::Node(&infix.left),
                    Piece::Text("("),
                ]),
            }
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(stmt) => write!(f, "let {} = {};", stmt.name, stmt.value),
            Statement::Return(stmt) => write!(f, "return {};", stmt.value),
            Statement::Expression(stmt) => write!(f, "{}", stmt.expression),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
