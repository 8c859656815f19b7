//! Abstract syntax tree produced by [`crate::parser`].
//!
//! Nodes own their children by value. The tree is built once by the grammar and only read
//! afterwards.

use std::fmt;

/// An identifier (e.g. `foo`). Always matches `[A-Za-z_][A-Za-z0-9_]*` and is never a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(pub String);

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operators. Each variant stands for its surface symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Not,
}

impl Op {
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Not => "!",
        }
    }
}

/// `fn name(params) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Block,
}

/// A sequence of statements, in execution order. May be empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `let ident = initializer;`
    LetDeclaration { ident: Ident, initializer: Expr },
    /// `expr;`
    ExprStmt(Expr),
    /// `return expr;`
    ReturnStmt(Expr),
    IfStmt(IfStmt),
}

/// `if condition { .. } else ..`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Block,
    pub else_branch: Option<ElseBranch>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    /// `else { .. }`
    Block(Block),
    /// `else if ..`
    If(Box<IfStmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Source text of the literal, `[0-9]+(\.[0-9]+)?`.
    NumberLit(String),
    /// Text between the quotes, escapes left as written.
    StringLit(String),
    BoolLit(bool),
    /// An identifier (e.g. `foo`).
    Identifier(Ident),
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: Op,
        rhs: Box<Expr>,
    },
    /// A prefix expression (e.g. `-x`).
    Unary { op: Op, arg: Box<Expr> },
    /// A call expression (e.g. `foo(1, bar)`).
    FnCall { callee: Ident, args: Vec<Expr> },
    /// A parenthesized expression (e.g. `(1 + 2)`).
    Grouping(Box<Expr>),
}
