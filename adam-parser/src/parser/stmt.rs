use super::*;
use crate::ast::{Block, ElseBranch, IfStmt, Stmt};
use crate::combinator::one_of;

static STATEMENT: Lazy<Parser<Stmt>> = Lazy::new(|| {
    one_of([
        let_declaration(),
        return_stmt(),
        IF_STMT.clone().map(Stmt::IfStmt),
        expr_stmt(),
    ])
});

static IF_STMT: Lazy<Parser<IfStmt>> = Lazy::new(if_stmt);

/// Parses a statement.
pub fn statement() -> Parser<Stmt> {
    STATEMENT.clone()
}

/// `let ident = expr;`
fn let_declaration() -> Parser<Stmt> {
    right(keyword("let"), ident())
        .then(right(symbol("="), expression()))
        .skip(symbol(";"))
        .map(|(ident, initializer)| Stmt::LetDeclaration { ident, initializer })
}

fn return_stmt() -> Parser<Stmt> {
    surround(keyword("return"), expression(), symbol(";")).map(Stmt::ReturnStmt)
}

/// An expression statement. The terminating `;` is mandatory.
fn expr_stmt() -> Parser<Stmt> {
    expression().skip(symbol(";")).map(Stmt::ExprStmt)
}

/// `if expr block ("else" (if_stmt | block))?`
fn if_stmt() -> Parser<IfStmt> {
    let else_branch = lazy(|| IF_STMT.clone())
        .map(|else_if| ElseBranch::If(Box::new(else_if)))
        .or(block().map(ElseBranch::Block));

    right(keyword("if"), expression())
        .then(block())
        .then(right(keyword("else"), else_branch).optional())
        .map(|((condition, then_branch), else_branch)| IfStmt {
            condition,
            then_branch,
            else_branch,
        })
}

/// `block := "{" statement* "}"`
pub fn block() -> Parser<Block> {
    surround(symbol("{"), lazy(statement).many0(), symbol("}")).map(Block::new)
}

/// `params := "(" (identifier ("," identifier)* ","?)? ")"`
pub fn params() -> Parser<Vec<Ident>> {
    surround(symbol("("), comma_separated(ident()), symbol(")"))
}

/// `function := "fn" identifier params block`
pub fn function() -> Parser<Function> {
    right(keyword("fn"), ident())
        .then(params())
        .then(block())
        .map(|((name, params), body)| Function { name, params, body })
}
