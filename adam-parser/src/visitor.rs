//! Visitor pattern for AST nodes.

use crate::ast::{Block, ElseBranch, Expr, Function, Ident, IfStmt, Stmt};

pub trait Visitor<'ast>: Sized {
    fn visit_function(&mut self, func: &'ast Function) {
        walk_function(self, func);
    }
    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }
    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
    fn visit_ident(&mut self, _ident: &'ast Ident) {}
}

pub fn walk_function<'ast>(visitor: &mut impl Visitor<'ast>, func: &'ast Function) {
    visitor.visit_ident(&func.name);
    for param in &func.params {
        visitor.visit_ident(param);
    }
    visitor.visit_block(&func.body);
}

pub fn walk_block<'ast>(visitor: &mut impl Visitor<'ast>, block: &'ast Block) {
    for stmt in &block.statements {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast Stmt) {
    match stmt {
        Stmt::LetDeclaration { ident, initializer } => {
            visitor.visit_ident(ident);
            visitor.visit_expr(initializer);
        }
        Stmt::ExprStmt(expr) => visitor.visit_expr(expr),
        Stmt::ReturnStmt(expr) => visitor.visit_expr(expr),
        Stmt::IfStmt(if_stmt) => walk_if_stmt(visitor, if_stmt),
    }
}

fn walk_if_stmt<'ast>(visitor: &mut impl Visitor<'ast>, if_stmt: &'ast IfStmt) {
    visitor.visit_expr(&if_stmt.condition);
    visitor.visit_block(&if_stmt.then_branch);
    match &if_stmt.else_branch {
        Some(ElseBranch::Block(block)) => visitor.visit_block(block),
        Some(ElseBranch::If(else_if)) => walk_if_stmt(visitor, else_if),
        None => {}
    }
}

pub fn walk_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast Expr) {
    match expr {
        Expr::NumberLit(_) => {}
        Expr::StringLit(_) => {}
        Expr::BoolLit(_) => {}
        Expr::Identifier(ident) => visitor.visit_ident(ident),
        Expr::Binary { lhs, op: _, rhs } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Expr::Unary { op: _, arg } => visitor.visit_expr(arg),
        Expr::FnCall { callee, args } => {
            visitor.visit_ident(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::Grouping(inner) => visitor.visit_expr(inner),
    }
}
