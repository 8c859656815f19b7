//! Lowers AST into Rust source text.

use adam_parser::ast::{Block, ElseBranch, Expr, Function, IfStmt, Stmt};

use crate::prelude::PRELUDE;
use crate::validate::{RenderError, Validator};
use crate::{ARG_BAG, ENTRY_POINT, PRINT, VALUE_TYPE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Emit the `Object` runtime type at the top of the file.
    pub include_prelude: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            include_prelude: true,
        }
    }
}

/// Generate Rust source from an abstract syntax tree.
///
/// Rendering keeps no state between nodes, so one `Codegen` can render any number of
/// unrelated trees.
#[derive(Debug, Clone, Default)]
pub struct Codegen {
    options: CodegenOptions,
}

impl Codegen {
    pub fn new(options: CodegenOptions) -> Self {
        Self { options }
    }

    /// Validates and renders a whole program, prelude included (unless disabled).
    pub fn codegen_program(&self, program: &[Function]) -> Result<String, RenderError> {
        Validator::validate(program)?;

        let mut code = String::new();
        if self.options.include_prelude {
            code.push_str(PRELUDE);
            code.push('\n');
        }
        let functions: Vec<String> = program
            .iter()
            .map(|func| self.render_function(func))
            .collect();
        code.push_str(&functions.join("\n\n"));
        code.push('\n');
        Ok(code)
    }

    /// The entry function takes no arguments. Every other function takes the argument bag and
    /// binds its parameters from it, so calls never depend on the callee's arity.
    pub fn render_function(&self, func: &Function) -> String {
        if func.name.as_str() == ENTRY_POINT {
            return format!("fn {}() {}", func.name, self.render_block(&func.body));
        }

        let mut lines: Vec<String> = func
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| format!("let {} = {}[{}].clone();", param, ARG_BAG, index))
            .collect();
        lines.extend(self.render_statements(&func.body));
        // falling off the end returns 0
        if !matches!(func.body.statements.last(), Some(Stmt::ReturnStmt(_))) {
            lines.push(format!("{}::Number(0.0)", VALUE_TYPE));
        }

        format!(
            "fn {}({}: Vec<{}>) -> {} {}",
            func.name,
            ARG_BAG,
            VALUE_TYPE,
            VALUE_TYPE,
            braced(&lines)
        )
    }

    pub fn render_block(&self, block: &Block) -> String {
        braced(&self.render_statements(block))
    }

    fn render_statements(&self, block: &Block) -> Vec<String> {
        block
            .statements
            .iter()
            .map(|stmt| self.render_stmt(stmt))
            .collect()
    }

    pub fn render_stmt(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::LetDeclaration { ident, initializer } => {
                format!("let mut {} = {};", ident, self.render_expr(initializer))
            }
            Stmt::ExprStmt(expr) => format!("{};", self.render_expr(expr)),
            Stmt::ReturnStmt(expr) => format!("return {};", self.render_expr(expr)),
            Stmt::IfStmt(if_stmt) => self.render_if(if_stmt),
        }
    }

    fn render_if(&self, if_stmt: &IfStmt) -> String {
        let mut code = format!(
            "if ({}).is_truthy() {}",
            self.render_expr(&if_stmt.condition),
            self.render_block(&if_stmt.then_branch)
        );
        match &if_stmt.else_branch {
            Some(ElseBranch::Block(block)) => {
                code.push_str(" else ");
                code.push_str(&self.render_block(block));
            }
            Some(ElseBranch::If(else_if)) => {
                code.push_str(" else ");
                code.push_str(&self.render_if(else_if));
            }
            None => {}
        }
        code
    }

    /// Precedence is already encoded in the tree shape, so no parentheses are added. Source
    /// parentheses survive as [`Expr::Grouping`].
    pub fn render_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::NumberLit(text) => {
                // make sure the literal is an f64
                if text.contains('.') {
                    format!("{}::Number({})", VALUE_TYPE, text)
                } else {
                    format!("{}::Number({}.0)", VALUE_TYPE, text)
                }
            }
            Expr::StringLit(text) => format!("{}::String(\"{}\".to_string())", VALUE_TYPE, text),
            Expr::BoolLit(val) => format!("{}::Boolean({})", VALUE_TYPE, val),
            Expr::Identifier(ident) => ident.to_string(),
            Expr::Binary { lhs, op, rhs } => format!(
                "{} {} {}",
                self.render_expr(lhs),
                op.symbol(),
                self.render_expr(rhs)
            ),
            Expr::Unary { op, arg } => format!("{}{}", op.symbol(), self.render_expr(arg)),
            Expr::FnCall { callee, args } => {
                let args: Vec<String> = args.iter().map(|arg| self.render_expr(arg)).collect();
                if callee.as_str() == PRINT {
                    if args.is_empty() {
                        "println!()".to_string()
                    } else {
                        let placeholders = vec!["{}"; args.len()].join(" ");
                        format!("println!(\"{}\", {})", placeholders, args.join(", "))
                    }
                } else {
                    format!("{}(vec![{}])", callee, args.join(", "))
                }
            }
            Expr::Grouping(inner) => format!("({})", self.render_expr(inner)),
        }
    }
}

/// Wraps `lines` in braces, one line each.
fn braced(lines: &[String]) -> String {
    if lines.is_empty() {
        "{\n}".to_string()
    } else {
        format!("{{\n{}\n}}", lines.join("\n"))
    }
}
