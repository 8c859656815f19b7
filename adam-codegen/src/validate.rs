//! Checks that a program can be expressed in the generated Rust before any text is rendered.

use adam_parser::ast::{Function, Ident, Stmt};
use adam_parser::visitor::{walk_function, walk_stmt, Visitor};
use thiserror::Error;

use crate::{ARG_BAG, ENTRY_POINT, VALUE_TYPE};

/// Rust keywords (strict, reserved and weak) plus the names the generated code defines itself.
const RESERVED: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "union", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
    ARG_BAG, VALUE_TYPE,
];

/// The AST contains a node the code generator cannot express in Rust.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("identifier `{0}` is reserved in the generated code")]
    ReservedIdent(String),
    #[error("entry function `{0}` cannot declare parameters")]
    EntryParams(String),
    #[error("entry function `{0}` cannot return a value")]
    ReturnInEntry(String),
}

impl RenderError {
    /// The kind of AST node that could not be rendered.
    pub fn node_kind(&self) -> &'static str {
        match self {
            RenderError::ReservedIdent(_) => "Identifier",
            RenderError::EntryParams(_) => "Function",
            RenderError::ReturnInEntry(_) => "ReturnStmt",
        }
    }
}

/// Validation pass. Stops at the first error.
pub struct Validator<'ast> {
    /// The entry function currently being visited, if any.
    entry: Option<&'ast Ident>,
    error: Option<RenderError>,
}

impl<'ast> Validator<'ast> {
    pub fn new() -> Self {
        Self {
            entry: None,
            error: None,
        }
    }

    /// Validates every function of `program`.
    pub fn validate(program: &'ast [Function]) -> Result<(), RenderError> {
        let mut validator = Self::new();
        for func in program {
            validator.visit_function(func);
            if let Some(error) = validator.error.take() {
                return Err(error);
            }
        }
        Ok(())
    }

    fn report(&mut self, error: RenderError) {
        self.error.get_or_insert(error);
    }
}

impl Default for Validator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'ast> Visitor<'ast> for Validator<'ast> {
    fn visit_function(&mut self, func: &'ast Function) {
        self.entry = (func.name.as_str() == ENTRY_POINT).then_some(&func.name);
        if self.entry.is_some() && !func.params.is_empty() {
            self.report(RenderError::EntryParams(func.name.to_string()));
        }
        walk_function(self, func);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if let (Stmt::ReturnStmt(_), Some(entry)) = (stmt, self.entry) {
            self.report(RenderError::ReturnInEntry(entry.to_string()));
        }
        walk_stmt(self, stmt);
    }

    fn visit_ident(&mut self, ident: &'ast Ident) {
        if RESERVED.contains(&ident.as_str()) {
            self.report(RenderError::ReservedIdent(ident.to_string()));
        }
    }
}
