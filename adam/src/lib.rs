//! The adam compiler: source text in, Rust source out.

pub mod driver;
pub mod error;

use adam_codegen::{Codegen, CodegenOptions};
use adam_parser::ast::Function;
use adam_parser::parser::parse_program;

pub use error::CompileError;

/// Options affecting the generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Emit the `Object` runtime type at the top of the output.
    pub include_prelude: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            include_prelude: true,
        }
    }
}

impl From<&CompileOptions> for CodegenOptions {
    fn from(options: &CompileOptions) -> Self {
        CodegenOptions {
            include_prelude: options.include_prelude,
        }
    }
}

/// Parses `source` into a list of functions.
pub fn parse(source: &str) -> Result<Vec<Function>, CompileError> {
    Ok(parse_program(&source.into())?)
}

/// Compiles `source` into the text of a Rust program.
pub fn compile(source: &str, options: &CompileOptions) -> Result<String, CompileError> {
    let program = parse(source)?;
    generate(&program, options)
}

/// Renders an already parsed program.
pub fn generate(program: &[Function], options: &CompileOptions) -> Result<String, CompileError> {
    Ok(Codegen::new(options.into()).codegen_program(program)?)
}
