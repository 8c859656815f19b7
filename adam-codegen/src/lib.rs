//! Renders the adam AST as Rust source.

pub mod codegen;
pub mod prelude;
pub mod validate;

pub use codegen::{Codegen, CodegenOptions};
pub use validate::RenderError;

/// Name of the function rendered as the Rust entry point.
pub const ENTRY_POINT: &str = "main";
/// Name of the argument bag parameter of every non-entry function.
pub const ARG_BAG: &str = "args";
/// The tagged value type every expression evaluates to.
pub const VALUE_TYPE: &str = "Object";
/// Built-in function rendered as `println!`.
pub const PRINT: &str = "print";
