//! Runtime support emitted at the top of every generated file.

/// Rust source of the `Object` tagged value type and its operators.
pub const PRELUDE: &str = include_str!("../runtime/object.rs");
