pub mod ast;
pub mod combinator;
pub mod parser;
pub mod visitor;
