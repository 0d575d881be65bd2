pub mod ast;
pub mod parser;
mod precedence;

pub use ast::*;
pub use parser::{ParseError, Parser};
pub use precedence::Precedence;
