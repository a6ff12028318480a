pub mod ast;
pub mod lexer;
pub mod parser;

#[cfg(test)]
mod parser_tests;

pub use ast::{CaptureGroups, GroupId, MAX_DEPTH, MAX_GROUPS, Node};
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::{Parsed, parse};
