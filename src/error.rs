use thiserror::Error;

use crate::regex::{GroupId, TokenKind};

/// Any failure of the pattern-to-grammar pipeline.
///
/// Every stage fails fast: the first error aborts the translation and no
/// partial grammar is returned.
///
/// The stage error is folded into the message rather than exposed as a
/// `source`, so an `{:#}` error chain names it once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("tokenization failed: {0}")]
    Tokenize(TokenizeError),
    #[error("syntax error: {0}")]
    Syntax(SyntaxError),
    #[error("compilation failed: {0}")]
    Compile(CompileError),
}

impl From<TokenizeError> for Error {
    fn from(err: TokenizeError) -> Self {
        Error::Tokenize(err)
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Error::Syntax(err)
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        Error::Compile(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("pattern is empty")]
    EmptyInput,
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("expected ':', '=' or a digit after \"(?\", found {ch:?} at offset {offset}")]
    BadGroupPrefix { ch: char, offset: usize },
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("expected {expected}, found {found} at offset {offset}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        offset: usize,
    },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("unconsumed {found} at offset {offset} after a complete pattern")]
    TrailingTokens { found: TokenKind, offset: usize },
    #[error("'|' at offset {offset} is missing an operand")]
    MissingOperand { offset: usize },
    #[error("capture group at offset {offset} exceeds the limit of {max} groups")]
    TooManyGroups { offset: usize, max: GroupId },
    #[error("capture group at offset {offset} is not allowed inside a lookahead")]
    CaptureInLookahead { offset: usize },
    #[error("lookahead at offset {offset} is nested inside another lookahead")]
    NestedLookahead { offset: usize },
    #[error("pattern nests deeper than {max} levels at offset {offset}")]
    TooDeep { offset: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("capture group {0} is not defined")]
    UndefinedGroup(GroupId),
    #[error("syntax tree is nested deeper than {max} levels")]
    TooDeep { max: usize },
    #[error("malformed syntax tree: {0}")]
    Internal(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
