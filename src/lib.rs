//! Translate a small regular-expression dialect into a context-free grammar.
//!
//! The pipeline runs in three strictly sequential stages:
//! - `regex::lexer` - pattern text to tokens
//! - `regex::parser` - tokens to a syntax tree plus the capture-group table
//! - `grammar` - syntax tree to grammar rules, with `S` as start symbol
//!
//! Supported syntax: lowercase letters, `|`, `*`, `(...)`, `(?:...)`,
//! `(?=...)` and back-references `(?1)` .. `(?9)`.

pub mod error;
pub mod grammar;
pub mod regex;

pub use error::{CompileError, Error, Result, SyntaxError, TokenizeError};
pub use grammar::{Grammar, START_SYMBOL, Symbol};

use regex::{Parsed, Token};

/// Intermediate result handed to the observer of [`translate_with`] as soon
/// as its stage completes.
#[derive(Debug, Clone, Copy)]
pub enum Stage<'a> {
    Tokens(&'a [Token]),
    Parsed(&'a Parsed),
}

/// Runs the whole pipeline on `pattern`.
pub fn translate(pattern: &str) -> Result<Grammar> {
    translate_with(pattern, |_| {})
}

/// Runs the pipeline, reporting each finished stage to `observe` before the
/// next one starts, so earlier stages are seen even if a later one fails.
pub fn translate_with(pattern: &str, mut observe: impl FnMut(Stage<'_>)) -> Result<Grammar> {
    let tokens = regex::tokenize(pattern)?;
    observe(Stage::Tokens(&tokens));
    let parsed = regex::parse(&tokens)?;
    observe(Stage::Parsed(&parsed));
    let grammar = grammar::compile(&parsed.root, &parsed.groups)?;
    Ok(grammar)
}
