//! Context-free grammar produced from a parsed pattern.
//!
//! A [`Grammar`] maps each nonterminal to its alternatives in the order they
//! were added. Rendering via `Display` gives one `NT --> symbols` line per
//! alternative, with `eps` standing for the empty alternative.

mod compiler;


use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;

pub use compiler::{Compiler, MAX_COMPILE_DEPTH, compile};

pub const START_SYMBOL: &str = "S";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(char),
    NonTerminal(String),
}

impl Symbol {
    pub fn nonterminal(name: impl Into<String>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    pub fn as_nonterminal(&self) -> Option<&str> {
        match self {
            Symbol::NonTerminal(name) => Some(name),
            Symbol::Terminal(_) => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(c) => write!(f, "{c}"),
            Symbol::NonTerminal(name) => f.write_str(name),
        }
    }
}

/// One right-hand side. Empty means epsilon.
pub type Alternative = Vec<Symbol>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    rules: IndexMap<String, Vec<Alternative>>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an alternative, creating the nonterminal on first use.
    pub fn add_alternative(&mut self, nonterminal: &str, alternative: Alternative) {
        match self.rules.get_mut(nonterminal) {
            Some(alternatives) => alternatives.push(alternative),
            None => {
                self.rules.insert(nonterminal.to_string(), vec![alternative]);
            }
        }
    }

    pub fn alternatives(&self, nonterminal: &str) -> Option<&[Alternative]> {
        self.rules.get(nonterminal).map(Vec::as_slice)
    }

    pub fn contains(&self, nonterminal: &str) -> bool {
        self.rules.contains_key(nonterminal)
    }

    /// The single nonterminal the start symbol expands to, once compiled.
    pub fn start(&self) -> Option<&str> {
        match self.alternatives(START_SYMBOL)? {
            [only] => match only.as_slice() {
                [symbol] => symbol.as_nonterminal(),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Alternative])> {
        self.rules
            .iter()
            .map(|(name, alternatives)| (name.as_str(), alternatives.as_slice()))
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every nonterminal that appears on some right-hand side.
    pub fn referenced_nonterminals(&self) -> BTreeSet<&str> {
        self.rules
            .values()
            .flatten()
            .flatten()
            .filter_map(Symbol::as_nonterminal)
            .collect()
    }

    /// Referenced nonterminals that have no rule of their own.
    pub fn dangling_nonterminals(&self) -> Vec<&str> {
        self.referenced_nonterminals()
            .into_iter()
            .filter(|name| !self.contains(name))
            .collect()
    }
}

pub fn render_alternative(alternative: &[Symbol]) -> String {
    if alternative.is_empty() {
        return "eps".to_string();
    }
    alternative
        .iter()
        .map(Symbol::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, alternatives) in self.iter() {
            for alternative in alternatives {
                writeln!(f, "{name} --> {}", render_alternative(alternative))?;
            }
        }
        Ok(())
    }
}
