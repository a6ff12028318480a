use std::collections::HashMap;

use crate::error::CompileError;
use crate::grammar::{Grammar, START_SYMBOL, Symbol};
use crate::regex::{CaptureGroups, GroupId, MAX_DEPTH, MAX_GROUPS, Node};

/// Prefixes of synthesized nonterminals; each kind is numbered independently from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameKind {
    Char,
    NonCapture,
    Lookahead,
    Concat,
    Or,
    Star,
}

impl NameKind {
    const COUNT: usize = 6;

    fn prefix(self) -> &'static str {
        match self {
            NameKind::Char => "CHAR",
            NameKind::NonCapture => "NonCapt",
            NameKind::Lookahead => "LookAh",
            NameKind::Concat => "Concat",
            NameKind::Or => "Or",
            NameKind::Star => "KleeneSt",
        }
    }
}

/// A forward reference lowers its group's subtree in place, and each group is
/// lowered that way at most once, so parsed input stays under this bound.
pub const MAX_COMPILE_DEPTH: usize = MAX_DEPTH * (MAX_GROUPS as usize + 1);

fn group_name(id: GroupId) -> String {
    format!("Group{id}")
}

/// Compiles a parsed pattern into a grammar with start symbol `S`.
pub fn compile(root: &Node, groups: &CaptureGroups) -> Result<Grammar, CompileError> {
    let mut compiler = Compiler::new(groups);
    let top = compiler.compile_node(root, None)?;
    let mut grammar = compiler.finish();
    grammar.add_alternative(START_SYMBOL, vec![Symbol::NonTerminal(top)]);
    Ok(grammar)
}

/// Single-use lowering state: the grammar being built, the nonterminal
/// assigned to each capture group, and the fresh-name counters.
///
/// A capture group and every back-reference to it share one `Group<id>`
/// nonterminal. This only says both derive from the same sub-grammar; a
/// context-free grammar cannot require them to derive the same string.
pub struct Compiler<'a> {
    groups: &'a CaptureGroups,
    grammar: Grammar,
    group_names: HashMap<GroupId, String>,
    counters: [usize; NameKind::COUNT],
    depth: usize,
}

impl<'a> Compiler<'a> {
    pub fn new(groups: &'a CaptureGroups) -> Self {
        Compiler {
            groups,
            grammar: Grammar::new(),
            group_names: HashMap::new(),
            counters: [0; NameKind::COUNT],
            depth: 0,
        }
    }

    /// Compiles `node` under a caller-chosen nonterminal name instead of a
    /// fresh one. Capture groups and references keep their `Group<id>` name.
    pub fn compile_as(&mut self, node: &Node, name: &str) -> Result<String, CompileError> {
        self.compile_node(node, Some(name.to_string()))
    }

    pub fn finish(self) -> Grammar {
        self.grammar
    }

    fn fresh(&mut self, kind: NameKind) -> String {
        let counter = &mut self.counters[kind as usize];
        let name = format!("{}{}", kind.prefix(), counter);
        *counter += 1;
        name
    }

    fn name_or_fresh(&mut self, name: Option<String>, kind: NameKind) -> String {
        name.unwrap_or_else(|| self.fresh(kind))
    }

    fn compile_node(&mut self, node: &Node, name: Option<String>) -> Result<String, CompileError> {
        if self.depth >= MAX_COMPILE_DEPTH {
            return Err(CompileError::TooDeep {
                max: MAX_COMPILE_DEPTH,
            });
        }
        self.depth += 1;
        let result = self.lower(node, name);
        self.depth -= 1;
        result
    }

    fn lower(&mut self, node: &Node, name: Option<String>) -> Result<String, CompileError> {
        match node {
            Node::Char(c) => {
                let nt = self.name_or_fresh(name, NameKind::Char);
                self.grammar.add_alternative(&nt, vec![Symbol::Terminal(*c)]);
                Ok(nt)
            }
            Node::Capture(id, body) => {
                check_group_id(*id)?;
                let nt = self
                    .group_names
                    .entry(*id)
                    .or_insert_with(|| group_name(*id))
                    .clone();
                let inner = self.compile_node(body, None)?;
                self.grammar
                    .add_alternative(&nt, vec![Symbol::NonTerminal(inner)]);
                Ok(nt)
            }
            Node::NonCapture(body) => {
                let nt = self.name_or_fresh(name, NameKind::NonCapture);
                let inner = self.compile_node(body, None)?;
                self.grammar
                    .add_alternative(&nt, vec![Symbol::NonTerminal(inner)]);
                Ok(nt)
            }
            Node::Lookahead(_) => {
                // zero-width: the body adds nothing to the derived language
                let nt = self.name_or_fresh(name, NameKind::Lookahead);
                self.grammar.add_alternative(&nt, Vec::new());
                Ok(nt)
            }
            Node::Concat(operands) => {
                if operands.is_empty() {
                    return Err(CompileError::Internal("concatenation without operands"));
                }
                let nt = self.name_or_fresh(name, NameKind::Concat);
                let mut alternative = Vec::with_capacity(operands.len());
                for operand in operands {
                    alternative.push(Symbol::NonTerminal(self.compile_node(operand, None)?));
                }
                self.grammar.add_alternative(&nt, alternative);
                Ok(nt)
            }
            Node::Alternation(operands) => {
                if operands.is_empty() {
                    return Err(CompileError::Internal("alternation without operands"));
                }
                let nt = self.name_or_fresh(name, NameKind::Or);
                for operand in operands {
                    let inner = self.compile_node(operand, None)?;
                    self.grammar
                        .add_alternative(&nt, vec![Symbol::NonTerminal(inner)]);
                }
                Ok(nt)
            }
            Node::Star(body) => {
                let nt = self.name_or_fresh(name, NameKind::Star);
                let inner = self.compile_node(body, None)?;
                self.grammar.add_alternative(&nt, Vec::new());
                // left-recursive: self first, then one more body
                self.grammar.add_alternative(
                    &nt,
                    vec![Symbol::nonterminal(nt.as_str()), Symbol::NonTerminal(inner)],
                );
                Ok(nt)
            }
            Node::Reference(id) => self.resolve_reference(*id),
        }
    }

    fn resolve_reference(&mut self, id: GroupId) -> Result<String, CompileError> {
        if let Some(nt) = self.group_names.get(&id) {
            return Ok(nt.clone());
        }

        // Forward reference: compile the captured subtree now, before its capture node.
        let groups = self.groups;
        let captured = groups.get(&id).ok_or(CompileError::UndefinedGroup(id))?;
        let nt = group_name(id);
        self.group_names.insert(id, nt.clone());
        let inner = self.compile_node(captured, None)?;
        self.grammar
            .add_alternative(&nt, vec![Symbol::NonTerminal(inner)]);
        Ok(nt)
    }
}

fn check_group_id(id: GroupId) -> Result<(), CompileError> {
    if (1..=MAX_GROUPS).contains(&id) {
        Ok(())
    } else {
        Err(CompileError::Internal("capture group id out of range"))
    }
}
