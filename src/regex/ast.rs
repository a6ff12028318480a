use std::collections::BTreeMap;

/// Capture group number, `1..=MAX_GROUPS`.
pub type GroupId = u8;

pub const MAX_GROUPS: GroupId = 9;

/// Deepest syntax tree the parser will build. Lowering recurses once per
/// level, so this keeps both stages well inside the default thread stack.
pub const MAX_DEPTH: usize = 50;

/// Subtrees captured by each group, keyed by group number.
pub type CaptureGroups = BTreeMap<GroupId, Node>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Char(char),
    Concat(Vec<Node>),
    Alternation(Vec<Node>),
    Star(Box<Node>),
    Capture(GroupId, Box<Node>),
    NonCapture(Box<Node>),
    Lookahead(Box<Node>), // zero-width, (?=...)
    Reference(GroupId),   // (?1) .. (?9)
}

impl Node {
    pub fn star(node: Node) -> Self {
        Node::Star(Box::new(node))
    }

    pub fn capture(id: GroupId, node: Node) -> Self {
        Node::Capture(id, Box::new(node))
    }

    pub fn non_capture(node: Node) -> Self {
        Node::NonCapture(Box::new(node))
    }

    pub fn lookahead(node: Node) -> Self {
        Node::Lookahead(Box::new(node))
    }
}
