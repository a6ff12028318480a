use crate::error::SyntaxError;
use crate::regex::ast::{CaptureGroups, GroupId, MAX_DEPTH, MAX_GROUPS, Node};
use crate::regex::lexer::{Token, TokenKind};

/// Output of a successful parse: the tree and the subtree captured by each group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub root: Node,
    pub groups: CaptureGroups,
}

pub fn parse(tokens: &[Token]) -> Result<Parsed, SyntaxError> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        group_counter: 0,
        in_lookahead: false,
        open_groups: 0,
        groups: CaptureGroups::new(),
    };

    let (root, _) = parser.parse_alternation()?;
    if let Some(token) = parser.current() {
        return Err(SyntaxError::TrailingTokens {
            found: token.kind,
            offset: token.offset,
        });
    }
    Ok(Parsed {
        root,
        groups: parser.groups,
    })
}

/// A parsed subtree and its depth, a lone `Char` being 1.
type Sub = (Node, usize);

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    group_counter: GroupId,
    in_lookahead: bool,
    open_groups: usize,
    groups: CaptureGroups,
}

impl Parser<'_> {
    fn current(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        let token = self.current().ok_or(SyntaxError::UnexpectedEof {
            expected: kind.describe(),
        })?;
        if token.kind != kind {
            return Err(SyntaxError::UnexpectedToken {
                expected: kind.describe(),
                found: token.kind,
                offset: token.offset,
            });
        }
        self.pos += 1;
        Ok(token)
    }

    /// Depth of a node wrapping a child of depth `depth`, rejected past `MAX_DEPTH`.
    fn wrap(depth: usize, offset: usize) -> Result<usize, SyntaxError> {
        if depth >= MAX_DEPTH {
            return Err(SyntaxError::TooDeep {
                offset,
                max: MAX_DEPTH,
            });
        }
        Ok(depth + 1)
    }

    /// Parses the body of a group whose opening token is `open`, up to and
    /// including its `)`.
    fn parse_group_body(&mut self, open: Token) -> Result<Sub, SyntaxError> {
        if self.open_groups >= MAX_DEPTH {
            return Err(SyntaxError::TooDeep {
                offset: open.offset,
                max: MAX_DEPTH,
            });
        }
        self.open_groups += 1;
        let inner = self.parse_alternation();
        self.open_groups -= 1;
        let inner = inner?;
        self.expect(TokenKind::Close)?;
        Ok(inner)
    }

    // Alternation := Concatenation ( '|' Concatenation )*
    fn parse_alternation(&mut self) -> Result<Sub, SyntaxError> {
        let start = self.current();
        if let Some(token) = start.filter(|t| t.kind == TokenKind::Or) {
            return Err(SyntaxError::MissingOperand {
                offset: token.offset,
            });
        }

        let (first, mut depth) = self.parse_concatenation()?;
        let mut operands = vec![first];
        while let Some(or) = self.current().filter(|t| t.kind == TokenKind::Or) {
            self.pos += 1;
            match self.current_kind() {
                None | Some(TokenKind::Close) | Some(TokenKind::Or) => {
                    return Err(SyntaxError::MissingOperand { offset: or.offset });
                }
                Some(_) => {
                    let (operand, operand_depth) = self.parse_concatenation()?;
                    operands.push(operand);
                    depth = depth.max(operand_depth);
                }
            }
        }

        if operands.len() == 1 {
            return Ok((operands.swap_remove(0), depth));
        }
        let offset = start.map_or(0, |t| t.offset);
        Ok((Node::Alternation(operands), Self::wrap(depth, offset)?))
    }

    // Concatenation := Repetition+
    fn parse_concatenation(&mut self) -> Result<Sub, SyntaxError> {
        let start = self.current();
        let (first, mut depth) = self.parse_repetition()?;
        let mut operands = vec![first];
        while !matches!(
            self.current_kind(),
            None | Some(TokenKind::Close) | Some(TokenKind::Or)
        ) {
            let (operand, operand_depth) = self.parse_repetition()?;
            operands.push(operand);
            depth = depth.max(operand_depth);
        }

        if operands.len() == 1 {
            return Ok((operands.swap_remove(0), depth));
        }
        let offset = start.map_or(0, |t| t.offset);
        Ok((Node::Concat(operands), Self::wrap(depth, offset)?))
    }

    // Repetition := Atom '*'*
    fn parse_repetition(&mut self) -> Result<Sub, SyntaxError> {
        let (mut node, mut depth) = self.parse_atom()?;
        while let Some(star) = self.current().filter(|t| t.kind == TokenKind::Star) {
            self.pos += 1;
            depth = Self::wrap(depth, star.offset)?;
            node = Node::star(node);
        }
        Ok((node, depth))
    }

    fn parse_atom(&mut self) -> Result<Sub, SyntaxError> {
        let token = self.current().ok_or(SyntaxError::UnexpectedEof {
            expected: "an atom",
        })?;

        match token.kind {
            TokenKind::CaptureStart => {
                if self.in_lookahead {
                    return Err(SyntaxError::CaptureInLookahead {
                        offset: token.offset,
                    });
                }
                self.pos += 1;
                if self.group_counter == MAX_GROUPS {
                    return Err(SyntaxError::TooManyGroups {
                        offset: token.offset,
                        max: MAX_GROUPS,
                    });
                }
                self.group_counter += 1;
                let id = self.group_counter;

                let (inner, depth) = self.parse_group_body(token)?;
                let depth = Self::wrap(depth, token.offset)?;
                self.groups.insert(id, inner.clone());
                Ok((Node::capture(id, inner), depth))
            }
            TokenKind::NonCaptureStart => {
                self.pos += 1;
                let (inner, depth) = self.parse_group_body(token)?;
                Ok((Node::non_capture(inner), Self::wrap(depth, token.offset)?))
            }
            TokenKind::LookaheadStart => {
                if self.in_lookahead {
                    return Err(SyntaxError::NestedLookahead {
                        offset: token.offset,
                    });
                }
                self.pos += 1;
                self.in_lookahead = true;
                let inner = self.parse_group_body(token);
                self.in_lookahead = false;
                let (inner, depth) = inner?;
                Ok((Node::lookahead(inner), Self::wrap(depth, token.offset)?))
            }
            TokenKind::ReferenceStart => {
                self.pos += 1;
                self.expect(TokenKind::Close)?;
                let id = token
                    .payload
                    .and_then(|d| d.to_digit(10))
                    .ok_or(SyntaxError::UnexpectedToken {
                        expected: "a group digit",
                        found: token.kind,
                        offset: token.offset,
                    })?;
                Ok((Node::Reference(id as GroupId), 1))
            }
            TokenKind::Char => {
                self.pos += 1;
                let c = token.payload.ok_or(SyntaxError::UnexpectedToken {
                    expected: "a literal character",
                    found: token.kind,
                    offset: token.offset,
                })?;
                Ok((Node::Char(c), 1))
            }
            TokenKind::Or | TokenKind::Star | TokenKind::Close => {
                Err(SyntaxError::UnexpectedToken {
                    expected: "an atom",
                    found: token.kind,
                    offset: token.offset,
                })
            }
        }
    }
}
