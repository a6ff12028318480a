use super::ast::*;
use super::lexer::{TokenKind, tokenize};
use super::parser::*;
use crate::error::SyntaxError;

fn run(pattern: &str) -> Result<Parsed, SyntaxError> {
    parse(&tokenize(pattern).expect("pattern must tokenize"))
}

fn root(pattern: &str) -> Node {
    run(pattern).unwrap().root
}

fn ch(c: char) -> Node {
    Node::Char(c)
}

mod structure {
    use super::*;

    #[test]
    fn single_char_is_not_wrapped() {
        assert_eq!(root("a"), ch('a'));
    }

    #[test]
    fn concatenation() {
        assert_eq!(root("abc"), Node::Concat(vec![ch('a'), ch('b'), ch('c')]));
    }

    #[test]
    fn alternation_binds_looser_than_concatenation() {
        assert_eq!(
            root("ab|c"),
            Node::Alternation(vec![Node::Concat(vec![ch('a'), ch('b')]), ch('c')])
        );
    }

    #[test]
    fn star_applies_to_atom() {
        assert_eq!(
            root("ab*"),
            Node::Concat(vec![ch('a'), Node::star(ch('b'))])
        );
    }

    #[test]
    fn repeated_star_nests() {
        assert_eq!(root("a**"), Node::star(Node::star(ch('a'))));
    }

    #[test]
    fn groups() {
        assert_eq!(
            root("(a)(?:b)(?=c)"),
            Node::Concat(vec![
                Node::capture(1, ch('a')),
                Node::non_capture(ch('b')),
                Node::lookahead(ch('c')),
            ])
        );
    }

    #[test]
    fn reference_carries_digit() {
        assert_eq!(
            root("(a)(?1)"),
            Node::Concat(vec![Node::capture(1, ch('a')), Node::Reference(1)])
        );
    }

    #[test]
    fn forward_reference_parses() {
        assert_eq!(
            root("(?2)(a)(b)"),
            Node::Concat(vec![
                Node::Reference(2),
                Node::capture(1, ch('a')),
                Node::capture(2, ch('b')),
            ])
        );
    }
}

mod capture_table {
    use super::*;

    #[test]
    fn groups_numbered_by_opening_paren() {
        let parsed = run("((a)b)").unwrap();
        assert_eq!(parsed.groups.len(), 2);
        assert_eq!(
            parsed.groups[&1],
            Node::Concat(vec![Node::capture(2, ch('a')), ch('b')])
        );
        assert_eq!(parsed.groups[&2], ch('a'));
    }

    #[test]
    fn nine_groups_allowed() {
        let parsed = run("(a)(a)(a)(a)(a)(a)(a)(a)(a)").unwrap();
        let ids: Vec<GroupId> = parsed.groups.keys().copied().collect();
        assert_eq!(ids, (1..=MAX_GROUPS).collect::<Vec<_>>());
    }

    #[test]
    fn lookahead_after_lookahead_is_fine() {
        let parsed = run("(?=a)(?=b)(c)").unwrap();
        assert_eq!(parsed.groups[&1], ch('c'));
    }
}

mod errors {
    use super::*;

    #[test]
    fn too_many_groups() {
        assert_eq!(
            run("(a)(a)(a)(a)(a)(a)(a)(a)(a)(a)"),
            Err(SyntaxError::TooManyGroups { offset: 27, max: 9 })
        );
    }

    #[test]
    fn capture_inside_lookahead() {
        assert_eq!(
            run("(?=(a))"),
            Err(SyntaxError::CaptureInLookahead { offset: 3 })
        );
    }

    #[test]
    fn capture_deep_inside_lookahead() {
        assert_eq!(
            run("(?=b(?:c|(a)))"),
            Err(SyntaxError::CaptureInLookahead { offset: 9 })
        );
    }

    #[test]
    fn nested_lookahead() {
        assert_eq!(
            run("(?=(?=a))"),
            Err(SyntaxError::NestedLookahead { offset: 3 })
        );
    }

    #[test]
    fn missing_right_operand() {
        assert_eq!(run("a|"), Err(SyntaxError::MissingOperand { offset: 1 }));
        assert_eq!(run("(a|)"), Err(SyntaxError::MissingOperand { offset: 2 }));
        assert_eq!(run("a||b"), Err(SyntaxError::MissingOperand { offset: 1 }));
    }

    #[test]
    fn missing_left_operand() {
        assert_eq!(run("|a"), Err(SyntaxError::MissingOperand { offset: 0 }));
        assert_eq!(run("(|a)"), Err(SyntaxError::MissingOperand { offset: 1 }));
    }

    #[test]
    fn empty_group() {
        assert_eq!(
            run("()"),
            Err(SyntaxError::UnexpectedToken {
                expected: "an atom",
                found: TokenKind::Close,
                offset: 1,
            })
        );
    }

    #[test]
    fn leading_star() {
        assert_eq!(
            run("*a"),
            Err(SyntaxError::UnexpectedToken {
                expected: "an atom",
                found: TokenKind::Star,
                offset: 0,
            })
        );
    }

    #[test]
    fn unclosed_group() {
        assert_eq!(
            run("(a"),
            Err(SyntaxError::UnexpectedEof {
                expected: TokenKind::Close.describe(),
            })
        );
    }

    #[test]
    fn reference_with_content() {
        assert_eq!(
            run("(a)(?1b)"),
            Err(SyntaxError::UnexpectedToken {
                expected: "')'",
                found: TokenKind::Char,
                offset: 6,
            })
        );
    }

    #[test]
    fn trailing_close() {
        assert_eq!(
            run("a)b"),
            Err(SyntaxError::TrailingTokens {
                found: TokenKind::Close,
                offset: 1,
            })
        );
    }

    #[test]
    fn star_chain_deeper_than_limit() {
        let pattern = format!("a{}", "*".repeat(MAX_DEPTH));
        assert_eq!(
            run(&pattern),
            Err(SyntaxError::TooDeep {
                offset: MAX_DEPTH,
                max: MAX_DEPTH,
            })
        );
    }

    #[test]
    fn group_nesting_deeper_than_limit() {
        let pattern = format!("{}a{}", "(?:".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(
            run(&pattern),
            Err(SyntaxError::TooDeep {
                offset: 0,
                max: MAX_DEPTH,
            })
        );
    }

    #[test]
    fn runaway_open_groups_stop_at_limit() {
        let pattern = format!("{}a", "(?:".repeat(10_000));
        assert_eq!(
            run(&pattern),
            Err(SyntaxError::TooDeep {
                offset: 3 * MAX_DEPTH,
                max: MAX_DEPTH,
            })
        );
    }
}

mod depth {
    use super::*;

    #[test]
    fn star_chain_at_limit_parses() {
        let pattern = format!("a{}", "*".repeat(MAX_DEPTH - 1));
        let mut node = root(&pattern);
        let mut stars = 0;
        while let Node::Star(inner) = node {
            stars += 1;
            node = *inner;
        }
        assert_eq!(stars, MAX_DEPTH - 1);
        assert_eq!(node, ch('a'));
    }

    #[test]
    fn wrappers_count_towards_depth() {
        // Concat and Alternation each add a level around their operands.
        let stars = "*".repeat(MAX_DEPTH - 2);
        assert!(run(&format!("ba{stars}")).is_ok());
        assert!(run(&format!("c|ba{stars}")).is_err());
    }
}
