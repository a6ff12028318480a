use regex_cfg::Grammar;
use regex_cfg::grammar::render_alternative;

const COLOR_START: &str = "\x1b[01;31m";
const COLOR_RESET: &str = "\x1b[m";
const HEADER: &str = "Context-free grammar:";

pub fn maybe_colorize(s: &str, use_color: bool) -> String {
    if use_color {
        format!("{COLOR_START}{s}{COLOR_RESET}")
    } else {
        s.to_string()
    }
}

/// One `NT --> symbols` line per alternative, in insertion order.
pub fn render_grammar(grammar: &Grammar, use_color: bool, header: bool) -> String {
    let mut out = String::new();
    if header {
        out.push_str(HEADER);
        out.push('\n');
    }
    for (name, alternatives) in grammar.iter() {
        let lhs = maybe_colorize(name, use_color);
        for alternative in alternatives {
            out.push_str(&format!("{lhs} --> {}\n", render_alternative(alternative)));
        }
    }
    out
}
