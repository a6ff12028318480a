use std::io;
use std::io::IsTerminal;

use anyhow::{Result, bail};

pub const USAGE: &str = "\
usage: regex-cfg [--color=always|never|auto] [--header] [--tokens] [--ast] [PATTERN]

Reads PATTERN (or one line of stdin) and prints an equivalent context-free grammar.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorWhen {
    Always,
    Never,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Translate(Config),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub pattern: Option<String>,
    pub color: ColorWhen,
    pub header: bool,
    pub dump_tokens: bool,
    pub dump_ast: bool,
}

/// Parses arguments, program name excluded.
pub fn parse_args(args: Vec<String>) -> Result<Command> {
    let mut config = Config {
        pattern: None,
        color: ColorWhen::Never,
        header: false,
        dump_tokens: false,
        dump_ast: false,
    };

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--color=always" => config.color = ColorWhen::Always,
            "--color=never" => config.color = ColorWhen::Never,
            "--color=auto" => config.color = ColorWhen::Auto,
            "--header" => config.header = true,
            "--tokens" => config.dump_tokens = true,
            "--ast" => config.dump_ast = true,
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("unknown option '{flag}'"),
            _ if config.pattern.is_some() => bail!("unexpected extra argument '{arg}'"),
            _ => config.pattern = Some(arg),
        }
    }
    Ok(Command::Translate(config))
}

pub fn resolve_use_color(color: &ColorWhen) -> bool {
    match color {
        ColorWhen::Always => true,
        ColorWhen::Never => false,
        ColorWhen::Auto => io::stdout().is_terminal(),
    }
}
