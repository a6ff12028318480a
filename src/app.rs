use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use regex_cfg::{Stage, translate_with};

use crate::cli::{Config, resolve_use_color};
use crate::output::render_grammar;

pub fn run(cfg: Config) -> i32 {
    let stdin = io::stdin();
    run_with(
        &cfg,
        stdin.lock(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

/// Runs one translation against the given streams and returns the exit status.
fn run_with(cfg: &Config, input: impl BufRead, out: &mut impl Write, err: &mut impl Write) -> i32 {
    match try_run(cfg, input, out, err) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "error: {e:#}");
            1
        }
    }
}

fn try_run(
    cfg: &Config,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let use_color = resolve_use_color(&cfg.color);

    let pattern = match &cfg.pattern {
        Some(p) => p.clone(),
        None => read_pattern(input)?,
    };

    let mut dumped = Ok(());
    let grammar = translate_with(&pattern, |stage| {
        if dumped.is_ok() {
            dumped = dump_stage(cfg, stage, &mut *err);
        }
    });
    let grammar = grammar?;
    dumped.context("failed to write debug output")?;

    out.write_all(render_grammar(&grammar, use_color, cfg.header).as_bytes())
        .context("failed to write grammar")?;
    Ok(())
}

fn dump_stage(cfg: &Config, stage: Stage<'_>, err: &mut impl Write) -> io::Result<()> {
    match stage {
        Stage::Tokens(tokens) if cfg.dump_tokens => {
            for token in tokens {
                writeln!(err, "{token:?}")?;
            }
        }
        Stage::Parsed(parsed) if cfg.dump_ast => {
            writeln!(err, "{:#?}", parsed.root)?;
            for (id, node) in &parsed.groups {
                writeln!(err, "group {id}: {node:?}")?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Reads exactly one line; the line terminator is not part of the pattern.
fn read_pattern(mut input: impl BufRead) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read pattern from stdin")?;
    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(trimmed.to_string())
}
