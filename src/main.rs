mod app;
mod cli;
mod output;

use std::env;
use std::process;

use cli::{Command, USAGE, parse_args};

// Usage: regex-cfg [options] [PATTERN]   (PATTERN defaults to one line of stdin)
fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let code = match parse_args(args) {
        Ok(Command::Help) => {
            println!("{USAGE}");
            0
        }
        Ok(Command::Translate(cfg)) => app::run(cfg),
        Err(err) => {
            eprintln!("error: {err:#}\n\n{USAGE}");
            2
        }
    };
    process::exit(code);
}
