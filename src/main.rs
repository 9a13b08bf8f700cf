use std::fs;

use clap::Parser;
use lisq::{RunOptions, check_source, run_source};

/// lisq is an interpreter for a small, fully parenthesized expression
/// language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells lisq to read the program from a file instead of the command
    /// line.
    #[arg(short, long)]
    file: bool,

    /// Accept unknown lexemes as plain atoms (exploratory mode).
    #[arg(short, long)]
    lenient: bool,

    /// Parse and analyze only; report diagnostics without evaluating.
    #[arg(short, long)]
    check: bool,

    /// Skip the constant-folding / dead-store optimizer pass.
    #[arg(long)]
    no_fold: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    if args.check {
        let (_, parse_diagnostics, semantic_diagnostics) = check_source(&script, args.lenient);
        for diagnostic in &parse_diagnostics {
            eprintln!("{diagnostic}");
        }
        for diagnostic in &semantic_diagnostics {
            eprintln!("{diagnostic}");
        }
        if !(parse_diagnostics.is_empty() && semantic_diagnostics.is_empty()) {
            std::process::exit(1);
        }
        return;
    }

    let options = RunOptions { lenient: args.lenient,
                               fold:    !args.no_fold, };
    match run_source(&script, &options) {
        Ok(values) => {
            if let Some(last) = values.last() {
                println!("{last}");
            }
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
