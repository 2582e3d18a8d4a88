use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use pyrust::interpreter::evaluator::core::Context;

/// pyrust runs programs written in a small language with Python-style syntax
/// and Rust-style typed, mutable/immutable bindings.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Program to run. Starts an interactive session when omitted.
    file: Option<PathBuf>,
}

/// Installs a stderr log subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=pyrust=debug`.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)
                                                         .with_target(true)
                                                         .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match args.file {
        Some(path) => run_file(&path),
        None => run_repl(),
    }
}

fn run_file(path: &Path) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: could not read '{}': {e}", path.display());
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = Context::new().run(&source) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_repl() -> ExitCode {
    println!("pyrust {} interactive mode", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' to quit");

    let mut context = Context::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!(">>> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            },
            None => {
                println!();
                println!("Goodbye!");
                return ExitCode::SUCCESS;
            },
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            return ExitCode::SUCCESS;
        }

        match context.eval_line(line) {
            Ok(values) => {
                for value in values {
                    println!("{value}");
                }
            },
            Err(e) => eprintln!("Error: {e}"),
        }
    }
}
