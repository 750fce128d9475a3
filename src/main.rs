//! CLI tool to inspect how sigo source files scan and parse.

use std::fs::File;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: sigo <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  tokens    Print the token stream of each file");
        eprintln!("  parse     Print the syntax tree of each file");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  sigo tokens main.sg");
        eprintln!("  RUST_LOG=sigo=trace sigo parse main.sg");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if !matches!(command, "tokens" | "parse") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let scanner = sigo::Scanner::new(file, path.as_str());
        let ok = if command == "tokens" {
            print_tokens(scanner)
        } else {
            print_tree(scanner)
        };
        had_error |= !ok;
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_tokens(scanner: sigo::Scanner<File>) -> bool {
    for item in scanner {
        match item {
            Ok(tok) => {
                println!("{} {} {}", tok.position, tok.kind, tok.value);
            }
            Err(e) => {
                eprintln!("{e}");
                return false;
            }
        }
    }
    true
}

fn print_tree(scanner: sigo::Scanner<File>) -> bool {
    match sigo::parse(scanner) {
        Ok(tree) => {
            print!("{}", sigo::format(tree.as_ref()));
            true
        }
        Err(e) => {
            eprintln!("{e}");
            false
        }
    }
}
