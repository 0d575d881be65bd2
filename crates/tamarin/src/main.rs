use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use tamarin_lexer::{Lexer, TokenKind};
use tamarin_parser::Parser as TamarinParser;

/// Tamarin - a small expression-oriented language frontend
#[derive(Parser)]
#[command(name = "tamarin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a Tamarin source file and print its canonical rendering
    Parse {
        /// Path to the Tamarin source file
        file: PathBuf,
    },

    /// Dump the token stream of a Tamarin source file
    Tokens {
        /// Path to the Tamarin source file
        file: PathBuf,
    },

    /// Start an interactive REPL
    Repl,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Parse { file }) => parse_file(&file),
        Some(Commands::Tokens { file }) => tokenize_file(&file),
        Some(Commands::Repl) => run_repl(),
        None => run_repl(), // Default to REPL if no command given
    }
}

/// Parse a source file and print the canonical rendering of its AST
fn parse_file(path: &PathBuf) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut parser = TamarinParser::new(Lexer::new(&source));
    let program = parser.parse_program();

    if parser.has_errors() {
        for error in parser.errors() {
            eprintln!("Parse error: {}", error);
        }
        return ExitCode::FAILURE;
    }

    println!("{}", program);
    ExitCode::SUCCESS
}

/// Dump the token stream of a source file, one token per line
fn tokenize_file(path: &PathBuf) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    for token in Lexer::new(&source) {
        if token.kind == TokenKind::Eof {
            println!("{}", token.kind);
        } else {
            println!("{:12} {:?}", token.kind.name(), token.literal);
        }
    }
    ExitCode::SUCCESS
}

/// Run the interactive REPL
fn run_repl() -> ExitCode {
    println!("Tamarin {} - Interactive parser REPL", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit, 'help' for commands.\n");

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Error initializing REPL: {}", e);
            return ExitCode::FAILURE;
        }
    };

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match line {
                    "exit" | "quit" => break,
                    "help" => {
                        print_repl_help();
                        continue;
                    }
                    "clear" => {
                        print!("\x1B[2J\x1B[1;1H"); // Clear screen
                        continue;
                    }
                    _ => {}
                }

                parse_repl_input(line);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    ExitCode::SUCCESS
}

/// Parse one line of REPL input, printing errors or the rendered program
fn parse_repl_input(input: &str) {
    let mut parser = TamarinParser::new(Lexer::new(input));
    let program = parser.parse_program();

    if parser.has_errors() {
        for error in parser.errors() {
            eprintln!("Parse error: {}", error);
        }
        return;
    }

    println!("{}", program);
}

/// Print REPL help
fn print_repl_help() {
    println!("Tamarin REPL Commands:");
    println!("  help     - Show this help message");
    println!("  exit     - Exit the REPL (also: quit, Ctrl+D)");
    println!("  clear    - Clear the screen");
    println!();
    println!("Input is parsed and echoed back in canonical form:");
    println!("  >> 1 + 2 * 3");
    println!("  (1 + (2 * 3))");
    println!("  >> let x = if (a < b) {{ a }} else {{ b }};");
    println!("  let x = if ((a < b)) {{ a }} else {{ b }};");
}
