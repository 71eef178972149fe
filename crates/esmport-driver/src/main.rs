use clap::{Parser, Subcommand, ValueEnum};
use esmport_ast::{LineIndex, StmtKind};
use esmport_lexer::{Lexer, TokenKind};
use esmport_parser::{PrintOptions, QuoteStyle};
use esmport_transform::TransformOptions;
use std::path::PathBuf;
use std::process::ExitCode;

use esmport_driver::report::{report_lexer_errors, report_parse_error, report_transform_error};
use esmport_driver::{logging, process_file, read_source, write_back, Processed};

#[derive(Parser)]
#[command(
    name = "esmport",
    version = "0.1.0",
    about = "Rewrite CommonJS exports as ES module exports",
    long_about = "Rewrites `exports.x = ...` and `module.exports = Name` statements\ninto declarative `export` statements, keeping all other code and comments as written."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform modules and print or write the result
    Transform {
        /// Input JavaScript files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Rewrite the files in place instead of printing them
        #[arg(short, long)]
        write: bool,

        /// Quote style for string literals in generated exports
        #[arg(long, default_value = "single")]
        quote: QuoteArg,

        /// Do not separate the appended export list with an empty line
        #[arg(long)]
        no_export_blank_line: bool,
    },

    /// Report modules that still use legacy exports
    Check {
        /// Input JavaScript files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Lex a JavaScript file and show tokens (debug)
    Lex {
        /// Input JavaScript file
        input: PathBuf,

        /// Show token positions
        #[arg(short, long)]
        positions: bool,
    },

    /// Parse a JavaScript file and show its top-level statements (debug)
    Parse {
        /// Input JavaScript file
        input: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QuoteArg {
    Single,
    Double,
    /// Keep string literals as written
    Preserve,
}

impl From<QuoteArg> for QuoteStyle {
    fn from(arg: QuoteArg) -> Self {
        match arg {
            QuoteArg::Single => QuoteStyle::Single,
            QuoteArg::Double => QuoteStyle::Double,
            QuoteArg::Preserve => QuoteStyle::Preserve,
        }
    }
}

fn main() -> ExitCode {
    logging::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Transform {
            inputs,
            write,
            quote,
            no_export_blank_line,
        } => {
            let options = TransformOptions {
                print: PrintOptions {
                    quote: quote.into(),
                    export_blank_line: !no_export_blank_line,
                },
            };
            transform_command(inputs, write, &options)
        }
        Commands::Check { inputs } => check_command(inputs),
        Commands::Lex { input, positions } => lex_command(input, positions),
        Commands::Parse { input } => parse_command(input),
    }
}

/// Runs the transform over every input, reporting failures as they occur.
fn run_all(inputs: &[PathBuf], options: &TransformOptions) -> (Vec<Processed>, usize) {
    let mut processed = Vec::new();
    let mut failures = 0;

    for input in inputs {
        match process_file(input, options) {
            Ok(file) => {
                if let Err(error) = &file.result {
                    failures += 1;
                    if let Err(e) = report_transform_error(error, &file.filename(), &file.source) {
                        eprintln!("Error: {}", error);
                        eprintln!("Error printing report: {}", e);
                    }
                }
                processed.push(file);
            }
            Err(e) => {
                failures += 1;
                eprintln!("Error: {:#}", e);
            }
        }
    }

    (processed, failures)
}

fn transform_command(inputs: Vec<PathBuf>, write: bool, options: &TransformOptions) -> ExitCode {
    let (processed, mut failures) = run_all(&inputs, options);

    for file in &processed {
        if !write {
            if let Some(output) = file.changed() {
                print!("{}", output);
            }
            continue;
        }

        match write_back(file) {
            Ok(true) => eprintln!("Rewrote {}", file.path.display()),
            Ok(false) => {}
            Err(e) => {
                failures += 1;
                eprintln!("Error: {:#}", e);
            }
        }
    }

    if failures > 0 {
        eprintln!("\n{} file(s) failed", failures);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn check_command(inputs: Vec<PathBuf>) -> ExitCode {
    let (processed, failures) = run_all(&inputs, &TransformOptions::default());

    let pending: Vec<&Processed> = processed.iter().filter(|file| file.changed().is_some()).collect();
    for file in &pending {
        println!("{}: legacy exports found", file.path.display());
    }

    if failures > 0 || !pending.is_empty() {
        eprintln!(
            "\n{} file(s) to rewrite, {} file(s) failed",
            pending.len(),
            failures
        );
        return ExitCode::FAILURE;
    }

    println!("All {} file(s) use module exports", processed.len());
    ExitCode::SUCCESS
}

fn lex_command(input: PathBuf, positions: bool) -> ExitCode {
    let source = match read_source(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let filename = input.to_string_lossy().to_string();

    let mut lexer = Lexer::new(&source);
    let tokens = lexer.tokenize();

    println!("Tokens for {}:\n", filename);
    println!("{}", "=".repeat(80));

    for (i, token) in tokens.iter().enumerate() {
        if token.kind == TokenKind::Eof {
            println!("\n{:4} | {:?}", i, token.kind);
            break;
        }

        if positions {
            println!(
                "{:4} | {:20?} | {:?} | {}..{}",
                i, token.kind, token.value, token.span.start, token.span.end
            );
        } else {
            println!("{:4} | {:20?} | {:?}", i, token.kind, token.value);
        }
    }

    println!("{}", "=".repeat(80));
    println!("\nTotal tokens: {}", tokens.len());
    println!("Comments: {}", lexer.comments().len());

    let error_count = tokens.iter().filter(|t| t.kind == TokenKind::Error).count();
    if error_count > 0 {
        println!("\nLexer errors found: {}", error_count);
        if let Err(e) = report_lexer_errors(&tokens, &filename, &source) {
            eprintln!("Error printing report: {}", e);
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn parse_command(input: PathBuf) -> ExitCode {
    let source = match read_source(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let filename = input.to_string_lossy().to_string();

    let module = match esmport_parser::parse_module(&source, 0) {
        Ok(module) => module,
        Err(error) => {
            if let Err(e) = report_parse_error(&error, &filename, &source) {
                eprintln!("Error: {}", error);
                eprintln!("Error printing report: {}", e);
            }
            return ExitCode::FAILURE;
        }
    };

    let index = LineIndex::new(&source);
    println!("Statements for {}:\n", filename);
    println!("{}", "=".repeat(80));

    for stmt in module.statements() {
        let location = index.location(&source, stmt.span.start);
        let first_line = module.text(stmt.span).lines().next().unwrap_or_default();
        println!(
            "{:4} | {:5}:{:<3} | {:12} | {} leading, {} trailing | {}",
            stmt.id.0,
            location.line,
            location.column,
            kind_label(&stmt.kind),
            stmt.leading.len(),
            stmt.trailing.len(),
            first_line
        );
    }

    println!("{}", "=".repeat(80));
    println!("\nTotal statements: {}", module.statements().len());
    ExitCode::SUCCESS
}

fn kind_label(kind: &StmtKind) -> &'static str {
    match kind {
        StmtKind::Empty => "empty",
        StmtKind::Assign(_) => "assign",
        StmtKind::VarDecl(_) => "declaration",
        StmtKind::Import => "import",
        StmtKind::ExportDefault => "export-default",
        StmtKind::Export => "export",
        StmtKind::Other => "other",
    }
}
