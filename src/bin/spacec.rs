//! `spacec` — a thin driver around the `spacelang` library (SPEC_FULL §6.1).
//! Not part of the four-phase core: it only reads a file, runs the phases
//! in order, and prints whatever diagnostics the failing phase produced.

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use termcolor::{ColorChoice, StandardStream};
use tracing::{info, info_span};

use spacelang::{compile, diagnostics, CompileError};

const SAMPLE_PATH: &str = "demo.space";

#[derive(Parser, Debug)]
#[command(name = "spacec", version, about = "spacelang front-end driver")]
struct Args {
    /// Source file to compile. Falls back to a bundled sample path if omitted.
    path: Option<String>,

    /// Enable verbose internal tracing (phase timing / entry-exit spans).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    let path = args.path.unwrap_or_else(|| SAMPLE_PATH.to_string());

    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: could not read '{path}': {err}");
            return ExitCode::FAILURE;
        }
    };

    let span = info_span!("compile", file = %path);
    let _enter = span.enter();
    info!(bytes = source.len(), "starting compile");

    match compile(&source) {
        Ok(output) => {
            info!(
                nodes = output.ast.descendant_count(),
                scopes = output.symbols.scope_count(),
                "compile succeeded"
            );
            println!("compiled '{path}' successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let diags = err.diagnostics();
            let mut stream = StandardStream::stderr(ColorChoice::Auto);
            if let Err(io_err) = diagnostics::write_all_colored(&diags, &path, &source, &mut stream) {
                eprintln!("error: could not write diagnostics: {io_err}");
            }
            info!(error = %describe(&err), "compile failed");
            ExitCode::FAILURE
        }
    }
}

fn describe(err: &CompileError) -> &'static str {
    match err {
        CompileError::Lex(_) => "lex",
        CompileError::Syntax(_) => "syntax",
        CompileError::Semantic(_) => "semantic",
    }
}
