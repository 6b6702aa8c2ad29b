use anyhow::Context;
use clap::Parser; // clap crate for CLI argument parsing
use driver::RunError;
use std::{fs, process::ExitCode};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the program source file
    input_path: String,

    /// Run lexer only and print the tokens
    #[arg(short, long)]
    lex: bool,

    /// Run lexer and parser only and print the syntax tree
    #[arg(short, long)]
    parse: bool,

    /// Print the final variable bindings after the program finishes
    #[arg(short, long)]
    env: bool,

    /// Report each finished stage on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match drive(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            let code = err.downcast_ref::<RunError>().map_or(1, RunError::exit_code);
            ExitCode::from(code)
        }
    }
}

// --lex: we should only lex
// --parse: we should lex and parse
// no option: we should lex, parse and run the program
fn drive(args: &Args) -> anyhow::Result<()> {
    if args.lex || args.parse {
        return inspect(args);
    }

    let env = driver::run(&args.input_path).with_context(|| format!("failed to run {}", args.input_path))?;
    report(args, format_args!("Ran program, {} bindings", env.len()));

    if args.env {
        for (name, value) in env.snapshot() {
            println!("{name} = {value}");
        }
    }
    Ok(())
}

fn inspect(args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.input_path)
        .map_err(RunError::from)
        .with_context(|| format!("failed to read {}", args.input_path))?;

    let tokens = lexer::lex(&source).map_err(RunError::from)?;
    report(args, format_args!("Lexed {} tokens", tokens.len()));
    if args.lex {
        for token in &tokens {
            println!("{:?}\t{}", token.tag, token.text);
        }
        return Ok(());
    }

    let program = parser::parse_tokens(&tokens).map_err(RunError::from)?;
    report(args, format_args!("Parsed program"));
    println!("{program:#?}");
    Ok(())
}

fn report(args: &Args, message: std::fmt::Arguments<'_>) {
    if args.verbose {
        eprintln!("{message}");
    }
}
