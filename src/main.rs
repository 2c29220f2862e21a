use std::{fs, process::ExitCode, time::Duration};

use clap::Parser;
use morgana::{EvalOptions, error::Error, get_result, parse};

/// morgana evaluates expressions in a small language with curried
/// functions, lambdas and lazy lists.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells morgana to read the expression from a file instead.
    #[arg(short, long)]
    file: bool,

    /// Seconds the evaluation may run before it is cancelled.
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,

    /// Prints the parsed expression before evaluating it.
    #[arg(short, long)]
    explain: bool,

    contents: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let source = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(source) => source,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    if args.explain {
        match parse(&source) {
            Ok(expr) => println!("{expr}"),
            Err(e) => {
                eprintln!("{}", e.pretty());
                return ExitCode::FAILURE;
            },
        }
    }

    let options = EvalOptions { timeout: Some(Duration::from_secs(args.timeout)) };
    match get_result(&source, &options) {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        },
        Err(Error::Parse(e)) => {
            eprintln!("{}", e.pretty());
            ExitCode::FAILURE
        },
        Err(e) if e.is_timeout() => {
            eprintln!("Evaluation took longer than {} second(s) and was stopped.", args.timeout);
            ExitCode::FAILURE
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
