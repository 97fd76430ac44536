//! Command-line front end for the PQC interpreter.

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use pqc::{Interpreter, InterpreterBuilder, Output, formatter, normalize_line};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn usage() {
    eprintln!("Usage: pqc [options] [command] [args...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  repl             Start an interactive session (default)");
    eprintln!("  run <files...>   Execute each file line by line");
    eprintln!("  eval <lines...>  Execute each argument as one line");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --precision N    Decimal digits printed for results (default 15)");
    eprintln!("  --verbose-syntax Report expected-vs-got syntax errors");
    eprintln!("  -h, --help       Print this help");
    eprintln!("  -V, --version    Print the version");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  pqc");
    eprintln!("  pqc run session.pqc");
    eprintln!("  pqc eval 'LET A = 2' 'A ^ 10'");
}

fn main() -> ExitCode {
    env_logger::init();

    let mut builder = Interpreter::builder();
    let mut positional: Vec<String> = Vec::new();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                usage();
                return ExitCode::SUCCESS;
            }
            "-V" | "--version" => {
                println!("pqc {}", env!("CARGO_PKG_VERSION"));
                return ExitCode::SUCCESS;
            }
            "--verbose-syntax" => builder = builder.report_syntax_errors(true),
            "--precision" => match args.next().map(|n| n.parse::<usize>()) {
                Some(Ok(digits)) => builder = builder.precision(digits),
                _ => {
                    eprintln!("Error: --precision expects a number");
                    return ExitCode::from(2);
                }
            },
            _ => positional.push(arg),
        }
    }

    let (command, operands) = positional
        .split_first()
        .map_or(("repl", &[][..]), |(c, rest)| (c.as_str(), rest));

    match command {
        "repl" => match run_repl(builder) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        "run" if operands.is_empty() => {
            eprintln!("Error: no files specified");
            ExitCode::from(2)
        }
        "run" => run_files(&builder, operands),
        "eval" => eval_lines(builder, operands),
        _ => {
            eprintln!("Unknown command: {command}");
            ExitCode::from(2)
        }
    }
}

/// Print the outputs of one line. Returns true if any was an error.
fn emit(outputs: &[Output], precision: usize) -> bool {
    let mut stdout = io::stdout().lock();
    for output in outputs {
        if matches!(output, Output::Clear) {
            let _ = write!(stdout, "{CLEAR_SCREEN}");
        } else {
            let _ = write!(stdout, "{}", formatter::format(output, precision));
        }
    }
    let _ = stdout.flush();
    outputs.iter().any(Output::is_error)
}

/// Execute one raw input line the way every front end does.
fn execute(interp: &mut Interpreter, raw: &str) -> bool {
    let line = normalize_line(raw, interp.config().max_line_length);
    let outputs = interp.execute(&line);
    emit(&outputs, interp.config().precision)
}

fn run_repl(builder: InterpreterBuilder) -> rustyline::Result<()> {
    println!("PQC v{}", env!("CARGO_PKG_VERSION"));
    println!("Copyright (c) 2024 {}.", env!("CARGO_PKG_AUTHORS"));
    println!();

    let mut rl = DefaultEditor::new()?;
    let mut interp = builder.build();

    while interp.is_running() {
        match rl.readline("> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                execute(&mut interp, &line);
            }
            // Ctrl-C drops the current line
            Err(ReadlineError::Interrupted) => {}
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

fn run_files(builder: &InterpreterBuilder, files: &[String]) -> ExitCode {
    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        log::info!("running {path}");
        let mut interp = builder.clone().build();
        for line in content.lines() {
            had_error |= execute(&mut interp, line);
            if !interp.is_running() {
                break;
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn eval_lines(builder: InterpreterBuilder, lines: &[String]) -> ExitCode {
    let mut interp = builder.build();
    let mut had_error = false;

    for line in lines {
        had_error |= execute(&mut interp, line);
        if !interp.is_running() {
            break;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
