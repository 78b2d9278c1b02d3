//! Phrasebook CLI entry point.

use phrasebook_pattern::{Pattern, Tracer, TracerConfig};
use phrasebook_registry::NameTable;
use phrasebook_runtime::{MatchReport, Repl, Session, load_grammar_file, serialize};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    command: Option<String>,
    operands: Vec<String>,
    output: Option<PathBuf>,
    show_help: bool,
    show_version: bool,
    lazy: bool,
    allow_leftover: bool,
    ignore_case: bool,
    // Debug flags
    trace_match: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--lazy" => config.lazy = true,
            "--leftover" => config.allow_leftover = true,
            "-i" | "--ignore-case" => config.ignore_case = true,
            "--trace" => config.trace_match = true,
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    return Err("--output requires a value".into());
                }
                config.output = Some(PathBuf::from(&args[i]));
            }
            // Everything after `--` is an operand, even if it looks like a flag.
            "--" => {
                config.operands.extend(args[i + 1..].iter().cloned());
                break;
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("unknown option: {arg}").into());
            }
            operand => {
                if config.command.is_none() {
                    config.command = Some(operand.to_string());
                } else {
                    config.operands.push(operand.to_string());
                }
            }
        }
        i += 1;
    }

    Ok(config)
}

/// Returns `Ok(false)` when a command ran but did not succeed, such as an
/// input that failed to match.
fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(true);
    }

    if config.show_version {
        println!("phrasebook {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    match config.command.as_deref() {
        Some("match") => run_match(&config),
        Some("unroll") => run_unroll(&config),
        Some("table") => run_table(&config),
        Some("lookup") => run_lookup(&config),
        Some("repl") => run_repl(&config),
        Some(other) => Err(format!("unknown command: {other} (try --help)").into()),
        None => {
            print_help();
            Ok(false)
        }
    }
}

fn compile(config: &CliConfig) -> Result<Pattern, Box<dyn std::error::Error>> {
    let Some(grammar) = config.operands.first() else {
        return Err("missing <GRAMMAR>".into());
    };
    match Pattern::compile(grammar) {
        Ok(pattern) => Ok(pattern.with_greedy(!config.lazy)),
        Err(e) => {
            if let Some(position) = e.position() {
                let pad = " ".repeat(grammar.chars().take(position).count());
                eprintln!("  {grammar}\n  {pad}^");
            }
            Err(e.into())
        }
    }
}

fn run_match(config: &CliConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let pattern = compile(config)?;
    let inputs = &config.operands[1..];
    if inputs.is_empty() {
        return Err("missing <INPUT>".into());
    }

    let mut tracer = if config.trace_match {
        Tracer::new(TracerConfig::new().enabled().to_stderr())
    } else {
        Tracer::disabled()
    };

    let mut all_matched = true;
    for input in inputs {
        let result = pattern.matches_traced(input, config.allow_leftover, &mut tracer);
        let report = MatchReport::from_result(&result);
        all_matched &= report.success;
        if inputs.len() > 1 {
            println!("{input:?}: {report}");
        } else {
            println!("{report}");
        }
    }
    Ok(all_matched)
}

fn run_unroll(config: &CliConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let pattern = compile(config)?;
    for name in pattern.unroll() {
        println!("{name}");
    }
    Ok(true)
}

fn run_table(config: &CliConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let Some(file) = config.operands.first() else {
        return Err("missing <FILE>".into());
    };
    let Some(output) = &config.output else {
        return Err("table requires -o <OUT>".into());
    };

    let registry = load_grammar_file(file).inspect_err(|e| {
        if let Some(context) = &e.context {
            eprint!("{context}");
        }
    })?;
    let mut table = if config.ignore_case {
        NameTable::case_insensitive()
    } else {
        NameTable::new()
    };
    table.extend_from_registry(&registry);
    serialize::save_to_file(&table, output)?;

    println!(
        "wrote {} names from {} grammars to {}",
        table.len(),
        registry.len(),
        output.display()
    );
    Ok(true)
}

fn run_lookup(config: &CliConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let Some((file, names)) = config.operands.split_first() else {
        return Err("missing <TABLE>".into());
    };
    let table: NameTable<String> = serialize::load_from_file(file)?;

    let mut all_found = true;
    for name in names {
        match table.lookup(name) {
            Some(keys) => println!("{name:?}: {}", keys.join(", ")),
            None => {
                all_found = false;
                println!("{name:?}: (none)");
            }
        }
    }
    Ok(all_found)
}

fn run_repl(config: &CliConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let mut session = Session::new();
    session.set_greedy(!config.lazy);
    session.set_allow_leftover(config.allow_leftover);
    session.set_tracing(config.trace_match);

    let mut repl = Repl::new()?.with_session(session);
    if let Some(grammar) = config.operands.first() {
        repl.session_mut().set_grammar(grammar)?;
        // Grammar given on the command line: context is already established.
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(true)
}

fn print_help() {
    println!(
        "\x1b[1mPhrasebook\x1b[0m - Grammar patterns for text parsing

\x1b[1mUSAGE:\x1b[0m
    phrasebook [OPTIONS] <COMMAND> [ARGS...]

\x1b[1mCOMMANDS:\x1b[0m
    match <GRAMMAR> <INPUT>...    Match each input, print captures and mark
    unroll <GRAMMAR>              Print every literal string of the grammar
    table <FILE> -o <OUT>         Build a name table from a grammar file
    lookup <TABLE> <NAME>...      Look names up in a saved name table
    repl [GRAMMAR]                Start an interactive session

\x1b[1mOPTIONS:\x1b[0m
    -h, --help           Print help information
    -V, --version        Print version information
    -o, --output <OUT>   Output file for table
    -i, --ignore-case    Build a case-insensitive name table
    --lazy               Prefer the shortest placeholder and regex spans
    --leftover           Allow unconsumed trailing input

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --trace              Print each matcher step to stderr

\x1b[1mGRAMMAR FILES:\x1b[0m
    One registration per line, '#' starts a comment line:
        lamp = [brass] (lamp|lantern)
        take@5 = (take|get) %item%

\x1b[1mEXAMPLES:\x1b[0m
    phrasebook match '(1¦take|2¦get) %item%' 'get lamp'
    phrasebook unroll 'go [north|south]'
    phrasebook table objects.pb -o objects.table
    phrasebook lookup objects.table 'brass lamp'
    phrasebook --trace match 'x [y] z' 'x z'"
    );
}
