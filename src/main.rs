use clap::{Arg, ArgAction, Command};
use jaxscript::{parse, repl, runner, tokenize, JaxError};
use log::{debug, LevelFilter};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = Command::new("jax")
        .about("Runs JaxScript programs")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start the interactive prompt")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the token stream instead of running the script")
                .action(ArgAction::SetTrue)
                .conflicts_with("ast"),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .help("Print the parsed program instead of running the script")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logger(matches.get_flag("verbose"));

    let file_path = match matches.get_one::<String>("file") {
        Some(file_path) if !matches.get_flag("interactive") => file_path,
        _ => {
            return match repl::start() {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    ExitCode::from(2)
                }
            };
        }
    };

    let mode = if matches.get_flag("tokens") {
        Mode::Tokens
    } else if matches.get_flag("ast") {
        Mode::Ast
    } else {
        Mode::Run
    };

    run_file(Path::new(file_path), mode)
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Run,
    Tokens,
    Ast,
}

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn).parse_default_env();
    if verbose {
        builder.filter_module("jaxscript", LevelFilter::Debug);
    }
    builder.init();
}

fn run_file(path: &Path, mode: Mode) -> ExitCode {
    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        return ExitCode::from(2);
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            return ExitCode::from(2);
        }
    };

    let filename = path.to_string_lossy();
    debug!("Running {} in {:?} mode", filename, mode);

    let succeeded = match mode {
        Mode::Run => runner::execute(&source, Some(filename.as_ref())),
        Mode::Tokens => dump(&source, &filename, |source| Ok(format!("{:#?}", tokenize(source)?))),
        Mode::Ast => dump(&source, &filename, |source| Ok(format!("{:#?}", parse(tokenize(source)?)?))),
    };

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn dump(source: &str, filename: &str, render: impl Fn(&str) -> Result<String, JaxError>) -> bool {
    match render(source) {
        Ok(text) => {
            println!("{}", text);
            true
        }
        Err(error) => {
            if error.report(source, Some(filename)).is_err() {
                eprintln!("Error: {}", error);
            }
            false
        }
    }
}
