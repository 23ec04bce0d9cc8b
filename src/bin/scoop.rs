//! Command-line interface for scoop
//!
//! Usage:
//!   scoop tokens `<path>` [--format `<format>`]                          - Print the tokens of a file
//!   scoop check `<path>` [--layer `<layer>`] [--format `<format>`] [--config `<file>`]
//!                                                                    - Parse a file and report diagnostics
//!
//! `check` exits with 0 when the file is well-formed, 1 when it has diagnostics and 2 when it
//! cannot be tokenized at all. Set `RUST_LOG` (e.g. `RUST_LOG=scoop=debug`) for engine logs.

use clap::{Arg, ArgMatches, Command};
use scoop::scoop::api::{parse_source, tokenize_source};
use scoop::scoop::config::{Loader, OutputFormat, ScoopConfig};
use scoop::scoop::grammar::GrammarContext;
use scoop::scoop::lexing::Lexer;
use serde_json::json;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_DIAGNOSTICS: u8 = 1;
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let format_arg = Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format ('text' or 'json')")
        .value_parser(["text", "json"]);
    let config_arg = Arg::new("config")
        .long("config")
        .short('c')
        .help("Configuration file layered over the built-in defaults");

    let matches = Command::new("scoop")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize and check scoop source files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Print the tokens of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the scoop file")
                        .required(true)
                        .index(1),
                )
                .arg(format_arg.clone())
                .arg(config_arg.clone()),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a file and report its diagnostics")
                .arg(
                    Arg::new("path")
                        .help("Path to the scoop file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("layer")
                        .long("layer")
                        .short('l')
                        .help("Grammar layer ('base' or 'named-arguments')")
                        .value_parser(["base", "named-arguments"]),
                )
                .arg(format_arg)
                .arg(config_arg),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        Some(("check", check_matches)) => handle_check_command(check_matches),
        _ => Err("unknown command".to_string()),
    };
    result.unwrap_or_else(|message| {
        eprintln!("Error: {}", message);
        ExitCode::from(EXIT_FATAL)
    })
}

/// Defaults, then `--config`, then the explicit flags
fn load_config(matches: &ArgMatches) -> Result<ScoopConfig, String> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    for key in ["format", "layer"] {
        let Ok(Some(value)) = matches.try_get_one::<String>(key) else {
            continue;
        };
        let setting = if key == "format" {
            "output.format"
        } else {
            "grammar.layer"
        };
        loader = loader
            .set_override(setting, value.as_str())
            .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| format!("invalid configuration: {}", e))
}

fn read_source(matches: &ArgMatches) -> Result<(String, String), String> {
    let path = matches
        .get_one::<String>("path")
        .ok_or_else(|| "missing path".to_string())?;
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path, e))?;
    Ok((path.clone(), text))
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) -> Result<ExitCode, String> {
    let config = load_config(matches)?;
    let (path, text) = read_source(matches)?;
    let lexer = Lexer::with_config(&config.lexer);
    let tokens = tokenize_source(&path, &text, &lexer).map_err(|e| e.to_string())?;

    match config.output.format {
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&tokens).map_err(|e| e.to_string())?;
            println!("{}", rendered);
        }
        OutputFormat::Text => {
            for token in &tokens {
                println!(
                    "{}:{}\t{:<10}\t{}",
                    token.location.line,
                    token.location.column,
                    token.token_type.to_string(),
                    token.value
                );
                for diagnostic in &token.diagnostics {
                    println!("\t{}", diagnostic);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) -> Result<ExitCode, String> {
    let config = load_config(matches)?;
    let (path, text) = read_source(matches)?;
    let context = GrammarContext::new().map_err(|e| e.to_string())?;
    let grammar = context.grammar(config.grammar.layer);

    let output = match parse_source(grammar, &path, &text, Lexer::with_config(&config.lexer)) {
        Ok(output) => output,
        Err(error) => {
            match config.output.format {
                OutputFormat::Json => println!(
                    "{}",
                    json!({ "source": path, "fatal": error.to_string(), "diagnostics": [] })
                ),
                OutputFormat::Text => eprintln!("{}", error),
            }
            return Ok(ExitCode::from(EXIT_FATAL));
        }
    };

    match config.output.format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "source": path, "diagnostics": output.diagnostics })
        ),
        OutputFormat::Text => {
            for diagnostic in &output.diagnostics {
                println!("{}", diagnostic);
            }
            if output.is_well_formed() {
                println!(
                    "{}: {} statements, no diagnostics",
                    path,
                    output.unit.statements.len()
                );
            }
        }
    }

    Ok(if output.is_well_formed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_DIAGNOSTICS)
    })
}
