//! Command-line interface for lexsyn
//! Prints token tables, automaton traces and parser traces for small expression programs.
//!
//! Usage:
//!   lexsyn tokens `<path>`                          - Print the token table
//!   lexsyn trace `<token>` [--type `<type>`]          - Print the automaton steps for one token
//!   lexsyn parse `<path>` [--mode grammar|balance]  - Check a program, print tokens and trace
//!   lexsyn grammar                                - Print the grammar
//!
//! `<path>` may be `-` to read stdin. All commands accept `--format text|json` and
//! `--config <file>`. A rejected program exits with status 2.

use clap::{Arg, ArgAction, ArgMatches, Command};
use lexsyn::formats::{json, text};
use lexsyn::{Automaton, OutputFormat, ParseMode, TokenType};
use lexsyn_config::{ConfigError, LexsynConfig, Loader, LOCAL_CONFIG_FILE};
use std::process;

/// Exit status for a program the checker rejected.
const EXIT_REJECTED: i32 = 2;

fn cli() -> Command {
    Command::new("lexsyn")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Token automata and pushdown parsing for a small expression language")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .global(true)
                .value_parser(|s: &str| s.parse::<OutputFormat>())
                .help("Output format, text or json (default from config: text)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Tokenize a file and print the token table")
                .arg(source_arg()),
        )
        .subcommand(
            Command::new("trace")
                .about("Trace one token through the automaton of its type")
                .arg(
                    Arg::new("token")
                        .help("Token text")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(1),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .short('t')
                        .help("Trace as this type (number, id, string, INVALID or a lexeme)"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Check a program and print its tokens and parser trace")
                .arg(source_arg())
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .short('m')
                        .value_parser(|s: &str| s.parse::<ParseMode>())
                        .help("Checker to run, grammar or balance (default from config: grammar)"),
                )
                .arg(
                    Arg::new("quiet")
                        .long("quiet")
                        .short('q')
                        .action(ArgAction::SetTrue)
                        .help("Print only the verdict"),
                ),
        )
        .subcommand(Command::new("grammar").about("Print the grammar productions"))
}

fn source_arg() -> Arg {
    Arg::new("path")
        .help("Path to the source file, or - for stdin")
        .required(true)
        .index(1)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli().get_matches();
    let Some((command, sub)) = matches.subcommand() else {
        unreachable!("a subcommand is required")
    };
    let config =
        load_config(command, sub).unwrap_or_else(|e| fail(&format!("Configuration error: {}", e)));
    log::debug!("effective config: {:?}", config);

    match command {
        "tokens" => handle_tokens_command(sub, &config),
        "trace" => handle_trace_command(sub, &config),
        "parse" => handle_parse_command(sub, &config),
        "grammar" => println!("{}", lexsyn::grammar::listing()),
        _ => unreachable!(),
    }
}

/// Defaults, then the `--config` file (or an optional `lexsyn.toml`), then flags.
///
/// Global flags are read from the subcommand's matches, where clap always propagates them.
fn load_config(command: &str, matches: &ArgMatches) -> Result<LexsynConfig, ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG_FILE),
    };
    if let Some(format) = matches.get_one::<OutputFormat>("format") {
        loader = loader.set_override("output.format", format.to_string())?;
    }
    if command == "parse" {
        if let Some(mode) = matches.get_one::<ParseMode>("mode") {
            loader = loader.set_override("parser.mode", mode.to_string())?;
        }
        if matches.get_flag("quiet") {
            loader = loader.set_override("output.show_trace", false)?;
        }
    }
    loader.build()
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches, config: &LexsynConfig) {
    let source = read_source(matches);
    let table = lexsyn::token::TokenTable::from_tokens(&lexsyn::tokenize(&source));
    let output = match config.output.format {
        OutputFormat::Text => text::token_table(&table),
        OutputFormat::Json => json::to_json(&table).unwrap_or_else(|e| fail(&e.to_string())),
    };
    println!("{}", output);
}

/// Handle the trace command
fn handle_trace_command(matches: &ArgMatches, config: &LexsynConfig) {
    let token = matches
        .get_one::<String>("token")
        .expect("token is a required argument");
    let kind = match matches.get_one::<String>("type") {
        Some(name) => TokenType::from_name(name)
            .unwrap_or_else(|| fail(&lexsyn::Error::UnknownTokenType(name.clone()).to_string())),
        None => lexsyn::classify(token),
    };
    let steps = lexsyn::trace_steps(token, kind);

    let output = match config.output.format {
        OutputFormat::Text => text::animation(token, kind, &steps),
        OutputFormat::Json => {
            let report = serde_json::json!({
                "token": token,
                "type": kind.name(),
                "automaton": Automaton::for_type(kind),
                "steps": steps,
            });
            json::to_json(&report).unwrap_or_else(|e| fail(&e.to_string()))
        }
    };
    println!("{}", output);
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches, config: &LexsynConfig) {
    let source = read_source(matches);
    let mode: ParseMode = config.parser.mode;
    let analysis = lexsyn::analyze(&source, mode);

    let output = match config.output.format {
        OutputFormat::Text if config.output.show_trace => text::analysis(&analysis, true),
        OutputFormat::Text => text::run_trace(analysis.outcome(), false),
        OutputFormat::Json => json::to_json(&analysis).unwrap_or_else(|e| fail(&e.to_string())),
    };
    println!("{}", output);

    if !analysis.verdict().is_accepted() {
        process::exit(EXIT_REJECTED);
    }
}

fn read_source(matches: &ArgMatches) -> String {
    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let result = if path == "-" {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(path)
    };
    result.unwrap_or_else(|e| fail(&format!("Error reading {}: {}", path, e)))
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}
