//! Command-line interface for sgf
//! This binary tokenizes, parses and converts sgf files.
//!
//! Usage:
//!   sgf tokens `<path>`                                   - Print the token stream
//!   sgf parse `<path>` [--format `<format>`] [-o `<file>`]  - Parse and print or write in a format
//!   sgf formats                                         - List available output formats
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=sgf=debug`) for diagnostics on stderr.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use sgf::sgf::formats::FormatRegistry;
use sgf::sgf::lexing::tokenize;
use sgf::sgf::{parse_bytes, ParseOptions};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("sgf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and converting sgf game records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Print one token per line, with its byte offset")
                .arg(
                    Arg::new("path")
                        .help("Path to the sgf file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a file and print it in an output format")
                .arg(
                    Arg::new("path")
                        .help("Path to the sgf file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'sgf', 'treeviz', 'json'); defaults to the output file's extension, then treeviz"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write to this file instead of stdout"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail on properties with invalid values")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("deferred-is-error")
                        .long("deferred-is-error")
                        .help("Fail on properties that need board context to validate")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("YAML file with parse options; flags take precedence"),
                ),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let path = required(tokens_matches, "path")?;
            handle_tokens_command(path)
        }
        Some(("parse", parse_matches)) => handle_parse_command(parse_matches),
        Some(("formats", _)) => {
            handle_formats_command();
            Ok(())
        }
        _ => unreachable!(),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument <{}>", name))
}

fn read_source(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("could not read {}", path))
}

/// Handle the tokens command
fn handle_tokens_command(path: &str) -> Result<()> {
    let bytes = read_source(path)?;
    let source = String::from_utf8_lossy(&bytes);
    for (token, span) in tokenize(&source) {
        println!("{}\t{}", span.start, token);
    }
    Ok(())
}

fn parse_options(matches: &ArgMatches) -> Result<ParseOptions> {
    let mut options = match matches.get_one::<String>("config") {
        Some(config) => {
            let text = std::fs::read_to_string(config)
                .with_context(|| format!("could not read config {}", config))?;
            ParseOptions::from_yaml(&text)
                .with_context(|| format!("invalid config {}", config))?
        }
        None => ParseOptions::default(),
    };
    if matches.get_flag("strict") {
        options.strict = true;
    }
    if matches.get_flag("deferred-is-error") {
        options.deferred_is_error = true;
    }
    Ok(options)
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches) -> Result<()> {
    let path = required(matches, "path")?;
    let output_path = matches.get_one::<String>("output").map(Path::new);
    let options = parse_options(matches)?;

    let registry = FormatRegistry::with_defaults();
    let format = match matches.get_one::<String>("format") {
        Some(format) => registry.get(format)?.name(),
        None => output_path
            .and_then(|output| registry.for_path(output))
            .map_or("treeviz", |formatter| formatter.name()),
    };
    tracing::debug!(?options, path, format, "parsing");

    let bytes = read_source(path)?;
    let collection =
        parse_bytes(&bytes, &options).with_context(|| format!("could not parse {}", path))?;
    for warning in registry.unrendered_warnings(&collection, format)? {
        eprintln!("warning: {}", warning);
    }

    let mut output = registry.serialize(&collection, format)?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    match output_path {
        Some(output_path) => std::fs::write(output_path, output)
            .with_context(|| format!("could not write {}", output_path.display()))?,
        None => print!("{}", output),
    }
    Ok(())
}

/// Handle the formats command
fn handle_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(formatter) = registry.get(&name) {
            println!(
                "  {:<10}.{:<6}{}",
                name,
                formatter.extension(),
                formatter.description()
            );
        }
    }
}
