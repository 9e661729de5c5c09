// Command-line interface for html2delta
//
// Reads HTML from a file or stdin and writes the converted Delta as JSON. The conversion itself
// lives in the html2delta crate; this binary only deals with the shell: arguments, config files,
// input/output and logging.
//
// Usage:
//  html2delta <input> [--output <file>]             - Convert a file (default command)
//  html2delta convert [<input>] [--output <file>]   - Same as above (explicit)
//  html2delta convert < page.html                   - Read from stdin when no input is given
//  html2delta convert - --pretty                    - '-' also means stdin
//
// Configuration:
//
// Settings are layered: the embedded defaults, then ./html2delta.toml if present, then the file
// passed with --config, then command-line flags. See html2delta-config for the keys.
//
// Logging goes to stderr. The default level is warn; --verbose raises the html2delta modules to
// debug, and RUST_LOG (if set) wins over both.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use html2delta::{Delta, HtmlToDelta};
use html2delta_config::{ConfigError, Html2DeltaConfig, Loader};
use log::{debug, LevelFilter};
use std::fs;
use std::io::{self, Read};

const SUBCOMMANDS: &[&str] = &["convert", "help"];

fn build_cli() -> Command {
    Command::new("html2delta")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert HTML into Delta JSON")
        .long_about(
            "html2delta converts HTML documents or fragments into Delta JSON, the\n\
            operation format used by rich-text editors such as Quill.\n\n\
            Examples:\n  \
            html2delta page.html                        # Convert to stdout\n  \
            html2delta page.html -o page.json           # Convert to a file\n  \
            cat page.html | html2delta convert          # Read from stdin\n  \
            html2delta page.html --black-list table,pre # Flatten tables and pre blocks"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a html2delta.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log conversion details to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an HTML file (or stdin) to Delta JSON (default command)")
                .long_about(
                    "Convert HTML to Delta JSON.\n\n\
                    Input is read from the given file, or from stdin when the input is\n\
                    omitted or '-'. Output goes to stdout by default, or use -o to\n\
                    specify a file.\n\n\
                    Examples:\n  \
                    html2delta convert page.html                # Convert to stdout\n  \
                    html2delta convert page.html --pretty       # Indented JSON\n  \
                    html2delta page.html                        # 'convert' is optional"
                )
                .arg(
                    Arg::new("input")
                        .help("Input HTML file; reads stdin when omitted or '-'")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("black-list")
                        .long("black-list")
                        .value_name("TAGS")
                        .help("Comma-separated top-level tags to flatten to plain text")
                        .long_help(
                            "Top-level tags whose content is emitted as plain text.\n\n\
                            Markup inside a black-listed element is ignored and only its\n\
                            text is kept. Replaces convert.black_list from the config."
                        )
                        .value_delimiter(',')
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("max-depth")
                        .long("max-depth")
                        .value_name("N")
                        .help("Deepest element nesting accepted")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .help("Pretty-print the JSON output")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Merge neighbouring inserts with identical attributes")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1 && looks_like_input(&args[1]) {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let config = load_cli_config(
                matches.get_one::<String>("config").map(|s| s.as_str()),
                sub_matches,
            );
            let input = sub_matches
                .get_one::<String>("input")
                .map(|s| s.as_str())
                .filter(|s| *s != "-");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, output, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Whether the first argument is an input path rather than a subcommand or flag.
fn looks_like_input(arg: &str) -> bool {
    arg == "-" || (!arg.starts_with('-') && !SUBCOMMANDS.contains(&arg))
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let _ = env_logger::Builder::new()
        .filter_module("html2delta", level)
        .filter_module("html2delta_config", level)
        .parse_default_env()
        .try_init();
}

/// Handle the convert command
fn handle_convert_command(input: Option<&str>, output: Option<&str>, config: &Html2DeltaConfig) {
    let source = read_input(input).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", describe_input(input));
        std::process::exit(1);
    });

    let converter = HtmlToDelta::new().with_options((&config.convert).into());
    let delta = converter.convert(&source).unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });
    debug!(
        "converted {} into {} ops",
        describe_input(input),
        delta.len()
    );

    let json = render(delta, config).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, format!("{json}\n")).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{json}"),
    }
}

fn read_input(input: Option<&str>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn describe_input(input: Option<&str>) -> String {
    match input {
        Some(path) => format!("file '{path}'"),
        None => "stdin".to_string(),
    }
}

fn render(delta: Delta, config: &Html2DeltaConfig) -> serde_json::Result<String> {
    let delta = if config.output.compact {
        delta.compact()
    } else {
        delta
    };
    delta.to_json(config.output.pretty)
}

fn load_cli_config(explicit_path: Option<&str>, overrides: &ArgMatches) -> Html2DeltaConfig {
    let loader = Loader::new().with_optional_file("html2delta.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    apply_config_overrides(loader, overrides)
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

/// Layers command-line flags over the file-based configuration.
fn apply_config_overrides(mut loader: Loader, matches: &ArgMatches) -> Result<Loader, ConfigError> {
    if let Some(tags) = matches.get_many::<String>("black-list") {
        let tags: Vec<String> = tags
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
        loader = loader.set_override("convert.black_list", tags)?;
    }
    if let Some(depth) = matches.get_one::<u32>("max-depth") {
        loader = loader.set_override("convert.max_depth", i64::from(*depth))?;
    }
    if matches.get_flag("pretty") {
        loader = loader.set_override("output.pretty", true)?;
    }
    if matches.get_flag("compact") {
        loader = loader.set_override("output.compact", true)?;
    }
    Ok(loader)
}
