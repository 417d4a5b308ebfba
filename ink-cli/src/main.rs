// Command-line interface for ink
//
// This binary converts documents exported by the rich-text editor (HTML or the JSON document
// tree) into the ink Markdown dialect. All conversion logic lives in the ink-babel crate; this
// crate only reads files, loads configuration and writes results.
//
// Usage:
//  ink <input> [--from <format>] [--to <format>] [--output <file>]  - Convert (default)
//  ink convert <input> [--from <format>] [--to <format>] [-o <file>] - Same as above (explicit)
//  ink export <input> [--from <format>] [-o <file>]                  - Write Markdown to a file
//  ink rules                                                         - Print the active rules
//
// Extra Parameters:
//
// Configuration keys can be overridden per run with --extra-<key> <value>, e.g.
//  ink notes.html --extra-bullet-marker '*' --extra-disable-rule underline
//
// Logging goes through env_logger; set RUST_LOG=debug to see the rule set and import summaries.

use clap::{Arg, ArgAction, Command, ValueHint};
use ink_babel::export::Exporter;
use ink_babel::formats::markdown::{Converter, MarkdownFormat};
use ink_babel::{Format, FormatRegistry};
use ink_config::{InkConfig, Loader, LOCAL_CONFIG_FILE};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // A following value that is not itself a flag belongs to this key
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-') || next.len() == 1);

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .long_help(
            "Source format to convert from: html or json.\n\n\
            If not specified, the format is detected from the file extension,\n\
            falling back to convert.default_from from the configuration.",
        )
        .value_parser(["html", "json"])
        .value_hint(ValueHint::Other)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .value_name("PATH")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("ink")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert rich-text editor documents to Markdown")
        .long_about(
            "ink converts the documents of a rich-text editor (HTML or JSON) into a\n\
            Markdown dialect with styled spans, sized and aligned images, task items\n\
            and underline.\n\n\
            Commands:\n  \
            - convert: Convert a document and print the result (default command)\n  \
            - export:  Write the Markdown export to a file\n  \
            - rules:   List the conversion rules in the order they are tried\n\n\
            Extra Parameters:\n  \
            Use --extra-<key> [value] to override configuration for one run.\n  \
            Keys: bullet-marker, strong-delimiter, em-delimiter, fence, hr,\n  \
            line-break, disable-rule, default-from, default-output.\n\n\
            Examples:\n  \
            ink notes.html                          # Markdown to stdout\n  \
            ink notes.json --to json                # Normalized JSON tree\n  \
            ink export notes.html -o notes.md       # Write the export file",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an ink.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document (default command)")
                .long_about(
                    "Convert an editor document and print it to stdout.\n\n\
                    Supported formats:\n  \
                    - html:     Editor HTML (.html, .htm), input only\n  \
                    - json:     Editor document tree (.json)\n  \
                    - markdown: Markdown dialect (.md), output only\n\n\
                    Examples:\n  \
                    ink convert notes.html                  # Markdown (stdout)\n  \
                    ink convert notes.html --to json        # Document tree as JSON\n  \
                    ink notes.html -o notes.md              # 'convert' is optional",
                )
                .arg(input_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (defaults to markdown)")
                        .value_parser(["markdown", "json"])
                        .default_value("markdown")
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg().help("Output file path (defaults to stdout)")),
        )
        .subcommand(
            Command::new("export")
                .about("Write the Markdown export of a document to a file")
                .long_about(
                    "Convert an editor document to Markdown and write it to a file.\n\n\
                    The file holds exactly the text `ink convert` prints. Without\n\
                    --output it is written to convert.default_output (document.md).",
                )
                .arg(input_arg())
                .arg(from_arg())
                .arg(output_arg().help("Export file path (defaults to document.md)")),
        )
        .subcommand(
            Command::new("rules")
                .about("List the active Markdown rules in priority order")
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Also list rules disabled by the configuration")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A first argument that is neither a flag nor a command is taken as the input file
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !["convert", "export", "rules", "help"].contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    for key in extra_params.keys() {
        warn!("ignoring unknown option --extra-{key}");
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = resolve_from(input, sub_matches.get_one::<String>("from"), &config);
            let to = sub_matches
                .get_one::<String>("to")
                .map(|s| s.as_str())
                .unwrap_or("markdown");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &config);
        }
        Some(("export", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = resolve_from(input, sub_matches.get_one::<String>("from"), &config);
            let output = sub_matches
                .get_one::<String>("output")
                .map(|s| s.as_str())
                .unwrap_or(config.convert.default_output.as_str());
            handle_export_command(input, &from, output, &config);
        }
        Some(("rules", sub_matches)) => {
            handle_rules_command(&config, sub_matches.get_flag("all"));
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Explicit --from, else the format matching the file extension, else the configured default.
fn resolve_from(input: &str, explicit: Option<&String>, config: &InkConfig) -> String {
    if let Some(from) = explicit {
        return from.to_string();
    }
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) if registry.get(&detected).is_ok_and(|f| f.supports_parsing()) => detected,
        _ => {
            debug!(
                "no input format for '{input}', using {}",
                config.convert.default_from
            );
            config.convert.default_from.clone()
        }
    }
}

/// Registry whose Markdown format uses the configured converter.
fn registry_from_config(config: &InkConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::default();
    registry.register(MarkdownFormat::new(converter_from_config(config)));
    registry
}

fn converter_from_config(config: &InkConfig) -> Converter {
    config.markdown.converter().unwrap_or_else(|err| {
        eprintln!("Invalid configuration: {err}");
        std::process::exit(1);
    })
}

fn read_document(registry: &FormatRegistry, input: &str, from: &str) -> ink_babel::DocNode {
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    config: &InkConfig,
) {
    let registry = registry_from_config(config);
    let doc = read_document(&registry, input, from);

    let text = registry.serialize(&doc, to).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

/// Handle the export command
fn handle_export_command(input: &str, from: &str, output: &str, config: &InkConfig) {
    let registry = FormatRegistry::default();
    let doc = read_document(&registry, input, from);

    let mut exporter = Exporter::new(converter_from_config(config));
    exporter.refresh(&doc);
    exporter.write_to(output).unwrap_or_else(|e| {
        eprintln!("Error writing file '{output}': {e}");
        std::process::exit(1);
    });
    info!("exported {input} to {output}");
}

/// Handle the rules command
fn handle_rules_command(config: &InkConfig, all: bool) {
    let active = converter_from_config(config).rules().names();
    if !all {
        for name in active {
            println!("{name}");
        }
        return;
    }
    for name in ink_babel::RuleSet::standard().names() {
        if active.contains(&name) {
            println!("{name}");
        } else {
            println!("{name} (disabled)");
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> InkConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut InkConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["bullet-marker", "bullet"]) {
        config.markdown.bullet_marker = parse_char_arg("bullet-marker", &raw);
    }
    if let Some(raw) = extra_params.remove("strong-delimiter") {
        config.markdown.strong_delimiter = raw;
    }
    if let Some(raw) = extra_params.remove("em-delimiter") {
        config.markdown.em_delimiter = raw;
    }
    if let Some(raw) = extra_params.remove("fence") {
        config.markdown.fence = raw;
    }
    if let Some(raw) = extra_params.remove("hr") {
        config.markdown.hr = raw;
    }
    if let Some(raw) = extra_params.remove("line-break") {
        config.markdown.line_break = raw;
    }
    if let Some(raw) = take_override(extra_params, &["disable-rule", "disable-rules"]) {
        config.markdown.disabled_rules.extend(
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        );
    }

    if let Some(raw) = extra_params.remove("default-from") {
        config.convert.default_from = raw;
    }
    if let Some(raw) = extra_params.remove("default-output") {
        config.convert.default_output = raw;
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_char_arg(flag: &str, raw: &str) -> char {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            eprintln!("Invalid value '{raw}' for --extra-{flag}: expected a single character");
            std::process::exit(1);
        }
    }
}
