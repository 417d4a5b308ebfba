use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn build_cli() -> Command {
    let input = Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath);
    let from = Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_parser(["html", "json"]);
    let output = Arg::new("output")
        .long("output")
        .short('o')
        .value_name("PATH")
        .value_hint(ValueHint::FilePath);

    Command::new("ink")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert rich-text editor documents to Markdown")
        .arg_required_else_help(true)
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
                .arg(input.clone())
                .arg(from.clone())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (defaults to markdown)")
                        .value_parser(["markdown", "json"]),
                )
                .arg(output.clone().help("Output file path (defaults to stdout)")),
        )
        .subcommand(
            Command::new("export")
                .about("Write the Markdown export of a document to a file")
                .arg(input)
                .arg(from)
                .arg(output.help("Export file path (defaults to document.md)")),
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

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=build.rs");

    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "ink", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "ink", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "ink", &outdir)?;

    Ok(())
}
