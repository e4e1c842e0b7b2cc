//! Command-line interface for canto
//!
//! This binary reads a canto source file, runs the front-end pipeline, and
//! prints the result in the requested format.
//!
//! Usage:
//!   canto `<path>` [--format `<format>`]
//!
//! Formats:
//!   canonical   canonical re-rendering of the parsed program (default)
//!   tree        indented node-kind dump of the AST
//!   tokens      raw token stream as pretty JSON

use clap::{Arg, Command};

use canto_parser::canto::pipeline::Pipeline;

fn main() {
    pretty_env_logger::init();

    let matches = Command::new("canto")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting canto files")
        .arg(
            Arg::new("path")
                .help("Path to the canto source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: canonical, tree, tokens")
                .default_value("canonical"),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("path")
        .expect("path is required");
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default");

    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {}", path, e);
        std::process::exit(1);
    });

    let pipeline = Pipeline::new();
    let output = match format.as_str() {
        "tokens" => {
            let tokens = pipeline.tokenize(&source).unwrap_or_else(|e| {
                eprintln!("{}", e);
                std::process::exit(1);
            });
            serde_json::to_string_pretty(&tokens).unwrap_or_else(|e| {
                eprintln!("Error formatting tokens: {}", e);
                std::process::exit(1);
            })
        }
        "canonical" | "tree" => {
            let program = pipeline.run(&source).unwrap_or_else(|e| {
                eprintln!("{}", e);
                std::process::exit(1);
            });
            match format.as_str() {
                "tree" => program.debug_tree(0),
                _ => program.to_string(),
            }
        }
        other => {
            eprintln!("Unknown format '{}'", other);
            eprintln!("Available formats: canonical, tree, tokens");
            std::process::exit(1);
        }
    };

    print!("{}", output);
}
