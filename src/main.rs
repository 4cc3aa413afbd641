//! Furniture Placer CLI
//!
//! Usage:
//!   furniture-placer [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>  Placement tuning file (TOML format)
//!   -r, --report         Print the corrections applied to stderr
//!   -p, --pretty         Pretty-print the output JSON
//!   -v, --verbose        Enable debug logging
//!   -h, --help           Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use furniture_placer::{resolve_request_json, PlacementConfig, PlacementResolver};

#[derive(Parser)]
#[command(name = "furniture-placer")]
#[command(about = "Correct furniture placements into safe, wall-aware positions")]
struct Cli {
    /// Request file in JSON (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Placement tuning file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the corrections applied to stderr
    #[arg(short, long)]
    report: bool,

    /// Pretty-print the output JSON
    #[arg(short, long)]
    pretty: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let config = match &cli.config {
        Some(path) => match PlacementConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => PlacementConfig::default(),
    };

    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };
    debug!(bytes = source.len(), "read placement request");

    let resolver = PlacementResolver::new(config);
    let resolution = match resolve_request_json(&source, &resolver) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.report {
        if resolution.adjustments.is_empty() {
            eprintln!("no adjustments: candidate was already valid");
        }
        for adjustment in &resolution.adjustments {
            eprintln!("adjusted: {}", adjustment);
        }
    }

    let output = if cli.pretty {
        serde_json::to_string_pretty(&resolution.placement)
    } else {
        serde_json::to_string(&resolution.placement)
    };
    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error encoding placement: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"Furniture Placer - automatic furniture placement

USAGE:
    furniture-placer [OPTIONS] [FILE]
    echo '<request json>' | furniture-placer

OPTIONS:
    -c, --config    Placement tuning (TOML file)
    -r, --report    Print the corrections applied to stderr
    -p, --pretty    Pretty-print the output JSON
    -v, --verbose   Debug logging
    -h, --help      Print help

REQUEST:
    {{
      "candidate": {{"x": 0.5, "y": 0.5, "rotation": 0, "scale": 1}},
      "context": {{
        "roomWidth": 4, "roomDepth": 4,
        "existingItems": [{{"position": [1.0, 0.0, -0.5]}}],
        "label": "couch",
        "modelDimensions": {{"width": 2.0, "depth": 0.9}}
      }}
    }}

Instead of "candidate", a request may carry "rawSuggestion": the unparsed
text returned by a vision model (markdown code fences are tolerated).

QUICK START:
    echo '{{"candidate":{{"x":0.5,"y":0.5,"rotation":0,"scale":1}},"context":{{"roomWidth":4,"roomDepth":4,"label":"couch"}}}}' | furniture-placer"#
    );
}
