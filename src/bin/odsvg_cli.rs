//! CLI tool for odsvg - renders the first table of an ODS file as SVG
//!
//! Usage:
//!   odsvg_cli <input.ods> <output.svg>                     # Render with defaults
//!   odsvg_cli <input.ods> <output.svg> --config opts.json  # Override layout options
//!   odsvg_cli <input.ods> --dump-json                      # Parsed document to stdout
//!   odsvg_cli <input.ods> --dump-json -o out.json          # Parsed document to file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use odsvg::parser::parse;
use odsvg::RenderOptions;

const USAGE: &str = "Usage: odsvg_cli <input.ods> <output.svg> [--config opts.json]\n       \
                     odsvg_cli <input.ods> --dump-json [-o output.json]";

fn fail(msg: &str) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        fail(USAGE);
    }

    let input_path = &args[1];
    if args[2] == "--dump-json" {
        let output_path = if args.len() > 4 && args[3] == "-o" {
            Some(&args[4])
        } else {
            None
        };
        dump_json(input_path, output_path.map(String::as_str));
        return;
    }

    let output_path = &args[2];
    let options = if args.len() > 4 && args[3] == "--config" {
        let json = fs::read_to_string(&args[4])
            .unwrap_or_else(|e| fail(&format!("Error reading {}: {}", args[4], e)));
        RenderOptions::from_json(&json)
            .unwrap_or_else(|e| fail(&format!("Error in config {}: {}", args[4], e)))
    } else if args.len() > 3 {
        fail(USAGE);
    } else {
        RenderOptions::default()
    };

    if let Err(e) = odsvg::schedule_with_options(input_path, output_path, &options) {
        fail(&format!("Error rendering {}: {}", input_path, e));
    }
    eprintln!("Written: {}", output_path);
}

fn dump_json(input_path: &str, output_path: Option<&str>) {
    let data = fs::read(input_path)
        .unwrap_or_else(|e| fail(&format!("Error reading {}: {}", input_path, e)));

    let document = parse(&data).unwrap_or_else(|e| fail(&format!("Error parsing ODS: {}", e)));

    let json = serde_json::to_string_pretty(&document)
        .unwrap_or_else(|e| fail(&format!("Error serializing JSON: {}", e)));

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                fail(&format!("Error writing {}: {}", path, e));
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
