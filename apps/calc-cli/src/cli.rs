//! Command-line interface for the calculator.
//!
//! This module provides the command-line argument parsing and dispatch
//! logic for the `calc` CLI tool: reading a document (stdin or a file),
//! optionally loading settings/exchange-rate overrides, and printing each
//! line's formatted result.
//!
//! # Examples
//!
//! ```bash
//! echo "5 km to m to cm" | calc
//! calc --config settings.toml document.calc
//! calc --rates snapshot.json --verbose document.calc
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use calc_core::Orchestrator;

use crate::config::{load_rates_json, load_settings};

/// Command-line interface for the calculator.
#[derive(Parser)]
#[command(name = "calc")]
#[command(about = "Line-oriented unit/currency/date calculator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Input document. Reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// TOML settings file overriding the rendering defaults (spec §6.3).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Exchange-rate snapshot JSON file (spec §6.4).
    #[arg(long)]
    pub rates: Option<PathBuf>,

    /// Echo each line's token count and chosen-tree kind to stderr.
    #[arg(long)]
    pub verbose: bool,
}

pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut orchestrator = Orchestrator::new();
    if let Some(path) = &cli.config {
        orchestrator.settings = load_settings(path)?;
    }

    if let Some(path) = &cli.rates {
        orchestrator.load_exchange_rates(&load_rates_json(path)?)?;
    }

    let input = read_input(cli.input.as_deref())?;
    let result = orchestrator.calculate(&input);

    for line in &result.lines {
        if cli.verbose {
            eprintln!("line {}: kind={:?} has_error={}", line.line_number, line.kind, line.has_error);
        }
        if let Some(formatted) = &line.formatted {
            println!("{formatted}");
        }
    }

    if !result.errors.lexer.is_empty() || !result.errors.parser.is_empty() {
        for e in result.errors.lexer.iter().chain(result.errors.parser.iter()) {
            eprintln!("line {}: {}", e.line_number, e.message);
        }
    }

    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_a_document_from_a_file_argument() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2 + 2").unwrap();
        let content = read_input(Some(file.path())).unwrap();
        assert_eq!(content.trim(), "2 + 2");
    }
}
