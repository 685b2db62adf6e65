//! autohighlight - highlight a file or stdin as HTML span markup
//!
//! Prints `{"value": ..., "language": ...}` on stdout. Logging goes to
//! stderr and is controlled by `RUST_LOG`.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use autohighlight::{HighlightConfig, HighlightResult, Highlighter, Result};

/// Syntax highlighting with automatic language detection
#[derive(Parser, Debug)]
#[command(name = "autohighlight", version, about)]
struct CliArgs {
    /// File to highlight (stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Highlight as this language instead of detecting it
    #[arg(short = 'l', long, value_name = "LANG", conflicts_with = "subset")]
    language: Option<String>,

    /// Only consider these languages during detection
    #[arg(short = 's', long, value_name = "LANGS", value_delimiter = ',')]
    subset: Vec<String>,

    /// Configuration file (default ~/.autohighlight.toml)
    #[arg(short = 'c', long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Extra directory of *.toml grammars (repeatable)
    #[arg(short = 'g', long = "grammars", value_name = "DIR")]
    grammars: Vec<PathBuf>,

    /// Print only the markup, not the JSON object
    #[arg(long)]
    value_only: bool,

    /// List available languages and exit
    #[arg(long)]
    list: bool,
}

fn main() {
    init_logging();
    if let Err(e) = run(CliArgs::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: CliArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => HighlightConfig::load(path)?,
        None => HighlightConfig::load_default()?,
    };
    config.grammar_dirs.extend(args.grammars.iter().cloned());
    let highlighter = Highlighter::from_config(config)?;

    if args.list {
        for grammar in highlighter.registry().all() {
            println!("{}\t{}\t{}", grammar.id(), grammar.name(), grammar.aliases().join(","));
        }
        return Ok(());
    }

    let code = read_input(args.file.as_deref())?;
    let result = highlight(&highlighter, &args, &code)?;

    if args.value_only {
        print!("{}", result.value);
    } else {
        let output = serde_json::json!({
            "value": result.value,
            "language": result.language,
        });
        println!("{}", output);
    }
    Ok(())
}

fn highlight(highlighter: &Highlighter, args: &CliArgs, code: &str) -> Result<HighlightResult> {
    if let Some(language) = &args.language {
        return highlighter.highlight(code, language);
    }
    if args.subset.is_empty() {
        return Ok(highlighter.highlight_auto(code));
    }
    let subset: Vec<&str> = args.subset.iter().map(String::as_str).collect();
    highlighter.highlight_auto_in(code, &subset)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut code = String::new();
            io::stdin().read_to_string(&mut code)?;
            Ok(code)
        }
    }
}
