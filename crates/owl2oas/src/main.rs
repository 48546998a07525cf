use std::path::{Path, PathBuf};
use std::process;

use owl2oas::error::GenError;
use owl2oas::RdfFormat;

/// Language tag used to pick labels for schema and property names.
const PREFERRED_LANGUAGE: &str = "en";

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    let path = match parse_args(&args) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!();
            eprintln!("Usage: owl2oas <ontology-file>");
            eprintln!();
            eprintln!("Arguments:");
            eprintln!(
                "  <ontology-file>    RDF serialization of the ontology (format inferred from"
            );
            eprintln!("                     the file extension; defaults to Turtle)");
            process::exit(2);
        }
    };

    if let Err(e) = run(&path) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("owl2oas=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> Result<PathBuf, String> {
    let mut path: Option<PathBuf> = None;

    let mut i = 1; // skip argv[0]
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Err("".to_string()),
            arg if arg.starts_with('-') => return Err(format!("unknown flag: {arg}")),
            arg => {
                if path.is_some() {
                    return Err(format!("unexpected argument: {arg}"));
                }
                path = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    path.ok_or_else(|| "missing required argument: <ontology-file>".to_string())
}

fn run(path: &Path) -> Result<(), GenError> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(RdfFormat::from_extension)
        .unwrap_or(RdfFormat::Turtle);

    let source = std::fs::read_to_string(path).map_err(|e| GenError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let document = owl2oas::generate_document(&source, format, PREFERRED_LANGUAGE)?;

    let yaml = serde_yaml::to_string(&document)
        .map_err(|e| GenError::Other(format!("YAML serialization failed: {e}")))?;

    // Diagnostics go to stderr; stdout carries only the document.
    print!("{yaml}");

    Ok(())
}
