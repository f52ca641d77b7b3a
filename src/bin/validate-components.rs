use anyhow::{anyhow, Context, Result};
use clap::Parser;
use encoding_rs::Encoding;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use studio_components::constants::{DEFAULT_OUTPUT_PATH, DEFAULT_SCHEMA_PATH, DEFAULT_TEXT_ENCODING};
use studio_components::statistics::read_document;

/// Check a generated components document against the components v1 schema.
#[derive(Parser, Debug)]
#[command(name = "validate-components", version, about = "Validate components JSON against schema")]
struct Cli {
    /// Components JSON file
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    path: PathBuf,

    /// Schema file
    #[arg(long, default_value = DEFAULT_SCHEMA_PATH)]
    schema: PathBuf,

    /// Charset the components file was written in (the converter's text_encoding)
    #[arg(long, default_value = DEFAULT_TEXT_ENCODING)]
    encoding: String,
}

fn load_json(path: &Path, encoding: &'static Encoding) -> Result<Value> {
    let data = read_document(path, encoding)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Schema violations, each tagged with the offending component's title when
/// one can be found
fn violations(compiled: &JSONSchema, document: &Value) -> Vec<String> {
    let Err(errors) = compiled.validate(document) else {
        return Vec::new();
    };
    errors
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let title = pointer
                .split('/')
                .nth(1)
                .and_then(|idx| idx.parse::<usize>().ok())
                .and_then(|idx| document.get(idx))
                .and_then(|component| component.get("Title"))
                .and_then(Value::as_str);
            match title {
                Some(title) => format!("{} at {} ({:?})", error, pointer, title),
                None => format!("{} at {}", error, pointer),
            }
        })
        .collect()
}

fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    let encoding = Encoding::for_label(args.encoding.trim().as_bytes())
        .ok_or_else(|| anyhow!("Unknown text encoding: {:?}", args.encoding))?;

    // jsonschema 0.17 wants a 'static schema; leak it for the CLI lifetime
    let schema: &'static Value = Box::leak(Box::new(load_json(&args.schema, encoding_rs::UTF_8)?));
    let document = load_json(&args.path, encoding)?;

    let compiled = JSONSchema::options()
        .compile(schema)
        .context("Failed to compile JSON Schema")?;

    let problems = violations(&compiled, &document);
    if problems.is_empty() {
        let count = document.as_array().map_or(0, Vec::len);
        println!("valid: {} components in {}", count, args.path.display());
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!("invalid: {}", args.path.display());
    for problem in problems {
        eprintln!("- {}", problem);
    }
    Ok(ExitCode::FAILURE)
}
