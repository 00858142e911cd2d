mod render;

use std::fs;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use schemadef_core::{Column, SchemaDefinition, parse_schema_definition, to_pretty_json};

use crate::render::{Format, render_error};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "schemadef",
    version,
    about = "schemadef — parse, check, format, and inspect textual Parquet schema definitions"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── File analysis commands (progressive: check → parse → element) ───
    /// Syntax-check a schema file.
    Check {
        /// Schema file to check.
        file: String,
    },

    /// Parse a schema file and print its column tree as JSON.
    Parse {
        /// Schema file to parse.
        file: String,
    },

    /// Print the metadata record for the root or for a column path.
    Element {
        /// Schema file to inspect.
        file: String,
        /// Dot-separated path of direct-child lookups (e.g.
        /// "contacts.list.uid"). Omit for the root.
        path: Option<String>,
    },

    // ── File transformation ─────────────────────────────────────────────
    /// Format a schema file into canonical form.
    Format {
        /// Schema file to format.
        file: String,
        /// Write formatted output back to the file (in-place).
        #[arg(long, short, conflicts_with = "check")]
        write: bool,
        /// Check if the file is already canonical (exit 1 if not). For CI.
        #[arg(long, conflicts_with = "write")]
        check: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());
    match run(cli.cmd, format) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(2);
        }
    }
}

fn run(cmd: Cmd, format: Format) -> Result<i32> {
    match cmd {
        Cmd::Check { file } => {
            let source = read(&file)?;
            match parse_schema_definition(&source) {
                Ok(_) => {
                    println!("ok: {file}");
                    Ok(0)
                }
                Err(err) => {
                    render_error(&source, &file, &err, format);
                    Ok(1)
                }
            }
        }

        Cmd::Parse { file } => {
            let source = read(&file)?;
            match parse_schema_definition(&source) {
                Ok(schema) => {
                    println!("{}", to_pretty_json(&schema));
                    Ok(0)
                }
                Err(err) => {
                    render_error(&source, &file, &err, format);
                    Ok(1)
                }
            }
        }

        Cmd::Element { file, path } => {
            let source = read(&file)?;
            let schema = match parse_schema_definition(&source) {
                Ok(schema) => schema,
                Err(err) => {
                    render_error(&source, &file, &err, format);
                    return Ok(1);
                }
            };
            match resolve_path(&schema, path.as_deref()) {
                Some(column) => {
                    let json = serde_json::to_string_pretty(&column.element())
                        .context("failed to serialize schema element")?;
                    println!("{json}");
                    Ok(0)
                }
                None => {
                    eprintln!("no such column: {}", path.unwrap_or_default());
                    Ok(1)
                }
            }
        }

        Cmd::Format { file, write, check } => {
            let source = read(&file)?;
            let schema = match parse_schema_definition(&source) {
                Ok(schema) => schema,
                Err(err) => {
                    render_error(&source, &file, &err, format);
                    return Ok(1);
                }
            };
            let formatted = schema.to_string();
            if check {
                if formatted == source {
                    Ok(0)
                } else {
                    eprintln!("not canonical: {file}");
                    Ok(1)
                }
            } else if write {
                fs::write(&file, &formatted).with_context(|| format!("failed to write {file}"))?;
                Ok(0)
            } else {
                print!("{formatted}");
                Ok(0)
            }
        }
    }
}

fn read(file: &str) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
}

/// Walk a dot-separated path of direct-child lookups from the root.
///
/// `None` anywhere along the way means the column is absent — an expected
/// outcome when probing, reported as such rather than as a hard error.
fn resolve_path<'a>(schema: &'a SchemaDefinition, path: Option<&str>) -> Option<&'a Column> {
    let mut column = schema.root();
    if let Some(path) = path {
        for segment in path.split('.') {
            column = column.child(segment)?;
        }
    }
    Some(column)
}
