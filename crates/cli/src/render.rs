//! Error rendering for parse failures.
//!
//! Pretty mode produces a coloured, source-annotated ariadne report on
//! stderr. JSON mode emits a machine-readable envelope on stdout for piped
//! or tooling consumers.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use schemadef_core::{LineIndex, SchemaError};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for error rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Resolve an explicit `--output` value, defaulting by TTY detection:
    /// pretty for interactive terminals, JSON for pipes.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────────────

/// Render a parse failure in the requested format.
pub(crate) fn render_error(source: &str, filename: &str, err: &SchemaError, format: Format) {
    match format {
        Format::Pretty => render_pretty(source, filename, err),
        Format::Json => render_json(source, filename, err),
    }
}

fn render_pretty(source: &str, filename: &str, err: &SchemaError) {
    let span = err.span();

    // Zero-width spans (end of input) have nothing to underline; fall back
    // to a plain line:column message.
    if span.start == span.end || span.start >= source.len() {
        let (line, col) = LineIndex::new(source).line_col(span.start);
        eprintln!("error: {err} ({filename}:{}:{})", line + 1, col + 1);
        return;
    }

    let start = span.start.min(source.len());
    let end = span.end.min(source.len()).max(start);

    Report::build(ReportKind::Error, (filename, start..end))
        .with_message(err.to_string())
        .with_config(Config::default().with_compact(false))
        .with_label(
            Label::new((filename, start..end))
                .with_message(label_message(err))
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)))
        .ok();
}

fn label_message(err: &SchemaError) -> String {
    match err {
        SchemaError::Lex(_) => "this character cannot start any token".to_owned(),
        SchemaError::Parse(e) => format!("expected {} here", e.expected),
    }
}

fn render_json(source: &str, filename: &str, err: &SchemaError) {
    let (line, col) = LineIndex::new(source).line_col(err.span().start);
    let envelope = serde_json::json!({
        "file": filename,
        "message": err.to_string(),
        "line": line + 1,
        "column": col + 1,
        "error": err,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&envelope).expect("error envelope serialization cannot fail")
    );
}
