//! Canonical printer — renders a column tree back to schema text.
//!
//! Output is deterministic: two spaces of indent per nesting level, one
//! column per line, canonical keyword spellings from the model's `Display`
//! impls. Re-parsing the output reproduces a tree equal in every attribute
//! and in child order to the original.

use std::fmt;

use super::column::{Column, ColumnKind, Repetition, SchemaDefinition};

impl fmt::Display for SchemaDefinition {
    /// Render the whole schema as canonical text.
    ///
    /// Printing a well-formed tree never fails; the [`Default`] schema
    /// renders the fixed `message empty {\n}\n` placeholder.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "message {} {{", self.name())?;
        write_columns(f, self.root().children(), 2)?;
        writeln!(f, "}}")
    }
}

fn write_columns(f: &mut fmt::Formatter<'_>, cols: &[Column], indent: usize) -> fmt::Result {
    for col in cols {
        write_indent(f, indent)?;
        write_repetition(f, col.repetition)?;
        f.write_str(" ")?;

        match &col.kind {
            ColumnKind::Group(children) => {
                write!(f, "group {}", col.name)?;
                if let Some(converted) = col.converted_type {
                    write!(f, " ({converted})")?;
                }
                f.write_str(" {\n")?;
                write_columns(f, children, indent + 2)?;
                write_indent(f, indent)?;
                f.write_str("}\n")?;
            }
            ColumnKind::Leaf(physical) => {
                write!(f, "{physical} {}", col.name)?;
                if let Some(logical) = col.logical_type {
                    write!(f, " ({logical})")?;
                }
                if let Some(id) = col.field_id {
                    write!(f, " = {id}")?;
                }
                f.write_str(";\n")?;
            }
        }
    }
    Ok(())
}

fn write_repetition(f: &mut fmt::Formatter<'_>, repetition: Option<Repetition>) -> fmt::Result {
    match repetition {
        Some(repetition) => write!(f, "{repetition}"),
        // A non-root column without a repetition cannot come out of the
        // parser; render an internal-consistency marker instead of failing.
        None => f.write_str("BUG_MISSING_REPETITION"),
    }
}

fn write_indent(f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    for _ in 0..indent {
        f.write_str(" ")?;
    }
    Ok(())
}
