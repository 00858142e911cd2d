//! Core library for textual Parquet schema definitions.
//!
//! Parses a schema document into an immutable column tree, renders the tree
//! back to canonical text, and converts any node to or from the storage
//! format's metadata record. The main entry points are
//! [`parse_schema_definition`] for parsing, the [`SchemaDefinition`]
//! `Display` impl for rendering, and [`Column::element`] for metadata
//! extraction.

#![warn(missing_docs)]

/// Schema element records: the storage format's native metadata shape.
pub mod element;
/// Typed failure modes of schema parsing.
pub mod error;
/// Schema grammar: lexer, parser, column tree, printer, and JSON dump.
pub mod schema;
/// Byte spans and line/column mapping for schema source text.
pub mod span;

// ── Convenience re-exports ──────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Parser
pub use schema::parser::parse_schema_definition;

// Column tree
pub use schema::column::{
    Column, ColumnKind, ConvertedType, LogicalType, PhysicalType, Repetition, SchemaDefinition,
    TimeUnit,
};

// Metadata elements
pub use element::{ElementError, ElementType, SchemaElement};

// Errors and positions
pub use error::{LexError, SchemaError, SchemaParseError};
pub use span::{LineIndex, Span};

// Serialization helpers
pub use schema::dump::to_pretty_json;
