//! Typed failure modes of schema parsing.
//!
//! There are exactly two: [`LexError`] for a character outside the grammar's
//! alphabet, and [`SchemaParseError`] for a token stream that does not match
//! the grammar. Both abort the parse — no recovery, no partial tree.

use serde::Serialize;

use crate::span::Span;

/// A character in the input that no token of the grammar can start with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("unrecognized character {ch:?} at offset {}", .span.start)]
pub struct LexError {
    /// The offending character.
    pub ch: char,
    /// Byte span of the offending character.
    pub span: Span,
}

/// A structural mismatch between the token stream and the schema grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("expected {expected}, found {found} at offset {}", .span.start)]
pub struct SchemaParseError {
    /// The construct the parser was looking for (e.g. `"identifier"`,
    /// `"repetition keyword"`, `"';'"`).
    pub expected: String,
    /// Description of what was actually there (token text, or `end of input`).
    pub found: String,
    /// Byte span of the offending token, or an empty span at end of input.
    pub span: Span,
}

impl SchemaParseError {
    pub(crate) fn new(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        Self {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }
}

/// Either failure mode of [`parse_schema_definition`].
///
/// [`parse_schema_definition`]: crate::schema::parser::parse_schema_definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "lowercase")]
pub enum SchemaError {
    /// The lexer hit a character it cannot classify.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token stream does not match the grammar.
    #[error(transparent)]
    Parse(#[from] SchemaParseError),
}

impl SchemaError {
    /// Byte span of the failure in the source input.
    pub fn span(&self) -> Span {
        match self {
            SchemaError::Lex(e) => e.span,
            SchemaError::Parse(e) => e.span,
        }
    }
}
