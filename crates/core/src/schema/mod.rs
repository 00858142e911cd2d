/// Column tree model and the owning schema handle.
pub mod column;
/// JSON serialization helpers for the schema tree.
pub mod dump;
/// Schema lexer — tokenizes raw input into a stream of borrowed tokens.
pub mod lexer;
/// Schema parser — converts tokens into a column tree.
pub mod parser;
/// Canonical printer — renders a column tree back to schema text.
pub mod print;
