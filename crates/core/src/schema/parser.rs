//! Schema parser — recursive descent over the token stream.
//!
//! Each grammar production maps to one `parse_*` method returning an owned
//! subtree. One token of lookahead suffices throughout: every production is
//! uniquely resolved by its first keyword. The first mismatch aborts the
//! whole parse; there is no recovery and no partial result.

use super::column::{
    Column, ConvertedType, LogicalType, PhysicalType, Repetition, SchemaDefinition, TimeUnit,
};
use super::lexer::{TokKind, Token, tokenize};
use crate::error::{SchemaError, SchemaParseError};
use crate::span::Span;

const REPETITION_HINT: &str = "repetition keyword (required, optional or repeated)";

/// Parse a textual schema definition into a [`SchemaDefinition`].
///
/// The input must adhere to the following grammar:
///
/// ```text
/// message ::= 'message' <identifier> '{' <message-body> '}'
/// message-body ::= <column-definition>*
/// column-definition ::= <repetition-type> <column-type-definition>
/// repetition-type ::= 'required' | 'repeated' | 'optional'
/// column-type-definition ::= <group-definition> | <field-definition>
/// group-definition ::= 'group' <identifier> <converted-type-annotation>? '{' <message-body> '}'
/// field-definition ::= <type> <identifier> <logical-type-annotation>? <field-id-definition>? ';'
/// type ::= 'binary' | 'float' | 'double' | 'boolean' | 'int32' | 'int64'
///        | 'int96' | 'fixed_len_byte_array' '(' <number> ')'
/// converted-type-annotation ::= '(' <converted-type> ')'
/// converted-type ::= 'UTF8' | 'MAP' | 'MAP_KEY_VALUE' | 'LIST' | 'ENUM'
///        | 'DECIMAL' | 'DATE' | 'TIME_MILLIS' | 'TIME_MICROS'
///        | 'TIMESTAMP_MILLIS' | 'TIMESTAMP_MICROS' | 'UINT_8' | 'UINT_16'
///        | 'UINT_32' | 'UINT_64' | 'INT_8' | 'INT_16' | 'INT_32' | 'INT_64'
///        | 'JSON' | 'BSON' | 'INTERVAL'
/// logical-type-annotation ::= '(' <logical-type> ')'
/// logical-type ::= 'STRING' | 'DATE' | 'TIMESTAMP' '(' <time-unit> ',' <boolean> ')'
///        | 'UUID' | 'ENUM' | 'JSON'
/// field-id-definition ::= '=' <number>
/// time-unit ::= 'MILLIS' | 'MICROS' | 'NANOS'
/// boolean ::= 'false' | 'true'
/// ```
///
/// A document is parsed whole or not at all: trailing tokens after the
/// closing `}` are an error, and no tree is exposed on failure.
pub fn parse_schema_definition(input: &str) -> Result<SchemaDefinition, SchemaError> {
    let toks = tokenize(input)?;
    let mut parser = Parser {
        toks,
        pos: 0,
        input_len: input.len(),
    };
    let root = parser.parse_message()?;
    Ok(SchemaDefinition::new(root))
}

struct Parser<'a> {
    toks: Vec<Token<'a>>,
    pos: usize,
    input_len: usize,
}

impl<'a> Parser<'a> {
    // ── Token navigation ────────────────────────────────────────────────

    fn peek(&self) -> Option<Token<'a>> {
        self.toks.get(self.pos).copied()
    }

    fn eof_span(&self) -> Span {
        Span::empty(self.input_len)
    }

    /// Consume the next token if it has the given kind, otherwise fail with
    /// the expected construct and the actual token.
    fn expect(&mut self, kind: TokKind, expected: &str) -> Result<Token<'a>, SchemaParseError> {
        match self.peek() {
            Some(tok) if tok.kind == kind => {
                self.pos += 1;
                Ok(tok)
            }
            Some(tok) => Err(SchemaParseError::new(
                expected,
                format!("'{}'", tok.text),
                tok.span(),
            )),
            None => Err(SchemaParseError::new(
                expected,
                "end of input",
                self.eof_span(),
            )),
        }
    }

    /// Consume a `Word` token with the exact given spelling.
    fn expect_keyword(&mut self, keyword: &str) -> Result<(), SchemaParseError> {
        let tok = self.expect(TokKind::Word, &format!("'{keyword}'"))?;
        if tok.text == keyword {
            Ok(())
        } else {
            Err(SchemaParseError::new(
                format!("'{keyword}'"),
                format!("'{}'", tok.text),
                tok.span(),
            ))
        }
    }

    /// Consume the next token if it has the given kind.
    fn eat(&mut self, kind: TokKind) -> bool {
        if self.peek().is_some_and(|tok| tok.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a numeral and parse it as `i32`.
    fn parse_number(&mut self, expected: &str) -> Result<(i32, Span), SchemaParseError> {
        let tok = self.expect(TokKind::Number, expected)?;
        let value = tok.text.parse::<i32>().map_err(|_| {
            SchemaParseError::new(
                expected,
                format!("out-of-range numeral '{}'", tok.text),
                tok.span(),
            )
        })?;
        Ok((value, tok.span()))
    }

    // ── Productions ─────────────────────────────────────────────────────

    /// `message ::= 'message' <identifier> '{' <message-body> '}'`
    fn parse_message(&mut self) -> Result<Column, SchemaParseError> {
        self.expect_keyword("message")?;
        let name = self.expect(TokKind::Word, "message name")?.text.to_owned();
        self.expect(TokKind::LBrace, "'{'")?;
        let children = self.parse_body()?;
        self.expect(TokKind::RBrace, "'}'")?;
        if let Some(tok) = self.peek() {
            return Err(SchemaParseError::new(
                "end of input",
                format!("'{}'", tok.text),
                tok.span(),
            ));
        }
        Ok(Column::root(name, children))
    }

    /// `message-body ::= <column-definition>*`
    ///
    /// Declaration order is preserved as child order — it is the physical
    /// layout order of the schema.
    fn parse_body(&mut self) -> Result<Vec<Column>, SchemaParseError> {
        let mut children = Vec::new();
        while let Some(tok) = self.peek() {
            if tok.kind == TokKind::RBrace {
                break;
            }
            children.push(self.parse_column()?);
        }
        Ok(children)
    }

    /// `column-definition ::= <repetition-type> <column-type-definition>`
    fn parse_column(&mut self) -> Result<Column, SchemaParseError> {
        let repetition = self.parse_repetition()?;
        match self.peek() {
            Some(tok) if tok.kind == TokKind::Word && tok.text == "group" => {
                self.parse_group(repetition)
            }
            _ => self.parse_field(repetition),
        }
    }

    /// `repetition-type ::= 'required' | 'repeated' | 'optional'`
    fn parse_repetition(&mut self) -> Result<Repetition, SchemaParseError> {
        let tok = self.expect(TokKind::Word, REPETITION_HINT)?;
        match tok.text {
            "required" => Ok(Repetition::Required),
            "optional" => Ok(Repetition::Optional),
            "repeated" => Ok(Repetition::Repeated),
            other => Err(SchemaParseError::new(
                REPETITION_HINT,
                format!("'{other}'"),
                tok.span(),
            )),
        }
    }

    /// `group-definition ::= 'group' <identifier> <converted-type-annotation>? '{' <message-body> '}'`
    ///
    /// No trailing `;`.
    fn parse_group(&mut self, repetition: Repetition) -> Result<Column, SchemaParseError> {
        self.expect_keyword("group")?;
        let name = self.expect(TokKind::Word, "group name")?.text.to_owned();
        let converted_type = if self.eat(TokKind::LParen) {
            let annotation = self.parse_converted_type()?;
            self.expect(TokKind::RParen, "')'")?;
            Some(annotation)
        } else {
            None
        };
        self.expect(TokKind::LBrace, "'{'")?;
        let children = self.parse_body()?;
        self.expect(TokKind::RBrace, "'}'")?;

        let mut column = Column::group(name, repetition, children);
        column.converted_type = converted_type;
        Ok(column)
    }

    /// `field-definition ::= <type> <identifier> <logical-type-annotation>? <field-id-definition>? ';'`
    fn parse_field(&mut self, repetition: Repetition) -> Result<Column, SchemaParseError> {
        let physical = self.parse_physical_type()?;
        let name = self.expect(TokKind::Word, "column name")?.text.to_owned();
        let logical_type = if self.eat(TokKind::LParen) {
            let annotation = self.parse_logical_type()?;
            self.expect(TokKind::RParen, "')'")?;
            Some(annotation)
        } else {
            None
        };
        let field_id = if self.eat(TokKind::Equals) {
            Some(self.parse_number("field id")?.0)
        } else {
            None
        };
        self.expect(TokKind::Semicolon, "';'")?;

        let mut column = Column::leaf(name, repetition, physical);
        column.logical_type = logical_type;
        column.field_id = field_id;
        Ok(column)
    }

    /// `type ::= 'binary' | 'float' | 'double' | 'boolean' | 'int32' | 'int64'
    /// | 'int96' | 'fixed_len_byte_array' '(' <number> ')'`
    fn parse_physical_type(&mut self) -> Result<PhysicalType, SchemaParseError> {
        let tok = self.expect(TokKind::Word, "type name or 'group'")?;
        match tok.text {
            "binary" => Ok(PhysicalType::Binary),
            "float" => Ok(PhysicalType::Float),
            "double" => Ok(PhysicalType::Double),
            "boolean" => Ok(PhysicalType::Boolean),
            "int32" => Ok(PhysicalType::Int32),
            "int64" => Ok(PhysicalType::Int64),
            "int96" => Ok(PhysicalType::Int96),
            "fixed_len_byte_array" => {
                self.expect(TokKind::LParen, "'('")?;
                let (len, span) = self.parse_number("fixed_len_byte_array length")?;
                if len == 0 {
                    return Err(SchemaParseError::new(
                        "positive fixed_len_byte_array length",
                        "'0'",
                        span,
                    ));
                }
                self.expect(TokKind::RParen, "')'")?;
                Ok(PhysicalType::FixedLenByteArray(len))
            }
            other => Err(SchemaParseError::new(
                "type name or 'group'",
                format!("'{other}'"),
                tok.span(),
            )),
        }
    }

    /// `converted-type ::= 'UTF8' | 'MAP' | … | 'INTERVAL'`
    fn parse_converted_type(&mut self) -> Result<ConvertedType, SchemaParseError> {
        let tok = self.expect(TokKind::Word, "converted type name")?;
        match tok.text {
            "UTF8" => Ok(ConvertedType::Utf8),
            "MAP" => Ok(ConvertedType::Map),
            "MAP_KEY_VALUE" => Ok(ConvertedType::MapKeyValue),
            "LIST" => Ok(ConvertedType::List),
            "ENUM" => Ok(ConvertedType::Enum),
            "DECIMAL" => Ok(ConvertedType::Decimal),
            "DATE" => Ok(ConvertedType::Date),
            "TIME_MILLIS" => Ok(ConvertedType::TimeMillis),
            "TIME_MICROS" => Ok(ConvertedType::TimeMicros),
            "TIMESTAMP_MILLIS" => Ok(ConvertedType::TimestampMillis),
            "TIMESTAMP_MICROS" => Ok(ConvertedType::TimestampMicros),
            "UINT_8" => Ok(ConvertedType::Uint8),
            "UINT_16" => Ok(ConvertedType::Uint16),
            "UINT_32" => Ok(ConvertedType::Uint32),
            "UINT_64" => Ok(ConvertedType::Uint64),
            "INT_8" => Ok(ConvertedType::Int8),
            "INT_16" => Ok(ConvertedType::Int16),
            "INT_32" => Ok(ConvertedType::Int32),
            "INT_64" => Ok(ConvertedType::Int64),
            "JSON" => Ok(ConvertedType::Json),
            "BSON" => Ok(ConvertedType::Bson),
            "INTERVAL" => Ok(ConvertedType::Interval),
            other => Err(SchemaParseError::new(
                "converted type name",
                format!("'{other}'"),
                tok.span(),
            )),
        }
    }

    /// `logical-type ::= 'STRING' | 'DATE' | 'TIMESTAMP' '(' <time-unit> ',' <boolean> ')'
    /// | 'UUID' | 'ENUM' | 'JSON'`
    fn parse_logical_type(&mut self) -> Result<LogicalType, SchemaParseError> {
        let tok = self.expect(TokKind::Word, "logical type name")?;
        match tok.text {
            "STRING" => Ok(LogicalType::String),
            "DATE" => Ok(LogicalType::Date),
            "UUID" => Ok(LogicalType::Uuid),
            "ENUM" => Ok(LogicalType::Enum),
            "JSON" => Ok(LogicalType::Json),
            "TIMESTAMP" => {
                self.expect(TokKind::LParen, "'('")?;
                let unit = self.parse_time_unit()?;
                self.expect(TokKind::Comma, "','")?;
                let is_adjusted_to_utc = self.parse_bool()?;
                self.expect(TokKind::RParen, "')'")?;
                Ok(LogicalType::Timestamp {
                    unit,
                    is_adjusted_to_utc,
                })
            }
            other => Err(SchemaParseError::new(
                "logical type name",
                format!("'{other}'"),
                tok.span(),
            )),
        }
    }

    /// `time-unit ::= 'MILLIS' | 'MICROS' | 'NANOS'`
    fn parse_time_unit(&mut self) -> Result<TimeUnit, SchemaParseError> {
        let tok = self.expect(TokKind::Word, "time unit (MILLIS, MICROS or NANOS)")?;
        match tok.text {
            "MILLIS" => Ok(TimeUnit::Millis),
            "MICROS" => Ok(TimeUnit::Micros),
            "NANOS" => Ok(TimeUnit::Nanos),
            other => Err(SchemaParseError::new(
                "time unit (MILLIS, MICROS or NANOS)",
                format!("'{other}'"),
                tok.span(),
            )),
        }
    }

    /// `boolean ::= 'false' | 'true'`
    fn parse_bool(&mut self) -> Result<bool, SchemaParseError> {
        let tok = self.expect(TokKind::Word, "'true' or 'false'")?;
        match tok.text {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(SchemaParseError::new(
                "'true' or 'false'",
                format!("'{other}'"),
                tok.span(),
            )),
        }
    }
}
