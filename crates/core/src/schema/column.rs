//! The column tree: the in-memory representation of a parsed schema.
//!
//! A schema is a strict tree of [`Column`] nodes owned by a
//! [`SchemaDefinition`]. Leaf/group exclusivity is structural: a column is
//! either a [`ColumnKind::Leaf`] with a physical type and no children, or a
//! [`ColumnKind::Group`] with children and no physical type. The tree is
//! built atomically by a successful parse and never mutated afterwards, so
//! shared references to it are safe across threads.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// How often a column may appear within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repetition {
    /// Exactly once.
    Required,
    /// Zero or one time.
    Optional,
    /// Zero or more times.
    Repeated,
}

/// Physical storage type of a leaf column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalType {
    /// Variable-length byte array.
    Binary,
    /// 32-bit IEEE 754 floating point.
    Float,
    /// 64-bit IEEE 754 floating point.
    Double,
    /// Single-bit boolean.
    Boolean,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 96-bit integer (deprecated timestamp representation).
    Int96,
    /// Fixed-width byte array with its length in bytes (always > 0).
    FixedLenByteArray(i32),
}

/// Legacy semantic annotation on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConvertedType {
    /// UTF-8 encoded string.
    Utf8,
    /// Map structure.
    Map,
    /// Key-value pair within a map.
    MapKeyValue,
    /// List structure.
    List,
    /// Enumerated value.
    Enum,
    /// Fixed-point decimal.
    Decimal,
    /// Days since the Unix epoch.
    Date,
    /// Milliseconds since midnight.
    TimeMillis,
    /// Microseconds since midnight.
    TimeMicros,
    /// Milliseconds since the Unix epoch.
    TimestampMillis,
    /// Microseconds since the Unix epoch.
    TimestampMicros,
    /// Unsigned 8-bit integer.
    #[serde(rename = "UINT_8")]
    Uint8,
    /// Unsigned 16-bit integer.
    #[serde(rename = "UINT_16")]
    Uint16,
    /// Unsigned 32-bit integer.
    #[serde(rename = "UINT_32")]
    Uint32,
    /// Unsigned 64-bit integer.
    #[serde(rename = "UINT_64")]
    Uint64,
    /// Signed 8-bit integer.
    #[serde(rename = "INT_8")]
    Int8,
    /// Signed 16-bit integer.
    #[serde(rename = "INT_16")]
    Int16,
    /// Signed 32-bit integer.
    #[serde(rename = "INT_32")]
    Int32,
    /// Signed 64-bit integer.
    #[serde(rename = "INT_64")]
    Int64,
    /// JSON document.
    Json,
    /// BSON document.
    Bson,
    /// Year-month-day interval.
    Interval,
}

/// Precision of a `TIMESTAMP` logical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeUnit {
    /// Millisecond precision.
    Millis,
    /// Microsecond precision.
    Micros,
    /// Nanosecond precision.
    Nanos,
}

/// Modern semantic annotation on a leaf column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicalType {
    /// UTF-8 encoded string.
    String,
    /// Days since the Unix epoch.
    Date,
    /// Instant in time; always carries both parameters, no defaulting.
    Timestamp {
        /// Precision of the stored value.
        unit: TimeUnit,
        /// Whether the value is normalized to UTC.
        is_adjusted_to_utc: bool,
    },
    /// 16-byte UUID.
    Uuid,
    /// Enumerated value.
    Enum,
    /// JSON document.
    Json,
}

/// Leaf/group discriminant of a column.
///
/// The two shapes are mutually exclusive by construction: a leaf carries a
/// physical type and cannot have children, a group carries children (possibly
/// none) and cannot have a physical type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// A field with a physical storage type.
    Leaf(PhysicalType),
    /// A nested group of columns, in declaration order.
    Group(Vec<Column>),
}

/// A single node of the schema tree — either a leaf field or a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name. Uniqueness among siblings is not enforced; the grammar
    /// permits duplicates and they are propagated uninterpreted.
    pub name: String,
    /// Repetition of this column within its parent. `None` only on the
    /// synthetic document root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetition: Option<Repetition>,
    /// Leaf or group shape.
    pub kind: ColumnKind,
    /// Legacy annotation. The grammar attaches it to groups only; element
    /// conversion may carry it on leaves as well.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_type: Option<ConvertedType>,
    /// Modern annotation; leaf fields only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_type: Option<LogicalType>,
    /// Optional external field identifier. Kept distinct from "id 0".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<i32>,
}

impl Column {
    /// Build a leaf column with no annotations.
    pub fn leaf(name: impl Into<String>, repetition: Repetition, physical: PhysicalType) -> Self {
        Self {
            name: name.into(),
            repetition: Some(repetition),
            kind: ColumnKind::Leaf(physical),
            converted_type: None,
            logical_type: None,
            field_id: None,
        }
    }

    /// Build a group column with no annotations.
    pub fn group(name: impl Into<String>, repetition: Repetition, children: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            repetition: Some(repetition),
            kind: ColumnKind::Group(children),
            converted_type: None,
            logical_type: None,
            field_id: None,
        }
    }

    /// Build the synthetic document root: a group with no repetition and no
    /// annotations, named after the declared message.
    pub fn root(name: impl Into<String>, children: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            repetition: None,
            kind: ColumnKind::Group(children),
            converted_type: None,
            logical_type: None,
            field_id: None,
        }
    }

    /// Whether this column is a group.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ColumnKind::Group(_))
    }

    /// Physical type of a leaf column, `None` for groups.
    pub fn physical_type(&self) -> Option<PhysicalType> {
        match self.kind {
            ColumnKind::Leaf(t) => Some(t),
            ColumnKind::Group(_) => None,
        }
    }

    /// Children of a group column, in declaration order. Empty for leaves.
    pub fn children(&self) -> &[Column] {
        match &self.kind {
            ColumnKind::Group(children) => children,
            ColumnKind::Leaf(_) => &[],
        }
    }

    /// First direct child with the given name, if any.
    ///
    /// Only direct children are searched, not the whole subtree. Probing for
    /// a column that may not exist is an expected usage pattern, so a miss is
    /// `None` rather than an error.
    pub fn child(&self, name: &str) -> Option<&Column> {
        self.children().iter().find(|c| c.name == name)
    }
}

/// A parsed schema document: the owner of one root group column.
///
/// Built atomically by [`parse_schema_definition`]; a failed parse exposes no
/// partial tree. Immutable after construction.
///
/// [`parse_schema_definition`]: crate::schema::parser::parse_schema_definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDefinition {
    root: Column,
}

impl SchemaDefinition {
    /// Wrap a root column. The root is expected to be a group carrying no
    /// repetition or annotations; [`parse_schema_definition`] always produces
    /// one.
    ///
    /// [`parse_schema_definition`]: crate::schema::parser::parse_schema_definition
    pub fn new(root: Column) -> Self {
        Self { root }
    }

    /// Parse a textual schema definition.
    ///
    /// Convenience alias for [`parse_schema_definition`].
    ///
    /// [`parse_schema_definition`]: crate::schema::parser::parse_schema_definition
    pub fn parse(input: &str) -> Result<Self, SchemaError> {
        crate::schema::parser::parse_schema_definition(input)
    }

    /// The declared message name.
    pub fn name(&self) -> &str {
        &self.root.name
    }

    /// The root group column.
    pub fn root(&self) -> &Column {
        &self.root
    }

    /// First direct child of the root with the given name, if any.
    ///
    /// The returned reference is a shared, read-only view into the tree — not
    /// a copy. Chain further lookups through [`Column::child`].
    pub fn sub_schema(&self, name: &str) -> Option<&Column> {
        self.root.child(name)
    }
}

impl Default for SchemaDefinition {
    /// The empty placeholder schema, rendered as `message empty {\n}\n`.
    fn default() -> Self {
        Self {
            root: Column::root("empty", Vec::new()),
        }
    }
}

// ── Canonical grammar spellings ─────────────────────────────────────────
// These are the fixed lookup tables used by the printer and by error
// messages. Each match is exhaustive, so a new variant forces an update
// here at compile time.

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repetition::Required => f.write_str("required"),
            Repetition::Optional => f.write_str("optional"),
            Repetition::Repeated => f.write_str("repeated"),
        }
    }
}

impl fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalType::Binary => f.write_str("binary"),
            PhysicalType::Float => f.write_str("float"),
            PhysicalType::Double => f.write_str("double"),
            PhysicalType::Boolean => f.write_str("boolean"),
            PhysicalType::Int32 => f.write_str("int32"),
            PhysicalType::Int64 => f.write_str("int64"),
            PhysicalType::Int96 => f.write_str("int96"),
            PhysicalType::FixedLenByteArray(len) => write!(f, "fixed_len_byte_array({len})"),
        }
    }
}

impl fmt::Display for ConvertedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConvertedType::Utf8 => "UTF8",
            ConvertedType::Map => "MAP",
            ConvertedType::MapKeyValue => "MAP_KEY_VALUE",
            ConvertedType::List => "LIST",
            ConvertedType::Enum => "ENUM",
            ConvertedType::Decimal => "DECIMAL",
            ConvertedType::Date => "DATE",
            ConvertedType::TimeMillis => "TIME_MILLIS",
            ConvertedType::TimeMicros => "TIME_MICROS",
            ConvertedType::TimestampMillis => "TIMESTAMP_MILLIS",
            ConvertedType::TimestampMicros => "TIMESTAMP_MICROS",
            ConvertedType::Uint8 => "UINT_8",
            ConvertedType::Uint16 => "UINT_16",
            ConvertedType::Uint32 => "UINT_32",
            ConvertedType::Uint64 => "UINT_64",
            ConvertedType::Int8 => "INT_8",
            ConvertedType::Int16 => "INT_16",
            ConvertedType::Int32 => "INT_32",
            ConvertedType::Int64 => "INT_64",
            ConvertedType::Json => "JSON",
            ConvertedType::Bson => "BSON",
            ConvertedType::Interval => "INTERVAL",
        };
        f.write_str(s)
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Millis => f.write_str("MILLIS"),
            TimeUnit::Micros => f.write_str("MICROS"),
            TimeUnit::Nanos => f.write_str("NANOS"),
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::String => f.write_str("STRING"),
            LogicalType::Date => f.write_str("DATE"),
            LogicalType::Timestamp {
                unit,
                is_adjusted_to_utc,
            } => write!(f, "TIMESTAMP({unit}, {is_adjusted_to_utc})"),
            LogicalType::Uuid => f.write_str("UUID"),
            LogicalType::Enum => f.write_str("ENUM"),
            LogicalType::Json => f.write_str("JSON"),
        }
    }
}
