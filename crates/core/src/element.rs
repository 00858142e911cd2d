//! Schema element records: the storage format's native metadata shape.
//!
//! A [`SchemaElement`] is the flat, all-optional record the storage format
//! keeps per schema node. Every column converts to one losslessly via
//! [`Column::element`]; [`SchemaElement::to_column`] goes the other way when
//! rebuilding a tree from format metadata.

use serde::{Deserialize, Serialize};

use crate::schema::column::{
    Column, ColumnKind, ConvertedType, LogicalType, PhysicalType, Repetition,
};

/// Physical type tag as recorded in format metadata.
///
/// Unlike [`PhysicalType`], the fixed-width length is not part of the tag;
/// it lives in [`SchemaElement::type_length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementType {
    /// Single-bit boolean.
    Boolean,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 96-bit integer.
    Int96,
    /// 32-bit IEEE 754 floating point.
    Float,
    /// 64-bit IEEE 754 floating point.
    Double,
    /// Variable-length byte array.
    ByteArray,
    /// Fixed-width byte array; length carried in `type_length`.
    FixedLenByteArray,
}

/// One schema node in the storage format's metadata representation.
///
/// `element_type.is_some()` distinguishes leaves from groups: leaves carry a
/// physical type tag and no `num_children`, groups the reverse. `None`
/// fields are omitted from serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaElement {
    /// Column name.
    pub name: String,
    /// Physical type tag; present exactly for leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_type: Option<ElementType>,
    /// Byte length of a fixed-width leaf; present exactly for
    /// [`ElementType::FixedLenByteArray`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_length: Option<i32>,
    /// Repetition of the column; absent on the document root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetition_type: Option<Repetition>,
    /// Number of direct children; present exactly for groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_children: Option<i32>,
    /// Legacy semantic annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_type: Option<ConvertedType>,
    /// Modern semantic annotation, with its own sub-fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_type: Option<LogicalType>,
    /// Optional external field identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<i32>,
}

/// Failure modes of [`SchemaElement::to_column`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    /// The element declares a physical type (a leaf) but was handed children.
    #[error("schema element '{name}' declares a physical type but was given children")]
    LeafWithChildren {
        /// Name of the offending element.
        name: String,
    },
    /// A fixed-width element without a positive `type_length`.
    #[error("fixed_len_byte_array element '{name}' needs a positive type length, got {type_length:?}")]
    InvalidTypeLength {
        /// Name of the offending element.
        name: String,
        /// The length that was present, if any.
        type_length: Option<i32>,
    },
}

impl Column {
    /// The metadata record equivalent of this node. Total: every column has
    /// one.
    pub fn element(&self) -> SchemaElement {
        let (element_type, type_length, num_children) = match &self.kind {
            ColumnKind::Leaf(physical) => {
                let (tag, len) = match *physical {
                    PhysicalType::Binary => (ElementType::ByteArray, None),
                    PhysicalType::Float => (ElementType::Float, None),
                    PhysicalType::Double => (ElementType::Double, None),
                    PhysicalType::Boolean => (ElementType::Boolean, None),
                    PhysicalType::Int32 => (ElementType::Int32, None),
                    PhysicalType::Int64 => (ElementType::Int64, None),
                    PhysicalType::Int96 => (ElementType::Int96, None),
                    PhysicalType::FixedLenByteArray(len) => {
                        (ElementType::FixedLenByteArray, Some(len))
                    }
                };
                (Some(tag), len, None)
            }
            ColumnKind::Group(children) => (None, None, Some(children.len() as i32)),
        };

        SchemaElement {
            name: self.name.clone(),
            element_type,
            type_length,
            repetition_type: self.repetition,
            num_children,
            converted_type: self.converted_type,
            logical_type: self.logical_type,
            field_id: self.field_id,
        }
    }
}

impl SchemaElement {
    /// Rebuild a column from this record, attaching the given children.
    ///
    /// Groups (no `element_type`) take ownership of `children`; leaves must
    /// be handed an empty vector. `num_children` is not consulted — the
    /// actual children determine the group's arity.
    pub fn to_column(&self, children: Vec<Column>) -> Result<Column, ElementError> {
        let kind = match self.element_type {
            Some(tag) => {
                if !children.is_empty() {
                    return Err(ElementError::LeafWithChildren {
                        name: self.name.clone(),
                    });
                }
                let physical = match tag {
                    ElementType::Boolean => PhysicalType::Boolean,
                    ElementType::Int32 => PhysicalType::Int32,
                    ElementType::Int64 => PhysicalType::Int64,
                    ElementType::Int96 => PhysicalType::Int96,
                    ElementType::Float => PhysicalType::Float,
                    ElementType::Double => PhysicalType::Double,
                    ElementType::ByteArray => PhysicalType::Binary,
                    ElementType::FixedLenByteArray => match self.type_length {
                        Some(len) if len > 0 => PhysicalType::FixedLenByteArray(len),
                        other => {
                            return Err(ElementError::InvalidTypeLength {
                                name: self.name.clone(),
                                type_length: other,
                            });
                        }
                    },
                };
                ColumnKind::Leaf(physical)
            }
            None => ColumnKind::Group(children),
        };

        Ok(Column {
            name: self.name.clone(),
            repetition: self.repetition_type,
            kind,
            converted_type: self.converted_type,
            logical_type: self.logical_type,
            field_id: self.field_id,
        })
    }
}
