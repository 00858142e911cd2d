use super::column::SchemaDefinition;

/// Serialize a schema tree to a pretty-printed JSON string.
pub fn to_pretty_json(schema: &SchemaDefinition) -> String {
    serde_json::to_string_pretty(schema).expect("SchemaDefinition serialization cannot fail")
}
