//! Tests for the schema parser.
//!
//! Covers: the grammar production by production, keyword contextuality,
//! annotation placement, field ids, declaration-order preservation, and the
//! fail-whole error policy with positions.

use schemadef_core::{
    Column, ColumnKind, ConvertedType, LogicalType, PhysicalType, Repetition, SchemaDefinition,
    SchemaError, SchemaParseError, TimeUnit, parse_schema_definition,
};

fn parse_ok(input: &str) -> SchemaDefinition {
    parse_schema_definition(input)
        .unwrap_or_else(|e| panic!("expected {input:?} to parse, got: {e}"))
}

fn parse_err(input: &str) -> SchemaParseError {
    match parse_schema_definition(input) {
        Ok(_) => panic!("expected {input:?} to fail"),
        Err(SchemaError::Parse(e)) => e,
        Err(SchemaError::Lex(e)) => panic!("expected a parse error for {input:?}, got lex: {e}"),
    }
}

// ── Basic structure ─────────────────────────────────────────────────────

#[test]
fn minimal_message() {
    let sd = parse_ok("message m { required int32 a; }");
    assert_eq!(sd.name(), "m");
    assert!(sd.root().is_group());
    assert_eq!(sd.root().repetition, None);
    assert_eq!(sd.root().children().len(), 1);

    let a = &sd.root().children()[0];
    assert_eq!(a.name, "a");
    assert_eq!(a.repetition, Some(Repetition::Required));
    assert_eq!(a.kind, ColumnKind::Leaf(PhysicalType::Int32));
    assert_eq!(a.converted_type, None);
    assert_eq!(a.logical_type, None);
    assert_eq!(a.field_id, None);
}

#[test]
fn empty_message_body() {
    let sd = parse_ok("message m {}");
    assert!(sd.root().children().is_empty());
}

#[test]
fn group_with_converted_type() {
    let sd = parse_ok("message m { optional group g (LIST) { repeated binary item; } }");
    let g = sd.sub_schema("g").expect("group g");
    assert_eq!(g.repetition, Some(Repetition::Optional));
    assert_eq!(g.converted_type, Some(ConvertedType::List));
    assert!(g.is_group());

    let item = g.child("item").expect("leaf item");
    assert_eq!(item.repetition, Some(Repetition::Repeated));
    assert_eq!(item.physical_type(), Some(PhysicalType::Binary));
}

#[test]
fn zero_child_group_is_legal() {
    let sd = parse_ok("message m { optional group g { } }");
    let g = sd.sub_schema("g").expect("group g");
    assert!(g.is_group());
    assert!(g.children().is_empty());
}

#[test]
fn fixed_len_byte_array_keeps_its_length() {
    let sd = parse_ok("message m { required fixed_len_byte_array(16) id; }");
    let id = sd.sub_schema("id").expect("leaf id");
    assert_eq!(id.physical_type(), Some(PhysicalType::FixedLenByteArray(16)));
}

#[test]
fn timestamp_logical_type_and_field_id() {
    let sd = parse_ok("message m { optional int64 ts (TIMESTAMP(MICROS, true)) = 5; }");
    let ts = sd.sub_schema("ts").expect("leaf ts");
    assert_eq!(ts.physical_type(), Some(PhysicalType::Int64));
    assert_eq!(
        ts.logical_type,
        Some(LogicalType::Timestamp {
            unit: TimeUnit::Micros,
            is_adjusted_to_utc: true,
        })
    );
    assert_eq!(ts.field_id, Some(5));
}

#[test]
fn field_id_zero_is_distinct_from_absent() {
    let sd = parse_ok("message m { required int32 a = 0; required int32 b; }");
    assert_eq!(sd.sub_schema("a").expect("a").field_id, Some(0));
    assert_eq!(sd.sub_schema("b").expect("b").field_id, None);
}

#[test]
fn all_primitive_types_parse() {
    let sd = parse_ok(
        "message m {
           required binary a;
           required float b;
           required double c;
           required boolean d;
           required int32 e;
           required int64 f;
           required int96 g;
           required fixed_len_byte_array(3) h;
         }",
    );
    let types: Vec<_> = sd
        .root()
        .children()
        .iter()
        .map(|c| c.physical_type().expect("leaf"))
        .collect();
    assert_eq!(types, vec![
        PhysicalType::Binary,
        PhysicalType::Float,
        PhysicalType::Double,
        PhysicalType::Boolean,
        PhysicalType::Int32,
        PhysicalType::Int64,
        PhysicalType::Int96,
        PhysicalType::FixedLenByteArray(3),
    ]);
}

#[test]
fn every_converted_type_spelling_is_accepted_on_groups() {
    let spellings = [
        "UTF8",
        "MAP",
        "MAP_KEY_VALUE",
        "LIST",
        "ENUM",
        "DECIMAL",
        "DATE",
        "TIME_MILLIS",
        "TIME_MICROS",
        "TIMESTAMP_MILLIS",
        "TIMESTAMP_MICROS",
        "UINT_8",
        "UINT_16",
        "UINT_32",
        "UINT_64",
        "INT_8",
        "INT_16",
        "INT_32",
        "INT_64",
        "JSON",
        "BSON",
        "INTERVAL",
    ];
    for spelling in spellings {
        let sd = parse_ok(&format!("message m {{ optional group g ({spelling}) {{ }} }}"));
        let annotation = sd
            .sub_schema("g")
            .and_then(|g| g.converted_type)
            .unwrap_or_else(|| panic!("no converted type parsed for {spelling}"));
        // Display is the canonical spelling table, so this also pins the
        // render side of the pair.
        assert_eq!(annotation.to_string(), spelling);
    }
}

#[test]
fn every_parameterless_logical_type_is_accepted_on_fields() {
    for spelling in ["STRING", "DATE", "UUID", "ENUM", "JSON"] {
        let sd = parse_ok(&format!("message m {{ optional binary v ({spelling}); }}"));
        let annotation = sd
            .sub_schema("v")
            .and_then(|v| v.logical_type)
            .unwrap_or_else(|| panic!("no logical type parsed for {spelling}"));
        assert_eq!(annotation.to_string(), spelling);
    }
}

#[test]
fn timestamp_units_and_flags() {
    for (unit_text, unit) in [
        ("MILLIS", TimeUnit::Millis),
        ("MICROS", TimeUnit::Micros),
        ("NANOS", TimeUnit::Nanos),
    ] {
        for flag in [true, false] {
            let sd = parse_ok(&format!(
                "message m {{ required int64 ts (TIMESTAMP({unit_text}, {flag})); }}"
            ));
            assert_eq!(
                sd.sub_schema("ts").and_then(|c| c.logical_type),
                Some(LogicalType::Timestamp {
                    unit,
                    is_adjusted_to_utc: flag,
                })
            );
        }
    }
}

// ── Contextual keywords ─────────────────────────────────────────────────

#[test]
fn keywords_are_valid_identifiers_outside_keyword_position() {
    let sd = parse_ok("message message { required int32 group; required int32 required; }");
    assert_eq!(sd.name(), "message");
    assert!(sd.sub_schema("group").is_some());
    assert!(sd.sub_schema("required").is_some());
}

#[test]
fn group_named_group() {
    let sd = parse_ok("message m { required group group { required int32 a; } }");
    let g = sd.sub_schema("group").expect("group named group");
    assert!(g.is_group());
    assert_eq!(g.children().len(), 1);
}

// ── Order and duplicates ────────────────────────────────────────────────

#[test]
fn declaration_order_is_child_order() {
    let sd = parse_ok("message m { required int32 z; required int32 a; required int32 q; }");
    let names: Vec<_> = sd.root().children().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["z", "a", "q"]);
}

#[test]
fn duplicate_sibling_names_are_accepted_and_first_wins_on_lookup() {
    let sd = parse_ok("message m { required int32 a; optional binary a; }");
    assert_eq!(sd.root().children().len(), 2);
    let first = sd.sub_schema("a").expect("first a");
    assert_eq!(first.physical_type(), Some(PhysicalType::Int32));
}

#[test]
fn leaf_group_exclusivity_holds_for_every_parsed_column() {
    fn check(col: &Column) {
        match &col.kind {
            ColumnKind::Leaf(_) => {
                assert!(col.physical_type().is_some());
                assert!(col.children().is_empty());
            }
            ColumnKind::Group(_) => {
                assert!(col.physical_type().is_none());
            }
        }
        for child in col.children() {
            assert!(child.repetition.is_some(), "non-root without repetition");
            check(child);
        }
    }
    let sd = parse_ok(
        "message m {
           required int32 a;
           optional group g (LIST) {
             repeated group list {
               required binary element (STRING);
             }
           }
           optional group empty { }
         }",
    );
    check(sd.root());
}

// ── Errors ──────────────────────────────────────────────────────────────

#[test]
fn missing_repetition_fails_at_the_type_token() {
    let err = parse_err("message m { int32 a; }");
    assert!(err.expected.contains("repetition"), "expected: {}", err.expected);
    assert_eq!(err.found, "'int32'");
    assert_eq!(err.span.start, 12);
}

#[test]
fn unknown_repetition_keyword_fails() {
    let err = parse_err("message m { mandatory int32 a; }");
    assert!(err.expected.contains("repetition"));
    assert_eq!(err.found, "'mandatory'");
}

#[test]
fn missing_message_keyword_fails_at_the_start() {
    let err = parse_err("schema m { }");
    assert_eq!(err.expected, "'message'");
    assert_eq!(err.found, "'schema'");
    assert_eq!(err.span.start, 0);
}

#[test]
fn missing_semicolon_fails() {
    let err = parse_err("message m { required int32 a }");
    assert_eq!(err.expected, "';'");
    assert_eq!(err.found, "'}'");
}

#[test]
fn unknown_type_name_fails() {
    let err = parse_err("message m { required int128 a; }");
    assert_eq!(err.expected, "type name or 'group'");
    assert_eq!(err.found, "'int128'");
}

#[test]
fn converted_type_is_rejected_in_field_annotation_position() {
    // Field annotations are logical types; UTF8 is only valid on groups'
    // converted-type slot per the grammar.
    let err = parse_err("message m { optional binary c (UTF8); }");
    assert_eq!(err.expected, "logical type name");
    assert_eq!(err.found, "'UTF8'");
}

#[test]
fn logical_type_is_rejected_in_group_annotation_position() {
    let err = parse_err("message m { optional group g (STRING) { } }");
    assert_eq!(err.expected, "converted type name");
    assert_eq!(err.found, "'STRING'");
}

#[test]
fn timestamp_requires_its_parameter_list() {
    let err = parse_err("message m { required int64 ts (TIMESTAMP); }");
    assert_eq!(err.expected, "'('");
    assert_eq!(err.found, "')'");
}

#[test]
fn timestamp_rejects_unknown_unit() {
    let err = parse_err("message m { required int64 ts (TIMESTAMP(SECONDS, true)); }");
    assert!(err.expected.contains("time unit"));
    assert_eq!(err.found, "'SECONDS'");
}

#[test]
fn timestamp_rejects_non_boolean_flag() {
    let err = parse_err("message m { required int64 ts (TIMESTAMP(MILLIS, yes)); }");
    assert_eq!(err.expected, "'true' or 'false'");
    assert_eq!(err.found, "'yes'");
}

#[test]
fn fixed_len_byte_array_rejects_zero_length() {
    let err = parse_err("message m { required fixed_len_byte_array(0) id; }");
    assert_eq!(err.expected, "positive fixed_len_byte_array length");
    assert_eq!(err.found, "'0'");
}

#[test]
fn out_of_range_numeral_fails() {
    let err = parse_err("message m { required fixed_len_byte_array(99999999999) id; }");
    assert_eq!(err.found, "out-of-range numeral '99999999999'");
}

#[test]
fn unterminated_body_fails_at_end_of_input() {
    let input = "message m { required int32 a;";
    let err = parse_err(input);
    assert_eq!(err.expected, "'}'");
    assert_eq!(err.found, "end of input");
    assert_eq!(err.span.start, input.len());
}

#[test]
fn trailing_tokens_after_message_fail() {
    let err = parse_err("message m { } trailing");
    assert_eq!(err.expected, "end of input");
    assert_eq!(err.found, "'trailing'");
}

#[test]
fn lex_failures_surface_through_the_parse_facade() {
    match parse_schema_definition("message m { required int32 a@; }") {
        Err(SchemaError::Lex(e)) => assert_eq!(e.ch, '@'),
        other => panic!("expected lex error, got {other:?}"),
    }
}

#[test]
fn parse_error_display_reads_naturally() {
    let err = parse_err("message m { int32 a; }");
    assert_eq!(
        err.to_string(),
        "expected repetition keyword (required, optional or repeated), found 'int32' at offset 12"
    );
}

#[test]
fn schema_definition_parse_is_an_alias_for_the_facade() {
    let a = SchemaDefinition::parse("message m { required int32 a; }").expect("parse");
    let b = parse_schema_definition("message m { required int32 a; }").expect("parse");
    assert_eq!(a, b);
}
