#![allow(dead_code)]

use schema_graphql_bridge::{FieldSelector, FlatSchema, SchemaBridge, SchemaSource};
use serde_json::Value as JsonValue;

/// Route `log` output through the test harness; safe to call from every test.
pub fn init_logging()
{
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a schema from a JSON document, panicking on invalid fixtures.
pub fn fixture(document: JsonValue) -> FlatSchema
{
    init_logging();
    FlatSchema::from_json_value(document).expect("Invalid test schema")
}

/// Generate a wrapped SDL document with the default bridge.
pub fn sdl(schema: &impl SchemaSource, name: &str, selector: &FieldSelector) -> String
{
    sdl_with(&SchemaBridge::default(), schema, name, selector)
}

pub fn sdl_with(bridge: &SchemaBridge, schema: &impl SchemaSource, name: &str, selector: &FieldSelector) -> String
{
    bridge
        .schema(schema, name, selector)
        .expect("Schema generation failed")
        .as_document()
        .expect("Expected a wrapped document")
        .to_string()
}

/// Every composite type referenced from a field line, i.e. type expressions
/// starting with `base` other than `base` itself.
pub fn referenced_types(sdl: &str, base: &str) -> Vec<String>
{
    sdl.lines()
        .filter_map(|line| line.trim().split_once(": "))
        .map(|(_, type_expr)| type_expr.trim_matches(|c| c == '[' || c == ']' || c == '!').to_string())
        .filter(|type_name| type_name.starts_with(base) && type_name != base)
        .collect()
}

/// Names of every `type X {` or bare `type X` declaration, in order.
pub fn declared_types(sdl: &str) -> Vec<String>
{
    sdl.lines()
        .filter_map(|line| line.strip_prefix("type "))
        .map(|rest| rest.strip_suffix(" {").unwrap_or(rest).to_string())
        .collect()
}
