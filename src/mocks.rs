//! Placeholder values for a GraphQL mocking harness.
//!
//! Mocks are flat: only top-level scalar fields are covered, nested object
//! types get no producer.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{json, Map, Value as JsonValue};

use crate::enumerate::enumerate_fields;
use crate::errors::BridgeError;
use crate::scalar::{KnownPatterns, ScalarKind};
use crate::types::{FieldSelector, SchemaSource};

/// Zero-argument producer of a mock value.
pub type MockProducer = Arc<dyn Fn() -> JsonValue + Send + Sync>;

/// Mock producers by GraphQL type name.
pub type MockMap = BTreeMap<String, MockProducer>;

/// Fixed producers keyed by GraphQL scalar name, supplied at construction.
#[derive(Clone)]
pub struct MockTable
{
    producers: BTreeMap<String, MockProducer>,
}

impl Default for MockTable
{
    fn default() -> Self
    {
        Self::empty()
            .with("String", || json!("It works!"))
            .with("Int", || json!(6))
            .with("Float", || json!(6.2))
            .with("Boolean", || json!(true))
            .with(ScalarKind::Date.graphql_name(), || json!("2017-01-01T00:00:00Z"))
            .with(ScalarKind::Identifier.graphql_name(), || json!("aBcDeFgHiJkMnPqRs"))
            .with(ScalarKind::Email.graphql_name(), || json!("user@example.com"))
            .with(ScalarKind::Username.graphql_name(), || json!("username"))
    }
}

impl fmt::Debug for MockTable
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("MockTable")
            .field("scalars", &self.producers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MockTable
{
    pub fn empty() -> Self
    {
        Self {
            producers: BTreeMap::new(),
        }
    }

    /// Adds or replaces the producer for `scalar`.
    pub fn with<F>(mut self, scalar: impl Into<String>, producer: F) -> Self
    where
        F: Fn() -> JsonValue + Send + Sync + 'static,
    {
        self.producers.insert(scalar.into(), Arc::new(producer));
        self
    }

    pub fn get(&self, scalar: &str) -> Option<&MockProducer>
    {
        self.producers.get(scalar)
    }
}

pub(crate) fn generate_mocks<S>(
    schema: &S,
    name: Option<&str>,
    selector: &FieldSelector,
    patterns: &KnownPatterns,
    table: &MockTable,
) -> Result<MockMap, BridgeError>
where
    S: SchemaSource + ?Sized,
{
    let fields = enumerate_fields(schema, selector, false)?;
    let mut mocks = MockMap::new();
    let mut per_field: Vec<(String, MockProducer)> = Vec::new();

    for key in &fields.keys {
        let descriptor = schema.descriptor(key)?;
        let Some(scalar) = patterns.classify(descriptor).map(ScalarKind::graphql_name) else {
            continue;
        };
        let Some(producer) = table.get(scalar) else {
            log::debug!("no mock producer for scalar {scalar} (field '{key}')");
            continue;
        };
        mocks.insert(scalar.to_string(), Arc::clone(producer));
        per_field.push((key.clone(), Arc::clone(producer)));
    }

    if let Some(name) = name {
        let composite: MockProducer = Arc::new(move || {
            let object: Map<String, JsonValue> = per_field
                .iter()
                .map(|(key, producer)| (key.clone(), producer()))
                .collect();
            JsonValue::Object(object)
        });
        mocks.insert(name.to_string(), composite);
    }

    Ok(mocks)
}
