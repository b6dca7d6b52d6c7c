//! Field accessors mirroring the generated types.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::enumerate::enumerate_fields;
use crate::errors::BridgeError;
use crate::naming::aliased_name;
use crate::types::{FieldSelector, SchemaSource};
use crate::BridgeConfig;

/// Reads one field off the parent value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResolver
{
    field: String,
}

impl FieldResolver
{
    pub fn new(field: impl Into<String>) -> Self
    {
        Self { field: field.into() }
    }

    /// Name of the property this resolver reads.
    pub fn field(&self) -> &str
    {
        &self.field
    }

    /// `root[field]`, `None` when `root` is not an object or lacks the field.
    pub fn resolve<'v>(&self, root: &'v JsonValue) -> Option<&'v JsonValue>
    {
        root.get(&self.field)
    }
}

/// Field resolvers by field name.
pub type TypeResolvers = BTreeMap<String, FieldResolver>;

/// Field resolvers by GraphQL type name.
pub type ResolverMap = BTreeMap<String, TypeResolvers>;

pub(crate) fn generate_resolvers<S>(
    schema: &S,
    name: &str,
    selector: &FieldSelector,
    config: &BridgeConfig,
) -> Result<ResolverMap, BridgeError>
where
    S: SchemaSource + ?Sized,
{
    let fields = enumerate_fields(schema, selector, true)?;
    let prefix = selector.interface_prefix.as_deref();

    let mut resolvers = ResolverMap::new();
    let root = resolvers.entry(name.to_string()).or_default();
    for key in &fields.keys {
        root.insert(key.clone(), FieldResolver::new(key.as_str()));
    }

    for object_key in &fields.object_keys {
        let children = schema
            .children(object_key)
            .ok_or_else(|| BridgeError::MissingObjectKeys(object_key.path().to_string()))?;
        if children.is_empty() {
            continue;
        }

        let parent_type = match object_key.parent() {
            Some(parent) => aliased_name(parent, name, prefix, &config.rename_rules),
            None => name.to_string(),
        };
        let leaf = object_key.leaf();
        resolvers
            .entry(parent_type)
            .or_default()
            .insert(leaf.to_string(), FieldResolver::new(leaf));

        let table = resolvers
            .entry(aliased_name(object_key.path(), name, prefix, &config.rename_rules))
            .or_default();
        for child in children {
            table.insert(child.clone(), FieldResolver::new(child.as_str()));
        }
    }

    log::debug!("built resolvers for {} type(s) under {}", resolvers.len(), name);
    Ok(resolvers)
}
