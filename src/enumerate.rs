use std::collections::HashSet;

use crate::errors::BridgeError;
use crate::types::{BaseType, FieldSelector, ObjectKey, SchemaSource};

/// Keys selected for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSet
{
    /// Top-level keys, in schema order.
    pub keys: Vec<String>,
    /// Nested object keys whose owning top-level key was selected.
    pub object_keys: Vec<ObjectKey>,
}

/// Applies `selector` to the top-level and nested object keys of `schema`.
///
/// With `exclude_objects`, top-level keys of type `Object` are left out of
/// [`FieldSet::keys`]. Nested keys follow their top-level owner: listing
/// `profile` selects `profile.address` too, listing `profile.address` alone
/// selects nothing.
pub fn enumerate_fields<S>(schema: &S, selector: &FieldSelector, exclude_objects: bool) -> Result<FieldSet, BridgeError>
where
    S: SchemaSource + ?Sized,
{
    let mut keys = Vec::new();
    for key in schema.first_level_keys() {
        if exclude_objects && schema.descriptor(key)?.base_type == BaseType::Object {
            continue;
        }
        if selector.allows(key) {
            keys.push(key.clone());
        }
    }

    let mut seen = HashSet::new();
    let object_keys = schema
        .object_keys()
        .iter()
        .filter(|object_key| selector.allows(object_key.root()))
        .filter(|object_key| seen.insert(object_key.path().to_string()))
        .cloned()
        .collect();

    Ok(FieldSet { keys, object_keys })
}
