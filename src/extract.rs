//! Flat schema documents: a JSON object mapping dotted keys to descriptors.
//!
//! ```json
//! {
//!   "name":         { "type": "String" },
//!   "tags":         { "type": "Array", "optional": true },
//!   "tags.$":       "String",
//!   "profile":      { "type": "Object" },
//!   "profile.bio":  { "type": "String", "regEx": "^[^@]*$" }
//! }
//! ```
//!
//! Key order is significant and preserved. A parent key must be declared
//! before its children.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::errors::BridgeError;
use crate::types::{BaseType, FieldDescriptor, ObjectKey, SchemaSource};

// ---------------------------------------------------------------------------
// Deserialization types for schema documents
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldOutput
{
    Shorthand(BaseType),
    Full(FullFieldOutput),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FullFieldOutput
{
    #[serde(rename = "type")]
    type_: BaseType,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    blackbox: bool,
    #[serde(default, rename = "regEx", alias = "pattern")]
    pattern: Option<String>,
}

impl From<FieldOutput> for FieldDescriptor
{
    fn from(output: FieldOutput) -> Self
    {
        match output {
            FieldOutput::Shorthand(base_type) => FieldDescriptor::new(base_type),
            FieldOutput::Full(full) => FieldDescriptor {
                base_type: full.type_,
                optional: full.optional,
                blackbox: full.blackbox,
                pattern: full.pattern,
                element_type: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// FlatSchema
// ---------------------------------------------------------------------------

/// In-memory [`SchemaSource`] built from an ordered list of dotted keys.
#[derive(Debug, Clone, Default)]
pub struct FlatSchema
{
    first_level_keys: Vec<String>,
    fields: HashMap<String, FieldDescriptor>,
    object_keys: Vec<ObjectKey>,
    children: HashMap<ObjectKey, Vec<String>>,
}

impl FlatSchema
{
    /// Builds the schema from `(key, descriptor)` pairs in declaration order.
    ///
    /// `key.$` entries describe array elements and set the element type of
    /// `key`; every other dotted key is registered as a child of its parent.
    pub fn from_fields<I, K>(fields: I) -> Result<Self, BridgeError>
    where
        I: IntoIterator<Item = (K, FieldDescriptor)>,
        K: Into<String>,
    {
        let mut schema = Self::default();
        for (key, descriptor) in fields {
            schema.insert(key.into(), descriptor)?;
        }
        Ok(schema)
    }

    pub fn from_json_value(document: JsonValue) -> Result<Self, BridgeError>
    {
        let JsonValue::Object(entries) = document else {
            return Err(BridgeError::InvalidSchema {
                context: "root".to_string(),
                details: "Schema document must be a JSON object".to_string(),
            });
        };

        let mut schema = Self::default();
        for (key, value) in entries {
            let output: FieldOutput = serde_json::from_value(value).map_err(|e| BridgeError::InvalidSchema {
                context: key.clone(),
                details: e.to_string(),
            })?;
            schema.insert(key, output.into())?;
        }
        Ok(schema)
    }

    pub fn from_json_str(document: &str) -> Result<Self, BridgeError>
    {
        Self::from_json_value(serde_json::from_str(document)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BridgeError>
    {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BridgeError::MissingSchemaFile);
        }

        let document = fs::read_to_string(path).map_err(|e| BridgeError::IOError {
            file: path.display().to_string(),
            error: e,
        })?;
        Self::from_json_str(&document)
    }

    fn insert(&mut self, key: String, mut descriptor: FieldDescriptor) -> Result<(), BridgeError>
    {
        if key.split('.').any(str::is_empty) || key == "$" {
            return Err(invalid(&key, "Key has an empty or misplaced path segment"));
        }
        if self.fields.contains_key(&key) {
            return Err(invalid(&key, "Key is declared twice"));
        }
        if let Some(pattern) = &descriptor.pattern {
            Regex::new(pattern).map_err(|e| BridgeError::InvalidPattern {
                key: key.clone(),
                details: e.to_string(),
            })?;
        }
        if descriptor.base_type != BaseType::Array {
            descriptor.element_type = None;
        }

        match key.rsplit_once('.') {
            None => self.first_level_keys.push(key.clone()),
            Some((parent, "$")) => {
                let array = self
                    .fields
                    .get_mut(parent)
                    .ok_or_else(|| invalid(&key, format!("Parent '{}' is not declared", parent)))?;
                if array.base_type != BaseType::Array {
                    return Err(invalid(&key, format!("Parent '{}' is not an Array", parent)));
                }
                array.element_type = Some(descriptor.base_type);
            }
            Some((parent, child)) => {
                let parent_descriptor = self
                    .fields
                    .get(parent)
                    .ok_or_else(|| invalid(&key, format!("Parent '{}' is not declared", parent)))?;
                if parent_descriptor.base_type != BaseType::Object {
                    return Err(invalid(&key, format!("Parent '{}' is not an Object", parent)));
                }

                let object_key = match parent.strip_suffix(".$") {
                    Some(array_path) => ObjectKey::array_of(array_path),
                    None => ObjectKey::object(parent),
                };
                if !self.children.contains_key(&object_key) {
                    self.object_keys.push(object_key.clone());
                }
                self.children.entry(object_key).or_default().push(child.to_string());
            }
        }

        self.fields.insert(key, descriptor);
        Ok(())
    }
}

fn invalid(key: &str, details: impl Into<String>) -> BridgeError
{
    BridgeError::InvalidSchema {
        context: key.to_string(),
        details: details.into(),
    }
}

impl SchemaSource for FlatSchema
{
    fn first_level_keys(&self) -> &[String]
    {
        &self.first_level_keys
    }

    fn field(&self, key: &str) -> Option<&FieldDescriptor>
    {
        self.fields.get(key)
    }

    fn object_keys(&self) -> &[ObjectKey]
    {
        &self.object_keys
    }

    fn children(&self, key: &ObjectKey) -> Option<&[String]>
    {
        self.children.get(key).map(Vec::as_slice)
    }
}
