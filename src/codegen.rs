//! GraphQL SDL generation.
//!
//! Top-level keys become the fields of the root type. Every nested object
//! key with at least one representable child becomes its own `type`,
//! collected depth-first into one list of declarations that precedes the
//! root type. A root type without fields is written as a bare `type <Name>`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::enumerate::enumerate_fields;
use crate::errors::BridgeError;
use crate::naming::{aliased_name, composite_name, resolve_alias};
use crate::scalar::ScalarKind;
use crate::types::{
    leaf_segment, BaseType, FieldDescriptor, FieldSelector, GeneratedArtifact, ObjectKey, SchemaFragments, SchemaSource,
};
use crate::BridgeConfig;

/// Why a field was left out of the generated SDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmissionReason
{
    /// An object that is not a blackbox and has no child with a GraphQL representation.
    ShapelessObject,
    /// An array whose elements are neither a scalar nor an object with representable children.
    ShapelessArray,
}

impl fmt::Display for OmissionReason
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Self::ShapelessObject => write!(f, "object without representable children that is not a blackbox"),
            Self::ShapelessArray => write!(f, "array without a scalar or representable object element type"),
        }
    }
}

/// A field that produced no output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Omission
{
    pub key: String,
    pub reason: OmissionReason,
}

/// Generated SDL together with every field that was dropped on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport
{
    pub artifact: GeneratedArtifact,
    pub omissions: Vec<Omission>,
}

pub(crate) fn generate_schema<S>(
    schema: &S,
    name: &str,
    selector: &FieldSelector,
    config: &BridgeConfig,
) -> Result<SchemaReport, BridgeError>
where
    S: SchemaSource + ?Sized,
{
    let fields = enumerate_fields(schema, selector, false)?;
    let mut writer = TypeWriter::new(schema, name, selector, config);

    let mut lines = Vec::with_capacity(fields.keys.len() + 1);
    if let Some(id_field) = &config.id_field {
        if !fields.keys.contains(id_field) {
            lines.push(format!("{}: {}!", id_field, ScalarKind::Identifier.graphql_name()));
        }
    }
    for key in &fields.keys {
        if let Some(line) = writer.map_field(key)? {
            lines.push(line);
        }
    }

    for object_key in &fields.object_keys {
        writer.synthesize(object_key)?;
    }

    let field_body = render_body(&lines);
    let nested_type_declarations = writer.declarations.join("\n\n");
    log::debug!(
        "generated {} field(s) and {} nested type(s) for {}",
        lines.len(),
        writer.declarations.len(),
        name
    );

    let fragments = SchemaFragments {
        nested_type_declarations,
        field_body,
    };
    let artifact = if selector.wrap {
        GeneratedArtifact::Document(fragments.into_document(name))
    } else {
        GeneratedArtifact::Fragments(fragments)
    };

    Ok(SchemaReport {
        artifact,
        omissions: writer.omissions,
    })
}

impl SchemaFragments
{
    /// Wraps the field body in `type <name>`, after the nested declarations.
    pub fn into_document(self, name: &str) -> String
    {
        let root = render_type(name, &self.field_body);
        if self.nested_type_declarations.is_empty() {
            format!("{root}\n")
        } else {
            format!("{}\n\n{root}\n", self.nested_type_declarations)
        }
    }
}

impl GeneratedArtifact
{
    /// The complete document, wrapping fragments in `type <name>` if needed.
    pub fn into_document(self, name: &str) -> String
    {
        match self {
            Self::Document(sdl) => sdl,
            Self::Fragments(fragments) => fragments.into_document(name),
        }
    }
}

struct TypeWriter<'a, S: ?Sized>
{
    schema: &'a S,
    base_name: &'a str,
    selector: &'a FieldSelector,
    config: &'a BridgeConfig,
    /// Object key paths already synthesized
    visited: HashSet<String>,
    /// Whether an object key yields at least one field line
    shapes: HashMap<ObjectKey, bool>,
    declarations: Vec<String>,
    omissions: Vec<Omission>,
}

impl<'a, S> TypeWriter<'a, S>
where
    S: SchemaSource + ?Sized,
{
    fn new(schema: &'a S, base_name: &'a str, selector: &'a FieldSelector, config: &'a BridgeConfig) -> Self
    {
        Self {
            schema,
            base_name,
            selector,
            config,
            visited: HashSet::new(),
            shapes: HashMap::new(),
            declarations: Vec::new(),
            omissions: Vec::new(),
        }
    }

    /// Emits the type for `object_key`, then the types of its nested objects.
    fn synthesize(&mut self, object_key: &ObjectKey) -> Result<(), BridgeError>
    {
        if !self.visited.insert(object_key.path().to_string()) {
            return Ok(());
        }

        let schema = self.schema;
        let children = schema
            .children(object_key)
            .ok_or_else(|| BridgeError::MissingObjectKeys(object_key.path().to_string()))?;
        if children.is_empty() {
            return Ok(());
        }

        let mut lines = Vec::with_capacity(children.len());
        let mut nested = Vec::new();
        for child in children {
            let key = object_key.child_key(child);
            if let Some(line) = self.map_field(&key)? {
                lines.push(line);
            }
            for candidate in [ObjectKey::object(key.as_str()), ObjectKey::array_of(key.as_str())] {
                if schema.has_children(&candidate) {
                    nested.push(candidate);
                }
            }
        }

        // Nothing to declare when every child was omitted.
        if !lines.is_empty() {
            let type_name = aliased_name(
                object_key.path(),
                self.base_name,
                self.selector.interface_prefix.as_deref(),
                &self.config.rename_rules,
            );
            self.declarations.push(render_type(&type_name, &render_body(&lines)));
        }

        for nested_key in &nested {
            self.synthesize(nested_key)?;
        }
        Ok(())
    }

    /// `name: Type[!]` for one key, `None` when the field has no representation.
    fn map_field(&mut self, key: &str) -> Result<Option<String>, BridgeError>
    {
        let (schema, selector) = (self.schema, self.selector);
        let field = schema.descriptor(key)?;
        let type_expr = match selector.custom.get(key) {
            Some(custom) => Some(custom.clone()),
            None => self.infer_type(key, field)?,
        };
        let Some(type_expr) = type_expr else {
            return Ok(None);
        };

        let mut type_expr = resolve_alias(
            type_expr,
            selector.interface_prefix.as_deref(),
            &self.config.rename_rules,
        );
        if !field.optional {
            type_expr.push('!');
        }

        Ok(Some(format!("{}: {}", leaf_segment(key), type_expr)))
    }

    fn infer_type(&mut self, key: &str, field: &FieldDescriptor) -> Result<Option<String>, BridgeError>
    {
        let type_expr = match field.base_type {
            BaseType::Object => {
                if self.has_fields(&ObjectKey::object(key))? {
                    Some(composite_name(key, self.base_name))
                } else if field.blackbox {
                    Some(ScalarKind::Blackbox.graphql_name().to_string())
                } else {
                    self.omit(key, OmissionReason::ShapelessObject);
                    None
                }
            }
            BaseType::Array => {
                if let Some(scalar) = field.element_type.and_then(ScalarKind::from_base) {
                    Some(format!("[{}]", scalar.graphql_name()))
                } else if self.has_fields(&ObjectKey::array_of(key))? {
                    Some(format!("[{}]", composite_name(key, self.base_name)))
                } else {
                    self.omit(key, OmissionReason::ShapelessArray);
                    None
                }
            }
            _ => self
                .config
                .patterns
                .classify(field)
                .map(|scalar| scalar.graphql_name().to_string()),
        };
        Ok(type_expr)
    }

    /// Whether the type for `object_key` would have at least one field.
    fn has_fields(&mut self, object_key: &ObjectKey) -> Result<bool, BridgeError>
    {
        if let Some(&known) = self.shapes.get(object_key) {
            return Ok(known);
        }

        let schema = self.schema;
        let mut representable = false;
        for child in schema.children(object_key).unwrap_or_default() {
            if self.is_representable(&object_key.child_key(child))? {
                representable = true;
                break;
            }
        }

        self.shapes.insert(object_key.clone(), representable);
        Ok(representable)
    }

    /// Mirrors `map_field` without recording omissions.
    fn is_representable(&mut self, key: &str) -> Result<bool, BridgeError>
    {
        if self.selector.custom.contains_key(key) {
            return Ok(true);
        }

        let schema = self.schema;
        let field = schema.descriptor(key)?;
        let representable = match field.base_type {
            BaseType::Object => self.has_fields(&ObjectKey::object(key))? || field.blackbox,
            BaseType::Array => {
                field.element_type.and_then(ScalarKind::from_base).is_some()
                    || self.has_fields(&ObjectKey::array_of(key))?
            }
            _ => self.config.patterns.classify(field).is_some(),
        };
        Ok(representable)
    }

    fn omit(&mut self, key: &str, reason: OmissionReason)
    {
        log::warn!("omitting field '{}': {}", key, reason);
        self.omissions.push(Omission {
            key: key.to_string(),
            reason,
        });
    }
}

fn render_body(lines: &[String]) -> String
{
    lines
        .iter()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_type(name: &str, body: &str) -> String
{
    if body.is_empty() {
        format!("type {name}")
    } else {
        format!("type {name} {{\n{body}\n}}")
    }
}
