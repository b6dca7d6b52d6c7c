//! Shared type definitions for the source schema and the generated output.
//!
//! These types are the stable interface between the schema source (which
//! produces them) and the generators (which consume them).

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::BridgeError;

/// Base type of a field in the source schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum BaseType
{
    String,
    Number,
    Boolean,
    Date,
    Object,
    Array,
}

impl BaseType
{
    /// Whether values of this type map straight onto a GraphQL scalar.
    pub const fn is_scalar(self) -> bool
    {
        !matches!(self, Self::Object | Self::Array)
    }
}

/// Metadata for one schema key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor
{
    pub base_type: BaseType,
    pub optional: bool,
    /// Only meaningful for objects: keep the value opaque instead of expanding it.
    pub blackbox: bool,
    /// Source of the validation regex, compared verbatim against the known patterns.
    pub pattern: Option<String>,
    /// Only meaningful for arrays: the type of the elements.
    pub element_type: Option<BaseType>,
}

impl FieldDescriptor
{
    pub fn new(base_type: BaseType) -> Self
    {
        Self {
            base_type,
            optional: false,
            blackbox: false,
            pattern: None,
            element_type: None,
        }
    }

    pub fn optional(mut self) -> Self
    {
        self.optional = true;
        self
    }

    pub fn blackbox(mut self) -> Self
    {
        self.blackbox = true;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self
    {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn elements(mut self, element_type: BaseType) -> Self
    {
        self.element_type = Some(element_type);
        self
    }
}

/// How the children of a nested object key are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nesting
{
    /// `prefix.child`
    Object,
    /// `prefix.$.child`
    ArrayOf,
}

/// A dotted key path under which child keys are declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey
{
    path: String,
    nesting: Nesting,
}

impl ObjectKey
{
    pub fn new(path: impl Into<String>, nesting: Nesting) -> Self
    {
        Self {
            path: path.into(),
            nesting,
        }
    }

    pub fn object(path: impl Into<String>) -> Self
    {
        Self::new(path, Nesting::Object)
    }

    pub fn array_of(path: impl Into<String>) -> Self
    {
        Self::new(path, Nesting::ArrayOf)
    }

    pub fn path(&self) -> &str
    {
        &self.path
    }

    pub fn nesting(&self) -> Nesting
    {
        self.nesting
    }

    /// Fully-qualified key of a child declared under this object.
    pub fn child_key(&self, child: &str) -> String
    {
        match self.nesting {
            Nesting::Object => format!("{}.{}", self.path, child),
            Nesting::ArrayOf => format!("{}.$.{}", self.path, child),
        }
    }

    /// Field name this object is exposed under on its parent type.
    pub fn leaf(&self) -> &str
    {
        leaf_segment(&self.path)
    }

    /// Path of the object owning this one, `None` for top-level keys.
    pub fn parent(&self) -> Option<&str>
    {
        let idx = self.path.rfind('.')?;
        let parent = &self.path[..idx];
        Some(parent.strip_suffix(".$").unwrap_or(parent))
    }

    /// The top-level key this object hangs off.
    pub fn root(&self) -> &str
    {
        self.path.split('.').next().unwrap_or(&self.path)
    }
}

/// Last segment of a dotted key, skipping the `$` array marker.
pub(crate) fn leaf_segment(key: &str) -> &str
{
    key.rsplit('.').find(|segment| *segment != "$").unwrap_or(key)
}

/// Read-only view of a flattened field schema.
///
/// [`crate::FlatSchema`] is the bundled implementation; anything able to
/// answer these four lookups can be bridged.
pub trait SchemaSource
{
    /// Top-level field keys in declaration order.
    fn first_level_keys(&self) -> &[String];

    /// Descriptor for any key, nested or not.
    fn field(&self, key: &str) -> Option<&FieldDescriptor>;

    /// Every nested object key in declaration order.
    fn object_keys(&self) -> &[ObjectKey];

    /// Immediate child segments declared under `key`.
    fn children(&self, key: &ObjectKey) -> Option<&[String]>;

    /// Like [`SchemaSource::field`], treating a missing descriptor as a broken source.
    fn descriptor(&self, key: &str) -> Result<&FieldDescriptor, BridgeError>
    {
        self.field(key)
            .ok_or_else(|| BridgeError::MissingField(key.to_string()))
    }

    /// Whether `key` declares at least one child.
    fn has_children(&self, key: &ObjectKey) -> bool
    {
        self.children(key).is_some_and(|children| !children.is_empty())
    }
}

/// Which fields to bridge and how to shape the output.
#[derive(Debug, Clone)]
pub struct FieldSelector
{
    /// Allow-list of top-level keys. Empty means no filtering.
    pub fields: Vec<String>,
    /// Deny-list of top-level keys, ignored when `fields` is non-empty.
    pub except: Vec<String>,
    /// Literal type expressions that bypass inference, by field key.
    pub custom: BTreeMap<String, String>,
    /// Replacement for the role tokens of the configured rename rules.
    pub interface_prefix: Option<String>,
    /// Wrap the fields in a named type declaration (default: true).
    pub wrap: bool,
}

impl Default for FieldSelector
{
    fn default() -> Self
    {
        Self {
            fields: Vec::new(),
            except: Vec::new(),
            custom: BTreeMap::new(),
            interface_prefix: None,
            wrap: true,
        }
    }
}

impl FieldSelector
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn except<I, S>(mut self, except: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = except.into_iter().map(Into::into).collect();
        self
    }

    pub fn custom(mut self, key: impl Into<String>, type_expr: impl Into<String>) -> Self
    {
        self.custom.insert(key.into(), type_expr.into());
        self
    }

    pub fn interface_prefix(mut self, prefix: impl Into<String>) -> Self
    {
        self.interface_prefix = Some(prefix.into());
        self
    }

    pub fn unwrapped(mut self) -> Self
    {
        self.wrap = false;
        self
    }

    /// Whether a top-level key survives the allow/deny lists.
    pub fn allows(&self, key: &str) -> bool
    {
        if !self.fields.is_empty() {
            return self.fields.iter().any(|f| f == key);
        }
        if !self.except.is_empty() {
            return !self.except.iter().any(|e| e == key);
        }
        true
    }
}

/// Type declarations and field body, kept apart for composing a larger type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaFragments
{
    /// Every synthesized nested type, separated by blank lines.
    pub nested_type_declarations: String,
    /// Indented `name: Type` lines of the root type, one per line.
    pub field_body: String,
}

/// Output of [`crate::SchemaBridge::schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedArtifact
{
    /// Nested declarations followed by the wrapping type.
    Document(String),
    /// Unwrapped output, see [`FieldSelector::wrap`].
    Fragments(SchemaFragments),
}

impl GeneratedArtifact
{
    pub fn as_document(&self) -> Option<&str>
    {
        match self {
            Self::Document(sdl) => Some(sdl),
            Self::Fragments(_) => None,
        }
    }

    pub fn as_fragments(&self) -> Option<&SchemaFragments>
    {
        match self {
            Self::Document(_) => None,
            Self::Fragments(fragments) => Some(fragments),
        }
    }
}
