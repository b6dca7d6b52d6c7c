//! GraphQL scalar mapping for schema base types and constrained strings.

use crate::types::{BaseType, FieldDescriptor};

/// Meteor document id: 17 characters from an unambiguous alphabet.
pub const ID_PATTERN: &str = "^[23456789ABCDEFGHJKLMNPQRSTWXYZabcdefghijkmnopqrstuvwxyz]{17}$";

/// RFC 5322-ish address, as shipped by the schema library.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

/// A username is anything without an `@`.
pub const USERNAME_PATTERN: &str = "^[^@]*$";

/// Every GraphQL scalar a field can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind
{
    String,
    Number,
    Boolean,
    Date,
    Identifier,
    Email,
    Username,
    Blackbox,
}

impl ScalarKind
{
    pub const fn graphql_name(self) -> &'static str
    {
        match self {
            Self::String => "String",
            Self::Number => "Float",
            Self::Boolean => "Boolean",
            Self::Date => "GraphQLDate",
            Self::Identifier => "GraphQLMeteorId",
            Self::Email => "GraphQLEmail",
            Self::Username => "GraphQLUsername",
            Self::Blackbox => "GraphQLObject",
        }
    }

    /// Plain mapping of a base type, `None` for objects and arrays.
    pub const fn from_base(base_type: BaseType) -> Option<Self>
    {
        match base_type {
            BaseType::String => Some(Self::String),
            BaseType::Number => Some(Self::Number),
            BaseType::Boolean => Some(Self::Boolean),
            BaseType::Date => Some(Self::Date),
            BaseType::Object | BaseType::Array => None,
        }
    }
}

/// Pattern sources that promote a `String` field to a dedicated scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownPatterns
{
    pub identifier: String,
    pub email: String,
    pub username: String,
}

impl Default for KnownPatterns
{
    fn default() -> Self
    {
        Self {
            identifier: ID_PATTERN.to_string(),
            email: EMAIL_PATTERN.to_string(),
            username: USERNAME_PATTERN.to_string(),
        }
    }
}

impl KnownPatterns
{
    /// Scalar for a non-container field, honouring the string subtypes.
    pub fn classify(&self, field: &FieldDescriptor) -> Option<ScalarKind>
    {
        let kind = ScalarKind::from_base(field.base_type)?;
        if kind != ScalarKind::String {
            return Some(kind);
        }

        let refined = match field.pattern.as_deref() {
            Some(p) if p == self.identifier => ScalarKind::Identifier,
            Some(p) if p == self.username => ScalarKind::Username,
            Some(p) if p == self.email => ScalarKind::Email,
            _ => ScalarKind::String,
        };
        Some(refined)
    }
}
