//! Composite type naming.
//!
//! A nested key such as `sublist.subobject.attributes` under the base name
//! `List` becomes `ListSublistSubobjectAttributes`.

use std::collections::BTreeSet;

/// Deterministic type name for the object at `key_path`.
///
/// The `$` array marker does not contribute a segment: the element type of
/// the array `items` is `<Base>Items`, and `items.$.meta` is `<Base>ItemsMeta`.
pub fn composite_name(key_path: &str, base_name: &str) -> String
{
    key_path
        .split('.')
        .filter(|segment| !segment.is_empty() && *segment != "$")
        .fold(base_name.to_string(), |mut name, segment| {
            name.push_str(&capitalize(segment));
            name
        })
}

fn capitalize(segment: &str) -> String
{
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Nested account types shared by every role.
pub const ACCOUNT_SUFFIXES: [&str; 4] = ["Emails", "Services", "Demo", "LastActivity"];

/// Renames generated type names that would clash once two parallel schemas
/// (say a provider's and a consumer's) are merged under one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRule
{
    tokens: Vec<String>,
    names: BTreeSet<String>,
}

impl RenameRule
{
    /// `tokens` are replaced by the interface prefix in any of `names`.
    pub fn new<T, N>(tokens: T, names: N) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Renames `<role><suffix>` for every role and suffix, replacing the role.
    pub fn roles<R, S>(roles: R, suffixes: S) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let tokens: Vec<String> = roles.into_iter().map(Into::into).collect();
        let suffixes: Vec<S::Item> = suffixes.into_iter().collect();
        let names = tokens
            .iter()
            .flat_map(|role| suffixes.iter().map(move |suffix| format!("{role}{}", suffix.as_ref())))
            .collect();
        Self { tokens, names }
    }

    /// Teacher and student account types merged under one user interface:
    /// `TeacherEmails` becomes `UserEmails` with the prefix `User`.
    pub fn account_roles() -> Self
    {
        Self::roles(["Teacher", "Student"], ACCOUNT_SUFFIXES)
    }

    /// Exact name or its list form `[Name]`.
    pub fn matches(&self, type_expr: &str) -> bool
    {
        if self.names.contains(type_expr) {
            return true;
        }
        type_expr
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .is_some_and(|inner| self.names.contains(inner))
    }

    /// Replaces the first occurrence of every role token.
    pub fn apply(&self, type_expr: &str, prefix: &str) -> String
    {
        self.tokens
            .iter()
            .fold(type_expr.to_string(), |expr, token| expr.replacen(token.as_str(), prefix, 1))
    }
}

/// Runs `type_expr` through the first matching rule, if a prefix is set.
pub fn resolve_alias(type_expr: String, prefix: Option<&str>, rules: &[RenameRule]) -> String
{
    let Some(prefix) = prefix else {
        return type_expr;
    };

    match rules.iter().find(|rule| rule.matches(&type_expr)) {
        Some(rule) => rule.apply(&type_expr, prefix),
        None => type_expr,
    }
}

/// Composite name for `key_path` with the rename rules applied.
pub fn aliased_name(key_path: &str, base_name: &str, prefix: Option<&str>, rules: &[RenameRule]) -> String
{
    resolve_alias(composite_name(key_path, base_name), prefix, rules)
}
