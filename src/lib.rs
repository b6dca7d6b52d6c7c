//! Generate GraphQL types, resolvers and mocks from flattened field schemas.
//!
//! A field schema maps dotted keys (`profile.address.city`, `items.$.qty`)
//! to type metadata. This crate turns one into:
//!
//! - **GraphQL SDL**: a root type plus one named type per nested object
//!   (`profile.address` under `User` becomes `UserProfileAddress`)
//! - **Resolvers**: field accessors keyed by the same type names
//! - **Mocks**: placeholder producers per scalar type
//!
//! # Usage
//!
//! ```rust
//! use schema_graphql_bridge::{FieldSelector, FlatSchema, SchemaBridge};
//!
//! let schema = FlatSchema::from_json_str(
//!     r#"{
//!         "name": { "type": "String" },
//!         "profile": { "type": "Object" },
//!         "profile.bio": { "type": "String", "optional": true }
//!     }"#,
//! )
//! .unwrap();
//!
//! let bridge = SchemaBridge::default();
//! let sdl = bridge.schema(&schema, "User", &FieldSelector::default()).unwrap();
//! let sdl = sdl.as_document().unwrap();
//! assert!(sdl.contains("type UserProfile {"));
//! assert!(sdl.contains("profile: UserProfile!"));
//! ```
//!
//! Or from `build.rs`, writing the SDL to disk:
//!
//! ```rust,no_run
//! use schema_graphql_bridge::{generate, Configuration};
//!
//! fn main() {
//!     let config = Configuration {
//!         type_name: "User".to_string(),
//!         ..Default::default()
//!     };
//!     generate(config).expect("schema-graphql-bridge failed");
//! }
//! ```

mod codegen;
pub mod enumerate;
pub mod errors;
mod extract;
pub mod mocks;
pub mod naming;
pub mod resolvers;
pub mod scalar;
pub mod types;

use std::fs;
use std::path::PathBuf;

pub use codegen::{Omission, OmissionReason, SchemaReport};
use errors::BridgeError;
pub use extract::FlatSchema;
pub use mocks::{MockMap, MockProducer, MockTable};
pub use naming::RenameRule;
pub use resolvers::{FieldResolver, ResolverMap};
pub use scalar::{KnownPatterns, ScalarKind};
pub use types::{
    BaseType, FieldDescriptor, FieldSelector, GeneratedArtifact, Nesting, ObjectKey, SchemaFragments, SchemaSource,
};

/// Construction-time settings shared by every generation pass.
#[derive(Debug, Clone)]
pub struct BridgeConfig
{
    /// Patterns that turn a `String` field into an id, email or username scalar.
    pub patterns: KnownPatterns,

    /// Rules applied when a [`FieldSelector::interface_prefix`] is given
    /// (default: [`RenameRule::account_roles`]).
    pub rename_rules: Vec<RenameRule>,

    /// Mock producers by scalar name.
    pub mocks: MockTable,

    /// Document id field prepended to every root type (e.g. `_id`).
    pub id_field: Option<String>,
}

impl Default for BridgeConfig
{
    fn default() -> Self
    {
        Self {
            patterns: KnownPatterns::default(),
            rename_rules: vec![RenameRule::account_roles()],
            mocks: MockTable::default(),
            id_field: None,
        }
    }
}

/// Entry point for the three generators.
#[derive(Debug, Clone, Default)]
pub struct SchemaBridge
{
    config: BridgeConfig,
}

impl SchemaBridge
{
    pub fn new(config: BridgeConfig) -> Self
    {
        Self { config }
    }

    pub fn config(&self) -> &BridgeConfig
    {
        &self.config
    }

    /// GraphQL SDL for `schema`, named `name`.
    ///
    /// # Errors
    /// Fails only when `schema` is inconsistent: a listed key without a
    /// descriptor, or an object key without a child list. Fields that have
    /// no GraphQL representation are left out, see [`SchemaBridge::schema_report`].
    pub fn schema<S>(&self, schema: &S, name: &str, selector: &FieldSelector) -> Result<GeneratedArtifact, BridgeError>
    where
        S: SchemaSource + ?Sized,
    {
        Ok(self.schema_report(schema, name, selector)?.artifact)
    }

    /// Like [`SchemaBridge::schema`], also listing every omitted field.
    pub fn schema_report<S>(&self, schema: &S, name: &str, selector: &FieldSelector) -> Result<SchemaReport, BridgeError>
    where
        S: SchemaSource + ?Sized,
    {
        codegen::generate_schema(schema, name, selector, &self.config)
    }

    /// Field resolvers for the root type `name` and every nested type.
    pub fn resolvers<S>(&self, schema: &S, name: &str, selector: &FieldSelector) -> Result<ResolverMap, BridgeError>
    where
        S: SchemaSource + ?Sized,
    {
        resolvers::generate_resolvers(schema, name, selector, &self.config)
    }

    /// Mock producers for the top-level scalars, plus one for `name` when given.
    pub fn mocks<S>(&self, schema: &S, name: Option<&str>, selector: &FieldSelector) -> Result<MockMap, BridgeError>
    where
        S: SchemaSource + ?Sized,
    {
        mocks::generate_mocks(schema, name, selector, &self.config.patterns, &self.config.mocks)
    }
}

/// Configuration options for file-based generation.
#[derive(Debug, Clone)]
pub struct Configuration
{
    /// Path to the JSON schema document (default: "schema.json")
    pub schema_path: PathBuf,

    /// Output file path for the generated SDL (default: "schema.graphql")
    pub out_file: String,

    /// Name of the root GraphQL type (default: "Document")
    pub type_name: String,

    /// Which fields to emit; wrapping is always on for file output
    pub selector: FieldSelector,

    /// Settings handed to the [`SchemaBridge`]
    pub bridge: BridgeConfig,
}

impl Default for Configuration
{
    fn default() -> Self
    {
        Self {
            schema_path: PathBuf::from("schema.json"),
            out_file: "schema.graphql".to_string(),
            type_name: "Document".to_string(),
            selector: FieldSelector::default(),
            bridge: BridgeConfig::default(),
        }
    }
}

/// Reads the schema document and writes its GraphQL SDL to `out_file`.
///
/// # Errors
/// This function can fail for several reasons:
/// * Schema file not found
/// * Invalid schema document
/// * IO errors when reading/writing files
pub fn generate(config: Configuration) -> Result<(), BridgeError>
{
    let schema = FlatSchema::from_path(&config.schema_path)?;

    let selector = FieldSelector {
        wrap: true,
        ..config.selector
    };
    let bridge = SchemaBridge::new(config.bridge);
    let report = bridge.schema_report(&schema, &config.type_name, &selector)?;
    if !report.omissions.is_empty() {
        log::info!(
            "{} field(s) of {} have no GraphQL representation",
            report.omissions.len(),
            config.schema_path.display()
        );
    }

    let sdl = report.artifact.into_document(&config.type_name);
    fs::write(&config.out_file, sdl).map_err(|e| BridgeError::from(e).with_file_context(&config.out_file))?;

    Ok(())
}
