use std::fs;
use std::path::PathBuf;

use schema_graphql_bridge::errors::BridgeError;
use schema_graphql_bridge::{generate, BridgeConfig, Configuration, FieldSelector, RenameRule};
use tempdir::TempDir;

fn setup_test_dir() -> TempDir
{
    TempDir::new("bridge_config_test").expect("Failed to create temp directory")
}

#[test]
fn test_configuration_default()
{
    let config = Configuration::default();
    assert_eq!(config.schema_path, PathBuf::from("schema.json"));
    assert_eq!(config.out_file, "schema.graphql");
    assert_eq!(config.type_name, "Document");
    assert!(config.selector.wrap);
    assert!(config.bridge.id_field.is_none());
    assert_eq!(config.bridge.rename_rules, vec![RenameRule::account_roles()]);
}

#[test]
fn test_generate_writes_sdl() -> anyhow::Result<()>
{
    let temp_dir = setup_test_dir();
    let schema_path = temp_dir.path().join("schema.json");
    let out_file = temp_dir.path().join("schema.graphql");
    fs::write(
        &schema_path,
        r#"{
            "title": "String",
            "author": { "type": "Object" },
            "author.name": "String"
        }"#,
    )?;

    let config = Configuration {
        schema_path,
        out_file: out_file.to_string_lossy().to_string(),
        type_name: "Post".to_string(),
        bridge: BridgeConfig {
            id_field: Some("_id".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    generate(config)?;

    let sdl = fs::read_to_string(out_file)?;
    assert!(sdl.contains("type PostAuthor {"), "missing PostAuthor type");
    assert!(sdl.contains("type Post {\n  _id: GraphQLMeteorId!\n  title: String!"));
    assert!(sdl.contains("author: PostAuthor!"));
    Ok(())
}

#[test]
fn test_generate_always_wraps() -> anyhow::Result<()>
{
    let temp_dir = setup_test_dir();
    let schema_path = temp_dir.path().join("schema.json");
    let out_file = temp_dir.path().join("schema.graphql");
    fs::write(&schema_path, r#"{ "title": "String" }"#)?;

    let config = Configuration {
        schema_path,
        out_file: out_file.to_string_lossy().to_string(),
        type_name: "Post".to_string(),
        selector: FieldSelector::new().unwrapped(),
        ..Default::default()
    };
    generate(config)?;

    assert_eq!(fs::read_to_string(out_file)?, "type Post {\n  title: String!\n}\n");
    Ok(())
}

#[test]
fn test_missing_schema_file()
{
    let temp_dir = setup_test_dir();
    let config = Configuration {
        schema_path: temp_dir.path().join("nonexistent.json"),
        ..Default::default()
    };

    match generate(config) {
        Err(BridgeError::MissingSchemaFile) => (),
        other => panic!("Expected MissingSchemaFile error, got {:?}", other),
    }
}

#[test]
fn test_empty_schema_document() -> anyhow::Result<()>
{
    let temp_dir = setup_test_dir();
    let schema_path = temp_dir.path().join("schema.json");
    let out_file = temp_dir.path().join("schema.graphql");
    fs::write(&schema_path, "{}")?;

    let config = Configuration {
        schema_path,
        out_file: out_file.to_string_lossy().to_string(),
        ..Default::default()
    };

    // An empty document is valid, it just produces a bare root type
    generate(config)?;
    assert_eq!(fs::read_to_string(out_file)?, "type Document\n");
    Ok(())
}

#[test]
fn test_unwritable_output_reports_file()
{
    let temp_dir = setup_test_dir();
    let schema_path = temp_dir.path().join("schema.json");
    fs::write(&schema_path, r#"{ "title": "String" }"#).expect("Failed to write test schema");
    let out_file = temp_dir
        .path()
        .join("missing-dir")
        .join("schema.graphql")
        .to_string_lossy()
        .to_string();

    let config = Configuration {
        schema_path,
        out_file: out_file.clone(),
        ..Default::default()
    };

    match generate(config) {
        Err(BridgeError::IOError { file, .. }) => assert_eq!(file, out_file),
        other => panic!("Expected IOError, got {:?}", other),
    }
}
