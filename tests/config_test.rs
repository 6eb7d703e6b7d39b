use camino::Utf8Path;
use sqlite_alter::{AlterOperations, AlterRequest, AlterSession, ColumnSnapshot, Config, SchemaCatalog};
use std::fs;
use tempfile::TempDir;

fn catalog() -> SchemaCatalog {
    let mut catalog = SchemaCatalog::new();
    catalog.insert(
        "users",
        ColumnSnapshot::default()
            .column("id", "INTEGER", false)
            .column("name", "TEXT", true),
    );
    catalog
}

fn load(contents: &str) -> Config {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("sqlite-alter.toml");
    fs::write(&config_path, contents).unwrap();

    let config_path_utf8 = Utf8Path::from_path(&config_path).unwrap();
    Config::load_from_path(config_path_utf8).unwrap()
}

#[test]
fn test_config_temp_table_affixes() {
    let config = load(
        r#"
temp_table_prefix = "rebuild_"
temp_table_suffix = ""
        "#,
    );

    let planned = AlterSession::with_config(catalog(), &config)
        .plan_request(&AlterRequest::new(
            "users",
            AlterOperations::new().delete_column("name"),
        ))
        .unwrap();

    assert_eq!(
        planned.statements[0],
        r#"CREATE TABLE "rebuild_users" ("id" INTEGER NOT NULL)"#
    );
}

#[test]
fn test_config_finalize_rebuild() {
    let config = load("finalize_rebuild = true");

    let planned = AlterSession::with_config(catalog(), &config)
        .plan_request(&AlterRequest::new(
            "users",
            AlterOperations::new()
                .rename_column("name", "full_name")
                .rename_table("people"),
        ))
        .unwrap();

    assert_eq!(
        planned.statements,
        vec![
            r#"CREATE TABLE "_users_tmp" ("id" INTEGER NOT NULL, "full_name" TEXT)"#,
            r#"INSERT INTO "_users_tmp" ("id", "full_name") SELECT "id", "name" FROM "users""#,
            r#"DROP TABLE "users""#,
            r#"ALTER TABLE "_users_tmp" RENAME TO "users""#,
            r#"ALTER TABLE "users" RENAME TO "people""#,
        ]
    );
}

#[test]
fn test_config_permissive_names() {
    let config = load("strict_names = false");
    let request = AlterRequest::new(
        "users",
        AlterOperations::new()
            .rename_column("id", "key")
            .rename_column("name", "key"),
    );

    assert!(AlterSession::with_config(catalog(), &config)
        .plan_request(&request)
        .is_ok());
    assert!(AlterSession::new(catalog()).plan_request(&request).is_err());
}

#[test]
fn test_config_rejects_invalid_affix() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("sqlite-alter.toml");
    fs::write(&config_path, r#"temp_table_prefix = "tmp.""#).unwrap();

    let config_path_utf8 = Utf8Path::from_path(&config_path).unwrap();
    assert!(Config::load_from_path(config_path_utf8).is_err());
}
