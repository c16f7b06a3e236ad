use super::*;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.database.server, "127.0.0.1");
    assert_eq!(config.database.port, 3306);
    assert_eq!(config.database.user, "root");
    assert_eq!(config.database.name, None);
    assert_eq!(config.database.password, None);
    assert_eq!(config.sql_path, PathBuf::from("./sql"));
    assert_eq!(config.version_table, "dbVer");
    assert!(!config.strict);
}

#[test]
fn test_parse_empty_config_uses_defaults() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
database:
  server: db.internal
  port: 3307
  name: app.duckdb
  user: migrator
  password: secret
sql_path: ./migrations
version_table: meta.db_version
strict: true
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.database.server, "db.internal");
    assert_eq!(config.database.port, 3307);
    assert_eq!(config.database.name.as_deref(), Some("app.duckdb"));
    assert_eq!(config.database.user, "migrator");
    assert_eq!(config.sql_path, PathBuf::from("./migrations"));
    assert!(config.strict);

    let table = config.version_table().unwrap();
    assert_eq!(table.schema(), Some("meta"));
    assert_eq!(table.table(), "db_version");
}

#[test]
fn test_parse_rejects_unknown_fields() {
    let result: Result<Config, _> = serde_yaml::from_str("unknown_key: 1");
    assert!(result.is_err());
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let err = Config::load(&dir.path().join("dbver.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_invalid_yaml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dbver.yml");
    std::fs::write(&path, "database: [not, a, map]").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}

#[test]
fn test_load_validates_version_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dbver.yml");
    std::fs::write(&path, "version_table: \"bad name\"").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_load_from_dir_or_default() {
    let dir = tempdir().unwrap();
    assert_eq!(
        Config::load_from_dir_or_default(dir.path()).unwrap(),
        Config::default()
    );

    std::fs::write(dir.path().join("dbver.yml"), "sql_path: ./other\n").unwrap();
    let config = Config::load_from_dir_or_default(dir.path()).unwrap();
    assert_eq!(config.sql_path, PathBuf::from("./other"));
}

#[test]
fn test_missing_required() {
    let mut conn = ConnectionConfig::default();
    assert_eq!(conn.missing_required(), vec!["name", "password"]);

    conn.name = Some("app".to_string());
    conn.password = Some(String::new());
    assert_eq!(conn.missing_required(), vec!["password"]);

    conn.password = Some("pw".to_string());
    assert!(conn.missing_required().is_empty());
}

#[test]
fn test_dsn_and_redaction() {
    let conn = ConnectionConfig {
        name: Some("shop".to_string()),
        password: Some("hunter2".to_string()),
        ..ConnectionConfig::default()
    };
    assert_eq!(
        conn.dsn(),
        "root:hunter2@127.0.0.1:3306/shop?charset=utf8&multiStatements=true"
    );
    assert_eq!(
        conn.redacted_dsn(),
        "root:****@127.0.0.1:3306/shop?charset=utf8&multiStatements=true"
    );
    assert!(!format!("{conn:?}").contains("hunter2"));
}

#[test]
fn test_version_table_parse() {
    let table = VersionTable::parse("dbVer").unwrap();
    assert_eq!(table.schema(), None);
    assert_eq!(table.quoted(), "\"dbVer\"");
    assert_eq!(table.to_string(), "dbVer");

    let table = VersionTable::parse("ops.dbVer").unwrap();
    assert_eq!(table.quoted(), "\"ops\".\"dbVer\"");

    assert!(VersionTable::parse("").is_err());
    assert!(VersionTable::parse("1abc").is_err());
    assert!(VersionTable::parse("a.b.c").is_err());
    assert!(VersionTable::parse("x; DROP TABLE y").is_err());
}
