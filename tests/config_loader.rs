mod common;

use common::temp_config;
use gastroassist::config::{Config, ConfigError};
use gastroassist::store::SupersedePolicy;
use std::path::Path;

#[test]
fn missing_file_yields_defaults() {
    let config = Config::load_from(Path::new("/nonexistent/gastroassist/config.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.server.base_url, "https://gastroapi.rohitkphilip.com");
    assert_eq!(config.server.query_path, "/api/query");
    assert_eq!(config.session.user_id, "guest");
    assert_eq!(config.query.supersede, SupersedePolicy::LastWriteWins);
    assert_eq!(config.ui.tick_rate_ms, 250);
    config.validate().unwrap();
}

#[test]
fn partial_file_fills_in_defaults() {
    let (_dir, path) = temp_config(
        r#"
[server]
base_url = "http://localhost:8000"

[query]
supersede = "latest_only"
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.server.base_url, "http://localhost:8000");
    assert_eq!(config.server.query_path, "/api/query");
    assert_eq!(config.session.user_id, "guest");
    assert_eq!(config.query.supersede, SupersedePolicy::LatestOnly);
    assert_eq!(
        config.server.endpoint().unwrap().as_str(),
        "http://localhost:8000/api/query"
    );
}

#[test]
fn invalid_toml_is_parse_error() {
    let (_dir, path) = temp_config("[server\nbase_url = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn unknown_policy_is_parse_error() {
    let (_dir, path) = temp_config("[query]\nsupersede = \"first_wins\"\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn directory_path_is_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = Config::load_from(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}

fn validation_message(mutate: impl FnOnce(&mut Config)) -> String {
    let mut config = Config::default();
    mutate(&mut config);
    match config.validate() {
        Err(ConfigError::ValidationError { message }) => message,
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn validation_rejects_bad_values() {
    assert!(validation_message(|c| c.server.base_url = "ftp://example.org".into())
        .contains("Unsupported URL scheme"));
    assert!(validation_message(|c| c.server.base_url = "not a url".into())
        .contains("Invalid server URL"));
    assert!(validation_message(|c| c.server.query_path = "api/query".into())
        .contains("query_path"));
    assert!(validation_message(|c| c.session.user_id = "  ".into()).contains("user_id"));
    assert!(validation_message(|c| c.ui.tick_rate_ms = 5).contains("tick_rate_ms"));
    assert!(validation_message(|c| c.ui.tick_rate_ms = 5000).contains("tick_rate_ms"));
}

#[test]
fn config_path_is_under_gastroassist_dir() {
    let path = Config::config_path();
    assert!(path.ends_with("gastroassist/config.toml"));
}
