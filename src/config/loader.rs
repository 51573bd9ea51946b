//! Config file loading.
//!
//! The file is TOML with one `[[api]]` table per endpoint. Its keys mirror the
//! CLI flags and go through the same flag parsers:
//!
//! ```toml
//! [[api]]
//! path = "/user/new"
//! querystr = "id=110"
//! resp = '{"userName":"John Nash"}'
//! header = "content-type=application/json"
//! cookie = "session=abc"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::api::builder::build_definition;
use crate::api::ApiDefinition;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: Vec<ApiEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiEntry {
    path: Option<String>,
    querystr: Option<String>,
    resp: Option<String>,
    header: Option<String>,
    cookie: Option<String>,
}

impl ApiEntry {
    fn flags(&self) -> Vec<(&'static str, &str)> {
        [
            ("querystr", &self.querystr),
            ("resp", &self.resp),
            ("header", &self.header),
            ("cookie", &self.cookie),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}

/// Load every API definition from a config file.
pub fn load_definitions(path: &Path) -> Result<Vec<ApiDefinition>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let definitions = parse_definitions(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = ?path, definitions = definitions.len(), "Config loaded");
    Ok(definitions)
}

/// Parse definitions from config file content. Blank content yields none.
pub fn parse_definitions(content: &str) -> Result<Vec<ApiDefinition>, toml::de::Error> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let file: ConfigFile = toml::from_str(content)?;
    Ok(file
        .api
        .iter()
        .map(|entry| build_definition(entry.path.as_deref(), entry.flags()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{KeyValue, DEFAULT_PATH};

    #[test]
    fn test_blank_content_yields_no_definitions() {
        assert!(parse_definitions("").unwrap().is_empty());
        assert!(parse_definitions("  \n\t").unwrap().is_empty());
    }

    #[test]
    fn test_entries_keep_file_order() {
        let content = r#"
            [[api]]
            path = "user/new"
            querystr = "id=110"
            resp = '{"userName":"John Nash"}'
            header = "content-type=application/json"

            [[api]]
            path = "/orders"
            cookie = "session=abc theme=dark"
        "#;

        let defs = parse_definitions(content).unwrap();
        assert_eq!(defs.len(), 2);

        assert_eq!(defs[0].path, "/user/new");
        assert_eq!(defs[0].query_string.as_deref(), Some("?id%3D110"));
        assert_eq!(defs[0].response_body, r#"{"userName":"John Nash"}"#);
        assert_eq!(
            defs[0].headers,
            vec![KeyValue::new("content-type", "application/json")]
        );

        assert_eq!(defs[1].path, "/orders");
        assert_eq!(
            defs[1].cookies,
            vec![KeyValue::new("session", "abc"), KeyValue::new("theme", "dark")]
        );
    }

    #[test]
    fn test_missing_path_uses_default() {
        let defs = parse_definitions("[[api]]\nresp = \"ok\"\n").unwrap();
        assert_eq!(defs[0].path, DEFAULT_PATH);
    }

    #[test]
    fn test_unknown_key_is_a_parse_error() {
        assert!(parse_definitions("[[api]]\nverb = \"GET\"\n").is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("apic-loader-{}.toml", std::process::id()));
        fs::write(&path, "[[api]]\npath = \"/a\"\n[[api]]\npath = \"/b\"\n").unwrap();

        let defs = load_definitions(&path).unwrap();
        let _ = fs::remove_file(&path);

        let paths: Vec<_> = defs.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/nonexistent/apic/config.toml");
        assert!(matches!(load_definitions(path), Err(ConfigError::Io { .. })));
    }
}
