//! Definition building from a single source.
//!
//! # Responsibilities
//! - Pick the definition source (config file XOR CLI flags)
//! - Apply each supplied flag through the flag lookup table
//! - Fall back to the default path when none is given

use std::path::PathBuf;

use crate::api::definition::{ApiDefinition, DEFAULT_PATH};
use crate::api::format::{format_query_string, normalize_path, parse_pairs};
use crate::config::loader::{load_definitions, ConfigError};

/// Parses one raw flag value into a definition.
pub type FlagParser = fn(&mut ApiDefinition, &str);

/// Definition flags and the parser each one feeds.
pub const FLAG_PARSERS: &[(&str, FlagParser)] = &[
    ("querystr", apply_query_string),
    ("resp", apply_response_body),
    ("header", apply_headers),
    ("cookie", apply_cookies),
];

/// Where the session's definitions come from.
#[derive(Debug, Clone)]
pub enum DefinitionSource {
    /// Parse every definition from a config file.
    ConfigFile(PathBuf),
    /// Build one definition from the path argument and the flags the operator set.
    Flags {
        path: Option<String>,
        flags: Vec<(&'static str, String)>,
    },
}

/// Build the ordered definitions for a session.
pub fn build_definitions(source: &DefinitionSource) -> Result<Vec<ApiDefinition>, ConfigError> {
    match source {
        DefinitionSource::ConfigFile(path) => load_definitions(path),
        DefinitionSource::Flags { path, flags } => {
            Ok(vec![build_definition(path.as_deref(), flags.iter().cloned())])
        }
    }
}

/// Build one definition from a raw path and `(flag, value)` pairs.
pub fn build_definition<I, N, V>(path: Option<&str>, flags: I) -> ApiDefinition
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: AsRef<str>,
{
    let path = path
        .and_then(normalize_path)
        .unwrap_or_else(|| DEFAULT_PATH.to_string());
    let mut definition = ApiDefinition::new(path);

    for (name, value) in flags {
        let name = name.as_ref();
        if !apply_flag(&mut definition, name, value.as_ref()) {
            tracing::debug!(flag = %name, "Ignoring unknown definition flag");
        }
    }

    definition
}

/// Run the parser registered for `name`. Returns false for unknown flags.
pub fn apply_flag(definition: &mut ApiDefinition, name: &str, value: &str) -> bool {
    match FLAG_PARSERS.iter().find(|(flag, _)| *flag == name) {
        Some((_, parser)) => {
            parser(definition, value);
            true
        }
        None => false,
    }
}

fn apply_query_string(definition: &mut ApiDefinition, value: &str) {
    definition.query_string = format_query_string(value);
}

fn apply_response_body(definition: &mut ApiDefinition, value: &str) {
    definition.response_body = value.to_string();
}

fn apply_headers(definition: &mut ApiDefinition, value: &str) {
    definition.header_spec = value.trim().to_string();
    definition.headers = parse_pairs(&definition.header_spec);
}

fn apply_cookies(definition: &mut ApiDefinition, value: &str) {
    definition.cookie_spec = value.trim().to_string();
    definition.cookies = parse_pairs(&definition.cookie_spec);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::definition::KeyValue;

    #[test]
    fn test_no_flags_yields_default_definition() {
        let def = build_definition(None, Vec::<(&str, &str)>::new());
        assert_eq!(def, ApiDefinition::default());
    }

    #[test]
    fn test_flags_populate_definition() {
        let def = build_definition(
            Some("user/new"),
            vec![
                ("querystr", "userid=110&tag=name"),
                ("resp", r#"{"userName":"John Nash"}"#),
                ("header", " content-type=application/json x-a=1 "),
                ("cookie", "session=abc"),
            ],
        );

        assert_eq!(def.path, "/user/new");
        assert_eq!(def.query_string.as_deref(), Some("?userid%3D110%26tag%3Dname"));
        assert_eq!(def.response_body, r#"{"userName":"John Nash"}"#);
        assert_eq!(def.header_spec, "content-type=application/json x-a=1");
        assert_eq!(
            def.headers,
            vec![
                KeyValue::new("content-type", "application/json"),
                KeyValue::new("x-a", "1"),
            ]
        );
        assert_eq!(def.cookies, vec![KeyValue::new("session", "abc")]);
    }

    #[test]
    fn test_headers_and_cookies_are_separate_namespaces() {
        let def = build_definition(None, vec![("cookie", "x-a=1")]);
        assert!(def.headers.is_empty());
        assert_eq!(def.cookies, vec![KeyValue::new("x-a", "1")]);
    }

    #[test]
    fn test_unknown_flag_is_ignored() {
        let mut def = ApiDefinition::default();
        assert!(!apply_flag(&mut def, "verbose", "true"));
        assert_eq!(def, ApiDefinition::default());
    }

    #[test]
    fn test_blank_path_falls_back_to_default() {
        let def = build_definition(Some("   "), Vec::<(&str, &str)>::new());
        assert_eq!(def.path, DEFAULT_PATH);
    }

    #[test]
    fn test_flag_source_builds_exactly_one_definition() {
        let source = DefinitionSource::Flags {
            path: Some("/orders".into()),
            flags: vec![("resp", "[]".to_string())],
        };
        let defs = build_definitions(&source).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].path, "/orders");
        assert_eq!(defs[0].response_body, "[]");
    }
}
