//! API definition records.

/// Path used when the operator supplies none.
pub const DEFAULT_PATH: &str = "/api/new";

/// A single key/value pair parsed from a header or cookie spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One configured mock endpoint.
///
/// `path` always starts with `/`. Header and cookie pairs keep operator order,
/// duplicates included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDefinition {
    /// Normalized route path.
    pub path: String,

    /// Percent-encoded query string, `?`-prefixed unless the operator supplied the `?`.
    pub query_string: Option<String>,

    /// Literal payload returned on every request.
    pub response_body: String,

    /// Raw header spec as typed by the operator.
    pub header_spec: String,
    pub headers: Vec<KeyValue>,

    /// Raw cookie spec as typed by the operator.
    pub cookie_spec: String,
    pub cookies: Vec<KeyValue>,
}

impl ApiDefinition {
    /// Create an empty definition bound to an already-normalized path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query_string: None,
            response_body: String::new(),
            header_spec: String::new(),
            headers: Vec::new(),
            cookie_spec: String::new(),
            cookies: Vec::new(),
        }
    }

    /// Path plus query string, as shown to the operator.
    pub fn display_target(&self) -> String {
        match &self.query_string {
            Some(qs) => format!("{}{}", self.path, qs),
            None => self.path.clone(),
        }
    }
}

impl Default for ApiDefinition {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}
