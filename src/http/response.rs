//! Response compilation.
//!
//! # Responsibilities
//! - Turn an ApiDefinition into a ResponseDescriptor once, at registration
//! - Convert header and cookie pairs into HTTP types up front
//! - Render the verb-parameterized body for each request
//!
//! # Design Decisions
//! - Pairs that are not valid HTTP are dropped here, so rendering cannot fail
//! - Framing headers are owned by the server and never taken from operator input
//! - Descriptors are immutable and shared via Arc by every verb of a route

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method},
    response::Response,
};

use crate::api::{ApiDefinition, KeyValue};

const DEFAULT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Headers that describe message framing and must match the real body.
const FRAMING_HEADERS: [HeaderName; 4] = [
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONNECTION,
    header::TRAILER,
];

/// Precompiled headers, cookies and body for one route.
#[derive(Debug, Clone)]
pub struct ResponseDescriptor {
    headers: Vec<(HeaderName, HeaderValue)>,
    cookies: Vec<(KeyValue, HeaderValue)>,
    body: String,
}

impl ResponseDescriptor {
    /// Compile a definition. Invalid header or cookie pairs are skipped with a warning.
    pub fn compile(definition: &ApiDefinition) -> Self {
        let headers = definition
            .headers
            .iter()
            .filter_map(|kv| match compile_header(kv) {
                Some((name, _)) if FRAMING_HEADERS.contains(&name) => {
                    tracing::warn!(path = %definition.path, header = %kv.key, "Skipping framing header");
                    None
                }
                Some(h) => Some(h),
                None => {
                    tracing::warn!(path = %definition.path, header = %kv.key, "Skipping invalid header");
                    None
                }
            })
            .collect();

        let cookies = definition
            .cookies
            .iter()
            .filter_map(|kv| match compile_cookie(kv) {
                Some(c) => Some((kv.clone(), c)),
                None => {
                    tracing::warn!(path = %definition.path, cookie = %kv.key, "Skipping invalid cookie");
                    None
                }
            })
            .collect();

        Self {
            headers,
            cookies,
            body: definition.response_body.clone(),
        }
    }

    /// Headers in emission order.
    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }

    /// Cookie name/value pairs in emission order.
    pub fn cookies(&self) -> impl Iterator<Item = &KeyValue> {
        self.cookies.iter().map(|(kv, _)| kv)
    }

    /// The configured response body, without the method line.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Wire body for a request made with `method`.
    pub fn body_for(&self, method: &Method) -> String {
        format!("{}\n{}", method, self.body)
    }

    /// Build the outbound response. Status is left at 200.
    pub fn render(&self, method: &Method) -> Response {
        let mut response = Response::new(Body::from(self.body_for(method)));
        let headers = response.headers_mut();

        for (name, value) in &self.headers {
            headers.append(name.clone(), value.clone());
        }
        for (_, cookie) in &self.cookies {
            headers.append(header::SET_COOKIE, cookie.clone());
        }
        if !headers.contains_key(header::CONTENT_TYPE) {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        }

        response
    }
}

fn compile_header(kv: &KeyValue) -> Option<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(kv.key.as_bytes()).ok()?;
    let value = HeaderValue::from_str(&kv.value).ok()?;
    Some((name, value))
}

fn compile_cookie(kv: &KeyValue) -> Option<HeaderValue> {
    if kv.key.is_empty() || !kv.key.bytes().all(is_token_byte) {
        return None;
    }
    if kv.value.contains(';') || kv.value.contains(',') {
        return None;
    }
    HeaderValue::from_str(&format!("{}={}", kv.key, kv.value)).ok()
}

// RFC 7230 tchar
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
