//! OpenAPI document describing the mock endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method},
    Json,
};
use serde::Serialize;

use crate::http::server::RegisteredRoute;

const VERBS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

#[derive(Debug, Clone, Serialize)]
pub struct ApiDocument {
    pub openapi: &'static str,
    pub info: DocumentInfo,
    pub servers: Vec<DocumentServer>,
    pub paths: BTreeMap<String, BTreeMap<String, Operation>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    pub title: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentServer {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    pub summary: String,
    #[serde(rename = "x-query-string", skip_serializing_if = "Option::is_none")]
    pub query_string: Option<String>,
    pub responses: BTreeMap<&'static str, OperationResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationResponse {
    pub description: &'static str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, HeaderDoc>,
    pub content: BTreeMap<String, MediaDoc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderDoc {
    pub example: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaDoc {
    pub example: String,
}

impl ApiDocument {
    /// Describe every registered route served at `api_url`.
    pub fn new(routes: &[RegisteredRoute], api_url: impl Into<String>) -> Self {
        let paths = routes
            .iter()
            .map(|route| {
                let operations = VERBS
                    .iter()
                    .map(|method| (method.as_str().to_lowercase(), Operation::new(route, method)))
                    .collect();
                (route.definition.path.clone(), operations)
            })
            .collect();

        Self {
            openapi: "3.0.3",
            info: DocumentInfo {
                title: "apic mock API",
                version: env!("CARGO_PKG_VERSION"),
            },
            servers: vec![DocumentServer { url: api_url.into() }],
            paths,
        }
    }
}

impl Operation {
    fn new(route: &RegisteredRoute, method: &Method) -> Self {
        let headers = route
            .descriptor
            .headers()
            .iter()
            .map(|(name, value)| {
                let example = value.to_str().unwrap_or_default().to_string();
                (name.to_string(), HeaderDoc { example })
            })
            .chain(route.descriptor.cookies().map(|kv| {
                let example = format!("{}={}", kv.key, kv.value);
                ("set-cookie".to_string(), HeaderDoc { example })
            }))
            .collect();

        let content_type = route
            .descriptor
            .headers()
            .iter()
            .find(|(name, _)| *name == header::CONTENT_TYPE)
            .and_then(|(_, value)| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|media| media.trim().to_string())
            .unwrap_or_else(|| "text/plain".to_string());

        let mut content = BTreeMap::new();
        content.insert(
            content_type,
            MediaDoc {
                example: route.descriptor.body_for(method),
            },
        );

        let mut responses = BTreeMap::new();
        responses.insert(
            "200",
            OperationResponse {
                description: "Configured mock response",
                headers,
                content,
            },
        );

        Self {
            summary: format!("{} {}", method, route.definition.path),
            query_string: route.definition.query_string.clone(),
            responses,
        }
    }
}

/// Serve the precomputed document.
pub async fn get_document(State(document): State<Arc<ApiDocument>>) -> Json<ApiDocument> {
    Json(document.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::builder::build_definition;
    use crate::http::ApiServer;

    fn routes() -> Vec<RegisteredRoute> {
        let defs = vec![
            build_definition(
                Some("/user/new"),
                vec![
                    ("querystr", "id=110"),
                    ("resp", r#"{"ok":true}"#),
                    ("header", "content-type=application/json"),
                    ("cookie", "session=abc"),
                ],
            ),
            build_definition(Some("/orders"), Vec::<(&str, &str)>::new()),
        ];
        ApiServer::new(&defs).routes().to_vec()
    }

    #[test]
    fn test_document_lists_every_path_and_verb() {
        let doc = ApiDocument::new(&routes(), "http://localhost:8080");
        assert_eq!(doc.paths.len(), 2);

        let ops = &doc.paths["/user/new"];
        let verbs: Vec<_> = ops.keys().map(String::as_str).collect();
        assert_eq!(verbs, vec!["delete", "get", "post", "put"]);

        let get = &ops["get"];
        assert_eq!(get.summary, "GET /user/new");
        assert_eq!(get.query_string.as_deref(), Some("?id%3D110"));
        assert_eq!(
            get.responses["200"].content["application/json"].example,
            "GET\n{\"ok\":true}"
        );
    }

    #[test]
    fn test_document_serializes_as_openapi_json() {
        let doc = ApiDocument::new(&routes(), "http://localhost:8080");
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["openapi"], "3.0.3");
        assert_eq!(json["servers"][0]["url"], "http://localhost:8080");
        assert_eq!(
            json["paths"]["/orders"]["post"]["responses"]["200"]["content"]["text/plain"]["example"],
            "POST\n"
        );
        assert!(json["paths"]["/orders"]["get"].get("x-query-string").is_none());
    }
}
