//! Stateless HTTP request builder and response parser for the lodging API.
//!
//! # Design
//! `LodgingClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`, so the I/O boundary stays explicit and both halves are
//! testable without a network. Bearer credentials are attached by the
//! orchestration layer, never here.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Accommodation, AuthResponse, Credentials, SearchParams, SignupProfile};

/// Stateless client for the lodging API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. A `Transport` executes the round-trip in between.
#[derive(Debug, Clone)]
pub struct LodgingClient {
    base_url: String,
}

impl LodgingClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_health(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/health", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_login(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        self.build_json_post("/auth/login", credentials)
    }

    pub fn build_signup(&self, profile: &SignupProfile) -> Result<HttpRequest, ApiError> {
        self.build_json_post("/auth/signup", profile)
    }

    pub fn build_search(&self, params: &SearchParams) -> HttpRequest {
        let query = search_query(params);
        let path = if query.is_empty() {
            format!("{}/accommodations/search", self.base_url)
        } else {
            format!("{}/accommodations/search?{query}", self.base_url)
        };
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_accommodation(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/accommodations/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Parse the health-check response. The body shape is server-defined, so
    /// it is exposed as raw JSON.
    pub fn parse_health(&self, response: HttpResponse) -> Result<serde_json::Value, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<AuthResponse, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_signup(&self, response: HttpResponse) -> Result<AuthResponse, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<Accommodation>, ApiError> {
        check_status(&response, 200)?;
        let body: SearchBody = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(match body {
            SearchBody::Envelope { accommodations } => accommodations,
            SearchBody::Bare(accommodations) => accommodations,
        })
    }

    pub fn parse_accommodation(&self, response: HttpResponse) -> Result<Accommodation, ApiError> {
        check_status(&response, 200)?;
        let body: AccommodationEnvelope = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(body.accommodation)
    }

    fn build_json_post<T: serde::Serialize>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{endpoint}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Some deployments return `{"accommodations": [...]}`, older ones a bare
/// array. Both are accepted.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum SearchBody {
    Envelope { accommodations: Vec<Accommodation> },
    Bare(Vec<Accommodation>),
}

#[derive(serde::Deserialize)]
struct AccommodationEnvelope {
    accommodation: Accommodation,
}

/// Assemble the search query string, omitting absent parameters. Values are
/// form-urlencoded; empty and whitespace-only values are treated as absent
/// and never sent.
fn search_query(params: &SearchParams) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in [
        ("city", &params.city),
        ("checkin", &params.checkin),
        ("checkout", &params.checkout),
    ] {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// Map non-success status codes to the appropriate `ApiError` variant. 503
/// gets its own variant so the cold-start path is distinguishable; other
/// failures carry the server's `message` field when the body provides one.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 503 {
        return Err(ApiError::ServiceUnavailable);
    }
    Err(ApiError::Api {
        status: response.status,
        message: error_message(response),
    })
}

fn error_message(response: &HttpResponse) -> String {
    serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP error! status: {}", response.status))
}
