//! Client-side access layer for a lodging-search HTTP API.
//!
//! # Overview
//! Issues search, single-record fetch, login, signup, and health-check
//! requests against a remote backend; classifies failures; transparently
//! retries one cold-start (HTTP 503) rejection; and substitutes an embedded
//! sample set when the backend is unreachable, always surfacing the error
//! alongside the substitute data.
//!
//! # Design
//! - `LodgingClient` is stateless — each operation is a `build_*` /
//!   `parse_*` pair over plain request/response data, so everything above
//!   the socket is deterministic.
//! - I/O goes through the `Transport` trait; `UreqTransport` is the
//!   production implementation and `ColdStartRetry` decorates any transport
//!   with the single bounded 503 retry.
//! - `SessionStore` pairs the auth token with its user record (both present
//!   or both absent) and persists the token through a `TokenStore`.
//! - `LodgingService` wires the pieces together and owns the "last results"
//!   slot; it is constructed and injected rather than ambient.

pub mod client;
pub mod error;
pub mod fallback;
pub mod http;
pub mod retry;
pub mod service;
pub mod session;
pub mod transport;
pub mod types;

pub use client::LodgingClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use retry::{ColdStartRetry, COLD_START_DELAY};
pub use service::{FetchOutcome, LodgingService, SearchOutcome};
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionStore, TokenStore};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Accommodation, AccommodationType, AuthResponse, Credentials, SearchParams, SignupProfile, User,
};
